use super::*;

#[test]
fn base_url_joins_scheme_host_and_port() {
    let endpoint = CoordinatorEndpoint::new("http", "localhost", 8500, None);
    assert_eq!(endpoint.base_url(), "http://localhost:8500");
}

#[test]
fn token_is_optional() {
    let endpoint = CoordinatorEndpoint::new("http", "localhost", 8500, Some("secret".into()));
    assert_eq!(endpoint.token.as_deref(), Some("secret"));
}
