use super::*;
use serial_test::serial;

fn clear_env() {
    for var in [
        "WORKLOAD_FILE",
        "CONSUL_SCHEME",
        "CONSUL_HOSTNAME",
        "CONSUL_PORT",
        "CONSUL_TOKEN",
        "SERVICE_NAME",
        "SERVICE_ID",
        "HEALTHCHECK_SCHEME",
        "HEALTHCHECK_HOSTNAME",
        "HEALTHCHECK_PORT",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn config_load_respects_env_overrides() {
    clear_env();
    std::env::set_var("CONSUL_HOSTNAME", "consul.example");
    std::env::set_var("CONSUL_PORT", "9999");
    std::env::set_var("SERVICE_NAME", "widgets");
    std::env::set_var("SERVICE_ID", "abcde");
    std::env::set_var("HEALTHCHECK_PORT", "9090");

    let config = Config::load();

    assert_eq!(config.endpoint.host, "consul.example");
    assert_eq!(config.endpoint.port, 9999);
    assert_eq!(config.identity.service_name, "widgets");
    assert_eq!(config.identity.service_id, "abcde");
    assert_eq!(config.identity.health_port, 9090);

    clear_env();
}

#[tokio::test]
#[serial]
async fn startup_reports_a_missing_workload_file_before_any_registration() {
    clear_env();
    std::env::set_var("HEALTHCHECK_PORT", "0");
    std::env::set_var("WORKLOAD_FILE", "/nonexistent/workload.json");

    let config = Config::load();
    let result = startup(&config).await;

    assert!(matches!(result, Err(LifecycleError::Workload(_))));

    clear_env();
}
