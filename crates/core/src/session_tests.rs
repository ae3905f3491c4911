use super::*;

#[test]
fn session_id_round_trips_through_string() {
    let id = SessionId::from("abc-123");
    assert_eq!(id.as_str(), "abc-123");
    assert_eq!(id.to_string(), "abc-123");
    assert_eq!(id, *"abc-123");
}

#[test]
fn ttl_lock_delay_and_behavior_match_the_coordinator_contract() {
    assert_eq!(SESSION_TTL, "15s");
    assert_eq!(SESSION_LOCK_DELAY, "0s");
    assert_eq!(SESSION_BEHAVIOR, "delete");
}
