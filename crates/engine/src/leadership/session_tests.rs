use super::*;
use cdcron_adapters::FakeCoordinatorClient;

#[tokio::test(start_paused = true)]
async fn signals_the_created_session_id() {
    let client = FakeCoordinatorClient::new();
    let (tx, rx) = oneshot::channel();
    let store = SessionStore::default();
    let (fatal_tx, _fatal_rx) = mpsc::channel(1);
    let handle = spawn(client, "cdcron".to_string(), tx, store.clone(), fatal_tx);

    let session_id = rx.await.unwrap();
    assert_eq!(store.get(), Some(session_id));
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn renews_periodically() {
    let client = FakeCoordinatorClient::new();
    let (tx, rx) = oneshot::channel();
    let store = SessionStore::default();
    let (fatal_tx, _fatal_rx) = mpsc::channel(1);
    let handle = spawn(client.clone(), "cdcron".to_string(), tx, store, fatal_tx);
    rx.await.unwrap();

    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;

    let renewed = client
        .calls()
        .iter()
        .any(|c| matches!(c, cdcron_adapters::CoordinatorCall::SessionRenew { .. }));
    assert!(renewed);
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn renewal_failure_is_reported_as_fatal() {
    let client = FakeCoordinatorClient::new();
    let (tx, rx) = oneshot::channel();
    let store = SessionStore::default();
    let (fatal_tx, mut fatal_rx) = mpsc::channel(1);
    let handle = spawn(client.clone(), "cdcron".to_string(), tx, store, fatal_tx);
    rx.await.unwrap();

    client.fail_next_renew();
    tokio::time::advance(Duration::from_secs(5)).await;

    let fatal = fatal_rx.recv().await;
    assert!(fatal.is_some());
    handle.abort();
}
