use super::*;
use cdcron_adapters::FakeCoordinatorClient;
use cdcron_core::{FakeClock, SessionId};

#[tokio::test(start_paused = true)]
async fn acquires_the_lock_when_absent() {
    let client = FakeCoordinatorClient::new();
    let key = ElectionKey::new("cdcron");
    let my_session = SessionId::from("mine");
    let store = SessionStore::default();
    store.set(my_session.clone());
    let (is_leader_tx, mut is_leader_rx) = watch::channel(false);
    let (fatal_tx, _fatal_rx) = mpsc::channel(1);

    let handle = spawn(
        client.clone(),
        FakeClock::new(),
        key,
        store,
        is_leader_tx,
        fatal_tx,
    );

    tokio::time::advance(Duration::from_secs(10)).await;
    is_leader_rx.changed().await.unwrap();
    assert!(*is_leader_rx.borrow());
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn remains_follower_while_another_session_holds_a_moving_lock() {
    let client = FakeCoordinatorClient::new();
    let key = ElectionKey::new("cdcron");
    let my_session = SessionId::from("mine");
    let other = SessionId::from("other");
    client.set_held_by(&other, 1);
    let store = SessionStore::default();
    store.set(my_session);
    let (is_leader_tx, is_leader_rx) = watch::channel(false);
    let (fatal_tx, _fatal_rx) = mpsc::channel(1);

    let handle = spawn(
        client.clone(),
        FakeClock::new(),
        key,
        store,
        is_leader_tx,
        fatal_tx,
    );

    tokio::time::advance(Duration::from_secs(10)).await;
    tokio::task::yield_now().await;
    client.set_held_by(&other, 2);
    tokio::time::advance(Duration::from_secs(10)).await;
    tokio::task::yield_now().await;

    assert!(!*is_leader_rx.borrow());
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn takes_over_when_the_holder_goes_stale() {
    let client = FakeCoordinatorClient::new();
    let key = ElectionKey::new("cdcron");
    let my_session = SessionId::from("mine");
    let other = SessionId::from("other");
    client.set_held_by(&other, 1);
    let store = SessionStore::default();
    store.set(my_session);
    let (is_leader_tx, mut is_leader_rx) = watch::channel(false);
    let (fatal_tx, _fatal_rx) = mpsc::channel(1);

    let handle = spawn(
        client.clone(),
        FakeClock::new(),
        key,
        store,
        is_leader_tx,
        fatal_tx,
    );

    // First tick observes modify_index 1 and stores it.
    tokio::time::advance(Duration::from_secs(10)).await;
    tokio::task::yield_now().await;
    // Holder never touches the key again: same modify_index on the next
    // tick reads as a liveness failure.
    tokio::time::advance(Duration::from_secs(10)).await;
    is_leader_rx.changed().await.unwrap();
    assert!(*is_leader_rx.borrow());
    handle.abort();
}
