// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Election Loop: the FOLLOWER/LEADER state machine contending for the
//! single election key.

use super::SessionStore;
use cdcron_adapters::CoordinatorClient;
use cdcron_core::{Clock, ElectionKey};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

const LEADER_SLEEP: Duration = Duration::from_secs(5);
const FOLLOWER_SLEEP: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Follower,
    Leader,
}

pub(super) fn spawn<C: CoordinatorClient, K: Clock + 'static>(
    client: C,
    clock: K,
    key: ElectionKey,
    session: SessionStore,
    is_leader_tx: watch::Sender<bool>,
    fatal_tx: mpsc::Sender<super::LeadershipError>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        // The Session Loop always sets this before the Election Loop is
        // spawned (see LeadershipManager::start); absence here means the
        // manager is shutting down concurrently.
        let Some(my_session) = session.get() else {
            warn!("election loop started without a session id, exiting");
            return;
        };

        let mut state = State::Follower;
        let mut modify_index: u64 = 0;
        let mut leader_since = None;

        loop {
            tokio::time::sleep(if state == State::Leader {
                LEADER_SLEEP
            } else {
                FOLLOWER_SLEEP
            })
            .await;

            let observation = match client.lock_read(&key).await {
                Ok(obs) => obs,
                Err(e) => {
                    // lock_read errors are non-fatal by contract: log and
                    // retry on the next tick.
                    warn!(error = %e, "lock_read failed, will retry");
                    continue;
                }
            };

            match observation {
                None => {
                    // Key absent: attempt to acquire.
                    match client.lock_acquire(&key, &my_session).await {
                        Ok(true) => {
                            info!(session = %my_session, "acquired leadership");
                            state = State::Leader;
                            leader_since = Some(clock.now());
                            let _ = is_leader_tx.send(true);
                        }
                        Ok(false) => {
                            state = State::Follower;
                            log_leadership_lost(&mut leader_since, &clock);
                            let _ = is_leader_tx.send(false);
                        }
                        Err(e) => {
                            error!(error = %e, "lock_acquire failed, fatal");
                            let _ = fatal_tx
                                .send(super::LeadershipError::Registration(e))
                                .await;
                            return;
                        }
                    }
                }
                Some(obs) if obs.is_held_by(&my_session) => {
                    // We are leader; refresh our stored modify_index.
                    modify_index = obs.modify_index;
                    if state != State::Leader {
                        state = State::Leader;
                        leader_since = Some(clock.now());
                        let _ = is_leader_tx.send(true);
                    }
                }
                Some(obs) => {
                    if obs.modify_index == modify_index {
                        // Stale holder: attempt to take over.
                        match client.lock_acquire(&key, &my_session).await {
                            Ok(true) => {
                                info!(session = %my_session, "took over after stale holder");
                                state = State::Leader;
                                leader_since = Some(clock.now());
                                let _ = is_leader_tx.send(true);
                            }
                            Ok(false) => {
                                state = State::Follower;
                                log_leadership_lost(&mut leader_since, &clock);
                                let _ = is_leader_tx.send(false);
                            }
                            Err(e) => {
                                error!(error = %e, "lock_acquire failed, fatal");
                                let _ = fatal_tx
                                    .send(super::LeadershipError::Registration(e))
                                    .await;
                                return;
                            }
                        }
                    } else {
                        modify_index = obs.modify_index;
                        if state != State::Follower {
                            state = State::Follower;
                            log_leadership_lost(&mut leader_since, &clock);
                            let _ = is_leader_tx.send(false);
                        }
                    }
                }
            }
        }
    })
}

fn log_leadership_lost<K: Clock>(leader_since: &mut Option<std::time::Instant>, clock: &K) {
    if let Some(since) = leader_since.take() {
        info!(held_for = ?clock.now().duration_since(since), "lost leadership");
    }
}

#[cfg(test)]
#[path = "election_tests.rs"]
mod tests;
