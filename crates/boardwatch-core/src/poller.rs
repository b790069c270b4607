// ── Periodic telemetry poller ──
//
// Fetch cadence and fetch latency are decoupled: every tick spawns an
// independent fetch, so a slow device response never delays the next
// scheduled fetch. Responses come back tagged with a monotonic sequence
// number and anything older than the last applied fetch is discarded --
// overlapping fetches can never roll the store backwards.

use std::sync::Arc;
use std::time::Duration;

use boardwatch_api::{SubmodelClient, SystemInformation};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::DEFAULT_POLL_INTERVAL;
use crate::store::TelemetryStore;

type FetchResult = (u64, Result<SystemInformation, boardwatch_api::Error>);

/// Background polling of the telemetry submodel into a [`TelemetryStore`].
#[derive(Debug)]
pub struct TelemetryPoller {
    client: SubmodelClient,
    store: Arc<TelemetryStore>,
    interval: Duration,
}

impl TelemetryPoller {
    /// A zero `interval` falls back to [`DEFAULT_POLL_INTERVAL`];
    /// `tokio::time::interval` rejects a zero period.
    pub fn new(client: SubmodelClient, store: Arc<TelemetryStore>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            interval
        };
        Self {
            client,
            store,
            interval,
        }
    }

    /// Start the poll loop. The first fetch fires immediately; subsequent
    /// fetches follow the configured cadence.
    pub fn spawn(self) -> PollerHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_loop(
            self.client,
            self.store,
            self.interval,
            cancel.clone(),
        ));
        PollerHandle { cancel, task }
    }
}

/// Handle to a running poller.
///
/// Dropping the handle cancels the loop; in-flight fetches finish in the
/// background and their results land in a closed channel.
#[derive(Debug)]
pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Request the loop to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        let _ = (&mut self.task).await;
    }

    /// `true` once the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop(
    client: SubmodelClient,
    store: Arc<TelemetryStore>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResult>();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    // Sequence numbers are assigned at dispatch, so arrival order and
    // dispatch order can disagree; `last_applied` is what guards the store.
    let mut next_seq: u64 = 0;
    let mut last_applied: u64 = 0;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                next_seq += 1;
                let seq = next_seq;
                let client = client.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = client.get_system_information().await;
                    let _ = tx.send((seq, result));
                });
            }
            Some((seq, result)) = rx.recv() => {
                if seq <= last_applied {
                    debug!(seq, last_applied, "discarding stale telemetry response");
                } else {
                    match result {
                        Ok(info) => {
                            last_applied = seq;
                            store.apply(&info);
                        }
                        // A failed fetch never advances `last_applied`: a
                        // slower success from an earlier tick is still
                        // better than nothing.
                        Err(e) => warn!(seq, error = %e, "telemetry fetch failed"),
                    }
                }
            }
        }
    }

    debug!("telemetry poller stopped");
}
