// ── Reactive telemetry store ──
//
// One snapshot of the device's telemetry state behind a `watch` channel.
// The poller writes; renderers subscribe and re-draw on change.

use boardwatch_api::SystemInformation;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::metrics::memory::RamUsage;
use crate::metrics::sample::Sample;
use crate::metrics::window::SlidingWindow;

/// Everything a renderer needs to draw the telemetry dashboard.
///
/// Snapshots are cheap value types: the windows are fixed-size arrays
/// and cloning never contends with the writer.
#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    /// CPU usage history, percent, oldest first.
    pub cpu: SlidingWindow,
    /// Board temperature history, °C, oldest first.
    pub temperature: SlidingWindow,
    /// Derived RAM split, absent until the first successful fetch.
    pub ram: Option<RamUsage>,
    /// The device's own `LastUpdate` stamp from the latest applied fetch.
    pub device_last_update: Option<DateTime<Utc>>,
    /// When we last applied a successful fetch.
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Central reactive store for telemetry.
///
/// Mutations go through [`apply`](Self::apply) and are broadcast to
/// subscribers via the `watch` channel; a snapshot read never blocks
/// the writer.
#[derive(Debug)]
pub struct TelemetryStore {
    state: watch::Sender<TelemetrySnapshot>,
}

impl TelemetryStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(TelemetrySnapshot::default());
        Self { state }
    }

    /// Fold one fetched `SystemInformation` document into the snapshot.
    ///
    /// Every applied fetch pushes exactly one slot into each window;
    /// readings the device omitted or garbled become gaps, so the
    /// windows stay aligned in time.
    pub fn apply(&self, info: &SystemInformation) {
        let hw = &info.hardware;
        let cpu = Sample::parse(&hw.processor.cpu_usage);
        let temperature = Sample::parse(&hw.board_temperature);
        let ram = RamUsage::compute(&hw.memory.ram_free, &hw.memory.ram_installed);

        self.state.send_modify(|snap| {
            snap.cpu = snap.cpu.push(cpu);
            snap.temperature = snap.temperature.push(temperature);
            snap.ram = Some(ram);
            snap.device_last_update = info.last_update.or(snap.device_last_update);
            snap.fetched_at = Some(Utc::now());
        });
    }

    /// A receiver that observes every applied fetch.
    pub fn subscribe(&self) -> watch::Receiver<TelemetrySnapshot> {
        self.state.subscribe()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.state.borrow().clone()
    }

    /// How long ago the last fetch was applied, or `None` if never.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.state.borrow().fetched_at.map(|t| Utc::now() - t)
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::new()
    }
}
