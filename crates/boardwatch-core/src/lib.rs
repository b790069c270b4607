//! Data layer between `boardwatch-api` and UI consumers (CLI today).
//!
//! This crate owns the engineering content of the dashboard:
//!
//! - **[`metrics`]** — pure, synchronous value handling: numeric extraction
//!   from the device's string-typed readings ([`Sample`]), the fixed-length
//!   history buffer ([`SlidingWindow`]), and memory-size normalization
//!   ([`MemorySize`], [`RamUsage`]).
//!
//! - **[`TelemetryStore`]** — reactive snapshot storage: one
//!   [`TelemetrySnapshot`] behind a `tokio::sync::watch` channel, updated
//!   by the poller, observed by renderers.
//!
//! - **[`poller`]** — the periodic fetch loop. Fetch latency is decoupled
//!   from the polling cadence; responses are sequence-tagged and stale
//!   ones discarded, so overlapping fetches can never roll state backwards.
//!
//! - **[`EditSession`]** — explicit Viewing/Editing/Saving state machine
//!   over a draft of the server-owned network configuration. The canonical
//!   copy only ever changes on a confirmed successful save.

pub mod config;
pub mod error;
pub mod metrics;
pub mod poller;
pub mod session;
pub mod store;

pub use config::{DashboardConfig, TlsVerification};
pub use error::CoreError;
pub use metrics::memory::{MemorySize, MemoryUnit, RamUsage};
pub use metrics::sample::Sample;
pub use metrics::window::{SlidingWindow, WINDOW_LEN};
pub use poller::{PollerHandle, TelemetryPoller};
pub use session::{EditSession, SessionMode};
pub use store::{TelemetrySnapshot, TelemetryStore};
