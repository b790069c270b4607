// ── Runtime connection configuration ──
//
// These types describe *how* to reach a device's submodel API.
// They carry connection tuning only and never touch disk — the CLI
// constructs a `DashboardConfig` from its own config layer and hands
// it in.

use std::path::PathBuf;
use std::time::Duration;

use boardwatch_api::{TlsMode, TransportConfig};
use url::Url;

/// Default polling cadence for telemetry refresh.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed device certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single device.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Device base URL (e.g., `http://192.168.1.50:5000`).
    pub base_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Telemetry polling cadence.
    pub poll_interval: Duration,
}

impl DashboardConfig {
    /// Config for `base_url` with default tuning.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// The transport settings for `boardwatch_api`.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
