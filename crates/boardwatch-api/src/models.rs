// Typed submodel documents.
//
// The device reports every reading as a display string ("17 %", "42 °C",
// "729 MB") — numeric interpretation is boardwatch-core's job, so these
// models keep the raw strings. Each struct carries a `#[serde(flatten)]`
// catch-all so documents round-trip through PATCH without dropping fields
// this crate doesn't know about.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Short name of the telemetry submodel.
pub const SYSTEM_INFORMATION: &str = "SystemInformation";

/// Short name of the editable network configuration submodel.
pub const NETWORK_CONFIGURATION: &str = "NetworkConfiguration";

/// The `SystemInformation` submodel: live hardware telemetry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SystemInformation {
    #[serde(rename = "Hardware")]
    pub hardware: Hardware,

    /// Stamped by the device on every refresh (RFC 3339).
    #[serde(rename = "LastUpdate", default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,

    /// Remaining document fields (OS info, uptime, disk, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The `Hardware` subtree of [`SystemInformation`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hardware {
    #[serde(rename = "Processor")]
    pub processor: Processor,

    #[serde(rename = "Memory")]
    pub memory: Memory,

    /// Board temperature as reported, e.g. `"42 °C"`.
    #[serde(rename = "BoardTemperature", default)]
    pub board_temperature: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Processor {
    /// CPU usage as reported, e.g. `"17 %"`.
    #[serde(rename = "CpuUsage", default)]
    pub cpu_usage: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Memory {
    /// Free RAM as reported, e.g. `"729 MB"` or `"512 Mi"`.
    #[serde(rename = "RAMFree", default)]
    pub ram_free: String,

    /// Installed RAM as reported, e.g. `"16Gi"`.
    #[serde(rename = "RAMInstalled", default)]
    pub ram_installed: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Interface name → property name → value.
///
/// Order-preserving so a PATCH round-trip doesn't reorder the server copy.
pub type NetworkSetting = IndexMap<String, IndexMap<String, String>>;

/// The `NetworkConfiguration` submodel: editable interface settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfiguration {
    #[serde(rename = "NetworkSetting", default)]
    pub network_setting: NetworkSetting,

    #[serde(rename = "LastUpdate", default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
