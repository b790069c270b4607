//! Async client for the boardwatch device's submodel resource API.
//!
//! The device exposes its state as a small set of named JSON resources
//! ("submodels") under a single HTTP surface:
//!
//! - `GET /submodels` — all submodels keyed by short name
//! - `GET /submodels/{name}` — one submodel document
//! - `PATCH /submodels/{name}` — whole-document replacement write
//!
//! [`SubmodelClient`] wraps `reqwest` with URL construction and typed
//! accessors for the two documents this workspace consumes:
//! [`SystemInformation`] (live telemetry, string-typed readings) and
//! [`NetworkConfiguration`] (editable interface settings).

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::SubmodelClient;
pub use error::Error;
pub use models::{
    Hardware, Memory, NetworkConfiguration, NetworkSetting, Processor, SystemInformation,
    NETWORK_CONFIGURATION, SYSTEM_INFORMATION,
};
pub use transport::{TlsMode, TransportConfig};
