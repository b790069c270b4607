// Submodel API HTTP client
//
// Wraps `reqwest::Client` with URL construction against the device base
// URL and typed accessors for the known submodels. Responses are read as
// text first so deserialization failures keep the raw body for debugging.

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{
    NetworkConfiguration, SystemInformation, NETWORK_CONFIGURATION, SYSTEM_INFORMATION,
};
use crate::transport::TransportConfig;

/// HTTP client for the device's submodel resource API.
///
/// Cheaply cloneable — `reqwest::Client` is an `Arc` internally, so clones
/// share the same connection pool.
#[derive(Debug, Clone)]
pub struct SubmodelClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SubmodelClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API root (e.g. `http://192.168.0.10:18000`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` (used by tests).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Typed accessors ──────────────────────────────────────────────

    /// Fetch all submodels keyed by short name.
    pub async fn list_submodels(&self) -> Result<IndexMap<String, serde_json::Value>, Error> {
        self.get(self.api_url("submodels")?).await
    }

    /// Fetch one submodel as raw JSON.
    pub async fn get_submodel(&self, name: &str) -> Result<serde_json::Value, Error> {
        self.get(self.submodel_url(name)?).await
    }

    /// Fetch the `SystemInformation` telemetry submodel.
    pub async fn get_system_information(&self) -> Result<SystemInformation, Error> {
        self.get(self.submodel_url(SYSTEM_INFORMATION)?).await
    }

    /// Fetch the `NetworkConfiguration` submodel.
    pub async fn get_network_configuration(&self) -> Result<NetworkConfiguration, Error> {
        self.get(self.submodel_url(NETWORK_CONFIGURATION)?).await
    }

    /// Write a full replacement document for the named submodel.
    ///
    /// The device treats PATCH as whole-document replace; there are no
    /// partial-patch semantics. A non-2xx status is returned as
    /// [`Error::Api`] with the response body as the message.
    pub async fn patch_submodel(&self, name: &str, body: &impl Serialize) -> Result<(), Error> {
        let url = self.submodel_url(name)?;
        debug!("PATCH {url}");

        let resp = self
            .http
            .patch(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path relative to the device root.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// `{base}/submodels/{name}`
    fn submodel_url(&self, name: &str) -> Result<Url, Error> {
        self.api_url(&format!("submodels/{name}"))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and deserialize the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
