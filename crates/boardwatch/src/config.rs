//! CLI configuration: TOML profiles plus `GlobalOpts`-aware resolution.
//!
//! Profiles name a device URL and TLS tuning; the device API carries no
//! credentials, so there is nothing secret to store. Flag and env
//! overrides always win over profile values.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use boardwatch_core::{DashboardConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Telemetry polling cadence in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    5
}

/// A named device profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Device base URL (e.g., "http://192.168.1.50:5000").
    pub device: String,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "boardwatch", "boardwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("boardwatch");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("BOARDWATCH_CFG_").split("_"));

    Ok(figment.extract()?)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Resolution to DashboardConfig ───────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `DashboardConfig` from the config file, profile, and CLI
/// overrides. The `--device` flag alone is enough; a profile is optional.
pub fn resolve(global: &GlobalOpts) -> Result<DashboardConfig, CliError> {
    resolve_with(global, &load_config_or_default())
}

fn resolve_with(global: &GlobalOpts, cfg: &Config) -> Result<DashboardConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let profile = cfg.profiles.get(&profile_name);

    // Explicit --profile that doesn't exist is an error; the implicit
    // "default" profile is allowed to be absent when --device is given.
    if profile.is_none() && global.profile.is_some() {
        let mut available: Vec<&String> = cfg.profiles.keys().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    let url_str = global
        .device
        .as_deref()
        .or(profile.map(|p| p.device.as_str()))
        .ok_or_else(|| CliError::NoDevice {
            path: config_path().display().to_string(),
        })?;

    let base_url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "device".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let insecure = global.insecure
        || profile.and_then(|p| p.insecure).unwrap_or(cfg.defaults.insecure);
    let tls = if insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ca_path) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsVerification::CustomCa(ca_path)
    } else {
        TlsVerification::SystemDefaults
    };

    // Flag and env win over the profile, the profile over the defaults.
    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(cfg.defaults.timeout);

    Ok(DashboardConfig {
        base_url,
        tls,
        timeout: Duration::from_secs(timeout),
        // A zero cadence would stall the poller; floor it at one second.
        poll_interval: Duration::from_secs(cfg.defaults.poll_interval.max(1)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::cli::{ColorMode, OutputFormat};

    use super::*;

    fn opts() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            device: None,
            output: OutputFormat::Table,
            color: ColorMode::Auto,
            verbose: 0,
            quiet: false,
            insecure: false,
            timeout: None,
        }
    }

    fn config_with_profile_timeout(timeout: Option<u64>) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                device: "http://192.168.1.50:5000".into(),
                ca_cert: None,
                insecure: None,
                timeout,
            },
        );
        cfg
    }

    #[test]
    fn timeout_flag_wins_over_profile() {
        let cfg = config_with_profile_timeout(Some(120));
        let mut global = opts();
        global.timeout = Some(60);

        let dashboard = resolve_with(&global, &cfg).unwrap();
        assert_eq!(dashboard.timeout, Duration::from_secs(60));
    }

    #[test]
    fn profile_timeout_used_without_a_flag() {
        let cfg = config_with_profile_timeout(Some(120));

        let dashboard = resolve_with(&opts(), &cfg).unwrap();
        assert_eq!(dashboard.timeout, Duration::from_secs(120));
    }

    #[test]
    fn timeout_falls_back_to_defaults() {
        let cfg = config_with_profile_timeout(None);

        let dashboard = resolve_with(&opts(), &cfg).unwrap();
        assert_eq!(dashboard.timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_poll_interval_is_floored() {
        let mut cfg = config_with_profile_timeout(None);
        cfg.defaults.poll_interval = 0;

        let dashboard = resolve_with(&opts(), &cfg).unwrap();
        assert_eq!(dashboard.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn missing_explicit_profile_is_an_error() {
        let cfg = Config::default();
        let mut global = opts();
        global.profile = Some("lab".into());

        let err = resolve_with(&global, &cfg).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { .. }));
    }
}
