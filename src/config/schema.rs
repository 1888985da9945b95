//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Storage root for uploaded files.
    pub storage: StorageConfig,

    /// Downstream calculation service.
    pub downstream: DownstreamConfig,

    /// Request handling limits and status mapping.
    pub http: HttpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,

    /// Listen port (`PORT`).
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 6000,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory under which all stored files live (`PV_PATH`).
    pub root: PathBuf,

    /// Restrict file names to a single plain path component.
    ///
    /// Off by default: names are joined to the root as given, so
    /// `../x` escapes the storage root.
    pub reject_unsafe_names: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/bishad_PV_dir"),
            reject_unsafe_names: false,
        }
    }
}

/// Downstream calculation service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Calculation endpoint URL (`CALC_SERVICE_URL`).
    pub url: String,

    /// Total timeout for one downstream call. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://calculation-service:6001/calculate".to_string(),
            timeout_secs: None,
        }
    }
}

/// How handler outcomes map to HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Every outcome is answered with 200; only the body differs.
    #[default]
    Compat,
    /// Errors get 4xx/5xx codes and passthrough keeps the downstream status.
    Strict,
}

/// HTTP handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,

    /// Whole-request timeout in seconds. Disabled when `None`.
    pub request_timeout_secs: Option<u64>,

    pub status_policy: StatusPolicy,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_size: 100 * 1024, // 100KB
            request_timeout_secs: None,
            status_policy: StatusPolicy::Compat,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directives used when `RUST_LOG` is unset.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "validation_service=info,tower_http=info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
