//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check the downstream URL and metrics address parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("downstream.url {url:?} is not a valid http(s) URL")]
    DownstreamUrl { url: String },

    #[error("storage.root must not be empty")]
    EmptyStorageRoot,

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("observability.metrics_address {addr:?} is not a socket address")]
    MetricsAddress { addr: String },
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.downstream.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::DownstreamUrl {
            url: config.downstream.url.clone(),
        }),
    }

    if config.storage.root.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyStorageRoot);
    }

    if config.http.max_body_size == 0 {
        errors.push(ValidationError::Zero {
            field: "http.max_body_size",
        });
    }
    if config.http.request_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero {
            field: "http.request_timeout_secs",
        });
    }
    if config.downstream.timeout_secs == Some(0) {
        errors.push(ValidationError::Zero {
            field: "downstream.timeout_secs",
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress {
            addr: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
