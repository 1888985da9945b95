//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured tracing events, request id as a field)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the configured filter
//! - Metric updates go through the `metrics` facade and are no-ops until
//!   an exporter is installed

pub mod logging;
pub mod metrics;
