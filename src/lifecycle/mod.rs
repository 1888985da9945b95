//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config (already loaded) → Metrics exporter → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then observability, then the listener
//! - In-flight downstream calls and file writes are not cancelled on
//!   shutdown; they finish or the process exits

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
