//! Validation Service Library
//!
//! File storage and calculation proxy in front of a downstream
//! calculation service.

pub mod calculation;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod outcome;
pub mod storage;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use outcome::Outcome;
