//! Client for the validation service HTTP API.

pub mod client;

pub use client::{ServiceClient, StoreFileRequest, StoreFileResponse};
