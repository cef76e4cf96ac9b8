//! AWS-oriented adapters and handlers for the public API functions.
//!
//! This crate owns runtime integration details (Lambda handlers, AWS SDK
//! adapters, environment configuration, and log output) on top of the
//! dispatch primitives in `api_dispatch_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;
