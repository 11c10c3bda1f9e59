//! # API Shared
//!
//! Shared definitions for the idsmith HTTP API.
//!
//! Contains:
//! - Request/response bodies with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
