//! UUID generation, formatting and validation.
//!
//! idsmith produces RFC 9562 UUIDs of versions 1, 4, 5, 6 and 7, plus the nil and max
//! values, and checks whether arbitrary text is a well-formed UUID.
//!
//! This crate provides:
//! - [`UuidService`], which generates UUIDs from a [`UuidRequest`] and keeps time-based
//!   versions ordered.
//! - [`format()`] and [`validate()`], the pure presentation and syntax functions.
//! - [`required_fields`], which says which optional request inputs a version needs.
//! - [`inspect()`], which reads the version, variant and timestamp back out of a value.
//!
//! ## Versions
//! - **V1**: 60-bit Gregorian timestamp (100 ns ticks since 1582-10-15), clock sequence, node id
//! - **V4**: 122 random bits
//! - **V5**: SHA-1 of a namespace UUID and a name; deterministic
//! - **V6**: V1 fields reordered so the text sorts by creation time
//! - **V7**: 48-bit Unix milliseconds then random bits; sorts by creation time
//! - **Nil** / **Max**: all zero / all one bits
//!
//! ## Accepted textual forms
//! - Hyphenated: `6ba7b810-9dad-11d1-80b4-00c04fd430c8`
//! - Simple: `6ba7b8109dad11d180b400c04fd430c8`
//!
//! Both are case-insensitive and surrounding whitespace is ignored.
//!
//! ## Example
//! ```
//! use idsmith_uuid::{Namespace, UuidRequest, UuidService, UuidVersion};
//!
//! let service = UuidService::new();
//! let uuids = service
//!     .generate(&UuidRequest::v5(Namespace::Dns, "www.example.com"))
//!     .unwrap();
//! assert_eq!(uuids, vec!["2ed6657d-e927-568b-95e1-2665a8aea6a2"]);
//!
//! let batch = service
//!     .generate(&UuidRequest::new(UuidVersion::V7).with_count(3))
//!     .unwrap();
//! assert!(batch.iter().all(|s| UuidService::validate(s)));
//! ```

pub mod config;
pub mod constants;
pub mod format;
pub mod inspect;
pub mod request;
mod service;
pub mod source;

// Re-export public types
pub use config::{node_id_from_env_value, GeneratorConfig};
pub use format::{format, parse, validate, FormatOptions};
pub use inspect::{describe, inspect, UuidInfo, Variant};
pub use request::{required_fields, Namespace, RequiredFields, UuidRequest, UuidVersion};
pub use service::UuidService;
pub use source::{Clock, OsRandom, RandomSource, SystemClock};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// The request or an input value is malformed or out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
