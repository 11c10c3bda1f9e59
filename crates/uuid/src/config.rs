//! Generator configuration.
//!
//! Resolved once at process startup and passed into [`crate::UuidService::with_config`].
//! Nothing in this crate reads environment variables; binaries read them and hand the raw
//! values to the parsers here.

use crate::{UuidError, UuidResult};

/// Configuration for a [`crate::UuidService`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    node_id: Option<[u8; 6]>,
}

impl GeneratorConfig {
    pub fn new(node_id: Option<[u8; 6]>) -> Self {
        Self { node_id }
    }

    /// The node id to embed in V1 and V6 UUIDs.
    ///
    /// `None` means a random node id with the multicast bit set is drawn on first use.
    pub fn node_id(&self) -> Option<[u8; 6]> {
        self.node_id
    }
}

/// Parse a node id from an optional string value.
///
/// Accepts 12 hex digits, optionally split into octets by `:` or `-`
/// (`9f:6b:de:ce:d8:46`, `9F-6B-DE-CE-D8-46`, `9f6bdeced846`).
/// `None` or an empty/whitespace value yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`UuidError::InvalidArgument`] if the value is present but is not a 48-bit
/// hex node id.
pub fn node_id_from_env_value(value: Option<String>) -> UuidResult<Option<[u8; 6]>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let Some(value) = value else {
        return Ok(None);
    };

    let digits: String = value.chars().filter(|c| !matches!(c, ':' | '-')).collect();
    if digits.len() != 12 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(UuidError::InvalidArgument(format!(
            "node id must be 12 hex digits, optionally separated by ':' or '-', got: '{}'",
            value
        )));
    }

    let mut node = [0u8; 6];
    for (i, octet) in node.iter_mut().enumerate() {
        *octet = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|e| {
            UuidError::InvalidArgument(format!("invalid node id '{}': {}", value, e))
        })?;
    }

    Ok(Some(node))
}
