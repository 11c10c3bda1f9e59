//! Textual rendering and syntactic validation of UUIDs.
//!
//! Two textual forms are recognised, both case-insensitive:
//! - hyphenated: `6ba7b810-9dad-11d1-80b4-00c04fd430c8` (36 characters, 8-4-4-4-12)
//! - simple: `6ba7b8109dad11d180b400c04fd430c8` (32 characters)
//!
//! Surrounding whitespace is ignored, so a pasted value with a trailing newline still
//! validates. Braced (`{...}`) and URN (`urn:uuid:...`) forms are rejected even though the
//! `uuid` crate itself would parse them.

use crate::constants::{HYPHENATED_LEN, HYPHEN_POSITIONS, SIMPLE_LEN};
use crate::{UuidError, UuidResult};
use uuid::Uuid;

/// Presentation flags applied to a generated value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatOptions {
    pub uppercase: bool,
    pub hyphens: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            uppercase: false,
            hyphens: true,
        }
    }
}

/// Renders `uuid` as hex text.
///
/// The flags only change presentation: stripping hyphens and lowercasing any output of this
/// function yields the same 32 digits for a given value.
pub fn format(uuid: &Uuid, options: FormatOptions) -> String {
    match (options.hyphens, options.uppercase) {
        (true, false) => uuid.hyphenated().to_string(),
        (true, true) => format!("{:X}", uuid.hyphenated()),
        (false, false) => uuid.simple().to_string(),
        (false, true) => format!("{:X}", uuid.simple()),
    }
}

/// Returns true if `candidate` is a UUID in hyphenated or simple form.
///
/// This is a purely syntactic check. Version and variant bits are not inspected, so the nil
/// and max UUIDs are valid, as is any other 128-bit value written in one of the two forms.
pub fn validate(candidate: &str) -> bool {
    let candidate = candidate.trim();
    match candidate.len() {
        HYPHENATED_LEN => candidate.bytes().enumerate().all(|(i, b)| {
            if HYPHEN_POSITIONS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        }),
        SIMPLE_LEN => candidate.bytes().all(|b| b.is_ascii_hexdigit()),
        _ => false,
    }
}

/// Parses a candidate accepted by [`validate`].
///
/// # Errors
///
/// Returns [`UuidError::InvalidArgument`] if `candidate` is not in one of the accepted forms.
pub fn parse(candidate: &str) -> UuidResult<Uuid> {
    if !validate(candidate) {
        return Err(UuidError::InvalidArgument(format!(
            "expected a UUID as 32 hex digits, optionally hyphenated 8-4-4-4-12, got: '{}'",
            candidate
        )));
    }
    Uuid::try_parse(candidate.trim())
        .map_err(|e| UuidError::InvalidArgument(format!("invalid UUID '{}': {}", candidate, e)))
}
