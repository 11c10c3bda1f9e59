//! Decoding the fields embedded in an existing UUID.

use crate::constants::GREGORIAN_UNIX_OFFSET_TICKS;
use crate::format;
use crate::UuidResult;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The variant encoded in the top bits of byte 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Variant {
    /// `0xxx`: reserved for NCS backward compatibility (includes the nil UUID).
    Ncs,
    /// `10xx`: the layout RFC 9562 defines.
    Rfc,
    /// `110x`: reserved for Microsoft GUIDs.
    Microsoft,
    /// `111x`: reserved for future definition (includes the max UUID).
    Future,
}

/// What can be read back out of a UUID value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UuidInfo {
    /// The version nibble, whatever the variant.
    pub version: u8,
    pub variant: Variant,
    /// Creation time, for RFC-variant V1, V6 and V7 values.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Parses `candidate` and describes it.
///
/// # Errors
///
/// Returns [`crate::UuidError::InvalidArgument`] if `candidate` does not pass
/// [`format::validate`].
pub fn inspect(candidate: &str) -> UuidResult<UuidInfo> {
    format::parse(candidate).map(|uuid| describe(&uuid))
}

/// Describes an already parsed value.
pub fn describe(uuid: &Uuid) -> UuidInfo {
    let bytes = uuid.as_bytes();
    let version = bytes[6] >> 4;
    let variant = match bytes[8] {
        b if b & 0x80 == 0x00 => Variant::Ncs,
        b if b & 0xc0 == 0x80 => Variant::Rfc,
        b if b & 0xe0 == 0xc0 => Variant::Microsoft,
        _ => Variant::Future,
    };

    let timestamp = match (variant, version) {
        (Variant::Rfc, 1) => gregorian_to_datetime(v1_ticks(uuid)),
        (Variant::Rfc, 6) => gregorian_to_datetime(v6_ticks(uuid)),
        (Variant::Rfc, 7) => i64::try_from(v7_millis(uuid))
            .ok()
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    };

    UuidInfo {
        version,
        variant,
        timestamp,
    }
}

/// The 60-bit Gregorian tick count of a V1 layout.
pub(crate) fn v1_ticks(uuid: &Uuid) -> u64 {
    let (time_low, time_mid, time_hi, _) = uuid.as_fields();
    (u64::from(time_hi & 0x0fff) << 48) | (u64::from(time_mid) << 32) | u64::from(time_low)
}

/// The 60-bit Gregorian tick count of a V6 layout.
pub(crate) fn v6_ticks(uuid: &Uuid) -> u64 {
    let (time_high, time_mid, time_low, _) = uuid.as_fields();
    (u64::from(time_high) << 28) | (u64::from(time_mid) << 12) | u64::from(time_low & 0x0fff)
}

/// The 48-bit Unix millisecond timestamp of a V7 layout.
pub(crate) fn v7_millis(uuid: &Uuid) -> u64 {
    (uuid.as_u128() >> 80) as u64
}

fn gregorian_to_datetime(ticks: u64) -> Option<DateTime<Utc>> {
    let unix_ticks = i128::from(ticks) - i128::from(GREGORIAN_UNIX_OFFSET_TICKS);
    let secs = i64::try_from(unix_ticks.div_euclid(10_000_000)).ok()?;
    let nanos = u32::try_from(unix_ticks.rem_euclid(10_000_000) * 100).ok()?;
    DateTime::from_timestamp(secs, nanos)
}
