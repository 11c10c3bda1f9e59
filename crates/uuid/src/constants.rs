//! Constants shared across the UUID crate.

/// Smallest number of UUIDs a single request may ask for.
pub const MIN_COUNT: usize = 1;

/// Largest number of UUIDs a single request may ask for.
pub const MAX_COUNT: usize = 100;

/// Count used when a request does not state one.
pub const DEFAULT_COUNT: usize = 1;

/// 100 ns intervals between 1582-10-15T00:00:00Z and the Unix epoch.
pub const GREGORIAN_UNIX_OFFSET_TICKS: u64 = 0x01B2_1DD2_1381_4000;

/// Length of the hyphenated 8-4-4-4-12 form.
pub const HYPHENATED_LEN: usize = 36;

/// Length of the bare 32 hex digit form.
pub const SIMPLE_LEN: usize = 32;

/// Byte offsets of the hyphens in the hyphenated form.
pub const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];
