//! Time and entropy inputs to generation.
//!
//! [`crate::UuidService`] never reads the system clock or the operating system's random
//! source directly. Both are handed to it as trait objects, so tests can pin the clock and
//! script the random bytes to check bit layouts exactly.

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of random bytes.
///
/// Implementations used outside tests must be cryptographically secure.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The operating system's cryptographically secure random source.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}
