//! Internal implementation of the UUID generation service.
//!
//! This module holds the per-version bit packing and the small amount of state that time-based
//! versions need to stay ordered.

use crate::config::GeneratorConfig;
use crate::constants::GREGORIAN_UNIX_OFFSET_TICKS;
use crate::format::{self, FormatOptions};
use crate::request::{UuidRequest, UuidVersion};
use crate::source::{Clock, OsRandom, RandomSource, SystemClock};
use crate::{UuidError, UuidResult};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::{Builder, Uuid};

/// Largest value of the 60-bit Gregorian timestamp.
const MAX_TICKS: u64 = (1 << 60) - 1;
/// Largest value of the 48-bit Unix millisecond timestamp.
const MAX_MILLIS: i64 = (1 << 48) - 1;
/// Mask of the 14-bit clock sequence.
const CLOCK_SEQ_MASK: u16 = 0x3fff;
/// Mask of the 62-bit `rand_b` field.
const RAND_B_MASK: u128 = (1 << 62) - 1;
/// Largest value of the 74 bits following the V7 version nibble (`rand_a` then `rand_b`).
const MAX_TAIL: u128 = (1 << 74) - 1;

/// Generates and validates UUIDs.
///
/// The service owns its clock and random source, plus the bookkeeping that keeps V1, V6 and
/// V7 output strictly ordered: the last issued timestamps, the clock sequence and the node id.
/// That state sits behind a mutex, so one service can be shared across threads with an `Arc`.
///
/// # Ordering
/// - V1 and V6: each UUID carries a tick strictly greater than the previous one from this
///   service. If the clock has not advanced, the previous tick plus one is used. If the wall
///   clock goes backwards, the clock sequence is also incremented.
/// - V7: within one millisecond (or when the clock goes backwards) the previous millisecond is
///   kept and the 74 random bits are incremented, so the text still sorts by creation order.
///
/// Both timestamps saturate at their largest value (around the years 5236 and 10889). From
/// then on V1 and V6 stay unique through the clock sequence and V7 through its random bits,
/// but neither is ordered any more.
///
/// # Errors
/// Generation fails with [`UuidError::InvalidArgument`] for an invalid [`UuidRequest`]; the
/// check runs before anything is produced.
pub struct UuidService {
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    config: GeneratorConfig,
    state: Mutex<GeneratorState>,
}

#[derive(Default)]
struct GeneratorState {
    gregorian: Option<GregorianState>,
    unix: Option<UnixState>,
}

struct GregorianState {
    clock_seq: u16,
    node: [u8; 6],
    last_wall_ticks: u64,
    last_ticks: u64,
}

#[derive(Clone, Copy)]
struct UnixState {
    millis: u64,
    tail: u128,
}

impl Default for UuidService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UuidService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UuidService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl UuidService {
    /// A service backed by the system clock and the operating system's random source.
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Like [`UuidService::new`], with explicit configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self::with_sources(Arc::new(SystemClock), Arc::new(OsRandom), config)
    }

    /// A service reading time from `clock` and entropy from `random`.
    pub fn with_sources(
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            clock,
            random,
            config,
            state: Mutex::new(GeneratorState::default()),
        }
    }

    /// Generates `request.count` UUIDs and renders them with the request's format flags.
    ///
    /// V5 output is a pure function of namespace and name, so every element of a V5 result is
    /// the same string.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidArgument`] if the request fails
    /// [`UuidRequest::validate`].
    pub fn generate(&self, request: &UuidRequest) -> UuidResult<Vec<String>> {
        let options = request.format_options();
        Ok(self
            .generate_values(request)?
            .iter()
            .map(|uuid| format::format(uuid, options))
            .collect())
    }

    /// [`UuidService::generate`] with `count` in place of the request's own count.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidArgument`] if `count` is out of range or the rest of the
    /// request is invalid.
    pub fn generate_multiple(
        &self,
        count: usize,
        request: &UuidRequest,
    ) -> UuidResult<Vec<String>> {
        self.generate(&request.clone().with_count(count))
    }

    /// Generates `request.count` UUID values without rendering them.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidArgument`] if the request fails
    /// [`UuidRequest::validate`].
    pub fn generate_values(&self, request: &UuidRequest) -> UuidResult<Vec<Uuid>> {
        let namespace = request.validate()?;
        let count = request.count;

        let uuids = match request.version {
            UuidVersion::V4 => (0..count).map(|_| self.new_v4()).collect(),
            UuidVersion::V5 => {
                let namespace = namespace.ok_or_else(|| {
                    UuidError::InvalidArgument("a namespace is required for v5 UUIDs".into())
                })?;
                let name = request.name.as_deref().unwrap_or_default();
                vec![Uuid::new_v5(&namespace, name.as_bytes()); count]
            }
            UuidVersion::V1 | UuidVersion::V6 => {
                let mut state = self.lock_state();
                (0..count)
                    .map(|_| {
                        let (ticks, clock_seq, node) = self.next_gregorian(&mut state);
                        if request.version == UuidVersion::V1 {
                            pack_v1(ticks, clock_seq, &node)
                        } else {
                            pack_v6(ticks, clock_seq, &node)
                        }
                    })
                    .collect()
            }
            UuidVersion::V7 => {
                let mut state = self.lock_state();
                (0..count)
                    .map(|_| {
                        let UnixState { millis, tail } = self.next_unix(&mut state);
                        pack_v7(millis, tail)
                    })
                    .collect()
            }
            UuidVersion::Nil => vec![Uuid::nil(); count],
            UuidVersion::Max => vec![Uuid::from_u128(u128::MAX); count],
        };

        tracing::debug!(version = %request.version, count, "generated UUIDs");

        Ok(uuids)
    }

    /// Returns true if `candidate` is a UUID in hyphenated or simple form.
    ///
    /// See [`format::validate`] for the exact grammar.
    pub fn validate(candidate: &str) -> bool {
        format::validate(candidate)
    }

    /// Renders `uuid` with `options`; see [`format::format`].
    pub fn format(uuid: &Uuid, options: FormatOptions) -> String {
        format::format(uuid, options)
    }

    fn lock_state(&self) -> MutexGuard<'_, GeneratorState> {
        // Every update leaves the state consistent, so a panic elsewhere cannot corrupt it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn new_v4(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.random.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }

    fn next_gregorian(&self, state: &mut GeneratorState) -> (u64, u16, [u8; 6]) {
        let wall = gregorian_ticks(self.clock.now());
        let gregorian = state
            .gregorian
            .get_or_insert_with(|| self.init_gregorian(wall));

        if wall < gregorian.last_wall_ticks {
            gregorian.clock_seq = gregorian.clock_seq.wrapping_add(1) & CLOCK_SEQ_MASK;
            tracing::warn!(
                clock_seq = gregorian.clock_seq,
                "clock moved backwards, incremented clock sequence"
            );
        }
        gregorian.last_wall_ticks = wall;

        let ticks = if wall > gregorian.last_ticks {
            wall
        } else if gregorian.last_ticks < MAX_TICKS {
            gregorian.last_ticks + 1
        } else {
            // The tick field is exhausted, so only a new clock sequence keeps values distinct.
            gregorian.clock_seq = gregorian.clock_seq.wrapping_add(1) & CLOCK_SEQ_MASK;
            MAX_TICKS
        };
        gregorian.last_ticks = ticks;

        (ticks, gregorian.clock_seq, gregorian.node)
    }

    fn init_gregorian(&self, wall: u64) -> GregorianState {
        let mut seq = [0u8; 2];
        self.random.fill_bytes(&mut seq);

        let node = match self.config.node_id() {
            Some(node) => node,
            None => {
                let mut node = [0u8; 6];
                self.random.fill_bytes(&mut node);
                // Multicast bit marks the node id as not being a real IEEE 802 address.
                node[0] |= 0x01;
                node
            }
        };

        GregorianState {
            clock_seq: u16::from_be_bytes(seq) & CLOCK_SEQ_MASK,
            node,
            last_wall_ticks: wall,
            last_ticks: 0,
        }
    }

    fn next_unix(&self, state: &mut GeneratorState) -> UnixState {
        let now = self.clock.now().timestamp_millis().clamp(0, MAX_MILLIS) as u64;

        let next = match state.unix {
            Some(last) if now <= last.millis && last.tail < MAX_TAIL => UnixState {
                millis: last.millis,
                tail: last.tail + 1,
            },
            Some(last) if now <= last.millis => UnixState {
                millis: (last.millis + 1).min(MAX_MILLIS as u64),
                tail: self.random_tail(),
            },
            _ => UnixState {
                millis: now,
                tail: self.random_tail(),
            },
        };
        state.unix = Some(next);

        next
    }

    /// Draws the 74 bits that follow the V7 version nibble.
    ///
    /// Of ten random bytes, the low 12 bits of the first two become `rand_a` and the low 62
    /// bits of the last eight become `rand_b`.
    fn random_tail(&self) -> u128 {
        let mut bytes = [0u8; 10];
        self.random.fill_bytes(&mut bytes);
        let value = bytes
            .iter()
            .fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
        (((value >> 64) & 0x0fff) << 62) | (value & RAND_B_MASK)
    }
}

/// 100 ns intervals since 1582-10-15T00:00:00Z, clamped to the 60-bit field.
fn gregorian_ticks(now: DateTime<Utc>) -> u64 {
    let unix_ticks = i128::from(now.timestamp()) * 10_000_000
        + i128::from(now.timestamp_subsec_nanos() / 100);
    let ticks = unix_ticks + i128::from(GREGORIAN_UNIX_OFFSET_TICKS);
    ticks.clamp(0, i128::from(MAX_TICKS)) as u64
}

fn clock_seq_and_node(clock_seq: u16, node: &[u8; 6]) -> [u8; 8] {
    let [seq_hi, seq_lo] = clock_seq.to_be_bytes();
    [
        (seq_hi & 0x3f) | 0x80,
        seq_lo,
        node[0],
        node[1],
        node[2],
        node[3],
        node[4],
        node[5],
    ]
}

fn pack_v1(ticks: u64, clock_seq: u16, node: &[u8; 6]) -> Uuid {
    let time_low = (ticks & 0xffff_ffff) as u32;
    let time_mid = ((ticks >> 32) & 0xffff) as u16;
    let time_hi = ((ticks >> 48) & 0x0fff) as u16 | (1 << 12);
    Uuid::from_fields(
        time_low,
        time_mid,
        time_hi,
        &clock_seq_and_node(clock_seq, node),
    )
}

fn pack_v6(ticks: u64, clock_seq: u16, node: &[u8; 6]) -> Uuid {
    let time_high = ((ticks >> 28) & 0xffff_ffff) as u32;
    let time_mid = ((ticks >> 12) & 0xffff) as u16;
    let time_low = (ticks & 0x0fff) as u16 | (6 << 12);
    Uuid::from_fields(
        time_high,
        time_mid,
        time_low,
        &clock_seq_and_node(clock_seq, node),
    )
}

fn pack_v7(millis: u64, tail: u128) -> Uuid {
    let rand_a = (tail >> 62) & 0x0fff;
    let rand_b = tail & RAND_B_MASK;
    Uuid::from_u128(
        (u128::from(millis) << 80) | (0x7 << 76) | (rand_a << 64) | (0b10 << 62) | rand_b,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{v1_ticks, v6_ticks, v7_millis};
    use crate::request::Namespace;
    use crate::source::fakes::{FixedClock, ScriptedRandom};
    use std::collections::HashSet;

    /// 2022-02-22T19:22:22Z, the instant used by the RFC 9562 test vectors.
    const VECTOR_MILLIS: i64 = 1_645_557_742_000;

    /// Clock sequence 0x33c8 followed by node 9f:6b:de:ce:d8:46.
    const VECTOR_GREGORIAN_RANDOM: [u8; 8] = [0x33, 0xc8, 0x9f, 0x6b, 0xde, 0xce, 0xd8, 0x46];

    /// `rand_a` 0xcc3 and `rand_b` 0x18c4dc0c0c07398f.
    const VECTOR_UNIX_RANDOM: [u8; 10] = [0x0c, 0xc3, 0x18, 0xc4, 0xdc, 0x0c, 0x0c, 0x07, 0x39, 0x8f];

    fn service_with(clock: Arc<FixedClock>, random: &[u8]) -> UuidService {
        UuidService::with_sources(
            clock,
            Arc::new(ScriptedRandom::new(random.to_vec())),
            GeneratorConfig::default(),
        )
    }

    fn frozen_service(random: &[u8]) -> UuidService {
        service_with(Arc::new(FixedClock::at_millis(VECTOR_MILLIS)), random)
    }

    fn assert_version_and_variant(s: &str, digit: char) {
        let chars: Vec<char> = s.chars().collect();
        assert_eq!(chars.len(), 36, "{s}");
        assert_eq!(chars[14], digit, "{s}");
        assert!(matches!(chars[19], '8' | '9' | 'a' | 'b'), "{s}");
        assert!(UuidService::validate(s), "{s}");
    }

    fn parse_all(strings: &[String]) -> Vec<Uuid> {
        strings.iter().map(|s| Uuid::parse_str(s).unwrap()).collect()
    }

    #[test]
    fn test_nil_and_max() {
        let service = UuidService::new();

        assert_eq!(
            service.generate(&UuidRequest::new(UuidVersion::Nil)).unwrap(),
            vec!["00000000-0000-0000-0000-000000000000"]
        );
        assert_eq!(
            service.generate(&UuidRequest::new(UuidVersion::Max)).unwrap(),
            vec!["ffffffff-ffff-ffff-ffff-ffffffffffff"]
        );
        assert_eq!(
            service
                .generate(&UuidRequest::new(UuidVersion::Max).with_uppercase(true).with_hyphens(false))
                .unwrap(),
            vec!["FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"]
        );
    }

    #[test]
    fn test_v4_is_random_and_well_formed() {
        let service = UuidService::new();
        let uuids = service
            .generate(&UuidRequest::new(UuidVersion::V4).with_count(100))
            .unwrap();

        assert_eq!(uuids.len(), 100);
        assert_eq!(uuids.iter().collect::<HashSet<_>>().len(), 100);
        for s in &uuids {
            assert_version_and_variant(s, '4');
        }
    }

    #[test]
    fn test_v4_packs_random_bytes() {
        let service = frozen_service(&[0xff]);
        let uuids = service.generate(&UuidRequest::new(UuidVersion::V4)).unwrap();

        assert_eq!(uuids, vec!["ffffffff-ffff-4fff-bfff-ffffffffffff"]);
    }

    #[test]
    fn test_v1_matches_rfc_vector() {
        let service = frozen_service(&VECTOR_GREGORIAN_RANDOM);
        let uuids = service.generate(&UuidRequest::new(UuidVersion::V1)).unwrap();

        assert_eq!(uuids, vec!["c232ab00-9414-11ec-b3c8-9f6bdeced846"]);
    }

    #[test]
    fn test_v6_matches_rfc_vector() {
        let service = frozen_service(&VECTOR_GREGORIAN_RANDOM);
        let uuids = service
            .generate(&UuidRequest::new(UuidVersion::V6).with_uppercase(true))
            .unwrap();

        assert_eq!(uuids, vec!["1EC9414C-232A-6B00-B3C8-9F6BDECED846"]);
    }

    #[test]
    fn test_v7_matches_rfc_vector() {
        let service = frozen_service(&VECTOR_UNIX_RANDOM);
        let uuids = service.generate(&UuidRequest::new(UuidVersion::V7)).unwrap();

        assert_eq!(uuids, vec!["017f22e2-79b0-7cc3-98c4-dc0c0c07398f"]);
    }

    #[test]
    fn test_v5_matches_rfc_vector() {
        let service = UuidService::new();
        let uuids = service
            .generate(&UuidRequest::v5(Namespace::Dns, "www.example.com"))
            .unwrap();

        assert_eq!(uuids, vec!["2ed6657d-e927-568b-95e1-2665a8aea6a2"]);
    }

    #[test]
    fn test_v5_is_deterministic() {
        let request = UuidRequest::v5(Namespace::Url, "example.com").with_count(3);

        let first = UuidService::new().generate(&request).unwrap();
        let second = UuidService::new().generate(&request).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|s| s == &first[0]));
        assert_version_and_variant(&first[0], '5');
    }

    #[test]
    fn test_v5_namespace_forms_agree() {
        let service = UuidService::new();
        let via_custom = service
            .generate(
                &UuidRequest::v5(Namespace::Custom, "example.com")
                    .with_custom_namespace("6ba7b811-9dad-11d1-80b4-00c04fd430c8"),
            )
            .unwrap();
        let via_literal = service
            .generate(&UuidRequest::v5(
                Namespace::Literal(Uuid::NAMESPACE_URL),
                "example.com",
            ))
            .unwrap();
        let via_url = service
            .generate(&UuidRequest::v5(Namespace::Url, "example.com"))
            .unwrap();

        assert_eq!(via_custom, via_url);
        assert_eq!(via_literal, via_url);
    }

    #[test]
    fn test_v5_depends_on_name_and_namespace() {
        let service = UuidService::new();
        let a = service.generate(&UuidRequest::v5(Namespace::Url, "a")).unwrap();
        let b = service.generate(&UuidRequest::v5(Namespace::Url, "b")).unwrap();
        let a_dns = service.generate(&UuidRequest::v5(Namespace::Dns, "a")).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, a_dns);
    }

    #[test]
    fn test_v1_ticks_strictly_increase_under_frozen_clock() {
        let service = frozen_service(&VECTOR_GREGORIAN_RANDOM);
        let uuids = parse_all(
            &service
                .generate(&UuidRequest::new(UuidVersion::V1).with_count(50))
                .unwrap(),
        );

        for pair in uuids.windows(2) {
            assert_eq!(v1_ticks(&pair[1]), v1_ticks(&pair[0]) + 1);
        }
    }

    #[test]
    fn test_v6_sorts_in_creation_order() {
        let service = frozen_service(&VECTOR_GREGORIAN_RANDOM);
        let uuids = service
            .generate(&UuidRequest::new(UuidVersion::V6).with_count(50))
            .unwrap();

        for pair in uuids.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
        let parsed = parse_all(&uuids);
        assert!(v6_ticks(&parsed[49]) > v6_ticks(&parsed[0]));
        assert_version_and_variant(&uuids[0], '6');
    }

    #[test]
    fn test_v1_v6_share_tick_sequence() {
        let service = frozen_service(&VECTOR_GREGORIAN_RANDOM);
        let v1 = parse_all(&service.generate(&UuidRequest::new(UuidVersion::V1)).unwrap());
        let v6 = parse_all(&service.generate(&UuidRequest::new(UuidVersion::V6)).unwrap());

        assert!(v6_ticks(&v6[0]) > v1_ticks(&v1[0]));
    }

    #[test]
    fn test_v1_clock_rollback_bumps_clock_sequence() {
        let clock = Arc::new(FixedClock::at_millis(VECTOR_MILLIS));
        let service = service_with(clock.clone(), &VECTOR_GREGORIAN_RANDOM);

        let before = parse_all(&service.generate(&UuidRequest::new(UuidVersion::V1)).unwrap());
        clock.set(DateTime::from_timestamp_millis(VECTOR_MILLIS - 60_000).unwrap());
        let after = parse_all(&service.generate(&UuidRequest::new(UuidVersion::V1)).unwrap());

        let seq = |uuid: &Uuid| {
            let d4 = uuid.as_fields().3;
            u16::from_be_bytes([d4[0] & 0x3f, d4[1]])
        };
        assert_eq!(seq(&before[0]), 0x33c8);
        assert_eq!(seq(&after[0]), 0x33c9);
        assert!(v1_ticks(&after[0]) > v1_ticks(&before[0]));
    }

    #[test]
    fn test_v1_random_node_sets_multicast_bit() {
        let service = frozen_service(&[0x00]);
        let uuids = service.generate(&UuidRequest::new(UuidVersion::V1)).unwrap();

        assert!(uuids[0].ends_with("-010000000000"), "{}", uuids[0]);
    }

    #[test]
    fn test_v1_uses_configured_node_id() {
        let node = [0x00, 0x1b, 0x63, 0x84, 0x45, 0xe6];
        let service = UuidService::with_sources(
            Arc::new(FixedClock::at_millis(VECTOR_MILLIS)),
            Arc::new(ScriptedRandom::new(vec![0x12, 0x34])),
            GeneratorConfig::new(Some(node)),
        );
        let uuids = service.generate(&UuidRequest::new(UuidVersion::V1)).unwrap();

        assert_eq!(uuids, vec!["c232ab00-9414-11ec-9234-001b638445e6"]);
    }

    #[test]
    fn test_v1_with_system_clock() {
        let service = UuidService::new();
        let uuids = service
            .generate(&UuidRequest::new(UuidVersion::V1).with_count(100))
            .unwrap();

        assert_eq!(uuids.iter().collect::<HashSet<_>>().len(), 100);
        for s in &uuids {
            assert_version_and_variant(s, '1');
        }
        let parsed = parse_all(&uuids);
        for pair in parsed.windows(2) {
            assert!(v1_ticks(&pair[1]) > v1_ticks(&pair[0]));
        }
    }

    #[test]
    fn test_v7_sorts_in_creation_order_under_frozen_clock() {
        let service = frozen_service(&VECTOR_UNIX_RANDOM);
        let uuids = service
            .generate(&UuidRequest::new(UuidVersion::V7).with_count(100))
            .unwrap();

        for pair in uuids.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
        assert_eq!(uuids[1], "017f22e2-79b0-7cc3-98c4-dc0c0c073990");
        for s in &uuids {
            assert_version_and_variant(s, '7');
        }
    }

    #[test]
    fn test_v7_tail_overflow_bumps_millisecond() {
        let service = frozen_service(&[0xff]);
        let uuids = parse_all(
            &service
                .generate(&UuidRequest::new(UuidVersion::V7).with_count(2))
                .unwrap(),
        );

        assert_eq!(v7_millis(&uuids[0]), VECTOR_MILLIS as u64);
        assert_eq!(v7_millis(&uuids[1]), VECTOR_MILLIS as u64 + 1);
        assert!(uuids[0] < uuids[1]);
    }

    #[test]
    fn test_v1_saturated_ticks_stay_unique() {
        let clock = Arc::new(FixedClock::at_millis(MAX_MILLIS + 1_000));
        let service = service_with(clock, &VECTOR_GREGORIAN_RANDOM);
        let uuids = service
            .generate(&UuidRequest::new(UuidVersion::V1).with_count(3))
            .unwrap();

        for uuid in parse_all(&uuids) {
            assert_eq!(v1_ticks(&uuid), MAX_TICKS);
        }
        assert_eq!(uuids.iter().collect::<HashSet<_>>().len(), 3);
    }

    #[test]
    fn test_v7_saturated_millis_do_not_wrap() {
        let mut script = vec![0xff; 10];
        script.extend_from_slice(&VECTOR_UNIX_RANDOM);
        let service = service_with(Arc::new(FixedClock::at_millis(MAX_MILLIS + 1_000)), &script);
        let uuids = parse_all(
            &service
                .generate(&UuidRequest::new(UuidVersion::V7).with_count(2))
                .unwrap(),
        );

        assert_eq!(v7_millis(&uuids[0]), MAX_MILLIS as u64);
        assert_eq!(v7_millis(&uuids[1]), MAX_MILLIS as u64);
        assert_ne!(uuids[0], uuids[1]);
    }

    #[test]
    fn test_v7_clock_rollback_keeps_order() {
        let clock = Arc::new(FixedClock::at_millis(VECTOR_MILLIS));
        let service = service_with(clock.clone(), &VECTOR_UNIX_RANDOM);

        let before = service.generate(&UuidRequest::new(UuidVersion::V7)).unwrap();
        clock.set(DateTime::from_timestamp_millis(VECTOR_MILLIS - 5_000).unwrap());
        let after = service.generate(&UuidRequest::new(UuidVersion::V7)).unwrap();

        assert!(before[0] < after[0]);
    }

    #[test]
    fn test_v7_with_system_clock() {
        let service = UuidService::new();
        let uuids = service
            .generate(&UuidRequest::new(UuidVersion::V7).with_count(100))
            .unwrap();

        let mut sorted = uuids.clone();
        sorted.sort();
        assert_eq!(sorted, uuids);
        assert_eq!(uuids.iter().collect::<HashSet<_>>().len(), 100);
    }

    #[test]
    fn test_format_flags_apply_to_every_version() {
        let service = UuidService::new();
        for version in [UuidVersion::V1, UuidVersion::V4, UuidVersion::V6, UuidVersion::V7] {
            let uuids = service
                .generate(
                    &UuidRequest::new(version)
                        .with_uppercase(true)
                        .with_hyphens(false),
                )
                .unwrap();

            assert_eq!(uuids[0].len(), 32);
            assert!(!uuids[0].contains('-'));
            assert_eq!(uuids[0], uuids[0].to_uppercase());
            assert!(UuidService::validate(&uuids[0]));
        }
    }

    #[test]
    fn test_count_bounds() {
        let service = UuidService::new();

        for count in [0, 101] {
            match service.generate(&UuidRequest::new(UuidVersion::V4).with_count(count)) {
                Err(UuidError::InvalidArgument(msg)) => assert!(msg.contains("count")),
                _ => panic!("Expected InvalidArgument error"),
            }
        }
        assert_eq!(
            service
                .generate(&UuidRequest::new(UuidVersion::V4).with_count(100))
                .unwrap()
                .len(),
            100
        );
    }

    #[test]
    fn test_v5_whitespace_name_is_hashed_as_given() {
        let uuids = UuidService::new()
            .generate(&UuidRequest::v5(Namespace::Url, " "))
            .unwrap();

        assert_eq!(
            uuids,
            vec![Uuid::new_v5(&Uuid::NAMESPACE_URL, b" ").hyphenated().to_string()]
        );
    }

    #[test]
    fn test_v5_empty_name_fails() {
        let result = UuidService::new().generate(&UuidRequest::v5(Namespace::Url, ""));

        assert!(matches!(result, Err(UuidError::InvalidArgument(_))));
    }

    #[test]
    fn test_v5_invalid_custom_namespace_fails() {
        let result = UuidService::new().generate(
            &UuidRequest::v5(Namespace::Custom, "example.com").with_custom_namespace("not-a-uuid"),
        );

        assert!(matches!(result, Err(UuidError::InvalidArgument(_))));
    }

    #[test]
    fn test_invalid_request_does_not_touch_state() {
        let service = frozen_service(&VECTOR_GREGORIAN_RANDOM);
        assert!(service
            .generate(&UuidRequest::new(UuidVersion::V1).with_count(0))
            .is_err());

        let uuids = service.generate(&UuidRequest::new(UuidVersion::V1)).unwrap();
        assert_eq!(uuids, vec!["c232ab00-9414-11ec-b3c8-9f6bdeced846"]);
    }

    #[test]
    fn test_generate_multiple_overrides_count() {
        let service = UuidService::new();
        let request = UuidRequest::new(UuidVersion::V4).with_count(1);

        assert_eq!(service.generate_multiple(7, &request).unwrap().len(), 7);
        assert!(service.generate_multiple(0, &request).is_err());
    }

    #[test]
    fn test_validate_generated_v4() {
        let service = UuidService::new();
        let uuid = service.generate(&UuidRequest::new(UuidVersion::V4)).unwrap();

        assert!(UuidService::validate(&uuid[0]));
        assert!(!UuidService::validate("not-a-uuid"));
        assert!(!UuidService::validate(""));
        assert!(UuidService::validate("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_shared_across_threads() {
        let service = Arc::new(UuidService::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    service
                        .generate(&UuidRequest::new(UuidVersion::V7).with_count(50))
                        .unwrap()
                })
            })
            .collect();

        let all: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(all.len(), 200);
    }

    #[test]
    fn test_gregorian_ticks_of_vector_instant() {
        let now = DateTime::from_timestamp_millis(VECTOR_MILLIS).unwrap();

        assert_eq!(gregorian_ticks(now), 0x01ec_9414_c232_ab00);
    }
}
