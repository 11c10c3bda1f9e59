//! Generation requests and the derivation of which inputs they require.
//!
//! A [`UuidRequest`] describes one call to [`crate::UuidService::generate`]. Only V5 requests
//! carry extra inputs (a name and a namespace), and only a custom namespace carries a third.
//! [`required_fields`] is the single place that decides this, and request validation is built
//! on top of it, so a front end that shows or hides inputs from the same function can never
//! disagree with what the service accepts.

use crate::constants::{DEFAULT_COUNT, MAX_COUNT, MIN_COUNT};
use crate::format::{self, FormatOptions};
use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// The UUID layouts the service can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum UuidVersion {
    /// Gregorian timestamp, clock sequence and node id.
    V1,
    /// Random.
    V4,
    /// SHA-1 of a namespace and a name.
    V5,
    /// V1 fields reordered so the text sorts by creation time.
    V6,
    /// Unix milliseconds followed by random bits.
    V7,
    /// All bits zero.
    Nil,
    /// All bits one.
    Max,
}

impl UuidVersion {
    /// Every version, in the order a picker would list them.
    pub const ALL: [UuidVersion; 7] = [
        UuidVersion::V1,
        UuidVersion::V4,
        UuidVersion::V5,
        UuidVersion::V6,
        UuidVersion::V7,
        UuidVersion::Nil,
        UuidVersion::Max,
    ];

    /// The value of the version nibble for this layout.
    ///
    /// Nil and Max have no real version; their nibble is simply `0` and `f`.
    pub fn digit(self) -> u8 {
        match self {
            UuidVersion::V1 => 1,
            UuidVersion::V4 => 4,
            UuidVersion::V5 => 5,
            UuidVersion::V6 => 6,
            UuidVersion::V7 => 7,
            UuidVersion::Nil => 0x0,
            UuidVersion::Max => 0xf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UuidVersion::V1 => "v1",
            UuidVersion::V4 => "v4",
            UuidVersion::V5 => "v5",
            UuidVersion::V6 => "v6",
            UuidVersion::V7 => "v7",
            UuidVersion::Nil => "nil",
            UuidVersion::Max => "max",
        }
    }
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UuidVersion {
    type Err = UuidError;

    /// Parses `v1`, `v4`, `v5`, `v6`, `v7`, `nil` or `max`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        UuidVersion::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                UuidError::InvalidArgument(format!(
                    "unknown UUID version '{}', expected one of v1, v4, v5, v6, v7, nil, max",
                    s
                ))
            })
    }
}

/// Namespace used to salt a V5 name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// The RFC 9562 URL namespace, `6ba7b811-9dad-11d1-80b4-00c04fd430c8`.
    Url,
    /// The RFC 9562 DNS namespace, `6ba7b810-9dad-11d1-80b4-00c04fd430c8`.
    Dns,
    /// Taken from [`UuidRequest::custom_namespace`].
    Custom,
    /// A namespace UUID supplied directly in place of a well-known name.
    Literal(Uuid),
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Url => f.write_str("url"),
            Namespace::Dns => f.write_str("dns"),
            Namespace::Custom => f.write_str("custom"),
            Namespace::Literal(uuid) => write!(f, "{}", uuid.hyphenated()),
        }
    }
}

impl FromStr for Namespace {
    type Err = UuidError;

    /// Parses `url`, `dns` or `custom` (any case), or a UUID accepted by [`format::validate`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("url") {
            return Ok(Namespace::Url);
        }
        if trimmed.eq_ignore_ascii_case("dns") {
            return Ok(Namespace::Dns);
        }
        if trimmed.eq_ignore_ascii_case("custom") {
            return Ok(Namespace::Custom);
        }
        format::parse(trimmed).map(Namespace::Literal).map_err(|_| {
            UuidError::InvalidArgument(format!(
                "namespace must be url, dns, custom or a UUID, got: '{}'",
                s
            ))
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Namespace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Namespace {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which optional inputs a request must carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequiredFields {
    pub name: bool,
    pub namespace: bool,
    pub custom_namespace: bool,
}

/// Derives the inputs a request for `version` must supply.
///
/// `namespace` only matters for V5: choosing [`Namespace::Custom`] additionally requires the
/// custom namespace string.
pub fn required_fields(version: UuidVersion, namespace: Option<&Namespace>) -> RequiredFields {
    match version {
        UuidVersion::V5 => RequiredFields {
            name: true,
            namespace: true,
            custom_namespace: matches!(namespace, Some(Namespace::Custom)),
        },
        _ => RequiredFields::default(),
    }
}

/// Input to a generation call.
///
/// Construct with [`UuidRequest::new`] and adjust with the `with_*` methods. Fields that the
/// chosen version does not need are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UuidRequest {
    pub version: UuidVersion,
    #[cfg_attr(feature = "serde", serde(default = "default_count"))]
    pub count: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub uppercase: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_hyphens"))]
    pub hyphens: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub namespace: Option<Namespace>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub custom_namespace: Option<String>,
}

#[cfg(feature = "serde")]
fn default_count() -> usize {
    DEFAULT_COUNT
}

#[cfg(feature = "serde")]
fn default_hyphens() -> bool {
    true
}

impl UuidRequest {
    /// A request for a single lowercase, hyphenated UUID of `version`.
    pub fn new(version: UuidVersion) -> Self {
        Self {
            version,
            count: DEFAULT_COUNT,
            uppercase: false,
            hyphens: true,
            name: None,
            namespace: None,
            custom_namespace: None,
        }
    }

    /// A V5 request for `name` under `namespace`.
    pub fn v5(namespace: Namespace, name: impl Into<String>) -> Self {
        Self::new(UuidVersion::V5)
            .with_namespace(namespace)
            .with_name(name)
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    pub fn with_hyphens(mut self, hyphens: bool) -> Self {
        self.hyphens = hyphens;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn with_custom_namespace(mut self, custom_namespace: impl Into<String>) -> Self {
        self.custom_namespace = Some(custom_namespace.into());
        self
    }

    /// The presentation flags of this request.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            uppercase: self.uppercase,
            hyphens: self.hyphens,
        }
    }

    /// Inputs this request must carry, see [`required_fields`].
    pub fn required_fields(&self) -> RequiredFields {
        required_fields(self.version, self.namespace.as_ref())
    }

    /// Checks the request and resolves the V5 namespace.
    ///
    /// Returns the namespace UUID for V5 requests and `None` for every other version.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidArgument`] if:
    /// - `count` is outside `MIN_COUNT..=MAX_COUNT`,
    /// - a required name is missing or empty,
    /// - a required namespace is missing, or
    /// - a required custom namespace is missing, empty or not a valid UUID.
    pub fn validate(&self) -> UuidResult<Option<Uuid>> {
        if !(MIN_COUNT..=MAX_COUNT).contains(&self.count) {
            return Err(UuidError::InvalidArgument(format!(
                "count must be between {} and {}, got: {}",
                MIN_COUNT, MAX_COUNT, self.count
            )));
        }

        let required = self.required_fields();

        if required.name && self.name.as_deref().map_or(true, str::is_empty) {
            return Err(UuidError::InvalidArgument(format!(
                "a name is required for {} UUIDs",
                self.version
            )));
        }

        if !required.namespace {
            return Ok(None);
        }

        let namespace = self.namespace.as_ref().ok_or_else(|| {
            UuidError::InvalidArgument(format!(
                "a namespace is required for {} UUIDs",
                self.version
            ))
        })?;

        let resolved = match namespace {
            Namespace::Url => Uuid::NAMESPACE_URL,
            Namespace::Dns => Uuid::NAMESPACE_DNS,
            Namespace::Literal(uuid) => *uuid,
            Namespace::Custom => {
                let custom = self
                    .custom_namespace
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .ok_or_else(|| {
                        UuidError::InvalidArgument(
                            "a custom namespace UUID is required when namespace is custom".into(),
                        )
                    })?;
                format::parse(custom).map_err(|_| {
                    UuidError::InvalidArgument(format!(
                        "custom namespace must be a valid UUID, got: '{}'",
                        custom
                    ))
                })?
            }
        };

        Ok(Some(resolved))
    }
}
