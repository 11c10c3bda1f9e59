//! Request and response bodies of the HTTP API.
//!
//! These types carry plain strings for enumerated inputs so that a bad value surfaces as an
//! `InvalidArgument` message from the UUID crate rather than a generic JSON decoding failure.

use chrono::{DateTime, Utc};
use idsmith_uuid::{
    constants::{DEFAULT_COUNT, MAX_COUNT, MIN_COUNT},
    Namespace, RequiredFields, UuidError, UuidInfo, UuidRequest,
    UuidResult, UuidVersion, Variant,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl From<UuidError> for ErrorRes {
    fn from(err: UuidError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Body of `POST /uuids`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerateUuidsReq {
    /// One of `v1`, `v4`, `v5`, `v6`, `v7`, `nil`, `max`
    #[schema(example = "v4")]
    pub version: String,
    #[serde(default = "default_count")]
    /// Signed so that a negative count is reported as out of range
    #[schema(example = 1, minimum = 1, maximum = 100)]
    pub count: i64,
    #[serde(default)]
    pub uppercase: bool,
    #[serde(default = "default_hyphens")]
    pub hyphens: bool,
    /// Required for v5
    #[serde(default)]
    pub name: Option<String>,
    /// `url`, `dns`, `custom` or a namespace UUID; required for v5
    #[serde(default)]
    pub namespace: Option<String>,
    /// Required when `namespace` is `custom`
    #[serde(default)]
    pub custom_namespace: Option<String>,
}

fn default_count() -> i64 {
    DEFAULT_COUNT as i64
}

fn default_hyphens() -> bool {
    true
}

impl TryFrom<GenerateUuidsReq> for UuidRequest {
    type Error = UuidError;

    fn try_from(req: GenerateUuidsReq) -> UuidResult<Self> {
        let namespace = req
            .namespace
            .as_deref()
            .map(str::parse::<Namespace>)
            .transpose()?;
        let count = usize::try_from(req.count).map_err(|_| {
            UuidError::InvalidArgument(format!(
                "count must be between {} and {}, got: {}",
                MIN_COUNT, MAX_COUNT, req.count
            ))
        })?;

        Ok(UuidRequest {
            version: req.version.parse::<UuidVersion>()?,
            count,
            uppercase: req.uppercase,
            hyphens: req.hyphens,
            name: req.name,
            namespace,
            custom_namespace: req.custom_namespace,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerateUuidsRes {
    pub uuids: Vec<String>,
}

/// Body of `POST /uuids/validate` and `POST /uuids/inspect`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UuidCandidateReq {
    #[schema(example = "6ba7b810-9dad-11d1-80b4-00c04fd430c8")]
    pub candidate: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidateUuidRes {
    pub valid: bool,
}

/// Query of `GET /uuids/required-fields`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequiredFieldsQuery {
    /// One of `v1`, `v4`, `v5`, `v6`, `v7`, `nil`, `max`
    pub version: String,
    /// `url`, `dns`, `custom` or a namespace UUID
    pub namespace: Option<String>,
}

impl RequiredFieldsQuery {
    /// Parses the query into the arguments of [`idsmith_uuid::required_fields`].
    pub fn parse(&self) -> UuidResult<(UuidVersion, Option<Namespace>)> {
        let version = self.version.parse::<UuidVersion>()?;
        let namespace = self
            .namespace
            .as_deref()
            .filter(|ns| !ns.trim().is_empty())
            .map(str::parse::<Namespace>)
            .transpose()?;
        Ok((version, namespace))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequiredFieldsRes {
    pub name: bool,
    pub namespace: bool,
    pub custom_namespace: bool,
}

impl From<RequiredFields> for RequiredFieldsRes {
    fn from(fields: RequiredFields) -> Self {
        Self {
            name: fields.name,
            namespace: fields.namespace,
            custom_namespace: fields.custom_namespace,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InspectUuidRes {
    /// The version nibble
    pub version: u8,
    /// `ncs`, `rfc`, `microsoft` or `future`
    pub variant: String,
    /// Creation time for v1, v6 and v7
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<UuidInfo> for InspectUuidRes {
    fn from(info: UuidInfo) -> Self {
        let variant = match info.variant {
            Variant::Ncs => "ncs",
            Variant::Rfc => "rfc",
            Variant::Microsoft => "microsoft",
            Variant::Future => "future",
        };
        Self {
            version: info.version,
            variant: variant.into(),
            timestamp: info.timestamp,
        }
    }
}
