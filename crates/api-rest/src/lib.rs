//! # API REST
//!
//! REST API implementation for idsmith.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for request/response bodies and `idsmith-uuid` for the actual work.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    ErrorRes, GenerateUuidsReq, GenerateUuidsRes, HealthRes, HealthService, InspectUuidRes,
    RequiredFieldsQuery, RequiredFieldsRes, UuidCandidateReq, ValidateUuidRes,
};
use idsmith_uuid::{UuidError, UuidRequest, UuidService};

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub uuid_service: Arc<UuidService>,
}

impl AppState {
    pub fn new(uuid_service: UuidService) -> Self {
        Self {
            uuid_service: Arc::new(uuid_service),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, generate_uuids, validate_uuid, required_fields, inspect_uuid),
    components(schemas(
        HealthRes,
        ErrorRes,
        GenerateUuidsReq,
        GenerateUuidsRes,
        UuidCandidateReq,
        ValidateUuidRes,
        RequiredFieldsRes,
        InspectUuidRes,
    ))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

fn bad_request(err: UuidError) -> ApiError {
    tracing::debug!("Rejected request: {}", err);
    (StatusCode::BAD_REQUEST, Json(err.into()))
}

/// Unwraps a JSON body, reporting malformed or mistyped fields as a 400 `ErrorRes`.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| bad_request(UuidError::InvalidArgument(rejection.body_text())))
}

/// Builds the REST router with Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/uuids", post(generate_uuids))
        .route("/uuids/validate", post(validate_uuid))
        .route("/uuids/required-fields", get(required_fields))
        .route("/uuids/inspect", post(inspect_uuid))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves [`router`] until the process stops.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("++ Serving idsmith REST on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/uuids",
    request_body = GenerateUuidsReq,
    responses(
        (status = 200, description = "Generated UUIDs", body = GenerateUuidsRes),
        (status = 400, description = "Invalid version, count or v5 inputs", body = ErrorRes)
    )
)]
/// Generate between 1 and 100 UUIDs of one version
///
/// The whole request is checked before anything is generated, so a bad request never
/// returns partial output. All v5 results in one response are identical.
async fn generate_uuids(
    State(state): State<AppState>,
    payload: Result<Json<GenerateUuidsReq>, JsonRejection>,
) -> Result<Json<GenerateUuidsRes>, ApiError> {
    let request = UuidRequest::try_from(json_body(payload)?).map_err(bad_request)?;
    let uuids = state
        .uuid_service
        .generate(&request)
        .map_err(bad_request)?;
    Ok(Json(GenerateUuidsRes { uuids }))
}

#[utoipa::path(
    post,
    path = "/uuids/validate",
    request_body = UuidCandidateReq,
    responses(
        (status = 200, description = "Whether the candidate is a well-formed UUID", body = ValidateUuidRes),
        (status = 400, description = "Body is not a candidate object", body = ErrorRes)
    )
)]
/// Check whether a string is a UUID
///
/// Accepts the hyphenated and 32-digit forms in any case, ignoring surrounding whitespace.
/// A malformed candidate is a `false` result, never an error.
async fn validate_uuid(
    payload: Result<Json<UuidCandidateReq>, JsonRejection>,
) -> Result<Json<ValidateUuidRes>, ApiError> {
    let req = json_body(payload)?;
    Ok(Json(ValidateUuidRes {
        valid: UuidService::validate(&req.candidate),
    }))
}

#[utoipa::path(
    get,
    path = "/uuids/required-fields",
    params(RequiredFieldsQuery),
    responses(
        (status = 200, description = "Inputs the version needs", body = RequiredFieldsRes),
        (status = 400, description = "Unknown version or namespace", body = ErrorRes)
    )
)]
/// Which optional inputs a generate request needs for a version and namespace
async fn required_fields(
    Query(query): Query<RequiredFieldsQuery>,
) -> Result<Json<RequiredFieldsRes>, ApiError> {
    let (version, namespace) = query.parse().map_err(bad_request)?;
    Ok(Json(
        idsmith_uuid::required_fields(version, namespace.as_ref()).into(),
    ))
}

#[utoipa::path(
    post,
    path = "/uuids/inspect",
    request_body = UuidCandidateReq,
    responses(
        (status = 200, description = "Decoded version, variant and timestamp", body = InspectUuidRes),
        (status = 400, description = "Candidate is not a UUID", body = ErrorRes)
    )
)]
/// Decode the version, variant and embedded timestamp of a UUID
async fn inspect_uuid(
    payload: Result<Json<UuidCandidateReq>, JsonRejection>,
) -> Result<Json<InspectUuidRes>, ApiError> {
    let req = json_body(payload)?;
    let info = idsmith_uuid::inspect(&req.candidate).map_err(bad_request)?;
    Ok(Json(info.into()))
}
