//! HTTP request handlers for the Router service.
//!
//! One JSON endpoint per pipeline operation plus a health check.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use eqip_domain::{Attribution, OwnershipArrangement};
use eqip_pipeline::{
    AttributionRequest, OwnershipRequest, Pipeline, PipelineError, PipelineOutcome,
    PipelineRunRequest, QualitativeRequest,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pipeline serving every request
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// State around a pipeline
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Pipeline rejected or failed the request
    Pipeline(PipelineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Pipeline(e) if e.is_validation() => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::Pipeline(e) if e.is_configuration() => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Pipeline(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        warn!("Request failed with {}: {}", status, message);
        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

/// POST /v1/agents/attribution/run - Attribution from events and votes
async fn run_attribution(
    State(state): State<AppState>,
    Json(request): Json<AttributionRequest>,
) -> Result<Json<Attribution>, AppError> {
    Ok(Json(state.pipeline.compute_attribution(&request)?))
}

/// POST /v1/agents/attribution/qualitative - Attribution from descriptions
async fn run_qualitative_attribution(
    State(state): State<AppState>,
    Json(request): Json<QualitativeRequest>,
) -> Result<Json<Attribution>, AppError> {
    Ok(Json(state.pipeline.compute_qualitative_attribution(&request)?))
}

/// POST /v1/agents/allocation/finalize - Ownership arrangement
async fn finalize_ownership(
    State(state): State<AppState>,
    Json(request): Json<OwnershipRequest>,
) -> Result<Json<OwnershipArrangement>, AppError> {
    Ok(Json(state.pipeline.finalize_ownership(&request)?))
}

/// POST /v1/pipeline/run - Whole chain in one call
async fn run_pipeline(
    State(state): State<AppState>,
    Json(request): Json<PipelineRunRequest>,
) -> Result<Json<PipelineOutcome>, AppError> {
    Ok(Json(state.pipeline.run(&request)?))
}

/// GET /v1/health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/v1/health", get(health_check))
        .route("/v1/agents/attribution/run", post(run_attribution))
        .route("/v1/agents/attribution/qualitative", post(run_qualitative_attribution))
        .route("/v1/agents/allocation/finalize", post(finalize_ownership))
        .route("/v1/pipeline/run", post(run_pipeline))
        .with_state(state)
}
