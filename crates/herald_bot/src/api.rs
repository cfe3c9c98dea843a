//! HTTP API: the on-demand trigger plus health and metrics.

use crate::{Pipeline, PipelineMetrics, PostOutcome, Trigger};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use herald_core::GeneratedPost;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Body returned for any non-POST request to `/`.
pub const LIVENESS_MESSAGE: &str =
    "Herald is running. POST {\"pillar\": \"...\", \"postType\": \"...\"} to publish a post.";

/// API state shared by every handler.
#[derive(Clone)]
pub struct ApiState {
    pipeline: Arc<Pipeline>,
    metrics: PipelineMetrics,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(pipeline: Arc<Pipeline>, metrics: PipelineMetrics) -> Self {
        Self { pipeline, metrics }
    }
}

/// On-demand trigger input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    /// Pillar name, matched against the configured list
    pub pillar: String,
    /// One of the supported post types
    pub post_type: String,
}

/// On-demand trigger output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    /// Whether the post was published
    pub success: bool,
    /// Generated post, on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<GeneratedPost>,
    /// Raw platform acknowledgment, on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reddit_result: Option<serde_json::Value>,
    /// Failure description, including any remote body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TriggerResponse {
    /// Successful response for a published post.
    pub fn published(outcome: PostOutcome) -> Self {
        Self {
            success: true,
            post: Some(outcome.post),
            reddit_result: Some(outcome.submission.raw),
            error: None,
        }
    }

    /// Failed response carrying `message`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Creates the API router.
///
/// - `POST /` runs the on-demand trigger
/// - any other method on `/` returns [`LIVENESS_MESSAGE`]
/// - `GET /health` and `GET /metrics` report status
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", post(trigger_post).fallback(liveness))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

/// Run the on-demand pipeline for the requested pillar and post type.
async fn trigger_post(State(state): State<ApiState>, body: Bytes) -> impl IntoResponse {
    state.metrics.record_execution(Trigger::OnDemand);

    let request: TriggerRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected malformed trigger body");
            state.metrics.record_rejection(Trigger::OnDemand);
            return (
                StatusCode::BAD_REQUEST,
                Json(TriggerResponse::failed(format!("Invalid request body: {}", e))),
            );
        }
    };

    match state
        .pipeline
        .run_on_demand(&request.pillar, &request.post_type)
        .await
    {
        Ok(outcome) => {
            info!(
                pillar = %outcome.pillar,
                post_type = %outcome.post_type,
                "On-demand post published"
            );
            state.metrics.record_success(Trigger::OnDemand);
            (StatusCode::OK, Json(TriggerResponse::published(outcome)))
        }
        Err(e) if e.is_client_error() => {
            state.metrics.record_rejection(Trigger::OnDemand);
            (StatusCode::BAD_REQUEST, Json(TriggerResponse::failed(e.message())))
        }
        Err(e) => {
            error!(error = ?e, "On-demand run failed");
            state.metrics.record_failure(Trigger::OnDemand);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TriggerResponse::failed(e.message())),
            )
        }
    }
}

/// Liveness text for non-POST requests to `/`.
async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, LIVENESS_MESSAGE)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Get current metrics snapshot.
async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.snapshot()))
}
