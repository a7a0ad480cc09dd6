//! Axum route handlers for the Interview API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::interview::gateway::{Gateway, GatewayStatus};
use crate::interview::models::{GenerationRequest, Generated, QuestionSet};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ConfigureGatewayRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: QuestionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<Generated<QuestionSet>> for QuestionsResponse {
    fn from(generated: Generated<QuestionSet>) -> Self {
        Self {
            questions: generated.data,
            warning: generated.warning,
        }
    }
}

impl From<Generated<String>> for AnswerResponse {
    fn from(generated: Generated<String>) -> Self {
        Self {
            answer: generated.data,
            warning: generated.warning,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/gateway
pub async fn handle_gateway_status(State(state): State<AppState>) -> Json<GatewayStatus> {
    Json(state.gateway().status())
}

/// PUT /api/v1/gateway
///
/// Rebuilds the gateway with a new credential and optional model override.
/// A blank or missing key leaves the gateway unconfigured.
pub async fn handle_configure_gateway(
    State(state): State<AppState>,
    Json(request): Json<ConfigureGatewayRequest>,
) -> Json<GatewayStatus> {
    let config = state
        .config
        .gateway_config()
        .with_credential(request.api_key)
        .with_model(request.model);

    let gateway = Gateway::initialize(&config);
    let status = gateway.status();
    state.replace_gateway(gateway);

    info!(
        "Gateway reconfigured: configured={}, model={}",
        status.configured, status.model
    );
    Json(status)
}

/// POST /api/v1/questions
///
/// On failure the error body also carries the error-marker `fallback` question set.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let generated = state
        .gateway()
        .generate_question_set(&request)
        .await
        .map_err(AppError::QuestionGeneration)?;

    Ok(Json(generated.into()))
}

/// POST /api/v1/answers
pub async fn handle_generate_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let generated = state.gateway().generate_answer(&request.question).await?;
    Ok(Json(generated.into()))
}
