use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::interview::gateway::GatewayError;
use crate::interview::models::QuestionSet;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A failed question-set generation; the response also carries the
    /// error-marker question set for clients that render categories directly.
    #[error(transparent)]
    QuestionGeneration(GatewayError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn gateway_status(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        GatewayError::EmptyInput(_) => StatusCode::BAD_REQUEST,
        GatewayError::PromptBlocked { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        GatewayError::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        GatewayError::NoCandidates
        | GatewayError::AtypicalTermination { .. }
        | GatewayError::EmptyContent
        | GatewayError::MalformedPayload(_)
        | GatewayError::Transport(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    e.to_string(),
                )
            }
            AppError::Gateway(e) | AppError::QuestionGeneration(e) => {
                tracing::error!("Gateway error [{}]: {e}", e.code());
                (gateway_status(e), e.code(), e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });

        if let AppError::QuestionGeneration(e) = &self {
            body["fallback"] = json!(QuestionSet::failure(e));
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use std::time::Duration;

    #[test]
    fn test_gateway_status_mapping() {
        assert_eq!(
            gateway_status(&GatewayError::NotConfigured),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            gateway_status(&GatewayError::EmptyInput("question")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            gateway_status(&GatewayError::NoCandidates),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            gateway_status(&GatewayError::Transport(LlmError::Timeout(
                Duration::from_secs(1)
            ))),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_question_generation_error_status() {
        let response = AppError::QuestionGeneration(GatewayError::EmptyContent).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
