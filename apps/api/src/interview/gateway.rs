//! Interview Gateway: owns the Gemini configuration and turns resume text or a
//! single question into exactly one upstream call.
//!
//! Every failure comes back as a `GatewayError`; nothing here panics or retries.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::GatewayConfig;
use crate::interview::classify::{classify_response, Classified};
use crate::interview::models::{GenerationRequest, Generated, QuestionSet};
use crate::interview::prompts::{build_answer_prompt, build_question_prompt};
use crate::llm_client::{
    strip_json_fences, ContentGenerator, FinishReason, GeminiClient, LlmError, SafetyRating,
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gemini client not configured.")]
    NotConfigured,

    #[error("No {0} provided.")]
    EmptyInput(&'static str),

    #[error("Prompt blocked by safety settings (Reason: {reason}).")]
    PromptBlocked {
        reason: String,
        safety_ratings: Vec<SafetyRating>,
    },

    #[error("No candidates in API response.")]
    NoCandidates,

    #[error("API request finished: {reason}.{}", safety_hint(.safety_ratings))]
    AtypicalTermination {
        reason: FinishReason,
        safety_ratings: Vec<SafetyRating>,
    },

    #[error("Empty text content from API.")]
    EmptyContent,

    #[error("Malformed JSON from API: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("Gemini API Error: {0}")]
    Transport(#[from] LlmError),
}

fn safety_hint(ratings: &[SafetyRating]) -> &'static str {
    if ratings.is_empty() {
        ""
    } else {
        " Check safety ratings."
    }
}

impl GatewayError {
    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::NotConfigured => "NOT_CONFIGURED",
            GatewayError::EmptyInput(_) => "VALIDATION_ERROR",
            GatewayError::PromptBlocked { .. } => "PROMPT_BLOCKED",
            GatewayError::NoCandidates => "NO_CANDIDATES",
            GatewayError::AtypicalTermination { .. } => "ATYPICAL_TERMINATION",
            GatewayError::EmptyContent => "EMPTY_CONTENT",
            GatewayError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            GatewayError::Transport(e) if e.is_timeout() => "UPSTREAM_TIMEOUT",
            GatewayError::Transport(_) => "UPSTREAM_ERROR",
        }
    }
}

/// Public view of the gateway configuration. Never includes the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayStatus {
    pub configured: bool,
    pub model: String,
}

/// The single owned gateway. Replaced wholesale when the credential changes.
pub struct Gateway {
    generator: Option<Arc<dyn ContentGenerator>>,
    model: String,
}

impl Gateway {
    /// Builds a gateway from configuration.
    ///
    /// A missing credential or a client construction failure yields an
    /// unconfigured gateway; the cause is logged, never returned.
    pub fn initialize(config: &GatewayConfig) -> Self {
        let model = config.model_identifier.clone();

        let Some(credential) = config.credential.as_deref().filter(|c| !c.trim().is_empty())
        else {
            warn!("GEMINI_API_KEY not set; interview gateway is not configured");
            return Self::unconfigured(model);
        };

        match GeminiClient::new(
            credential.trim().to_string(),
            &model,
            &config.api_base,
            config.request_timeout,
        ) {
            Ok(client) => {
                info!("Gemini initialized with {}", client.model());
                let model = client.model().to_string();
                Self::with_generator(Arc::new(client), model)
            }
            Err(e) => {
                error!("Gemini initialization error: {e}");
                Self::unconfigured(model)
            }
        }
    }

    pub fn with_generator(generator: Arc<dyn ContentGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator: Some(generator),
            model: model.into(),
        }
    }

    pub fn unconfigured(model: impl Into<String>) -> Self {
        Self {
            generator: None,
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn status(&self) -> GatewayStatus {
        GatewayStatus {
            configured: self.is_configured(),
            model: self.model.clone(),
        }
    }

    /// Generates interview questions for a resume and optional job description.
    pub async fn generate_question_set(
        &self,
        request: &GenerationRequest,
    ) -> Result<Generated<QuestionSet>, GatewayError> {
        let generator = self.generator()?;
        if request.resume_text.trim().is_empty() {
            return Err(GatewayError::EmptyInput("resume text"));
        }

        let prompt = build_question_prompt(&request.resume_text, request.job_description());
        let Classified { text, warning } = complete(generator, &prompt).await?;

        let (questions, discarded) = parse_question_set(&text)?;
        if questions.is_empty() {
            warn!("Gemini returned a question payload with no usable questions");
        }
        info!(
            "Generated {} interview questions ({} technical, {} behavioral, {} project, {} scenario)",
            questions.len(),
            questions.technical.len(),
            questions.behavioral.len(),
            questions.project_specific.len(),
            questions.scenario_based.len()
        );

        Ok(Generated {
            data: questions,
            warning: join_warnings(warning, discarded),
        })
    }

    /// Generates a model answer for one interview question.
    pub async fn generate_answer(&self, question: &str) -> Result<Generated<String>, GatewayError> {
        let generator = self.generator()?;
        if question.trim().is_empty() {
            return Err(GatewayError::EmptyInput("question"));
        }

        let prompt = build_answer_prompt(question);
        let Classified { text, warning } = complete(generator, &prompt).await?;

        Ok(Generated {
            data: text.trim().to_string(),
            warning,
        })
    }

    fn generator(&self) -> Result<&dyn ContentGenerator, GatewayError> {
        self.generator
            .as_deref()
            .ok_or(GatewayError::NotConfigured)
    }
}

async fn complete(generator: &dyn ContentGenerator, prompt: &str) -> Result<Classified, GatewayError> {
    let response = generator.generate_content(prompt).await?;
    classify_response(&response)
}

/// Decodes the model's JSON payload, tolerating markdown code fences.
///
/// Only a payload that is not a JSON object fails; mistyped categories come
/// back as notes alongside the partial set.
fn parse_question_set(text: &str) -> Result<(QuestionSet, Vec<String>), GatewayError> {
    let object: Map<String, Value> =
        serde_json::from_str(strip_json_fences(text)).map_err(|e| {
            warn!("Malformed question payload from Gemini: {e}");
            GatewayError::MalformedPayload(e)
        })?;

    let (questions, discarded) = QuestionSet::from_object(object);
    for note in &discarded {
        warn!("{note}");
    }
    Ok((questions, discarded))
}

fn join_warnings(warning: Option<String>, notes: Vec<String>) -> Option<String> {
    let joined: Vec<String> = warning.into_iter().chain(notes).collect();
    (!joined.is_empty()).then(|| joined.join("\n"))
}
