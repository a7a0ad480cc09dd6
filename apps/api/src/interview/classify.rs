//! Response classification: turns a raw `generateContent` response into
//! usable text, usable text plus a warning, or a classified failure.
//!
//! Order of checks:
//! 1. prompt blocked (block reason present)
//! 2. no candidates
//! 3. first candidate stopped for a reason other than STOP:
//!    with text, warn and continue; without text, fail
//! 4. concatenated text empty after trimming, fail

use tracing::warn;

use crate::interview::gateway::GatewayError;
use crate::llm_client::{GenerateContentResponse, SafetyRating};

/// Text accepted from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub text: String,
    pub warning: Option<String>,
}

pub fn classify_response(response: &GenerateContentResponse) -> Result<Classified, GatewayError> {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            warn!(
                "Gemini blocked the prompt. Reason: {reason}.{}",
                format_safety_ratings(&feedback.safety_ratings)
            );
            return Err(GatewayError::PromptBlocked {
                reason: reason.clone(),
                safety_ratings: feedback.safety_ratings.clone(),
            });
        }
    }

    let candidate = response
        .candidates
        .first()
        .ok_or(GatewayError::NoCandidates)?;

    let finish_reason = candidate.finish_reason();
    let mut warning = None;

    if !finish_reason.is_stop() {
        if !candidate.has_text() {
            warn!(
                "Gemini request finished atypically with no content. Reason: {finish_reason}.{}",
                format_safety_ratings(&candidate.safety_ratings)
            );
            return Err(GatewayError::AtypicalTermination {
                reason: finish_reason,
                safety_ratings: candidate.safety_ratings.clone(),
            });
        }

        let message = format!(
            "Gemini request finished atypically. Reason: {finish_reason}.{}\nUsing partial content.",
            format_safety_ratings(&candidate.safety_ratings)
        );
        warn!("{message}");
        warning = Some(message);
    }

    let text = candidate.text();
    if text.trim().is_empty() {
        return Err(GatewayError::EmptyContent);
    }

    Ok(Classified { text, warning })
}

/// Renders ratings as an indented list under a "Safety Ratings:" heading,
/// or nothing when there are none.
pub fn format_safety_ratings(ratings: &[SafetyRating]) -> String {
    if ratings.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = ratings.iter().map(|r| format!("  - {r}")).collect();
    format!("\nSafety Ratings:\n{}", lines.join("\n"))
}
