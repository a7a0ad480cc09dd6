//! Wire types for the Gemini `generateContent` REST endpoint.
//!
//! Only the fields the gateway reads are modelled. Everything is optional or
//! defaulted on the response side because the service omits empty collections.

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestContent<'a> {
    pub role: &'a str,
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// A single-turn user request carrying one text part.
    pub fn single_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    /// Absent on some responses; treated as `FinishReason::Unspecified`.
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

impl Candidate {
    pub fn finish_reason(&self) -> FinishReason {
        self.finish_reason.clone().unwrap_or_default()
    }

    /// All text parts concatenated in the order the service returned them.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    pub fn has_text(&self) -> bool {
        self.content
            .iter()
            .flat_map(|c| c.parts.iter())
            .any(|p| p.text.as_deref().is_some_and(|t| !t.is_empty()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
}

impl fmt::Display for SafetyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.probability)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Finish reason
// ────────────────────────────────────────────────────────────────────────────

/// Why the service stopped generating a candidate.
///
/// The REST API sends enum names; the proto enumeration (0–5) is accepted too.
/// Names outside the known set are kept verbatim in `Unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawFinishReason")]
pub enum FinishReason {
    #[default]
    Unspecified,
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other,
    Unknown(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFinishReason {
    Name(String),
    Code(i64),
}

impl From<RawFinishReason> for FinishReason {
    fn from(raw: RawFinishReason) -> Self {
        match raw {
            RawFinishReason::Name(name) => FinishReason::from_name(&name),
            RawFinishReason::Code(code) => FinishReason::from_code(code),
        }
    }
}

impl FinishReason {
    pub fn from_name(name: &str) -> Self {
        match name {
            "FINISH_REASON_UNSPECIFIED" | "UNSPECIFIED" => FinishReason::Unspecified,
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            "RECITATION" => FinishReason::Recitation,
            "OTHER" => FinishReason::Other,
            other => FinishReason::Unknown(other.to_string()),
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            0 => FinishReason::Unspecified,
            1 => FinishReason::Stop,
            2 => FinishReason::MaxTokens,
            3 => FinishReason::Safety,
            4 => FinishReason::Recitation,
            5 => FinishReason::Other,
            other => FinishReason::Unknown(other.to_string()),
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, FinishReason::Stop)
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Unspecified => f.write_str("UNSPECIFIED"),
            FinishReason::Stop => f.write_str("STOP"),
            FinishReason::MaxTokens => f.write_str("MAX_TOKENS"),
            FinishReason::Safety => f.write_str("SAFETY"),
            FinishReason::Recitation => f.write_str("RECITATION"),
            FinishReason::Other => f.write_str("OTHER"),
            FinishReason::Unknown(raw) => write!(f, "UNKNOWN ({raw})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_single_user_part() {
        let request = GenerateContentRequest::single_prompt("hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}]
            })
        );
    }

    #[test]
    fn test_response_deserializes_full_payload() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "world"}]},
                "finishReason": "STOP",
                "safetyRatings": [
                    {"category": "HARM_CATEGORY_HARASSMENT", "probability": "NEGLIGIBLE"}
                ]
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 2, "totalTokenCount": 12}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates.len(), 1);
        let candidate = &response.candidates[0];
        assert_eq!(candidate.finish_reason(), FinishReason::Stop);
        assert_eq!(candidate.text(), "Hello world");
        assert_eq!(candidate.safety_ratings.len(), 1);
        assert!(response.prompt_feedback.is_none());
        assert_eq!(
            response.usage_metadata.and_then(|u| u.candidates_token_count),
            Some(2)
        );
    }

    #[test]
    fn test_blocked_prompt_has_no_candidates_field() {
        let json = r#"{
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [{"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "probability": "HIGH", "blocked": true}]
            }
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(response.candidates.is_empty());
        let feedback = response.prompt_feedback.unwrap();
        assert_eq!(feedback.block_reason.as_deref(), Some("SAFETY"));
        assert_eq!(
            feedback.safety_ratings[0].to_string(),
            "HARM_CATEGORY_DANGEROUS_CONTENT: HIGH"
        );
    }

    #[test]
    fn test_finish_reason_accepts_names_and_codes() {
        let by_name: FinishReason = serde_json::from_str(r#""MAX_TOKENS""#).unwrap();
        let by_code: FinishReason = serde_json::from_str("2").unwrap();
        assert_eq!(by_name, FinishReason::MaxTokens);
        assert_eq!(by_code, FinishReason::MaxTokens);

        let unspecified: FinishReason =
            serde_json::from_str(r#""FINISH_REASON_UNSPECIFIED""#).unwrap();
        assert_eq!(unspecified, FinishReason::Unspecified);
    }

    #[test]
    fn test_finish_reason_labels() {
        assert_eq!(FinishReason::Unspecified.to_string(), "UNSPECIFIED");
        assert_eq!(FinishReason::Stop.to_string(), "STOP");
        assert_eq!(FinishReason::MaxTokens.to_string(), "MAX_TOKENS");
        assert_eq!(FinishReason::Safety.to_string(), "SAFETY");
        assert_eq!(FinishReason::Recitation.to_string(), "RECITATION");
        assert_eq!(FinishReason::Other.to_string(), "OTHER");
        assert_eq!(
            FinishReason::from_name("BLOCKLIST").to_string(),
            "UNKNOWN (BLOCKLIST)"
        );
        assert_eq!(FinishReason::from_code(9).to_string(), "UNKNOWN (9)");
    }

    #[test]
    fn test_missing_finish_reason_defaults_to_unspecified() {
        let json = r#"{"content": {"parts": [{"text": "hi"}]}}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.finish_reason(), FinishReason::Unspecified);
        assert!(candidate.has_text());
    }

    #[test]
    fn test_parts_without_text_are_skipped() {
        let json = r#"{"content": {"parts": [{"text": "a"}, {}, {"text": "b"}]}, "finishReason": "STOP"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.text(), "ab");
    }

    #[test]
    fn test_candidate_without_content_has_no_text() {
        let json = r#"{"finishReason": "SAFETY"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert!(!candidate.has_text());
        assert_eq!(candidate.text(), "");
    }
}
