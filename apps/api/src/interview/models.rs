use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix of the single `technical` entry in a failed question set.
pub const ERROR_MARKER: &str = "Error: ";

/// Input to a question-set generation: the resume text and an optional job description.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

impl GenerationRequest {
    /// The job description, if it has any non-whitespace content.
    pub fn job_description(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .filter(|jd| !jd.trim().is_empty())
    }
}

/// Interview questions grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionSet {
    pub technical: Vec<String>,
    pub behavioral: Vec<String>,
    pub project_specific: Vec<String>,
    pub scenario_based: Vec<String>,
}

impl QuestionSet {
    /// Decodes a model payload one category at a time.
    ///
    /// A missing or `null` category is empty. A category that is not a list of
    /// strings is discarded (left empty) and reported in the returned notes;
    /// the other categories are kept. Keys outside the four categories are ignored.
    pub fn from_object(mut object: Map<String, Value>) -> (Self, Vec<String>) {
        let mut discarded = Vec::new();
        let mut category = |key: &str| -> Vec<String> {
            match object.remove(key) {
                None | Some(Value::Null) => Vec::new(),
                Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                    discarded.push(format!("Discarded category '{key}': {e}"));
                    Vec::new()
                }),
            }
        };

        let set = Self {
            technical: category("technical"),
            behavioral: category("behavioral"),
            project_specific: category("project_specific"),
            scenario_based: category("scenario_based"),
        };
        (set, discarded)
    }

    /// The error-marker form of a failure: every category empty except
    /// `technical`, which holds one `"Error: <diagnostic>"` entry.
    pub fn failure(diagnostic: impl std::fmt::Display) -> Self {
        Self {
            technical: vec![format!("{ERROR_MARKER}{diagnostic}")],
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.technical.len()
            + self.behavioral.len()
            + self.project_specific.len()
            + self.scenario_based.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A successful generation, with the warning raised when the service stopped
/// atypically but still returned usable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
