//! Task requirements driving model selection.

use serde::{Deserialize, Serialize};

use crate::types::Complexity;
use crate::{AugurError, Result};

/// Expected length of the generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLength {
    Short,
    Medium,
    Long,
}

/// Required output quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Draft,
    Standard,
    Premium,
}

/// How soon the caller needs an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// What a generation task needs from its backing model.
///
/// Every field except `context` is required. Callers holding untrusted
/// JSON should go through [`TaskRequirements::from_json`], which reports a
/// missing or ill-typed field as [`AugurError::Validation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequirements {
    /// Task identifier such as `"question_answering"` or `"code_generation"`.
    pub task_type: String,
    pub complexity: Complexity,
    pub output_length: OutputLength,
    /// Language of the output, e.g. `"hebrew"`.
    pub language: String,
    pub quality: Quality,
    pub urgency: Urgency,
    /// Free text describing the task; its keywords feed specialty matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl TaskRequirements {
    /// Parse and validate requirements from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let requirements: Self = serde_json::from_str(json)
            .map_err(|e| AugurError::validation(format!("invalid task requirements: {e}")))?;
        requirements.validate()?;
        Ok(requirements)
    }

    /// Reject requirements whose free-text fields are blank.
    pub fn validate(&self) -> Result<()> {
        if self.task_type.trim().is_empty() {
            return Err(AugurError::validation("taskType must not be empty"));
        }
        if self.language.trim().is_empty() {
            return Err(AugurError::validation("language must not be empty"));
        }
        Ok(())
    }

    /// Set the optional free-text context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "taskType": "question_answering",
        "complexity": "simple",
        "outputLength": "short",
        "language": "hebrew",
        "quality": "draft",
        "urgency": "high"
    }"#;

    #[test]
    fn parses_valid_json() {
        let req = TaskRequirements::from_json(VALID).unwrap();
        assert_eq!(req.task_type, "question_answering");
        assert_eq!(req.urgency, Urgency::High);
        assert!(req.context.is_none());
    }

    #[test]
    fn missing_field_is_validation_error() {
        let json = r#"{"taskType": "summarization", "complexity": "simple"}"#;
        let err = TaskRequirements::from_json(json).unwrap_err();
        assert!(matches!(err, AugurError::Validation(_)));
        assert!(err.to_string().contains("invalid task requirements"));
    }

    #[test]
    fn unknown_enum_value_is_validation_error() {
        let json = VALID.replace("\"draft\"", "\"excellent\"");
        assert!(matches!(
            TaskRequirements::from_json(&json),
            Err(AugurError::Validation(_))
        ));
    }

    #[test]
    fn blank_language_rejected() {
        let json = VALID.replace("\"hebrew\"", "\"  \"");
        let err = TaskRequirements::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("language"));
    }
}
