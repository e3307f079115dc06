use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::models::NewClue;

pub const CLUE_MAX_CHARS: usize = 500;
pub const ANSWER_MAX_CHARS: usize = 100;

/// Body of `POST /clues`. Fields are optional here so that a missing field
/// is reported by name rather than as a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateClueRequest {
    #[serde(default)]
    pub clue: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
}

/// A field of the create payload that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: field required")]
    Missing { field: &'static str },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("{field}: must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::Empty { field }
            | ValidationError::TooLong { field, .. } => field,
        }
    }
}

impl CreateClueRequest {
    /// Check and normalize the payload. Surrounding whitespace is trimmed
    /// from every field; a blank definition counts as absent.
    pub fn validate(self) -> Result<NewClue, ValidationError> {
        let clue = required_text("clue", self.clue, CLUE_MAX_CHARS)?;
        let answer = required_text("answer", self.answer, ANSWER_MAX_CHARS)?;
        let definition = self
            .definition
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(NewClue {
            clue,
            answer,
            definition,
        })
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    let trimmed = value.trim();

    // Limits count characters, not bytes
    let actual = trimmed.chars().count();
    if actual == 0 {
        return Err(ValidationError::Empty { field });
    }
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(clue: &str, answer: &str) -> CreateClueRequest {
        CreateClueRequest {
            clue: Some(clue.to_string()),
            answer: Some(answer.to_string()),
            definition: None,
        }
    }

    #[test]
    fn accepts_and_trims_valid_payload() {
        let mut req = request("  Capital of France (5) ", "PARIS\n");
        req.definition = Some(" Capital ".to_string());

        let new_clue = req.validate().unwrap();
        assert_eq!(new_clue.clue, "Capital of France (5)");
        assert_eq!(new_clue.answer, "PARIS");
        assert_eq!(new_clue.definition.as_deref(), Some("Capital"));
    }

    #[test]
    fn blank_definition_becomes_none() {
        let mut req = request("Clue", "ANSWER");
        req.definition = Some("   ".to_string());
        assert_eq!(req.validate().unwrap().definition, None);
    }

    #[test]
    fn rejects_missing_fields() {
        let req = CreateClueRequest {
            clue: None,
            answer: Some("X".to_string()),
            definition: None,
        };
        assert_eq!(req.validate().unwrap_err(), ValidationError::Missing { field: "clue" });

        let req = CreateClueRequest {
            clue: Some("X".to_string()),
            ..Default::default()
        };
        assert_eq!(req.validate().unwrap_err().field(), "answer");
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert_eq!(
            request("", "ANSWER").validate().unwrap_err(),
            ValidationError::Empty { field: "clue" }
        );
        assert_eq!(
            request("Clue", "   ").validate().unwrap_err(),
            ValidationError::Empty { field: "answer" }
        );
    }

    #[test]
    fn enforces_length_limits_at_the_boundary() {
        assert!(request(&"c".repeat(500), &"a".repeat(100)).validate().is_ok());

        let err = request(&"c".repeat(501), "A").validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "clue",
                max: 500,
                actual: 501
            }
        );

        let err = request("Clue", &"a".repeat(101)).validate().unwrap_err();
        assert_eq!(err.field(), "answer");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 100 two-byte characters is within the answer limit
        assert!(request("Accented", &"é".repeat(100)).validate().is_ok());
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = request("Clue", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "answer: must not be empty");
    }
}
