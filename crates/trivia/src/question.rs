use serde::{Deserialize, Deserializer, Serialize};

use triad_core::error::require_text;
use triad_core::{CategoryId, DomainError, DomainResult, QuestionId};

/// Allowed difficulty range (inclusive).
pub const DIFFICULTY_RANGE: core::ops::RangeInclusive<i32> = 1..=5;

/// A stored trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: CategoryId,
}

/// Body of `POST /questions`.
///
/// `difficulty` and `category` arrive as numbers or numeric strings depending
/// on the client form library, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub difficulty: i64,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub category: i64,
}

impl NewQuestion {
    /// Validate and normalize into the values that get stored.
    pub fn validate(self) -> DomainResult<ValidQuestion> {
        require_text("question", &self.question)?;
        require_text("answer", &self.answer)?;

        let difficulty = i32::try_from(self.difficulty)
            .ok()
            .filter(|d| DIFFICULTY_RANGE.contains(d))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "difficulty must be between {} and {}",
                    DIFFICULTY_RANGE.start(),
                    DIFFICULTY_RANGE.end()
                ))
            })?;

        if self.category < 1 {
            return Err(DomainError::validation("category must be a positive id"));
        }

        Ok(ValidQuestion {
            question: self.question.trim().to_string(),
            answer: self.answer.trim().to_string(),
            difficulty,
            category: CategoryId::new(self.category),
        })
    }
}

/// A question that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: CategoryId,
}

impl ValidQuestion {
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

fn int_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(v) => Ok(v),
        IntOrString::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got {s:?}"))),
    }
}
