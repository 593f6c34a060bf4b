//! Quiz submission loading
//!
//! Accepts the result payload returned by the quiz engine, either an object
//! with an `answers` list (and optional `score`) or a bare list of answers.

use crate::analyzer::ScoreCalculator;
use crate::{answers_match, normalize_topic, AnswerRecord, Difficulty};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors raised while loading a submission file
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Failed to read submission {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid submission JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A submitted quiz: answered questions plus the score reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    /// Score reported with the submission, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub answers: Vec<AnswerRecord>,
}

impl QuizSubmission {
    pub fn new(answers: Vec<AnswerRecord>, score: Option<u8>) -> Self {
        Self {
            score: score.map(|s| s.min(100)),
            answers,
        }
    }

    /// Parse a submission document
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Read and parse a submission file
    pub fn load(path: &Path) -> Result<Self, SubmissionError> {
        let content = fs::read_to_string(path).map_err(|source| SubmissionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| SubmissionError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reported score, or the share of correct answers when none was reported
    pub fn overall_score(&self) -> u8 {
        self.score
            .unwrap_or_else(|| ScoreCalculator::from_records(&self.answers).value)
    }
}

impl<'de> Deserialize<'de> for QuizSubmission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => {
                let answers = answers_from(items).map_err(D::Error::custom)?;
                Ok(QuizSubmission::new(answers, None))
            }
            document @ Value::Object(_) => {
                let envelope: Envelope =
                    serde_json::from_value(document).map_err(D::Error::custom)?;
                let answers = answers_from(envelope.answers).map_err(D::Error::custom)?;
                Ok(QuizSubmission::new(answers, envelope.score))
            }
            other => Err(D::Error::custom(format!(
                "expected a list of answers or an object with an `answers` list, found {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Answers are decoded one by one so an error names the offending entry
fn answers_from(items: Vec<Value>) -> Result<Vec<AnswerRecord>, String> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| serde_json::from_value(item).map_err(|e| format!("answer {}: {}", i, e)))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(default, deserialize_with = "lenient_score")]
    score: Option<u8>,
    #[serde(alias = "results", alias = "questions")]
    answers: Vec<Value>,
}

/// Scores may arrive as floats (e.g. 66.67) or numeric strings; round and
/// clamp to 0-100
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let score = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let Some(score) = score.filter(|s| s.is_finite()) else {
        warn!(value = %value, "unreadable submission score, computing it from the answers");
        return Ok(None);
    };
    Ok(Some(score.clamp(0.0, 100.0).round() as u8))
}

/// Free text; numbers and booleans are kept as their JSON text
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            warn!(value = %other, "ignoring non-text answer field");
            None
        }
    })
}

/// Topic and difficulty labels must be strings
fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => {
            warn!(value = %other, "ignoring non-string label");
            None
        }
    })
}

fn lenient_options<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let options = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => {
                warn!(value = %other, "dropping non-text option");
                None
            }
        })
        .collect();
    Ok(Some(options))
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Null => None,
        other => {
            warn!(value = %other, "ignoring non-boolean isCorrect, deriving it from the answers");
            None
        }
    })
}

/// Wire shape of an answer before defaults are applied
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAnswer {
    #[serde(
        default,
        alias = "questionText",
        alias = "question_text",
        deserialize_with = "lenient_text"
    )]
    question: Option<String>,
    #[serde(default, deserialize_with = "lenient_options")]
    options: Option<Vec<String>>,
    #[serde(
        default,
        alias = "selected_answer",
        alias = "userAnswer",
        deserialize_with = "lenient_text"
    )]
    selected_answer: Option<String>,
    #[serde(default, alias = "correct_answer", deserialize_with = "lenient_text")]
    correct_answer: Option<String>,
    #[serde(default, alias = "is_correct", deserialize_with = "lenient_flag")]
    is_correct: Option<bool>,
    #[serde(default, deserialize_with = "lenient_text")]
    explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    topic: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    difficulty: Option<String>,
}

impl From<RawAnswer> for AnswerRecord {
    fn from(raw: RawAnswer) -> Self {
        let difficulty = match raw.difficulty.as_deref() {
            None => Difficulty::default(),
            Some(label) => Difficulty::parse(label).unwrap_or_else(|| {
                warn!(label, "unknown difficulty, defaulting to MEDIUM");
                Difficulty::default()
            }),
        };

        let correct_answer = raw.correct_answer.unwrap_or_default();
        let is_correct = raw.is_correct.unwrap_or_else(|| {
            raw.selected_answer
                .as_deref()
                .is_some_and(|selected| {
                    !correct_answer.trim().is_empty() && answers_match(selected, &correct_answer)
                })
        });

        AnswerRecord {
            question: raw.question.unwrap_or_default(),
            options: raw.options.unwrap_or_default(),
            selected_answer: raw.selected_answer,
            correct_answer,
            is_correct,
            explanation: raw.explanation.unwrap_or_default(),
            topic: normalize_topic(raw.topic),
            difficulty,
        }
    }
}
