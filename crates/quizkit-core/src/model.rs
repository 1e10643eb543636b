//! Core data model types for quizkit.
//!
//! These are the types every other module passes around: questions and
//! their answer keys, the raw input a front end collects, the normalized
//! value that gets stored, and the verdict produced by grading.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// The closed set of question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Exactly one option is correct.
    Single,
    /// A set of options is correct; all of them and nothing else must be picked.
    Multiple,
    /// Free text compared against a list of accepted answers.
    Fill,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Single => write!(f, "single"),
            QuestionKind::Multiple => write!(f, "multiple"),
            QuestionKind::Fill => write!(f, "fill"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(QuestionKind::Single),
            "multiple" => Ok(QuestionKind::Multiple),
            "fill" => Ok(QuestionKind::Fill),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// The stored answer key, tagged by question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "answer", rename_all = "lowercase")]
pub enum AnswerKey {
    /// Zero-based index of the correct option.
    Single(usize),
    /// Zero-based indices of every correct option.
    Multiple(BTreeSet<usize>),
    /// Accepted answers, compared trimmed and case-insensitively.
    Fill(Vec<String>),
}

impl AnswerKey {
    pub fn kind(&self) -> QuestionKind {
        match self {
            AnswerKey::Single(_) => QuestionKind::Single,
            AnswerKey::Multiple(_) => QuestionKind::Multiple,
            AnswerKey::Fill(_) => QuestionKind::Fill,
        }
    }
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, independent of the question's position.
    pub id: String,
    /// Display text.
    pub prompt: String,
    /// Choice labels. Empty for fill-in-the-blank questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// What counts as a correct answer.
    pub answer_key: AnswerKey,
    /// Shown after the question is graded.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        self.answer_key.kind()
    }

    /// Label of the option at `index`, if it exists.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Check the answer key against the options.
    ///
    /// Choice keys must only reference existing options and a multiple-choice
    /// key must not be empty. A fill key needs at least one non-blank entry.
    pub fn validate(&self) -> Result<(), QuizError> {
        let invalid = |reason: String| QuizError::InvalidQuestion {
            id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("question id is empty".into()));
        }

        match &self.answer_key {
            AnswerKey::Single(index) => {
                if *index >= self.options.len() {
                    return Err(invalid(format!(
                        "answer index {index} is outside {} options",
                        self.options.len()
                    )));
                }
            }
            AnswerKey::Multiple(indices) => {
                if indices.is_empty() {
                    return Err(invalid("multiple-choice answer key is empty".into()));
                }
                if let Some(index) = indices.iter().find(|&&i| i >= self.options.len()) {
                    return Err(invalid(format!(
                        "answer index {index} is outside {} options",
                        self.options.len()
                    )));
                }
            }
            AnswerKey::Fill(accepted) => {
                if accepted.is_empty() {
                    return Err(invalid("fill answer key has no accepted answers".into()));
                }
                if accepted.iter().any(|a| a.trim().is_empty()) {
                    return Err(invalid("fill answer key contains a blank answer".into()));
                }
            }
        }

        Ok(())
    }

    /// Human-readable form of the correct answer.
    pub fn correct_answer_text(&self) -> String {
        match &self.answer_key {
            AnswerKey::Single(index) => self.option_label(*index),
            AnswerKey::Multiple(indices) => self.option_labels(indices.iter().copied()),
            AnswerKey::Fill(accepted) => accepted.join(" / "),
        }
    }

    /// Human-readable form of a stored answer value.
    pub fn answer_text(&self, value: &AnswerValue) -> String {
        match value {
            AnswerValue::Single(index) => self.option_label(*index),
            AnswerValue::Multiple(indices) => self.option_labels(indices.iter().copied()),
            AnswerValue::Fill(text) => text.clone(),
        }
    }

    fn option_label(&self, index: usize) -> String {
        self.option(index)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index + 1))
    }

    fn option_labels(&self, indices: impl Iterator<Item = usize>) -> String {
        indices
            .map(|i| self.option_label(i))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Input collected by a front end, before validation.
///
/// Absence is explicit: `Single(None)` means nothing was selected, so index
/// zero is always a real answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Single(Option<usize>),
    Multiple(Vec<usize>),
    Fill(String),
}

impl RawInput {
    pub fn kind(&self) -> QuestionKind {
        match self {
            RawInput::Single(_) => QuestionKind::Single,
            RawInput::Multiple(_) => QuestionKind::Multiple,
            RawInput::Fill(_) => QuestionKind::Fill,
        }
    }
}

/// A normalized answer as stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AnswerValue {
    Single(usize),
    /// Deduplicated and ordered.
    Multiple(BTreeSet<usize>),
    /// Trimmed, original case preserved.
    Fill(String),
}

impl AnswerValue {
    /// Whether `index` is part of this answer. Used to restore choice widgets.
    pub fn contains(&self, index: usize) -> bool {
        match self {
            AnswerValue::Single(selected) => *selected == index,
            AnswerValue::Multiple(selected) => selected.contains(&index),
            AnswerValue::Fill(_) => false,
        }
    }
}

/// The latest graded answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub value: AnswerValue,
    /// Cached at grading time.
    pub correct: bool,
}

/// Result of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub question_id: String,
    pub value: AnswerValue,
    pub correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    /// The results view is active. Only a restart leaves this state.
    Finished,
}

/// Correct answers out of the bank size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn new(correct: usize, total: usize) -> Self {
        Self { correct, total }
    }

    /// Fraction of questions answered correctly, `0.0` for an empty total.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    /// Whole-number percentage, rounded half up.
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} out of {} ({}%)",
            self.correct,
            self.total,
            self.percent()
        )
    }
}
