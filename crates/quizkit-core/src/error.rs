//! Quiz error types.
//!
//! One enum covers both user-facing conditions (nothing answered, input
//! that cannot be parsed) and integration errors (bad positions, malformed
//! questions). Front ends use [`QuizError::is_user_facing`] to decide
//! whether to show a retry prompt or abort.

use thiserror::Error;

use crate::model::QuestionKind;

/// Errors produced by the question bank and the session evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The answer was empty or absent when it was submitted.
    #[error("no answer given for {kind} question")]
    NoSelection { kind: QuestionKind },

    /// Input from a front end could not be turned into an answer.
    #[error("{0}")]
    InvalidInput(String),

    /// A position outside the bank was requested.
    #[error("position {position} is out of range for a bank of {size} questions")]
    OutOfRange { position: usize, size: usize },

    /// The input shape does not match the question type.
    #[error("expected a {expected} answer, got a {found} answer")]
    InputMismatch {
        expected: QuestionKind,
        found: QuestionKind,
    },

    /// A selected option index does not exist on the question.
    #[error("option {index} does not exist on question {question_id} ({options} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        options: usize,
    },

    /// A question record violates its own invariants.
    #[error("invalid question {id}: {reason}")]
    InvalidQuestion { id: String, reason: String },

    /// Two questions in one bank share an id.
    #[error("duplicate question id: {0}")]
    DuplicateId(String),

    /// A bank must contain at least one question.
    #[error("question bank is empty")]
    EmptyBank,

    /// The results view is active; only a restart accepts answers again.
    #[error("quiz is finished, restart to answer again")]
    SessionFinished,
}

impl QuizError {
    /// Returns `true` if the user can fix this by answering again.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            QuizError::NoSelection { .. } | QuizError::InvalidInput(_) | QuizError::SessionFinished
        )
    }

    /// The prompt shown when nothing was answered, if applicable.
    pub fn retry_prompt(&self) -> Option<&'static str> {
        match self {
            QuizError::NoSelection { kind } => Some(match kind {
                QuestionKind::Single => "Please select an option.",
                QuestionKind::Multiple => "Select at least one option.",
                QuestionKind::Fill => "Please type an answer.",
            }),
            _ => None,
        }
    }
}
