//! The contract between the quiz core and a presentation layer.
//!
//! A front end implements [`QuizView`]; the controller calls it whenever
//! something needs to be shown.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::evaluator::QuizSession;
use crate::model::{AnswerRecord, Question, Verdict};
use crate::report::QuizReport;

// ---------------------------------------------------------------------------
// View trait
// ---------------------------------------------------------------------------

/// Something that can display a quiz.
pub trait QuizView {
    /// Show the current question, restoring any saved answer.
    fn render_question(&mut self, view: &QuestionView<'_>);

    /// Show the outcome of a submission or a retry prompt.
    fn show_feedback(&mut self, feedback: &Feedback);

    /// Show the final results.
    fn show_results(&mut self, report: &QuizReport);

    /// Show usage help. Views without help text ignore this.
    fn show_help(&mut self) {}
}

/// Everything a view needs to render the current question.
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    pub question: &'a Question,
    /// 1-based question number.
    pub number: usize,
    pub total: usize,
    pub saved: Option<&'a AnswerRecord>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// Share of the bank before this question, in `[0, 1)`.
    pub progress: f64,
}

impl<'a> QuestionView<'a> {
    pub fn from_session(session: &'a QuizSession) -> Self {
        Self {
            question: session.current(),
            number: session.position() + 1,
            total: session.bank().size(),
            saved: session.current_answer(),
            can_go_previous: session.can_go_previous(),
            can_go_next: session.can_go_next(),
            progress: session.progress(),
        }
    }

    /// Text of the saved answer, if any.
    pub fn saved_text(&self) -> Option<String> {
        self.saved.map(|r| self.question.answer_text(&r.value))
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// What kind of message a submission produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Correct,
    Incorrect,
    /// Nothing was graded; the user should answer again.
    Retry,
}

/// A message for the user after submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

/// Controls how much a verdict reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackOptions {
    pub show_explanations: bool,
    pub reveal_correct_answer: bool,
}

impl Default for FeedbackOptions {
    fn default() -> Self {
        Self {
            show_explanations: true,
            reveal_correct_answer: true,
        }
    }
}

impl Feedback {
    /// Feedback for a graded answer.
    ///
    /// An incorrect verdict names the correct answer unless the options
    /// say otherwise.
    pub fn for_verdict(question: &Question, verdict: &Verdict, options: FeedbackOptions) -> Self {
        let mut parts = Vec::new();
        let kind = if verdict.correct {
            parts.push("Correct!".to_string());
            FeedbackKind::Correct
        } else {
            parts.push("Incorrect.".to_string());
            if options.reveal_correct_answer {
                parts.push(format!("Correct answer: {}.", question.correct_answer_text()));
            }
            FeedbackKind::Incorrect
        };

        if options.show_explanations {
            if let Some(explanation) = verdict.explanation.as_deref() {
                parts.push(explanation.to_string());
            }
        }

        Self {
            kind,
            message: parts.join(" "),
        }
    }

    /// Feedback for a user-facing error.
    pub fn retry(error: &QuizError) -> Self {
        let message = match error.retry_prompt() {
            Some(prompt) => prompt.to_string(),
            None => error.to_string(),
        };
        Self {
            kind: FeedbackKind::Retry,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, QuestionKind, RawInput};
    use crate::parser::sample_bank;

    #[test]
    fn question_view_reflects_session() {
        let mut s = QuizSession::new(sample_bank().unwrap());
        s.grade(&RawInput::Single(Some(0))).unwrap();

        let view = QuestionView::from_session(&s);
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 5);
        assert!(!view.can_go_previous);
        assert!(view.can_go_next);
        assert_eq!(view.saved_text().as_deref(), Some("Python"));

        s.go_to(4).unwrap();
        let view = QuestionView::from_session(&s);
        assert!(view.can_go_previous);
        assert!(!view.can_go_next);
        assert!(view.saved.is_none());
        assert!((view.progress - 0.8).abs() < f64::EPSILON);

        s.navigate(Direction::Previous);
        assert_eq!(QuestionView::from_session(&s).number, 4);
    }

    #[test]
    fn feedback_for_correct_and_incorrect() {
        let mut s = QuizSession::new(sample_bank().unwrap());
        let right = s.grade(&RawInput::Single(Some(2))).unwrap();
        let fb = Feedback::for_verdict(s.current(), &right, FeedbackOptions::default());
        assert_eq!(fb.kind, FeedbackKind::Correct);
        assert_eq!(
            fb.message,
            "Correct! JavaScript is the language supported natively by browsers."
        );

        let wrong = s.grade(&RawInput::Single(Some(1))).unwrap();
        let fb = Feedback::for_verdict(s.current(), &wrong, FeedbackOptions::default());
        assert_eq!(fb.kind, FeedbackKind::Incorrect);
        assert!(fb.message.starts_with("Incorrect. Correct answer: JavaScript."));
    }

    #[test]
    fn feedback_respects_options() {
        let mut s = QuizSession::new(sample_bank().unwrap());
        let wrong = s.grade(&RawInput::Single(Some(1))).unwrap();
        let quiet = FeedbackOptions {
            show_explanations: false,
            reveal_correct_answer: false,
        };
        let fb = Feedback::for_verdict(s.current(), &wrong, quiet);
        assert_eq!(fb.message, "Incorrect.");
    }

    #[test]
    fn retry_feedback_uses_prompt() {
        let fb = Feedback::retry(&QuizError::NoSelection {
            kind: QuestionKind::Multiple,
        });
        assert_eq!(fb.kind, FeedbackKind::Retry);
        assert_eq!(fb.message, "Select at least one option.");

        let fb = Feedback::retry(&QuizError::InvalidInput("enter a number".into()));
        assert_eq!(fb.message, "enter a number");
    }
}
