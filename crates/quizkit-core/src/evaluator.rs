//! Answer grading and per-attempt session state.
//!
//! [`grade`] is the pure comparison step. [`QuizSession`] owns the bank, the
//! current position and the latest answer per question, and is the only
//! place session state changes.

use std::collections::{BTreeSet, HashMap};

use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::model::{
    AnswerKey, AnswerRecord, AnswerValue, Direction, Question, RawInput, Score, SessionStatus,
    Verdict,
};
use crate::report::QuizReport;

/// Normalize `input` and compare it against the question's answer key.
///
/// - single: the selected index must equal the key.
/// - multiple: the selection, deduplicated, must equal the key set.
/// - fill: the trimmed, lowercased text must equal any trimmed, lowercased
///   accepted answer.
///
/// Empty input yields [`QuizError::NoSelection`].
pub fn grade(question: &Question, input: &RawInput) -> Result<Verdict, QuizError> {
    let (value, correct) = match (&question.answer_key, input) {
        (AnswerKey::Single(key), RawInput::Single(selected)) => {
            let index = selected.ok_or(QuizError::NoSelection {
                kind: question.kind(),
            })?;
            check_option(question, index)?;
            (AnswerValue::Single(index), index == *key)
        }
        (AnswerKey::Multiple(key), RawInput::Multiple(selected)) => {
            if selected.is_empty() {
                return Err(QuizError::NoSelection {
                    kind: question.kind(),
                });
            }
            let selected: BTreeSet<usize> = selected.iter().copied().collect();
            for &index in &selected {
                check_option(question, index)?;
            }
            let correct = selected == *key;
            (AnswerValue::Multiple(selected), correct)
        }
        (AnswerKey::Fill(accepted), RawInput::Fill(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(QuizError::NoSelection {
                    kind: question.kind(),
                });
            }
            let folded = text.to_lowercase();
            let correct = accepted.iter().any(|a| a.trim().to_lowercase() == folded);
            (AnswerValue::Fill(text.to_string()), correct)
        }
        (key, input) => {
            return Err(QuizError::InputMismatch {
                expected: key.kind(),
                found: input.kind(),
            })
        }
    };

    Ok(Verdict {
        question_id: question.id.clone(),
        value,
        correct,
        explanation: question.explanation.clone(),
    })
}

fn check_option(question: &Question, index: usize) -> Result<(), QuizError> {
    if index < question.options.len() {
        Ok(())
    } else {
        Err(QuizError::OptionOutOfRange {
            question_id: question.id.clone(),
            index,
            options: question.options.len(),
        })
    }
}

/// State for one quiz attempt.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    position: usize,
    answers: HashMap<String, AnswerRecord>,
    status: SessionStatus,
}

impl QuizSession {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            position: 0,
            answers: HashMap::new(),
            status: SessionStatus::InProgress,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    /// The question at the current position.
    pub fn current(&self) -> &Question {
        // position is kept inside [0, size) and banks are never empty
        &self.bank.questions()[self.position]
    }

    /// The saved answer for a question, used to restore input widgets.
    pub fn answer_for(&self, question_id: &str) -> Option<&AnswerRecord> {
        self.answers.get(question_id)
    }

    pub fn current_answer(&self) -> Option<&AnswerRecord> {
        self.answer_for(&self.current().id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.position > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.position + 1 < self.bank.size()
    }

    /// Share of the bank before the current question, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        self.position as f64 / self.bank.size() as f64
    }

    /// Grade `input` against the current question and store the result,
    /// replacing any earlier answer to the same question.
    ///
    /// On error nothing is stored.
    pub fn grade(&mut self, input: &RawInput) -> Result<Verdict, QuizError> {
        if self.is_finished() {
            return Err(QuizError::SessionFinished);
        }

        let verdict = grade(self.current(), input)?;
        tracing::debug!(
            question_id = %verdict.question_id,
            correct = verdict.correct,
            "graded answer"
        );

        let replaced = self.answers.insert(
            verdict.question_id.clone(),
            AnswerRecord {
                value: verdict.value.clone(),
                correct: verdict.correct,
            },
        );
        if replaced.is_some() {
            tracing::debug!(question_id = %verdict.question_id, "replaced earlier answer");
        }

        Ok(verdict)
    }

    /// Move one question back or forward, clamped to the bank.
    ///
    /// Returns the new position. Saved answers are untouched. Ignored while
    /// the results view is active.
    pub fn navigate(&mut self, direction: Direction) -> usize {
        if self.is_finished() {
            return self.position;
        }

        match direction {
            Direction::Previous if self.can_go_previous() => self.position -= 1,
            Direction::Next if self.can_go_next() => self.position += 1,
            _ => {}
        }
        tracing::debug!(position = self.position, ?direction, "navigated");
        self.position
    }

    /// Jump straight to `position`.
    pub fn go_to(&mut self, position: usize) -> Result<usize, QuizError> {
        if self.is_finished() {
            return Err(QuizError::SessionFinished);
        }
        self.bank.get(position)?;
        self.position = position;
        Ok(self.position)
    }

    /// Correct answers out of the bank size. Unanswered questions count
    /// against the score.
    pub fn score(&self) -> Score {
        let correct = self.answers.values().filter(|a| a.correct).count();
        Score::new(correct, self.bank.size())
    }

    /// Enter the results view and build the final report.
    ///
    /// Calling this again rebuilds the report from the same answers.
    pub fn finish(&mut self) -> QuizReport {
        self.status = SessionStatus::Finished;
        let report = QuizReport::from_session(self);
        tracing::info!(
            bank = self.bank.id(),
            correct = report.score.correct,
            total = report.score.total,
            "quiz finished"
        );
        report
    }

    /// Back to the first question with no answers.
    pub fn restart(&mut self) {
        self.position = 0;
        self.answers.clear();
        self.status = SessionStatus::InProgress;
        tracing::info!(bank = self.bank.id(), "quiz restarted");
    }
}
