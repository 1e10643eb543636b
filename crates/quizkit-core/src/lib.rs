//! Question bank, grading rules, and session state.
//!
//! This crate holds everything a quiz front end needs that is not
//! presentation: the data model, the answer-key comparison rules, the
//! per-attempt session, the controller that drives a view, and the result
//! report.

pub mod bank;
pub mod config;
pub mod controller;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod report;
pub mod traits;

pub use bank::QuestionBank;
pub use controller::{Command, Flow, QuizController};
pub use error::QuizError;
pub use evaluator::{grade, QuizSession};
pub use report::QuizReport;
pub use traits::{Feedback, FeedbackKind, QuestionView, QuizView};
