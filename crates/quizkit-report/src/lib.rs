//! HTML result page generation for quiz reports.
//!
//! Renders a finished [`quizkit_core::QuizReport`] as a self-contained HTML
//! page. JSON and markdown output live on the report type itself.

pub mod html;

pub use html::{generate_html, write_html_report};
