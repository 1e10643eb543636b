//! Result report types with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator::QuizSession;
use crate::model::{QuestionKind, Score};

/// The results of one finished quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the bank.
    pub bank: BankSummary,
    /// Correct answers out of the bank size.
    pub score: Score,
    /// Score restricted to each question type present in the bank.
    pub per_kind: BTreeMap<QuestionKind, Score>,
    /// One entry per bank question, in bank order.
    pub details: Vec<QuestionDetail>,
}

/// Summary of a bank (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// One question paired with the user's latest answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDetail {
    /// 1-based position in the bank.
    pub number: usize,
    pub question_id: String,
    pub prompt: String,
    pub kind: QuestionKind,
    /// `None` when the question was never answered.
    pub your_answer: Option<String>,
    pub correct_answer: String,
    pub correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuestionDetail {
    /// The user's answer, or "No answer".
    pub fn your_answer_text(&self) -> &str {
        self.your_answer.as_deref().unwrap_or("No answer")
    }
}

impl QuizReport {
    /// Build a report from the session's current answers.
    pub fn from_session(session: &QuizSession) -> Self {
        let bank = session.bank();
        let mut per_kind: BTreeMap<QuestionKind, Score> = BTreeMap::new();

        let details: Vec<QuestionDetail> = bank
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let record = session.answer_for(&q.id);
                let correct = record.is_some_and(|r| r.correct);

                let entry = per_kind.entry(q.kind()).or_default();
                entry.total += 1;
                if correct {
                    entry.correct += 1;
                }

                QuestionDetail {
                    number: i + 1,
                    question_id: q.id.clone(),
                    prompt: q.prompt.clone(),
                    kind: q.kind(),
                    your_answer: record.map(|r| q.answer_text(&r.value)),
                    correct_answer: q.correct_answer_text(),
                    correct,
                    explanation: q.explanation.clone(),
                }
            })
            .collect();

        QuizReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary {
                id: bank.id().to_string(),
                name: bank.name().to_string(),
                question_count: bank.size(),
            },
            score: session.score(),
            per_kind,
            details,
        }
    }

    /// "You scored X out of N (P%)".
    pub fn summary_line(&self) -> String {
        format!("You scored {}", self.score)
    }

    /// Number of questions that were answered at all.
    pub fn answered(&self) -> usize {
        self.details.iter().filter(|d| d.your_answer.is_some()).count()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.bank.name));
        md.push_str(&format!("**{}**\n\n", self.summary_line()));

        md.push_str("| Type | Correct | Total |\n");
        md.push_str("|------|---------|-------|\n");
        for (kind, score) in &self.per_kind {
            md.push_str(&format!("| {} | {} | {} |\n", kind, score.correct, score.total));
        }
        md.push('\n');

        md.push_str("| # | Question | Your answer | Correct answer | Result |\n");
        md.push_str("|---|----------|-------------|----------------|--------|\n");
        for d in &self.details {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                d.number,
                escape_cell(&d.prompt),
                escape_cell(d.your_answer_text()),
                escape_cell(&d.correct_answer),
                if d.correct { "Correct" } else { "Incorrect" }
            ));
        }

        md
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
