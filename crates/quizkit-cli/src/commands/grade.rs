//! The `quizkit grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizkit_core::parser;
use quizkit_core::QuizSession;

use super::detail_table;

pub fn execute(bank_path: PathBuf, answers_path: PathBuf, format: String) -> Result<()> {
    let bank = parser::parse_bank(&bank_path)?;
    let answers = parser::parse_answers(&answers_path)?;

    for id in answers.keys() {
        anyhow::ensure!(
            bank.find_by_id(id).is_some(),
            "answer sheet refers to unknown question id: {id}"
        );
    }

    let mut session = QuizSession::new(bank);

    for (id, answer) in answers {
        let position = session
            .bank()
            .position_of(&id)
            .with_context(|| format!("unknown question id: {id}"))?;
        session.go_to(position)?;

        let kind = session.current().kind();
        let input = answer
            .into_input(kind)
            .with_context(|| format!("question {id}"))?;

        match session.grade(&input) {
            Ok(verdict) => {
                tracing::debug!(question_id = %id, correct = verdict.correct, "graded");
            }
            Err(e) if e.is_user_facing() => {
                tracing::warn!("question {id} left unanswered: {e}");
            }
            Err(e) => return Err(e).with_context(|| format!("question {id}")),
        }
    }

    let report = session.finish();

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => {
            println!("{}: {}", report.bank.name, report.summary_line());
            println!("{}", detail_table(&report));
        }
    }

    Ok(())
}
