//! The `quizkit play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizkit_core::config::load_config_from;
use quizkit_core::model::QuestionKind;
use quizkit_core::parser;
use quizkit_core::traits::{Feedback, FeedbackKind, QuestionView, QuizView};
use quizkit_core::{Flow, QuizController, QuizReport, QuizSession};

use super::{detail_table, parse_formats, save_reports};

const PROGRESS_WIDTH: usize = 20;

/// Console view: prints questions, feedback and results to stdout.
struct TerminalView;

impl QuizView for TerminalView {
    fn render_question(&mut self, view: &QuestionView<'_>) {
        let q = view.question;
        let filled = (view.progress * PROGRESS_WIDTH as f64).round() as usize;
        println!();
        println!(
            "[{}{}] {}/{}",
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH - filled),
            view.number,
            view.total
        );
        println!("Q{}. {}", view.number, q.prompt);
        println!("Type: {}", q.kind().to_string().to_uppercase());

        match q.kind() {
            QuestionKind::Single | QuestionKind::Multiple => {
                for (i, option) in q.options.iter().enumerate() {
                    let marker = match view.saved {
                        Some(saved) if saved.value.contains(i) => "*",
                        _ => " ",
                    };
                    println!(" {marker} {}) {option}", i + 1);
                }
                if q.kind() == QuestionKind::Multiple {
                    println!("Enter option numbers separated by commas.");
                } else {
                    println!("Enter an option number.");
                }
            }
            QuestionKind::Fill => println!("Type your answer."),
        }

        if let Some(saved) = view.saved_text() {
            println!("Saved answer: {saved}");
        }

        let mut nav = Vec::new();
        if view.can_go_previous {
            nav.push(":prev");
        }
        if view.can_go_next {
            nav.push(":next");
        }
        nav.push(":results");
        println!("({})", nav.join("  "));
        let _ = io::stdout().flush();
    }

    fn show_feedback(&mut self, feedback: &Feedback) {
        let prefix = match feedback.kind {
            FeedbackKind::Correct => "+",
            FeedbackKind::Incorrect => "x",
            FeedbackKind::Retry => "!",
        };
        println!("{prefix} {}", feedback.message);
    }

    fn show_results(&mut self, report: &QuizReport) {
        println!();
        println!("{}", report.summary_line());
        println!("{}", detail_table(report));
        println!("Type :restart to try again or :quit to exit.");
    }

    fn show_help(&mut self) {
        println!("Commands:");
        println!("  :next, :n       next question");
        println!("  :prev, :p       previous question");
        println!("  :results, :r    finish and show results");
        println!("  :restart        start over");
        println!("  :quit, :q       exit");
        println!("Anything else is submitted as your answer.");
        println!("Start an answer with :: to submit text beginning with a colon.");
    }
}

pub fn execute(
    bank_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let bank_path = bank_path
        .or_else(|| config.default_bank.clone())
        .context("no question bank given, pass --bank or set default_bank in quizkit.toml")?;
    let bank = parser::parse_bank(&bank_path)?;
    tracing::debug!(bank = bank.id(), questions = bank.size(), "loaded bank");

    println!("{} ({} questions). Type :help for commands.", bank.name(), bank.size());

    let mut controller = QuizController::new(QuizSession::new(bank), TerminalView)
        .with_options(config.feedback_options());
    controller.start();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        if controller.handle_line(&line)? == Flow::Quit {
            break;
        }
    }

    let output = output.or_else(|| config.output_dir.clone());
    if let (Some(report), Some(dir)) = (controller.report(), output) {
        let formats = match &format {
            Some(f) => parse_formats(f),
            None => config.formats.clone(),
        };
        save_reports(report, &dir, &formats)?;
    }

    Ok(())
}
