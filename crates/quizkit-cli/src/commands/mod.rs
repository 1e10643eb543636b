//! Subcommand implementations and the output helpers they share.

pub mod grade;
pub mod init;
pub mod play;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::report::QuizReport;
use quizkit_report::write_html_report;

/// Expand a comma-separated format list; `all` means every format.
pub fn parse_formats(format: &str) -> Vec<String> {
    if format.trim() == "all" {
        return vec!["json".into(), "html".into(), "markdown".into()];
    }
    format
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Write the report to `output` in each requested format.
pub fn save_reports(report: &QuizReport, output: &Path, formats: &[String]) -> Result<()> {
    std::fs::create_dir_all(output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
    let stem = format!("{}-{timestamp}", report.bank.id);

    for fmt in formats {
        match fmt.as_str() {
            "json" => {
                let path = output.join(format!("{stem}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("{stem}.html"));
                write_html_report(report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("{stem}.md"));
                std::fs::write(&path, report.to_markdown())?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

/// Per-question result table.
pub fn detail_table(report: &QuizReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", "Result"]);

    for d in &report.details {
        table.add_row(vec![
            Cell::new(d.number),
            Cell::new(&d.prompt),
            Cell::new(d.your_answer_text()),
            Cell::new(&d.correct_answer),
            Cell::new(if d.correct { "Correct" } else { "Incorrect" }),
        ]);
    }

    table
}
