//! HTML results page generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use quizkit_core::model::{QuestionKind, Score};
use quizkit_core::report::QuizReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML results page from a quiz report.
pub fn generate_html(report: &QuizReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizkit results: {}</title>\n",
        html_escape(&report.bank.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.bank.name)));
    html.push_str(&format!(
        "<p class=\"score\">{}</p>\n",
        html_escape(&report.summary_line())
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {} answered | {}</p>\n",
        report.bank.question_count,
        report.answered(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Per-type summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>By question type</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Type</th><th>Correct</th><th>Total</th><th>Score</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (kind, score) in &report.per_kind {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>\n",
            kind,
            score.correct,
            score.total,
            score.percent(),
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.per_kind.is_empty() {
        html.push_str(&generate_bar_chart(&report.per_kind));
    }

    html.push_str("</section>\n");

    // Per-question detail
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Questions</h2>\n");
    html.push_str(
        "<label><input type=\"checkbox\" id=\"only-incorrect\" onchange=\"filterIncorrect(this.checked)\"> Show only incorrect</label>\n",
    );
    html.push_str("<div id=\"details\">\n");

    for d in &report.details {
        let class = if d.correct { "correct" } else { "incorrect" };
        let your_answer = match &d.your_answer {
            Some(answer) => format!("<em>{}</em>", html_escape(answer)),
            None => "<span class=\"muted\">No answer</span>".to_string(),
        };

        html.push_str(&format!("<div class=\"result-item {class}\">\n"));
        html.push_str(&format!(
            "<strong>Q{}. {}</strong> <span class=\"kind\">{}</span>\n",
            d.number,
            html_escape(&d.prompt),
            d.kind.to_string().to_uppercase()
        ));
        html.push_str(&format!("<div>Your answer: {your_answer}</div>\n"));
        html.push_str(&format!(
            "<div>Correct: <em>{}</em></div>\n",
            html_escape(&d.correct_answer)
        ));
        if let Some(explanation) = &d.explanation {
            html.push_str(&format!(
                "<div class=\"explanation\">{}</div>\n",
                html_escape(explanation)
            ));
        }
        html.push_str(&format!(
            "<div class=\"verdict\">{}</div>\n",
            if d.correct { "Correct" } else { "Incorrect" }
        ));
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML results page to a file.
pub fn write_html_report(report: &QuizReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(per_kind: &BTreeMap<QuestionKind, Score>) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total_height = per_kind.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (kind, score)) in per_kind.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let fraction = score.fraction();
        let width = (fraction * max_width as f64) as usize;

        let color = if fraction >= 0.8 {
            "#22c55e"
        } else if fraction >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            kind
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score.percent()
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --muted: #6b7280; --success: #16a34a; --danger: #dc2626; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --muted: #9ca3af; --success: #4ade80; --danger: #f87171; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta, .muted, .kind { color: var(--muted); }
.score { font-size: 1.25rem; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.result-item { border: 1px solid var(--border); border-radius: 8px; padding: 0.75rem 1rem; margin: 0.75rem 0; }
.result-item div { margin-top: 6px; }
.correct .verdict { color: var(--success); }
.incorrect .verdict { color: var(--danger); }
.explanation { font-size: 0.9rem; color: var(--muted); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function filterIncorrect(only) {
  document.querySelectorAll('#details .result-item').forEach(item => {
    item.style.display = only && item.classList.contains('correct') ? 'none' : '';
  });
}
"#;
