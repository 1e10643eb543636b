//! TOML question bank parser.
//!
//! Loads question banks and answer sheets from TOML files and directories,
//! and lints banks for issues that are legal but probably mistakes.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::model::{AnswerKey, Question, QuestionKind, RawInput};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: TomlId,
    #[serde(rename = "type")]
    kind: String,
    prompt: String,
    #[serde(default)]
    options: Vec<String>,
    answer: TomlAnswer,
    #[serde(default)]
    explanation: Option<String>,
}

/// Question ids may be written as integers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlId {
    Int(i64),
    Str(String),
}

impl From<TomlId> for String {
    fn from(id: TomlId) -> Self {
        match id {
            TomlId::Int(n) => n.to_string(),
            TomlId::Str(s) => s,
        }
    }
}

/// An answer as written in a bank or answer sheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TomlAnswer {
    Index(usize),
    Indices(Vec<usize>),
    Text(String),
    Texts(Vec<String>),
}

impl TomlAnswer {
    fn is_empty_list(&self) -> bool {
        match self {
            TomlAnswer::Indices(v) => v.is_empty(),
            TomlAnswer::Texts(v) => v.is_empty(),
            _ => false,
        }
    }

    fn into_key(self, kind: QuestionKind, id: &str) -> Result<AnswerKey, QuizError> {
        match (kind, self) {
            (QuestionKind::Single, TomlAnswer::Index(i)) => Ok(AnswerKey::Single(i)),
            (QuestionKind::Multiple, TomlAnswer::Indices(v)) => {
                Ok(AnswerKey::Multiple(v.into_iter().collect()))
            }
            (QuestionKind::Multiple, TomlAnswer::Index(i)) => Ok(AnswerKey::Multiple([i].into())),
            (QuestionKind::Fill, TomlAnswer::Text(s)) => Ok(AnswerKey::Fill(vec![s])),
            (QuestionKind::Fill, TomlAnswer::Texts(v)) => Ok(AnswerKey::Fill(v)),
            (kind, answer) => Err(QuizError::InvalidQuestion {
                id: id.to_string(),
                reason: format!("answer {answer:?} does not fit a {kind} question"),
            }),
        }
    }

    /// Turn an answer-sheet entry into raw input for a question of `kind`.
    ///
    /// An empty string or list becomes empty input, which grades as
    /// "no selection".
    pub fn into_input(self, kind: QuestionKind) -> Result<RawInput, QuizError> {
        match (kind, self) {
            (QuestionKind::Single, TomlAnswer::Index(i)) => Ok(RawInput::Single(Some(i))),
            (QuestionKind::Multiple, TomlAnswer::Indices(v)) => Ok(RawInput::Multiple(v)),
            (QuestionKind::Multiple, TomlAnswer::Index(i)) => Ok(RawInput::Multiple(vec![i])),
            (QuestionKind::Fill, TomlAnswer::Text(s)) => Ok(RawInput::Fill(s)),
            // `[]` deserializes as an empty index list
            (kind, answer) if answer.is_empty_list() => Ok(match kind {
                QuestionKind::Single => RawInput::Single(None),
                QuestionKind::Multiple => RawInput::Multiple(vec![]),
                QuestionKind::Fill => RawInput::Fill(String::new()),
            }),
            (kind, answer) => Err(QuizError::InvalidInput(format!(
                "answer {answer:?} does not fit a {kind} question"
            ))),
        }
    }
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let id: String = q.id.into();
            let kind: QuestionKind = q
                .kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {id}: {e}"))?;
            let answer_key = q.answer.into_key(kind, &id)?;

            Ok(Question {
                id,
                prompt: q.prompt,
                options: q.options,
                answer_key,
                explanation: q.explanation,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let bank = QuestionBank::new(parsed.bank.id, parsed.bank.name, questions)
        .with_context(|| format!("invalid question bank: {}", source_path.display()))?
        .with_description(parsed.bank.description);

    Ok(bank)
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

#[derive(Debug, Deserialize)]
struct TomlAnswerSheet {
    #[serde(default)]
    answers: BTreeMap<String, TomlAnswer>,
}

/// Parse an answer sheet: an `[answers]` table from question id to answer.
pub fn parse_answers(path: &Path) -> Result<BTreeMap<String, TomlAnswer>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    parse_answers_str(&content, path)
}

pub fn parse_answers_str(
    content: &str,
    source_path: &Path,
) -> Result<BTreeMap<String, TomlAnswer>> {
    let parsed: TomlAnswerSheet = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    Ok(parsed.answers)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Lint a bank for issues that do not prevent loading.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |q: &Question, message: String| {
        warnings.push(ValidationWarning {
            question_id: Some(q.id.clone()),
            message,
        })
    };

    for q in bank {
        if q.prompt.trim().is_empty() {
            warn(q, "prompt is empty".into());
        }

        match q.kind() {
            QuestionKind::Fill => {
                if !q.options.is_empty() {
                    warn(q, "fill question has options, they will be ignored".into());
                }
            }
            QuestionKind::Single | QuestionKind::Multiple => {
                if q.options.len() < 2 {
                    warn(q, format!("{} question has fewer than two options", q.kind()));
                }
                let mut seen = HashSet::new();
                for option in &q.options {
                    if !seen.insert(option.trim().to_lowercase()) {
                        warn(q, format!("duplicate option label: {option}"));
                    }
                }
            }
        }

        if q.explanation.is_none() {
            warn(q, "no explanation provided".into());
        }
    }

    warnings
}

/// The five-question web basics bank used by `quizkit init` and the tests.
pub const SAMPLE_BANK_TOML: &str = r#"[bank]
id = "web-basics"
name = "Web Basics"
description = "A short quiz on browser languages, HTML and JavaScript"

[[questions]]
id = 1
type = "single"
prompt = "Which language runs in the browser?"
options = ["Python", "C++", "JavaScript", "Java"]
answer = 2
explanation = "JavaScript is the language supported natively by browsers."

[[questions]]
id = 2
type = "multiple"
prompt = "Select all HTML semantic tags below:"
options = ["<div>", "<section>", "<header>", "<span>", "<footer>"]
answer = [1, 2, 4]
explanation = "section, header and footer are semantic elements; div/span are generic."

[[questions]]
id = 3
type = "fill"
prompt = "Fill in the blank: The CSS property used to change text color is ____."
answer = ["color"]
explanation = "The 'color' property changes the text color in CSS."

[[questions]]
id = 4
type = "single"
prompt = "What does DOM stand for?"
options = ["Document Object Model", "Display Object Model", "Digital Output Model"]
answer = 0
explanation = "DOM stands for Document Object Model."

[[questions]]
id = 5
type = "multiple"
prompt = "Which of these are JavaScript data types?"
options = ["String", "Boolean", "Number", "Class", "Undefined"]
answer = [0, 1, 2, 4]
explanation = "String, Boolean, Number and Undefined are primitive types in JS."
"#;

/// Parse [`SAMPLE_BANK_TOML`].
pub fn sample_bank() -> Result<QuestionBank> {
    parse_bank_str(SAMPLE_BANK_TOML, Path::new("sample.toml"))
}
