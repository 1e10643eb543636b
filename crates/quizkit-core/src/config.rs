//! quizkit configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::traits::FeedbackOptions;

/// Top-level quizkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Bank used when no `--bank` is given.
    #[serde(default)]
    pub default_bank: Option<PathBuf>,
    /// Where finished reports are written. Nothing is written when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Report formats to write: json, html, markdown.
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    /// Show the explanation after each graded answer.
    #[serde(default = "default_true")]
    pub show_explanations: bool,
    /// Name the correct answer after an incorrect one.
    #[serde(default = "default_true")]
    pub reveal_correct_answer: bool,
}

fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for QuizkitConfig {
    fn default() -> Self {
        Self {
            default_bank: None,
            output_dir: None,
            formats: default_formats(),
            show_explanations: true,
            reveal_correct_answer: true,
        }
    }
}

impl QuizkitConfig {
    pub fn feedback_options(&self) -> FeedbackOptions {
        FeedbackOptions {
            show_explanations: self.show_explanations,
            reveal_correct_answer: self.reveal_correct_answer,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment variable overrides: `QUIZKIT_BANK`, `QUIZKIT_OUTPUT_DIR`.
pub fn load_config() -> Result<QuizkitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };

    // Apply env var overrides
    if let Ok(bank) = std::env::var("QUIZKIT_BANK") {
        config.default_bank = Some(PathBuf::from(bank));
    }
    if let Ok(dir) = std::env::var("QUIZKIT_OUTPUT_DIR") {
        config.output_dir = Some(PathBuf::from(dir));
    }

    config.default_bank = config.default_bank.as_deref().map(resolve_path);
    config.output_dir = config.output_dir.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}
