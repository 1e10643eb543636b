//! The `quizkit init` command.

use anyhow::Result;

use quizkit_core::parser::SAMPLE_BANK_TOML;

pub fn execute() -> Result<()> {
    // Create quizkit.toml
    if std::path::Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    // Create sample bank
    std::fs::create_dir_all("banks")?;
    let sample_path = std::path::Path::new("banks/sample.toml");
    if sample_path.exists() {
        println!("banks/sample.toml already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_BANK_TOML)?;
        println!("Created banks/sample.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizkit validate --bank banks/sample.toml");
    println!("  2. Run: quizkit play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

default_bank = "banks/sample.toml"

# Finished quizzes are written here. Remove to disable.
output_dir = "./quizkit-results"
formats = ["json", "html"]

show_explanations = true
reveal_correct_answer = true
"#;
