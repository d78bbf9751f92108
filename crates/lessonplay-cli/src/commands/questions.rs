use std::path::PathBuf;

use clap::Subcommand;
use lessonplay_core::{Config, QuestionBank};

#[derive(Subcommand)]
pub enum QuestionsAction {
    /// List checkpoints in a bank
    List {
        /// Question bank TOML file (defaults to the configured bank)
        #[arg(long)]
        bank: Option<PathBuf>,
        /// Print the full bank as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a bank for authoring mistakes
    Validate {
        /// Question bank TOML file (defaults to the configured bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },
    /// Print the built-in sample bank
    Sample {
        /// Emit TOML authoring format instead of JSON
        #[arg(long)]
        toml: bool,
    },
}

pub fn run(action: QuestionsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuestionsAction::List { bank, json } => {
            let config = Config::load_or_default();
            let bank = super::load_bank(bank.as_deref(), &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&bank)?);
            } else {
                for cp in bank.checkpoints() {
                    println!(
                        "{:>4}s  {:<8} {} ({} options)",
                        cp.trigger_second(),
                        cp.id,
                        cp.prompt,
                        cp.options.len()
                    );
                }
            }
        }
        QuestionsAction::Validate { bank } => {
            let config = Config::load_or_default();
            let bank = super::load_bank(bank.as_deref(), &config)?;
            let issues = bank.validate();
            if issues.is_empty() {
                println!("ok: {} checkpoints", bank.len());
            } else {
                for issue in &issues {
                    eprintln!("{issue}");
                }
                std::process::exit(1);
            }
        }
        QuestionsAction::Sample { toml: as_toml } => {
            let bank = QuestionBank::sample();
            if as_toml {
                println!("{}", toml::to_string_pretty(&bank)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&bank)?);
            }
        }
    }
    Ok(())
}
