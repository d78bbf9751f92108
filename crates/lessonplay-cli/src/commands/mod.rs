pub mod config;
pub mod play;
pub mod questions;

use std::path::{Path, PathBuf};

use lessonplay_core::{Config, CoreError, QuestionBank};

/// Resolve the bank to use: explicit path, then the configured default,
/// then the built-in sample.
pub fn load_bank(path: Option<&Path>, config: &Config) -> Result<QuestionBank, CoreError> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| config.bank_path.as_ref().map(PathBuf::from));
    match path {
        Some(path) => Ok(QuestionBank::load(&path)?),
        None => Ok(QuestionBank::sample()),
    }
}
