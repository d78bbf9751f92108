use std::collections::HashSet;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{BankError, ValidationError};

/// Feedback strings shown after an answer is evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: String,
    pub incorrect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

/// A question bound to a playback second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    /// Trigger time in seconds. Matching happens on the floored value.
    pub trigger_time: f64,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    pub feedback: Feedback,
}

impl Checkpoint {
    /// The integer second this checkpoint triggers on.
    pub fn trigger_second(&self) -> u64 {
        self.trigger_time.max(0.0).floor() as u64
    }

    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.correct)
    }
}

/// Ordered list of checkpoint definitions, sorted by trigger time.
///
/// The bank is static for the lifetime of a playback session and must be
/// complete before the first time sample arrives. When two checkpoints
/// share a trigger second the earlier one in registry order wins; a
/// warning is logged once at construction and `validate` reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    checkpoints: Vec<Checkpoint>,
}

impl QuestionBank {
    pub fn new(mut checkpoints: Vec<Checkpoint>) -> Self {
        // Stable sort keeps registry order for equal trigger times.
        checkpoints.sort_by(|a, b| {
            a.trigger_time
                .partial_cmp(&b.trigger_time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut seen = HashSet::new();
        for cp in &checkpoints {
            if !seen.insert(cp.trigger_second()) {
                warn!(
                    "multiple checkpoints trigger at second {}; first in order wins",
                    cp.trigger_second()
                );
            }
        }

        Self { checkpoints }
    }

    /// The built-in demo bank (Big Buck Bunny checkpoints at 10/30/50 s).
    pub fn sample() -> Self {
        Self::new(vec![
            Checkpoint {
                id: "q1".into(),
                trigger_time: 10.0,
                prompt: "What type of animal is Big Buck Bunny?".into(),
                options: vec![
                    AnswerOption {
                        id: "q1-a".into(),
                        text: "A squirrel".into(),
                        correct: false,
                    },
                    AnswerOption {
                        id: "q1-b".into(),
                        text: "A rabbit".into(),
                        correct: true,
                    },
                    AnswerOption {
                        id: "q1-c".into(),
                        text: "A bird".into(),
                        correct: false,
                    },
                    AnswerOption {
                        id: "q1-d".into(),
                        text: "A butterfly".into(),
                        correct: false,
                    },
                ],
                feedback: Feedback {
                    correct: "Correct! Big Buck Bunny is a large rabbit.".into(),
                    incorrect: "Not quite. Look at the main character more closely.".into(),
                },
            },
            Checkpoint {
                id: "q2".into(),
                trigger_time: 30.0,
                prompt: "What is the setting of this scene?".into(),
                options: vec![
                    AnswerOption {
                        id: "q2-a".into(),
                        text: "A city".into(),
                        correct: false,
                    },
                    AnswerOption {
                        id: "q2-b".into(),
                        text: "A forest".into(),
                        correct: true,
                    },
                    AnswerOption {
                        id: "q2-c".into(),
                        text: "A desert".into(),
                        correct: false,
                    },
                    AnswerOption {
                        id: "q2-d".into(),
                        text: "An ocean".into(),
                        correct: false,
                    },
                ],
                feedback: Feedback {
                    correct: "Yes! The scene takes place in a forest.".into(),
                    incorrect: "Look at the trees and vegetation around the character.".into(),
                },
            },
            Checkpoint {
                id: "q3".into(),
                trigger_time: 50.0,
                prompt: "What activity is happening in this clip?".into(),
                options: vec![
                    AnswerOption {
                        id: "q3-a".into(),
                        text: "Flying".into(),
                        correct: false,
                    },
                    AnswerOption {
                        id: "q3-b".into(),
                        text: "Swimming".into(),
                        correct: false,
                    },
                    AnswerOption {
                        id: "q3-c".into(),
                        text: "Exploring nature".into(),
                        correct: true,
                    },
                    AnswerOption {
                        id: "q3-d".into(),
                        text: "Racing".into(),
                        correct: false,
                    },
                ],
                feedback: Feedback {
                    correct: "Excellent observation! The characters are exploring their natural environment.".into(),
                    incorrect: "Watch what the characters are doing in their surroundings.".into(),
                },
            },
        ])
    }

    /// Parse a bank from TOML authoring format.
    pub fn from_toml_str(content: &str) -> Result<Self, BankError> {
        #[derive(Deserialize)]
        struct BankFile {
            checkpoints: Vec<Checkpoint>,
        }
        let file: BankFile =
            toml::from_str(content).map_err(|e| BankError::ParseFailed(e.to_string()))?;
        Ok(Self::new(file.checkpoints))
    }

    /// Load a bank from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, BankError> {
        let content = std::fs::read_to_string(path).map_err(|source| BankError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Authoring checks. Returns every issue found; an empty list means
    /// the bank is well-formed.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut issues = Vec::new();
        let mut ids = HashSet::new();
        let mut seconds: Vec<(u64, &str)> = Vec::new();

        for cp in &self.checkpoints {
            if !ids.insert(cp.id.as_str()) {
                issues.push(ValidationError::DuplicateId { id: cp.id.clone() });
            }
            if cp.trigger_time < 0.0 {
                issues.push(ValidationError::NegativeTriggerTime {
                    checkpoint: cp.id.clone(),
                    time: cp.trigger_time,
                });
            }
            if cp.options.len() < 2 {
                issues.push(ValidationError::TooFewOptions {
                    checkpoint: cp.id.clone(),
                    count: cp.options.len(),
                });
            }
            let mut option_ids = HashSet::new();
            for opt in &cp.options {
                if !option_ids.insert(opt.id.as_str()) {
                    issues.push(ValidationError::DuplicateOptionId {
                        checkpoint: cp.id.clone(),
                        option: opt.id.clone(),
                    });
                }
            }
            let correct = cp.options.iter().filter(|o| o.correct).count();
            if correct == 0 {
                issues.push(ValidationError::NoCorrectOption {
                    checkpoint: cp.id.clone(),
                });
            } else if correct > 1 {
                issues.push(ValidationError::MultipleCorrectOptions {
                    checkpoint: cp.id.clone(),
                    count: correct,
                });
            }
            if let Some(&(second, first)) = seconds.iter().find(|(s, _)| *s == cp.trigger_second())
            {
                issues.push(ValidationError::DuplicateTriggerSecond {
                    first: first.to_string(),
                    second: cp.id.clone(),
                    trigger_second: second,
                });
            } else {
                seconds.push((cp.trigger_second(), cp.id.as_str()));
            }
        }

        issues
    }

    /// First checkpoint in registry order triggering at `second` whose id
    /// is not in `answered`.
    pub fn find_pending(
        &self,
        second: u64,
        answered: &HashSet<String>,
    ) -> Option<&Checkpoint> {
        self.checkpoints
            .iter()
            .find(|cp| cp.trigger_second() == second && !answered.contains(&cp.id))
    }

    pub fn get(&self, checkpoint_id: &str) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|cp| cp.id == checkpoint_id)
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
