//! Checkpoint questions: the registry, trigger evaluation, and the
//! answer gate.

pub mod engine;
pub mod gate;
pub mod question;

pub use engine::TriggerEngine;
pub use gate::{AnswerGate, GateState, QuestionSession, ResumeTimer, RESUME_DELAY_MS};
pub use question::{AnswerOption, Checkpoint, Feedback, QuestionBank};
