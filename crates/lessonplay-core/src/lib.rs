//! # Lessonplay Core Library
//!
//! Core business logic for Lessonplay, an interactive video player that
//! pauses at predefined checkpoints to ask multiple-choice questions and
//! resumes only after a correct answer. All operations are available
//! through this library; front-ends (the bundled CLI, or a GUI shell)
//! are thin layers over the same types.
//!
//! ## Architecture
//!
//! - **Play Session**: a single-threaded state machine that requires the
//!   caller to advance the player clock and periodically invoke `tick()`
//! - **Checkpoint**: the question registry, trigger evaluation, and the
//!   answer gate with its timed auto-resume
//! - **Playback**: the player surface capability, second-boundary
//!   coarsening of time samples, and the zoom effect window
//! - **Storage**: TOML-based configuration and question bank files
//!
//! ## Key Components
//!
//! - [`PlaySession`]: session coordinator driven by ticks and intents
//! - [`QuestionBank`]: ordered checkpoint definitions
//! - [`AnswerGate`]: selection/submission/feedback/retry state machine
//! - [`PlayerSurface`]: capability trait over the media player

pub mod checkpoint;
pub mod error;
pub mod events;
pub mod playback;
pub mod session;
pub mod storage;

pub use checkpoint::{
    AnswerGate, AnswerOption, Checkpoint, Feedback, GateState, QuestionBank, QuestionSession,
    ResumeTimer, TriggerEngine, RESUME_DELAY_MS,
};
pub use error::{BankError, ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use playback::{BoundaryTracker, PlayerSurface, SimulatedPlayer, ZoomController, ZoomWindow};
pub use session::{now_ms, PlaySession};
pub use storage::Config;
