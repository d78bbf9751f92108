use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkpoint::GateState;

/// Every state change in the session produces an Event.
/// The presentation surface polls for events and renders from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PlaybackResumed {
        time: f64,
        at: DateTime<Utc>,
    },
    PlaybackPaused {
        time: f64,
        at: DateTime<Utc>,
    },
    /// Playhead moved by an explicit seek intent.
    Seeked {
        from: f64,
        to: f64,
        at: DateTime<Utc>,
    },
    CaptionsToggled {
        enabled: bool,
        at: DateTime<Utc>,
    },
    /// Playback crossed an unanswered checkpoint's trigger second.
    /// The player is paused and a question session is open.
    CheckpointTriggered {
        checkpoint_id: String,
        trigger_second: u64,
        at: DateTime<Utc>,
    },
    OptionSelected {
        checkpoint_id: String,
        option_id: String,
        at: DateTime<Utc>,
    },
    /// A selection was submitted and evaluated.
    AnswerEvaluated {
        checkpoint_id: String,
        option_id: String,
        correct: bool,
        at: DateTime<Utc>,
    },
    /// The learner asked to retry after incorrect feedback.
    RetryStarted {
        checkpoint_id: String,
        at: DateTime<Utc>,
    },
    /// The auto-resume delay elapsed: the checkpoint is recorded as
    /// answered and playback resumes.
    CheckpointResolved {
        checkpoint_id: String,
        at: DateTime<Utc>,
    },
    ZoomEntered {
        time: f64,
        at: DateTime<Utc>,
    },
    ZoomExited {
        time: f64,
        at: DateTime<Utc>,
    },
    /// The playhead reached the end of the media.
    PlaybackEnded {
        time: f64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        session_id: String,
        playing: bool,
        current_time: f64,
        duration: Option<f64>,
        captions_enabled: bool,
        zoom_active: bool,
        gate: GateState,
        active_checkpoint: Option<String>,
        selected_option: Option<String>,
        feedback_correct: Option<bool>,
        answered: Vec<String>,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
