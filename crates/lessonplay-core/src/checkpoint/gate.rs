//! Answer gate -- the state machine between a triggered checkpoint and
//! resumed playback.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --[present]--> Presenting --[select]--> Selected --[submit]-->
//!     FeedbackCorrect --[resume delay elapses]--> Idle
//!     FeedbackIncorrect --[try again]--> Presenting
//! ```
//!
//! Submitting with no selection is ignored. Selecting while feedback is
//! visible is ignored. Retries are unlimited; the checkpoint only clears
//! through `FeedbackCorrect`, after a fixed delay that the learner cannot
//! skip. The gate operates on injected `now_ms` values -- no internal
//! clock, no threads; the caller ticks it.

use log::warn;
use serde::{Deserialize, Serialize};

use super::question::Checkpoint;

/// Delay between a correct answer and playback resuming.
pub const RESUME_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Idle,
    Presenting,
    Selected,
    FeedbackCorrect,
    FeedbackIncorrect,
}

/// The checkpoint currently presented, plus the learner's progress on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSession {
    pub checkpoint: Checkpoint,
    pub selected: Option<String>,
    pub feedback_visible: bool,
    /// Correctness of the last evaluated submission.
    pub correct: Option<bool>,
}

impl QuestionSession {
    fn new(checkpoint: Checkpoint) -> Self {
        Self {
            checkpoint,
            selected: None,
            feedback_visible: false,
            correct: None,
        }
    }
}

/// One-shot resume deadline with explicit arm/due/clear semantics.
///
/// At most one deadline is pending per question session: arming an
/// already-armed timer is a logged no-op, which keeps the invariant
/// checkable instead of silently re-scheduling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeTimer {
    fire_at_ms: Option<u64>,
}

impl ResumeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, now_ms: u64) {
        if self.fire_at_ms.is_some() {
            warn!("resume timer already armed; ignoring re-arm");
            return;
        }
        self.fire_at_ms = Some(now_ms + RESUME_DELAY_MS);
    }

    pub fn is_armed(&self) -> bool {
        self.fire_at_ms.is_some()
    }

    pub fn due(&self, now_ms: u64) -> bool {
        matches!(self.fire_at_ms, Some(at) if now_ms >= at)
    }

    pub fn clear(&mut self) {
        self.fire_at_ms = None;
    }
}

/// Gate over option selection, submission, feedback, retry, and the timed
/// auto-resume. Owns the active question session; emits nothing itself --
/// the session coordinator turns its transitions into events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerGate {
    session: Option<QuestionSession>,
    resume: ResumeTimer,
}

impl AnswerGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, derived from the session fields.
    pub fn state(&self) -> GateState {
        match &self.session {
            None => GateState::Idle,
            Some(s) if s.feedback_visible => match s.correct {
                Some(true) => GateState::FeedbackCorrect,
                _ => GateState::FeedbackIncorrect,
            },
            Some(s) if s.selected.is_some() => GateState::Selected,
            Some(_) => GateState::Presenting,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&QuestionSession> {
        self.session.as_ref()
    }

    /// Open a question session for a triggered checkpoint. Rejected while
    /// another session is open.
    pub fn present(&mut self, checkpoint: Checkpoint) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(QuestionSession::new(checkpoint));
        true
    }

    /// Record a pending choice. Replaces any earlier choice; ignored once
    /// feedback is shown or when the option id is unknown.
    pub fn select(&mut self, option_id: &str) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.feedback_visible || session.checkpoint.option(option_id).is_none() {
            return false;
        }
        session.selected = Some(option_id.to_string());
        true
    }

    /// Evaluate the pending choice. Returns the verdict, or `None` when
    /// there is nothing to submit. A correct verdict arms the resume
    /// timer; an incorrect one leaves the session blocked on feedback.
    pub fn submit(&mut self, now_ms: u64) -> Option<bool> {
        let session = self.session.as_mut()?;
        if session.feedback_visible {
            return None;
        }
        let selected = session.selected.as_deref()?;
        let correct = session
            .checkpoint
            .option(selected)
            .map(|o| o.correct)
            .unwrap_or(false);

        session.correct = Some(correct);
        session.feedback_visible = true;
        if correct {
            self.resume.arm(now_ms);
        }
        Some(correct)
    }

    /// Back to `Presenting` after incorrect feedback.
    pub fn try_again(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.feedback_visible || session.correct == Some(true) {
            return false;
        }
        session.selected = None;
        session.feedback_visible = false;
        session.correct = None;
        true
    }

    /// Fire the resume deadline if it is due. Clears the session and the
    /// timer, handing the resolved session back to the caller exactly
    /// once.
    pub fn poll_resume(&mut self, now_ms: u64) -> Option<QuestionSession> {
        if !self.resume.due(now_ms) {
            return None;
        }
        self.resume.clear();
        self.session.take()
    }

    pub fn resume_pending(&self) -> bool {
        self.resume.is_armed()
    }
}
