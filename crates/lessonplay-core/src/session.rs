//! Playback session coordination.
//!
//! `PlaySession` wires the pieces together: the player surface adapter,
//! the boundary tracker, the trigger engine, the answer gate, and the
//! zoom controller. It is a single-threaded state machine -- the caller
//! is responsible for advancing the player clock and calling `tick()`
//! periodically, and for forwarding user intents.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = PlaySession::new(QuestionBank::sample(), SimulatedPlayer::with_duration(60.0));
//! session.toggle_playback();
//! // In a loop:
//! session.player_mut().advance(elapsed_secs);
//! for event in session.tick(now_ms()) { /* render */ }
//! ```

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::checkpoint::{AnswerGate, GateState, QuestionBank, QuestionSession, TriggerEngine};
use crate::events::Event;
use crate::playback::{BoundaryTracker, PlayerSurface, ZoomController, ZoomWindow};

/// Progress range used while the player has no duration yet.
const DEFAULT_PROGRESS_RANGE_SECS: f64 = 100.0;

/// One video-with-checkpoints viewing session.
///
/// Owns the session's mutable business state (answered set, active
/// question) and the player adapter. All transitions are synchronous on
/// a time sample or a user intent.
#[derive(Debug, Clone)]
pub struct PlaySession<P: PlayerSurface> {
    id: String,
    player: P,
    bank: QuestionBank,
    tracker: BoundaryTracker,
    engine: TriggerEngine,
    gate: AnswerGate,
    zoom: ZoomController,
    ended: bool,
}

impl<P: PlayerSurface> PlaySession<P> {
    pub fn new(bank: QuestionBank, player: P) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            player,
            bank,
            tracker: BoundaryTracker::new(),
            engine: TriggerEngine::new(),
            gate: AnswerGate::new(),
            zoom: ZoomController::new(),
            ended: false,
        }
    }

    pub fn with_zoom_window(mut self, window: ZoomWindow) -> Self {
        self.zoom = ZoomController::with_window(window);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// The question currently blocking playback, if any.
    pub fn question(&self) -> Option<&QuestionSession> {
        self.gate.session()
    }

    pub fn answered(&self) -> &HashSet<String> {
        self.engine.answered()
    }

    pub fn all_answered(&self) -> bool {
        self.bank
            .checkpoints()
            .iter()
            .all(|cp| self.engine.is_answered(&cp.id))
    }

    pub fn zoom_active(&self) -> bool {
        self.zoom.is_active()
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// 0.0 .. 100.0 position within the media. Falls back to a default
    /// range while metadata has not loaded.
    pub fn progress_pct(&self) -> f64 {
        let range = self
            .player
            .duration()
            .filter(|d| *d > 0.0)
            .unwrap_or(DEFAULT_PROGRESS_RANGE_SECS);
        (self.player.current_time() / range * 100.0).min(100.0)
    }

    /// Build a full state snapshot event for renderers.
    pub fn snapshot(&self) -> Event {
        let question = self.gate.session();
        let mut answered: Vec<String> = self.engine.answered().iter().cloned().collect();
        answered.sort();
        Event::StateSnapshot {
            session_id: self.id.clone(),
            playing: self.player.is_playing(),
            current_time: self.player.current_time(),
            duration: self.player.duration(),
            captions_enabled: self.player.caption_visible(),
            zoom_active: self.zoom.is_active(),
            gate: self.gate.state(),
            active_checkpoint: question.map(|q| q.checkpoint.id.clone()),
            selected_option: question.and_then(|q| q.selected.clone()),
            feedback_correct: question.and_then(|q| q.correct),
            answered,
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── User intents ─────────────────────────────────────────────────

    /// Play/pause toggle. Refused while a question session is open: the
    /// player never resumes except through a resolved checkpoint.
    pub fn toggle_playback(&mut self) -> Option<Event> {
        if self.gate.is_open() {
            return None;
        }
        if self.player.is_playing() {
            self.player.pause();
            Some(Event::PlaybackPaused {
                time: self.player.current_time(),
                at: Utc::now(),
            })
        } else {
            self.player.play();
            if !self.player.is_playing() {
                return None; // At the end of media.
            }
            Some(Event::PlaybackResumed {
                time: self.player.current_time(),
                at: Utc::now(),
            })
        }
    }

    /// Move the playhead. Crossing detection re-arms at the new position,
    /// so checkpoints jumped over are forfeited while a landing on an
    /// unanswered trigger second still fires on the next sample.
    pub fn seek(&mut self, time: f64) -> Event {
        let from = self.player.current_time();
        self.player.seek(time);
        let to = self.player.current_time();
        self.tracker.reset();
        self.ended = matches!(self.player.duration(), Some(d) if to >= d);
        Event::Seeked {
            from,
            to,
            at: Utc::now(),
        }
    }

    pub fn select_option(&mut self, option_id: &str) -> Option<Event> {
        if !self.gate.select(option_id) {
            return None;
        }
        let question = self.gate.session()?;
        Some(Event::OptionSelected {
            checkpoint_id: question.checkpoint.id.clone(),
            option_id: option_id.to_string(),
            at: Utc::now(),
        })
    }

    /// Submit the pending selection. No-op without one.
    pub fn submit(&mut self, now_ms: u64) -> Option<Event> {
        let correct = self.gate.submit(now_ms)?;
        let question = self.gate.session()?;
        Some(Event::AnswerEvaluated {
            checkpoint_id: question.checkpoint.id.clone(),
            option_id: question.selected.clone().unwrap_or_default(),
            correct,
            at: Utc::now(),
        })
    }

    pub fn try_again(&mut self) -> Option<Event> {
        let checkpoint_id = self.gate.session()?.checkpoint.id.clone();
        if !self.gate.try_again() {
            return None;
        }
        Some(Event::RetryStarted {
            checkpoint_id,
            at: Utc::now(),
        })
    }

    pub fn toggle_captions(&mut self) -> Event {
        let enabled = !self.player.caption_visible();
        self.player.set_caption_visible(enabled);
        Event::CaptionsToggled {
            enabled,
            at: Utc::now(),
        }
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Process one tick: fire a due auto-resume, sample the player clock,
    /// update the zoom window, and evaluate checkpoint triggers on
    /// second-boundary crossings.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();

        if let Some(resolved) = self.gate.poll_resume(now_ms) {
            self.engine.mark_answered(&resolved.checkpoint.id);
            self.player.play();
            events.push(Event::CheckpointResolved {
                checkpoint_id: resolved.checkpoint.id,
                at: Utc::now(),
            });
            events.push(Event::PlaybackResumed {
                time: self.player.current_time(),
                at: Utc::now(),
            });
        }

        let time = self.player.current_time();

        if let Some(active) = self.zoom.observe(time) {
            events.push(if active {
                Event::ZoomEntered {
                    time,
                    at: Utc::now(),
                }
            } else {
                Event::ZoomExited {
                    time,
                    at: Utc::now(),
                }
            });
        }

        // Samples arriving while a question is open are ignored for
        // trigger evaluation and do not move the boundary reference.
        let gate_open = self.gate.is_open();
        if !gate_open && self.tracker.observe(time) {
            if let Some(checkpoint) = self.engine.evaluate(&self.bank, time, gate_open) {
                let checkpoint = checkpoint.clone();
                let trigger_second = checkpoint.trigger_second();
                self.player.pause();
                self.gate.present(checkpoint.clone());
                events.push(Event::CheckpointTriggered {
                    checkpoint_id: checkpoint.id,
                    trigger_second,
                    at: Utc::now(),
                });
            }
        }

        if !self.ended {
            if matches!(self.player.duration(), Some(d) if time >= d) {
                self.ended = true;
                events.push(Event::PlaybackEnded {
                    time,
                    at: Utc::now(),
                });
            }
        }

        events
    }
}

/// Milliseconds since the Unix epoch, for callers ticking on wall time.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::SimulatedPlayer;

    fn session() -> PlaySession<SimulatedPlayer> {
        PlaySession::new(QuestionBank::sample(), SimulatedPlayer::with_duration(60.0))
    }

    #[test]
    fn toggle_refused_while_question_open() {
        let mut s = session();
        s.toggle_playback();
        s.player_mut().advance(10.2);
        let events = s.tick(0);
        assert!(matches!(events[0], Event::CheckpointTriggered { .. }));
        assert!(!s.player().is_playing());

        assert!(s.toggle_playback().is_none());
        assert!(!s.player().is_playing());
    }

    #[test]
    fn captions_toggle_round_trip() {
        let mut s = session();
        assert!(s.player().caption_visible());
        match s.toggle_captions() {
            Event::CaptionsToggled { enabled, .. } => assert!(!enabled),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(!s.player().caption_visible());
    }

    #[test]
    fn progress_falls_back_without_metadata() {
        let s = PlaySession::new(QuestionBank::sample(), SimulatedPlayer::new());
        assert_eq!(s.progress_pct(), 0.0);

        let mut s = PlaySession::new(QuestionBank::sample(), SimulatedPlayer::new());
        s.player_mut().play();
        s.player_mut().advance(50.0);
        assert_eq!(s.progress_pct(), 50.0);
    }

    #[test]
    fn snapshot_reflects_gate_and_answers() {
        let mut s = session();
        s.toggle_playback();
        s.player_mut().advance(10.2);
        s.tick(0);
        s.select_option("q1-b");

        match s.snapshot() {
            Event::StateSnapshot {
                playing,
                gate,
                active_checkpoint,
                selected_option,
                answered,
                ..
            } => {
                assert!(!playing);
                assert_eq!(gate, GateState::Selected);
                assert_eq!(active_checkpoint.as_deref(), Some("q1"));
                assert_eq!(selected_option.as_deref(), Some("q1-b"));
                assert!(answered.is_empty());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn playback_end_is_reported_once() {
        let mut s = session();
        // Seek past every checkpoint, then run off the end.
        s.seek(59.5);
        s.toggle_playback();
        s.player_mut().advance(1.0);
        let events = s.tick(0);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::PlaybackEnded { .. })));
        assert!(s.ended());

        let events = s.tick(100);
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::PlaybackEnded { .. })));
    }
}
