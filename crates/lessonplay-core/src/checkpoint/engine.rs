//! Checkpoint trigger evaluation.
//!
//! The trigger engine decides, for one coarsened time sample, whether an
//! unanswered checkpoint fires. It owns the answered set: the append-only
//! record of checkpoints resolved correctly during this session. It never
//! touches the player -- the session coordinator pauses playback and opens
//! the answer gate when `evaluate` returns a hit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::question::{Checkpoint, QuestionBank};

/// Trigger decision state: the answered set plus the matching rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerEngine {
    answered: HashSet<String>,
}

impl TriggerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a checkpoint fires at `time`.
    ///
    /// Matching is on the floored second. `gate_open` suppresses
    /// evaluation entirely: while a question session is open, spurious
    /// samples must not fire a second checkpoint.
    pub fn evaluate<'a>(
        &self,
        bank: &'a QuestionBank,
        time: f64,
        gate_open: bool,
    ) -> Option<&'a Checkpoint> {
        if gate_open || time < 0.0 {
            return None;
        }
        bank.find_pending(time.floor() as u64, &self.answered)
    }

    /// Record a checkpoint as correctly resolved. Returns false if it was
    /// already present (it never is in normal operation).
    pub fn mark_answered(&mut self, checkpoint_id: &str) -> bool {
        self.answered.insert(checkpoint_id.to_string())
    }

    pub fn is_answered(&self, checkpoint_id: &str) -> bool {
        self.answered.contains(checkpoint_id)
    }

    pub fn answered(&self) -> &HashSet<String> {
        &self.answered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_matching_second() {
        let bank = QuestionBank::sample();
        let engine = TriggerEngine::new();
        assert_eq!(engine.evaluate(&bank, 10.1, false).unwrap().id, "q1");
        assert_eq!(engine.evaluate(&bank, 10.999, false).unwrap().id, "q1");
        assert!(engine.evaluate(&bank, 9.999, false).is_none());
        assert!(engine.evaluate(&bank, 11.0, false).is_none());
    }

    #[test]
    fn answered_checkpoints_do_not_refire() {
        let bank = QuestionBank::sample();
        let mut engine = TriggerEngine::new();
        assert!(engine.mark_answered("q1"));
        assert!(engine.evaluate(&bank, 10.1, false).is_none());
        assert_eq!(engine.evaluate(&bank, 30.2, false).unwrap().id, "q2");
    }

    #[test]
    fn open_gate_suppresses_evaluation() {
        let bank = QuestionBank::sample();
        let engine = TriggerEngine::new();
        assert!(engine.evaluate(&bank, 10.1, true).is_none());
    }

    #[test]
    fn mark_answered_is_append_only() {
        let mut engine = TriggerEngine::new();
        assert!(engine.mark_answered("q1"));
        assert!(!engine.mark_answered("q1"));
        assert!(engine.is_answered("q1"));
        assert_eq!(engine.answered().len(), 1);
    }

    #[test]
    fn negative_time_never_fires() {
        let bank = QuestionBank::sample();
        let engine = TriggerEngine::new();
        assert!(engine.evaluate(&bank, -1.0, false).is_none());
    }
}
