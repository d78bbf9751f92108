use serde::{Deserialize, Serialize};

/// Coarsens an irregular stream of time samples to one evaluation per
/// integer-second crossing.
///
/// Checkpoints are defined at integer seconds; evaluating every raw
/// sample would re-fire many times within the same second. `observe`
/// answers "has the floored second changed since the last accepted
/// sample". A fresh or reset tracker accepts its first sample
/// unconditionally, so seeking directly onto a trigger second still
/// evaluates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundaryTracker {
    last_checked: Option<f64>,
}

impl BoundaryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when this sample crosses a second boundary (and
    /// becomes the new reference point). Samples within the same second
    /// leave the reference untouched.
    pub fn observe(&mut self, time: f64) -> bool {
        let crossed = match self.last_checked {
            None => true,
            Some(prev) => time.floor() != prev.floor(),
        };
        if crossed {
            self.last_checked = Some(time);
        }
        crossed
    }

    /// Forget the reference point. Called after a seek so crossing
    /// detection re-arms relative to the new position; boundaries jumped
    /// over by the seek are never back-filled.
    pub fn reset(&mut self) {
        self.last_checked = None;
    }

    pub fn last_checked(&self) -> Option<f64> {
        self.last_checked
    }
}
