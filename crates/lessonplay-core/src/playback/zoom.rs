use serde::{Deserialize, Serialize};

/// Seconds after the window start during which entry is detected.
///
/// Samples are irregular, so the entry edge is a short half-open band
/// rather than an exact instant; once inside, further samples in the
/// window must not re-arm the effect.
const ENTRY_GUARD_SECS: f64 = 0.5;

/// Fixed time window for the magnification effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoomWindow {
    #[serde(default = "default_zoom_start")]
    pub start: f64,
    #[serde(default = "default_zoom_end")]
    pub end: f64,
}

fn default_zoom_start() -> f64 {
    15.0
}

fn default_zoom_end() -> f64 {
    20.0
}

impl Default for ZoomWindow {
    fn default() -> Self {
        Self {
            start: default_zoom_start(),
            end: default_zoom_end(),
        }
    }
}

/// Time-windowed visual-state toggler, independent of the answer gate.
///
/// Entry fires on a sample in `[start, start + 0.5)`; exit on a sample at
/// or past `end`. While playback is paused the time stream freezes and so
/// does the zoom state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoomController {
    window: ZoomWindow,
    active: bool,
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(window: ZoomWindow) -> Self {
        Self {
            window,
            active: false,
        }
    }

    /// Feed one time sample. Returns the new state when it flips.
    pub fn observe(&mut self, time: f64) -> Option<bool> {
        if !self.active
            && time >= self.window.start
            && time < self.window.start + ENTRY_GUARD_SECS
        {
            self.active = true;
            return Some(true);
        }
        if self.active && time >= self.window.end {
            self.active = false;
            return Some(false);
        }
        None
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn window(&self) -> ZoomWindow {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enters_and_exits_default_window() {
        let mut zoom = ZoomController::new();
        assert!(zoom.observe(14.9).is_none());
        assert_eq!(zoom.observe(15.0), Some(true));
        assert!(zoom.is_active());

        // Already inside: no re-arm.
        assert!(zoom.observe(15.2).is_none());
        assert!(zoom.observe(19.9).is_none());

        assert_eq!(zoom.observe(20.0), Some(false));
        assert!(!zoom.is_active());
    }

    #[test]
    fn entry_band_is_half_open() {
        let mut zoom = ZoomController::new();
        // Landing past the entry band never activates.
        assert!(zoom.observe(15.5).is_none());
        assert!(zoom.observe(17.0).is_none());
        assert!(!zoom.is_active());
    }

    #[test]
    fn stays_active_on_backward_seek_out_of_window() {
        let mut zoom = ZoomController::new();
        zoom.observe(15.1);
        assert!(zoom.is_active());
        // Exit is only at the far edge.
        assert!(zoom.observe(3.0).is_none());
        assert!(zoom.is_active());
        assert_eq!(zoom.observe(21.0), Some(false));
    }

    #[test]
    fn custom_window() {
        let mut zoom = ZoomController::with_window(ZoomWindow {
            start: 5.0,
            end: 8.0,
        });
        assert_eq!(zoom.observe(5.3), Some(true));
        assert_eq!(zoom.observe(8.0), Some(false));
    }
}
