//! The player surface capability.
//!
//! Media decoding and rendering live outside this crate. The session
//! coordinator only needs the narrow control surface below: transport
//! commands, the sampled clock, and the caption channel. `SimulatedPlayer`
//! is the built-in adapter -- a synthetic clock the CLI advances in real
//! time and tests advance by explicit deltas.

use serde::{Deserialize, Serialize};

/// Control surface of a media player. Playback state (current time,
/// duration, playing flag, caption flag) is owned by the adapter; the
/// session only reads it.
pub trait PlayerSurface {
    fn play(&mut self);
    fn pause(&mut self);
    /// Move the playhead. Adapters clamp to the valid range.
    fn seek(&mut self, time: f64);
    fn current_time(&self) -> f64;
    /// `None` until media metadata has loaded.
    fn duration(&self) -> Option<f64>;
    fn is_playing(&self) -> bool;
    fn set_caption_visible(&mut self, visible: bool);
    fn caption_visible(&self) -> bool;
}

/// Player adapter without real media: a clock that advances while
/// playing and clamps at the configured duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedPlayer {
    current_time: f64,
    duration: Option<f64>,
    playing: bool,
    captions: bool,
}

impl SimulatedPlayer {
    /// A player whose metadata has not loaded yet.
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            duration: None,
            playing: false,
            captions: true,
        }
    }

    pub fn with_duration(duration: f64) -> Self {
        let mut player = Self::new();
        player.load_metadata(duration);
        player
    }

    /// Set the duration, as a real player does once metadata arrives.
    pub fn load_metadata(&mut self, duration: f64) {
        self.duration = Some(duration.max(0.0));
    }

    /// Advance the clock by `delta_secs` of playback. Does nothing while
    /// paused. Reaching the end clamps the playhead and stops playback.
    pub fn advance(&mut self, delta_secs: f64) {
        if !self.playing || delta_secs <= 0.0 {
            return;
        }
        self.current_time += delta_secs;
        if let Some(duration) = self.duration {
            if self.current_time >= duration {
                self.current_time = duration;
                self.playing = false;
            }
        }
    }

    /// Playhead sits at the end of known media.
    pub fn at_end(&self) -> bool {
        matches!(self.duration, Some(d) if self.current_time >= d)
    }
}

impl Default for SimulatedPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerSurface for SimulatedPlayer {
    fn play(&mut self) {
        if !self.at_end() {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, time: f64) {
        let upper = self.duration.unwrap_or(f64::MAX);
        self.current_time = time.clamp(0.0, upper);
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_caption_visible(&mut self, visible: bool) {
        self.captions = visible;
    }

    fn caption_visible(&self) -> bool {
        self.captions
    }
}
