//! Playback-side concerns: the player surface capability, time-sample
//! coarsening, and the zoom effect window.

pub mod surface;
pub mod tracker;
pub mod zoom;

pub use surface::{PlayerSurface, SimulatedPlayer};
pub use tracker::BoundaryTracker;
pub use zoom::{ZoomController, ZoomWindow};
