//! Scene loop: events, pacing, configuration and the virtual screen.

/// Scene settings and their JSON form.
pub mod config;
/// Input and lifecycle events.
pub mod events;
/// Fixed-step deadlines and frame-rate measurement.
pub mod pacing;
/// The frame loop and its widget set.
#[allow(clippy::module_inception)]
pub mod scene;
/// Letterbox and stretch composition of the virtual screen.
pub mod virtual_screen;
