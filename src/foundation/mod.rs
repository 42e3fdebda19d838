//! Geometry, colors, time and errors shared by every other module.

/// Monotonic clocks.
pub mod clock;
/// Color deserialization.
pub(crate) mod color;
/// Pixel geometry and colors.
pub mod core;
/// Error taxonomy.
pub mod error;
