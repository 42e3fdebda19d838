//! Fonts and text rasterization.

/// Fonts rendered to surfaces.
pub mod font;
/// Name-keyed font cache.
pub mod fonts;
