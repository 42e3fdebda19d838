//! Widgets: lazily rebuilt textures drawn through a transform and animation.

/// Timed transform interpolation.
pub mod animation;
/// Picture widget.
pub mod image;
/// Text widget.
pub mod label;
/// Frame-sequence widget.
pub mod sprite;
/// Draw-time scaling, rotation and flip.
pub mod transform;
/// Widget base, alignment and the render pipeline.
pub mod widget;
