//! Asset decoding and sprite frame loading.

/// Raster and SVG decoding to premultiplied RGBA8.
pub mod decode;
/// Frame sequences loaded from directories.
pub mod sprites;
