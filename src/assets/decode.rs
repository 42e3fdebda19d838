use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{SceneryError, SceneryResult};
use crate::render::composite::premultiply_rgba8_in_place;

/// Decoded pixels ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub rgba8_premul: Vec<u8>,
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> SceneryResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul,
    })
}

/// Parse and rasterize SVG bytes at their intrinsic size.
pub fn decode_svg(bytes: &[u8]) -> SceneryResult<DecodedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    fn to_px(v: f32) -> SceneryResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(SceneryError::resource("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SceneryError::resource("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: pixmap.data().to_vec(),
    })
}

/// Read and decode a file, choosing SVG by extension and raster formats by content.
pub fn decode_path(path: &Path) -> SceneryResult<DecodedImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        SceneryError::resource(format!("failed to read image '{}': {e}", path.display()))
    })?;
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    let decoded = if is_svg {
        decode_svg(&bytes)
    } else {
        decode_image(&bytes)
    };
    decoded.map_err(|e| SceneryError::resource(format!("'{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
