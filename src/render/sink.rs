use std::path::PathBuf;

use anyhow::Context;

use crate::foundation::error::{SceneryError, SceneryResult};
use crate::render::backend::FrameRGBA;
use crate::render::composite::unpremultiply_rgba8_in_place;

/// Consumer of presented frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing present indices.
pub trait PresentSink {
    /// Receive one presented frame.
    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> SceneryResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    frames: Vec<(u64, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }
}

impl PresentSink for InMemorySink {
    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> SceneryResult<()> {
        self.frames.push((index, frame.clone()));
        Ok(())
    }
}

/// Writes presented frames as straight-alpha PNG files named `frame_00000.png`, ...
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    stride: u64,
    written: usize,
}

impl PngSequenceSink {
    /// Sink writing every `stride`-th frame (at least every frame) into `dir`, created if needed.
    pub fn new(dir: impl Into<PathBuf>, stride: u64) -> SceneryResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create frame directory '{}'", dir.display()))?;
        Ok(Self {
            dir,
            stride: stride.max(1),
            written: 0,
        })
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl PresentSink for PngSequenceSink {
    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> SceneryResult<()> {
        if index % self.stride != 0 {
            return Ok(());
        }
        let path = self.dir.join(format!("frame_{index:05}.png"));
        write_png(&path, frame)?;
        self.written += 1;
        Ok(())
    }
}

/// Save a frame as PNG, converting premultiplied pixels to straight alpha.
pub fn write_png(path: &std::path::Path, frame: &FrameRGBA) -> SceneryResult<()> {
    if frame.data.len() != (frame.width as usize) * (frame.height as usize) * 4 {
        return Err(SceneryError::validation("frame byte len mismatch"));
    }
    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
