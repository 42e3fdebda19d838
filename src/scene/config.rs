use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Color, PixelSize};
use crate::foundation::error::{SceneryError, SceneryResult};

/// Font name the FPS overlay looks up in the font cache.
pub const DEFAULT_FPS_FONT: &str = "SCENE_FPS";

/// Target frame rate when nothing else is configured.
pub const DEFAULT_FPS: f64 = 40.0;

/// How the virtual screen is composited into the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualFit {
    /// Fill the whole window, ignoring aspect ratio.
    Stretch,
    /// Keep the aspect ratio, centered, with bars on the loose axis.
    #[default]
    Letterbox,
}

/// Fixed-resolution canvas the scene draws into before compositing to the window.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VirtualScreenConfig {
    /// Canvas width. Zero disables the virtual screen.
    pub width: u32,
    /// Canvas height. Zero disables the virtual screen.
    pub height: u32,
    /// Composition policy.
    #[serde(default)]
    pub fit: VirtualFit,
    /// Color the canvas is cleared to every frame.
    #[serde(default = "default_background")]
    pub background: Color,
}

impl VirtualScreenConfig {
    /// Canvas size in pixels.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }

    /// Whether the canvas has an area to draw into.
    pub fn is_usable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Scene settings. Read once by [`Scene::start`](crate::Scene::start); changing them afterwards
/// has no effect on a running loop.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Backbuffer clear color.
    #[serde(default = "default_background")]
    pub background: Color,
    /// Sleep until a fixed deadline each frame. Ignored when the renderer paces itself (vsync).
    #[serde(default = "default_true")]
    pub fixed_fps: bool,
    /// Target frame rate for fixed pacing.
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Draw the measured frame rate in the top-left corner.
    #[serde(default)]
    pub fps_display: bool,
    /// Font cache key used for the overlay.
    #[serde(default = "default_fps_font")]
    pub fps_font: String,
    /// Optional virtual screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_screen: Option<VirtualScreenConfig>,
}

fn default_background() -> Color {
    Color::BLACK
}

fn default_true() -> bool {
    true
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

fn default_fps_font() -> String {
    DEFAULT_FPS_FONT.to_owned()
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            fixed_fps: true,
            fps: DEFAULT_FPS,
            fps_display: false,
            fps_font: default_fps_font(),
            virtual_screen: None,
        }
    }
}

impl SceneConfig {
    /// Parse and validate JSON.
    pub fn from_json_str(s: &str) -> SceneryResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| SceneryError::validation(format!("scene config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> SceneryResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check settings the loop cannot run with. A zero-sized virtual screen is accepted and
    /// simply disables the virtual screen.
    pub fn validate(&self) -> SceneryResult<()> {
        if self.fixed_fps && (!self.fps.is_finite() || self.fps <= 0.0) {
            return Err(SceneryError::validation(
                "fps must be finite and > 0 when fixed_fps is set",
            ));
        }
        Ok(())
    }

    /// Set the backbuffer clear color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Turn fixed pacing on at `fps`, or off.
    pub fn with_fixed_fps(mut self, fixed: bool, fps: f64) -> Self {
        self.fixed_fps = fixed;
        self.fps = fps;
        self
    }

    /// Toggle the FPS overlay.
    pub fn with_fps_display(mut self, enabled: bool) -> Self {
        self.fps_display = enabled;
        self
    }

    /// Enable a virtual screen.
    pub fn with_virtual_screen(mut self, width: u32, height: u32, fit: VirtualFit) -> Self {
        let background = self
            .virtual_screen
            .map_or_else(default_background, |vs| vs.background);
        self.virtual_screen = Some(VirtualScreenConfig {
            width,
            height,
            fit,
            background,
        });
        self
    }

    /// Clear color of the virtual screen. No effect until a virtual screen is enabled.
    pub fn with_virtual_screen_background(mut self, color: Color) -> Self {
        if let Some(vs) = &mut self.virtual_screen {
            vs.background = color;
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
