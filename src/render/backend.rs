use std::path::Path;

use crate::assets::decode::decode_path;
use crate::foundation::core::{Color, PixelPoint, PixelRect, PixelSize};
use crate::foundation::error::SceneryResult;
use crate::render::texture::{BlendMode, PixelFormat, Surface, Texture, TextureAccess};

/// A presented frame as RGBA8 pixels.
///
/// Frames leave the renderer **premultiplied** unless a sink converts them; the flag makes this
/// explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Mirroring applied by [`Renderer::copy_ex`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flip {
    /// No mirroring.
    #[default]
    None,
    /// Mirror left/right.
    Horizontal,
    /// Mirror top/bottom.
    Vertical,
    /// Mirror both axes.
    Both,
}

impl Flip {
    /// Whether the horizontal axis is mirrored.
    pub fn horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    /// Whether the vertical axis is mirrored.
    pub fn vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

/// Capabilities reported by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererInfo {
    /// Backend name for logs.
    pub name: &'static str,
    /// `present` is synchronized with the display refresh.
    pub vsync: bool,
    /// Textures can be bound as render targets.
    pub target_texture: bool,
}

/// The drawing collaborator: a backbuffer with a settable target and texture blits.
///
/// Targets are switched only through [`crate::DrawContext`], which keeps the push/pop stack.
/// Texture creation has defaults built on CPU pixel buffers so that simple backends only need
/// the drawing primitives.
pub trait Renderer {
    /// Capabilities.
    fn info(&self) -> RendererInfo;

    /// Size of the real output (window) in pixels.
    fn output_size(&self) -> SceneryResult<PixelSize>;

    /// Color used by `clear` and the primitives.
    fn set_draw_color(&mut self, color: Color);

    /// Current draw color.
    fn draw_color(&self) -> Color;

    /// Blending used by the primitives.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Fill the whole current target with the draw color, ignoring the blend mode.
    fn clear(&mut self) -> SceneryResult<()>;

    /// Show the backbuffer.
    fn present(&mut self) -> SceneryResult<()>;

    /// Bind `target` for drawing, or the backbuffer for `None`.
    fn set_target(&mut self, target: Option<&Texture>) -> SceneryResult<()>;

    /// Plot one pixel.
    fn draw_point(&mut self, p: PixelPoint) -> SceneryResult<()>;

    /// One pixel wide line, both endpoints inclusive.
    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint) -> SceneryResult<()>;

    /// One pixel wide rectangle outline.
    fn draw_rect(&mut self, rect: PixelRect) -> SceneryResult<()>;

    /// Filled rectangle, or the whole target for `None`.
    fn fill_rect(&mut self, rect: Option<PixelRect>) -> SceneryResult<()>;

    /// Transformed blit of `src` (whole texture for `None`) onto `dst` (whole target for `None`).
    ///
    /// `angle` is in degrees, clockwise, around `center` (relative to `dst`, defaults to the middle
    /// of `dst`). Flipping happens inside `dst` before rotation.
    fn copy_ex(
        &mut self,
        texture: &Texture,
        src: Option<PixelRect>,
        dst: Option<PixelRect>,
        angle: f64,
        center: Option<PixelPoint>,
        flip: Flip,
    ) -> SceneryResult<()>;

    /// Untransformed blit.
    fn copy(
        &mut self,
        texture: &Texture,
        src: Option<PixelRect>,
        dst: Option<PixelRect>,
    ) -> SceneryResult<()> {
        self.copy_ex(texture, src, dst, 0.0, None, Flip::None)
    }

    /// Blank texture.
    fn create_texture(
        &mut self,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> SceneryResult<Texture> {
        Texture::new(format, access, width, height)
    }

    /// Upload a surface.
    fn create_texture_from_surface(&mut self, surface: &Surface) -> SceneryResult<Texture> {
        Texture::from_premul_bytes(
            TextureAccess::Static,
            surface.width(),
            surface.height(),
            surface.data(),
        )
    }

    /// Decode an image file (raster formats or SVG) and upload it.
    fn load_texture(&mut self, path: &Path) -> SceneryResult<Texture> {
        let decoded = decode_path(path)?;
        Texture::from_premul_bytes(
            TextureAccess::Static,
            decoded.width,
            decoded.height,
            &decoded.rgba8_premul,
        )
    }
}
