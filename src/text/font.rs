use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::foundation::core::{Color, PixelSize};
use crate::foundation::error::{SceneryError, SceneryResult};
use crate::render::texture::Surface;

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Color> for TextBrush {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Parley contexts bound to one registered font family.
struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
}

impl TextLayoutEngine {
    fn new(font_bytes: &[u8]) -> SceneryResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SceneryError::resource("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SceneryError::resource("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrush,
        max_width_px: Option<f32>,
    ) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(max_width_px);
        if let Some(w) = max_width_px {
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        }
        layout
    }
}

struct FontFace {
    data: vello_cpu::peniko::FontData,
    size_px: f32,
    engine: RefCell<TextLayoutEngine>,
}

/// A scalable font at a fixed pixel size. Clones share the face.
#[derive(Clone)]
pub struct Font {
    face: Rc<FontFace>,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family_name())
            .field("size_px", &self.face.size_px)
            .finish()
    }
}

/// How glyph coverage is turned into pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TextMode {
    /// Hard edged glyphs: coverage thresholded at 50%.
    Solid,
    /// Antialiased glyphs over an opaque box of the given color.
    Shaded(Color),
    /// Antialiased glyphs on a transparent background.
    #[default]
    Blended,
    /// Like `Blended`, with lines broken at the given width in pixels.
    BlendedWrapped(u32),
}

impl Font {
    /// Load a TrueType/OpenType font from memory.
    pub fn from_bytes(bytes: Vec<u8>, size_px: f32) -> SceneryResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SceneryError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        let engine = TextLayoutEngine::new(&bytes)?;
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(Self {
            face: Rc::new(FontFace {
                data,
                size_px,
                engine: RefCell::new(engine),
            }),
        })
    }

    /// Load a font file.
    pub fn from_path(path: &Path, size_px: f32) -> SceneryResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            SceneryError::resource(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes, size_px)
    }

    /// Family name reported by the font.
    pub fn family_name(&self) -> String {
        self.face.engine.borrow().family_name.clone()
    }

    /// Pixel size.
    pub fn size_px(&self) -> f32 {
        self.face.size_px
    }

    /// True when both handles share a face.
    pub fn ptr_eq(&self, other: &Font) -> bool {
        Rc::ptr_eq(&self.face, &other.face)
    }

    /// Recommended distance between baselines.
    pub fn line_skip(&self) -> i32 {
        let layout = self.layout("Ag", Color::WHITE, None);
        layout.height().ceil() as i32
    }

    /// Size of the surface `text` would render to on one line.
    pub fn size_of(&self, text: &str) -> PixelSize {
        let layout = self.layout(text, Color::WHITE, None);
        PixelSize::new(layout.width().ceil() as i32, layout.height().ceil() as i32)
    }

    /// Render `text` in the given mode.
    pub fn render(&self, text: &str, color: Color, mode: TextMode) -> SceneryResult<Surface> {
        match mode {
            TextMode::Solid => self.solid(text, color),
            TextMode::Shaded(bg) => self.shaded(text, color, bg),
            TextMode::Blended => self.blended(text, color),
            TextMode::BlendedWrapped(w) => self.blended_wrapped(text, color, w),
        }
    }

    /// Hard edged glyphs on a transparent background.
    pub fn solid(&self, text: &str, color: Color) -> SceneryResult<Surface> {
        let mut pixmap = self.rasterize(text, color, None, None)?;
        let full = color.to_premul();
        for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            if px[3] >= 128 {
                px.copy_from_slice(&full);
            } else {
                px.fill(0);
            }
        }
        Ok(Surface::from_pixmap(&pixmap))
    }

    /// Antialiased glyphs over an opaque background box.
    pub fn shaded(&self, text: &str, color: Color, bg: Color) -> SceneryResult<Surface> {
        let pixmap = self.rasterize(text, color, Some(bg), None)?;
        Ok(Surface::from_pixmap(&pixmap))
    }

    /// Antialiased glyphs on a transparent background.
    pub fn blended(&self, text: &str, color: Color) -> SceneryResult<Surface> {
        let pixmap = self.rasterize(text, color, None, None)?;
        Ok(Surface::from_pixmap(&pixmap))
    }

    /// Antialiased glyphs broken into lines no wider than `wrap_width` pixels.
    pub fn blended_wrapped(
        &self,
        text: &str,
        color: Color,
        wrap_width: u32,
    ) -> SceneryResult<Surface> {
        if wrap_width == 0 {
            return self.blended(text, color);
        }
        let pixmap = self.rasterize(text, color, None, Some(wrap_width as f32))?;
        Ok(Surface::from_pixmap(&pixmap))
    }

    fn layout(
        &self,
        text: &str,
        color: Color,
        max_width: Option<f32>,
    ) -> parley::Layout<TextBrush> {
        self.face
            .engine
            .borrow_mut()
            .layout_plain(text, self.face.size_px, color.into(), max_width)
    }

    #[tracing::instrument(level = "trace", skip(self, color, bg))]
    fn rasterize(
        &self,
        text: &str,
        color: Color,
        bg: Option<Color>,
        max_width: Option<f32>,
    ) -> SceneryResult<vello_cpu::Pixmap> {
        let layout = self.layout(text, color, max_width);
        let w = layout.width().ceil();
        let h = layout.height().ceil();
        if text.is_empty() || w < 1.0 || h < 1.0 {
            return Err(SceneryError::resource("text renders to an empty surface"));
        }
        if w > f32::from(u16::MAX) || h > f32::from(u16::MAX) {
            return Err(SceneryError::resource("text surface exceeds u16"));
        }
        let (w, h) = (w as u16, h as u16);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        if let Some(bg) = bg {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));
        }
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.face.data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
