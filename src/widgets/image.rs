use std::path::Path;

use crate::foundation::core::{PixelRect, PixelSize};
use crate::foundation::error::SceneryResult;
use crate::render::backend::Renderer;
use crate::render::target::DrawContext;
use crate::render::texture::Texture;
use crate::widgets::widget::{FitMode, Widget, WidgetBase, render_into_texture};

/// Widget showing a picture, fitted and aligned in its box.
#[derive(Debug, Default)]
pub struct Image {
    base: WidgetBase,
    source: Option<Texture>,
}

impl Image {
    /// Image without a picture: renders its background only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Image showing an already uploaded texture.
    pub fn from_texture(texture: Texture) -> Self {
        let mut img = Self::new();
        img.set_source(texture);
        img
    }

    /// Load a picture file through the renderer. On failure the previous picture is kept.
    pub fn load(&mut self, renderer: &mut dyn Renderer, path: &Path) -> SceneryResult<()> {
        let texture = renderer.load_texture(path)?;
        tracing::debug!(path = %path.display(), size = ?texture.size(), "image loaded");
        self.set_source(texture);
        Ok(())
    }

    /// Replace the picture.
    pub fn set_source(&mut self, texture: Texture) {
        self.source = Some(texture);
        self.base.mark_dirty();
    }

    /// The picture.
    pub fn source(&self) -> Option<&Texture> {
        self.source.as_ref()
    }

    /// Copy sharing the picture and style, with its own texture cache and a fresh transform.
    pub fn duplicate(&self) -> Self {
        let mut img = Self {
            base: WidgetBase::new(),
            source: self.source.clone(),
        };
        img.base.inherit_style(&self.base);
        img
    }

    /// Intrinsic picture size, zero without a picture.
    pub fn native_size(&self) -> PixelSize {
        self.source.as_ref().map(Texture::size).unwrap_or_default()
    }

    /// Width over height of the picture, 1.0 without one.
    pub fn ratio(&self) -> f32 {
        let s = self.native_size();
        if s.is_empty() {
            return 1.0;
        }
        s.w as f32 / s.h as f32
    }

    fn content_rect(&self) -> PixelRect {
        let declared = self.base.size();
        let native = self.native_size();
        let content = match self.base.fit_mode() {
            FitMode::None => native,
            FitMode::FitWidth => {
                PixelSize::new(declared.w, (declared.w as f32 / self.ratio()) as i32)
            }
            FitMode::FitHeight => {
                PixelSize::new((declared.h as f32 * self.ratio()) as i32, declared.h)
            }
            FitMode::Fit => declared,
        };
        self.base.align(content)
    }
}

impl Widget for Image {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update_texture(&mut self, ctx: &mut DrawContext<'_>) -> SceneryResult<()> {
        let autosized = self.base.autosize() && self.source.is_some();
        let size = if autosized {
            self.native_size()
        } else {
            self.base.size()
        };
        self.base.set_content_size(size);
        self.base.set_texture(None);
        if size.is_empty() {
            return Ok(());
        }

        let dest = if autosized {
            PixelRect::from_size(size)
        } else {
            self.content_rect()
        };
        let source = self.source.clone();
        let texture = render_into_texture(ctx, &self.base, size, |ctx| {
            match &source {
                Some(src) => ctx.renderer().copy(src, None, Some(dest)),
                None => Ok(()),
            }
        })?;
        self.base.set_texture(Some(texture));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/image.rs"]
mod tests;
