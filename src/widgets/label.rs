use crate::foundation::core::{Color, PixelRect, PixelSize};
use crate::foundation::error::SceneryResult;
use crate::render::target::DrawContext;
use crate::text::font::{Font, TextMode};
use crate::widgets::widget::{Widget, WidgetBase, render_into_texture};

/// Widget showing one string rendered with a [`Font`].
#[derive(Debug)]
pub struct Label {
    base: WidgetBase,
    text: String,
    font: Option<Font>,
    color: Color,
    mode: TextMode,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            base: WidgetBase::new(),
            text: String::new(),
            font: None,
            color: Color::WHITE,
            mode: TextMode::Blended,
        }
    }
}

impl Label {
    /// Empty label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label with text and font.
    pub fn with_text(text: impl Into<String>, font: Font) -> Self {
        let mut label = Self::new();
        label.set_text(text);
        label.set_font(font);
        label
    }

    /// Change the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text;
            self.base.mark_dirty();
        }
    }

    /// Change the font.
    pub fn set_font(&mut self, font: Font) {
        if !self.font.as_ref().is_some_and(|f| f.ptr_eq(&font)) {
            self.font = Some(font);
            self.base.mark_dirty();
        }
    }

    /// Change the text color.
    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.base.mark_dirty();
        }
    }

    /// Change how glyphs are rasterized.
    pub fn set_mode(&mut self, mode: TextMode) {
        if self.mode != mode {
            self.mode = mode;
            self.base.mark_dirty();
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current font.
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Text color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Rasterization mode.
    pub fn mode(&self) -> TextMode {
        self.mode
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update_texture(&mut self, ctx: &mut DrawContext<'_>) -> SceneryResult<()> {
        let rendered = match &self.font {
            Some(font) if !self.text.is_empty() => {
                let surface = font.render(&self.text, self.color, self.mode)?;
                Some(ctx.renderer().create_texture_from_surface(&surface)?)
            }
            _ => None,
        };

        let size = match (&rendered, self.base.autosize()) {
            (Some(t), true) => t.size(),
            (None, true) => PixelSize::default(),
            (_, false) => self.base.size(),
        };
        self.base.set_content_size(size);
        self.base.set_texture(None);
        if size.is_empty() {
            return Ok(());
        }

        let dest = rendered.as_ref().map(|t| {
            if self.base.autosize() {
                PixelRect::from_size(t.size())
            } else {
                self.base.align(t.size())
            }
        });
        let texture = render_into_texture(ctx, &self.base, size, |ctx| {
            match (&rendered, dest) {
                (Some(text), Some(dest)) => ctx.renderer().copy(text, None, Some(dest)),
                _ => Ok(()),
            }
        })?;
        self.base.set_texture(Some(texture));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/label.rs"]
mod tests;
