use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::{Color, PixelPoint, PixelRect, PixelSize};
use crate::foundation::error::{SceneryError, SceneryResult};
use crate::render::target::DrawContext;
use crate::render::texture::{BlendMode, PixelFormat, Texture, TextureAccess};
use crate::widgets::animation::Animation;
use crate::widgets::transform::Transform;

/// Horizontal placement of content inside a widget's declared box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// Vertical placement of content inside a widget's declared box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    /// Flush top.
    Top,
    /// Centered.
    #[default]
    Center,
    /// Flush bottom.
    Bottom,
}

/// How content of a non-autosized widget is sized against its declared box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Intrinsic content size, may over- or underflow the box.
    None,
    /// Stretch to exactly fill the box.
    #[default]
    Fit,
    /// Keep the box width, derive the height from the content aspect ratio.
    FitWidth,
    /// Keep the box height, derive the width from the content aspect ratio.
    FitHeight,
}

enum AlignKind {
    Start,
    Center,
    End,
}

impl From<HAlign> for AlignKind {
    fn from(value: HAlign) -> Self {
        match value {
            HAlign::Left => AlignKind::Start,
            HAlign::Center => AlignKind::Center,
            HAlign::Right => AlignKind::End,
        }
    }
}

impl From<VAlign> for AlignKind {
    fn from(value: VAlign) -> Self {
        match value {
            VAlign::Top => AlignKind::Start,
            VAlign::Center => AlignKind::Center,
            VAlign::Bottom => AlignKind::End,
        }
    }
}

fn align_offset(container: i32, content: i32, align: impl Into<AlignKind>) -> i32 {
    let rem = container - content;
    match align.into() {
        AlignKind::Start => 0,
        AlignKind::Center => rem / 2,
        AlignKind::End => rem,
    }
}

/// Place `content` inside a box of size `container`. Offsets go negative when content overflows.
pub fn align_content(
    container: PixelSize,
    content: PixelSize,
    halign: HAlign,
    valign: VAlign,
) -> PixelRect {
    PixelRect::new(
        align_offset(container.w, content.w, halign),
        align_offset(container.h, content.h, valign),
        content.w,
        content.h,
    )
}

/// State shared by every widget: style, layout, the cached texture and its dirty flag, plus the
/// transform and animation applied when drawing.
#[derive(Debug)]
pub struct WidgetBase {
    visible: bool,
    bg: Color,
    size: PixelSize,
    rect: PixelRect,
    autosize: bool,
    halign: HAlign,
    valign: VAlign,
    fit: FitMode,
    update_needed: bool,
    texture: Option<Texture>,
    boundary_box: bool,
    rebuilds: u64,
    /// Transform used for the final copy.
    pub transform: Transform,
    /// Animation driving `transform`.
    pub animation: Animation,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self {
            visible: true,
            bg: Color::TRANSPARENT,
            size: PixelSize::default(),
            rect: PixelRect::default(),
            autosize: true,
            halign: HAlign::Center,
            valign: VAlign::Center,
            fit: FitMode::Fit,
            update_needed: true,
            texture: None,
            boundary_box: false,
            rebuilds: 0,
            transform: Transform::default(),
            animation: Animation::default(),
        }
    }
}

macro_rules! dirty_setter {
    ($(#[$doc:meta])* $name:ident, $field:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: $ty) {
            if self.$field != value {
                self.$field = value;
                self.update_needed = true;
            }
        }
    };
}

impl WidgetBase {
    /// Base with default settings: visible, transparent, autosized, centered, `Fit`, dirty.
    pub fn new() -> Self {
        Self::default()
    }

    dirty_setter!(
        /// Background color the texture is cleared to.
        set_background,
        bg,
        Color
    );
    dirty_setter!(
        /// Declared box size.
        set_size,
        size,
        PixelSize
    );
    dirty_setter!(
        /// Size the widget to its content.
        set_autosize,
        autosize,
        bool
    );
    dirty_setter!(
        /// Horizontal content alignment.
        set_halign,
        halign,
        HAlign
    );
    dirty_setter!(
        /// Vertical content alignment.
        set_valign,
        valign,
        VAlign
    );
    dirty_setter!(
        /// Content fit mode.
        set_fit_mode,
        fit,
        FitMode
    );
    dirty_setter!(
        /// Draw a green outline around the texture.
        set_boundary_box,
        boundary_box,
        bool
    );

    /// Both alignments at once.
    pub fn set_alignment(&mut self, halign: HAlign, valign: VAlign) {
        self.set_halign(halign);
        self.set_valign(valign);
    }

    /// Move the widget. Position never affects the texture.
    pub fn set_position(&mut self, pos: PixelPoint) {
        self.rect.x = pos.x;
        self.rect.y = pos.y;
    }

    /// Position and declared size at once.
    pub fn set_geometry(&mut self, rect: PixelRect) {
        self.set_position(rect.origin());
        self.set_size(rect.size());
    }

    /// Show or hide. Hidden widgets are skipped by scenes.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Force a texture rebuild on the next render.
    pub fn mark_dirty(&mut self) {
        self.update_needed = true;
    }

    /// Whether a rebuild is pending.
    pub fn is_dirty(&self) -> bool {
        self.update_needed
    }

    /// Visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Background color.
    pub fn background(&self) -> Color {
        self.bg
    }

    /// Declared size.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Computed position and size, as drawn before scaling.
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Autosize flag.
    pub fn autosize(&self) -> bool {
        self.autosize
    }

    /// Horizontal alignment.
    pub fn halign(&self) -> HAlign {
        self.halign
    }

    /// Vertical alignment.
    pub fn valign(&self) -> VAlign {
        self.valign
    }

    /// Fit mode.
    pub fn fit_mode(&self) -> FitMode {
        self.fit
    }

    /// Boundary box flag.
    pub fn boundary_box(&self) -> bool {
        self.boundary_box
    }

    /// Cached texture. `None` before the first render or after a failed rebuild.
    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Number of rebuilds performed.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Place `content` in the declared box using the alignments.
    pub fn align(&self, content: PixelSize) -> PixelRect {
        align_content(self.size, content, self.halign, self.valign)
    }

    pub(crate) fn set_texture(&mut self, texture: Option<Texture>) {
        if let Some(t) = &texture {
            let size = t.size();
            self.rect.w = size.w;
            self.rect.h = size.h;
        }
        self.texture = texture;
    }

    pub(crate) fn set_content_size(&mut self, size: PixelSize) {
        self.rect.w = size.w;
        self.rect.h = size.h;
    }

    /// Copy the visual settings of `other` (background, size, autosize, alignment, fit, outline).
    pub(crate) fn inherit_style(&mut self, other: &WidgetBase) {
        self.set_background(other.bg);
        self.set_boundary_box(other.boundary_box);
        self.set_size(other.size);
        self.set_autosize(other.autosize);
        self.set_halign(other.halign);
        self.set_valign(other.valign);
        self.set_fit_mode(other.fit);
    }
}

/// A renderable unit with a lazily rebuilt texture.
///
/// Implementors provide `update_texture`, which must leave a fresh texture (or `None`) in the
/// base; `render` takes care of the dirty flag, the animation and the final transformed copy.
pub trait Widget {
    /// Shared state.
    fn base(&self) -> &WidgetBase;

    /// Shared state, mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Rebuild the cached texture from content and style.
    fn update_texture(&mut self, ctx: &mut DrawContext<'_>) -> SceneryResult<()>;

    /// Called first in every `render`.
    fn before_render(&mut self, _ctx: &mut DrawContext<'_>) -> SceneryResult<()> {
        Ok(())
    }

    /// Invalidate the cached texture (and anything it was built from).
    fn mark_dirty(&mut self) {
        self.base_mut().mark_dirty();
    }

    /// Rebuild the texture if dirty. The flag is cleared even when the rebuild fails; resource
    /// failures leave the widget without a texture instead of failing the frame.
    fn refresh(&mut self, ctx: &mut DrawContext<'_>) -> SceneryResult<()> {
        if !self.base().is_dirty() {
            return Ok(());
        }
        let result = self.update_texture(ctx);
        let base = self.base_mut();
        base.update_needed = false;
        base.rebuilds += 1;
        match result {
            Ok(()) => {
                tracing::trace!(rebuilds = base.rebuilds, "widget texture rebuilt");
                Ok(())
            }
            Err(e) if e.is_resource() => {
                tracing::warn!(error = %e, "widget texture unavailable");
                base.texture = None;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Draw the widget into the current target.
    fn render(&mut self, ctx: &mut DrawContext<'_>) -> SceneryResult<()> {
        self.before_render(ctx)?;
        self.refresh(ctx)?;

        let Some(texture) = self.base().texture.clone() else {
            return Ok(());
        };

        let now = ctx.now();
        let base = self.base_mut();
        base.animation.apply(&mut base.transform, now);
        base.transform.apply(ctx.renderer(), &texture, base.rect)
    }
}

/// Shared, dynamically typed widget as held by scenes.
pub type WidgetHandle = Rc<RefCell<dyn Widget>>;

/// Wrap a widget for sharing with a scene.
pub fn share<W: Widget + 'static>(widget: W) -> Rc<RefCell<W>> {
    Rc::new(RefCell::new(widget))
}

/// Allocate a target texture of `size`, clear it to the background of `style` and let `draw`
/// fill it. The boundary outline, when enabled, goes on top.
///
/// The target is pushed for the duration of `draw` and restored on every exit path.
pub(crate) fn render_into_texture(
    ctx: &mut DrawContext<'_>,
    style: &WidgetBase,
    size: PixelSize,
    draw: impl FnOnce(&mut DrawContext<'_>) -> SceneryResult<()>,
) -> SceneryResult<Texture> {
    if size.is_empty() {
        return Err(SceneryError::resource(format!(
            "widget texture would be {}x{}",
            size.w, size.h
        )));
    }
    let texture = ctx.renderer().create_texture(
        PixelFormat::Rgba8Premul,
        TextureAccess::Target,
        size.w as u32,
        size.h as u32,
    )?;
    texture.set_blend_mode(BlendMode::Blend);

    let mut guard = ctx.push_target(&texture)?;
    guard.renderer().set_draw_color(style.bg);
    guard.renderer().clear()?;
    draw(&mut *guard)?;
    if style.boundary_box {
        let r = guard.renderer();
        r.set_draw_color(Color::GREEN);
        r.draw_rect(PixelRect::from_size(size))?;
    }
    guard.finish()?;
    Ok(texture)
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/widget.rs"]
mod tests;
