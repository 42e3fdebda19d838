use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::foundation::clock::Clock;
use crate::foundation::core::{Color, PixelPoint, PixelSize, frame_period};
use crate::foundation::error::SceneryResult;
use crate::render::backend::Renderer;
use crate::render::target::DrawContext;
use crate::render::texture::{BlendMode, PixelFormat, Texture, TextureAccess};
use crate::scene::config::{SceneConfig, VirtualFit};
use crate::scene::events::{Event, EventSource};
use crate::scene::pacing::{FpsMeter, FramePacer, format_fps};
use crate::scene::virtual_screen::composite_rect;
use crate::text::fonts::FontCache;
use crate::widgets::label::Label;
use crate::widgets::widget::{Widget, WidgetHandle};

/// Widgets observed by a scene, in insertion order.
///
/// Entries are weak: dropping the last strong handle removes a widget from the scene at the next
/// frame without any deregistration call.
#[derive(Default)]
pub struct WidgetSet {
    entries: Vec<Weak<RefCell<dyn Widget>>>,
}

impl std::fmt::Debug for WidgetSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetSet")
            .field("entries", &self.entries.len())
            .field("live", &self.len())
            .finish()
    }
}

impl WidgetSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `widget`. Returns false when it is already present.
    pub fn add(&mut self, widget: &WidgetHandle) -> bool {
        if self.contains(widget) {
            return false;
        }
        self.entries.push(Rc::downgrade(widget));
        true
    }

    /// Remove `widget`. Returns false when it was not present.
    pub fn remove(&mut self, widget: &WidgetHandle) -> bool {
        let before = self.entries.len();
        let target = Rc::downgrade(widget);
        self.entries.retain(|w| !w.ptr_eq(&target));
        self.entries.len() != before
    }

    /// Whether `widget` is present.
    pub fn contains(&self, widget: &WidgetHandle) -> bool {
        let target = Rc::downgrade(widget);
        self.entries.iter().any(|w| w.ptr_eq(&target))
    }

    /// Number of widgets still alive.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|w| w.strong_count() > 0).count()
    }

    /// Whether no live widget is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries whose widget is gone. Returns how many were dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|w| w.strong_count() > 0);
        before - self.entries.len()
    }

    /// Live widgets in insertion order.
    pub fn handles(&self) -> impl Iterator<Item = WidgetHandle> + '_ {
        self.entries.iter().filter_map(Weak::upgrade)
    }

    /// Invalidate every cached texture.
    pub fn mark_all_dirty(&self) {
        for handle in self.handles() {
            match handle.try_borrow_mut() {
                Ok(mut w) => w.mark_dirty(),
                Err(_) => tracing::warn!("widget busy, cannot mark dirty"),
            }
        }
    }

    /// Render every visible widget. Failures are logged per widget and do not stop the others.
    pub fn render_visible(&self, ctx: &mut DrawContext<'_>) {
        for handle in self.handles() {
            let Ok(mut w) = handle.try_borrow_mut() else {
                tracing::warn!("widget busy, skipped this frame");
                continue;
            };
            if !w.base().is_visible() {
                continue;
            }
            if let Err(e) = w.render(ctx) {
                tracing::warn!(error = %e, "widget render failed");
            }
        }
    }
}

/// Requests a handler can make while reacting to input.
#[derive(Debug, Default)]
pub struct SceneControl {
    quit: bool,
    frame: u64,
}

impl SceneControl {
    /// End the loop after the current frame, as a window close would.
    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Whether [`quit`](Self::quit) was called.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Index of the frame being prepared.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Application hooks called by [`Scene::start`].
pub trait SceneHandler {
    /// Called for every polled event, after the scene handled close and reset itself.
    fn on_input_event(&mut self, _event: &Event, _control: &mut SceneControl) {}

    /// Draw the frame. The default renders every visible widget in insertion order.
    fn on_render(&mut self, ctx: &mut DrawContext<'_>, widgets: &WidgetSet) -> SceneryResult<()> {
        widgets.render_visible(ctx);
        Ok(())
    }
}

/// Handler with the default hooks: ignores input, renders the widgets.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHandler;

impl SceneHandler for DefaultHandler {}

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStats {
    /// Frames presented, including the one during which close arrived.
    pub frames: u64,
    /// Last frame-rate measurement.
    pub last_fps: f64,
}

struct VirtualScreen {
    texture: Texture,
    size: PixelSize,
    fit: VirtualFit,
    background: Color,
}

struct FrameTools {
    pacer: FramePacer,
    meter: FpsMeter,
    fps_label: Option<Label>,
}

/// Frame loop over a renderer: input pump, clear, render hook, pacing, FPS overlay, optional
/// virtual screen, present.
pub struct Scene<R: Renderer> {
    renderer: R,
    events: Box<dyn EventSource>,
    clock: Rc<dyn Clock>,
    fonts: FontCache,
    config: SceneConfig,
    widgets: WidgetSet,
    fps: f64,
}

impl<R: Renderer> std::fmt::Debug for Scene<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("renderer", &self.renderer.info())
            .field("config", &self.config)
            .field("widgets", &self.widgets)
            .field("fps", &self.fps)
            .finish()
    }
}

impl<R: Renderer> Scene<R> {
    /// Scene drawing with `renderer`, fed by `events` and timed by `clock`.
    pub fn new(
        mut renderer: R,
        events: Box<dyn EventSource>,
        clock: Rc<dyn Clock>,
        fonts: FontCache,
        config: SceneConfig,
    ) -> Self {
        renderer.set_blend_mode(BlendMode::Blend);
        Self {
            renderer,
            events,
            clock,
            fonts,
            config,
            widgets: WidgetSet::new(),
            fps: 0.0,
        }
    }

    /// Settings. Only read by [`start`](Self::start).
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Settings, mutably. Changes made while running are not picked up.
    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    /// Observed widgets.
    pub fn widgets(&self) -> &WidgetSet {
        &self.widgets
    }

    /// Observed widgets, mutably.
    pub fn widgets_mut(&mut self) -> &mut WidgetSet {
        &mut self.widgets
    }

    /// Observe `widget`. Returns false when already observed.
    pub fn add(&mut self, widget: &WidgetHandle) -> bool {
        self.widgets.add(widget)
    }

    /// Stop observing `widget`. Returns false when it was not observed.
    pub fn remove(&mut self, widget: &WidgetHandle) -> bool {
        self.widgets.remove(widget)
    }

    /// Fonts, including the FPS overlay font.
    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    /// Fonts, mutably.
    pub fn fonts_mut(&mut self) -> &mut FontCache {
        &mut self.fonts
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably, for loading textures before the loop starts.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Give the renderer back.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Last measured frame rate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Run the frame loop until a close event (or [`SceneControl::quit`]).
    ///
    /// Frame failures are logged and the loop goes on; only setup errors are returned.
    #[tracing::instrument(level = "debug", skip_all, fields(renderer = self.renderer.info().name))]
    pub fn start(&mut self, handler: &mut dyn SceneHandler) -> SceneryResult<RunStats> {
        let info = self.renderer.info();
        let paced = self.config.fixed_fps && !info.vsync;
        if self.config.fixed_fps && info.vsync {
            tracing::debug!("renderer syncs to the display, software pacing off");
        }
        let period = if paced {
            frame_period(self.config.fps)
        } else {
            None
        };

        let virtual_screen = self.create_virtual_screen();
        let fps_label = if self.config.fps_display {
            self.fps_label()
        } else {
            None
        };

        let start = self.clock.now();
        let mut tools = FrameTools {
            pacer: FramePacer::new(start, period),
            meter: FpsMeter::new(start),
            fps_label,
        };
        tracing::debug!(
            ?period,
            virtual_screen = virtual_screen.is_some(),
            "scene loop started"
        );

        let mut stats = RunStats::default();
        let mut exit = false;
        while !exit {
            tools.pacer.advance();

            let mut control = SceneControl {
                quit: false,
                frame: stats.frames,
            };
            while let Some(event) = self.events.poll() {
                match &event {
                    Event::WindowClose => exit = true,
                    e if e.is_reset() => {
                        tracing::debug!(event = ?e, "render resources reset, rebuilding widgets");
                        self.widgets.mark_all_dirty();
                        if let Some(label) = &mut tools.fps_label {
                            label.mark_dirty();
                        }
                    }
                    _ => {}
                }
                handler.on_input_event(&event, &mut control);
            }
            exit |= control.quit;
            self.widgets.prune();

            let mut ctx = DrawContext::new(&mut self.renderer, &*self.clock);
            if let Err(e) = run_frame(
                &mut ctx,
                handler,
                &self.widgets,
                &self.config,
                virtual_screen.as_ref(),
                &mut tools,
            ) {
                tracing::warn!(error = %e, frame = stats.frames, "frame failed");
            }
            self.fps = tools.meter.fps();
            stats.frames += 1;
        }

        stats.last_fps = self.fps;
        tracing::debug!(frames = stats.frames, "scene loop stopped");
        Ok(stats)
    }

    fn create_virtual_screen(&mut self) -> Option<VirtualScreen> {
        let vs = self.config.virtual_screen?;
        if !vs.is_usable() {
            tracing::warn!(
                width = vs.width,
                height = vs.height,
                "virtual screen has no area, drawing to the window directly"
            );
            return None;
        }
        let texture = match self.renderer.create_texture(
            PixelFormat::Rgba8Premul,
            TextureAccess::Target,
            vs.width,
            vs.height,
        ) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(error = %e, "virtual screen unavailable");
                return None;
            }
        };
        texture.set_blend_mode(BlendMode::None);
        Some(VirtualScreen {
            texture,
            size: vs.size(),
            fit: vs.fit,
            background: vs.background,
        })
    }

    fn fps_label(&self) -> Option<Label> {
        let Some(font) = self.fonts.get(&self.config.fps_font) else {
            tracing::debug!(font = %self.config.fps_font, "no fps font, overlay off");
            return None;
        };
        let mut label = Label::with_text(format_fps(0.0), font);
        label.set_color(Color::GREEN);
        label.base_mut().set_position(PixelPoint::new(0, 0));
        Some(label)
    }
}

fn run_frame(
    ctx: &mut DrawContext<'_>,
    handler: &mut dyn SceneHandler,
    widgets: &WidgetSet,
    config: &SceneConfig,
    virtual_screen: Option<&VirtualScreen>,
    tools: &mut FrameTools,
) -> SceneryResult<()> {
    ctx.renderer().set_draw_color(config.background);
    ctx.renderer().clear()?;

    match virtual_screen {
        Some(vs) => {
            let mut guard = ctx.push_target(&vs.texture)?;
            guard.renderer().set_draw_color(vs.background);
            guard.renderer().clear()?;
            draw_content(&mut guard, handler, widgets, tools);
            guard.finish()?;

            let output = ctx.renderer().output_size()?;
            if let Some(dst) = composite_rect(vs.fit, vs.size, output) {
                ctx.renderer().copy(&vs.texture, None, Some(dst))?;
            }
        }
        None => draw_content(ctx, handler, widgets, tools),
    }

    ctx.renderer().present()
}

fn draw_content(
    ctx: &mut DrawContext<'_>,
    handler: &mut dyn SceneHandler,
    widgets: &WidgetSet,
    tools: &mut FrameTools,
) {
    if let Err(e) = handler.on_render(ctx, widgets) {
        tracing::warn!(error = %e, "scene render hook failed");
    }

    tools.pacer.wait(ctx.clock());
    let fps = tools.meter.sample(ctx.now());

    if let Some(label) = &mut tools.fps_label {
        label.set_text(format_fps(fps));
        if let Err(e) = label.render(ctx) {
            tracing::warn!(error = %e, "fps overlay failed");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
