use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::foundation::core::frame_period;
use crate::foundation::error::SceneryResult;
use crate::render::target::DrawContext;
use crate::widgets::image::Image;
use crate::widgets::widget::{Widget, WidgetBase};

/// Frame rate a new sprite advances at.
pub const DEFAULT_SPRITE_FPS: f64 = 30.0;

/// Widget cycling through frame sequences at a fixed rate.
///
/// Each animation id owns its frames as [`Image`] widgets; the sprite mirrors its visual settings
/// onto all of them whenever its own style changes, and shows the current frame's texture.
/// Frame advance runs on its own clock and is independent of [`Animation`](super::animation::Animation).
#[derive(Debug)]
pub struct Sprite {
    base: WidgetBase,
    fps: f64,
    period: Option<Duration>,
    next_tick: Option<Instant>,
    animations: HashMap<i32, Vec<(u32, Image)>>,
    current: Option<(i32, usize)>,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            base: WidgetBase::new(),
            fps: DEFAULT_SPRITE_FPS,
            period: frame_period(DEFAULT_SPRITE_FPS),
            next_tick: None,
            animations: HashMap::new(),
            current: None,
        }
    }
}

impl Sprite {
    /// Sprite without animations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a frame sequence under `id`. Frames are shown in the given order.
    ///
    /// Returns `false` when `id` is taken or `frames` is empty. The first animation added becomes
    /// the current one.
    pub fn add_animation(&mut self, id: i32, frames: &[(u32, Image)]) -> bool {
        if frames.is_empty() || self.animations.contains_key(&id) {
            return false;
        }
        let frames = frames
            .iter()
            .map(|(n, img)| {
                let mut frame = img.duplicate();
                frame.base_mut().inherit_style(&self.base);
                (*n, frame)
            })
            .collect();
        self.animations.insert(id, frames);
        if self.current.is_none() {
            self.current = Some((id, 0));
        }
        self.mark_dirty();
        true
    }

    /// Switch to animation `id`, starting at its first frame. The frame clock keeps running.
    pub fn set_animation(&mut self, id: i32) -> bool {
        if !self.animations.contains_key(&id) {
            return false;
        }
        self.current = Some((id, 0));
        true
    }

    /// Change the frame rate and schedule the next tick one period after `now`.
    /// A non-positive rate freezes the sprite on its current frame.
    pub fn set_framerate(&mut self, fps: f64, now: Instant) {
        self.fps = fps;
        self.period = frame_period(fps);
        self.next_tick = self.period.map(|period| now + period);
    }

    /// Frames per second.
    pub fn framerate(&self) -> f64 {
        self.fps
    }

    /// Active animation id.
    pub fn current_animation(&self) -> Option<i32> {
        self.current.map(|(id, _)| id)
    }

    /// Frame number of the shown frame, as registered.
    pub fn current_frame(&self) -> Option<u32> {
        let (id, cursor) = self.current?;
        self.animations.get(&id)?.get(cursor).map(|(n, _)| *n)
    }

    /// Registered animation ids, ascending.
    pub fn animation_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.animations.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn advance(&mut self) {
        let Some((id, cursor)) = self.current else {
            return;
        };
        let len = self.animations.get(&id).map_or(0, Vec::len);
        if len > 0 {
            self.current = Some((id, (cursor + 1) % len));
        }
    }

    fn propagate_style(&mut self) {
        for frames in self.animations.values_mut() {
            for (_, frame) in frames {
                frame.base_mut().inherit_style(&self.base);
            }
        }
    }

    fn show_current(&mut self, ctx: &mut DrawContext<'_>) -> SceneryResult<()> {
        let frame = self
            .current
            .and_then(|(id, cursor)| self.animations.get_mut(&id)?.get_mut(cursor));
        let Some((_, frame)) = frame else {
            self.base.set_texture(None);
            return Ok(());
        };
        frame.refresh(ctx)?;
        let texture = frame.base().texture().cloned();
        if texture.is_none() {
            self.base.set_content_size(frame.base().rect().size());
        }
        self.base.set_texture(texture);
        Ok(())
    }
}

impl Widget for Sprite {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update_texture(&mut self, ctx: &mut DrawContext<'_>) -> SceneryResult<()> {
        self.propagate_style();
        self.show_current(ctx)
    }

    fn before_render(&mut self, ctx: &mut DrawContext<'_>) -> SceneryResult<()> {
        // Frames must carry the new style before the current one is refreshed below.
        if self.base.is_dirty() {
            self.propagate_style();
        }
        let Some(period) = self.period else {
            return self.show_current(ctx);
        };
        let now = ctx.now();
        match self.next_tick {
            None => self.next_tick = Some(now + period),
            Some(next) if now >= next => {
                self.advance();
                self.next_tick = Some(now + period);
            }
            Some(_) => {}
        }
        self.show_current(ctx)
    }

    fn mark_dirty(&mut self) {
        self.base.mark_dirty();
        for frames in self.animations.values_mut() {
            for (_, frame) in frames {
                frame.mark_dirty();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/sprite.rs"]
mod tests;
