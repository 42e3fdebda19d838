use std::ops::{Deref, DerefMut};
use std::time::Instant;

use crate::foundation::clock::Clock;
use crate::foundation::error::SceneryResult;
use crate::render::backend::Renderer;
use crate::render::texture::Texture;

/// Everything a widget needs while drawing one frame: the renderer, the frame clock and the
/// explicit render-target stack.
///
/// Targets are pushed with [`DrawContext::push_target`]; the returned guard restores the previous
/// target when dropped, so early returns and `?` leave the stack balanced.
pub struct DrawContext<'a> {
    renderer: &'a mut dyn Renderer,
    clock: &'a dyn Clock,
    targets: Vec<Texture>,
}

impl<'a> DrawContext<'a> {
    /// Context drawing into the renderer's backbuffer.
    pub fn new(renderer: &'a mut dyn Renderer, clock: &'a dyn Clock) -> Self {
        Self {
            renderer,
            clock,
            targets: Vec::new(),
        }
    }

    /// The underlying renderer.
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// Current time from the frame clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// The frame clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock
    }

    /// Number of pushed targets.
    pub fn depth(&self) -> usize {
        self.targets.len()
    }

    /// Innermost pushed target, `None` while drawing to the backbuffer.
    pub fn current_target(&self) -> Option<&Texture> {
        self.targets.last()
    }

    /// Redirect drawing into `texture` until the guard is dropped or finished.
    pub fn push_target(&mut self, texture: &Texture) -> SceneryResult<TargetGuard<'_, 'a>> {
        self.renderer.set_target(Some(texture))?;
        self.targets.push(texture.clone());
        Ok(TargetGuard {
            ctx: self,
            active: true,
        })
    }

    fn pop_target(&mut self) -> SceneryResult<()> {
        self.targets.pop();
        self.renderer.set_target(self.targets.last())
    }
}

/// Scope guard for one pushed render target. Dereferences to the [`DrawContext`].
pub struct TargetGuard<'c, 'a> {
    ctx: &'c mut DrawContext<'a>,
    active: bool,
}

impl TargetGuard<'_, '_> {
    /// Pop the target now and report whether restoring the previous one succeeded.
    pub fn finish(mut self) -> SceneryResult<()> {
        self.active = false;
        self.ctx.pop_target()
    }
}

impl<'a> Deref for TargetGuard<'_, 'a> {
    type Target = DrawContext<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl DerefMut for TargetGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl Drop for TargetGuard<'_, '_> {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Err(e) = self.ctx.pop_target() {
            tracing::warn!(error = %e, "failed to restore render target");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/target.rs"]
mod tests;
