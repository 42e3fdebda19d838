use crate::foundation::core::{PixelPoint, PixelRect};
use crate::foundation::error::SceneryResult;
use crate::render::backend::{Flip, Renderer};
use crate::render::texture::Texture;

/// Scaling, rotation and mirroring applied when a widget's cached texture is drawn.
///
/// The transform never touches widget content; it only shapes the final copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    scaling: f32,
    rotation: f64,
    center: Option<PixelPoint>,
    flip: Flip,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scaling: 1.0,
            rotation: 0.0,
            center: None,
            flip: Flip::None,
        }
    }
}

impl Transform {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to identity.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scale factor, 1.0 is identity.
    pub fn scaling(&self) -> f32 {
        self.scaling
    }

    /// Set the scale factor.
    pub fn set_scaling(&mut self, scaling: f32) {
        self.scaling = scaling;
    }

    /// Clockwise rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set the clockwise rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    /// Rotation center relative to the destination rectangle, `None` for its middle.
    pub fn center(&self) -> Option<PixelPoint> {
        self.center
    }

    /// Set the rotation center.
    pub fn set_center(&mut self, center: Option<PixelPoint>) {
        self.center = center;
    }

    /// Mirroring.
    pub fn flip(&self) -> Flip {
        self.flip
    }

    /// Set the mirroring.
    pub fn set_flip(&mut self, flip: Flip) {
        self.flip = flip;
    }

    /// Destination of a widget at `rect`: same top-left corner, size scaled and truncated.
    pub fn destination(&self, rect: PixelRect) -> PixelRect {
        let w = (rect.w as f32 * self.scaling) as i32;
        let h = (rect.h as f32 * self.scaling) as i32;
        PixelRect::new(rect.x, rect.y, w, h)
    }

    /// Draw `texture` for a widget placed at `rect` into the current target.
    pub fn apply(
        &self,
        renderer: &mut dyn Renderer,
        texture: &Texture,
        rect: PixelRect,
    ) -> SceneryResult<()> {
        renderer.copy_ex(
            texture,
            None,
            Some(self.destination(rect)),
            self.rotation,
            self.center,
            self.flip,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/transform.rs"]
mod tests;
