use crate::foundation::core::{PixelPoint, PixelRect, PixelSize};
use crate::scene::config::VirtualFit;

/// Largest rectangle with the aspect ratio of `virtual_size` that fits `output`, centered.
///
/// Ratios are compared by cross-multiplication, so equal ratios give exactly the full output.
/// Returns `None` when either size is empty.
pub fn letterbox(virtual_size: PixelSize, output: PixelSize) -> Option<PixelRect> {
    if virtual_size.is_empty() || output.is_empty() {
        return None;
    }
    let (vw, vh) = (i64::from(virtual_size.w), i64::from(virtual_size.h));
    let (ow, oh) = (i64::from(output.w), i64::from(output.h));

    let rect = if vw * oh >= ow * vh {
        // Virtual screen is wider: width is the constraint.
        let h = (ow * vh / vw) as i32;
        PixelRect::new(0, (output.h - h) / 2, output.w, h)
    } else {
        let w = (oh * vw / vh) as i32;
        PixelRect::new((output.w - w) / 2, 0, w, output.h)
    };
    Some(rect)
}

/// Destination of the virtual screen in the window for `fit`.
pub fn composite_rect(
    fit: VirtualFit,
    virtual_size: PixelSize,
    output: PixelSize,
) -> Option<PixelRect> {
    match fit {
        VirtualFit::Stretch if !output.is_empty() => Some(PixelRect::from_size(output)),
        VirtualFit::Stretch => None,
        VirtualFit::Letterbox => letterbox(virtual_size, output),
    }
}

/// Map a window position to virtual-screen coordinates, `None` outside the composited area.
pub fn window_to_virtual(
    dst: PixelRect,
    virtual_size: PixelSize,
    p: PixelPoint,
) -> Option<PixelPoint> {
    if dst.is_empty()
        || p.x < dst.x
        || p.y < dst.y
        || p.x >= dst.x + dst.w
        || p.y >= dst.y + dst.h
    {
        return None;
    }
    let x = i64::from(p.x - dst.x) * i64::from(virtual_size.w) / i64::from(dst.w);
    let y = i64::from(p.y - dst.y) * i64::from(virtual_size.h) / i64::from(dst.h);
    Some(PixelPoint::new(x as i32, y as i32))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/virtual_screen.rs"]
mod tests;
