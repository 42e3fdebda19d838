use crate::foundation::core::{Affine, Color, PixelPoint, PixelRect, PixelSize, Vec2};
use crate::foundation::error::{SceneryError, SceneryResult};
use crate::render::backend::{Flip, FrameRGBA, Renderer, RendererInfo};
use crate::render::composite::{
    PremulRgba8, over, over_in_place, replace, replace_in_place,
};
use crate::render::sink::PresentSink;
use crate::render::texture::{BlendMode, Texture};

/// Options for [`CpuRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuRendererOpts {
    /// Report presentation as display-synchronized, which turns off software pacing in scenes.
    pub vsync: bool,
}

/// Headless software renderer on `vello_cpu` pixmaps.
///
/// Primitives are written directly into the bound pixmap. Texture copies are rasterized with a
/// `vello_cpu` image paint into scratch space and then composited according to the texture's
/// [`BlendMode`].
pub struct CpuRenderer {
    opts: CpuRendererOpts,
    backbuffer: vello_cpu::Pixmap,
    target: Option<Texture>,
    draw_color: Color,
    blend: BlendMode,
    ctx: Option<vello_cpu::RenderContext>,
    last_frame: Option<FrameRGBA>,
    present_count: u64,
    sink: Option<Box<dyn PresentSink>>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("width", &self.backbuffer.width())
            .field("height", &self.backbuffer.height())
            .field("vsync", &self.opts.vsync)
            .field("present_count", &self.present_count)
            .finish()
    }
}

impl CpuRenderer {
    /// Renderer with a `width` x `height` backbuffer.
    pub fn new(width: u32, height: u32, opts: CpuRendererOpts) -> SceneryResult<Self> {
        Ok(Self {
            opts,
            backbuffer: new_pixmap(width, height)?,
            target: None,
            draw_color: Color::BLACK,
            blend: BlendMode::None,
            ctx: None,
            last_frame: None,
            present_count: 0,
            sink: None,
        })
    }

    /// Forward every presented frame to `sink`.
    pub fn with_sink(mut self, sink: Box<dyn PresentSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Change the output size, as a window resize would. Backbuffer contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> SceneryResult<()> {
        self.backbuffer = new_pixmap(width, height)?;
        Ok(())
    }

    /// Last presented frame, premultiplied.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.last_frame.as_ref()
    }

    /// Number of `present` calls so far.
    pub fn present_count(&self) -> u64 {
        self.present_count
    }

    /// Read one premultiplied backbuffer pixel.
    pub fn backbuffer_pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        pixel_at(&self.backbuffer, x, y)
    }

    fn with_target_pixels<R>(&mut self, f: impl FnOnce(&mut vello_cpu::Pixmap) -> R) -> R {
        match &self.target {
            Some(t) => f(&mut t.pixmap_mut()),
            None => f(&mut self.backbuffer),
        }
    }

    fn target_size(&self) -> (u16, u16) {
        match &self.target {
            Some(t) => {
                let p = t.pixmap();
                (p.width(), p.height())
            }
            None => (self.backbuffer.width(), self.backbuffer.height()),
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> R,
    ) -> R {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx);
        self.ctx = Some(ctx);
        out
    }

    fn plot(&mut self, x: i32, y: i32) {
        let color = self.draw_color.to_premul();
        let blend = self.blend;
        self.with_target_pixels(|p| {
            blend_rect(p, PixelRect::new(x, y, 1, 1), color, blend);
        });
    }
}

impl Renderer for CpuRenderer {
    fn info(&self) -> RendererInfo {
        RendererInfo {
            name: "vello_cpu",
            vsync: self.opts.vsync,
            target_texture: true,
        }
    }

    fn output_size(&self) -> SceneryResult<PixelSize> {
        Ok(PixelSize::new(
            i32::from(self.backbuffer.width()),
            i32::from(self.backbuffer.height()),
        ))
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn draw_color(&self) -> Color {
        self.draw_color
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn clear(&mut self) -> SceneryResult<()> {
        let rgba = self.draw_color.to_premul();
        self.with_target_pixels(|p| {
            for px in p.data_as_u8_slice_mut().chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        });
        Ok(())
    }

    fn present(&mut self) -> SceneryResult<()> {
        let frame = FrameRGBA {
            width: u32::from(self.backbuffer.width()),
            height: u32::from(self.backbuffer.height()),
            data: self.backbuffer.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        if let Some(sink) = self.sink.as_mut() {
            sink.push_frame(self.present_count, &frame)?;
        }
        self.present_count += 1;
        self.last_frame = Some(frame);
        Ok(())
    }

    fn set_target(&mut self, target: Option<&Texture>) -> SceneryResult<()> {
        self.target = target.cloned();
        Ok(())
    }

    fn draw_point(&mut self, p: PixelPoint) -> SceneryResult<()> {
        self.plot(p.x, p.y);
        Ok(())
    }

    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint) -> SceneryResult<()> {
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: PixelRect) -> SceneryResult<()> {
        if rect.is_empty() {
            return Ok(());
        }
        let color = self.draw_color.to_premul();
        let blend = self.blend;
        let PixelRect { x, y, w, h } = rect;
        self.with_target_pixels(|p| {
            blend_rect(p, PixelRect::new(x, y, w, 1), color, blend);
            if h > 1 {
                blend_rect(p, PixelRect::new(x, y + h - 1, w, 1), color, blend);
            }
            if h > 2 {
                blend_rect(p, PixelRect::new(x, y + 1, 1, h - 2), color, blend);
                if w > 1 {
                    blend_rect(p, PixelRect::new(x + w - 1, y + 1, 1, h - 2), color, blend);
                }
            }
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Option<PixelRect>) -> SceneryResult<()> {
        let color = self.draw_color.to_premul();
        let blend = self.blend;
        let (tw, th) = self.target_size();
        let rect = rect.unwrap_or(PixelRect::new(0, 0, i32::from(tw), i32::from(th)));
        self.with_target_pixels(|p| blend_rect(p, rect, color, blend));
        Ok(())
    }

    fn copy_ex(
        &mut self,
        texture: &Texture,
        src: Option<PixelRect>,
        dst: Option<PixelRect>,
        angle: f64,
        center: Option<PixelPoint>,
        flip: Flip,
    ) -> SceneryResult<()> {
        if self.target.as_ref().is_some_and(|t| t.ptr_eq(texture)) {
            return Err(SceneryError::render("cannot copy a texture onto itself"));
        }

        let tex_size = texture.size();
        let src = match src {
            Some(r) => clip_to(r, tex_size),
            None => PixelRect::from_size(tex_size),
        };
        let (tw, th) = self.target_size();
        let dst = dst.unwrap_or(PixelRect::new(0, 0, i32::from(tw), i32::from(th)));
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }

        let xf = copy_transform(src, dst, angle, center, flip);
        let src_rect = src.to_rect();
        let paint = texture.image_paint();
        let mode = texture.blend_mode();

        let mut scratch = vello_cpu::Pixmap::new(tw, th);
        let mut coverage = match mode {
            BlendMode::Blend => None,
            BlendMode::None => Some(vello_cpu::Pixmap::new(tw, th)),
        };
        self.with_ctx_mut(tw, th, |ctx| {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(affine_to_cpu(xf));
            ctx.set_paint(paint);
            ctx.fill_rect(&rect_to_cpu(src_rect));
            ctx.flush();
            ctx.render_to_pixmap(&mut scratch);
        });
        if let Some(mask) = coverage.as_mut() {
            self.with_ctx_mut(tw, th, |ctx| {
                ctx.set_transform(affine_to_cpu(xf));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
                ctx.fill_rect(&rect_to_cpu(src_rect));
                ctx.flush();
                ctx.render_to_pixmap(mask);
            });
        }

        self.with_target_pixels(|p| match coverage {
            None => over_in_place(p.data_as_u8_slice_mut(), scratch.data_as_u8_slice(), 1.0),
            Some(mask) => {
                let alpha: Vec<u8> = mask
                    .data_as_u8_slice()
                    .chunks_exact(4)
                    .map(|px| px[3])
                    .collect();
                replace_in_place(
                    p.data_as_u8_slice_mut(),
                    scratch.data_as_u8_slice(),
                    &alpha,
                )
            }
        })
    }
}

/// Affine mapping texture space onto the target for one `copy_ex`.
///
/// Order: scale `src` onto a `dst`-sized box, mirror inside the box, rotate about `center`, then
/// move the box to `dst`.
pub(crate) fn copy_transform(
    src: PixelRect,
    dst: PixelRect,
    angle: f64,
    center: Option<PixelPoint>,
    flip: Flip,
) -> Affine {
    let (dw, dh) = (f64::from(dst.w), f64::from(dst.h));
    let sx = dw / f64::from(src.w);
    let sy = dh / f64::from(src.h);

    let to_box = Affine::scale_non_uniform(sx, sy)
        * Affine::translate(Vec2::new(-f64::from(src.x), -f64::from(src.y)));
    let mirror = Affine::new([
        if flip.horizontal() { -1.0 } else { 1.0 },
        0.0,
        0.0,
        if flip.vertical() { -1.0 } else { 1.0 },
        if flip.horizontal() { dw } else { 0.0 },
        if flip.vertical() { dh } else { 0.0 },
    ]);
    let c = match center {
        Some(p) => Vec2::new(f64::from(p.x), f64::from(p.y)),
        None => Vec2::new(dw / 2.0, dh / 2.0),
    };
    let rotate = if angle == 0.0 {
        Affine::IDENTITY
    } else {
        Affine::translate(c) * Affine::rotate(angle.to_radians()) * Affine::translate(-c)
    };
    Affine::translate(Vec2::new(f64::from(dst.x), f64::from(dst.y))) * rotate * mirror * to_box
}

fn blend_rect(pixmap: &mut vello_cpu::Pixmap, rect: PixelRect, color: PremulRgba8, blend: BlendMode) {
    let width = i32::from(pixmap.width());
    let height = i32::from(pixmap.height());
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.x.saturating_add(rect.w).min(width);
    let y1 = rect.y.saturating_add(rect.h).min(height);
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let stride = width as usize * 4;
    let data = pixmap.data_as_u8_slice_mut();
    for y in y0..y1 {
        let row = y as usize * stride;
        for x in x0..x1 {
            let i = row + x as usize * 4;
            let d = [data[i], data[i + 1], data[i + 2], data[i + 3]];
            let out = match blend {
                BlendMode::Blend => over(d, color, 1.0),
                BlendMode::None => replace(d, color, 255),
            };
            data[i..i + 4].copy_from_slice(&out);
        }
    }
}

fn clip_to(r: PixelRect, size: PixelSize) -> PixelRect {
    let x0 = r.x.clamp(0, size.w);
    let y0 = r.y.clamp(0, size.h);
    let x1 = r.x.saturating_add(r.w).clamp(0, size.w);
    let y1 = r.y.saturating_add(r.h).clamp(0, size.h);
    PixelRect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
}

fn pixel_at(p: &vello_cpu::Pixmap, x: u32, y: u32) -> Option<PremulRgba8> {
    if x >= u32::from(p.width()) || y >= u32::from(p.height()) {
        return None;
    }
    let i = ((y as usize) * usize::from(p.width()) + x as usize) * 4;
    let d = p.data_as_u8_slice();
    Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
}

fn new_pixmap(width: u32, height: u32) -> SceneryResult<vello_cpu::Pixmap> {
    if width == 0 || height == 0 {
        return Err(SceneryError::resource(format!(
            "cannot allocate a {width}x{height} backbuffer"
        )));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| SceneryError::resource("backbuffer width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SceneryError::resource("backbuffer height exceeds u16"))?;
    Ok(vello_cpu::Pixmap::new(w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: crate::foundation::core::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
