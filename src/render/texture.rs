use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::PixelSize;
use crate::foundation::error::{SceneryError, SceneryResult};
use crate::render::composite::PremulRgba8;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique texture identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Pixel layout of textures and surfaces. Only premultiplied RGBA8 is produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// Premultiplied RGBA, 8 bits per channel, row-major.
    #[default]
    Rgba8Premul,
}

/// How a texture may be used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureAccess {
    /// Uploaded once, only sampled.
    #[default]
    Static,
    /// Pixels rewritten by the application.
    Streaming,
    /// Usable as a render target.
    Target,
}

/// Blending applied when a texture is copied onto the current target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Covered destination pixels are replaced.
    None,
    /// Premultiplied source-over.
    #[default]
    Blend,
}

struct TextureInner {
    id: TextureId,
    format: PixelFormat,
    access: TextureAccess,
    blend: Cell<BlendMode>,
    pixmap: RefCell<vello_cpu::Pixmap>,
}

/// Shared handle to renderer pixels. Clones refer to the same texture.
///
/// Widgets replace their texture handle wholesale on rebuild, so a clone held elsewhere keeps the
/// pixels it was given.
#[derive(Clone)]
pub struct Texture {
    inner: Rc<TextureInner>,
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.inner.id)
            .field("size", &self.size())
            .field("access", &self.inner.access)
            .field("blend", &self.inner.blend.get())
            .finish()
    }
}

impl Texture {
    /// Allocate a transparent texture.
    pub fn new(
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> SceneryResult<Self> {
        let (w, h) = checked_dims(width, height)?;
        Ok(Self::from_pixmap(
            vello_cpu::Pixmap::new(w, h),
            format,
            access,
        ))
    }

    /// Wrap premultiplied RGBA8 bytes.
    pub fn from_premul_bytes(
        access: TextureAccess,
        width: u32,
        height: u32,
        bytes: &[u8],
    ) -> SceneryResult<Self> {
        let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
        Ok(Self::from_pixmap(pixmap, PixelFormat::Rgba8Premul, access))
    }

    pub(crate) fn from_pixmap(
        pixmap: vello_cpu::Pixmap,
        format: PixelFormat,
        access: TextureAccess,
    ) -> Self {
        Self {
            inner: Rc::new(TextureInner {
                id: TextureId(NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed)),
                format,
                access,
                blend: Cell::new(BlendMode::default()),
                pixmap: RefCell::new(pixmap),
            }),
        }
    }

    /// Identity shared by all clones.
    pub fn id(&self) -> TextureId {
        self.inner.id
    }

    /// True when both handles refer to the same texture.
    pub fn ptr_eq(&self, other: &Texture) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Size in pixels.
    pub fn size(&self) -> PixelSize {
        let p = self.inner.pixmap.borrow();
        PixelSize::new(i32::from(p.width()), i32::from(p.height()))
    }

    /// Pixel format.
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Access mode chosen at creation.
    pub fn access(&self) -> TextureAccess {
        self.inner.access
    }

    /// Current blend mode.
    pub fn blend_mode(&self) -> BlendMode {
        self.inner.blend.get()
    }

    /// Change how the texture blends when copied.
    pub fn set_blend_mode(&self, mode: BlendMode) {
        self.inner.blend.set(mode);
    }

    /// Read one premultiplied pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        let p = self.inner.pixmap.borrow();
        if x >= u32::from(p.width()) || y >= u32::from(p.height()) {
            return None;
        }
        let i = ((y as usize) * usize::from(p.width()) + x as usize) * 4;
        let d = p.data_as_u8_slice();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }

    /// Copy out all premultiplied pixels.
    pub fn to_premul_bytes(&self) -> Vec<u8> {
        self.inner.pixmap.borrow().data_as_u8_slice().to_vec()
    }

    pub(crate) fn pixmap(&self) -> Ref<'_, vello_cpu::Pixmap> {
        self.inner.pixmap.borrow()
    }

    pub(crate) fn pixmap_mut(&self) -> RefMut<'_, vello_cpu::Pixmap> {
        self.inner.pixmap.borrow_mut()
    }

    pub(crate) fn image_paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(self.pixmap().clone())),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        }
    }
}

/// CPU-side pixel buffer, produced by font rendering and image decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Wrap premultiplied RGBA8 bytes. Empty surfaces are a resource failure.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> SceneryResult<Self> {
        checked_dims(width, height)?;
        if data.len() != (width as usize) * (height as usize) * 4 {
            return Err(SceneryError::resource("surface byte len mismatch"));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_pixmap(pixmap: &vello_cpu::Pixmap) -> Self {
        Self {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }

    /// Size in pixels.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width as i32, self.height as i32)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one premultiplied pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

fn checked_dims(width: u32, height: u32) -> SceneryResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(SceneryError::resource(format!(
            "cannot allocate {width}x{height} pixels"
        )));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| SceneryError::resource("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SceneryError::resource("pixmap height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> SceneryResult<vello_cpu::Pixmap> {
    let (w, h) = checked_dims(width, height)?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(SceneryError::resource("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let opaque = bytes.chunks_exact(4).all(|px| px[3] == 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, !opaque,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
