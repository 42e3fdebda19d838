//! Scenery is a small real-time 2-D scene toolkit.
//!
//! - Widgets ([`Image`], [`Label`], [`Sprite`]) keep a lazily rebuilt texture and draw it through
//!   a [`Transform`] driven by a timed [`Animation`].
//! - A [`Scene`] runs the frame loop: input, clear, render hook, fixed-step pacing, FPS overlay,
//!   optional virtual screen (stretched or letterboxed), present.
//! - Drawing goes through the [`Renderer`] trait; [`CpuRenderer`] is the bundled headless backend.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Image decoding and sprite frame libraries.
pub mod assets;
/// Renderer trait, textures, render-target stack and the CPU backend.
pub mod render;
/// Scene loop and its configuration.
pub mod scene;
/// Fonts and text rasterization.
pub mod text;
/// Widgets, transforms and animations.
pub mod widgets;

pub use crate::foundation::clock::{Clock, ManualClock, SteadyClock};
pub use crate::foundation::core::{
    Affine, Color, PixelPoint, PixelRect, PixelSize, Point, Rect, Vec2, frame_period,
};
pub use crate::foundation::error::{SceneryError, SceneryResult};

pub use crate::assets::decode::{DecodedImage, decode_image, decode_path, decode_svg};
pub use crate::assets::sprites::{FrameList, SpriteLibrary};
pub use crate::render::backend::{Flip, FrameRGBA, Renderer, RendererInfo};
pub use crate::render::cpu::{CpuRenderer, CpuRendererOpts};
pub use crate::render::sink::{InMemorySink, PngSequenceSink, PresentSink, write_png};
pub use crate::render::target::{DrawContext, TargetGuard};
pub use crate::render::texture::{
    BlendMode, PixelFormat, Surface, Texture, TextureAccess, TextureId,
};
pub use crate::scene::config::{SceneConfig, VirtualFit, VirtualScreenConfig};
pub use crate::scene::events::{Event, EventQueue, EventSender, EventSource, Key, ScriptedEvents};
pub use crate::scene::pacing::{FpsMeter, FramePacer};
pub use crate::scene::scene::{
    DefaultHandler, RunStats, Scene, SceneControl, SceneHandler, WidgetSet,
};
pub use crate::scene::virtual_screen::{composite_rect, letterbox};
pub use crate::text::font::{Font, TextMode};
pub use crate::text::fonts::FontCache;
pub use crate::widgets::animation::{Animation, StartOutcome, Step};
pub use crate::widgets::image::Image;
pub use crate::widgets::label::Label;
pub use crate::widgets::sprite::Sprite;
pub use crate::widgets::transform::Transform;
pub use crate::widgets::widget::{
    FitMode, HAlign, VAlign, Widget, WidgetBase, WidgetHandle, align_content, share,
};
