use std::path::Path;
use std::time::Duration;

use super::*;
use crate::foundation::clock::ManualClock;
use crate::foundation::core::PixelRect;
use crate::render::mock::MockRenderer;
use crate::scene::events::{Key, ScriptedEvents};
use crate::text::font::Font;
use crate::widgets::image::Image;
use crate::widgets::widget::share;

fn picture() -> Texture {
    Texture::new(PixelFormat::Rgba8Premul, TextureAccess::Static, 8, 8).unwrap()
}

fn scene_with(
    renderer: MockRenderer,
    script: Vec<Vec<Event>>,
    config: SceneConfig,
) -> (Scene<MockRenderer>, ManualClock) {
    let clock = ManualClock::new();
    let scene = Scene::new(
        renderer,
        Box::new(ScriptedEvents::new(script)),
        Rc::new(clock.clone()),
        FontCache::new(),
        config,
    );
    (scene, clock)
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
    quit_on_key: bool,
    renders: u64,
}

impl SceneHandler for Recorder {
    fn on_input_event(&mut self, event: &Event, control: &mut SceneControl) {
        self.events.push(event.clone());
        if self.quit_on_key && matches!(event, Event::KeyDown(_)) {
            control.quit();
        }
    }

    fn on_render(&mut self, ctx: &mut DrawContext<'_>, widgets: &WidgetSet) -> SceneryResult<()> {
        self.renders += 1;
        widgets.render_visible(ctx);
        Ok(())
    }
}

#[test]
fn close_ends_the_loop_after_its_frame() {
    let (mut scene, _) = scene_with(
        MockRenderer::new(64, 64),
        vec![vec![], vec![]],
        SceneConfig::default(),
    );
    let mut handler = Recorder::default();
    let stats = scene.start(&mut handler).unwrap();
    assert_eq!(stats.frames, 3);
    assert_eq!(handler.renders, 3);
    assert_eq!(scene.renderer().count("present"), 3);
    assert_eq!(handler.events, vec![Event::WindowClose]);
}

#[test]
fn handler_quit_acts_like_close() {
    let (mut scene, _) = scene_with(
        MockRenderer::new(64, 64),
        vec![vec![], vec![Event::KeyDown(Key::Escape)], vec![], vec![]],
        SceneConfig::default(),
    );
    let mut handler = Recorder {
        quit_on_key: true,
        ..Recorder::default()
    };
    let stats = scene.start(&mut handler).unwrap();
    assert_eq!(stats.frames, 2);
}

#[test]
fn device_reset_rebuilds_every_widget() {
    let (mut scene, _) = scene_with(
        MockRenderer::new(64, 64),
        vec![
            vec![],
            vec![Event::RenderDeviceReset],
            vec![],
            vec![Event::RenderTargetsReset],
        ],
        SceneConfig::default(),
    );
    let a = share(Image::from_texture(picture()));
    let b = share(Image::from_texture(picture()));
    let (ha, hb): (WidgetHandle, WidgetHandle) = (a.clone(), b.clone());
    assert!(scene.add(&ha));
    assert!(scene.add(&hb));

    scene.start(&mut DefaultHandler).unwrap();
    assert_eq!(a.borrow().base().rebuilds(), 3);
    assert_eq!(b.borrow().base().rebuilds(), 3);
}

#[test]
fn add_and_remove_are_idempotent() {
    let mut set = WidgetSet::new();
    let w: WidgetHandle = share(Image::new());
    assert!(set.add(&w));
    assert!(!set.add(&w));
    assert_eq!(set.len(), 1);
    assert!(set.remove(&w));
    assert!(!set.remove(&w));
    assert!(set.is_empty());
}

#[test]
fn dropped_widgets_leave_the_set() {
    let mut set = WidgetSet::new();
    let kept: WidgetHandle = share(Image::new());
    {
        let dropped: WidgetHandle = share(Image::new());
        set.add(&dropped);
    }
    set.add(&kept);
    assert_eq!(set.len(), 1);
    assert_eq!(set.prune(), 1);
    assert_eq!(set.handles().count(), 1);
}

#[test]
fn hidden_widgets_are_skipped() {
    let (mut scene, _) = scene_with(MockRenderer::new(64, 64), vec![], SceneConfig::default());
    let img = share(Image::from_texture(picture()));
    img.borrow_mut().base_mut().set_visible(false);
    let h: WidgetHandle = img.clone();
    scene.add(&h);
    scene.start(&mut DefaultHandler).unwrap();
    assert_eq!(img.borrow().base().rebuilds(), 0);
    assert!(scene.renderer().copies.is_empty());
}

#[test]
fn fixed_pacing_sleeps_to_each_deadline() {
    let (mut scene, clock) = scene_with(
        MockRenderer::new(64, 64),
        vec![vec![]; 3],
        SceneConfig::default().with_fixed_fps(true, 40.0),
    );
    let start = clock.now();
    let stats = scene.start(&mut DefaultHandler).unwrap();
    assert_eq!(stats.frames, 4);
    assert_eq!(clock.now(), start + Duration::from_millis(25) * 4);
    assert!((stats.last_fps - 40.0).abs() < 1e-6);
    assert_eq!(scene.fps(), stats.last_fps);
}

#[test]
fn vsync_renderer_disables_software_pacing() {
    let mut renderer = MockRenderer::new(64, 64);
    renderer.vsync = true;
    let (mut scene, clock) = scene_with(renderer, vec![vec![]; 3], SceneConfig::default());
    let start = clock.now();
    scene.start(&mut DefaultHandler).unwrap();
    assert_eq!(clock.now(), start);
}

#[test]
fn virtual_screen_is_letterboxed_into_the_window() {
    let bg = Color::rgb(1, 2, 3);
    let vs_bg = Color::rgb(9, 9, 9);
    let config = SceneConfig::default()
        .with_background(bg)
        .with_virtual_screen(1024, 768, VirtualFit::Letterbox)
        .with_virtual_screen_background(vs_bg);
    let (mut scene, _) = scene_with(MockRenderer::new(800, 480), vec![], config);
    scene.start(&mut DefaultHandler).unwrap();

    let r = scene.renderer();
    assert_eq!(r.clears.len(), 2);
    assert_eq!(r.clears[0], (None, bg));
    assert!(r.clears[1].0.is_some());
    assert_eq!(r.clears[1].1, vs_bg);
    assert_eq!(r.copies.len(), 1);
    assert_eq!(r.copies[0].target, None);
    assert_eq!(r.copies[0].dst, Some(PixelRect::new(80, 0, 640, 480)));
    assert_eq!(r.current_target(), None);
}

#[test]
fn stretched_virtual_screen_fills_the_window() {
    let config = SceneConfig::default().with_virtual_screen(1024, 768, VirtualFit::Stretch);
    let (mut scene, _) = scene_with(MockRenderer::new(800, 480), vec![], config);
    scene.start(&mut DefaultHandler).unwrap();
    assert_eq!(
        scene.renderer().copies[0].dst,
        Some(PixelRect::new(0, 0, 800, 480))
    );
}

#[test]
fn zero_sized_virtual_screen_draws_directly() {
    let config = SceneConfig::default().with_virtual_screen(0, 768, VirtualFit::Letterbox);
    let (mut scene, _) = scene_with(MockRenderer::new(800, 480), vec![], config);
    scene.start(&mut DefaultHandler).unwrap();
    let r = scene.renderer();
    assert_eq!(r.count("set_target"), 0);
    assert_eq!(r.created, 0);
}

#[test]
fn fps_overlay_needs_its_font() {
    let (mut scene, _) = scene_with(
        MockRenderer::new(200, 100),
        vec![vec![]],
        SceneConfig::default().with_fps_display(true),
    );
    scene.start(&mut DefaultHandler).unwrap();
    assert!(scene.renderer().copies.is_empty());

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fonts/DejaVuSans.ttf");
    let font = Font::from_path(Path::new(path), 12.0).unwrap();
    let (mut scene, _) = scene_with(
        MockRenderer::new(200, 100),
        vec![vec![]],
        SceneConfig::default().with_fps_display(true),
    );
    assert!(scene.fonts_mut().insert("SCENE_FPS", font));
    scene.start(&mut DefaultHandler).unwrap();
    let to_window = scene
        .renderer()
        .copies
        .iter()
        .filter(|c| c.target.is_none())
        .count();
    assert_eq!(to_window, 2);
}
