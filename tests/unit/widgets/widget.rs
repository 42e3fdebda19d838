use std::time::Duration;

use super::*;
use crate::foundation::clock::ManualClock;
use crate::render::mock::MockRenderer;
use crate::widgets::animation::Step;

#[derive(Default)]
struct Swatch {
    base: WidgetBase,
    builds: usize,
}

impl Widget for Swatch {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update_texture(&mut self, ctx: &mut DrawContext<'_>) -> SceneryResult<()> {
        self.builds += 1;
        let size = self.base.size();
        let texture = render_into_texture(ctx, &self.base, size, |_| Ok(()))?;
        self.base.set_texture(Some(texture));
        Ok(())
    }
}

fn swatch(w: i32, h: i32) -> Swatch {
    let mut s = Swatch::default();
    s.base.set_size(PixelSize::new(w, h));
    s
}

#[test]
fn alignment_matches_box_arithmetic() {
    let boxed = PixelSize::new(100, 50);
    let content = PixelSize::new(30, 20);
    let r = align_content(boxed, content, HAlign::Right, VAlign::Bottom);
    assert_eq!((r.x, r.y), (70, 30));
    let c = align_content(boxed, content, HAlign::Center, VAlign::Center);
    assert_eq!((c.x, c.y), (35, 15));
    let l = align_content(boxed, content, HAlign::Left, VAlign::Top);
    assert_eq!((l.x, l.y), (0, 0));

    let over = align_content(PixelSize::new(10, 10), PixelSize::new(30, 16), HAlign::Right, VAlign::Center);
    assert_eq!((over.x, over.y), (-20, -3));
    assert_eq!(over.size(), PixelSize::new(30, 16));
}

#[test]
fn defaults_match_a_fresh_widget() {
    let b = WidgetBase::new();
    assert!(b.is_visible() && b.autosize() && b.is_dirty());
    assert_eq!(b.background(), Color::TRANSPARENT);
    assert_eq!((b.halign(), b.valign()), (HAlign::Center, VAlign::Center));
    assert_eq!(b.fit_mode(), FitMode::Fit);
    assert!(b.texture().is_none());
}

#[test]
fn render_twice_rebuilds_once_and_equal_setters_stay_clean() {
    let mut r = MockRenderer::new(64, 64);
    let clock = ManualClock::new();
    let mut w = swatch(8, 4);
    {
        let mut ctx = DrawContext::new(&mut r, &clock);
        w.render(&mut ctx).unwrap();
        w.render(&mut ctx).unwrap();
    }
    assert_eq!(w.builds, 1);
    assert_eq!(w.base.rebuilds(), 1);

    w.base.set_size(PixelSize::new(8, 4));
    w.base.set_background(Color::TRANSPARENT);
    w.base.set_alignment(HAlign::Center, VAlign::Center);
    w.base.set_position(PixelPoint::new(40, 2));
    assert!(!w.base.is_dirty());

    w.base.set_background(Color::WHITE);
    w.base.set_background(Color::WHITE);
    {
        let mut ctx = DrawContext::new(&mut r, &clock);
        w.render(&mut ctx).unwrap();
    }
    assert_eq!(w.builds, 2);
    assert_eq!(r.copies.last().unwrap().dst, Some(PixelRect::new(40, 2, 8, 4)));
}

#[test]
fn rebuild_uses_the_target_stack_and_restores_it() {
    let mut r = MockRenderer::new(64, 64);
    let clock = ManualClock::new();
    let mut w = swatch(8, 4);
    w.base.set_background(Color::rgb(1, 2, 3));
    {
        let mut ctx = DrawContext::new(&mut r, &clock);
        w.render(&mut ctx).unwrap();
        assert_eq!(ctx.depth(), 0);
    }
    let tex = w.base.texture().unwrap().id();
    assert_eq!(r.target_history, vec![Some(tex), None]);
    assert_eq!(r.clears, vec![(Some(tex), Color::rgb(1, 2, 3))]);
    assert_eq!(r.copies.len(), 1);
    assert_eq!(r.copies[0].target, None);
}

#[test]
fn failed_rebuild_clears_flag_and_draws_nothing() {
    let mut r = MockRenderer::new(64, 64);
    r.fail_create = true;
    let clock = ManualClock::new();
    let mut w = swatch(8, 4);
    {
        let mut ctx = DrawContext::new(&mut r, &clock);
        w.render(&mut ctx).unwrap();
        w.render(&mut ctx).unwrap();
    }
    assert!(!w.base.is_dirty());
    assert!(w.base.texture().is_none());
    assert_eq!(w.builds, 1);
    assert!(r.copies.is_empty());
}

#[test]
fn zero_sized_widget_has_no_texture() {
    let mut r = MockRenderer::new(64, 64);
    let clock = ManualClock::new();
    let mut w = swatch(0, 10);
    let mut ctx = DrawContext::new(&mut r, &clock);
    w.render(&mut ctx).unwrap();
    assert!(w.base.texture().is_none());
}

#[test]
fn boundary_box_is_drawn_once_when_the_texture_is_built() {
    let mut r = MockRenderer::new(64, 64);
    let clock = ManualClock::new();
    let mut w = swatch(8, 4);
    w.base.set_boundary_box(true);
    {
        let mut ctx = DrawContext::new(&mut r, &clock);
        w.render(&mut ctx).unwrap();
        w.render(&mut ctx).unwrap();
    }
    assert_eq!(w.builds, 1);
    let tex = w.base.texture().unwrap().id();
    assert_eq!(
        r.rects,
        vec![(Some(tex), PixelRect::new(0, 0, 8, 4), Color::GREEN)]
    );
    assert_eq!(r.current_target(), None);
}

#[test]
fn animation_scales_the_destination_over_time() {
    let mut r = MockRenderer::new(64, 64);
    let clock = ManualClock::new();
    let mut w = swatch(10, 10);
    w.base
        .animation
        .push_step(Step::new(Duration::from_millis(100)).scale_to(2.0));
    w.base.animation.start();
    {
        let mut ctx = DrawContext::new(&mut r, &clock);
        w.render(&mut ctx).unwrap();
        clock.advance(Duration::from_millis(50));
        w.render(&mut ctx).unwrap();
        clock.advance(Duration::from_millis(50));
        w.render(&mut ctx).unwrap();
    }
    let sizes: Vec<_> = r.copies.iter().map(|c| c.dst.unwrap().size()).collect();
    assert_eq!(
        sizes,
        vec![
            PixelSize::new(10, 10),
            PixelSize::new(15, 15),
            PixelSize::new(20, 20)
        ]
    );
}
