use super::*;
use crate::foundation::clock::ManualClock;
use crate::render::mock::MockRenderer;
use crate::render::texture::{PixelFormat, TextureAccess};

fn target(w: u32, h: u32) -> Texture {
    Texture::new(PixelFormat::Rgba8Premul, TextureAccess::Target, w, h).unwrap()
}

#[test]
fn guard_restores_previous_target_on_drop() {
    let mut r = MockRenderer::new(64, 64);
    let clock = ManualClock::new();
    let outer = target(8, 8);
    let inner = target(4, 4);
    {
        let mut ctx = DrawContext::new(&mut r, &clock);
        {
            let mut g1 = ctx.push_target(&outer).unwrap();
            {
                let g2 = g1.push_target(&inner).unwrap();
                assert_eq!(g2.depth(), 2);
            }
            assert_eq!(g1.depth(), 1);
            assert!(g1.current_target().unwrap().ptr_eq(&outer));
        }
        assert_eq!(ctx.depth(), 0);
    }
    assert_eq!(
        r.target_history,
        vec![Some(outer.id()), Some(inner.id()), Some(outer.id()), None]
    );
    assert_eq!(r.current_target(), None);
}

#[test]
fn early_return_through_question_mark_still_pops() {
    fn draw(ctx: &mut DrawContext<'_>, t: &Texture) -> SceneryResult<()> {
        let mut g = ctx.push_target(t)?;
        g.renderer().clear()?;
        Err(crate::SceneryError::render("bail"))
    }

    let mut r = MockRenderer::new(16, 16);
    let clock = ManualClock::new();
    let t = target(2, 2);
    {
        let mut ctx = DrawContext::new(&mut r, &clock);
        assert!(draw(&mut ctx, &t).is_err());
        assert_eq!(ctx.depth(), 0);
    }
    assert_eq!(r.current_target(), None);
}

#[test]
fn failed_push_leaves_stack_untouched() {
    let mut r = MockRenderer::new(16, 16);
    r.fail_set_target = true;
    let clock = ManualClock::new();
    let t = target(2, 2);
    let mut ctx = DrawContext::new(&mut r, &clock);
    assert!(ctx.push_target(&t).is_err());
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn finish_reports_restore_errors() {
    let mut r = MockRenderer::new(16, 16);
    let clock = ManualClock::new();
    let t = target(2, 2);
    let mut ctx = DrawContext::new(&mut r, &clock);
    let g = ctx.push_target(&t).unwrap();
    assert!(g.finish().is_ok());
    assert_eq!(ctx.depth(), 0);
}
