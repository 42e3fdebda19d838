use super::*;
use crate::render::mock::MockRenderer;
use crate::render::texture::{PixelFormat, TextureAccess};

#[test]
fn destination_scales_from_top_left_and_truncates() {
    let mut t = Transform::new();
    t.set_scaling(1.5);
    assert_eq!(
        t.destination(PixelRect::new(10, 20, 33, 10)),
        PixelRect::new(10, 20, 49, 15)
    );
}

#[test]
fn apply_forwards_rotation_center_and_flip() {
    let mut r = MockRenderer::new(100, 100);
    let tex = Texture::new(PixelFormat::Rgba8Premul, TextureAccess::Static, 8, 8).unwrap();
    let mut t = Transform::new();
    t.set_rotation(45.0);
    t.set_center(Some(PixelPoint::new(1, 2)));
    t.set_flip(Flip::Both);
    t.apply(&mut r, &tex, PixelRect::new(5, 5, 8, 8)).unwrap();

    let call = &r.copies[0];
    assert_eq!(call.texture, tex.id());
    assert_eq!(call.src, None);
    assert_eq!(call.dst, Some(PixelRect::new(5, 5, 8, 8)));
    assert_eq!(call.angle, 45.0);
    assert_eq!(call.center, Some(PixelPoint::new(1, 2)));
    assert_eq!(call.flip, Flip::Both);
}

#[test]
fn reset_restores_identity() {
    let mut t = Transform::new();
    t.set_scaling(3.0);
    t.set_flip(Flip::Vertical);
    t.reset();
    assert_eq!(t, Transform::default());
}
