use std::path::Path;

use super::*;
use crate::foundation::core::PixelSize;
use crate::render::cpu::{CpuRenderer, CpuRendererOpts};
use crate::widgets::widget::Widget;

fn write_png(dir: &Path, name: &str, w: u32, h: u32) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 0, 0, 255]));
    img.save(dir.join(name)).unwrap();
}

fn renderer() -> CpuRenderer {
    CpuRenderer::new(64, 64, CpuRendererOpts::default()).unwrap()
}

#[test]
fn frames_sorted_by_number_not_name() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "walk_10.png", 10, 1);
    write_png(dir.path(), "walk_2.png", 2, 1);
    write_png(dir.path(), "walk_1.png", 1, 1);
    write_png(dir.path(), "run_3.png", 3, 1);
    std::fs::write(dir.path().join("walk_notes.txt"), "x").unwrap();

    let mut r = renderer();
    let mut lib = SpriteLibrary::new();
    let n = lib
        .load_animation(&mut r, "walk", dir.path(), "walk")
        .unwrap();
    assert_eq!(n, 3);

    let frames = lib.get("walk").unwrap();
    let numbers: Vec<u32> = frames.iter().map(|(n, _)| *n).collect();
    assert_eq!(numbers, vec![1, 2, 10]);
    assert_eq!(frames[2].1.native_size(), PixelSize::new(10, 1));
    assert_eq!(lib.names(), vec!["walk"]);
}

#[test]
fn custom_filter_uses_capture_group() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "f003-hero.png", 3, 3);
    write_png(dir.path(), "f001-hero.png", 1, 1);
    write_png(dir.path(), "hero.png", 5, 5);

    let mut r = renderer();
    let mut lib = SpriteLibrary::new();
    let filter = Regex::new(r"f([0-9]+)-hero\.png").unwrap();
    lib.load_animation_matching(&mut r, "hero", dir.path(), &filter, 1)
        .unwrap();
    let numbers: Vec<u32> = lib.get("hero").unwrap().iter().map(|(n, _)| *n).collect();
    assert_eq!(numbers, vec![1, 3]);
}

#[test]
fn failures_leave_library_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "idle_1.png", 4, 4);
    std::fs::write(dir.path().join("broken_1.png"), b"not a png").unwrap();

    let mut r = renderer();
    let mut lib = SpriteLibrary::new();
    lib.load_animation(&mut r, "idle", dir.path(), "idle").unwrap();

    let err = lib
        .load_animation(&mut r, "jump", dir.path(), "jump")
        .unwrap_err();
    assert!(err.is_resource());
    let err = lib
        .load_animation(&mut r, "idle", dir.path(), "broken")
        .unwrap_err();
    assert!(err.is_resource());

    assert_eq!(lib.len(), 1);
    assert_eq!(lib.get("idle").unwrap().len(), 1);
    assert!(lib.get("jump").is_none());
}

#[test]
fn frames_feed_a_sprite() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "coin_1.png", 6, 6);
    write_png(dir.path(), "coin_2.png", 8, 8);

    let mut r = renderer();
    let mut lib = SpriteLibrary::new();
    lib.load_animation(&mut r, "coin", dir.path(), "coin").unwrap();

    let mut sprite = crate::widgets::sprite::Sprite::new();
    assert!(sprite.add_animation(0, lib.get("coin").unwrap()));
    assert_eq!(sprite.current_frame(), Some(1));
    assert!(sprite.base().is_dirty());
}
