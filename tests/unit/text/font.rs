use super::*;

pub(crate) fn test_font(size_px: f32) -> Font {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fonts/DejaVuSans.ttf");
    Font::from_path(Path::new(path), size_px).unwrap()
}

fn max_alpha(s: &Surface) -> u8 {
    s.data().chunks_exact(4).map(|px| px[3]).max().unwrap_or(0)
}

#[test]
fn family_name_is_reported() {
    let f = test_font(16.0);
    assert!(f.family_name().contains("DejaVu"));
    assert_eq!(f.size_px(), 16.0);
}

#[test]
fn invalid_sizes_and_bytes_are_rejected() {
    assert!(matches!(
        Font::from_bytes(vec![0; 16], 0.0),
        Err(SceneryError::Validation(_))
    ));
    assert!(Font::from_bytes(vec![0; 16], 12.0).is_err());
    assert!(Font::from_path(Path::new("/definitely/missing.ttf"), 12.0).is_err());
}

#[test]
fn blended_text_has_coverage_in_requested_color() {
    let f = test_font(24.0);
    let s = f.blended("Hello", Color::GREEN).unwrap();
    assert!(s.width() > 20);
    assert!(s.height() >= 20);
    assert!(max_alpha(&s) > 200);
    assert!(s.data().chunks_exact(4).all(|px| px[0] == 0 && px[2] == 0));
}

#[test]
fn solid_text_is_binary() {
    let f = test_font(24.0);
    let s = f.solid("Hi", Color::WHITE).unwrap();
    assert!(
        s.data()
            .chunks_exact(4)
            .all(|px| px[3] == 0 || px[3] == 255)
    );
    assert_eq!(max_alpha(&s), 255);
}

#[test]
fn shaded_text_fills_the_background() {
    let f = test_font(24.0);
    let s = f.shaded("Hi", Color::WHITE, Color::BLACK).unwrap();
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn wrapping_makes_text_narrower_and_taller() {
    let f = test_font(20.0);
    let one_line = f.blended("alpha beta gamma delta", Color::WHITE).unwrap();
    let wrapped = f
        .blended_wrapped("alpha beta gamma delta", Color::WHITE, 80)
        .unwrap();
    assert!(wrapped.width() < one_line.width());
    assert!(wrapped.height() > one_line.height());
}

#[test]
fn empty_text_is_a_resource_failure() {
    let f = test_font(20.0);
    let err = f.blended("", Color::WHITE).unwrap_err();
    assert!(err.is_resource());
    assert!(f.line_skip() > 0);
    assert!(f.size_of("abc").w > 0);
}
