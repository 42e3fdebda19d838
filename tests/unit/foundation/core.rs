use super::*;

#[test]
fn premul_rounds_like_straight_to_premul() {
    assert_eq!(Color::rgba(255, 128, 0, 128).to_premul(), [128, 64, 0, 128]);
    assert_eq!(Color::TRANSPARENT.to_premul(), [0, 0, 0, 0]);
    assert_eq!(Color::WHITE.to_premul(), [255, 255, 255, 255]);
}

#[test]
fn frame_period_truncates_to_micros() {
    assert_eq!(frame_period(40.0), Some(Duration::from_micros(25_000)));
    assert_eq!(frame_period(30.0), Some(Duration::from_micros(33_333)));
    assert_eq!(frame_period(0.0), None);
    assert_eq!(frame_period(-5.0), None);
    assert_eq!(frame_period(f64::NAN), None);
}

#[test]
fn rect_helpers() {
    let r = PixelRect::new(3, 4, 10, 0);
    assert!(r.is_empty());
    assert_eq!(r.origin(), PixelPoint::new(3, 4));
    let f = PixelRect::new(1, 2, 3, 4).to_rect();
    assert_eq!((f.x0, f.y0, f.x1, f.y1), (1.0, 2.0, 4.0, 6.0));
}
