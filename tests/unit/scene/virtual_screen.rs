use super::*;

#[test]
fn equal_ratio_fills_the_window() {
    let r = letterbox(PixelSize::new(1024, 768), PixelSize::new(640, 480));
    assert_eq!(r, Some(PixelRect::new(0, 0, 640, 480)));
}

#[test]
fn wider_window_gets_pillarbox() {
    let r = letterbox(PixelSize::new(1024, 768), PixelSize::new(800, 480));
    assert_eq!(r, Some(PixelRect::new(80, 0, 640, 480)));
}

#[test]
fn taller_window_gets_letterbox() {
    let r = letterbox(PixelSize::new(1600, 900), PixelSize::new(800, 800));
    assert_eq!(r, Some(PixelRect::new(0, 175, 800, 450)));
}

#[test]
fn empty_sizes_disable_composition() {
    assert_eq!(letterbox(PixelSize::new(0, 768), PixelSize::new(640, 480)), None);
    assert_eq!(letterbox(PixelSize::new(4, 3), PixelSize::new(640, 0)), None);
    assert_eq!(
        composite_rect(VirtualFit::Stretch, PixelSize::new(4, 3), PixelSize::new(0, 0)),
        None
    );
}

#[test]
fn stretch_covers_the_window() {
    let r = composite_rect(VirtualFit::Stretch, PixelSize::new(4, 3), PixelSize::new(800, 480));
    assert_eq!(r, Some(PixelRect::new(0, 0, 800, 480)));
}

#[test]
fn window_points_map_into_the_canvas() {
    let dst = PixelRect::new(80, 0, 640, 480);
    let vs = PixelSize::new(1024, 768);
    assert_eq!(window_to_virtual(dst, vs, PixelPoint::new(10, 10)), None);
    assert_eq!(
        window_to_virtual(dst, vs, PixelPoint::new(80, 0)),
        Some(PixelPoint::new(0, 0))
    );
    assert_eq!(
        window_to_virtual(dst, vs, PixelPoint::new(400, 240)),
        Some(PixelPoint::new(512, 384))
    );
}
