use super::*;
use crate::foundation::clock::ManualClock;
use crate::foundation::core::frame_period;

#[test]
fn hundred_deadlines_do_not_drift() {
    let start = Instant::now();
    let period = frame_period(40.0).unwrap();
    let mut pacer = FramePacer::new(start, Some(period));
    let mut last = start;
    for _ in 0..100 {
        last = pacer.advance();
    }
    assert_eq!(last, start + period * 100);
}

#[test]
fn late_frame_does_not_shift_later_deadlines() {
    let clock = ManualClock::new();
    let start = clock.now();
    let period = Duration::from_millis(25);
    let mut pacer = FramePacer::new(start, Some(period));

    pacer.advance();
    clock.advance(Duration::from_millis(60));
    pacer.wait(&clock);
    assert_eq!(clock.now(), start + Duration::from_millis(60));

    pacer.advance();
    pacer.advance();
    pacer.wait(&clock);
    assert_eq!(clock.now(), start + Duration::from_millis(75));
}

#[test]
fn inactive_pacer_never_sleeps() {
    let clock = ManualClock::new();
    let start = clock.now();
    let mut pacer = FramePacer::new(start, None);
    assert_eq!(pacer.advance(), start);
    pacer.wait(&clock);
    assert_eq!(clock.now(), start);
    assert!(!pacer.is_active());
}

#[test]
fn meter_reports_inverse_interval() {
    let start = Instant::now();
    let mut meter = FpsMeter::new(start);
    let fps = meter.sample(start + Duration::from_millis(25));
    assert!((fps - 40.0).abs() < 1e-9);
    assert_eq!(meter.sample(start + Duration::from_millis(25)), fps);
}

#[test]
fn overlay_text_is_right_aligned() {
    assert_eq!(format_fps(40.0), "  40.0 FPS");
    assert_eq!(format_fps(1234.56), "1234.6 FPS");
}
