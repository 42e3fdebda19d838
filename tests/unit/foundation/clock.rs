use super::*;

#[test]
fn manual_clock_is_shared_and_monotonic() {
    let a = ManualClock::new();
    let b = a.clone();
    let t0 = a.now();

    a.advance(Duration::from_millis(5));
    assert_eq!(b.now(), t0 + Duration::from_millis(5));

    b.set(t0);
    assert_eq!(a.now(), t0 + Duration::from_millis(5));
}

#[test]
fn manual_sleep_jumps_to_deadline() {
    let c = ManualClock::new();
    let deadline = c.now() + Duration::from_millis(25);
    c.sleep_until(deadline);
    assert_eq!(c.now(), deadline);

    c.sleep_until(deadline - Duration::from_millis(1));
    assert_eq!(c.now(), deadline);
}

#[test]
fn steady_sleep_in_the_past_returns() {
    let c = SteadyClock;
    let before = c.now();
    c.sleep_until(before);
    assert!(c.now() >= before);
}
