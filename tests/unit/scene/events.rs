use super::*;

#[test]
fn queue_is_fifo_across_senders() {
    let mut q = EventQueue::new();
    let a = q.sender();
    let b = a.clone();
    a.send(Event::KeyDown(Key::Space));
    b.send(Event::User { code: 3 });
    assert_eq!(q.len(), 2);
    assert_eq!(q.poll(), Some(Event::KeyDown(Key::Space)));
    assert_eq!(q.poll(), Some(Event::User { code: 3 }));
    assert_eq!(q.poll(), None);
    assert!(q.is_empty());
}

#[test]
fn script_yields_one_batch_per_frame_then_closes() {
    let mut s = ScriptedEvents::new(vec![
        vec![Event::RenderDeviceReset, Event::KeyUp(Key::Escape)],
        vec![],
    ]);
    assert_eq!(s.poll(), Some(Event::RenderDeviceReset));
    assert_eq!(s.poll(), Some(Event::KeyUp(Key::Escape)));
    assert_eq!(s.poll(), None);
    assert_eq!(s.poll(), None);
    assert_eq!(s.poll(), Some(Event::WindowClose));
    assert_eq!(s.poll(), None);
}

#[test]
fn reset_events_are_flagged() {
    assert!(Event::RenderTargetsReset.is_reset());
    assert!(Event::RenderDeviceReset.is_reset());
    assert!(!Event::WindowResized { w: 1, h: 1 }.is_reset());
}
