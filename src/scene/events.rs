use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Keyboard key, reduced to what scenes typically react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character.
    Char(char),
    /// Escape.
    Escape,
    /// Enter / return.
    Enter,
    /// Space bar.
    Space,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Any other key by backend scancode.
    Other(u32),
}

/// Input and lifecycle events delivered to a scene.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The window was closed. Ends the scene loop.
    WindowClose,
    /// Render targets were lost; every cached texture must be rebuilt.
    RenderTargetsReset,
    /// The render device was recreated; every cached texture must be rebuilt.
    RenderDeviceReset,
    /// New window size.
    WindowResized {
        /// Width in pixels.
        w: u32,
        /// Height in pixels.
        h: u32,
    },
    /// Key pressed.
    KeyDown(Key),
    /// Key released.
    KeyUp(Key),
    /// Pointer moved to window coordinates.
    PointerMoved {
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
    },
    /// Pointer button changed state.
    PointerButton {
        /// Button number, 1 is primary.
        button: u8,
        /// Pressed or released.
        pressed: bool,
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
    },
    /// Application-defined event.
    User {
        /// Free-form code.
        code: i32,
    },
}

impl Event {
    /// Whether the event invalidates GPU-resident textures.
    pub fn is_reset(&self) -> bool {
        matches!(self, Event::RenderTargetsReset | Event::RenderDeviceReset)
    }
}

/// Source of pending events, drained once per frame without blocking.
pub trait EventSource {
    /// Next pending event, `None` when the queue is empty.
    fn poll(&mut self) -> Option<Event>;
}

/// In-process FIFO event source. Feed it through [`EventSender`]s.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Rc<RefCell<VecDeque<Event>>>,
}

/// Cloneable handle pushing into an [`EventQueue`].
#[derive(Clone, Debug)]
pub struct EventSender {
    pending: Rc<RefCell<VecDeque<Event>>>,
}

impl EventQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for pushing events.
    pub fn sender(&self) -> EventSender {
        EventSender {
            pending: Rc::clone(&self.pending),
        }
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl EventSource for EventQueue {
    fn poll(&mut self) -> Option<Event> {
        self.pending.borrow_mut().pop_front()
    }
}

impl EventSender {
    /// Queue an event behind the ones already pending.
    pub fn send(&self, event: Event) {
        self.pending.borrow_mut().push_back(event);
    }
}

/// Event source replaying a fixed script: one batch of events per frame, then a close.
///
/// Frame `i` receives `frames[i]`; once the script is exhausted a single
/// [`Event::WindowClose`] is produced.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<VecDeque<Event>>,
    closed: bool,
}

impl ScriptedEvents {
    /// Script with `frames` batches.
    pub fn new(frames: Vec<Vec<Event>>) -> Self {
        Self {
            frames: frames.into_iter().map(VecDeque::from).collect(),
            closed: false,
        }
    }

    /// Script running `n` frames without input.
    pub fn idle_frames(n: usize) -> Self {
        Self::new(vec![Vec::new(); n])
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self) -> Option<Event> {
        let Some(batch) = self.frames.front_mut() else {
            if self.closed {
                return None;
            }
            self.closed = true;
            return Some(Event::WindowClose);
        };
        if let Some(ev) = batch.pop_front() {
            return Some(ev);
        }
        // Batch drained; its frame is over.
        self.frames.pop_front();
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/events.rs"]
mod tests;
