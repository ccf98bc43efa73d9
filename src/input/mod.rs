//! Input events and the sources that deliver them.
//!
//! Hosts translate their native events into [`InputEvent`] and publish them
//! through an [`InputSource`]. The orbit controller subscribes to a source and
//! can be detached again by id. [`InputBus`] is the in-process source; the
//! [`host`] module adapts `winit` window events.

pub mod drag;
pub mod host;
pub mod zoom;

pub use drag::DragTracker;
pub use host::WinitInput;
pub use zoom::ZoomClamp;

/// Host-agnostic pointer, wheel and viewport events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    PointerCancel,
    /// Positive `delta_y` scrolls away from the user and zooms out.
    Wheel { delta_y: f64 },
    Resize { width: u32, height: u32 },
}

/// Handle returned by [`InputSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&InputEvent)>;

/// Add/remove based event subscription.
pub trait InputSource {
    fn subscribe(&mut self, listener: Listener) -> ListenerId;

    /// Returns false if `id` was not subscribed.
    fn unsubscribe(&mut self, id: ListenerId) -> bool;
}

/// Synchronous fan-out of events to subscribed listeners.
#[derive(Default)]
pub struct InputBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener in subscription order.
    pub fn emit(&mut self, event: &InputEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl InputSource for InputBus {
    fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

/// Size of the drawing surface, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 for a zero-height surface.
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}
