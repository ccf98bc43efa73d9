//! `winit` adapter.
//!
//! Converts window events to [`InputEvent`]. The left mouse button drives
//! orbit drags; the wheel is scaled to pixel units so a line step lands in
//! the same range as a browser `deltaY`.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use super::InputEvent;

/// Wheel units per scrolled line
pub const PIXELS_PER_LINE: f64 = 100.0;

/// Tracks the cursor so button events can carry a position.
#[derive(Debug, Default)]
pub struct WinitInput {
    cursor: Option<PhysicalPosition<f64>>,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a window event, or `None` if it does not concern the orbit.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => self.on_cursor_moved(*position),
            WindowEvent::MouseInput { state, button, .. } => self.on_mouse_button(*button, *state),
            WindowEvent::MouseWheel { delta, .. } => self.on_scroll(*delta),
            WindowEvent::CursorLeft { .. } => self.on_cursor_left(),
            WindowEvent::Focused(false) => Some(InputEvent::PointerCancel),
            WindowEvent::Resized(size) => Some(self.on_resized(*size)),
            _ => None,
        }
    }

    pub fn on_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<InputEvent> {
        self.cursor = Some(position);
        Some(InputEvent::PointerMove {
            x: position.x,
            y: position.y,
        })
    }

    pub fn on_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<InputEvent> {
        if button != MouseButton::Left {
            return None;
        }
        match state {
            ElementState::Pressed => match self.cursor {
                Some(p) => Some(InputEvent::PointerDown { x: p.x, y: p.y }),
                None => {
                    log::debug!("button press before any cursor position, ignoring");
                    None
                }
            },
            ElementState::Released => Some(InputEvent::PointerUp),
        }
    }

    pub fn on_scroll(&mut self, delta: MouseScrollDelta) -> Option<InputEvent> {
        // winit reports positive y for scrolling up
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => -(y as f64) * PIXELS_PER_LINE,
            MouseScrollDelta::PixelDelta(pos) => -pos.y,
        };
        if delta_y == 0.0 {
            return None;
        }
        Some(InputEvent::Wheel { delta_y })
    }

    pub fn on_cursor_left(&mut self) -> Option<InputEvent> {
        self.cursor = None;
        Some(InputEvent::PointerLeave)
    }

    pub fn on_resized(&mut self, size: PhysicalSize<u32>) -> InputEvent {
        InputEvent::Resize {
            width: size.width,
            height: size.height,
        }
    }
}
