//! Polled primary-pointer state.

use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};

/// A primary pointer (mouse or first finger) sampled once per frame.
pub trait Pointer {
    /// Whether the primary pointer is currently pressed.
    fn is_touched(&self) -> bool;
    /// Device-space x, in pixels from the left edge.
    fn x(&self) -> f32;
    /// Device-space y, in pixels from the top edge.
    fn y(&self) -> f32;
}

/// Pointer snapshot kept current by feeding it window events.
///
/// The left mouse button and the first active touch both drive the same
/// pressed flag; whichever moved last owns the position.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    touched: bool,
    x: f32,
    y: f32,
    primary_touch: Option<u64>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.move_to(x, y);
        self.touched = true;
    }

    pub fn release(&mut self) {
        self.touched = false;
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.touched = *state == ElementState::Pressed;
                if !self.touched {
                    // A mouse release ends any press, including a touch whose
                    // end event never arrived.
                    self.primary_touch = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_to(position.x as f32, position.y as f32);
            }
            WindowEvent::Touch(touch) => self.handle_touch(touch),
            WindowEvent::Focused(false) => {
                // Release events are not delivered to unfocused windows.
                self.primary_touch = None;
                self.release();
            }
            _ => {}
        }
    }

    fn handle_touch(&mut self, touch: &Touch) {
        let (x, y) = (touch.location.x as f32, touch.location.y as f32);
        match touch.phase {
            TouchPhase::Started => {
                if self.primary_touch.is_none() {
                    self.primary_touch = Some(touch.id);
                    self.press(x, y);
                }
            }
            TouchPhase::Moved => {
                if self.primary_touch == Some(touch.id) {
                    self.move_to(x, y);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.primary_touch == Some(touch.id) {
                    self.primary_touch = None;
                    self.move_to(x, y);
                    self.release();
                }
            }
        }
    }
}

impl Pointer for PointerState {
    fn is_touched(&self) -> bool {
        self.touched
    }

    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}
