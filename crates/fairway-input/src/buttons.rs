//! Frame-coherent button state for keys and mouse buttons.
//!
//! [`ButtonState`] accumulates press/release events during a frame and answers
//! three questions for any button: is it held, was it just pressed this frame,
//! and was it just released this frame. Keyboard state uses physical key codes
//! so bindings work the same on every layout.

use std::collections::HashSet;
use std::hash::Hash;

use winit::event::{ElementState, MouseButton};
use winit::keyboard::PhysicalKey;

/// Held/just-pressed/just-released tracking for any button type.
///
/// 1. Feed events with [`press`](Self::press) and [`release`](Self::release).
/// 2. Query with [`is_pressed`](Self::is_pressed),
///    [`just_pressed`](Self::just_pressed), [`just_released`](Self::just_released).
/// 3. Call [`clear_transients`](Self::clear_transients) at the end of each frame.
#[derive(Debug, Clone)]
pub struct ButtonState<B> {
    pressed: HashSet<B>,
    just_pressed: HashSet<B>,
    just_released: HashSet<B>,
}

impl<B> Default for ButtonState<B> {
    fn default() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }
}

impl<B: Copy + Eq + Hash> ButtonState<B> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `button` held. Pressing a button that is already held is a
    /// no-op, so OS key repeat never produces a second edge.
    pub fn press(&mut self, button: B) {
        if self.pressed.insert(button) {
            self.just_pressed.insert(button);
        }
    }

    pub fn release(&mut self, button: B) {
        if self.pressed.remove(&button) {
            self.just_released.insert(button);
        }
    }

    pub fn apply(&mut self, button: B, state: ElementState) {
        match state {
            ElementState::Pressed => self.press(button),
            ElementState::Released => self.release(button),
        }
    }

    #[must_use]
    pub fn is_pressed(&self, button: B) -> bool {
        self.pressed.contains(&button)
    }

    #[must_use]
    pub fn just_pressed(&self, button: B) -> bool {
        self.just_pressed.contains(&button)
    }

    #[must_use]
    pub fn just_released(&self, button: B) -> bool {
        self.just_released.contains(&button)
    }

    /// Clears the per-frame edge sets.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

/// Minimal description of a key event, for tests and scripted input.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

/// Physical keyboard keys.
pub type KeyboardState = ButtonState<PhysicalKey>;

/// Mouse buttons.
pub type MouseButtons = ButtonState<MouseButton>;

impl ButtonState<PhysicalKey> {
    /// Processes a [`RawKeyEvent`]. Repeat events are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        self.apply(event.key, event.state);
    }
}
