use winit::keyboard::KeyCode;

use crate::movement::{Action, HeldActions};

/// WASD layout.
pub fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::KeyW => Some(Action::MoveForward),
        KeyCode::KeyS => Some(Action::MoveBackward),
        KeyCode::KeyA => Some(Action::StrafeLeft),
        KeyCode::KeyD => Some(Action::StrafeRight),
        _ => None,
    }
}

#[inline]
pub fn is_quit_key(code: KeyCode) -> bool {
    code == KeyCode::Escape
}

/// Input gathered between two frames.
#[derive(Debug, Default)]
pub struct InputState {
    pub held: HeldActions,
    mouse_dx: f32,
}

impl InputState {
    pub fn on_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(action) = action_for(code) {
            self.held.set(action, pressed);
        }
    }

    pub fn on_mouse_motion(&mut self, dx: f64) {
        self.mouse_dx += dx as f32;
    }

    /// Horizontal mouse travel since the last call.
    pub fn take_mouse_dx(&mut self) -> f32 {
        std::mem::take(&mut self.mouse_dx)
    }

    /// Drops held keys, e.g. when the window loses focus and key-up events
    /// would otherwise be missed.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
