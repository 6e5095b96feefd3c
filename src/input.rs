//! Input merging
//!
//! Keyboard keys and the on-screen virtual buttons both feed the same three
//! intents. Jump fires on the press edge only, so holding it does not
//! bunny-hop.

use crate::sim::TickInput;

/// Logical buttons shared by keyboard and touch controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Jump,
}

impl Button {
    /// Keyboard mapping (arrow keys, WASD, space)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "KeyA" | "a" | "A" => Some(Button::Left),
            "ArrowRight" | "KeyD" | "d" | "D" => Some(Button::Right),
            "ArrowUp" | "KeyW" | "w" | "W" | "Space" | " " => Some(Button::Jump),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Held {
    left: bool,
    right: bool,
    jump: bool,
}

impl Held {
    fn set(&mut self, button: Button, down: bool) {
        match button {
            Button::Left => self.left = down,
            Button::Right => self.right = down,
            Button::Jump => self.jump = down,
        }
    }
}

/// Collects raw input events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputSource {
    keyboard: Held,
    virtual_buttons: Held,
    /// Jump pressed (from either source) since the last `sample`
    jump_edge: bool,
    pub idle_mode: bool,
}

impl InputSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, button: Button) {
        if button == Button::Jump && !self.keyboard.jump {
            self.jump_edge = true;
        }
        self.keyboard.set(button, true);
    }

    pub fn key_up(&mut self, button: Button) {
        self.keyboard.set(button, false);
    }

    /// On-screen button pressed
    pub fn virtual_down(&mut self, button: Button) {
        if button == Button::Jump && !self.virtual_buttons.jump {
            self.jump_edge = true;
        }
        self.virtual_buttons.set(button, true);
    }

    /// On-screen button released (or touch cancelled)
    pub fn virtual_up(&mut self, button: Button) {
        self.virtual_buttons.set(button, false);
    }

    /// Release everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.keyboard = Held::default();
        self.virtual_buttons = Held::default();
        self.jump_edge = false;
    }

    /// Produce this tick's intents and consume the jump edge
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.keyboard.left || self.virtual_buttons.left,
            move_right: self.keyboard.right || self.virtual_buttons.right,
            jump: self.jump_edge,
            idle_mode: self.idle_mode,
        };
        self.jump_edge = false;
        input
    }
}
