//! Key and command definitions

use macroquad::input::KeyCode;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Shoot,
    Quit,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Left, Key::Right, Key::Jump, Key::Shoot, Key::Quit];

    /// Keyboard binding
    pub fn key_code(&self) -> KeyCode {
        match self {
            Key::Left => KeyCode::Left,
            Key::Right => KeyCode::Right,
            Key::Jump => KeyCode::Up,
            Key::Shoot => KeyCode::Z,
            Key::Quit => KeyCode::Escape,
        }
    }
}

/// A discrete key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// One-shot requests sent to the world between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    /// Toggle the firing pose
    Shoot,
    /// Raise or lower the firing pose
    SetShooting(bool),
    /// Spawn a bullet
    Fire,
    Quit,
}
