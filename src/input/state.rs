//! Input state management
//!
//! Turns key transitions into a held-direction intent plus commands. The
//! translation is pure; only [`Controls::poll`] talks to macroquad.

use macroquad::input::{is_key_pressed, is_key_released};

use crate::config::ShootMode;
use super::{Command, Key, KeyEvent};

#[derive(Debug, Clone)]
pub struct Controls {
    left: bool,
    right: bool,
    shoot_mode: ShootMode,
}

impl Controls {
    pub fn new(shoot_mode: ShootMode) -> Self {
        Self {
            left: false,
            right: false,
            shoot_mode,
        }
    }

    /// Horizontal movement intent: -1, 0 or 1
    pub fn intent(&self) -> f32 {
        self.right as i32 as f32 - self.left as i32 as f32
    }

    /// Apply one key transition, appending any resulting commands
    pub fn handle(&mut self, event: KeyEvent, commands: &mut Vec<Command>) {
        match event {
            KeyEvent::Down(Key::Left) => self.left = true,
            KeyEvent::Down(Key::Right) => self.right = true,
            KeyEvent::Down(Key::Jump) => commands.push(Command::Jump),
            KeyEvent::Down(Key::Shoot) => match self.shoot_mode {
                ShootMode::Fire => {
                    commands.push(Command::Shoot);
                    commands.push(Command::Fire);
                }
                ShootMode::ToggleBothEdges => commands.push(Command::Shoot),
                ShootMode::Hold => {
                    commands.push(Command::SetShooting(true));
                    commands.push(Command::Fire);
                }
            },
            KeyEvent::Down(Key::Quit) => commands.push(Command::Quit),
            KeyEvent::Up(Key::Left) => self.left = false,
            KeyEvent::Up(Key::Right) => self.right = false,
            KeyEvent::Up(Key::Shoot) => match self.shoot_mode {
                ShootMode::Fire => {}
                ShootMode::ToggleBothEdges => commands.push(Command::Shoot),
                ShootMode::Hold => commands.push(Command::SetShooting(false)),
            },
            KeyEvent::Up(Key::Jump | Key::Quit) => {}
        }
    }

    /// Read this frame's key transitions from macroquad
    pub fn poll(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        for key in Key::ALL {
            let code = key.key_code();
            if is_key_pressed(code) {
                self.handle(KeyEvent::Down(key), &mut commands);
            }
            if is_key_released(code) {
                self.handle(KeyEvent::Up(key), &mut commands);
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(controls: &mut Controls, events: &[KeyEvent]) -> Vec<Command> {
        let mut commands = Vec::new();
        for &event in events {
            controls.handle(event, &mut commands);
        }
        commands
    }

    #[test]
    fn test_intent_from_held_keys() {
        let mut controls = Controls::new(ShootMode::Fire);
        assert_eq!(controls.intent(), 0.0);
        feed(&mut controls, &[KeyEvent::Down(Key::Left)]);
        assert_eq!(controls.intent(), -1.0);
        feed(&mut controls, &[KeyEvent::Down(Key::Right)]);
        assert_eq!(controls.intent(), 0.0);
        feed(&mut controls, &[KeyEvent::Up(Key::Left)]);
        assert_eq!(controls.intent(), 1.0);
    }

    #[test]
    fn test_jump_on_key_down_only() {
        let mut controls = Controls::new(ShootMode::Fire);
        let commands = feed(&mut controls, &[KeyEvent::Down(Key::Jump), KeyEvent::Up(Key::Jump)]);
        assert_eq!(commands, vec![Command::Jump]);
    }

    #[test]
    fn test_fire_mode_shoots_on_press() {
        let mut controls = Controls::new(ShootMode::Fire);
        let commands = feed(&mut controls, &[KeyEvent::Down(Key::Shoot), KeyEvent::Up(Key::Shoot)]);
        assert_eq!(commands, vec![Command::Shoot, Command::Fire]);
    }

    #[test]
    fn test_toggle_both_edges_cancels_out() {
        let mut controls = Controls::new(ShootMode::ToggleBothEdges);
        let commands = feed(&mut controls, &[KeyEvent::Down(Key::Shoot), KeyEvent::Up(Key::Shoot)]);
        assert_eq!(commands, vec![Command::Shoot, Command::Shoot]);
    }

    #[test]
    fn test_hold_mode_tracks_key() {
        let mut controls = Controls::new(ShootMode::Hold);
        let commands = feed(&mut controls, &[KeyEvent::Down(Key::Shoot)]);
        assert_eq!(commands, vec![Command::SetShooting(true), Command::Fire]);
        let commands = feed(&mut controls, &[KeyEvent::Up(Key::Shoot)]);
        assert_eq!(commands, vec![Command::SetShooting(false)]);
    }

    #[test]
    fn test_quit() {
        let mut controls = Controls::new(ShootMode::Fire);
        let commands = feed(&mut controls, &[KeyEvent::Down(Key::Quit)]);
        assert_eq!(commands, vec![Command::Quit]);
    }
}
