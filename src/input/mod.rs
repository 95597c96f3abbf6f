//! Keyboard input
//!
//! Arrow keys move and jump, Z shoots, Escape quits.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
