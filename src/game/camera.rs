//! Scrolling camera
//!
//! The camera eases toward the point that centres the player on the display,
//! closing a fixed fraction of the distance every tick.

use macroquad::math::Vec2;

use crate::world::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World position of the display's top-left corner
    pub scroll: Vec2,
    /// Display size in world units
    pub view_size: Vec2,
    /// Fraction divisor: 30 closes 1/30 of the gap per tick
    pub smoothing: f32,
}

impl Camera {
    pub fn new(view_size: Vec2, smoothing: f32) -> Self {
        Self {
            scroll: Vec2::ZERO,
            view_size,
            smoothing: smoothing.max(1.0),
        }
    }

    fn target_for(&self, focus: Vec2) -> Vec2 {
        focus - self.view_size / 2.0
    }

    /// Ease toward centring `focus`
    pub fn follow(&mut self, focus: Vec2) {
        self.scroll += (self.target_for(focus) - self.scroll) / self.smoothing;
    }

    /// Jump straight to centring `focus`
    pub fn snap_to(&mut self, focus: Vec2) {
        self.scroll = self.target_for(focus);
    }

    /// Scroll truncated to whole pixels for drawing
    pub fn render_scroll(&self) -> Vec2 {
        self.scroll.trunc()
    }

    /// World-space rectangle currently on screen
    pub fn view(&self) -> Rect {
        Rect::from_pos_size(self.scroll, self.view_size)
    }
}
