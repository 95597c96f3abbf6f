//! Bullets
//!
//! Bullets fly straight along x at a fixed speed. They ignore tiles and
//! gravity; the world checks them against enemies and the visible area.

use macroquad::math::Vec2;

use crate::world::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    /// Top-left of the hitbox
    pub pos: Vec2,
    pub size: Vec2,
    /// +1 flies right, -1 flies left
    pub direction: f32,
    /// Distance per tick
    pub speed: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, size: Vec2, direction: f32, speed: f32) -> Self {
        Self {
            pos,
            size,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            speed,
        }
    }

    /// Direction sign for a shooter facing left (`flip`) or right
    pub fn direction_for(flip: bool) -> f32 {
        if flip { -1.0 } else { 1.0 }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.pos.x += self.speed * self.direction;
    }

    /// Whether the bullet's x lies in `[left, left + width)`
    pub fn in_view(&self, left: f32, width: f32) -> bool {
        self.pos.x >= left && self.pos.x < left + width
    }
}
