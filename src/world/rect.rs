//! Axis-aligned rectangle for tile and entity collision
//!
//! Edges are floats so sub-pixel positions survive collision resolution.
//! Overlap is strict: rectangles that only share an edge do not collide,
//! which lets an actor stand on a floor and still slide sideways.

use macroquad::math::Vec2;

/// A rectangle defined by its top-left corner and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    /// Move so the right edge sits at `x`
    pub fn set_right(&mut self, x: f32) {
        self.x = x - self.w;
    }

    /// Move so the left edge sits at `x`
    pub fn set_left(&mut self, x: f32) {
        self.x = x;
    }

    /// Move so the bottom edge sits at `y`
    pub fn set_bottom(&mut self, y: f32) {
        self.y = y - self.h;
    }

    /// Move so the top edge sits at `y`
    pub fn set_top(&mut self, y: f32) {
        self.y = y;
    }

    /// Strict intersection test (shared edges don't count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Translate by an offset
    pub fn offset(&self, d: Vec2) -> Self {
        Self::new(self.x + d.x, self.y + d.y, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let floor = Rect::new(0.0, 16.0, 16.0, 16.0);
        let standing = Rect::new(3.0, 5.0, 10.0, 11.0);
        assert_eq!(standing.bottom(), floor.top());
        assert!(!standing.overlaps(&floor));
        assert!(!floor.overlaps(&standing));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.5, 9.5, 4.0, 4.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&b.offset(Vec2::new(1.0, 0.0))));
    }

    #[test]
    fn test_edge_setters_keep_size() {
        let mut r = Rect::new(5.0, 5.0, 10.0, 11.0);
        r.set_right(32.0);
        assert_eq!(r.x, 22.0);
        r.set_bottom(48.0);
        assert_eq!(r.y, 37.0);
        r.set_left(1.0);
        r.set_top(2.0);
        assert_eq!(r, Rect::new(1.0, 2.0, 10.0, 11.0));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(10.0, 20.0, 10.0, 11.0);
        assert_eq!(r.center(), Vec2::new(15.0, 25.5));
    }
}
