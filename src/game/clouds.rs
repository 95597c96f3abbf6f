//! Parallax background clouds
//!
//! Clouds drift right at their own speed and scroll slower than the level in
//! proportion to their depth. Positions wrap so a handful of clouds cover
//! the whole sky.

use macroquad::math::Vec2;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    /// Index into the cloud image list
    pub image: usize,
    pub speed: f32,
    /// 0 = infinitely far, 1 = moves with the level
    pub depth: f32,
}

impl Cloud {
    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    /// Top-left on the display for an image of `image_size`
    pub fn screen_pos(&self, scroll: Vec2, display: Vec2, image_size: Vec2) -> Vec2 {
        let render = self.pos - scroll * self.depth;
        Vec2::new(
            render.x.rem_euclid(display.x + image_size.x) - image_size.x,
            render.y.rem_euclid(display.y + image_size.y) - image_size.y,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Clouds {
    clouds: Vec<Cloud>,
}

impl Clouds {
    /// Scatter `count` clouds using `image_count` cloud images, far ones first
    pub fn new(rng: &mut impl Rng, image_count: usize, count: usize) -> Self {
        let mut clouds: Vec<Cloud> = (0..count)
            .map(|_| Cloud {
                pos: Vec2::new(rng.gen_range(0.0..99999.0), rng.gen_range(0.0..99999.0)),
                image: if image_count > 0 { rng.gen_range(0..image_count) } else { 0 },
                speed: rng.gen_range(0.05..0.15),
                depth: rng.gen_range(0.2..0.8),
            })
            .collect();
        clouds.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        Self { clouds }
    }

    pub fn update(&mut self) {
        for cloud in &mut self.clouds {
            cloud.update();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cloud> {
        self.clouds.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.clouds.len()
    }
}
