//! World Renderer
//!
//! Draws one frame of the world onto a [`Canvas`] in screen space: background,
//! clouds, tiles, actors, bullets. Static geometry and entities are offset by
//! the camera's truncated scroll.

use macroquad::color::Color;
use macroquad::math::Vec2;
use macroquad::texture::{draw_texture_ex, DrawTextureParams, Texture2D};
use macroquad::shapes::draw_rectangle;
use macroquad::text::draw_text;

use crate::assets::{self, Assets, CLOUDS};
use crate::world::{Rect, Tilemap};
use super::actor::{Actor, ActorKind, SPRITE_OFFSET};
use super::score::Scoreboard;
use super::world::World;

const BULLET_COLOR: Color = Color::new(1.0, 0.9, 0.4, 1.0);
const HUD_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.9);
const HUD_FONT_SIZE: f32 = 16.0;
/// Baseline of the HUD line
const HUD_POS: Vec2 = Vec2::new(4.0, 12.0);

/// Something images can be drawn onto
pub trait Canvas {
    fn blit(&mut self, image: &Texture2D, pos: Vec2, flip_x: bool);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw a line of text with its baseline at `pos`
    fn text(&mut self, text: &str, pos: Vec2, color: Color);
}

/// Draws straight to the current macroquad render target
pub struct ScreenCanvas;

impl Canvas for ScreenCanvas {
    fn blit(&mut self, image: &Texture2D, pos: Vec2, flip_x: bool) {
        draw_texture_ex(
            image,
            pos.x.floor(),
            pos.y.floor(),
            macroquad::color::WHITE,
            DrawTextureParams {
                flip_x,
                ..Default::default()
            },
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x.floor(), rect.y.floor(), rect.w, rect.h, color);
    }

    fn text(&mut self, text: &str, pos: Vec2, color: Color) {
        draw_text(text, pos.x, pos.y, HUD_FONT_SIZE, color);
    }
}

/// Actor type name used for its image sets
pub fn actor_name(actor: &Actor) -> &'static str {
    match actor.kind {
        ActorKind::Player(_) => "player",
        ActorKind::Enemy => "enemy",
    }
}

/// Screen position of an actor's sprite
pub fn sprite_pos(actor: &Actor, scroll: Vec2) -> Vec2 {
    actor.pos - scroll + SPRITE_OFFSET
}

fn draw_tilemap(canvas: &mut impl Canvas, tilemap: &Tilemap, assets: &Assets, view: Rect, scroll: Vec2) {
    for tile in tilemap.offgrid() {
        if let Some(image) = assets.image(&assets::tile_set(&tile.kind), tile.variant as usize) {
            canvas.blit(image, tile.pos - scroll, false);
        }
    }

    let ts = tilemap.tile_size() as f32;
    for tile in tilemap.visible_tiles(view) {
        if let Some(image) = assets.image(&assets::tile_set(&tile.kind), tile.variant as usize) {
            canvas.blit(image, tile.pos * ts - scroll, false);
        }
    }
}

fn draw_actor(canvas: &mut impl Canvas, actor: &Actor, assets: &Assets, scroll: Vec2) {
    let set = assets::animation_set(actor_name(actor), actor.action());
    if let Some(image) = assets.image(&set, actor.animation().image_index()) {
        canvas.blit(image, sprite_pos(actor, scroll), actor.flip);
    }
}

/// Draw a full frame. `display` is the size of the target surface.
pub fn draw_world(canvas: &mut impl Canvas, world: &World, assets: &Assets, display: Vec2) {
    canvas.blit(&assets.background, Vec2::ZERO, false);

    let scroll = world.camera.render_scroll();

    for cloud in world.clouds.iter() {
        if let Some(image) = assets.image(CLOUDS, cloud.image) {
            canvas.blit(image, cloud.screen_pos(scroll, display, image.size()), false);
        }
    }

    let view = Rect::from_pos_size(scroll, display);
    draw_tilemap(canvas, &world.tilemap, assets, view, scroll);

    for (_, enemy) in world.enemies.iter() {
        draw_actor(canvas, enemy, assets, scroll);
    }
    draw_actor(canvas, &world.player, assets, scroll);

    for (_, bullet) in world.bullets.iter() {
        canvas.fill_rect(bullet.rect().offset(-scroll), BULLET_COLOR);
    }
}

/// Draw the score line over the finished frame
pub fn draw_hud(canvas: &mut impl Canvas, score: &Scoreboard) {
    canvas.text(&score.hud_line(), HUD_POS, HUD_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::animation::ClipTable;

    #[test]
    fn test_sprite_offset_and_scroll() {
        let player = Actor::player(
            Vec2::new(50.0, 40.0),
            Vec2::new(10.0, 11.0),
            Vec2::new(10.0, 10.0),
            ClipTable::player(),
        );
        assert_eq!(sprite_pos(&player, Vec2::new(20.0, 10.0)), Vec2::new(27.0, 27.0));
        assert_eq!(actor_name(&player), "player");

        let enemy = Actor::enemy(Vec2::ZERO, Vec2::new(8.0, 15.0), ClipTable::enemy());
        assert_eq!(actor_name(&enemy), "enemy");
    }

    #[derive(Default)]
    struct TextRecorder {
        lines: Vec<(String, Vec2)>,
    }

    impl Canvas for TextRecorder {
        fn blit(&mut self, _image: &Texture2D, _pos: Vec2, _flip_x: bool) {}
        fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
        fn text(&mut self, text: &str, pos: Vec2, _color: Color) {
            self.lines.push((text.to_string(), pos));
        }
    }

    #[test]
    fn test_hud_draws_score_line() {
        let mut canvas = TextRecorder::default();
        let score = Scoreboard { kills: 2, shots: 5, falls: 0 };
        draw_hud(&mut canvas, &score);
        assert_eq!(canvas.lines, vec![("KILLS 2  SHOTS 5  FALLS 0".to_string(), HUD_POS)]);
    }
}
