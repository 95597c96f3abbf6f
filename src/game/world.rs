//! Game World
//!
//! The World owns everything a tick touches: the player, the enemy and bullet
//! pools, the live tilemap, the pristine copy of the level it was loaded from,
//! the camera, the clouds and the event queues. Nothing is global; the driver
//! holds a World and passes it to the renderer.
//!
//! Tick order:
//! 1. camera follows the player
//! 2. clouds drift
//! 3. player moves with the input intent
//! 4. enemies move with zero intent
//! 5. bullets (cleanup sweep, advance, hit test, flush)
//! 6. falling below `death_y` reloads the level

use macroquad::math::Vec2;
use tracing::info;

use crate::config::{BulletConfig, GameConfig, PhysicsConfig};
use crate::world::{LevelError, Tilemap};
use super::actor::Actor;
use super::animation::ClipTable;
use super::bullet::Bullet;
use super::camera::Camera;
use super::clouds::Clouds;
use super::entity::Entity;
use super::event::{BulletFiredEvent, EnemyKilledEvent, Events, RespawnEvent};
use super::pool::Pool;

/// Marker type for entity spawn points
pub const SPAWNER: &str = "spawners";
/// Spawner variant that places the player
pub const PLAYER_SPAWN: u32 = 0;
/// Spawner variant that places an enemy
pub const ENEMY_SPAWN: u32 = 1;

const SPAWN_MARKERS: [(&str, u32); 2] = [(SPAWNER, PLAYER_SPAWN), (SPAWNER, ENEMY_SPAWN)];

pub struct World {
    pub player: Actor,
    pub enemies: Pool<Actor>,
    pub bullets: Pool<Bullet>,
    /// Live map; spawn markers have been extracted from it
    pub tilemap: Tilemap,
    pub camera: Camera,
    pub clouds: Clouds,
    pub events: Events,

    /// Level as loaded, restored on every reload
    level: Tilemap,
    physics: PhysicsConfig,
    bullet: BulletConfig,
    enemy_size: Vec2,
    enemy_clips: ClipTable,
    death_y: f32,
}

impl World {
    /// Create an empty world. Call [`World::load_level`] before ticking.
    pub fn new(
        config: &GameConfig,
        player_clips: ClipTable,
        enemy_clips: ClipTable,
        clouds: Clouds,
    ) -> Self {
        let level = Tilemap::new(16);
        Self {
            player: Actor::player(
                Vec2::ZERO,
                Vec2::from(config.player.size),
                Vec2::from(config.player.shoot_size),
                player_clips,
            ),
            enemies: Pool::new(),
            bullets: Pool::new(),
            tilemap: level.clone(),
            camera: Camera::new(config.display.size(), config.camera_smoothing),
            clouds,
            events: Events::new(),
            level,
            physics: config.physics,
            bullet: config.bullet,
            enemy_size: Vec2::from(config.enemy.size),
            enemy_clips,
            death_y: config.death_y,
        }
    }

    /// Replace the level and populate it from its spawn markers.
    ///
    /// A level without a player spawner is rejected and the current level
    /// stays in place.
    pub fn load_level(&mut self, level: Tilemap) -> Result<(), LevelError> {
        if !level.contains(SPAWNER, PLAYER_SPAWN) {
            return Err(LevelError::Validation("level has no player spawner".to_string()));
        }
        self.level = level;
        self.reset_level();
        info!(
            tiles = self.tilemap.grid_len(),
            enemies = self.enemies.len(),
            "level loaded"
        );
        Ok(())
    }

    /// Restore the pristine level and respawn everything on it
    fn reset_level(&mut self) {
        self.tilemap = self.level.clone();
        self.bullets.clear();
        self.enemies.clear();

        for marker in self.tilemap.extract(&SPAWN_MARKERS, false) {
            match marker.variant {
                PLAYER_SPAWN => self.player.reset_at(marker.pos),
                _ => {
                    self.enemies.spawn(Actor::enemy(marker.pos, self.enemy_size, self.enemy_clips));
                }
            }
        }

        self.camera.snap_to(self.player.rect().center());
    }

    /// Advance the whole world by one tick with horizontal intent `intent`
    pub fn tick(&mut self, intent: f32) {
        self.camera.follow(self.player.rect().center());
        self.clouds.update();

        self.player.update(&self.tilemap, Vec2::new(intent, 0.0), &self.physics);
        for (_, enemy) in self.enemies.iter_mut() {
            enemy.update(&self.tilemap, Vec2::ZERO, &self.physics);
        }

        self.update_bullets();

        if self.player.pos.y > self.death_y {
            self.respawn();
        }
    }

    fn respawn(&mut self) {
        let fell_at = self.player.pos;
        self.reset_level();
        self.events.player_respawned.send(RespawnEvent {
            fell_at,
            position: self.player.pos,
        });
    }

    /// Sweep, move and resolve bullets. Removal is deferred through the
    /// bullet pool's despawn queue; killed enemies leave immediately so a
    /// later bullet in the same pass cannot hit them again.
    fn update_bullets(&mut self) {
        let view = self.camera.view();

        let stale: Vec<Entity> = self
            .bullets
            .iter()
            .filter(|(_, bullet)| !bullet.in_view(view.x, view.w))
            .map(|(id, _)| id)
            .collect();
        for id in stale {
            self.bullets.despawn(id);
        }
        self.bullets.flush_despawns();

        for (_, bullet) in self.bullets.iter_mut() {
            bullet.update();
        }

        let mut spent = Vec::new();
        for (bullet_id, bullet) in self.bullets.iter() {
            let rect = bullet.rect();
            let hit = self
                .enemies
                .iter()
                .find(|(_, enemy)| enemy.rect().overlaps(&rect))
                .map(|(id, enemy)| (id, enemy.rect().center()));

            if let Some((enemy_id, position)) = hit {
                self.enemies.remove(enemy_id);
                spent.push(bullet_id);
                self.events.enemy_killed.send(EnemyKilledEvent {
                    enemy: enemy_id,
                    bullet: bullet_id,
                    position,
                });
            }
        }
        for id in spent {
            self.bullets.despawn(id);
        }
        self.bullets.flush_despawns();
    }

    /// Spend a jump charge
    pub fn jump(&mut self) -> bool {
        self.player.jump(&self.physics)
    }

    /// Toggle the firing pose
    pub fn shoot(&mut self) {
        self.player.shoot();
    }

    /// Hold or release the firing pose
    pub fn set_shooting(&mut self, shooting: bool) {
        self.player.set_shooting(shooting);
    }

    /// Spawn a bullet from the player's leading edge, vertically centred
    pub fn fire(&mut self) -> Entity {
        let rect = self.player.rect();
        let size = Vec2::from(self.bullet.size);
        let direction = Bullet::direction_for(self.player.flip);
        let x = if direction < 0.0 { rect.left() - size.x } else { rect.right() };
        let pos = Vec2::new(x, rect.center_y() - size.y / 2.0);

        let id = self.bullets.spawn(Bullet::new(pos, size, direction, self.bullet.speed));
        self.events.bullet_fired.send(BulletFiredEvent {
            bullet: id,
            position: pos,
            direction,
        });
        id
    }
}
