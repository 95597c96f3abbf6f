//! Physics Actors
//!
//! Player and enemies share one struct: position, velocity, collision flags,
//! facing and animation. Kind-specific state lives in [`ActorKind`], so the
//! per-tick loop stays a plain match instead of dynamic dispatch.
//!
//! Movement is resolved one axis at a time against the solid tiles around the
//! actor: x first, then y. Reproducing that order matters, since it decides
//! which way an actor gets pushed when it clips a tile corner.

use macroquad::math::Vec2;

use crate::config::PhysicsConfig;
use crate::world::{Rect, Tilemap};
use super::animation::{Action, Animation, ClipTable};

/// Offset from the hitbox to where the sprite is drawn
pub const SPRITE_OFFSET: Vec2 = Vec2::new(-3.0, -3.0);

/// Player gets one jump per landing
pub const MAX_JUMPS: u32 = 1;

/// `air_time` above this selects the jump animation
const AIRBORNE_TICKS: u32 = 4;

/// `air_time` set by a jump so the jump pose shows immediately
const JUMP_AIR_TIME: u32 = 5;

/// Source of solid rectangles near a position
pub trait SolidQuery {
    fn physics_rects_around(&self, pos: Vec2) -> Vec<Rect>;
}

impl SolidQuery for Tilemap {
    fn physics_rects_around(&self, pos: Vec2) -> Vec<Rect> {
        Tilemap::physics_rects_around(self, pos)
    }
}

/// Which sides touched a solid during the last update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collisions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Player-only state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Ticks since last grounded
    pub air_time: u32,
    /// Remaining jump charges
    pub jumps: u32,
    /// Firing pose toggle
    pub is_shooting: bool,
    /// Hitbox while standing, running or jumping
    pub stand_size: Vec2,
    /// Hitbox while in the shoot pose
    pub shoot_size: Vec2,
}

impl PlayerState {
    fn new(stand_size: Vec2, shoot_size: Vec2) -> Self {
        Self {
            air_time: 0,
            jumps: MAX_JUMPS,
            is_shooting: false,
            stand_size,
            shoot_size,
        }
    }

    fn select_action(&self, intent_x: f32) -> Action {
        if self.air_time > AIRBORNE_TICKS {
            Action::Jump
        } else if intent_x != 0.0 {
            Action::Run
        } else if self.is_shooting {
            Action::Shoot
        } else {
            Action::Idle
        }
    }
}

/// Actor type with its behavior-specific data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorKind {
    Player(PlayerState),
    Enemy,
}

/// A physics-driven sprite
#[derive(Debug, Clone)]
pub struct Actor {
    pub kind: ActorKind,
    /// Top-left of the hitbox
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub collisions: Collisions,
    /// Facing left
    pub flip: bool,
    action: Action,
    animation: Animation,
    clips: ClipTable,
}

impl Actor {
    fn new(kind: ActorKind, pos: Vec2, size: Vec2, clips: ClipTable) -> Self {
        Self {
            kind,
            pos,
            size,
            velocity: Vec2::ZERO,
            collisions: Collisions::default(),
            flip: false,
            action: Action::Idle,
            animation: Animation::new(clips.get(Action::Idle)),
            clips,
        }
    }

    pub fn player(pos: Vec2, size: Vec2, shoot_size: Vec2, clips: ClipTable) -> Self {
        Self::new(ActorKind::Player(PlayerState::new(size, shoot_size)), pos, size, clips)
    }

    pub fn enemy(pos: Vec2, size: Vec2, clips: ClipTable) -> Self {
        Self::new(ActorKind::Enemy, pos, size, clips)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    #[cfg(test)]
    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            ActorKind::Player(state) => Some(state),
            ActorKind::Enemy => None,
        }
    }

    /// Switch animation; re-selecting the current action keeps playback going
    pub fn set_action(&mut self, action: Action) {
        if action != self.action {
            self.action = action;
            self.animation = Animation::new(self.clips.get(action));
        }
    }

    /// Run one tick: physics against nearby solids, then kind-specific state.
    pub fn update(&mut self, solids: &impl SolidQuery, movement: Vec2, physics: &PhysicsConfig) {
        self.step_physics(solids, movement, physics);

        let (next, size) = match &mut self.kind {
            ActorKind::Player(state) => {
                state.air_time += 1;
                if self.collisions.down {
                    state.air_time = 0;
                    state.jumps = MAX_JUMPS;
                }
                let next = state.select_action(movement.x);
                let size = match next {
                    Action::Shoot => Some(state.shoot_size),
                    Action::Idle => Some(state.stand_size),
                    Action::Run | Action::Jump => None,
                };
                (next, size)
            }
            ActorKind::Enemy => {
                let next = if movement.x != 0.0 { Action::Run } else { Action::Idle };
                (next, None)
            }
        };

        if let Some(size) = size {
            self.size = size;
        }
        self.set_action(next);
    }

    /// Shared movement and collision step
    fn step_physics(&mut self, solids: &impl SolidQuery, movement: Vec2, physics: &PhysicsConfig) {
        self.collisions = Collisions::default();

        let frame_movement = movement + self.velocity;

        self.pos.x += frame_movement.x;
        let mut rect = self.rect();
        for tile in solids.physics_rects_around(self.pos) {
            if rect.overlaps(&tile) {
                if frame_movement.x > 0.0 {
                    rect.set_right(tile.left());
                    self.collisions.right = true;
                }
                if frame_movement.x < 0.0 {
                    rect.set_left(tile.right());
                    self.collisions.left = true;
                }
                self.pos.x = rect.x;
            }
        }

        self.pos.y += frame_movement.y;
        let mut rect = self.rect();
        for tile in solids.physics_rects_around(self.pos) {
            if rect.overlaps(&tile) {
                if frame_movement.y > 0.0 {
                    rect.set_bottom(tile.top());
                    self.collisions.down = true;
                }
                if frame_movement.y < 0.0 {
                    rect.set_top(tile.bottom());
                    self.collisions.up = true;
                }
                self.pos.y = rect.y;
            }
        }

        if movement.x > 0.0 {
            self.flip = false;
        }
        if movement.x < 0.0 {
            self.flip = true;
        }

        self.velocity.y = (self.velocity.y + physics.gravity).min(physics.terminal_velocity);

        // Only a floor-and-ceiling squeeze cancels vertical speed
        if self.collisions.down && self.collisions.up {
            self.velocity.y = 0.0;
        }

        self.animation.update();
    }

    /// Spend a jump charge. Returns false when no charge is left or not a player.
    pub fn jump(&mut self, physics: &PhysicsConfig) -> bool {
        let ActorKind::Player(state) = &mut self.kind else { return false };
        if state.jumps == 0 {
            return false;
        }
        self.velocity.y = physics.jump_velocity;
        state.jumps -= 1;
        state.air_time = JUMP_AIR_TIME;
        true
    }

    /// Toggle the firing pose
    pub fn shoot(&mut self) {
        if let ActorKind::Player(state) = &mut self.kind {
            state.is_shooting = !state.is_shooting;
        }
    }

    /// Set the firing pose explicitly
    pub fn set_shooting(&mut self, shooting: bool) {
        if let ActorKind::Player(state) = &mut self.kind {
            state.is_shooting = shooting;
        }
    }

    /// Put the actor back at a spawn point without recreating it
    pub fn reset_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.velocity = Vec2::ZERO;
        self.collisions = Collisions::default();
        if let ActorKind::Player(state) = &mut self.kind {
            state.air_time = 0;
            state.jumps = MAX_JUMPS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed set of solids, returned regardless of position
    struct Solids(Vec<Rect>);

    impl SolidQuery for Solids {
        fn physics_rects_around(&self, _pos: Vec2) -> Vec<Rect> {
            self.0.clone()
        }
    }

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn player_at(x: f32, y: f32) -> Actor {
        Actor::player(
            Vec2::new(x, y),
            Vec2::new(10.0, 11.0),
            Vec2::new(10.0, 10.0),
            ClipTable::player(),
        )
    }

    /// Player standing on the tile row at y=16
    fn grounded_player() -> (Actor, Solids) {
        let floor = Solids(vec![
            Rect::new(0.0, 16.0, 16.0, 16.0),
            Rect::new(16.0, 16.0, 16.0, 16.0),
            Rect::new(32.0, 16.0, 16.0, 16.0),
        ]);
        let mut player = player_at(10.0, 5.0);
        // First tick only picks up gravity, the second presses into the floor
        player.update(&floor, Vec2::ZERO, &physics());
        player.update(&floor, Vec2::ZERO, &physics());
        assert!(player.collisions.down);
        (player, floor)
    }

    #[test]
    fn test_free_movement_adds_intent_and_velocity() {
        let empty = Solids(Vec::new());
        let mut player = player_at(50.0, 50.0);
        player.velocity = Vec2::new(0.5, 1.25);
        player.update(&empty, Vec2::new(1.0, 0.0), &physics());
        assert_eq!(player.pos, Vec2::new(51.5, 51.25));
        assert_eq!(player.collisions, Collisions::default());
    }

    #[test]
    fn test_gravity_accumulates_to_terminal_velocity() {
        let empty = Solids(Vec::new());
        let mut enemy = Actor::enemy(Vec2::ZERO, Vec2::new(8.0, 15.0), ClipTable::enemy());
        enemy.velocity.y = 4.85;
        enemy.update(&empty, Vec2::ZERO, &physics());
        assert_eq!(enemy.velocity.y, (4.85f32 + 0.1).min(5.0));

        for _ in 0..100 {
            enemy.update(&empty, Vec2::ZERO, &physics());
            assert!(enemy.velocity.y <= 5.0);
        }
        assert_eq!(enemy.velocity.y, 5.0);
    }

    #[test]
    fn test_landing_clamps_to_floor_top() {
        let floor = Solids(vec![Rect::new(0.0, 16.0, 16.0, 16.0)]);
        let mut player = player_at(2.0, 4.0);
        player.velocity.y = 3.0;
        player.update(&floor, Vec2::ZERO, &physics());
        assert!(player.collisions.down);
        assert_eq!(player.rect().bottom(), 16.0);
        assert!(!player.rect().overlaps(&floor.0[0]));
    }

    #[test]
    fn test_grounded_velocity_keeps_accumulating() {
        let (mut player, floor) = grounded_player();
        let before = player.velocity.y;
        player.update(&floor, Vec2::ZERO, &physics());
        assert!(player.collisions.down);
        assert!(!player.collisions.up);
        assert!(player.velocity.y > before);
    }

    #[test]
    fn test_wall_blocks_right_then_left() {
        let wall = Solids(vec![Rect::new(32.0, 0.0, 16.0, 16.0)]);
        let mut player = player_at(21.5, 2.0);
        player.update(&wall, Vec2::new(1.0, 0.0), &physics());
        assert!(player.collisions.right);
        assert_eq!(player.rect().right(), 32.0);
        assert!(!player.rect().overlaps(&wall.0[0]));

        let wall = Solids(vec![Rect::new(0.0, 0.0, 16.0, 16.0)]);
        let mut player = player_at(16.5, 2.0);
        player.update(&wall, Vec2::new(-1.0, 0.0), &physics());
        assert!(player.collisions.left);
        assert_eq!(player.pos.x, 16.0);
    }

    #[test]
    fn test_x_resolves_before_y() {
        // Diagonal approach to a block corner: resolving x first finds no
        // overlap, so the y pass lands the player on top of the block.
        // Resolving y first would instead push the player off to the left.
        let block = Solids(vec![Rect::new(20.0, 20.0, 16.0, 16.0)]);
        let mut player = player_at(9.0, 8.0);
        player.velocity = Vec2::new(0.5, 2.0);
        player.update(&block, Vec2::new(1.0, 0.0), &physics());
        assert!(!player.collisions.right);
        assert!(player.collisions.down);
        assert_eq!(player.pos, Vec2::new(10.5, 9.0));
    }

    #[test]
    fn test_ceiling_bump() {
        let ceiling = Solids(vec![Rect::new(0.0, 0.0, 16.0, 16.0)]);
        let mut player = player_at(2.0, 17.0);
        player.velocity.y = -3.0;
        player.update(&ceiling, Vec2::ZERO, &physics());
        assert!(player.collisions.up);
        assert_eq!(player.pos.y, 16.0);
    }

    #[test]
    fn test_facing_follows_intent() {
        let empty = Solids(Vec::new());
        let mut player = player_at(0.0, 0.0);
        player.update(&empty, Vec2::new(-1.0, 0.0), &physics());
        assert!(player.flip);
        player.update(&empty, Vec2::ZERO, &physics());
        assert!(player.flip);
        player.update(&empty, Vec2::new(1.0, 0.0), &physics());
        assert!(!player.flip);
        player.update(&empty, Vec2::ZERO, &physics());
        assert!(!player.flip);
    }

    #[test]
    fn test_jump_spends_single_charge() {
        let (mut player, _) = grounded_player();
        let state = *player.player_state().unwrap();
        assert_eq!(state.jumps, 1);

        assert!(player.jump(&physics()));
        assert_eq!(player.velocity.y, -3.0);
        let state = *player.player_state().unwrap();
        assert_eq!(state.jumps, 0);
        assert_eq!(state.air_time, 5);

        player.velocity.y = -1.0;
        assert!(!player.jump(&physics()));
        assert_eq!(player.velocity.y, -1.0);
    }

    #[test]
    fn test_landing_refills_jump() {
        let (mut player, floor) = grounded_player();
        player.jump(&physics());
        // Rise and fall back onto the floor
        let mut landed = false;
        for _ in 0..200 {
            player.update(&floor, Vec2::ZERO, &physics());
            if player.collisions.down {
                landed = true;
                break;
            }
        }
        assert!(landed);
        let state = player.player_state().unwrap();
        assert_eq!(state.jumps, 1);
        assert_eq!(state.air_time, 0);
    }

    #[test]
    fn test_action_priority() {
        let (mut player, floor) = grounded_player();
        assert_eq!(player.action(), Action::Idle);

        player.shoot();
        player.update(&floor, Vec2::ZERO, &physics());
        assert_eq!(player.action(), Action::Shoot);
        assert_eq!(player.size, Vec2::new(10.0, 10.0));

        player.update(&floor, Vec2::new(1.0, 0.0), &physics());
        assert_eq!(player.action(), Action::Run);

        player.jump(&physics());
        player.update(&floor, Vec2::new(1.0, 0.0), &physics());
        assert_eq!(player.action(), Action::Jump);
    }

    #[test]
    fn test_idle_restores_standing_size() {
        let (mut player, floor) = grounded_player();
        player.set_shooting(true);
        player.update(&floor, Vec2::ZERO, &physics());
        assert_eq!(player.size.y, 10.0);
        player.set_shooting(false);
        player.update(&floor, Vec2::ZERO, &physics());
        assert_eq!(player.action(), Action::Idle);
        assert_eq!(player.size.y, 11.0);
    }

    #[test]
    fn test_shoot_toggles() {
        let mut player = player_at(0.0, 0.0);
        player.shoot();
        assert!(player.player_state().unwrap().is_shooting);
        player.shoot();
        assert!(!player.player_state().unwrap().is_shooting);
    }

    #[test]
    fn test_reselecting_action_keeps_frame() {
        let empty = Solids(Vec::new());
        let mut enemy = Actor::enemy(Vec2::ZERO, Vec2::new(8.0, 15.0), ClipTable::enemy());
        enemy.update(&empty, Vec2::new(1.0, 0.0), &physics());
        assert_eq!(enemy.action(), Action::Run);
        enemy.update(&empty, Vec2::new(1.0, 0.0), &physics());
        assert_eq!(enemy.animation().frame(), 1);
        enemy.set_action(Action::Run);
        assert_eq!(enemy.animation().frame(), 1);
        enemy.set_action(Action::Idle);
        assert_eq!(enemy.animation().frame(), 0);
    }

    #[test]
    fn test_enemy_ignores_player_commands() {
        let mut enemy = Actor::enemy(Vec2::ZERO, Vec2::new(8.0, 15.0), ClipTable::enemy());
        assert!(!enemy.jump(&physics()));
        enemy.shoot();
        assert_eq!(enemy.velocity, Vec2::ZERO);
        assert!(enemy.player_state().is_none());
    }

    #[test]
    fn test_reset_at_keeps_actor() {
        let empty = Solids(Vec::new());
        let mut player = player_at(0.0, 0.0);
        player.jump(&physics());
        player.update(&empty, Vec2::new(1.0, 0.0), &physics());
        player.reset_at(Vec2::new(40.0, 8.0));
        assert_eq!(player.pos, Vec2::new(40.0, 8.0));
        assert_eq!(player.velocity, Vec2::ZERO);
        let state = player.player_state().unwrap();
        assert_eq!(state.jumps, 1);
        assert_eq!(state.air_time, 0);
    }
}
