//! Game Module
//!
//! Everything that runs per tick: actors, bullets, the pools that hold them,
//! the camera, clouds and the World that ties them together. Drawing lives
//! in `renderer`; it reads the World but never mutates it.
//!
//! Key concepts:
//! - Entity: generational handle into a Pool
//! - Pool: slot storage with deferred despawn
//! - World: explicit game context, one `tick` per frame
//! - Event: per-tick notifications drained by the driver

pub mod actor;
pub mod animation;
pub mod bullet;
pub mod camera;
pub mod clock;
pub mod clouds;
pub mod entity;
pub mod event;
pub mod pool;
pub mod renderer;
pub mod score;
pub mod world;

// Re-export main types
pub use animation::{Action, ClipTable};
pub use clock::FrameClock;
pub use clouds::Clouds;
pub use renderer::{draw_hud, draw_world, ScreenCanvas};
pub use score::Scoreboard;
pub use world::World;
