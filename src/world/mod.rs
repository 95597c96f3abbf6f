//! World module - tile-based level data
//!
//! - Sparse tile grid with off-grid decoration, loaded from JSON
//! - Neighborhood queries for tile collision
//! - Spawner marker extraction at level load

mod rect;
mod tilemap;

pub use rect::*;
pub use tilemap::*;
