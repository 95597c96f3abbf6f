//! Event System
//!
//! The world reports what happened through event queues instead of calling
//! back into the driver. Commands between ticks and the tick itself both
//! push events; the driver drains them once per frame after the tick.

use macroquad::math::Vec2;

use super::entity::Entity;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All per-tick game events
#[derive(Debug, Default)]
pub struct Events {
    pub enemy_killed: EventQueue<EnemyKilledEvent>,
    pub bullet_fired: EventQueue<BulletFiredEvent>,
    pub player_respawned: EventQueue<RespawnEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A bullet destroyed an enemy
#[derive(Debug, Clone, Copy)]
pub struct EnemyKilledEvent {
    pub enemy: Entity,
    pub bullet: Entity,
    /// Centre of the enemy when it was hit
    pub position: Vec2,
}

/// The player fired
#[derive(Debug, Clone, Copy)]
pub struct BulletFiredEvent {
    pub bullet: Entity,
    pub position: Vec2,
    pub direction: f32,
}

/// The player fell out of the level and the level was reloaded
#[derive(Debug, Clone, Copy)]
pub struct RespawnEvent {
    /// Where the player fell from
    pub fell_at: Vec2,
    /// Where the player was placed
    pub position: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();

        events.enemy_killed.send(EnemyKilledEvent {
            enemy: Entity::new(0, 0),
            bullet: Entity::new(1, 0),
            position: Vec2::ZERO,
        });

        assert_eq!(events.enemy_killed.len(), 1);
        assert!(events.bullet_fired.is_empty());

        assert_eq!(events.enemy_killed.drain().count(), 1);
        assert!(events.enemy_killed.is_empty());
    }
}
