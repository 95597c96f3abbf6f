//! Run statistics
//!
//! The driver drains the world's event queues into a [`Scoreboard`] after
//! every tick. Totals carry across level reloads.

use tracing::{debug, info};

use super::event::Events;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub kills: u32,
    pub shots: u32,
    pub falls: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume every pending event
    pub fn record(&mut self, events: &mut Events) {
        for shot in events.bullet_fired.drain() {
            self.shots += 1;
            debug!(
                bullet = %shot.bullet,
                x = shot.position.x,
                y = shot.position.y,
                direction = shot.direction,
                "bullet fired"
            );
        }
        for kill in events.enemy_killed.drain() {
            self.kills += 1;
            info!(
                enemy = %kill.enemy,
                bullet = %kill.bullet,
                x = kill.position.x,
                y = kill.position.y,
                kills = self.kills,
                "enemy killed"
            );
        }
        for fall in events.player_respawned.drain() {
            self.falls += 1;
            info!(
                fell_x = fall.fell_at.x,
                fell_y = fall.fell_at.y,
                x = fall.position.x,
                y = fall.position.y,
                "player fell, level reloaded"
            );
        }
    }

    pub fn hud_line(&self) -> String {
        format!("KILLS {}  SHOTS {}  FALLS {}", self.kills, self.shots, self.falls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::Vec2;

    use crate::game::entity::Entity;
    use crate::game::event::{BulletFiredEvent, EnemyKilledEvent, RespawnEvent};

    #[test]
    fn test_record_drains_every_queue() {
        let mut events = Events::new();
        let bullet = Entity::new(0, 0);
        events.bullet_fired.send(BulletFiredEvent {
            bullet,
            position: Vec2::new(10.0, 20.0),
            direction: 1.0,
        });
        events.bullet_fired.send(BulletFiredEvent {
            bullet: Entity::new(1, 0),
            position: Vec2::new(10.0, 20.0),
            direction: -1.0,
        });
        events.enemy_killed.send(EnemyKilledEvent {
            enemy: Entity::new(0, 0),
            bullet,
            position: Vec2::new(30.0, 20.0),
        });
        events.player_respawned.send(RespawnEvent {
            fell_at: Vec2::new(40.0, 401.0),
            position: Vec2::new(50.0, 150.0),
        });

        let mut score = Scoreboard::new();
        score.record(&mut events);
        assert_eq!(score, Scoreboard { kills: 1, shots: 2, falls: 1 });
        assert!(events.bullet_fired.is_empty());
        assert!(events.enemy_killed.is_empty());
        assert!(events.player_respawned.is_empty());

        // Drained events are not counted twice
        score.record(&mut events);
        assert_eq!(score.shots, 2);
        assert_eq!(score.hud_line(), "KILLS 1  SHOTS 2  FALLS 1");
    }
}
