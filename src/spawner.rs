use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::constants::*;
use crate::entities::{Bullet, Meteor, Ship};

/// Time-gated admission of meteors and bullets.
pub struct Spawner {
    last_meteor_spawn: Duration,
    last_bullet_spawn: Duration,
    meteor_interval: Duration,
    bullet_interval: Duration,
}

impl Spawner {
    pub fn new(now: Duration) -> Self {
        Spawner {
            last_meteor_spawn: now,
            last_bullet_spawn: now,
            meteor_interval: Duration::from_millis(METEOR_SPAWN_INTERVAL_MS),
            bullet_interval: Duration::from_millis(BULLET_SPAWN_INTERVAL_MS),
        }
    }

    /// Restarts both cadences from `now` so nothing bursts in on resume.
    pub fn reset(&mut self, now: Duration) {
        self.last_meteor_spawn = now;
        self.last_bullet_spawn = now;
    }

    /// Admits one meteor per whole interval elapsed since the last admission.
    ///
    /// The timer advances by the interval rather than jumping to `now`, so a
    /// slow frame is caught up on instead of drifting the long-term rate.
    pub fn admit_meteors(&mut self, now: Duration, rng: &mut impl Rng, meteors: &mut Vec<Meteor>) -> usize {
        let mut admitted = 0;
        while now.saturating_sub(self.last_meteor_spawn) >= self.meteor_interval {
            let x = PLAYFIELD_WIDTH + METEOR_SPAWN_MARGIN;
            let y = rng.gen_range(0.0..PLAYFIELD_HEIGHT - METEOR_HEIGHT);
            debug!("Meteor spawned at ({}, {:.1})", x, y);
            meteors.push(Meteor::new(x, y));
            self.last_meteor_spawn += self.meteor_interval;
            admitted += 1;
        }
        admitted
    }

    /// Fires one bullet from the ship when the fire interval has elapsed.
    pub fn admit_bullet(&mut self, now: Duration, ship: &Ship, bullets: &mut Vec<Bullet>) -> bool {
        if now.saturating_sub(self.last_bullet_spawn) < self.bullet_interval {
            return false;
        }
        let bullet = Bullet::fired_from(ship);
        debug!("Bullet fired at ({:.1}, {:.1})", bullet.position.x, bullet.position.y);
        bullets.push(bullet);
        self.last_bullet_spawn = now;
        true
    }
}
