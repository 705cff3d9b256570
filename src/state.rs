//! Simulation loop: owns every live entity and advances the world one frame
//! at a time.

use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision;
use crate::entities::{Bullet, Meteor, Ship};
use crate::input::{Action, InputState};
use crate::kinematics;
use crate::rendering::GameGrid;
use crate::spawner::Spawner;
use crate::types::Vector2D;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Something that can be put back to its starting state.
pub trait Restartable {
    /// Returns whether the restart was honored.
    fn restart(&mut self, now: Duration) -> bool;
}

pub struct GameState {
    ship: Ship,
    meteors: Vec<Meteor>,
    bullets: Vec<Bullet>,
    score: u32,
    spawner: Spawner,
    last_update: Duration,
    rng: StdRng,
}

impl GameState {
    pub fn new(now: Duration) -> Self {
        GameState::with_rng(StdRng::from_entropy(), now)
    }

    pub fn with_seed(seed: u64, now: Duration) -> Self {
        GameState::with_rng(StdRng::seed_from_u64(seed), now)
    }

    fn with_rng(rng: StdRng, now: Duration) -> Self {
        GameState {
            ship: Ship::centered(),
            meteors: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            spawner: Spawner::new(now),
            last_update: now,
            rng,
        }
    }

    /// Advances the world to `now`.
    ///
    /// Order matters: restart, ship motion, ship collision, then either
    /// spawning (alive) or freezing (dead), entity motion, bullet hits, and
    /// finally eviction of anything off-field.
    pub fn update(&mut self, input: &InputState, now: Duration) {
        let dt = now.saturating_sub(self.last_update).as_secs_f64();
        self.last_update = now;

        if input.is_held(Action::Restart) {
            self.restart(now);
        }

        kinematics::update_ship(&mut self.ship, input, dt);

        if self.ship.alive && collision::ship_hit(&self.ship, &self.meteors) {
            self.ship.alive = false;
            info!("Game over. Final score: {}", self.score);
        }
        if self.ship.alive {
            self.spawner.admit_meteors(now, &mut self.rng, &mut self.meteors);
            self.spawner.admit_bullet(now, &self.ship, &mut self.bullets);
        } else {
            self.freeze_world();
        }

        for meteor in &mut self.meteors {
            meteor.update();
        }
        for bullet in &mut self.bullets {
            bullet.update();
        }

        self.score += collision::resolve_bullet_hits(&mut self.bullets, &mut self.meteors);
        self.evict_off_field();
    }

    fn freeze_world(&mut self) {
        self.ship.freeze();
        for meteor in &mut self.meteors {
            meteor.velocity_x = 0.0;
        }
        for bullet in &mut self.bullets {
            bullet.velocity_x = 0.0;
        }
    }

    fn evict_off_field(&mut self) {
        let (meteors_before, bullets_before) = (self.meteors.len(), self.bullets.len());
        self.meteors.retain(|meteor| !meteor.is_expired());
        self.bullets.retain(|bullet| !bullet.is_expired());
        let evicted = meteors_before - self.meteors.len() + bullets_before - self.bullets.len();
        if evicted > 0 {
            debug!("Evicted {} off-field entities", evicted);
        }
    }

    pub fn phase(&self) -> Phase {
        if self.ship.alive { Phase::Running } else { Phase::GameOver }
    }

    pub fn is_alive(&self) -> bool {
        self.ship.alive
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ship_position(&self) -> Vector2D {
        self.ship.position
    }

    pub fn meteor_positions(&self) -> impl Iterator<Item = Vector2D> + '_ {
        self.meteors.iter().map(|meteor| meteor.position)
    }

    pub fn bullet_positions(&self) -> impl Iterator<Item = Vector2D> + '_ {
        self.bullets.iter().map(|bullet| bullet.position)
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        for bullet in &self.bullets {
            bullet.draw(game_grid);
        }
        self.ship.draw(game_grid);
        for meteor in &self.meteors {
            meteor.draw(game_grid);
        }
    }
}

impl Restartable for GameState {
    fn restart(&mut self, now: Duration) -> bool {
        if self.ship.alive {
            return false;
        }
        self.meteors.clear();
        self.bullets.clear();
        self.score = 0;
        self.ship = Ship::centered();
        self.spawner.reset(now);
        self.last_update = now;
        info!("Game restarted");
        true
    }
}
