use crate::constants::*;
use crate::rendering::GameGrid;
use crate::types::{Rect, Vector2D};

// --- Ship ---
pub struct Ship {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub alive: bool,
}

impl Ship {
    pub fn new(x: f64, y: f64) -> Self {
        Ship {
            position: Vector2D::new(x, y),
            velocity: Vector2D::ZERO,
            acceleration: Vector2D::ZERO,
            alive: true,
        }
    }

    /// Ship parked at the playfield center, at rest.
    pub fn centered() -> Self {
        Ship::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, SHIP_WIDTH, SHIP_HEIGHT)
    }

    pub fn freeze(&mut self) {
        self.velocity = Vector2D::ZERO;
        self.acceleration = Vector2D::ZERO;
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        let glyph = if self.alive { 'A' } else { 'X' };
        game_grid.fill_rect(&self.bounds(), glyph);
    }
}

// --- Meteor ---
pub struct Meteor {
    pub position: Vector2D,
    pub velocity_x: f64,
}

impl Meteor {
    pub fn new(x: f64, y: f64) -> Self {
        Meteor { position: Vector2D::new(x, y), velocity_x: -METEOR_SPEED }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, METEOR_WIDTH, METEOR_HEIGHT)
    }

    pub fn update(&mut self) {
        self.position.x += self.velocity_x;
    }

    /// Meteors only travel left, so once past the left margin they are gone for good.
    pub fn is_expired(&self) -> bool {
        self.position.x + METEOR_WIDTH < -DESPAWN_MARGIN
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(&self.bounds(), '@');
    }
}

// --- Bullet ---
pub struct Bullet {
    pub position: Vector2D,
    pub velocity_x: f64,
}

impl Bullet {
    pub fn new(x: f64, y: f64) -> Self {
        Bullet { position: Vector2D::new(x, y), velocity_x: BULLET_SPEED }
    }

    /// Bullet leaving the muzzle of `ship`.
    pub fn fired_from(ship: &Ship) -> Self {
        Bullet::new(ship.position.x, ship.position.y + BULLET_MUZZLE_OFFSET_Y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn update(&mut self) {
        self.position.x += self.velocity_x;
    }

    /// Bullets past the right edge are no longer eligible to hit anything.
    pub fn in_play(&self) -> bool {
        self.position.x <= PLAYFIELD_WIDTH
    }

    pub fn is_expired(&self) -> bool {
        self.position.x > PLAYFIELD_WIDTH + DESPAWN_MARGIN
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(&self.bounds(), '-');
    }
}
