// --- Playfield ---
pub const PLAYFIELD_WIDTH: f64 = 600.0;
pub const PLAYFIELD_HEIGHT: f64 = 300.0;

// --- Ship ---
pub const SHIP_WIDTH: f64 = 25.0;
pub const SHIP_HEIGHT: f64 = 25.0;
pub const SHIP_BASE_ACCELERATION: f64 = 1.5; // px/s added to velocity per frame
pub const SHIP_BOOST_FACTOR: f64 = 2.5;
pub const SHIP_RESISTANCE: f64 = 0.975;
pub const SHIP_BOUNCE_RESTITUTION: f64 = -0.1;

// --- Meteors ---
pub const METEOR_WIDTH: f64 = 20.0;
pub const METEOR_HEIGHT: f64 = 20.0;
pub const METEOR_SPEED: f64 = 2.4; // px per frame
pub const METEOR_SPAWN_MARGIN: f64 = 300.0; // spawn this far past the right edge
pub const METEOR_SPAWN_INTERVAL_MS: u64 = 1000;

// --- Bullets ---
pub const BULLET_WIDTH: f64 = 12.0; // SHIP_WIDTH / 2, integer division
pub const BULLET_HEIGHT: f64 = 5.0; // SHIP_HEIGHT / 5
pub const BULLET_SPEED: f64 = 3.0; // px per frame
pub const BULLET_MUZZLE_OFFSET_Y: f64 = 10.0;
pub const BULLET_SPAWN_INTERVAL_MS: u64 = 500;

// Entities further than this outside the playfield can never interact again.
pub const DESPAWN_MARGIN: f64 = 50.0;

// --- Host ---
pub const FRAME_PERIOD_MS: u64 = 16;
pub const KEY_HOLD_WINDOW_MS: u64 = 120;
