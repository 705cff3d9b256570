//! Ship motion: per-frame acceleration from held keys, resistance, and
//! boundary bounce.
//!
//! Velocity gains a fixed increment every frame, while position advances by
//! `velocity * dt`. Acceleration therefore depends on the frame rate and
//! position integration does not; the play feel is tuned around that.

use crate::constants::*;
use crate::entities::Ship;
use crate::input::{Action, InputState};
use crate::types::Vector2D;

/// Sets the ship's acceleration for this frame from the held actions.
pub fn steer(ship: &mut Ship, input: &InputState) {
    ship.acceleration = Vector2D::ZERO;

    let mut acc = SHIP_BASE_ACCELERATION;
    if input.is_held(Action::Boost) {
        acc *= SHIP_BOOST_FACTOR;
    }

    // Axes are independent; a diagonal is not normalized.
    if input.is_held(Action::Up) {
        ship.acceleration.y = -acc;
    }
    if input.is_held(Action::Down) {
        ship.acceleration.y = acc;
    }
    if input.is_held(Action::Left) {
        ship.acceleration.x = -acc;
    }
    if input.is_held(Action::Right) {
        ship.acceleration.x = acc;
    }
}

/// Advances velocity and position by one frame, `dt` seconds after the last one.
pub fn integrate(ship: &mut Ship, dt: f64) {
    ship.velocity = ship.velocity.add(ship.acceleration).scale(SHIP_RESISTANCE);
    ship.position = ship.position.add(ship.velocity.scale(dt));

    let (x, vx) = bounce(ship.position.x, ship.velocity.x, PLAYFIELD_WIDTH - SHIP_WIDTH);
    let (y, vy) = bounce(ship.position.y, ship.velocity.y, PLAYFIELD_HEIGHT - SHIP_HEIGHT);
    ship.position = Vector2D::new(x, y);
    ship.velocity = Vector2D::new(vx, vy);
}

/// Full kinematics step. A dead ship stays frozen whatever the input.
pub fn update_ship(ship: &mut Ship, input: &InputState, dt: f64) {
    steer(ship, input);
    if !ship.alive {
        ship.freeze();
    }
    integrate(ship, dt);
}

// Clamp one coordinate into [0, max]; touching either wall reverses and damps the velocity.
fn bounce(position: f64, velocity: f64, max: f64) -> (f64, f64) {
    if position > 0.0 && position < max {
        return (position, velocity);
    }
    (position.clamp(0.0, max), velocity * SHIP_BOUNCE_RESTITUTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;
    const MAX_X: f64 = PLAYFIELD_WIDTH - SHIP_WIDTH;
    const MAX_Y: f64 = PLAYFIELD_HEIGHT - SHIP_HEIGHT;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn speed(ship: &Ship) -> f64 {
        ship.velocity.x.hypot(ship.velocity.y)
    }

    #[test]
    fn diagonal_input_accelerates_both_axes_unnormalized() {
        let mut ship = Ship::centered();
        let input = InputState::from_actions(&[Action::Up, Action::Right]);
        update_ship(&mut ship, &input, 0.0);

        assert_eq!(ship.acceleration, Vector2D::new(SHIP_BASE_ACCELERATION, -SHIP_BASE_ACCELERATION));
        assert!(approx(ship.velocity.x, SHIP_BASE_ACCELERATION * SHIP_RESISTANCE));
        assert!(approx(ship.velocity.y, -SHIP_BASE_ACCELERATION * SHIP_RESISTANCE));
    }

    #[test]
    fn boost_multiplies_acceleration_for_the_frame() {
        let mut ship = Ship::centered();
        update_ship(&mut ship, &InputState::from_actions(&[Action::Boost, Action::Left]), 0.0);
        assert!(approx(ship.acceleration.x, -SHIP_BASE_ACCELERATION * SHIP_BOOST_FACTOR));

        update_ship(&mut ship, &InputState::from_actions(&[Action::Left]), 0.0);
        assert!(approx(ship.acceleration.x, -SHIP_BASE_ACCELERATION));
    }

    #[test]
    fn position_moves_by_velocity_times_dt() {
        let mut ship = Ship::centered();
        ship.velocity = Vector2D::new(40.0, 0.0);
        update_ship(&mut ship, &InputState::new(), 0.5);
        assert!(approx(ship.position.x, 300.0 + 40.0 * SHIP_RESISTANCE * 0.5));
        assert!(approx(ship.position.y, 150.0));
    }

    #[test]
    fn resistance_decays_velocity_without_input() {
        let mut ship = Ship::centered();
        ship.velocity = Vector2D::new(10.0, -4.0);
        let mut previous = speed(&ship);
        for _ in 0..1000 {
            update_ship(&mut ship, &InputState::new(), 0.001);
            let current = speed(&ship);
            assert!(current < previous);
            previous = current;
        }
        assert!(previous < 1e-6);
    }

    #[test]
    fn wall_contact_clamps_and_reverses_velocity() {
        let mut ship = Ship::new(MAX_X - 1.0, 10.0);
        ship.velocity = Vector2D::new(100.0, -200.0);
        update_ship(&mut ship, &InputState::new(), 0.1);

        assert_eq!(ship.position, Vector2D::new(MAX_X, 0.0));
        assert!(approx(ship.velocity.x, 100.0 * SHIP_RESISTANCE * SHIP_BOUNCE_RESTITUTION));
        assert!(ship.velocity.x < 0.0);
        assert!(ship.velocity.y > 0.0);
    }

    #[test]
    fn left_and_bottom_walls_bounce_too() {
        let mut ship = Ship::new(1.0, MAX_Y - 1.0);
        ship.velocity = Vector2D::new(-100.0, 100.0);
        update_ship(&mut ship, &InputState::new(), 0.1);

        assert_eq!(ship.position, Vector2D::new(0.0, MAX_Y));
        assert!(approx(ship.velocity.y, 100.0 * SHIP_RESISTANCE * SHIP_BOUNCE_RESTITUTION));
        assert!(ship.velocity.x > 0.0);
        assert!(ship.velocity.y < 0.0);
    }

    #[test]
    fn ship_never_leaves_the_playfield() {
        let pushes = [
            [Action::Right, Action::Down],
            [Action::Left, Action::Up],
            [Action::Right, Action::Up],
            [Action::Left, Action::Down],
        ];
        let mut ship = Ship::centered();
        for push in pushes {
            let input = InputState::from_actions(&[push[0], push[1], Action::Boost]);
            for _ in 0..2000 {
                update_ship(&mut ship, &input, FRAME);
                assert!((0.0..=MAX_X).contains(&ship.position.x));
                assert!((0.0..=MAX_Y).contains(&ship.position.y));
            }
        }
    }

    #[test]
    fn dead_ship_ignores_input() {
        let mut ship = Ship::new(100.0, 100.0);
        ship.velocity = Vector2D::new(30.0, 30.0);
        ship.alive = false;
        update_ship(&mut ship, &InputState::from_actions(&[Action::Right, Action::Boost]), FRAME);

        assert_eq!(ship.velocity, Vector2D::ZERO);
        assert_eq!(ship.acceleration, Vector2D::ZERO);
        assert_eq!(ship.position, Vector2D::new(100.0, 100.0));
    }
}
