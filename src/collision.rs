use log::debug;

use crate::entities::{Bullet, Meteor, Ship};

/// Resolves bullet-meteor hits and returns how many pairs were destroyed.
///
/// Bullets are scanned in order, meteors inside; each bullet takes out at
/// most the first live meteor it overlaps. Pairs are collected first and both
/// collections are compacted afterwards, so no entry is skipped or matched twice.
pub fn resolve_bullet_hits(bullets: &mut Vec<Bullet>, meteors: &mut Vec<Meteor>) -> u32 {
    let mut spent_bullets = vec![false; bullets.len()];
    let mut destroyed_meteors = vec![false; meteors.len()];
    let mut hits = 0;

    for (bullet_index, bullet) in bullets.iter().enumerate() {
        if !bullet.in_play() {
            continue;
        }
        let bullet_box = bullet.bounds();
        let target = meteors
            .iter()
            .enumerate()
            .find(|(meteor_index, meteor)| !destroyed_meteors[*meteor_index] && bullet_box.overlaps(&meteor.bounds()));

        if let Some((meteor_index, meteor)) = target {
            debug!(
                "Bullet at ({:.1}, {:.1}) destroyed meteor at ({:.1}, {:.1})",
                bullet.position.x, bullet.position.y, meteor.position.x, meteor.position.y
            );
            spent_bullets[bullet_index] = true;
            destroyed_meteors[meteor_index] = true;
            hits += 1;
        }
    }

    if hits > 0 {
        let mut spent = spent_bullets.into_iter();
        bullets.retain(|_| !spent.next().unwrap_or(false));
        let mut destroyed = destroyed_meteors.into_iter();
        meteors.retain(|_| !destroyed.next().unwrap_or(false));
    }
    hits
}

/// Whether any meteor overlaps the ship.
pub fn ship_hit(ship: &Ship, meteors: &[Meteor]) -> bool {
    let ship_box = ship.bounds();
    meteors.iter().any(|meteor| ship_box.overlaps(&meteor.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distant_pair_never_collides() {
        let mut bullets = vec![Bullet::new(0.0, 100.0)];
        let mut meteors = vec![Meteor::new(1000.0, 100.0)];
        assert_eq!(resolve_bullet_hits(&mut bullets, &mut meteors), 0);
        assert_eq!(bullets.len(), 1);
        assert_eq!(meteors.len(), 1);
    }

    #[test]
    fn overlapping_pair_is_removed_once() {
        let mut bullets = vec![Bullet::new(100.0, 100.0)];
        let mut meteors = vec![Meteor::new(111.0, 104.0)];
        assert_eq!(resolve_bullet_hits(&mut bullets, &mut meteors), 1);
        assert!(bullets.is_empty());
        assert!(meteors.is_empty());
    }

    #[test]
    fn bullet_destroys_only_the_first_meteor_it_overlaps() {
        let mut bullets = vec![Bullet::new(100.0, 100.0)];
        let mut meteors = vec![Meteor::new(95.0, 95.0), Meteor::new(100.0, 100.0)];
        assert_eq!(resolve_bullet_hits(&mut bullets, &mut meteors), 1);
        assert!(bullets.is_empty());
        assert_eq!(meteors.len(), 1);
        assert_eq!(meteors[0].position.x, 100.0);
    }

    #[test]
    fn second_bullet_cannot_claim_a_destroyed_meteor() {
        let mut bullets = vec![Bullet::new(100.0, 100.0), Bullet::new(101.0, 100.0)];
        let mut meteors = vec![Meteor::new(100.0, 100.0)];
        assert_eq!(resolve_bullet_hits(&mut bullets, &mut meteors), 1);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].position.x, 101.0);
        assert!(meteors.is_empty());
    }

    #[test]
    fn compaction_keeps_survivors_in_order() {
        let mut bullets = vec![
            Bullet::new(10.0, 10.0),
            Bullet::new(200.0, 200.0),
            Bullet::new(400.0, 50.0),
            Bullet::new(50.0, 250.0),
        ];
        let mut meteors = vec![
            Meteor::new(400.0, 50.0),
            Meteor::new(500.0, 150.0),
            Meteor::new(10.0, 10.0),
        ];
        assert_eq!(resolve_bullet_hits(&mut bullets, &mut meteors), 2);

        let bullet_xs: Vec<f64> = bullets.iter().map(|b| b.position.x).collect();
        assert_eq!(bullet_xs, vec![200.0, 50.0]);
        assert_eq!(meteors.len(), 1);
        assert_eq!(meteors[0].position.x, 500.0);
    }

    #[test]
    fn bullets_past_the_right_edge_do_not_hit() {
        let mut bullets = vec![Bullet::new(605.0, 100.0)];
        let mut meteors = vec![Meteor::new(600.0, 100.0)];
        assert_eq!(resolve_bullet_hits(&mut bullets, &mut meteors), 0);
        assert_eq!(meteors.len(), 1);
    }

    #[test]
    fn ship_overlap_is_detected() {
        let ship = Ship::new(300.0, 150.0);
        assert!(!ship_hit(&ship, &[Meteor::new(340.0, 150.0)]));
        assert!(ship_hit(&ship, &[Meteor::new(340.0, 150.0), Meteor::new(324.0, 174.0)]));
        assert!(!ship_hit(&ship, &[Meteor::new(325.0, 150.0)]));
    }
}
