//! Target selection for auto-fire

use glam::DVec2;

use super::actor::{Body, Enemy, Player};
use super::physics::distance;

/// Index of the body closest to `from`.
///
/// Linear scan with a strict `<`, so the earliest of several equally close
/// bodies wins. None if `bodies` is empty.
pub fn nearest_index<T: Body>(from: DVec2, bodies: &[T]) -> Option<usize> {
    let mut closest = None;
    let mut closest_dist = f64::INFINITY;
    for (i, body) in bodies.iter().enumerate() {
        let d = distance(from, body.pos());
        if d < closest_dist {
            closest_dist = d;
            closest = Some(i);
        }
    }
    closest
}

/// The enemy nearest to the player, if any
pub fn nearest_enemy<'a>(player: &Player, enemies: &'a [Enemy]) -> Option<&'a Enemy> {
    nearest_index(player.pos, enemies).map(|i| &enemies[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn enemies_at(xs: &[f64]) -> Vec<Enemy> {
        let tuning = Tuning::default();
        xs.iter()
            .enumerate()
            .map(|(i, &x)| Enemy::new(i as u32, DVec2::new(x, 0.0), &tuning))
            .collect()
    }

    #[test]
    fn test_nearest_by_distance() {
        let tuning = Tuning::default();
        let player = Player::new(DVec2::ZERO, &tuning);
        let enemies = enemies_at(&[5.0, 3.0, 9.0]);
        assert_eq!(nearest_index(player.pos, &enemies), Some(1));
        assert_eq!(nearest_enemy(&player, &enemies).map(|e| e.id), Some(1));
    }

    #[test]
    fn test_ties_go_to_first() {
        let enemies = enemies_at(&[4.0, -4.0, 4.0]);
        assert_eq!(nearest_index(DVec2::ZERO, &enemies), Some(0));
    }

    #[test]
    fn test_empty_has_no_target() {
        let player = Player::new(DVec2::ZERO, &Tuning::default());
        assert!(nearest_enemy(&player, &[]).is_none());
    }
}
