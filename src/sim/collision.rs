//! Collision detection between the player and world objects
//!
//! Obstacles are lane-aware and action-aware: the obstacle kind dictates
//! which vertical action survives a same-lane pass. Coins use a plain
//! distance check against the player's bounds center. Both sweeps are
//! O(active objects); the spawn/despawn policy bounds the counts.

use glam::Vec3;

use crate::consts::*;

use super::spawner::{Coin, Obstacle, ObstacleKind};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Lane index the bounds center sits in
#[inline]
fn bounds_lane(bounds: &Aabb) -> i8 {
    (bounds.center().x / LANE_WIDTH).round() as i8
}

/// Test the player against all active obstacles. Returns true on a hit.
///
/// Obstacles the player passes cleanly are marked resolved so a later frame
/// (or a re-run of the same frame) can neither re-collide nor re-score them.
pub fn sweep_obstacles(
    obstacles: &mut [Obstacle],
    bounds: &Aabb,
    airborne: bool,
    sliding: bool,
) -> bool {
    let player_lane = bounds_lane(bounds);

    for obstacle in obstacles.iter_mut() {
        if !obstacle.active || obstacle.resolved {
            continue;
        }
        // Only obstacles currently co-located with the player matter
        if obstacle.z.abs() > OBSTACLE_HIT_WINDOW {
            continue;
        }
        if obstacle.lane != player_lane {
            continue;
        }

        let hit = match obstacle.kind {
            ObstacleKind::Jump => !airborne,
            ObstacleKind::Slide => !sliding,
            // Neither jump nor slide resolves it; sharing the lane is the hit
            ObstacleKind::LaneChange => true,
        };
        if hit {
            return true;
        }

        obstacle.resolved = true;
    }

    false
}

/// Collect every active coin within the collection radius of the player.
/// Returns the number collected this frame; collection is strictly additive.
pub fn sweep_coins(coins: &mut [Coin], bounds: &Aabb) -> u32 {
    let center = bounds.center();
    let mut collected = 0;

    for coin in coins.iter_mut() {
        if !coin.active || coin.collected {
            continue;
        }
        let pos = Vec3::new(crate::lane_offset(coin.lane), coin.height, coin.z);
        if pos.distance(center) < COIN_COLLECT_RADIUS {
            coin.collected = true;
            coin.active = false;
            collected += 1;
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_bounds(lane: i8) -> Aabb {
        Aabb::from_center_size(
            Vec3::new(crate::lane_offset(lane), 1.0, 0.0),
            Vec3::new(1.0, 2.0, 1.0),
        )
    }

    fn obstacle(kind: ObstacleKind, lane: i8, z: f32) -> Obstacle {
        Obstacle {
            kind,
            lane,
            z,
            resolved: false,
            active: true,
        }
    }

    #[test]
    fn test_jump_obstacle_hits_grounded_player() {
        let mut obs = [obstacle(ObstacleKind::Jump, 0, 0.0)];
        assert!(sweep_obstacles(&mut obs, &player_bounds(0), false, false));
    }

    #[test]
    fn test_jump_obstacle_cleared_while_airborne() {
        let mut obs = [obstacle(ObstacleKind::Jump, 0, 0.0)];
        assert!(!sweep_obstacles(&mut obs, &player_bounds(0), true, false));
        assert!(obs[0].resolved);
    }

    #[test]
    fn test_slide_obstacle_cleared_while_sliding() {
        let mut obs = [obstacle(ObstacleKind::Slide, 0, 0.0)];
        assert!(!sweep_obstacles(&mut obs, &player_bounds(0), false, true));
        assert!(sweep_obstacles(
            &mut [obstacle(ObstacleKind::Slide, 0, 0.0)],
            &player_bounds(0),
            false,
            false
        ));
    }

    #[test]
    fn test_lane_change_obstacle_unconditional_in_lane() {
        let mut obs = [obstacle(ObstacleKind::LaneChange, 0, 0.0)];
        assert!(sweep_obstacles(&mut obs, &player_bounds(0), true, false));
        let mut obs = [obstacle(ObstacleKind::LaneChange, 1, 0.0)];
        assert!(!sweep_obstacles(&mut obs, &player_bounds(0), false, false));
    }

    #[test]
    fn test_resolved_obstacle_is_idempotent() {
        let mut obs = [obstacle(ObstacleKind::Jump, 0, 0.0)];
        assert!(!sweep_obstacles(&mut obs, &player_bounds(0), true, false));
        assert!(obs[0].resolved);
        // Re-running the same frame with the player now grounded must not
        // retroactively collide
        assert!(!sweep_obstacles(&mut obs, &player_bounds(0), false, false));
    }

    #[test]
    fn test_far_obstacle_ignored() {
        let mut obs = [obstacle(ObstacleKind::Jump, 0, 10.0)];
        assert!(!sweep_obstacles(&mut obs, &player_bounds(0), false, false));
        assert!(!obs[0].resolved);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut coins = [Coin {
            lane: 0,
            z: 0.0,
            height: COIN_HEIGHT,
            collected: false,
            active: true,
        }];
        assert_eq!(sweep_coins(&mut coins, &player_bounds(0)), 1);
        assert!(coins[0].collected);
        // Re-evaluation must never count it again
        assert_eq!(sweep_coins(&mut coins, &player_bounds(0)), 0);
    }

    #[test]
    fn test_coin_outside_radius_not_collected() {
        let mut coins = [Coin {
            lane: 1,
            z: 2.0,
            height: COIN_HEIGHT,
            collected: false,
            active: true,
        }];
        assert_eq!(sweep_coins(&mut coins, &player_bounds(-1)), 0);
    }
}
