//! Procedural spawning of obstacles and coins
//!
//! Both fields are slot pools: a fixed-capacity array scanned linearly for
//! an inactive slot, grown only when exhausted. Slots are recycled, never
//! destroyed, which bounds allocation churn during continuous play. A reused
//! slot has every field rewritten before it becomes active again; stale
//! resolved/collected flags across reuse are a correctness bug.

use rand::Rng;

use crate::consts::*;

/// What the player must do to survive a same-lane pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Low barrier, cleared by jumping
    Jump,
    /// Overhead beam, cleared by sliding
    Slide,
    /// Full-height block, cleared only by not sharing its lane
    LaneChange,
}

/// A pooled obstacle slot. `z` is relative to the player and recomputed
/// every frame.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub lane: i8,
    pub z: f32,
    /// Already scored/passed; prevents double evaluation
    pub resolved: bool,
    pub active: bool,
}

const INITIAL_OBSTACLE_POOL: usize = 20;
/// Spawn cursor start (world units ahead at session start)
const OBSTACLE_CURSOR_START: f32 = 50.0;

/// Obstacle pool plus the forward spawn cursor
#[derive(Debug, Clone)]
pub struct ObstacleField {
    slots: Vec<Obstacle>,
    /// Absolute track position of the most recent spawn
    spawn_cursor: f32,
}

impl ObstacleField {
    pub fn new() -> Self {
        let slots = vec![
            Obstacle {
                kind: ObstacleKind::Jump,
                lane: 0,
                z: 0.0,
                resolved: false,
                active: false,
            };
            INITIAL_OBSTACLE_POOL
        ];
        Self {
            slots,
            spawn_cursor: OBSTACLE_CURSOR_START,
        }
    }

    /// Advance active obstacles toward the player, despawn those behind,
    /// and keep the stream ahead filled.
    ///
    /// Consecutive spawns are separated by at least `MIN_OBSTACLE_GAP`, so
    /// back-to-back impossible challenges cannot occur.
    pub fn update(&mut self, dt: f32, speed: f32, traveled: f32, rng: &mut impl Rng) {
        let movement = speed * dt;

        for slot in &mut self.slots {
            if !slot.active {
                continue;
            }
            slot.z -= movement;
            if slot.z < OBSTACLE_DESPAWN_Z {
                slot.active = false;
            }
        }

        while self.spawn_cursor < traveled + OBSTACLE_SPAWN_DISTANCE {
            self.spawn_cursor += MIN_OBSTACLE_GAP + rng.random::<f32>() * OBSTACLE_GAP_JITTER;
            let relative_z = self.spawn_cursor - traveled;
            self.spawn(relative_z, rng);
        }
    }

    fn spawn(&mut self, z: f32, rng: &mut impl Rng) {
        let lane = rng.random_range(-1..=1) as i8;
        let roll: f32 = rng.random();
        let kind = if roll < 0.45 {
            ObstacleKind::Jump
        } else if roll < 0.9 {
            ObstacleKind::Slide
        } else {
            ObstacleKind::LaneChange
        };

        let slot = self.alloc();
        // Full rewrite: no flag survives slot reuse
        *slot = Obstacle {
            kind,
            lane,
            z,
            resolved: false,
            active: true,
        };
    }

    /// Place a specific obstacle, bypassing the spawn cursor. Used for
    /// rival trap drops; the cursor keeps governing the procedural stream.
    pub fn place(&mut self, kind: ObstacleKind, lane: i8, z: f32) {
        let slot = self.alloc();
        *slot = Obstacle {
            kind,
            lane,
            z,
            resolved: false,
            active: true,
        };
    }

    /// First inactive slot, growing the pool only on exhaustion
    fn alloc(&mut self) -> &mut Obstacle {
        let idx = match self.slots.iter().position(|s| !s.active) {
            Some(idx) => idx,
            None => {
                self.slots.push(Obstacle {
                    kind: ObstacleKind::Jump,
                    lane: 0,
                    z: 0.0,
                    resolved: false,
                    active: false,
                });
                self.slots.len() - 1
            }
        };
        &mut self.slots[idx]
    }

    pub fn slots(&self) -> &[Obstacle] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Obstacle] {
        &mut self.slots
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Deactivate everything and rewind the spawn cursor
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
        self.spawn_cursor = OBSTACLE_CURSOR_START;
    }
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

/// A pooled coin slot. `height` carries the cosmetic arc offset; collection
/// itself is distance based.
#[derive(Debug, Clone, Copy)]
pub struct Coin {
    pub lane: i8,
    pub z: f32,
    pub height: f32,
    pub collected: bool,
    pub active: bool,
}

const INITIAL_COIN_POOL: usize = 50;
/// Coin spawn cursor start (relative to the player)
const COIN_CURSOR_START: f32 = 30.0;

/// Coin pool plus a relative spawn cursor that drifts back with travel
#[derive(Debug, Clone)]
pub struct CoinField {
    slots: Vec<Coin>,
    spawn_cursor: f32,
}

impl CoinField {
    pub fn new() -> Self {
        let slots = vec![
            Coin {
                lane: 0,
                z: 0.0,
                height: COIN_HEIGHT,
                collected: false,
                active: false,
            };
            INITIAL_COIN_POOL
        ];
        Self {
            slots,
            spawn_cursor: COIN_CURSOR_START,
        }
    }

    pub fn update(&mut self, dt: f32, speed: f32, rng: &mut impl Rng) {
        let movement = speed * dt;

        for slot in &mut self.slots {
            if !slot.active {
                continue;
            }
            slot.z -= movement;
            if slot.z < COIN_DESPAWN_Z {
                slot.active = false;
            }
        }

        while self.spawn_cursor < COIN_SPAWN_DISTANCE {
            self.spawn_cursor += 5.0 + rng.random::<f32>() * 5.0;
            self.spawn_pattern(self.spawn_cursor, rng);
        }
        self.spawn_cursor -= movement;
    }

    /// One of four fixed layouts, chosen uniformly
    fn spawn_pattern(&mut self, z: f32, rng: &mut impl Rng) {
        match rng.random_range(0..4) {
            // Single coin in a random lane
            0 => self.spawn(rng.random_range(-1..=1) as i8, z, COIN_HEIGHT),
            // Line of three in one lane
            1 => {
                let lane = rng.random_range(-1..=1) as i8;
                for i in 0..3 {
                    self.spawn(lane, z + i as f32 * 2.0, COIN_HEIGHT);
                }
            }
            // Diagonal sweep across the lanes
            2 => {
                let start: i8 = if rng.random::<f32>() < 0.5 { -1 } else { 1 };
                for i in 0..3i8 {
                    self.spawn(start - i * start, z + i as f32 * 3.0, COIN_HEIGHT);
                }
            }
            // Arc over the center lane; the height offset is cosmetic
            _ => {
                for i in 0..5 {
                    let arc = (i as f32 / 4.0 * std::f32::consts::PI).sin() * 2.0;
                    self.spawn(0, z + i as f32 * 1.5, COIN_HEIGHT + arc);
                }
            }
        }
    }

    fn spawn(&mut self, lane: i8, z: f32, height: f32) {
        let idx = match self.slots.iter().position(|s| !s.active) {
            Some(idx) => idx,
            None => {
                self.slots.push(Coin {
                    lane: 0,
                    z: 0.0,
                    height: COIN_HEIGHT,
                    collected: false,
                    active: false,
                });
                self.slots.len() - 1
            }
        };
        self.slots[idx] = Coin {
            lane,
            z,
            height,
            collected: false,
            active: true,
        };
    }

    pub fn slots(&self) -> &[Coin] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Coin] {
        &mut self.slots
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
        self.spawn_cursor = COIN_CURSOR_START;
    }
}

impl Default for CoinField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_obstacle_min_gap_invariant() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut field = ObstacleField::new();
        // First update fills the whole spawn window at once
        field.update(0.0, BASE_SPEED, 0.0, &mut rng);

        let mut zs: Vec<f32> = field
            .slots()
            .iter()
            .filter(|s| s.active)
            .map(|s| s.z)
            .collect();
        assert!(zs.len() >= 2);
        zs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in zs.windows(2) {
            assert!(
                pair[1] - pair[0] >= MIN_OBSTACLE_GAP - 1e-3,
                "spawn spacing {} below minimum",
                pair[1] - pair[0]
            );
        }
    }

    #[test]
    fn test_obstacles_despawn_behind_player() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut field = ObstacleField::new();
        field.update(0.0, BASE_SPEED, 0.0, &mut rng);

        // Drive everything far behind without spawning replacements ahead
        for slot in field.slots_mut() {
            if slot.active {
                slot.z = OBSTACLE_DESPAWN_Z - 1.0;
            }
        }
        let traveled = 1000.0;
        let mut rng2 = Pcg32::seed_from_u64(1);
        field.spawn_cursor = traveled + OBSTACLE_SPAWN_DISTANCE + 1.0;
        field.update(0.016, BASE_SPEED, traveled, &mut rng2);

        assert_eq!(
            field
                .slots()
                .iter()
                .filter(|s| s.active && s.z < OBSTACLE_DESPAWN_Z)
                .count(),
            0
        );
    }

    #[test]
    fn test_slot_reuse_clears_resolved_flag() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ObstacleField::new();
        field.update(0.0, BASE_SPEED, 0.0, &mut rng);

        // Poison every slot, deactivate, then force respawns into the pool
        for slot in field.slots_mut() {
            slot.resolved = true;
            slot.active = false;
        }
        field.spawn(10.0, &mut rng);
        let reused = field.slots().iter().find(|s| s.active).unwrap();
        assert!(!reused.resolved);
    }

    #[test]
    fn test_obstacle_pool_grows_on_exhaustion() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut field = ObstacleField::new();
        for slot in field.slots_mut() {
            slot.active = true;
        }
        let before = field.slots().len();
        field.spawn(5.0, &mut rng);
        assert_eq!(field.slots().len(), before + 1);
    }

    #[test]
    fn test_coin_patterns_spawn_within_lanes() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = CoinField::new();
        field.update(0.0, BASE_SPEED, &mut rng);

        assert!(field.active_count() > 0);
        for coin in field.slots().iter().filter(|c| c.active) {
            assert!((-1..=1).contains(&coin.lane));
            assert!(!coin.collected);
            assert!(coin.height >= COIN_HEIGHT);
        }
    }

    #[test]
    fn test_coin_slot_reuse_clears_collected_flag() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = CoinField::new();
        field.update(0.0, BASE_SPEED, &mut rng);
        for slot in field.slots_mut() {
            slot.collected = true;
            slot.active = false;
        }
        field.spawn(0, 12.0, COIN_HEIGHT);
        let reused = field.slots().iter().find(|c| c.active).unwrap();
        assert!(!reused.collected);
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut obstacles = ObstacleField::new();
        let mut coins = CoinField::new();
        obstacles.update(0.0, BASE_SPEED, 0.0, &mut rng);
        coins.update(0.0, BASE_SPEED, &mut rng);
        assert!(obstacles.active_count() > 0);
        assert!(coins.active_count() > 0);

        obstacles.reset();
        coins.reset();
        assert_eq!(obstacles.active_count(), 0);
        assert_eq!(coins.active_count(), 0);
    }
}
