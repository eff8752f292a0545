//! Chase and progression state machine
//!
//! Owns the global speed ramp, distance accumulation, and the gap-distance
//! tug-of-war that decides the session outcome. The gap is clamped back
//! into [min_gap, max_gap] after every adjustment; reaching min_gap is the
//! only win condition, and the gap simply saturates at max_gap.

use crate::consts::*;

/// Data-driven chase balance. Defaults match live gameplay; tests narrow
/// the escape parameters to exercise the capture path.
#[derive(Debug, Clone, Copy)]
pub struct ChaseTuning {
    pub base_speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub catch_up_rate: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    pub initial_gap: f32,
    /// Gap above min_gap at which the rival breaks away
    pub escape_margin: f32,
    /// Gap handed back on a narrow escape
    pub escape_recovery: f32,
}

impl Default for ChaseTuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            acceleration: SPEED_ACCELERATION,
            catch_up_rate: CATCH_UP_RATE,
            min_gap: MIN_GAP,
            max_gap: MAX_GAP,
            initial_gap: INITIAL_GAP,
            escape_margin: ESCAPE_MARGIN,
            escape_recovery: ESCAPE_RECOVERY,
        }
    }
}

/// Outcome of one chase update
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseUpdate {
    /// The rival broke away; the session should trigger its speed burst
    pub burst: bool,
    /// Gap closed to min_gap; the player caught the rival
    pub caught: bool,
}

/// Progression scalars and the gap tug-of-war
#[derive(Debug, Clone)]
pub struct Chase {
    tuning: ChaseTuning,
    pub speed: f32,
    pub distance: f32,
    pub gap: f32,
}

impl Chase {
    pub fn new(tuning: ChaseTuning) -> Self {
        Self {
            tuning,
            speed: tuning.base_speed,
            distance: 0.0,
            gap: tuning.initial_gap,
        }
    }

    pub fn tuning(&self) -> &ChaseTuning {
        &self.tuning
    }

    /// Advance speed, distance, and the gap by one frame
    pub fn update(&mut self, dt: f32) -> ChaseUpdate {
        let t = &self.tuning;
        let mut result = ChaseUpdate::default();

        // Linear ramp toward the cap, then hold
        if self.speed < t.max_speed {
            self.speed = (self.speed + t.acceleration * dt).min(t.max_speed);
        }
        self.distance += self.speed * dt;

        // The player gains ground by default
        self.gap -= t.catch_up_rate * dt;

        // Narrow escape: the rival bursts and pulls the gap back open
        if self.gap < t.min_gap + t.escape_margin {
            result.burst = true;
            self.gap += t.escape_recovery;
        }

        self.gap = self.gap.clamp(t.min_gap, t.max_gap);

        if self.gap <= t.min_gap {
            result.caught = true;
        }

        result
    }

    /// Restore start-of-session scalars
    pub fn reset(&mut self) {
        self.speed = self.tuning.base_speed;
        self.distance = 0.0;
        self.gap = self.tuning.initial_gap;
    }
}
