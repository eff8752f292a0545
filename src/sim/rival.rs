//! Rival AI controller
//!
//! Drives its own lane-motion model with random evasive intents and reacts
//! to the gap distance with escalating speed multipliers. The multiplier is
//! an AI/presentation signal only: the rival's longitudinal position is
//! re-derived from the gap every frame, not integrated from its speed.
//!
//! The intent noise is deliberately blind to actual obstacle geometry. It
//! reads as evasion at gameplay speeds and keeps the controller fully
//! deterministic under a seeded RNG.

use rand::Rng;

use crate::consts::*;

use super::character::{Character, CharacterKind};

/// Per-frame intent probabilities
const LANE_SWITCH_CHANCE: f64 = 0.01;
const JUMP_CHANCE: f64 = 0.005;
const SLIDE_CHANCE: f64 = 0.005;

/// Gap thresholds for the reactive speed-up
const GAP_VERY_CLOSE: f32 = 10.0;
const GAP_CLOSE: f32 = 15.0;

/// Cooldown between trap drops (seconds)
const TRAP_COOLDOWN: f32 = 5.0;

/// The AI-controlled rival
#[derive(Debug, Clone)]
pub struct Rival {
    pub character: Character,
    speed_multiplier: f32,
    burst_timer: f32,
    trap_cooldown: f32,
}

impl Rival {
    pub fn new() -> Self {
        Self {
            character: Character::new(CharacterKind::Rival, INITIAL_GAP),
            speed_multiplier: 1.0,
            burst_timer: 0.0,
            trap_cooldown: 0.0,
        }
    }

    /// Advance the rival one frame against the already-updated gap
    pub fn update(&mut self, dt: f32, gap: f32, rng: &mut impl Rng) {
        if self.burst_timer > 0.0 {
            self.burst_timer -= dt;
            if self.burst_timer <= 0.0 {
                self.speed_multiplier = 1.0;
            }
        }
        if self.trap_cooldown > 0.0 {
            self.trap_cooldown -= dt;
        }

        self.wander(rng);
        self.character.update(dt);

        // Reactive speed-up as the player closes in; the burst overrides it
        if self.burst_timer <= 0.0 {
            self.speed_multiplier = if gap < GAP_VERY_CLOSE {
                1.4
            } else if gap < GAP_CLOSE {
                1.2
            } else {
                1.0
            };
        }

        // Placement follows the gap directly
        self.character.position.z = gap;
    }

    /// Random evasive noise: occasional lane switch, jump, or slide
    fn wander(&mut self, rng: &mut impl Rng) {
        if rng.random_bool(LANE_SWITCH_CHANCE) {
            if rng.random_bool(0.5) {
                self.character.move_left();
            } else {
                self.character.move_right();
            }
        }
        if rng.random_bool(JUMP_CHANCE) {
            self.character.jump();
        }
        if rng.random_bool(SLIDE_CHANCE) {
            self.character.slide();
        }
    }

    /// Narrow-escape burst: top speed for a fixed window, then decay back
    pub fn speed_burst(&mut self) {
        self.speed_multiplier = BURST_MULTIPLIER;
        self.burst_timer = BURST_DURATION;
    }

    /// Whether the rival drops a trap this frame; rearms the cooldown
    pub fn should_drop_trap(&mut self, gap: f32) -> bool {
        if gap < GAP_CLOSE && self.trap_cooldown <= 0.0 {
            self.trap_cooldown = TRAP_COOLDOWN;
            return true;
        }
        false
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn reset(&mut self) {
        self.character.reset();
        self.speed_multiplier = 1.0;
        self.burst_timer = 0.0;
        self.trap_cooldown = 0.0;
    }
}

impl Default for Rival {
    fn default() -> Self {
        Self::new()
    }
}
