//! Fox Dash - an endless-runner chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lane motion, spawning, collisions, chase)
//! - `save`: Persistent player data (LocalStorage on web)
//!
//! Rendering and screen composition live entirely on the web side; the crate
//! exposes a per-frame HUD payload and a small command surface instead.

pub mod save;
pub mod sim;

pub use save::SaveData;
pub use sim::{FrameInput, Session, SessionState};

/// Game configuration constants
pub mod consts {
    /// Maximum frame delta fed to the simulation (seconds). Clamps the
    /// oversized delta after a backgrounded tab so obstacles cannot be
    /// tunneled through in a single step.
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Lateral distance between adjacent lanes
    pub const LANE_WIDTH: f32 = 3.0;
    /// Lateral speed while changing lanes (units/s)
    pub const LANE_CHANGE_SPEED: f32 = 10.0;
    /// Snap-to-lane threshold; guarantees exact alignment for lane checks
    pub const LANE_EPSILON: f32 = 0.1;

    /// Jump physics
    pub const JUMP_FORCE: f32 = 12.0;
    pub const GRAVITY: f32 = 30.0;
    /// Slide duration (seconds)
    pub const SLIDE_DURATION: f32 = 0.6;

    /// Forward speed ramp
    pub const BASE_SPEED: f32 = 15.0;
    pub const MAX_SPEED: f32 = 40.0;
    pub const SPEED_ACCELERATION: f32 = 0.5;

    /// Chase gap tug-of-war
    pub const INITIAL_GAP: f32 = 30.0;
    pub const MIN_GAP: f32 = 5.0;
    pub const MAX_GAP: f32 = 50.0;
    /// Player gains this much ground per second by default
    pub const CATCH_UP_RATE: f32 = 0.5;
    /// Rival escapes when the gap falls below MIN_GAP + this margin
    pub const ESCAPE_MARGIN: f32 = 5.0;
    /// Gap handed back to the rival on a narrow escape
    pub const ESCAPE_RECOVERY: f32 = 10.0;

    /// Rival burst state
    pub const BURST_MULTIPLIER: f32 = 2.0;
    pub const BURST_DURATION: f32 = 2.0;

    /// Track geometry
    pub const SEGMENT_LENGTH: f32 = 20.0;
    pub const VISIBLE_SEGMENTS: usize = 10;

    /// Obstacle spawning (longitudinal, relative to the player)
    pub const OBSTACLE_SPAWN_DISTANCE: f32 = 100.0;
    pub const OBSTACLE_DESPAWN_Z: f32 = -20.0;
    pub const MIN_OBSTACLE_GAP: f32 = 15.0;
    pub const OBSTACLE_GAP_JITTER: f32 = 10.0;
    /// Longitudinal window around the player where an obstacle can hit
    pub const OBSTACLE_HIT_WINDOW: f32 = 2.0;

    /// Coin spawning
    pub const COIN_SPAWN_DISTANCE: f32 = 80.0;
    pub const COIN_DESPAWN_Z: f32 = -10.0;
    pub const COIN_COLLECT_RADIUS: f32 = 2.0;
    /// Coins hover at this height over the track
    pub const COIN_HEIGHT: f32 = 1.0;

    /// Score contribution per collected coin
    pub const COIN_SCORE: u64 = 10;
}

/// Lateral center of a lane index (-1, 0, 1)
#[inline]
pub fn lane_offset(lane: i8) -> f32 {
    lane as f32 * consts::LANE_WIDTH
}
