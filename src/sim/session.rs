//! Game session controller
//!
//! Owns the top-level state machine and the fixed per-frame update order:
//! input intents, player motion, track recycle, obstacle/coin fields,
//! collision sweeps, chase update, rival AI. The simulation runs only in
//! `Playing`; pause is a hard stop with no catch-up on resume.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;
use crate::save::SaveData;

use super::character::{Anim, Character, CharacterKind};
use super::chase::{Chase, ChaseTuning};
use super::collision::{sweep_coins, sweep_obstacles};
use super::rival::Rival;
use super::spawner::{CoinField, ObstacleField, ObstacleKind};
use super::track::Track;

/// Top-level session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Asset/scene setup in progress; no simulation runs
    Loading,
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player hit an obstacle (loss)
    Obstacle,
    /// The player caught the rival (win)
    Caught,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Obstacle => "obstacle",
            Outcome::Caught => "caught",
        }
    }
}

/// Edge-triggered input flags, true for at most one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub slide: bool,
}

/// Per-frame HUD payload for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudStats {
    pub score: u64,
    pub coins: u32,
    pub distance: f32,
    pub gap: f32,
}

/// Session-end payload for the game-over screen
#[derive(Debug, Clone, Copy)]
pub struct SessionEnd {
    pub outcome: Outcome,
    pub score: u64,
    pub coins: u32,
    pub high_score: u64,
}

/// One game session: characters, world content, progression, and the
/// state machine that gates the per-frame update.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    seed: u64,
    rng: Pcg32,
    pub player: Character,
    pub rival: Rival,
    pub chase: Chase,
    pub track: Track,
    pub obstacles: ObstacleField,
    pub coins: CoinField,
    coins_collected: u32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, ChaseTuning::default())
    }

    /// Session with custom chase balance (tests narrow the escape behavior)
    pub fn with_tuning(seed: u64, tuning: ChaseTuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self {
            state: SessionState::Loading,
            seed,
            rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9),
            player: Character::new(CharacterKind::Player, 0.0),
            rival: Rival::new(),
            chase: Chase::new(tuning),
            track: Track::new(&mut rng),
            obstacles: ObstacleField::new(),
            coins: CoinField::new(),
            coins_collected: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Setup finished; the session becomes ready to start
    pub fn finish_loading(&mut self) {
        if self.state == SessionState::Loading {
            self.state = SessionState::Menu;
            log::info!("Session ready (seed {})", self.seed);
        }
    }

    /// Setup failed; fatal to session start, the session stays in Loading
    pub fn fail_loading(&mut self, reason: &str) {
        log::error!("Session setup failed: {reason}");
    }

    /// Start (or retry) a session: full reset, then Playing
    pub fn start(&mut self) {
        match self.state {
            SessionState::Menu | SessionState::GameOver => {
                self.reset();
                self.state = SessionState::Playing;
            }
            _ => {}
        }
    }

    pub fn pause(&mut self) {
        if self.state == SessionState::Playing {
            self.state = SessionState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == SessionState::Paused {
            self.state = SessionState::Playing;
        }
    }

    pub fn go_to_menu(&mut self) {
        if self.state == SessionState::GameOver {
            self.state = SessionState::Menu;
        }
    }

    /// Derived score: distance plus the coin bonus, non-decreasing
    pub fn score(&self) -> u64 {
        self.chase.distance.floor() as u64 + self.coins_collected as u64 * COIN_SCORE
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    pub fn hud(&self) -> HudStats {
        HudStats {
            score: self.score(),
            coins: self.coins_collected,
            distance: self.chase.distance,
            gap: self.chase.gap,
        }
    }

    /// Advance one frame. Runs only while Playing; returns the session-end
    /// payload on a terminal frame.
    ///
    /// `input` is edge-triggered: the caller clears its flags after the
    /// tick. The delta is clamped so a backgrounded tab cannot skip the
    /// collision window in one oversized step.
    pub fn tick(&mut self, input: FrameInput, dt: f32, data: &mut SaveData) -> Option<SessionEnd> {
        if self.state != SessionState::Playing {
            return None;
        }
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        if input.left {
            self.player.move_left();
        }
        if input.right {
            self.player.move_right();
        }
        if input.jump {
            self.player.jump();
        }
        if input.slide {
            self.player.slide();
        }

        self.player.update(dt);

        let speed = self.chase.speed;
        self.track.update(dt, speed, &mut self.rng);
        self.obstacles
            .update(dt, speed, self.chase.distance, &mut self.rng);
        self.coins.update(dt, speed, &mut self.rng);

        let bounds = self.player.bounds();
        let hit = sweep_obstacles(
            self.obstacles.slots_mut(),
            &bounds,
            self.player.is_airborne(),
            self.player.is_sliding(),
        );
        self.coins_collected += sweep_coins(self.coins.slots_mut(), &bounds);

        if hit {
            return Some(self.end(Outcome::Obstacle, data));
        }

        let chase = self.chase.update(dt);
        if chase.burst {
            self.rival.speed_burst();
        }
        if chase.caught {
            return Some(self.end(Outcome::Caught, data));
        }

        // The rival reads the gap updated this frame
        self.rival.update(dt, self.chase.gap, &mut self.rng);

        // A pressured rival drops a trap in its own lane
        if self.rival.should_drop_trap(self.chase.gap) {
            let kind = if self.rng.random_bool(0.5) {
                ObstacleKind::Jump
            } else {
                ObstacleKind::Slide
            };
            let lane = self.rival.character.current_lane.index();
            self.obstacles.place(kind, lane, self.chase.gap);
        }

        None
    }

    /// Terminal transition: record the session and freeze the state
    fn end(&mut self, outcome: Outcome, data: &mut SaveData) -> SessionEnd {
        self.state = SessionState::GameOver;
        self.player.anim = match outcome {
            Outcome::Obstacle => Anim::Die,
            Outcome::Caught => Anim::Dance,
        };

        let distance_score = self.chase.distance.floor() as u64;
        data.record_session(distance_score, self.coins_collected);
        log::info!(
            "Session over ({}): score {}, coins {}",
            outcome.as_str(),
            self.score(),
            self.coins_collected
        );

        SessionEnd {
            outcome,
            score: self.score(),
            coins: self.coins_collected,
            high_score: data.high_score(),
        }
    }

    /// Full reset of progression scalars and per-session entity pools.
    /// Partial resets are a correctness hazard; everything restores here.
    fn reset(&mut self) {
        self.chase.reset();
        self.player.reset();
        self.rival.reset();
        self.track.reset();
        self.obstacles.reset();
        self.coins.reset();
        self.coins_collected = 0;
    }
}
