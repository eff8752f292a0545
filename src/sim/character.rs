//! Shared lane-motion model for the player and the rival
//!
//! Both characters run the same state machine (lane transitions, jump
//! physics, slide timer); only the source of intents differs. Concrete
//! variants resolve animation clip names for their own model.

use glam::Vec3;

use crate::consts::*;
use crate::lane_offset;

use super::collision::Aabb;

/// One of the three discrete lateral positions on the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    /// Lane index in {-1, 0, 1}
    #[inline]
    pub fn index(self) -> i8 {
        match self {
            Lane::Left => -1,
            Lane::Center => 0,
            Lane::Right => 1,
        }
    }

    /// Lane from an index, clamped to the track edges
    pub fn from_index(index: i8) -> Self {
        match index {
            i8::MIN..=-1 => Lane::Left,
            0 => Lane::Center,
            1..=i8::MAX => Lane::Right,
        }
    }

    /// Lateral center of this lane
    #[inline]
    pub fn offset(self) -> f32 {
        lane_offset(self.index())
    }

    /// One lane to the left; no-op at the edge
    pub fn shifted_left(self) -> Self {
        Lane::from_index(self.index().saturating_sub(1))
    }

    /// One lane to the right; no-op at the edge
    pub fn shifted_right(self) -> Self {
        Lane::from_index(self.index().saturating_add(1))
    }
}

/// Vertical action state. Airborne and sliding are mutually exclusive by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Action {
    #[default]
    Grounded,
    Airborne {
        /// Vertical velocity (units/s, positive up)
        velocity: f32,
    },
    Sliding {
        /// Slide time remaining (seconds)
        remaining: f32,
    },
}

/// Logical animation states shared by both characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anim {
    Idle,
    #[default]
    Run,
    Jump,
    Slide,
    Die,
    Dance,
}

/// Which concrete character this is; decides animation clip resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterKind {
    Player,
    Rival,
}

impl CharacterKind {
    /// Resolve a logical animation to the clip name baked into this
    /// character's model. The rival's model has no die/dance clips and
    /// substitutes its run and walk clips.
    pub fn clip_name(self, anim: Anim) -> &'static str {
        match self {
            CharacterKind::Player => match anim {
                Anim::Idle => "walk",
                Anim::Run => "running",
                Anim::Jump => "jump",
                Anim::Slide => "slide",
                Anim::Die => "dying",
                Anim::Dance => "hip_hop_dance",
            },
            CharacterKind::Rival => match anim {
                Anim::Idle => "walk",
                Anim::Run => "run_fast",
                Anim::Jump => "vault",
                Anim::Slide => "slide",
                Anim::Die | Anim::Dance => "run_fast",
            },
        }
    }
}

/// Motion state for one character. Mutated only by its own update step and
/// by intents (input for the player, AI for the rival).
#[derive(Debug, Clone)]
pub struct Character {
    pub kind: CharacterKind,
    pub position: Vec3,
    pub target_lane: Lane,
    pub current_lane: Lane,
    pub action: Action,
    pub anim: Anim,
    /// Longitudinal start offset, restored on reset (rival starts ahead)
    start_z: f32,
}

impl Character {
    pub fn new(kind: CharacterKind, start_z: f32) -> Self {
        Self {
            kind,
            position: Vec3::new(0.0, 0.0, start_z),
            target_lane: Lane::Center,
            current_lane: Lane::Center,
            action: Action::Grounded,
            anim: Anim::Run,
            start_z,
        }
    }

    /// Lane-change intent; moves the target one lane left, clamped
    pub fn move_left(&mut self) {
        self.target_lane = self.target_lane.shifted_left();
    }

    /// Lane-change intent; moves the target one lane right, clamped
    pub fn move_right(&mut self) {
        self.target_lane = self.target_lane.shifted_right();
    }

    /// Jump intent; ignored unless grounded
    pub fn jump(&mut self) {
        if matches!(self.action, Action::Grounded) {
            self.action = Action::Airborne {
                velocity: JUMP_FORCE,
            };
            self.anim = Anim::Jump;
        }
    }

    /// Slide intent; ignored unless grounded
    pub fn slide(&mut self) {
        if matches!(self.action, Action::Grounded) {
            self.action = Action::Sliding {
                remaining: SLIDE_DURATION,
            };
            self.anim = Anim::Slide;
        }
    }

    /// Advance lane transition, jump physics, and the slide timer
    pub fn update(&mut self, dt: f32) {
        // Lateral motion toward the target lane. The step is clamped to the
        // remaining distance so large deltas cannot overshoot, and within the
        // epsilon the position snaps exactly (lane checks need exact
        // alignment).
        let target_x = self.target_lane.offset();
        let diff = target_x - self.position.x;
        if diff.abs() > LANE_EPSILON {
            let step = (LANE_CHANGE_SPEED * dt).min(diff.abs());
            self.position.x += diff.signum() * step;
        } else {
            self.position.x = target_x;
            self.current_lane = self.target_lane;
        }

        match self.action {
            Action::Airborne { velocity } => {
                self.position.y += velocity * dt;
                let velocity = velocity - GRAVITY * dt;
                if self.position.y <= 0.0 {
                    self.position.y = 0.0;
                    self.action = Action::Grounded;
                    self.anim = Anim::Run;
                } else {
                    self.action = Action::Airborne { velocity };
                }
            }
            Action::Sliding { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.action = Action::Grounded;
                    self.anim = Anim::Run;
                } else {
                    self.action = Action::Sliding { remaining };
                }
            }
            Action::Grounded => {}
        }
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self.action, Action::Airborne { .. })
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.action, Action::Sliding { .. })
    }

    /// Axis-aligned bounds; height drops while sliding
    pub fn bounds(&self) -> Aabb {
        let height = if self.is_sliding() { 0.8 } else { 2.0 };
        Aabb::from_center_size(self.position, Vec3::new(1.0, height, 1.0))
    }

    /// Restore the start-of-session state
    pub fn reset(&mut self) {
        self.position = Vec3::new(0.0, 0.0, self.start_z);
        self.target_lane = Lane::Center;
        self.current_lane = Lane::Center;
        self.action = Action::Grounded;
        self.anim = Anim::Run;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_lane_clamps_at_edges() {
        let mut c = Character::new(CharacterKind::Player, 0.0);
        c.move_right();
        c.move_right();
        assert_eq!(c.target_lane, Lane::Right);
        c.move_left();
        c.move_left();
        c.move_left();
        assert_eq!(c.target_lane, Lane::Left);
    }

    #[test]
    fn test_lane_transition_snaps_exactly() {
        let mut c = Character::new(CharacterKind::Player, 0.0);
        c.move_right();
        for _ in 0..60 {
            c.update(DT);
        }
        assert_eq!(c.position.x, Lane::Right.offset());
        assert_eq!(c.current_lane, Lane::Right);
    }

    #[test]
    fn test_jump_lands_back_on_ground() {
        let mut c = Character::new(CharacterKind::Player, 0.0);
        c.jump();
        assert!(c.is_airborne());
        assert_eq!(c.anim, Anim::Jump);
        // 2*v/g seconds of hang time; simulate past that
        for _ in 0..120 {
            c.update(DT);
        }
        assert!(!c.is_airborne());
        assert_eq!(c.position.y, 0.0);
        assert_eq!(c.anim, Anim::Run);
    }

    #[test]
    fn test_slide_expires() {
        let mut c = Character::new(CharacterKind::Player, 0.0);
        c.slide();
        assert!(c.is_sliding());
        for _ in 0..60 {
            c.update(DT);
        }
        assert!(!c.is_sliding());
        assert_eq!(c.anim, Anim::Run);
    }

    #[test]
    fn test_jump_and_slide_mutually_exclusive() {
        let mut c = Character::new(CharacterKind::Player, 0.0);
        c.jump();
        c.slide();
        assert!(c.is_airborne());
        assert!(!c.is_sliding());

        let mut c = Character::new(CharacterKind::Player, 0.0);
        c.slide();
        c.jump();
        assert!(c.is_sliding());
        assert!(!c.is_airborne());
    }

    #[test]
    fn test_repeated_jump_intent_ignored_while_airborne() {
        let mut c = Character::new(CharacterKind::Player, 0.0);
        c.jump();
        c.update(DT);
        let before = c.action;
        c.jump();
        assert_eq!(c.action, before);
    }

    #[test]
    fn test_sliding_bounds_are_lower() {
        let mut c = Character::new(CharacterKind::Player, 0.0);
        let standing = c.bounds();
        c.slide();
        let sliding = c.bounds();
        assert!(sliding.max.y < standing.max.y);
    }

    #[test]
    fn test_reset_restores_start_state() {
        let mut c = Character::new(CharacterKind::Rival, 30.0);
        c.move_left();
        c.jump();
        c.update(DT);
        c.reset();
        assert_eq!(c.position, Vec3::new(0.0, 0.0, 30.0));
        assert_eq!(c.target_lane, Lane::Center);
        assert_eq!(c.current_lane, Lane::Center);
        assert!(matches!(c.action, Action::Grounded));
    }

    #[test]
    fn test_clip_names_per_kind() {
        assert_eq!(CharacterKind::Player.clip_name(Anim::Run), "running");
        assert_eq!(CharacterKind::Rival.clip_name(Anim::Run), "run_fast");
        assert_eq!(CharacterKind::Rival.clip_name(Anim::Jump), "vault");
        // Rival model has no death clip; falls back to run
        assert_eq!(CharacterKind::Rival.clip_name(Anim::Die), "run_fast");
    }
}
