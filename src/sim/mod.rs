//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, injected through `&mut impl Rng`
//! - Frame delta clamped at the session boundary
//! - No rendering or platform dependencies

pub mod character;
pub mod chase;
pub mod collision;
pub mod rival;
pub mod session;
pub mod spawner;
pub mod track;

pub use character::{Action, Anim, Character, CharacterKind, Lane};
pub use chase::{Chase, ChaseTuning, ChaseUpdate};
pub use collision::{Aabb, sweep_coins, sweep_obstacles};
pub use rival::Rival;
pub use session::{FrameInput, HudStats, Outcome, Session, SessionEnd, SessionState};
pub use spawner::{Coin, CoinField, Obstacle, ObstacleField, ObstacleKind};
pub use track::Track;
