//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Rect, Resolution, resolve_moving};
pub use level::{EnemySpawn, LevelDef, level_catalog};
pub use state::{Coin, Enemy, GamePhase, Particle, Platform, Player, World};
pub use tick::{RunOutcome, StepEvents, TickInput, tick};
