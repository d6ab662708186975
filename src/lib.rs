//! Super Adventure - a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `timer`: Active play-time tracking with pause/resume
//! - `scheduler`: Cancellable frame loop driving the simulation
//! - `highscores`: Top-10 leaderboard and player stats
//! - `persistence`: Key-value storage with transparent local fallback
//! - `session`: Run orchestration (menu, pause, death, win, score entry)

pub mod highscores;
pub mod persistence;
pub mod scheduler;
pub mod session;
pub mod sim;
pub mod timer;

pub use highscores::{HighScores, ScoreEntry};
pub use session::Game;
pub use timer::{Clock, GameTimer, SystemClock};

/// Game tuning constants
///
/// Units are per-tick: the simulation advances in fixed steps (one tick per
/// display frame, nominally 60 Hz) and integrates positions by velocity once
/// per tick, so speeds are pixels/tick and accelerations pixels/tick².
pub mod consts {
    /// Nominal simulation rate (one tick per display frame)
    pub const TICK_HZ: u32 = 60;

    /// Player hitbox (square)
    pub const PLAYER_SIZE: f32 = 35.0;
    /// Horizontal walk speed
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Jump impulse (vertical velocity becomes -JUMP_POWER)
    pub const JUMP_POWER: f32 = 16.0;
    /// Gravity, applied every tick even while grounded
    pub const GRAVITY: f32 = 0.85;
    /// Extra downward acceleration while fast-falling (airborne, already falling)
    pub const FAST_FALL_ACCEL: f32 = 1.2;
    /// Spawn X at level start
    pub const SPAWN_X: f32 = 80.0;
    /// Spawn Y sits this far above the viewport bottom
    pub const SPAWN_HEIGHT: f32 = 200.0;

    /// Enemy hitbox (square)
    pub const ENEMY_SIZE: f32 = 28.0;
    /// Coin hitbox (square)
    pub const COIN_SIZE: f32 = 20.0;
    /// Coin rotation phase advance per tick
    pub const COIN_SPIN_RATE: f32 = 0.08;
    /// Coin pulse phase advance per tick
    pub const COIN_PULSE_RATE: f32 = 0.15;

    /// Penetration tolerance absorbing sub-pixel velocity error at contact
    pub const CONTACT_TOLERANCE: f32 = 5.0;
    /// Upward velocity granted by a successful stomp
    pub const STOMP_BOUNCE: f32 = 10.0;

    /// Score awarded per stomped enemy
    pub const STOMP_SCORE: u32 = 150;
    /// Score awarded per collected coin
    pub const COIN_SCORE: u32 = 100;
    /// Score awarded on level completion
    pub const LEVEL_BONUS: u32 = 500;

    /// Player dies after falling this far below the viewport
    pub const FALL_MARGIN: f32 = 100.0;
    /// Level completes when the player is within this margin of the right edge
    pub const LEVEL_END_MARGIN: f32 = 100.0;
    /// The ground line sits this far above the viewport bottom
    pub const GROUND_MARGIN: f32 = 50.0;

    /// Lives at run start
    pub const STARTING_LIVES: u32 = 3;

    /// Particle lifetime in ticks
    pub const PARTICLE_LIFE: u32 = 40;
    /// Downward acceleration on particles
    pub const PARTICLE_GRAVITY: f32 = 0.4;
    /// Burst size on player death
    pub const DEATH_BURST: usize = 15;
    /// Burst size on enemy stomp
    pub const STOMP_BURST: usize = 10;
    /// Burst size on coin pickup
    pub const COIN_BURST: usize = 12;

    /// Player color tag (color tags are consumed by the render collaborator)
    pub const PLAYER_COLOR: &str = "#FF4444";
    /// Death burst color
    pub const DEATH_COLOR: &str = "#FF0000";
    /// Coin burst color
    pub const COIN_COLOR: &str = "#FFD700";
}
