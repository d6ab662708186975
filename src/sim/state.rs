//! Game state and core simulation types
//!
//! The whole simulation lives in one owned `World` aggregate that the tick
//! function mutates in place. No ambient globals; everything a step needs is
//! reachable from here, which keeps the step testable in isolation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::level::{self, LevelDef};
use crate::consts::*;

/// Current phase of the run
///
/// Exactly one phase holds at any time; pausing is a phase, not a side flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title/menu, no simulation running
    Menu,
    /// Active gameplay, one tick per frame
    Playing,
    /// Suspended: no tick executes, timer paused
    Paused,
    /// Run ended with lives exhausted
    GameOver,
    /// Run ended by completing the last level
    Win,
}

impl GamePhase {
    /// Legal phase transitions. Anything else is a programming error.
    pub fn allows(self, next: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, next),
            (Menu, Playing)
                | (Playing, Paused)
                | (Paused, Playing)
                | (Playing, GameOver)
                | (Playing, Win)
                | (GameOver, Menu)
                | (GameOver, Playing)
                | (Win, Menu)
                | (Win, Playing)
        )
    }
}

/// The player-controlled character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            on_ground: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A patrolling enemy. `alive` only ever transitions true -> false.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed magnitude (pixels/tick)
    pub speed: f32,
    /// Patrol direction, +1 or -1
    pub direction: f32,
    pub alive: bool,
    pub color: &'static str,
}

impl Enemy {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Thin rectangle just below the enemy, used to find the platform it
    /// currently stands on.
    #[inline]
    pub fn ground_probe(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y + self.size.y, self.size.x, 5.0)
    }
}

/// A collectible coin. `collected` is monotonic: never un-collects.
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    /// Rotation animation phase
    pub rotation: f32,
    /// Pulse animation phase
    pub pulse: f32,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(COIN_SIZE),
            collected: false,
            rotation: 0.0,
            pulse: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A static platform rectangle, immutable once the level is generated
#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Rect,
    pub color: &'static str,
}

/// A transient visual particle (no identity beyond its fields)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks; pruned at 0
    pub life: u32,
    pub max_life: u32,
    pub color: &'static str,
    pub size: f32,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub phase: GamePhase,
    /// Viewport size in pixels; the ground line is anchored to its bottom
    pub viewport: Vec2,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub particles: Vec<Particle>,

    /// Horizontal camera offset, clamped to [0, level_width - viewport.x]
    pub camera_x: f32,

    pub lives: u32,
    pub score: u32,
    pub coins_collected: u32,
    /// Current level, 0-based (displayed 1-based)
    pub level_index: usize,
    /// Simulation tick counter
    pub time_ticks: u64,

    levels: Vec<LevelDef>,
    rng: Pcg32,
}

impl World {
    /// Create a world in the menu phase for the given viewport and seed
    pub fn new(viewport: Vec2, seed: u64) -> Self {
        let levels = level::level_catalog(viewport.y);
        Self {
            phase: GamePhase::Menu,
            viewport,
            player: Player::new(Self::spawn_point(viewport)),
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            particles: Vec::new(),
            camera_x: 0.0,
            lives: STARTING_LIVES,
            score: 0,
            coins_collected: 0,
            level_index: 0,
            time_ticks: 0,
            levels,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn spawn_point(viewport: Vec2) -> Vec2 {
        Vec2::new(SPAWN_X, viewport.y - SPAWN_HEIGHT)
    }

    /// Transition to the next phase, asserting the edge is legal
    pub fn enter_phase(&mut self, next: GamePhase) {
        assert!(
            self.phase.allows(next),
            "illegal phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }

    /// Static level descriptors for this viewport
    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    pub fn current_level(&self) -> &LevelDef {
        &self.levels[self.level_index]
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= self.levels.len()
    }

    /// Rightmost extent of the current level's platforms
    pub fn level_width(&self) -> f32 {
        self.platforms
            .iter()
            .map(|p| p.rect.right())
            .fold(0.0, f32::max)
    }

    pub fn max_camera_x(&self) -> f32 {
        (self.level_width() - self.viewport.x).max(0.0)
    }

    /// Reset run counters and build level 0. Call on Menu -> Playing.
    pub fn start_run(&mut self) {
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.coins_collected = 0;
        self.level_index = 0;
        self.time_ticks = 0;
        self.generate_level(0);
        self.reset_player();
    }

    /// Build platforms, coins and enemies for the given level index,
    /// discarding whatever was active before.
    pub fn generate_level(&mut self, index: usize) {
        assert!(index < self.levels.len(), "level index {index} out of range");
        self.level_index = index;
        let def = &self.levels[index];

        self.platforms = def
            .platforms
            .iter()
            .map(|r| Platform {
                rect: *r,
                color: def.theme_color,
            })
            .collect();
        self.coins = def.coins.iter().map(|&pos| Coin::new(pos)).collect();
        self.enemies = Self::build_enemies(def);
        self.particles.clear();
    }

    /// Respawn enemies for the current level at their original positions and
    /// directions. Coins and collected-state are deliberately untouched.
    pub fn respawn_enemies(&mut self) {
        self.enemies = Self::build_enemies(&self.levels[self.level_index]);
    }

    fn build_enemies(def: &LevelDef) -> Vec<Enemy> {
        def.enemies
            .iter()
            .map(|spawn| Enemy {
                pos: spawn.pos,
                size: Vec2::splat(ENEMY_SIZE),
                speed: spawn.speed,
                direction: 1.0,
                alive: true,
                color: def.enemy_color,
            })
            .collect()
    }

    /// Put the player back at the level start with zeroed velocity and
    /// reset the camera.
    pub fn reset_player(&mut self) {
        self.player = Player::new(Self::spawn_point(self.viewport));
        self.camera_x = 0.0;
    }

    /// Emit a particle burst centered on `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, color: &'static str, count: usize) {
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 12.0,
                self.rng.random::<f32>() * -10.0 - 3.0,
            );
            self.particles.push(Particle {
                pos,
                vel,
                life: PARTICLE_LIFE,
                max_life: PARTICLE_LIFE,
                color,
                size: self.rng.random::<f32>() * 5.0 + 2.0,
            });
        }
    }
}
