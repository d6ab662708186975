//! Game session orchestration
//!
//! `Game` wires the deterministic simulation to the pieces around it: the
//! play timer, the cancellable frame loop and the score persistence backend.
//! The simulation itself never touches any of these; this module reacts to
//! the events a tick reports.
//!
//! End-of-run rules:
//! - Game over persists immediately under a default name.
//! - A win stages a pending result and waits for a validated player name
//!   before anything is written.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use crate::highscores::{HighScores, NameError, PlayerStats, ScoreEntry, validate_name};
use crate::persistence::{Backend, Storage, StorageError};
use crate::scheduler::FrameLoop;
use crate::sim::{GamePhase, RunOutcome, StepEvents, TickInput, World};
use crate::timer::{Clock, GameTimer, SystemClock};

/// Name recorded for a run that ended without the player entering one
pub const DEFAULT_NAME: &str = "Player";

/// A finished winning run, held until the player submits a name
#[derive(Debug, Clone, PartialEq)]
pub struct PendingResult {
    pub score: u32,
    pub coins: u32,
    /// Level reached, 1-based
    pub level: u32,
    /// Elapsed active play time in milliseconds
    pub time: f64,
}

/// Why a name submission was rejected
#[derive(Debug)]
pub enum SubmitError {
    /// No finished run is waiting for a name
    NoPendingResult,
    Name(NameError),
    Storage(StorageError),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::NoPendingResult => write!(f, "no finished run awaiting a name"),
            SubmitError::Name(e) => write!(f, "invalid name: {e}"),
            SubmitError::Storage(e) => write!(f, "failed to save score: {e}"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::NoPendingResult => None,
            SubmitError::Name(e) => Some(e),
            SubmitError::Storage(e) => Some(e),
        }
    }
}

impl From<NameError> for SubmitError {
    fn from(e: NameError) -> Self {
        SubmitError::Name(e)
    }
}

impl From<StorageError> for SubmitError {
    fn from(e: StorageError) -> Self {
        SubmitError::Storage(e)
    }
}

/// One player session: menu, runs, pause, score entry
pub struct Game<S: Storage, C: Clock = SystemClock> {
    world: World,
    timer: GameTimer<C>,
    frame_loop: FrameLoop,
    backend: Backend<S>,
    pending_result: Option<PendingResult>,
}

impl<S: Storage> Game<S, SystemClock> {
    pub fn new(viewport: Vec2, seed: u64, store: S) -> Self {
        Self::with_clock(viewport, seed, store, SystemClock::new())
    }
}

impl<S: Storage, C: Clock> Game<S, C> {
    pub fn with_clock(viewport: Vec2, seed: u64, store: S, clock: C) -> Self {
        Self {
            world: World::new(viewport, seed),
            timer: GameTimer::with_clock(clock),
            frame_loop: FrameLoop::new(),
            backend: Backend::new(store),
            pending_result: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn pending_result(&self) -> Option<&PendingResult> {
        self.pending_result.as_ref()
    }

    /// Elapsed active play time of the current or finished run
    pub fn elapsed_ms(&self) -> f64 {
        self.timer.elapsed_ms()
    }

    pub fn high_scores(&self) -> HighScores {
        self.backend.high_scores()
    }

    pub fn stats(&self) -> PlayerStats {
        self.backend.stats()
    }

    /// Begin a fresh run from the menu or an end screen
    pub fn start_run(&mut self) {
        self.world.enter_phase(GamePhase::Playing);
        self.world.start_run();
        self.pending_result = None;
        self.timer.reset();
        self.frame_loop.cancel();
        self.frame_loop.request();
        log::info!("run started");
    }

    /// Drive one host frame. The timer starts on the first frame that
    /// carries any input, so idle time before the player moves is free.
    pub fn frame(&mut self, input: &TickInput) -> Option<StepEvents> {
        if self.world.phase == GamePhase::Playing && !self.timer.is_running() && input.any() {
            self.timer.start();
        }

        let events = self.frame_loop.frame(&mut self.world, input)?;
        match events.outcome {
            Some(RunOutcome::GameOver) => self.finish_game_over(),
            Some(RunOutcome::Win) => self.finish_win(),
            None => {}
        }
        Some(events)
    }

    fn finish_game_over(&mut self) {
        let time = self.timer.stop();
        let timestamp = unix_now_ms();
        let entry = ScoreEntry {
            name: DEFAULT_NAME.to_string(),
            score: self.world.score,
            coins: self.world.coins_collected,
            level: self.world.level_index as u32 + 1,
            time,
            timestamp,
            date: format_date(timestamp),
        };
        if let Err(e) = self.backend.save_score(entry) {
            log::error!("could not persist game-over score: {e}");
        }
        if let Err(e) = self.backend.update_stats(false, timestamp) {
            log::error!("could not persist stats: {e}");
        }
    }

    fn finish_win(&mut self) {
        let time = self.timer.stop();
        self.pending_result = Some(PendingResult {
            score: self.world.score,
            coins: self.world.coins_collected,
            level: self.world.level_index as u32 + 1,
            time,
        });
        log::info!(
            "run won with score {} in {:.0} ms, awaiting name entry",
            self.world.score,
            time
        );
    }

    /// Attach a player name to the staged winning run and persist it.
    /// Returns the leaderboard rank achieved, if any. A rejected name
    /// leaves the pending result in place.
    pub fn submit_name(&mut self, name: &str) -> Result<Option<usize>, SubmitError> {
        let pending = self
            .pending_result
            .as_ref()
            .ok_or(SubmitError::NoPendingResult)?;
        let name = validate_name(name)?;

        let timestamp = unix_now_ms();
        let entry = ScoreEntry {
            name: name.to_string(),
            score: pending.score,
            coins: pending.coins,
            level: pending.level,
            time: pending.time,
            timestamp,
            date: format_date(timestamp),
        };
        let rank = self.backend.save_score(entry)?;
        self.backend.update_stats(true, timestamp)?;
        self.pending_result = None;
        Ok(rank)
    }

    /// Pause while playing, resume while paused, no-op otherwise
    pub fn toggle_pause(&mut self) {
        match self.world.phase {
            GamePhase::Playing => {
                self.frame_loop.cancel();
                self.world.enter_phase(GamePhase::Paused);
                self.timer.pause();
            }
            GamePhase::Paused => {
                self.world.enter_phase(GamePhase::Playing);
                self.timer.resume();
                self.frame_loop.request();
            }
            _ => {}
        }
    }

    /// Leave an end screen for the menu. The phase table has no edge out of
    /// an active run except its outcomes, so this only acts on end screens.
    pub fn return_to_menu(&mut self) {
        match self.world.phase {
            GamePhase::GameOver | GamePhase::Win => {
                self.frame_loop.cancel();
                self.world.enter_phase(GamePhase::Menu);
                self.timer.reset();
                self.pending_result = None;
            }
            phase => log::warn!("ignoring return to menu from {phase:?}"),
        }
    }
}

fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Format a unix-ms timestamp as `YYYY-MM-DD` (UTC)
pub fn format_date(timestamp_ms: u64) -> String {
    // Civil-from-days conversion over the proleptic Gregorian calendar
    let days = (timestamp_ms / 86_400_000) as i64;
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { year + 1 } else { year };
    format!("{year:04}-{month:02}-{day:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn game() -> Game<MemoryStore> {
        let mut game = Game::new(Vec2::new(1280.0, 720.0), 7, MemoryStore::new());
        game.start_run();
        game
    }

    fn held_right() -> TickInput {
        TickInput {
            right: true,
            ..TickInput::default()
        }
    }

    /// Put the world one tick from losing the last life
    fn arm_game_over(game: &mut Game<MemoryStore>) {
        let world = game.world_mut();
        world.lives = 1;
        world.platforms.clear();
        world.player.pos = Vec2::new(300.0, 900.0);
    }

    /// Put the world one tick from winning (past the end of the last level)
    fn arm_win(game: &mut Game<MemoryStore>) {
        let world = game.world_mut();
        world.level_index = world.levels().len() - 1;
        world.player.pos = Vec2::new(1_000_000.0, 0.0);
    }

    #[test]
    fn test_start_run_enters_playing_and_ticks() {
        let mut game = game();
        assert_eq!(game.phase(), GamePhase::Playing);

        assert!(game.frame(&TickInput::default()).is_some());
        assert_eq!(game.world().time_ticks, 1);
        // Loop reschedules itself
        assert!(game.frame(&TickInput::default()).is_some());
        assert_eq!(game.world().time_ticks, 2);
    }

    #[test]
    fn test_timer_deferred_until_first_input() {
        let mut game = game();

        game.frame(&TickInput::default());
        game.frame(&TickInput::default());
        assert!(!game.timer.is_running());

        game.frame(&held_right());
        assert!(game.timer.is_running());
    }

    #[test]
    fn test_game_over_persists_default_name_immediately() {
        let mut game = game();
        arm_game_over(&mut game);

        let events = game.frame(&TickInput::default()).unwrap();
        assert_eq!(events.outcome, Some(RunOutcome::GameOver));
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.pending_result().is_none());

        let scores = game.high_scores();
        assert_eq!(scores.entries.len(), 1);
        assert_eq!(scores.entries[0].name, DEFAULT_NAME);

        let stats = game.stats();
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.games_won, 0);
    }

    #[test]
    fn test_win_waits_for_name() {
        let mut game = game();
        arm_win(&mut game);

        let events = game.frame(&TickInput::default()).unwrap();
        assert_eq!(events.outcome, Some(RunOutcome::Win));
        assert_eq!(game.phase(), GamePhase::Win);

        // Nothing written until a name arrives
        assert!(game.high_scores().is_empty());
        let pending = game.pending_result().unwrap();
        assert_eq!(pending.level, 3);

        let rank = game.submit_name("  Ana  ").unwrap();
        assert_eq!(rank, Some(1));
        assert!(game.pending_result().is_none());

        let scores = game.high_scores();
        assert_eq!(scores.entries[0].name, "Ana");
        assert_eq!(game.stats().games_won, 1);
    }

    #[test]
    fn test_rejected_name_keeps_pending_result() {
        let mut game = game();
        arm_win(&mut game);
        game.frame(&TickInput::default());

        assert!(matches!(
            game.submit_name("   "),
            Err(SubmitError::Name(NameError::Empty))
        ));
        assert!(matches!(
            game.submit_name("a name far too long"),
            Err(SubmitError::Name(NameError::TooLong))
        ));
        // Still staged, still unwritten
        assert!(game.pending_result().is_some());
        assert!(game.high_scores().is_empty());

        assert!(game.submit_name("Bo").is_ok());
    }

    #[test]
    fn test_submit_without_pending_result_fails() {
        let mut game = game();
        assert!(matches!(
            game.submit_name("Ana"),
            Err(SubmitError::NoPendingResult)
        ));
    }

    #[test]
    fn test_toggle_pause_freezes_loop_and_timer() {
        let mut game = game();
        game.frame(&held_right());
        assert!(game.timer.is_running());

        game.toggle_pause();
        assert_eq!(game.phase(), GamePhase::Paused);
        assert!(game.timer.is_paused());
        // No tick runs while paused
        assert!(game.frame(&held_right()).is_none());
        let ticks = game.world().time_ticks;

        game.toggle_pause();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(!game.timer.is_paused());
        assert!(game.frame(&held_right()).is_some());
        assert_eq!(game.world().time_ticks, ticks + 1);
    }

    #[test]
    fn test_return_to_menu_from_end_screen() {
        let mut game = game();
        game.frame(&held_right());
        arm_game_over(&mut game);
        game.frame(&TickInput::default());
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.return_to_menu();
        assert_eq!(game.phase(), GamePhase::Menu);
        assert!(game.frame(&TickInput::default()).is_none());
        assert_eq!(game.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_return_to_menu_ignored_mid_run() {
        let mut game = game();
        game.return_to_menu();
        assert_eq!(game.phase(), GamePhase::Playing);

        game.toggle_pause();
        game.return_to_menu();
        assert_eq!(game.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = game();
        arm_game_over(&mut game);
        game.frame(&TickInput::default());
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.start_run();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.world().lives, crate::consts::STARTING_LIVES);
        assert!(game.frame(&TickInput::default()).is_some());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "1970-01-01");
        // 2023-11-14 02:13:20 UTC
        assert_eq!(format_date(1_699_927_817_000), "2023-11-14");
        // Leap day
        assert_eq!(format_date(1_709_164_800_000), "2024-02-29");
    }
}
