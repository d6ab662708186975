//! Super Adventure entry point
//!
//! Headless demo driver: runs a scripted bot through the game so the whole
//! stack (simulation, timer, frame loop, persistence) can be exercised from
//! the command line. A graphical frontend plugs in through the same
//! `Game::frame` API.

use glam::Vec2;

use super_adventure::persistence::{FallbackStore, FileStore, MemoryStore};
use super_adventure::session::Game;
use super_adventure::sim::{RunOutcome, TickInput};
use super_adventure::timer::format_elapsed;

/// Longest demo run before giving up, in ticks (2 minutes at 60 Hz)
const MAX_DEMO_TICKS: u64 = 7200;

fn main() {
    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Super Adventure starting with seed {seed}");

    let save_path = std::env::temp_dir().join("superadventure_save.json");
    let store = FallbackStore::new(FileStore::new(&save_path), MemoryStore::new());

    let mut game = Game::new(Vec2::new(1280.0, 720.0), seed, store);
    game.start_run();

    // Bot: hold right, jump whenever grounded
    let mut outcome = None;
    while game.world().time_ticks < MAX_DEMO_TICKS {
        let input = TickInput {
            right: true,
            jump: game.world().player.on_ground,
            ..TickInput::default()
        };
        let Some(events) = game.frame(&input) else {
            break;
        };
        if events.outcome.is_some() {
            outcome = events.outcome;
            break;
        }
    }

    let world = game.world();
    match outcome {
        Some(RunOutcome::Win) => {
            println!(
                "Bot won! score {} with {} coins in {}",
                world.score,
                world.coins_collected,
                format_elapsed(game.elapsed_ms())
            );
            match game.submit_name("Demo Bot") {
                Ok(Some(rank)) => println!("Leaderboard rank: {rank}"),
                Ok(None) => println!("Did not make the leaderboard"),
                Err(e) => log::error!("score submission failed: {e}"),
            }
        }
        Some(RunOutcome::GameOver) => {
            println!(
                "Bot lost on level {} with score {}",
                world.level_index + 1,
                world.score
            );
        }
        None => {
            println!(
                "Bot timed out on level {} with score {}",
                world.level_index + 1,
                world.score
            );
        }
    }

    let scores = game.high_scores();
    if !scores.is_empty() {
        println!("\nHigh scores:");
        for (i, entry) in scores.entries.iter().enumerate() {
            println!(
                "{:>2}. {:<12} {:>6}  L{}  {}  {}",
                i + 1,
                entry.name,
                entry.score,
                entry.level,
                format_elapsed(entry.time),
                entry.date
            );
        }
    }

    let stats = game.stats();
    println!(
        "\nGames played: {}, won: {}",
        stats.games_played, stats.games_won
    );
}
