//! Score and stats persistence
//!
//! Storage is a string key/value abstraction so the game code never knows
//! whether it is talking to a file, browser LocalStorage or an in-memory
//! map. The `Backend` owns key naming and JSON encoding; `FallbackStore`
//! keeps the session alive when the primary store fails by degrading to a
//! secondary (normally in-memory) store.
//!
//! Corrupt stored JSON is treated as absent data, never as a fatal error.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::highscores::{HighScores, PlayerStats, ScoreEntry};

/// Namespace prefix for every stored key
pub const KEY_PREFIX: &str = "superadventure_";

const SCORES_KEY: &str = "highscores";
const STATS_KEY: &str = "stats";

/// Storage failure, surfaced to callers as a plain error value
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    /// The store's own on-disk structure could not be parsed
    Format(serde_json::Error),
    /// Store is configured to reject writes (test double, quota)
    Unavailable,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage io error: {e}"),
            StorageError::Format(e) => write!(f, "storage format error: {e}"),
            StorageError::Unavailable => write!(f, "storage unavailable"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Format(e) => Some(e),
            StorageError::Unavailable => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Synchronous string key/value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile in-memory store. Also the fallback target when the durable
/// store fails.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable store backed by a single JSON object file
///
/// The whole file is one `{"key": "value", ...}` object, read and rewritten
/// on each access. Fine for the handful of small values the game keeps.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(StorageError::Format),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());
        let text = serde_json::to_string(&map).map_err(StorageError::Format)?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Decorator that degrades to a secondary store when the primary fails
///
/// Once a primary operation fails the store switches to the fallback for
/// the rest of its lifetime, so a run's scores stay readable in-session
/// even if they could not be made durable.
pub struct FallbackStore<P: Storage, F: Storage> {
    primary: P,
    fallback: F,
    degraded: bool,
}

impl<P: Storage, F: Storage> FallbackStore<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            degraded: false,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    fn degrade(&mut self, op: &str, err: &StorageError) {
        if !self.degraded {
            log::warn!("primary storage failed during {op}, falling back to memory: {err}");
            self.degraded = true;
        }
    }
}

impl<P: Storage, F: Storage> Storage for FallbackStore<P, F> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.degraded {
            return self.fallback.get(key);
        }
        match self.primary.get(key) {
            Ok(value) => Ok(value),
            Err(err) => {
                log::warn!("primary storage read failed for {key}: {err}");
                self.fallback.get(key)
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.degraded {
            match self.primary.set(key, value) {
                Ok(()) => {
                    // Mirror so a later degrade still sees current data
                    let _ = self.fallback.set(key, value);
                    return Ok(());
                }
                Err(err) => self.degrade("write", &err),
            }
        }
        self.fallback.set(key, value)
    }
}

/// High-level persistence API over any `Storage`
///
/// Owns the key namespace and the JSON wire encoding. Missing or corrupt
/// values decode as defaults so a bad save file never blocks play.
pub struct Backend<S: Storage> {
    store: S,
}

impl<S: Storage> Backend<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let full_key = format!("{KEY_PREFIX}{key}");
        match self.store.get(&full_key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("discarding corrupt value for {full_key}: {e}");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                log::warn!("failed to read {full_key}: {e}");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let full_key = format!("{KEY_PREFIX}{key}");
        let json = serde_json::to_string(value).map_err(StorageError::Format)?;
        self.store.set(&full_key, &json)
    }

    /// Load the leaderboard; corrupt or missing data yields an empty board
    pub fn high_scores(&self) -> HighScores {
        self.load(SCORES_KEY)
    }

    /// Insert a finished run into the leaderboard and persist it.
    /// Returns the rank achieved, if it made the board.
    pub fn save_score(&mut self, entry: ScoreEntry) -> Result<Option<usize>, StorageError> {
        let mut scores = self.high_scores();
        let rank = scores.add(entry);
        self.save(SCORES_KEY, &scores)?;
        if let Some(rank) = rank {
            log::info!("high score saved at rank {rank}");
        }
        Ok(rank)
    }

    pub fn top_score(&self) -> u32 {
        self.high_scores().top_score()
    }

    pub fn stats(&self) -> PlayerStats {
        self.load(STATS_KEY)
    }

    /// Record a finished run in the aggregate stats
    pub fn update_stats(&mut self, won: bool, timestamp: u64) -> Result<PlayerStats, StorageError> {
        let mut stats = self.stats();
        stats.games_played += 1;
        if won {
            stats.games_won += 1;
        }
        stats.last_played = Some(timestamp);
        self.save(STATS_KEY, &stats)?;
        Ok(stats)
    }
}
