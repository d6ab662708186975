//! High score leaderboard and player stats
//!
//! Pure ranking and wire shapes; storage lives in `persistence`. The
//! leaderboard keeps the top 10 entries ordered by score descending, ties
//! broken by elapsed time ascending (a faster run of equal score ranks
//! higher).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Longest accepted player name (after trimming)
pub const MAX_NAME_LEN: usize = 12;

/// A single high score entry, in the stored wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name as entered on the win screen
    pub name: String,
    pub score: u32,
    /// Coins collected during the run
    pub coins: u32,
    /// Level reached, 1-based
    pub level: u32,
    /// Elapsed active play time in milliseconds
    pub time: f64,
    /// Unix timestamp in milliseconds when achieved
    pub timestamp: u64,
    /// Human-readable date string for display
    pub date: String,
}

/// Persistent per-player stats, in the stored wire shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_won: u32,
    /// Unix timestamp (ms) of the most recent run, if any
    pub last_played: Option<u64>,
}

/// High score leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check whether a (score, time) pair would make the board
    pub fn qualifies(&self, score: u32, time: f64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|last| Self::outranks(score, time, last))
            .unwrap_or(true)
    }

    fn outranks(score: u32, time: f64, other: &ScoreEntry) -> bool {
        score > other.score || (score == other.score && time < other.time)
    }

    /// Insert an entry, keeping order and the top-10 cap.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn add(&mut self, entry: ScoreEntry) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| Self::outranks(entry.score, entry.time, e))
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        if pos < MAX_HIGH_SCORES { Some(pos + 1) } else { None }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

/// Rejection reasons for a score-entry name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    Empty,
    TooLong,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Empty => write!(f, "name must not be empty"),
            NameError::TooLong => write!(f, "name must be at most {MAX_NAME_LEN} characters"),
        }
    }
}

impl std::error::Error for NameError {}

/// Validate a player name for score entry: trimmed, 1..={MAX_NAME_LEN} chars.
/// Returns the trimmed name. Rejection is inline and causes no state change.
pub fn validate_name(name: &str) -> Result<&str, NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(NameError::Empty)
    } else if trimmed.chars().count() > MAX_NAME_LEN {
        Err(NameError::TooLong)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32, time: f64) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score,
            coins: 0,
            level: 1,
            time,
            timestamp: 0,
            date: String::new(),
        }
    }

    #[test]
    fn test_keeps_top_ten_by_score_then_time() {
        let mut board = HighScores::new();
        for i in 0..11u32 {
            board.add(entry(&format!("p{i}"), i * 100, 60_000.0));
        }

        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), 1000);
        // Lowest of the eleven (score 0) fell off
        assert!(board.entries.iter().all(|e| e.score >= 100));
        // Descending order
        for pair in board.entries.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_tie_broken_by_time_ascending() {
        let mut board = HighScores::new();
        board.add(entry("slow", 500, 90_000.0));
        board.add(entry("fast", 500, 45_000.0));
        board.add(entry("mid", 500, 60_000.0));

        let names: Vec<_> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["fast", "mid", "slow"]);
    }

    #[test]
    fn test_add_reports_rank() {
        let mut board = HighScores::new();
        assert_eq!(board.add(entry("a", 100, 1000.0)), Some(1));
        assert_eq!(board.add(entry("b", 300, 1000.0)), Some(1));
        assert_eq!(board.add(entry("c", 200, 1000.0)), Some(2));

        // Fill the board, then a too-low score reports None
        for i in 0..10u32 {
            board.add(entry("x", 1000 + i, 1000.0));
        }
        assert_eq!(board.add(entry("low", 1, 1.0)), None);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_qualifies() {
        let mut board = HighScores::new();
        assert!(board.qualifies(0, 0.0));

        for i in 0..10u32 {
            board.add(entry("x", (i + 1) * 100, 60_000.0));
        }
        assert!(board.qualifies(5000, 1.0));
        assert!(!board.qualifies(50, 1.0));
        // Equal score with faster time qualifies
        assert!(board.qualifies(100, 30_000.0));
        assert!(!board.qualifies(100, 90_000.0));
    }

    #[test]
    fn test_entry_wire_shape() {
        let e = entry("Ana", 750, 12_340.0);
        let json = serde_json::to_string(&e).unwrap();
        for key in ["name", "score", "coins", "level", "time", "timestamp", "date"] {
            assert!(json.contains(&format!("\"{key}\"")), "missing {key}");
        }
    }

    #[test]
    fn test_stats_wire_shape_is_camel_case() {
        let stats = PlayerStats {
            games_played: 4,
            games_won: 1,
            last_played: Some(1_700_000_000_000),
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"gamesPlayed\":4"));
        assert!(json.contains("\"gamesWon\":1"));
        assert!(json.contains("\"lastPlayed\""));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Ana  "), Ok("Ana"));
        assert_eq!(validate_name(""), Err(NameError::Empty));
        assert_eq!(validate_name("   "), Err(NameError::Empty));
        assert_eq!(validate_name("abcdefghijkl"), Ok("abcdefghijkl"));
        assert_eq!(validate_name("abcdefghijklm"), Err(NameError::TooLong));
    }
}
