//! Local leaderboard: fastest completion times.
//!
//! Persisted to LocalStorage, tracks the top 5 times in ascending order
//! (lower is better). Storage failures are logged and swallowed; gameplay
//! never blocks on persistence.

use serde::{Deserialize, Serialize};

/// Maximum number of leaderboard entries to keep
pub const MAX_ENTRIES: usize = 5;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Three arcade initials
    pub name: String,
    /// Total run time in milliseconds
    pub time_ms: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Fastest-run leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_dash_leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a time qualifies for the leaderboard
    pub fn qualifies(&self, time_ms: u32) -> bool {
        if time_ms == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        // Beats the slowest kept entry
        self.entries
            .last()
            .map(|e| time_ms < e.time_ms)
            .unwrap_or(true)
    }

    /// Get the rank a time would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, time_ms: u32) -> Option<usize> {
        if !self.qualifies(time_ms) {
            return None;
        }
        let rank = self.entries.iter().position(|e| time_ms < e.time_ms);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add_entry(&mut self, name: &str, time_ms: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(time_ms) {
            return None;
        }

        let entry = LeaderboardEntry {
            name: sanitize_initials(name),
            time_ms,
            timestamp,
        };

        // Find insertion point (sorted ascending by time)
        let pos = self.entries.iter().position(|e| time_ms < e.time_ms);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_ENTRIES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the best time (if any)
    pub fn best_time(&self) -> Option<u32> {
        self.entries.first().map(|e| e.time_ms)
    }

    /// Load the leaderboard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Leaderboard>(&json) {
                    Ok(board) => {
                        log::info!("Loaded {} leaderboard entries", board.entries.len());
                        return board;
                    }
                    Err(err) => {
                        log::warn!("Discarding unreadable leaderboard: {err}");
                    }
                }
            }
        }

        log::info!("No leaderboard found, starting fresh");
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Leaderboard save failed, continuing without");
                    return;
                }
                log::info!("Leaderboard saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Force a raw name into three arcade initials: ASCII alphanumerics,
/// uppercased, padded with 'A'.
pub fn sanitize_initials(raw: &str) -> String {
    let mut initials: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(3)
        .collect();
    while initials.len() < 3 {
        initials.push('A');
    }
    initials
}

/// Format a run time as `mm:ss.cc`
pub fn format_time(time_ms: u32) -> String {
    let minutes = time_ms / 60_000;
    let seconds = (time_ms % 60_000) / 1000;
    let centis = (time_ms % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_order_and_truncation() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_entry("AAA", 90_000, 0.0), Some(1));
        assert_eq!(board.add_entry("BBB", 60_000, 0.0), Some(1));
        assert_eq!(board.add_entry("CCC", 75_000, 0.0), Some(2));
        assert_eq!(board.add_entry("DDD", 120_000, 0.0), Some(4));
        assert_eq!(board.add_entry("EEE", 110_000, 0.0), Some(4));

        // Full board: only faster times get in.
        assert!(!board.qualifies(150_000));
        assert_eq!(board.add_entry("FFF", 150_000, 0.0), None);
        assert_eq!(board.add_entry("GGG", 61_000, 0.0), Some(2));

        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.best_time(), Some(60_000));
        for pair in board.entries.windows(2) {
            assert!(pair[0].time_ms <= pair[1].time_ms);
        }
        // The slowest entry fell off.
        assert!(board.entries.iter().all(|e| e.time_ms < 120_000));
    }

    #[test]
    fn test_zero_time_never_qualifies() {
        let board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));
    }

    #[test]
    fn test_potential_rank_matches_insertion() {
        let mut board = Leaderboard::new();
        board.add_entry("AAA", 50_000, 0.0);
        board.add_entry("BBB", 70_000, 0.0);
        assert_eq!(board.potential_rank(60_000), Some(2));
        assert_eq!(board.add_entry("CCC", 60_000, 0.0), Some(2));
    }

    #[test]
    fn test_sanitize_initials() {
        assert_eq!(sanitize_initials("abc"), "ABC");
        assert_eq!(sanitize_initials("  k-9!x "), "K9X");
        assert_eq!(sanitize_initials("toolong"), "TOO");
        assert_eq!(sanitize_initials(""), "AAA");
        assert_eq!(sanitize_initials("é"), "AAA");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00.00");
        assert_eq!(format_time(61_230), "01:01.23");
        assert_eq!(format_time(600_000), "10:00.00");
        assert_eq!(format_time(59_999), "00:59.99");
    }
}
