//! Persistent player data
//!
//! One service object per process, loaded from LocalStorage at construction
//! and written back on every mutation. Absent or corrupt storage falls back
//! to defaults; a failed write is dropped silently. Gameplay never sees a
//! persistence error.

use serde::{Deserialize, Serialize};

/// Durable per-player data under a fixed LocalStorage key
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SaveData {
    /// Coin bank accumulated across sessions
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub high_score: u64,
    #[serde(default)]
    pub total_distance: u64,
    #[serde(default)]
    pub games_played: u32,
}

impl SaveData {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fox_dash_save";

    /// Bank a finished session: coins, totals, and the high-water score
    pub fn record_session(&mut self, distance_score: u64, coins: u32) {
        self.coins += coins as u64;
        self.total_distance += distance_score;
        self.games_played += 1;
        if distance_score > self.high_score {
            self.high_score = distance_score;
        }
        self.save();
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Grant coins outside a session (rewards, promos)
    pub fn add_coins(&mut self, amount: u64) {
        self.coins += amount;
        self.save();
    }

    /// Debit the coin bank; refuses and leaves the balance untouched when
    /// funds are insufficient
    pub fn spend_coins(&mut self, amount: u64) -> bool {
        if amount > self.coins {
            return false;
        }
        self.coins -= amount;
        self.save();
        true
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<SaveData>(&json) {
                    Ok(data) => {
                        log::info!("Loaded save data (high score {})", data.high_score);
                        return data;
                    }
                    Err(e) => {
                        log::warn!("Corrupt save data, falling back to defaults: {e}");
                    }
                }
            }
        }

        log::info!("No save data found, starting fresh");
        Self::default()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Save data written (games played {})", self.games_played);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_session_accumulates() {
        let mut data = SaveData::default();
        data.record_session(120, 7);
        data.record_session(80, 3);
        assert_eq!(data.coins, 10);
        assert_eq!(data.total_distance, 200);
        assert_eq!(data.games_played, 2);
    }

    #[test]
    fn test_high_score_only_rises() {
        let mut data = SaveData::default();
        data.record_session(300, 0);
        data.record_session(150, 0);
        assert_eq!(data.high_score(), 300);
        data.record_session(450, 0);
        assert_eq!(data.high_score(), 450);
    }

    #[test]
    fn test_spend_refuses_overdraft() {
        let mut data = SaveData::default();
        data.add_coins(25);
        assert!(!data.spend_coins(30));
        assert_eq!(data.coins, 25);
        assert!(data.spend_coins(25));
        assert_eq!(data.coins, 0);
    }

    #[test]
    fn test_partial_json_falls_back_to_field_defaults() {
        let data: SaveData = serde_json::from_str(r#"{"high_score": 42}"#).unwrap();
        assert_eq!(data.high_score, 42);
        assert_eq!(data.coins, 0);
        assert_eq!(data.games_played, 0);
    }
}
