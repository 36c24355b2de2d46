//! The one persisted value: the high score, stored as an integer string.

use web_sys::Storage;

use crate::error::GameError;

pub const HIGH_SCORE_KEY: &str = "kana-cat.highScore";

pub trait HighScoreStore {
    fn read(&self) -> Result<Option<String>, GameError>;
    fn write(&mut self, value: &str) -> Result<(), GameError>;
}

/// Load the stored high score. Missing, unreadable or malformed values all
/// yield 0 so a broken store never blocks play.
pub fn load_high_score(store: &dyn HighScoreStore) -> u32 {
    match store.read() {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring malformed high score {:?}", raw);
            0
        }),
        Ok(None) => 0,
        Err(err) => {
            log::warn!("high score unavailable: {}", err);
            0
        }
    }
}

/// Write the high score; failures are logged and not retried.
pub fn save_high_score(store: &mut dyn HighScoreStore, score: u32) {
    if let Err(err) = store.write(&score.to_string()) {
        log::warn!("high score {} not persisted: {}", score, err);
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, GameError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), GameError> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// `window.localStorage` backed store.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self, GameError> {
        let storage = web_sys::window()
            .ok_or_else(|| GameError::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| GameError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| GameError::Storage("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl HighScoreStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, GameError> {
        self.storage
            .get_item(HIGH_SCORE_KEY)
            .map_err(|e| GameError::Storage(format!("{:?}", e)))
    }

    fn write(&mut self, value: &str) -> Result<(), GameError> {
        self.storage
            .set_item(HIGH_SCORE_KEY, value)
            .map_err(|e| GameError::Storage(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl HighScoreStore for Broken {
        fn read(&self) -> Result<Option<String>, GameError> {
            Err(GameError::Storage("quota".into()))
        }
        fn write(&mut self, _value: &str) -> Result<(), GameError> {
            Err(GameError::Storage("quota".into()))
        }
    }

    #[test]
    fn load_parses_stored_integer() {
        assert_eq!(load_high_score(&MemoryStore::with_value("1234")), 1234);
        assert_eq!(load_high_score(&MemoryStore::default()), 0);
    }

    #[test]
    fn malformed_or_failing_store_reads_zero() {
        assert_eq!(load_high_score(&MemoryStore::with_value("lots")), 0);
        assert_eq!(load_high_score(&Broken), 0);
    }

    #[test]
    fn save_round_trips_and_swallows_errors() {
        let mut mem = MemoryStore::default();
        save_high_score(&mut mem, 88);
        assert_eq!(mem.value(), Some("88"));
        save_high_score(&mut Broken, 88);
    }
}
