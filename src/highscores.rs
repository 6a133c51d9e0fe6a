//! Persisted best score
//!
//! Stored as a plain decimal string so older saves stay readable.

use crate::persistence::{Storage, StorageError};

/// Best floored score across all runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    pub value: u64,
}

impl BestScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "neonDriftBest";

    /// Load the best score; anything missing or malformed reads as 0
    pub fn load(storage: &impl Storage) -> Self {
        let value = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => parse_best(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring malformed best score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                0
            }
        };
        log::info!("Best score: {}", value);
        Self { value }
    }

    /// Fold in a finished run's score; returns true on a new best
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.value {
            self.value = score;
            return true;
        }
        false
    }

    pub fn save(&self, storage: &mut impl Storage) -> Result<(), StorageError> {
        storage.set_item(Self::STORAGE_KEY, &self.value.to_string())?;
        log::info!("Best score saved ({})", self.value);
        Ok(())
    }
}

/// Accepts integers and floats ("812", "812.7"); negatives and junk are rejected
fn parse_best(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value.floor() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_missing_best_is_zero() {
        let storage = MemoryStorage::default();
        assert_eq!(BestScore::load(&storage).value, 0);
    }

    #[test]
    fn test_malformed_best_is_zero() {
        let mut storage = MemoryStorage::default();
        storage.set_item("neonDriftBest", "lots").unwrap();
        assert_eq!(BestScore::load(&storage).value, 0);
        storage.set_item("neonDriftBest", "-5").unwrap();
        assert_eq!(BestScore::load(&storage).value, 0);
    }

    #[test]
    fn test_float_best_is_floored() {
        let mut storage = MemoryStorage::default();
        storage.set_item("neonDriftBest", "812.7").unwrap();
        assert_eq!(BestScore::load(&storage).value, 812);
    }

    #[test]
    fn test_record_is_monotonic() {
        let mut best = BestScore { value: 300 };
        assert!(!best.record(200));
        assert_eq!(best.value, 300);
        assert!(best.record(301));
        assert_eq!(best.value, 301);
    }

    #[test]
    fn test_save_roundtrip() {
        let mut storage = MemoryStorage::default();
        BestScore { value: 4242 }.save(&mut storage).unwrap();
        assert_eq!(BestScore::load(&storage).value, 4242);
    }
}
