//! Feedback settings and run modifiers
//!
//! Persisted separately from the best score. Settings only touch feedback
//! (shake, particles, palette); modifiers change the rules and are read
//! once when a run resets.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError};

/// Feedback/rendering preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Colorblind-friendly palette
    pub colorblind: bool,
    /// Screen shake on damage
    pub shake: bool,
    /// Particle effects
    pub particles: bool,
    /// Glow around entities
    pub bloom: bool,
    /// Scanline overlay
    pub crt: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colorblind: false,
            shake: true,
            particles: true,
            bloom: true,
            crt: false,
        }
    }
}

/// Rule modifiers chosen before a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Start with a single life
    pub hardcore: bool,
    /// No hazards spawn
    pub pacifist: bool,
    /// Smaller player
    pub tiny: bool,
    /// Hazards start twice as fast
    pub double_speed: bool,
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "neonDriftSettings";

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(storage: &impl Storage) -> Self {
        load_json(storage, Self::STORAGE_KEY).unwrap_or_default()
    }

    pub fn save(&self, storage: &mut impl Storage) -> Result<(), StorageError> {
        save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

impl Modifiers {
    /// Storage key
    const STORAGE_KEY: &'static str = "neonDriftModifiers";

    pub fn load(storage: &impl Storage) -> Self {
        load_json(storage, Self::STORAGE_KEY).unwrap_or_default()
    }

    pub fn save(&self, storage: &mut impl Storage) -> Result<(), StorageError> {
        save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Modifiers saved");
        Ok(())
    }
}

fn load_json<T: for<'de> Deserialize<'de>>(storage: &impl Storage, key: &str) -> Option<T> {
    match storage.get_item(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => {
                log::info!("Loaded {} from storage", key);
                Some(value)
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", key, e);
                None
            }
        },
        Ok(None) => {
            log::info!("No {} stored, using defaults", key);
            None
        }
        Err(e) => {
            log::warn!("Could not read {}: {}", key, e);
            None
        }
    }
}

fn save_json<T: Serialize>(
    storage: &mut impl Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}
