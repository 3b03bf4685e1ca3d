//! Theme store.
//!
//! Holds the current appearance mode, persists it to the settings file, and
//! tracks the short-lived transition flag the frontend uses for its overlay.
//! Transitions carry a generation counter: a toggle bumps the generation and
//! schedules a clear, and a clear for an older generation is a no-op. Rapid
//! double-toggles therefore cancel-and-restart instead of racing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SalonError;
use crate::types::{Settings, ThemeMode, ThemeSnapshot, ThemeSource};

/// How long the cosmetic transition overlay stays up.
pub const TRANSITION_MS: u64 = 300;

pub struct ThemeStore {
    mode: ThemeMode,
    source: ThemeSource,
    transitioning: bool,
    generation: u64,
    settings_path: PathBuf,
}

impl ThemeStore {
    /// Load the store from the settings file. A missing or unreadable file
    /// degrades to the default mode; the OS preference (reported later by the
    /// webview) only applies when nothing was persisted.
    pub fn load(settings_path: PathBuf) -> Self {
        let (mode, source) = match load_settings(&settings_path) {
            Ok(Some(settings)) => (settings.theme, ThemeSource::Persisted),
            Ok(None) => (ThemeMode::default(), ThemeSource::Default),
            Err(e) => {
                log::warn!("Failed to read settings, using default theme: {}", e);
                (ThemeMode::default(), ThemeSource::Default)
            }
        };
        ThemeStore {
            mode,
            source,
            transitioning: false,
            generation: 0,
            settings_path,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            mode: self.mode,
            is_transitioning: self.transitioning,
            source: self.source,
        }
    }

    /// Apply the OS-reported preference. Only effective when no persisted
    /// value existed and the user has not toggled yet.
    pub fn apply_system_preference(&mut self, prefers_dark: bool) {
        if self.source != ThemeSource::Default {
            return;
        }
        self.mode = if prefers_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        };
        self.source = ThemeSource::System;
    }

    /// Flip light/dark, persist the new mode, and begin a transition.
    /// Returns the transition generation the caller should pass back to
    /// [`ThemeStore::end_transition`] after the overlay delay.
    pub fn toggle(&mut self) -> u64 {
        self.mode = self.mode.flip();
        self.source = ThemeSource::Persisted;
        if let Err(e) = save_settings(&self.settings_path, &Settings { theme: self.mode }) {
            // The in-memory mode is still authoritative for this session.
            log::warn!("Failed to persist theme mode: {}", e);
        }
        self.transitioning = true;
        self.generation += 1;
        self.generation
    }

    /// Clear the transition flag, unless a newer toggle superseded `gen`.
    pub fn end_transition(&mut self, gen: u64) {
        if gen == self.generation {
            self.transitioning = false;
        }
    }
}

fn load_settings(path: &Path) -> Result<Option<Settings>, SalonError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| SalonError::Settings(format!("Failed to read settings: {}", e)))?;
    let settings: Settings = serde_json::from_str(&content)
        .map_err(|e| SalonError::Settings(format!("Failed to parse settings: {}", e)))?;
    Ok(Some(settings))
}

fn save_settings(path: &Path, settings: &Settings) -> Result<(), SalonError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| SalonError::Settings(format!("Failed to create settings dir: {}", e)))?;
        }
    }
    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| SalonError::Settings(format!("Failed to serialize settings: {}", e)))?;
    fs::write(path, content)
        .map_err(|e| SalonError::Settings(format!("Failed to write settings: {}", e)))?;
    Ok(())
}

/// Canonical settings file path (~/.salondesk/settings.json).
pub fn settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".salondesk")
        .join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ThemeStore {
        ThemeStore::load(dir.path().join("settings.json"))
    }

    #[test]
    fn test_defaults_to_light_when_nothing_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.mode(), ThemeMode::Light);
        assert!(!store.is_transitioning());
        assert_eq!(store.snapshot().source, ThemeSource::Default);
    }

    #[test]
    fn test_unreadable_settings_degrade_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        let store = ThemeStore::load(path);
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_persisted_value_wins_over_system_preference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();
        let mut store = ThemeStore::load(path);
        assert_eq!(store.mode(), ThemeMode::Dark);
        store.apply_system_preference(false);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_system_preference_applies_when_unpersisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.apply_system_preference(true);
        assert_eq!(store.mode(), ThemeMode::Dark);
        assert_eq!(store.snapshot().source, ThemeSource::System);
    }

    #[test]
    fn test_toggle_persists_and_even_count_restores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = ThemeStore::load(path.clone());

        let gen = store.toggle();
        assert_eq!(store.mode(), ThemeMode::Dark);
        let on_disk = fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("dark"));
        store.end_transition(gen);

        let gen = store.toggle();
        assert_eq!(store.mode(), ThemeMode::Light);
        let on_disk = fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("light"));
        store.end_transition(gen);
        assert!(!store.is_transitioning());
    }

    #[test]
    fn test_toggle_survives_process_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = ThemeStore::load(path.clone());
        store.toggle();

        let reloaded = ThemeStore::load(path);
        assert_eq!(reloaded.mode(), ThemeMode::Dark);
        assert_eq!(reloaded.snapshot().source, ThemeSource::Persisted);
    }

    #[test]
    fn test_transition_flag_clears_for_current_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let gen = store.toggle();
        assert!(store.is_transitioning());
        store.end_transition(gen);
        assert!(!store.is_transitioning());
    }

    #[test]
    fn test_stale_transition_clear_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let first = store.toggle();
        let _second = store.toggle();
        // The first toggle's timer firing must not clear the overlay the
        // second toggle restarted.
        store.end_transition(first);
        assert!(store.is_transitioning());
    }
}
