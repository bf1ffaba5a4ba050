//! Per-session state shared by every validation.
//!
//! A [`Session`] owns the settings cache and the in-flight run registry,
//! both keyed by document. Nothing here is global; the server holds one
//! session and passes it to each operation.

use std::collections::HashMap;

use crate::settings::Settings;

/// Identifies one validation run of one document.
///
/// A newer token for the same document supersedes older ones, so a result
/// that arrives late is discarded instead of overwriting a fresher one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunToken {
    key: String,
    generation: u64,
}

impl RunToken {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct Session {
    settings: HashMap<String, Settings>,
    /// Bumped whenever the whole cache is cleared.
    settings_generation: u64,
    in_flight: HashMap<String, u64>,
    next_generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_settings(&self, key: &str) -> Option<&Settings> {
        self.settings.get(key)
    }

    pub fn cache_settings(&mut self, key: impl Into<String>, settings: Settings) {
        self.settings.insert(key.into(), settings);
    }

    /// Generation of the settings cache, for fetches that may outlive a clear.
    pub fn settings_generation(&self) -> u64 {
        self.settings_generation
    }

    /// Cache `settings` only if no clear happened since `generation` was read.
    pub fn cache_settings_from(&mut self, generation: u64, key: impl Into<String>, settings: Settings) -> bool {
        if generation != self.settings_generation {
            return false;
        }
        self.cache_settings(key, settings);
        true
    }

    /// Forget everything about a closed document.
    pub fn evict(&mut self, key: &str) {
        self.settings.remove(key);
        self.in_flight.remove(key);
    }

    /// Drop every cached settings entry, forcing a re-fetch.
    pub fn clear_settings(&mut self) {
        self.settings.clear();
        self.settings_generation += 1;
    }

    /// Start a run for `key`, superseding any run still in flight.
    pub fn begin_run(&mut self, key: impl Into<String>) -> RunToken {
        self.next_generation += 1;
        let key = key.into();
        self.in_flight.insert(key.clone(), self.next_generation);
        RunToken {
            key,
            generation: self.next_generation,
        }
    }

    pub fn is_current(&self, token: &RunToken) -> bool {
        self.in_flight.get(&token.key) == Some(&token.generation)
    }

    /// Retire `token`. Returns whether its result should be published.
    pub fn finish_run(&mut self, token: &RunToken) -> bool {
        if self.is_current(token) {
            self.in_flight.remove(&token.key);
            true
        } else {
            false
        }
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}
