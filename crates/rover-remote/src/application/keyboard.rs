//! Keyboard reducer: the held direction keys, reduced to one drive intent.
//!
//! Terminals auto-repeat held keys, so the reducer only reports an intent
//! when the held set actually changed; re-pressing an already-held key is a
//! no-op and never reaches the dispatch path.

use std::collections::HashSet;

use rover_core::{mix_keys, DriveIntent};

/// The four drive keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveKey {
    Forward,
    Reverse,
    Left,
    Right,
}

impl DriveKey {
    /// Maps a character to its drive key, if any. Non-drive characters are
    /// none of the reducer's business.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(DriveKey::Forward),
            's' => Some(DriveKey::Reverse),
            'a' => Some(DriveKey::Left),
            'd' => Some(DriveKey::Right),
            _ => None,
        }
    }
}

/// Tracks which drive keys are currently held.
#[derive(Debug, Default)]
pub struct KeyboardReducer {
    held: HashSet<DriveKey>,
}

impl KeyboardReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key press. Returns the freshly mixed intent if the held
    /// set changed, `None` for auto-repeat or non-drive keys.
    pub fn press(&mut self, c: char) -> Option<DriveIntent> {
        let key = DriveKey::from_char(c)?;
        self.held.insert(key).then(|| self.mix())
    }

    /// Records a key release. Returns the freshly mixed intent if the held
    /// set changed, `None` for keys that were not held or non-drive keys.
    pub fn release(&mut self, c: char) -> Option<DriveIntent> {
        let key = DriveKey::from_char(c)?;
        self.held.remove(&key).then(|| self.mix())
    }

    /// Drops every held key, as on focus loss. Returns the standstill
    /// intent if anything was held.
    pub fn release_all(&mut self) -> Option<DriveIntent> {
        if self.held.is_empty() {
            return None;
        }
        self.held.clear();
        Some(DriveIntent::default())
    }

    fn mix(&self) -> DriveIntent {
        mix_keys(
            self.held.contains(&DriveKey::Forward),
            self.held.contains(&DriveKey::Reverse),
            self.held.contains(&DriveKey::Left),
            self.held.contains(&DriveKey::Right),
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
