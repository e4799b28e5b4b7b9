//! Key bindings and held-key tracking
//!
//! The simulation only sees a `TickInput` snapshot and discrete
//! `InputEvent`s. This module turns raw key names into those.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::{InputEvent, TickInput};

/// Logical game actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Pause,
}

impl Action {
    fn is_movement(&self) -> bool {
        matches!(self, Action::Up | Action::Down | Action::Left | Action::Right)
    }
}

/// Key name -> action map. Key names follow `KeyboardEvent.key` and are
/// matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            keys: BTreeMap::new(),
        };
        for (key, action) in [
            ("ArrowUp", Action::Up),
            ("w", Action::Up),
            ("ArrowDown", Action::Down),
            ("s", Action::Down),
            ("ArrowLeft", Action::Left),
            ("a", Action::Left),
            ("ArrowRight", Action::Right),
            ("d", Action::Right),
            ("Enter", Action::Confirm),
            ("Escape", Action::Pause),
        ] {
            bindings.bind(key, action);
        }
        bindings
    }
}

impl KeyBindings {
    pub fn bind(&mut self, key: &str, action: Action) {
        self.keys.insert(key.to_lowercase(), action);
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(&key.to_lowercase()).copied()
    }

    /// On-screen name of the first key bound to `action` ("ESC", "ENTER", "P")
    pub fn label_for(&self, action: Action) -> Option<String> {
        let key = self
            .keys
            .iter()
            .find_map(|(key, bound)| (*bound == action).then_some(key))?;
        Some(match key.as_str() {
            "escape" => "ESC".to_string(),
            other => other.to_uppercase(),
        })
    }
}

/// Tracks which movement keys are currently held
///
/// State is kept per key, so releasing one of two keys bound to the same
/// action leaves the action held.
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    /// Lowercased key name -> movement action it was bound to when pressed
    held: BTreeMap<String, Action>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str, bindings: &KeyBindings) {
        if let Some(action) = bindings.action_for(key).filter(Action::is_movement) {
            self.held.insert(key.to_lowercase(), action);
        }
    }

    /// Returns the discrete event a release triggers, if any
    pub fn release(&mut self, key: &str, bindings: &KeyBindings) -> Option<InputEvent> {
        self.held.remove(&key.to_lowercase());
        match bindings.action_for(key)? {
            Action::Confirm => Some(InputEvent::ConfirmReleased),
            Action::Pause => Some(InputEvent::PauseReleased),
            _ => None,
        }
    }

    /// Forget all held keys (e.g. window lost focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn snapshot(&self) -> TickInput {
        let mut input = TickInput::default();
        for action in self.held.values() {
            match action {
                Action::Up => input.up = true,
                Action::Down => input.down = true,
                Action::Left => input.left = true,
                Action::Right => input.right = true,
                Action::Confirm | Action::Pause => {}
            }
        }
        input
    }
}
