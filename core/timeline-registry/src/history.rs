//! Undo/redo over registry snapshots.

use crate::{reduce, Intent, Outcome, Registry};
use tracing::debug;

/// A linear undo/redo history of registry snapshots.
///
/// Snapshots share every provider an intent did not touch, so keeping many
/// of them costs little more than the providers that actually changed.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Registry>,
    present: Registry,
    future: Vec<Registry>,
}

impl History {
    #[must_use]
    pub fn new(initial: Registry) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: Vec::new(),
        }
    }

    /// The current registry.
    #[must_use]
    pub fn present(&self) -> &Registry {
        &self.present
    }

    /// Reduces `intent` against the current registry.
    ///
    /// Intents that resolve push the previous snapshot onto the undo stack
    /// and clear the redo stack. Ignored intents leave the history untouched.
    pub fn apply(&mut self, intent: &Intent) -> Option<Outcome> {
        let transition = reduce(&self.present, intent);
        if transition.is_noop() {
            return None;
        }
        let previous = std::mem::replace(&mut self.present, transition.registry);
        self.past.push(previous);
        self.future.clear();
        transition.outcome
    }

    /// Steps back one snapshot. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        debug!(undo_depth = self.past.len(), "Undo");
        true
    }

    /// Re-applies the last undone snapshot. Returns false if there is none.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        debug!(undo_depth = self.past.len(), "Redo");
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of snapshots behind the present.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }
}
