//! The provider registry and the result window as one view state.

use crate::ResultWindow;
use timeline_registry::{Intent, Outcome, Registry};

/// Everything the timeline needs to issue a query and show its results.
#[derive(Debug, Clone, Default)]
pub struct QueryView {
    registry: Registry,
    window: ResultWindow,
}

impl QueryView {
    #[must_use]
    pub fn new(registry: Registry, window: ResultWindow) -> Self {
        Self { registry, window }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn window(&self) -> &ResultWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut ResultWindow {
        &mut self.window
    }

    /// Reduces an intent against the registry. The window is carried over.
    #[must_use]
    pub fn apply(&self, intent: &Intent) -> (Self, Option<Outcome>) {
        let transition = self.registry.apply(intent);
        let next = Self {
            registry: transition.registry,
            window: self.window.clone(),
        };
        (next, transition.outcome)
    }

    /// Returns true when there are no top-level providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The pagination footer is only shown when there are providers.
    #[must_use]
    pub fn show_pagination(&self) -> bool {
        !self.is_empty()
    }
}
