//! UI callbacks waiting to be installed on the presentation layer.

use crate::presentation::{Presentation, UiHandler};

/// Event name and element class a handler is registered for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallbackKey {
    pub event: String,
    pub class: String,
}

impl CallbackKey {
    /// Create a key. A leading `.` on the class is dropped, so `".card"`
    /// and `"card"` name the same class.
    pub fn new(event: impl Into<String>, class: impl Into<String>) -> Self {
        let class: String = class.into();
        Self {
            event: event.into(),
            class: class.trim_start_matches('.').to_string(),
        }
    }
}

/// Handlers keyed by (event, class), in first-registration order.
#[derive(Clone, Default)]
pub struct CallbackTable {
    entries: Vec<(CallbackKey, UiHandler)>,
}

impl CallbackTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a handler. A handler already stored under the same key is
    /// replaced in place.
    ///
    /// Returns whether a handler was replaced.
    pub fn register(&mut self, key: CallbackKey, handler: UiHandler) -> bool {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => {
                entry.1 = handler;
                true
            }
            None => {
                self.entries.push((key, handler));
                false
            }
        }
    }

    /// Attach every stored handler to the view. Returns how many were
    /// attached.
    pub fn install(&self, view: &mut dyn Presentation) -> usize {
        for (key, handler) in &self.entries {
            view.attach_handler(&key.class, &key.event, handler.clone());
        }
        self.entries.len()
    }

    /// Check if a key has a handler.
    #[must_use]
    pub fn contains(&self, key: &CallbackKey) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CallbackTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(key, _)| key))
            .finish()
    }
}
