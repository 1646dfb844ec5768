//! In-memory translation catalog.

use crudline_core::Translator;
use std::collections::HashMap;

/// A key to message map implementing [`Translator`].
///
/// Missing keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message.
    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(key, message);
        self
    }

    /// Add or replace a message.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
