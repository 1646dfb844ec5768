//! Per-resource configuration.

use crudline_std::InputOptions;

/// Knobs a resource can turn without overriding pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    /// Fail with `NotFoundError` when a record is missing. When off, the
    /// render actions receive an absent record instead. Default `true`.
    pub fetch_should_fail: bool,
    /// Input resolution switches.
    pub input: InputOptions,
    /// Flash key success messages are stored under. Default `alerts.success`.
    pub flash_key: String,
    /// Request field overriding the success redirect. Default `_redirect`.
    pub redirect_field: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self {
            fetch_should_fail: true,
            input: InputOptions::default(),
            flash_key: "alerts.success".to_string(),
            redirect_field: "_redirect".to_string(),
        }
    }

    /// Set missing-record behavior.
    pub fn with_fetch_should_fail(mut self, fail: bool) -> Self {
        self.fetch_should_fail = fail;
        self
    }

    /// Set input resolution switches.
    pub fn with_input(mut self, input: InputOptions) -> Self {
        self.input = input;
        self
    }

    /// Set the success flash key.
    pub fn with_flash_key(mut self, key: impl Into<String>) -> Self {
        self.flash_key = key.into();
        self
    }

    /// Set the redirect override field.
    pub fn with_redirect_field(mut self, field: impl Into<String>) -> Self {
        self.redirect_field = field.into();
        self
    }
}
