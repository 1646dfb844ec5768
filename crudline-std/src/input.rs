//! Input resolution.
//!
//! Turns raw request fields into the [`InputMap`] a record is filled from:
//!
//! 1. pick the whitelist (the update whitelist when updating, if the record
//!    declares one)
//! 2. extract whitelisted fields present in the request
//! 3. drop falsy values (filter)
//! 4. force checkbox fields to booleans
//! 5. turn falsy nullable fields into explicit nulls (an explicit `null`
//!    submission is left out)
//!
//! Steps 3 to 5 run in this order and can each be switched off through
//! [`InputOptions`]. Firing the `input` event is left to the controller,
//! which owns the callback registry.

use crudline_core::{InputMap, Mode, Record, Request, is_truthy};
use serde_json::Value;

/// Switches for the optional resolution steps. All on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    /// Drop falsy values.
    pub filter: bool,
    /// Coerce checkbox fields to booleans.
    pub checkboxes: bool,
    /// Coerce empty nullable fields to null.
    pub nullable: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            filter: true,
            checkboxes: true,
            nullable: true,
        }
    }
}

impl InputOptions {
    /// Enable or disable the falsy-value filter.
    pub fn with_filter(mut self, enabled: bool) -> Self {
        self.filter = enabled;
        self
    }

    /// Enable or disable checkbox coercion.
    pub fn with_checkboxes(mut self, enabled: bool) -> Self {
        self.checkboxes = enabled;
        self
    }

    /// Enable or disable nullable coercion.
    pub fn with_nullable(mut self, enabled: bool) -> Self {
        self.nullable = enabled;
        self
    }
}

/// Which whitelisted fields are nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Nullable {
    /// Every whitelisted field.
    #[default]
    All,
    /// Only the listed fields.
    Only(Vec<String>),
}

impl Nullable {
    /// Check if a field is nullable.
    pub fn contains(&self, field: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(fields) => fields.iter().any(|f| f == field),
        }
    }
}

/// Resolves request input against a record's whitelist.
#[derive(Debug, Clone, Default)]
pub struct InputResolver {
    options: InputOptions,
    checkboxes: Vec<String>,
    nullable: Nullable,
}

impl InputResolver {
    /// Create a resolver with the given switches.
    pub fn new(options: InputOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Fields submitted as checkboxes.
    pub fn checkboxes(mut self, fields: Vec<String>) -> Self {
        self.checkboxes = fields;
        self
    }

    /// Fields whose empty values become null.
    pub fn nullable(mut self, nullable: Nullable) -> Self {
        self.nullable = nullable;
        self
    }

    /// Resolve the input map for a record.
    pub fn resolve<M: Record>(&self, request: &dyn Request, record: &M, mode: Mode) -> InputMap {
        let whitelist = match mode {
            Mode::Updating => record
                .fillable_for_update(request)
                .unwrap_or_else(|| record.fillable()),
            Mode::Creating => record.fillable(),
        };

        let mut input: InputMap = whitelist
            .iter()
            .filter_map(|field| {
                request
                    .input(field)
                    .map(|value| (field.clone(), value.clone()))
            })
            .collect();

        if self.options.filter {
            input.retain(|field, value| {
                let keep = is_truthy(value);
                if !keep {
                    tracing::trace!(field = %field, "dropping falsy input");
                }
                keep
            });
        }

        if self.options.checkboxes {
            for field in self.checkboxes.iter().filter(|f| whitelist.contains(f)) {
                let checked = request.input(field).is_some_and(is_truthy);
                input.insert(field.clone(), Value::Bool(checked));
            }
        }

        if self.options.nullable {
            for field in whitelist.iter().filter(|f| self.nullable.contains(f)) {
                if input.get(field).is_some_and(|value| !value.is_null()) {
                    continue;
                }
                let submitted_empty = request
                    .input(field)
                    .is_some_and(|value| !value.is_null() && !is_truthy(value));
                if submitted_empty {
                    tracing::trace!(field = %field, "nulling empty input");
                    input.insert(field.clone(), Value::Null);
                }
            }
        }

        input
    }
}
