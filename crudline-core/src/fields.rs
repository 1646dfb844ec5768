//! Field-level data shared by every stage: input maps, view parameters and
//! field errors.

use crate::error::ValidationError;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Sanitized request fields destined for a record, in whitelist order.
pub type InputMap = IndexMap<String, Value>;

/// Variables handed to a view.
pub type Params = IndexMap<String, Value>;

/// Whether input is being resolved for a new or an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// A new record is being stored.
    Creating,
    /// An existing record is being updated.
    Updating,
}

/// Error messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty set of field errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Number of fields with at least one message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(())` when empty, otherwise a [`ValidationError`] carrying these errors.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self))
        }
    }

    /// JSON object of field name to message list.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(field, messages)| {
                    let messages = messages.iter().cloned().map(Value::String).collect();
                    (field.clone(), Value::Array(messages))
                })
                .collect(),
        )
    }
}

impl<K: Into<String>, M: Into<String>> FromIterator<(K, M)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.add(field, message);
        }
        errors
    }
}

/// True for values a form submits when a field is left empty.
///
/// `null`, the empty string and empty arrays/objects are blank; `"0"` and
/// `false` are not.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Loose truthiness of a submitted value.
///
/// Falsy: `null`, `false`, numeric zero, `""`, `"0"` and empty arrays/objects.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
