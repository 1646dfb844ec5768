//! Records and the persistence collaborator.
//!
//! A controller never owns record identity. It borrows a [`Store`] to look
//! records up, hands them input through [`Fillable::fill`] and asks the store
//! to persist or delete them.

use crate::{
    error::{BoxError, ValidationError},
    fields::{FieldErrors, InputMap},
    request::Request,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Mass-assignment contract of a record.
///
/// Usually derived with `#[derive(Fillable)]` (feature `macros`).
pub trait Fillable {
    /// Ordered names of the fields request input may assign.
    fn fillable(&self) -> Vec<String>;

    /// Assign resolved input onto the record.
    ///
    /// Keys that are not fillable are ignored. Values that cannot be decoded
    /// into the field type are reported as field errors.
    fn fill(&mut self, input: &InputMap) -> Result<(), ValidationError>;
}

/// A domain entity managed by a controller.
///
/// `Default` supplies the blank instance used by `create`/`store`;
/// `Serialize` turns records into view parameters.
pub trait Record: Fillable + Default + Serialize + 'static {
    /// Whitelist used when updating, if it differs from [`Fillable::fillable`].
    ///
    /// Receives the request so the whitelist can vary with submitted content
    /// (e.g. only accept a password when one was typed).
    fn fillable_for_update(&self, _request: &dyn Request) -> Option<Vec<String>> {
        None
    }

    /// Errors explaining the last rejected save.
    fn errors(&self) -> FieldErrors {
        FieldErrors::default()
    }
}

/// The persistence collaborator for one record type.
pub trait Store<M>: Send + Sync {
    /// Look up a record by primary key.
    fn find(&self, id: &str) -> Result<Option<M>, BoxError>;

    /// Load every record.
    fn all(&self) -> Result<Vec<M>, BoxError>;

    /// Persist a record.
    ///
    /// `Ok(false)` means the store rejected the record; the reasons are read
    /// back through [`Record::errors`]. `Err` is reserved for infrastructure
    /// failures.
    fn save(&self, record: &mut M) -> Result<bool, BoxError>;

    /// Delete a record.
    fn delete(&self, record: &M) -> Result<(), BoxError>;
}

/// Decode a submitted value into a field type.
///
/// Accepts the value as-is first, then falls back to parsing string input as
/// JSON so form-encoded scalars such as `"42"` or `"true"` reach typed fields.
pub fn decode_field<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Ok(decoded),
        Err(err) => match value {
            Value::String(raw) => serde_json::from_str(raw).map_err(|_| err),
            _ => Err(err),
        },
    }
}
