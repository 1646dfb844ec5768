//! Default record fetchers.

use crate::services::Context;
use crudline_core::{CrudError, NotFoundError};

/// Every record of the collection.
pub fn all<M>(cx: &Context<'_, M>) -> Result<Vec<M>, CrudError> {
    cx.services().store().all().map_err(CrudError::Store)
}

/// One record by primary key.
///
/// A missing record is a [`NotFoundError`] unless the controller turned
/// `fetch_should_fail` off, in which case it is `Ok(None)`.
pub fn instance<M>(cx: &Context<'_, M>, record_type: &str, id: &str) -> Result<Option<M>, CrudError> {
    match cx.services().store().find(id).map_err(CrudError::Store)? {
        Some(record) => Ok(Some(record)),
        None if cx.config().fetch_should_fail => {
            Err(NotFoundError::new(record_type, id).into())
        }
        None => {
            tracing::debug!(record_type, id, "record not found");
            Ok(None)
        }
    }
}
