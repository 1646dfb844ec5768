//! Request primitives the pipeline reads from.

use crate::fields::{InputMap, is_blank};
use serde_json::Value;
use std::fmt;

/// HTTP method of an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
}

impl Method {
    /// Upper-case method name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The inbound request as seen by a controller.
///
/// Implemented by the surrounding web layer. Field lookup must distinguish a
/// field that was not submitted (`None`) from one submitted empty
/// (`Some("")`); nullable coercion depends on it.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a crudline `Request`",
    label = "missing `Request` implementation",
    note = "Adapt your framework's request type by implementing `Request`."
)]
pub trait Request {
    /// The HTTP method.
    fn method(&self) -> Method;

    /// A named route parameter, e.g. the record key.
    fn route_param(&self, name: &str) -> Option<&str>;

    /// A submitted query/body field. `None` when the field was not sent.
    fn input(&self, field: &str) -> Option<&Value>;

    /// Every submitted field as sent, flashed back to the form after a failed
    /// mutation.
    fn all(&self) -> InputMap;

    /// Whether the client expects a structured (JSON) response.
    fn wants_json(&self) -> bool;

    /// Whether a field was submitted with a non-blank value.
    fn has(&self, field: &str) -> bool {
        self.input(field).is_some_and(|value| !is_blank(value))
    }
}
