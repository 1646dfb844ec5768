//! Error types for crudline.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`CrudError`] - Top-level error type returned by every action
//! - [`NotFoundError`] - The requested record does not exist
//! - [`AuthorizationError`] - The gate refused an ability
//! - [`ValidationError`] - Input failed validation (carries field errors)
//! - [`UnknownEventError`] - A callback event was fired but never registered
//! - [`RoutingError`] - URL generation failed

use crate::{auth::Ability, fields::FieldErrors};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all crudline operations.
#[derive(Error, Debug)]
pub enum CrudError {
    /// The record addressed by the request does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The gate refused the requested ability.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// The resolved input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A callback event was fired without being registered.
    #[error(transparent)]
    UnknownEvent(#[from] UnknownEventError),

    /// A named route could not be generated.
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// A registered callback returned an error.
    #[error("callback for `{event}` failed")]
    Callback {
        /// Name of the event being fired.
        event: String,
        /// The error returned by the hook.
        #[source]
        source: BoxError,
    },

    /// The persistence collaborator failed (not a rejected save).
    #[error("store error")]
    Store(#[source] BoxError),

    /// The renderer failed to produce a page.
    #[error("render error")]
    Render(#[source] BoxError),

    /// The route parameter carrying the record key was missing.
    #[error("missing route parameter `{0}`")]
    MissingRouteParameter(String),

    /// A record or collection could not be turned into view parameters.
    #[error("failed to serialize view parameters: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The record addressed by a request does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no {resource} found for key `{id}`")]
pub struct NotFoundError {
    /// Short type name of the record.
    pub resource: String,
    /// The key that was looked up.
    pub id: String,
}

impl NotFoundError {
    /// Create a new not-found error.
    pub fn new(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            id: id.into(),
        }
    }
}

/// The gate refused an ability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not allowed to {ability}")]
pub struct AuthorizationError {
    /// The refused ability.
    pub ability: Ability,
    /// Optional explanation from the policy.
    pub reason: Option<String>,
}

impl AuthorizationError {
    /// Create a new authorization error for the given ability.
    pub fn new(ability: Ability) -> Self {
        Self {
            ability,
            reason: None,
        }
    }

    /// Attach an explanation.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Input failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed on {} field(s)", .errors.len())]
pub struct ValidationError {
    /// Field-level error messages.
    pub errors: FieldErrors,
}

impl ValidationError {
    /// Create a validation error from field errors.
    pub fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }
}

/// A callback event was fired without being registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown callback event `{event}`")]
pub struct UnknownEventError {
    /// The event name.
    pub event: String,
}

impl UnknownEventError {
    /// Create a new unknown-event error.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
        }
    }
}

/// Errors that can occur during URL generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// No route is registered under the name.
    #[error("no route named `{0}`")]
    UnknownRoute(String),
}
