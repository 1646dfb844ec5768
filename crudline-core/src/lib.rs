//! # crudline-core
//!
//! Core traits for the crudline resource controller pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! adapters that plug a web framework, ORM or template engine into crudline
//! without pulling in the pipeline itself.
//!
//! # Collaborators
//!
//! The pipeline never implements persistence, authorization, validation,
//! routing, rendering or translation. It calls through these interfaces:
//!
//! - [`Store`] / [`Record`] / [`Fillable`] - persistence and mass assignment
//! - [`Request`] - the inbound request
//! - [`Gate`] - authorization policy
//! - [`Validator`] / [`RuleSet`] - validation engine and rules
//! - [`UrlGenerator`] - named routes
//! - [`Translator`] - flash messages
//! - [`Renderer`] - view directives to pages
//! - [`FormPopulator`] - form builder population
//!
//! # Extension Points
//!
//! - [`Callback`] - hooks fired at named lifecycle [`events`]
//! - [`Authorizable`], [`Formerable`], [`Validatable`] - optional capabilities
//!
//! # Error Types
//!
//! - [`CrudError`] - Top-level error type
//! - [`NotFoundError`], [`AuthorizationError`], [`ValidationError`],
//!   [`UnknownEventError`], [`RoutingError`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod auth;
mod callback;
mod capability;
mod error;
mod fields;
mod outcome;
mod record;
mod render;
mod request;
mod services;
mod validate;

// Re-exports
pub use auth::{Ability, Gate, Subject};
pub use callback::{Callback, CallbackArgs, CallbackResult, events};
pub use capability::{Authorizable, Formerable, Validatable};
pub use error::{
    AuthorizationError, BoxError, CrudError, NotFoundError, RoutingError, UnknownEventError,
    ValidationError,
};
pub use fields::{FieldErrors, InputMap, Mode, Params, is_blank, is_truthy};
pub use outcome::{Location, Outcome, Redirect, View};
pub use record::{Fillable, Record, Store, decode_field};
pub use render::{Renderer, Response};
pub use request::{Method, Request};
pub use services::{FormPopulator, Translator, UrlGenerator};
pub use validate::{RuleSet, Rules, Validator};
