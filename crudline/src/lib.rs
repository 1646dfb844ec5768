//! # crudline - Resource Controller Pipeline
//!
//! `crudline` gives a resource the eight CRUD actions (`index`, `create`,
//! `store`, `show`, `edit`, `update`, `confirmDestroy`, `destroy`) as a fixed
//! pipeline whose every stage can be overridden. Persistence, authorization,
//! validation, routing, rendering and translation stay outside; the pipeline
//! calls them through the narrow traits in [`crudline_core`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crudline::prelude::*;
//!
//! #[derive(Default, Serialize, Fillable)]
//! struct Article {
//!     id: Option<u64>,
//!     #[fillable]
//!     title: String,
//! }
//!
//! impl Record for Article {}
//!
//! struct ArticlesController;
//!
//! impl Resource for ArticlesController {
//!     type Record = Article;
//!
//!     fn collection_name(&self) -> &str {
//!         "articles"
//!     }
//! }
//!
//! let controller = Controller::new(ArticlesController, services);
//! let outcome = controller.dispatch(Action::Store, &request)?;
//! ```

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod capability;
mod config;
mod controller;
mod params;
mod resource;
mod services;

pub mod fetch;
pub mod naming;
pub mod respond;

#[allow(clippy::pub_use)]
pub use action::{Action, ParseActionError};
#[allow(clippy::pub_use)]
pub use capability::{Capabilities, has_capability, probe};
#[allow(clippy::pub_use)]
pub use config::ResourceConfig;
#[allow(clippy::pub_use)]
pub use controller::Controller;
#[allow(clippy::pub_use)]
pub use params::{ViewData, view_name};
#[allow(clippy::pub_use)]
pub use resource::Resource;
#[allow(clippy::pub_use)]
pub use respond::Transform;
#[allow(clippy::pub_use)]
pub use services::{Context, Services};

#[allow(clippy::pub_use)]
pub use crudline_core::{
    // Collaborators
    Ability,
    // Capabilities
    Authorizable,
    // Errors
    AuthorizationError,
    BoxError,
    // Callbacks
    Callback,
    CallbackArgs,
    CallbackResult,
    CrudError,
    // Fields
    FieldErrors,
    Fillable,
    FormPopulator,
    Formerable,
    Gate,
    InputMap,
    Location,
    Method,
    Mode,
    NotFoundError,
    // Outcomes
    Outcome,
    Params,
    Record,
    Redirect,
    Renderer,
    Request,
    Response,
    RoutingError,
    RuleSet,
    Rules,
    Store,
    Subject,
    Translator,
    UnknownEventError,
    UrlGenerator,
    Validatable,
    ValidationError,
    Validator,
    View,
    decode_field,
    events,
    is_blank,
    is_truthy,
};

#[allow(clippy::pub_use)]
pub use crudline_std::{
    CallbackRegistry, Catalog, InputOptions, InputResolver, LoggingCallback, NamedRoutes,
    Nullable, PlaceholderTarget, TracingCallback,
};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::pub_use, clippy::wildcard_imports)]
    pub use crudline_std::testing::*;
}

/// Prelude module - common imports for crudline.
///
/// # Usage
///
/// ```rust,ignore
/// use crudline::prelude::*;
/// ```
pub mod prelude {
    #![allow(clippy::pub_use)]

    pub use crate::{
        Ability, Action, Authorizable, CallbackArgs, CallbackResult, Context, Controller,
        CrudError, FieldErrors, Fillable, Formerable, Gate, InputMap, Outcome, Record, Redirect,
        Request, Resource, ResourceConfig, RuleSet, Services, Store, Subject, Validatable,
        ViewData, events,
    };
}

#[cfg(feature = "macros")]
#[allow(clippy::pub_use)]
pub use crudline_macros::Fillable;
