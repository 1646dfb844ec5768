//! # crudline-std
//!
//! Standard implementations for the crudline resource controller pipeline.
//!
//! This crate provides:
//! - **Callbacks**: [`CallbackRegistry`] with placeholder forwarding
//! - **Input**: [`InputResolver`] (whitelist, filter, checkbox and nullable coercion)
//! - **Standard hooks**: [`TracingCallback`], [`LoggingCallback`]
//! - **Collaborators**: [`Catalog`] translations, [`NamedRoutes`] URL generation
//! - **Testing**: in-memory stand-ins in [`testing`]

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
#[allow(clippy::pub_use)]
pub use crudline_core;

// Modules
pub mod catalog;
pub mod hooks;
pub mod input;
pub mod registry;
pub mod routes;
pub mod testing;

#[allow(clippy::pub_use)]
pub use catalog::Catalog;
#[allow(clippy::pub_use)]
pub use hooks::{LoggingCallback, TracingCallback};
#[allow(clippy::pub_use)]
pub use input::{InputOptions, InputResolver, Nullable};
#[allow(clippy::pub_use)]
pub use registry::{CallbackRegistry, PlaceholderTarget};
#[allow(clippy::pub_use)]
pub use routes::NamedRoutes;
