//! Optional controller capabilities.
//!
//! A resource opts into a capability by implementing the trait and returning
//! itself from the matching `as_*` accessor on the resource. Nothing is
//! registered: the pipeline asks the resource at every gate.
//!
//! Implementing a trait alone changes nothing. A resource that implements
//! [`Authorizable`] but keeps the default `as_authorizable` runs without any
//! authorization. Use `crudline::capabilities!` inside the `Resource` impl so
//! the accessor and the trait cannot drift apart.

use crate::{
    auth::Gate,
    request::Request,
    services::FormPopulator,
    validate::{RuleSet, Validator},
};

/// The resource checks abilities before acting.
///
/// Only takes effect once the resource's `as_authorizable` returns it.
pub trait Authorizable<M> {
    /// The gate abilities are checked against.
    fn gate(&self) -> &dyn Gate<M>;
}

/// The resource pre-populates a form builder on `edit`.
pub trait Formerable<M> {
    /// The form builder to populate.
    fn form(&self) -> &dyn FormPopulator<M>;
}

/// The resource validates input before filling records.
pub trait Validatable<M> {
    /// Rules for this request and record.
    fn validation_rules(&self, request: &dyn Request, record: &M) -> RuleSet;

    /// The engine executing the rules.
    fn validator(&self) -> &dyn Validator;
}
