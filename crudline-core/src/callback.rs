//! # Lifecycle callbacks
//!
//! A callback is a hook invoked when a named lifecycle event fires, such as
//! `beforeSave` or `afterDestroy`. Every hook registered for an event receives
//! the same [`CallbackArgs`]; hooks may mutate the record through them but
//! never see each other's return values.
//!
//! Closures with the right signature are callbacks:
//!
//! ```rust,ignore
//! controller.register_fn(events::BEFORE_SAVE, |args: &mut CallbackArgs<'_, Article>| {
//!     if let Some(article) = args.record_mut() {
//!         article.slug = slugify(&article.title);
//!     }
//!     Ok(None)
//! });
//! ```

use crate::{error::BoxError, fields::InputMap, request::Request};

/// What a hook returns.
///
/// Only the `input` event looks at the value: a `Some` map replaces the
/// resolved input.
pub type CallbackResult = Result<Option<InputMap>, BoxError>;

/// Names of the lifecycle events.
pub mod events {
    /// Fired at the start of every action.
    pub const BEFORE_ALL: &str = "beforeAll";
    /// Fired before a new record is saved.
    pub const BEFORE_STORE: &str = "beforeStore";
    /// Fired before an existing record is saved.
    pub const BEFORE_UPDATE: &str = "beforeUpdate";
    /// Fired before any save.
    pub const BEFORE_SAVE: &str = "beforeSave";
    /// Fired before a record is deleted.
    pub const BEFORE_DESTROY: &str = "beforeDestroy";
    /// Fired after a new record was saved.
    pub const AFTER_STORE: &str = "afterStore";
    /// Fired after an existing record was saved.
    pub const AFTER_UPDATE: &str = "afterUpdate";
    /// Fired after any successful save.
    pub const AFTER_SAVE: &str = "afterSave";
    /// Fired after a record was deleted.
    pub const AFTER_DESTROY: &str = "afterDestroy";
    /// Fired with resolved input when registered; not a default event.
    pub const INPUT: &str = "input";

    /// Events every registry starts with.
    pub const DEFAULTS: [&str; 9] = [
        BEFORE_ALL,
        BEFORE_STORE,
        BEFORE_UPDATE,
        BEFORE_SAVE,
        BEFORE_DESTROY,
        AFTER_STORE,
        AFTER_UPDATE,
        AFTER_SAVE,
        AFTER_DESTROY,
    ];
}

/// Arguments shared by every hook of one firing.
pub struct CallbackArgs<'a, M> {
    request: &'a dyn Request,
    record: Option<&'a mut M>,
    input: Option<&'a InputMap>,
}

impl<'a, M> CallbackArgs<'a, M> {
    /// Arguments carrying only the request.
    pub fn new(request: &'a dyn Request) -> Self {
        Self {
            request,
            record: None,
            input: None,
        }
    }

    /// Arguments carrying the request and the record being mutated.
    pub fn with_record(request: &'a dyn Request, record: &'a mut M) -> Self {
        Self {
            request,
            record: Some(record),
            input: None,
        }
    }

    /// Arguments carrying the request and resolved input.
    pub fn with_input(request: &'a dyn Request, input: &'a InputMap) -> Self {
        Self {
            request,
            record: None,
            input: Some(input),
        }
    }

    /// The inbound request.
    pub fn request(&self) -> &'a dyn Request {
        self.request
    }

    /// The record, for mutation events.
    pub fn record(&self) -> Option<&M> {
        self.record.as_deref()
    }

    /// Mutable access to the record, for mutation events.
    pub fn record_mut(&mut self) -> Option<&mut M> {
        self.record.as_deref_mut()
    }

    /// The resolved input, for the `input` event.
    pub fn input(&self) -> Option<&'a InputMap> {
        self.input
    }
}

/// A hook invoked when a lifecycle event fires.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Callback` for records of type `{M}`",
    label = "missing `Callback` implementation",
    note = "Closures of type `Fn(&mut CallbackArgs<'_, {M}>) -> CallbackResult` are callbacks."
)]
pub trait Callback<M>: Send + Sync + 'static {
    /// Run the hook.
    fn call(&self, args: &mut CallbackArgs<'_, M>) -> CallbackResult;
}

// Blanket impl for closures
impl<M, F> Callback<M> for F
where
    F: Fn(&mut CallbackArgs<'_, M>) -> CallbackResult + Send + Sync + 'static,
{
    fn call(&self, args: &mut CallbackArgs<'_, M>) -> CallbackResult {
        (self)(args)
    }
}
