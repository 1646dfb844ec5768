//! Observation wrappers for callbacks.

use crudline_core::{Callback, CallbackArgs, CallbackResult};

/// A callback wrapper that runs the inner callback inside a `tracing` span.
pub struct TracingCallback<C> {
    inner: C,
    name: &'static str,
}

impl<C> TracingCallback<C> {
    /// Create a new `TracingCallback` wrapper around a callback.
    pub const fn new(inner: C, name: &'static str) -> Self {
        Self { inner, name }
    }
}

impl<C: Clone> Clone for TracingCallback<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<M, C> Callback<M> for TracingCallback<C>
where
    C: Callback<M>,
{
    fn call(&self, args: &mut CallbackArgs<'_, M>) -> CallbackResult {
        let span = tracing::info_span!(
            "callback",
            hook = %self.name,
            method = %args.request().method(),
            has_record = args.record().is_some(),
        );
        let _entered = span.enter();

        let result = self.inner.call(args);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "callback failed");
        }
        result
    }
}

/// A callback that logs each firing at debug level and changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCallback;

impl<M: 'static> Callback<M> for LoggingCallback {
    fn call(&self, args: &mut CallbackArgs<'_, M>) -> CallbackResult {
        tracing::debug!(
            method = %args.request().method(),
            has_record = args.record().is_some(),
            has_input = args.input().is_some(),
            "callback fired"
        );
        Ok(None)
    }
}
