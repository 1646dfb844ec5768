//! Per-controller callback registry.
//!
//! Events map to ordered, append-only hook lists. A fresh registry built with
//! [`CallbackRegistry::with_defaults`] holds one placeholder per default event
//! that forwards to the owning controller through [`PlaceholderTarget`].

use crudline_core::{
    Callback, CallbackArgs, CallbackResult, CrudError, InputMap, UnknownEventError, events,
};
use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// The owner of a registry's placeholder hooks.
///
/// Implemented by controllers so that each default event reaches the
/// overridable method of the same name.
pub trait PlaceholderTarget<M> {
    /// Handle a placeholder firing for `event`.
    fn placeholder(&self, event: &str, args: &mut CallbackArgs<'_, M>) -> CallbackResult;
}

impl<M> PlaceholderTarget<M> for () {
    fn placeholder(&self, _event: &str, _args: &mut CallbackArgs<'_, M>) -> CallbackResult {
        Ok(None)
    }
}

enum Entry<M> {
    Placeholder,
    Hook(Arc<dyn Callback<M>>),
}

impl<M> Clone for Entry<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Placeholder => Self::Placeholder,
            Self::Hook(hook) => Self::Hook(Arc::clone(hook)),
        }
    }
}

/// Event name to ordered hooks.
pub struct CallbackRegistry<M> {
    events: IndexMap<String, Vec<Entry<M>>>,
}

impl<M: 'static> Default for CallbackRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for CallbackRegistry<M> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<M: 'static> CallbackRegistry<M> {
    /// An empty registry with no events.
    pub fn new() -> Self {
        Self {
            events: IndexMap::new(),
        }
    }

    /// A registry holding a placeholder for each default event.
    pub fn with_defaults() -> Self {
        let events = events::DEFAULTS
            .iter()
            .map(|event| (event.to_string(), vec![Entry::Placeholder]))
            .collect();
        Self { events }
    }

    /// Append a hook to an event, creating the event when absent.
    pub fn register<C: Callback<M>>(&mut self, event: impl Into<String>, hook: C) {
        self.events
            .entry(event.into())
            .or_default()
            .push(Entry::Hook(Arc::new(hook)));
    }

    /// Append a closure to an event.
    ///
    /// Equivalent to [`register`](Self::register) but pins the closure
    /// signature so argument types need no annotation.
    pub fn register_fn<F>(&mut self, event: impl Into<String>, hook: F)
    where
        F: Fn(&mut CallbackArgs<'_, M>) -> CallbackResult + Send + Sync + 'static,
    {
        self.register(event, hook);
    }

    /// Check if an event has been registered.
    pub fn has(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    /// Number of hooks registered for an event, placeholders included.
    pub fn count(&self, event: &str) -> usize {
        self.events.get(event).map_or(0, Vec::len)
    }

    /// Registered event names, in registration order.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    /// Invoke every hook of an event in order and return the last result.
    ///
    /// Every hook receives the same arguments. Earlier results are discarded.
    pub fn fire<T>(
        &self,
        target: &T,
        event: &str,
        args: &mut CallbackArgs<'_, M>,
    ) -> Result<Option<InputMap>, CrudError>
    where
        T: PlaceholderTarget<M> + ?Sized,
    {
        let Some(entries) = self.events.get(event) else {
            return Err(UnknownEventError::new(event).into());
        };

        tracing::trace!(event, hooks = entries.len(), "firing callbacks");

        let mut last = None;
        for entry in entries {
            let result = match entry {
                Entry::Placeholder => target.placeholder(event, args),
                Entry::Hook(hook) => hook.call(args),
            };
            last = result.map_err(|source| CrudError::Callback {
                event: event.to_string(),
                source,
            })?;
        }
        Ok(last)
    }
}

impl<M> fmt::Debug for CallbackRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.events.iter().map(|(event, hooks)| (event, hooks.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Journal, RecordingCallback, TestRequest};
    use serde_json::json;

    #[derive(Default)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_defaults_are_registered() {
        let registry = CallbackRegistry::<Counter>::with_defaults();
        for event in events::DEFAULTS {
            assert!(registry.has(event), "{event} missing");
            assert_eq!(registry.count(event), 1);
        }
        assert!(!registry.has(events::INPUT));
    }

    #[test]
    fn test_register_appends_in_order() {
        let journal = Journal::new();
        let mut registry = CallbackRegistry::<Counter>::with_defaults();
        registry.register(events::BEFORE_SAVE, RecordingCallback::new("first", journal.clone()));
        registry.register(events::BEFORE_SAVE, RecordingCallback::new("second", journal.clone()));

        let request = TestRequest::post();
        let mut record = Counter::default();
        let mut args = CallbackArgs::with_record(&request, &mut record);
        registry.fire(&(), events::BEFORE_SAVE, &mut args).unwrap();

        assert_eq!(registry.count(events::BEFORE_SAVE), 3);
        assert_eq!(journal.entries(), vec!["first", "second"]);
    }

    #[test]
    fn test_register_creates_custom_event() {
        let mut registry = CallbackRegistry::<Counter>::new();
        assert!(!registry.has("beforePublish"));
        registry.register_fn("beforePublish", |_args| Ok(None));
        assert!(registry.has("beforePublish"));
    }

    #[test]
    fn test_fire_unknown_event_fails() {
        let registry = CallbackRegistry::<Counter>::with_defaults();
        let request = TestRequest::get();
        let mut args = CallbackArgs::new(&request);

        let err = registry.fire(&(), "beforePublish", &mut args).unwrap_err();
        assert!(matches!(err, CrudError::UnknownEvent(ref e) if e.event == "beforePublish"));
    }

    #[test]
    fn test_hooks_share_the_record() {
        let mut registry = CallbackRegistry::<Counter>::new();
        registry.register_fn(events::BEFORE_SAVE, |args| {
            if let Some(counter) = args.record_mut() {
                counter.value += 1;
            }
            Ok(None)
        });
        registry.register_fn(events::BEFORE_SAVE, |args| {
            if let Some(counter) = args.record_mut() {
                counter.value *= 10;
            }
            Ok(None)
        });

        let request = TestRequest::post();
        let mut record = Counter { value: 1 };
        let mut args = CallbackArgs::with_record(&request, &mut record);
        registry.fire(&(), events::BEFORE_SAVE, &mut args).unwrap();

        assert_eq!(record.value, 20);
    }

    #[test]
    fn test_fire_returns_last_result() {
        let mut registry = CallbackRegistry::<Counter>::new();
        registry.register_fn(events::INPUT, |_args| {
            let mut map = InputMap::new();
            map.insert("title".into(), json!("first"));
            Ok(Some(map))
        });
        registry.register_fn(events::INPUT, |args| {
            let mut map = args.input().cloned().unwrap_or_default();
            map.insert("slug".into(), json!("last"));
            Ok(Some(map))
        });

        let request = TestRequest::post();
        let mut input = InputMap::new();
        input.insert("title".into(), json!("Hello"));
        let mut args = CallbackArgs::with_input(&request, &input);
        let result = registry.fire(&(), events::INPUT, &mut args).unwrap().unwrap();

        // the second hook saw the original input, not the first hook's map
        assert_eq!(result.get("title"), Some(&json!("Hello")));
        assert_eq!(result.get("slug"), Some(&json!("last")));
    }

    #[test]
    fn test_hook_error_stops_firing() {
        let journal = Journal::new();
        let mut registry = CallbackRegistry::<Counter>::new();
        registry.register_fn(events::BEFORE_DESTROY, |_args| Err("locked".into()));
        registry.register(events::BEFORE_DESTROY, RecordingCallback::new("after", journal.clone()));

        let request = TestRequest::delete();
        let mut args = CallbackArgs::new(&request);
        let err = registry.fire(&(), events::BEFORE_DESTROY, &mut args).unwrap_err();

        assert!(matches!(err, CrudError::Callback { ref event, .. } if event == "beforeDestroy"));
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn test_placeholder_reaches_target() {
        struct Target(Journal);

        impl PlaceholderTarget<Counter> for Target {
            fn placeholder(
                &self,
                event: &str,
                _args: &mut CallbackArgs<'_, Counter>,
            ) -> CallbackResult {
                self.0.push(format!("placeholder:{event}"));
                Ok(None)
            }
        }

        let journal = Journal::new();
        let mut registry = CallbackRegistry::<Counter>::with_defaults();
        registry.register(events::AFTER_SAVE, RecordingCallback::new("hook", journal.clone()));

        let request = TestRequest::post();
        let mut args = CallbackArgs::new(&request);
        registry
            .fire(&Target(journal.clone()), events::AFTER_SAVE, &mut args)
            .unwrap();

        assert_eq!(journal.entries(), vec!["placeholder:afterSave", "hook"]);
    }
}
