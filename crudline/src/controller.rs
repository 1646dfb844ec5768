//! # The action pipeline
//!
//! [`Controller`] runs the eight CRUD actions for a [`Resource`]. Each action
//! is a fixed sequence of stages; the resource customizes stages by
//! overriding trait methods, and callbacks observe the mutation points.
//!
//! | Action | Sequence |
//! |---|---|
//! | `index` | beforeAll, authorize `index` on the type, fetch all, params, view |
//! | `create` | beforeAll, authorize `create` on the type, new record, params, view |
//! | `store` | beforeAll, authorize `create` on the type, new record, input, validate, fill, beforeStore, beforeSave, save, afterStore, afterSave, redirect |
//! | `show` | beforeAll, fetch, authorize `read`, params, view |
//! | `edit` | beforeAll, fetch, authorize `update`, populate form, params, view |
//! | `update` | beforeAll, fetch, input, authorize `update`, validate, fill, beforeUpdate, beforeSave, save, afterUpdate, afterSave, redirect or payload |
//! | `confirmDestroy` | beforeAll, fetch, authorize `destroy`, params, view |
//! | `destroy` | beforeAll, fetch, authorize `destroy`, beforeDestroy, delete, afterDestroy, redirect |
//!
//! Validation and fill errors and rejected saves end in a failure outcome.
//! Missing records, refused abilities and failing callbacks end in an error.

use crate::{
    action::Action,
    capability::{self, Capabilities},
    config::ResourceConfig,
    params,
    resource::Resource,
    respond,
    services::{Context, Services},
};
use crudline_core::{
    Ability, Callback, CallbackArgs, CallbackResult, CrudError, FieldErrors, Fillable, InputMap,
    Mode, NotFoundError, Outcome, Params, Record, Redirect, Request, Subject, events,
};
use crudline_std::{CallbackRegistry, InputResolver, PlaceholderTarget};
use serde_json::Value;

/// A resource wired to its collaborators and callbacks.
///
/// Build one per request; registered callbacks live as long as the controller.
pub struct Controller<R: Resource> {
    resource: R,
    services: Services<R::Record>,
    config: ResourceConfig,
    callbacks: CallbackRegistry<R::Record>,
}

impl<R: Resource> Controller<R> {
    /// Create a controller with the default callback events registered.
    pub fn new(resource: R, services: Services<R::Record>) -> Self {
        if let Some(formerable) = resource.as_formerable() {
            formerable.form().translate_from(&resource.language_base());
        }
        let config = resource.config();

        Self {
            resource,
            services,
            config,
            callbacks: CallbackRegistry::with_defaults(),
        }
    }

    /// The wrapped resource.
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Injected collaborators.
    pub fn services(&self) -> &Services<R::Record> {
        &self.services
    }

    /// Configuration read from the resource at construction.
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Capabilities the resource currently exposes.
    pub fn capabilities(&self) -> Capabilities {
        capability::probe(&self.resource)
    }

    // ========================================================================
    // Callbacks
    // ========================================================================

    /// Append a callback to an event, creating the event when absent.
    pub fn register<C: Callback<R::Record>>(&mut self, event: impl Into<String>, hook: C) -> &mut Self {
        self.callbacks.register(event, hook);
        self
    }

    /// Append a closure to an event.
    pub fn register_fn<F>(&mut self, event: impl Into<String>, hook: F) -> &mut Self
    where
        F: Fn(&mut CallbackArgs<'_, R::Record>) -> CallbackResult + Send + Sync + 'static,
    {
        self.callbacks.register_fn(event, hook);
        self
    }

    /// Check if an event has been registered.
    pub fn has_callback(&self, event: &str) -> bool {
        self.callbacks.has(event)
    }

    /// Fire an event and return the last hook's result.
    pub fn callback(
        &self,
        event: &str,
        args: &mut CallbackArgs<'_, R::Record>,
    ) -> Result<Option<InputMap>, CrudError> {
        self.callbacks.fire(self, event, args)
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Run an action by value.
    pub fn dispatch(&self, action: Action, request: &dyn Request) -> Result<Outcome, CrudError> {
        match action {
            Action::Index => self.index(request),
            Action::Create => self.create(request),
            Action::Store => self.store(request),
            Action::Show => self.show(request),
            Action::Edit => self.edit(request),
            Action::Update => self.update(request),
            Action::ConfirmDestroy => self.confirm_destroy(request),
            Action::Destroy => self.destroy(request),
        }
    }

    /// List the collection.
    pub fn index(&self, request: &dyn Request) -> Result<Outcome, CrudError> {
        let _span = self.span(Action::Index).entered();
        let cx = self.context(request, Action::Index);

        self.before_all(request)?;
        self.authorize(Ability::Index, Subject::Type(self.resource.record_type()))?;

        let records = self.resource.fetch_for_index(&cx)?;
        let mut base = Params::new();
        base.insert(
            self.resource.collection_name().to_string(),
            serde_json::to_value(&records)?,
        );
        self.render(&cx, base)
    }

    /// Show the creation form.
    pub fn create(&self, request: &dyn Request) -> Result<Outcome, CrudError> {
        let _span = self.span(Action::Create).entered();
        let cx = self.context(request, Action::Create);

        self.before_all(request)?;
        self.authorize(Ability::Create, Subject::Type(self.resource.record_type()))?;

        let record = self.resource.fetch_for_create(&cx)?;
        let mut base = Params::new();
        base.insert(self.resource.single_name(), serde_json::to_value(&record)?);
        self.render(&cx, base)
    }

    /// Persist a new record from request input.
    pub fn store(&self, request: &dyn Request) -> Result<Outcome, CrudError> {
        let _span = self.span(Action::Store).entered();
        let cx = self.context(request, Action::Store);

        self.before_all(request)?;
        self.authorize(Ability::Create, Subject::Type(self.resource.record_type()))?;

        let mut record = self.resource.fetch_for_store(&cx)?;
        let input = self.resolve_input(request, &record, Mode::Creating)?;

        if let Some(errors) = self.validate_and_fill(request, &mut record, &input, Mode::Creating) {
            return self.store_failure(&cx, errors);
        }

        self.fire_with_record(events::BEFORE_STORE, request, &mut record)?;
        self.fire_with_record(events::BEFORE_SAVE, request, &mut record)?;

        if !self.save(&mut record)? {
            let errors = record.errors();
            return self.store_failure(&cx, errors);
        }

        self.fire_with_record(events::AFTER_STORE, request, &mut record)?;
        self.fire_with_record(events::AFTER_SAVE, request, &mut record)?;

        let message = self.success_message("success_create");
        let flash = |redirect: Redirect| redirect.with(self.config.flash_key.as_str(), message.as_str());
        self.resource.success_outcome_for_store(&cx, Some(&flash))
    }

    /// Show one record.
    pub fn show(&self, request: &dyn Request) -> Result<Outcome, CrudError> {
        let _span = self.span(Action::Show).entered();
        let cx = self.context(request, Action::Show);

        self.before_all(request)?;
        let id = self.record_id(request)?;
        let record = self.resource.fetch_for_show(&cx, &id)?;
        self.authorize(Ability::Read, self.subject(record.as_ref()))?;

        let base = self.single_params(record.as_ref())?;
        self.render(&cx, base)
    }

    /// Show the edit form.
    pub fn edit(&self, request: &dyn Request) -> Result<Outcome, CrudError> {
        let _span = self.span(Action::Edit).entered();
        let cx = self.context(request, Action::Edit);

        self.before_all(request)?;
        let id = self.record_id(request)?;
        let record = self.resource.fetch_for_edit(&cx, &id)?;
        self.authorize(Ability::Update, self.subject(record.as_ref()))?;

        if let (Some(formerable), Some(record)) = (self.resource.as_formerable(), record.as_ref()) {
            formerable.form().populate(record);
        }

        let mut base = self.single_params(record.as_ref())?;
        base.insert("edit".to_string(), Value::Bool(true));
        self.render(&cx, base)
    }

    /// Persist changes to a record from request input.
    pub fn update(&self, request: &dyn Request) -> Result<Outcome, CrudError> {
        let _span = self.span(Action::Update).entered();
        let cx = self.context(request, Action::Update);

        self.before_all(request)?;
        let id = self.record_id(request)?;
        let mut record = self.require(self.resource.fetch_for_update(&cx, &id)?, &id)?;
        let input = self.resolve_input(request, &record, Mode::Updating)?;
        self.authorize(Ability::Update, Subject::Record(&record))?;

        if let Some(errors) = self.validate_and_fill(request, &mut record, &input, Mode::Updating) {
            return self.update_failure(&cx, errors);
        }

        self.fire_with_record(events::BEFORE_UPDATE, request, &mut record)?;
        self.fire_with_record(events::BEFORE_SAVE, request, &mut record)?;

        if !self.save(&mut record)? {
            let errors = record.errors();
            return self.update_failure(&cx, errors);
        }

        self.fire_with_record(events::AFTER_UPDATE, request, &mut record)?;
        self.fire_with_record(events::AFTER_SAVE, request, &mut record)?;

        if request.wants_json() {
            return Ok(respond::structured(true, None));
        }

        let message = self.success_message("success_update");
        let flash = |redirect: Redirect| redirect.with(self.config.flash_key.as_str(), message.as_str());
        self.resource.success_outcome_for_update(&cx, Some(&flash))
    }

    /// Ask for confirmation before deleting.
    pub fn confirm_destroy(&self, request: &dyn Request) -> Result<Outcome, CrudError> {
        let _span = self.span(Action::ConfirmDestroy).entered();
        let cx = self.context(request, Action::ConfirmDestroy);

        self.before_all(request)?;
        let id = self.record_id(request)?;
        let record = self.resource.fetch_for_confirm_destroy(&cx, &id)?;
        self.authorize(Ability::Destroy, self.subject(record.as_ref()))?;

        let base = self.single_params(record.as_ref())?;
        self.render(&cx, base)
    }

    /// Delete a record.
    pub fn destroy(&self, request: &dyn Request) -> Result<Outcome, CrudError> {
        let _span = self.span(Action::Destroy).entered();
        let cx = self.context(request, Action::Destroy);

        self.before_all(request)?;
        let id = self.record_id(request)?;
        let mut record = self.require(self.resource.fetch_for_destroy(&cx, &id)?, &id)?;
        self.authorize(Ability::Destroy, Subject::Record(&record))?;

        self.fire_with_record(events::BEFORE_DESTROY, request, &mut record)?;
        self.services
            .store()
            .delete(&record)
            .map_err(CrudError::Store)?;
        self.fire_with_record(events::AFTER_DESTROY, request, &mut record)?;

        let message = self.success_message("success_destroy");
        let flash = |redirect: Redirect| redirect.with(self.config.flash_key.as_str(), message.as_str());
        self.resource.success_outcome_for_destroy(&cx, Some(&flash))
    }

    // ========================================================================
    // Stages
    // ========================================================================

    fn context<'a>(&'a self, request: &'a dyn Request, action: Action) -> Context<'a, R::Record> {
        Context::new(request, &self.services, &self.config, action)
    }

    fn span(&self, action: Action) -> tracing::Span {
        tracing::debug_span!(
            "action",
            resource = %self.resource.collection_name(),
            action = %action
        )
    }

    fn before_all(&self, request: &dyn Request) -> Result<(), CrudError> {
        let mut args = CallbackArgs::new(request);
        self.callback(events::BEFORE_ALL, &mut args)?;
        Ok(())
    }

    fn fire_with_record(
        &self,
        event: &str,
        request: &dyn Request,
        record: &mut R::Record,
    ) -> Result<(), CrudError> {
        let mut args = CallbackArgs::with_record(request, record);
        self.callback(event, &mut args)?;
        Ok(())
    }

    fn record_id(&self, request: &dyn Request) -> Result<String, CrudError> {
        self.resource
            .record_id(request)
            .ok_or_else(|| CrudError::MissingRouteParameter(self.resource.route_base()))
    }

    fn require(&self, record: Option<R::Record>, id: &str) -> Result<R::Record, CrudError> {
        record.ok_or_else(|| NotFoundError::new(self.resource.record_type(), id).into())
    }

    fn subject<'r>(&self, record: Option<&'r R::Record>) -> Subject<'r, R::Record> {
        match record {
            Some(record) => Subject::Record(record),
            None => Subject::Type(self.resource.record_type()),
        }
    }

    fn authorize(&self, ability: Ability, subject: Subject<'_, R::Record>) -> Result<(), CrudError> {
        if let Some(authorizable) = self.resource.as_authorizable() {
            tracing::debug!(%ability, ?subject, "authorizing");
            authorizable.gate().authorize(ability, subject)?;
        }
        Ok(())
    }

    fn resolve_input(
        &self,
        request: &dyn Request,
        record: &R::Record,
        mode: Mode,
    ) -> Result<InputMap, CrudError> {
        let input = InputResolver::new(self.config.input)
            .checkboxes(self.resource.checkboxes(request, record))
            .nullable(self.resource.nullable(request, record))
            .resolve(request, record, mode);
        tracing::debug!(fields = input.len(), ?mode, "resolved input");

        if !self.callbacks.has(events::INPUT) {
            return Ok(input);
        }
        let replaced = {
            let mut args = CallbackArgs::with_input(request, &input);
            self.callback(events::INPUT, &mut args)?
        };
        Ok(replaced.unwrap_or(input))
    }

    /// Field errors from validation or filling, if any.
    fn validate_and_fill(
        &self,
        request: &dyn Request,
        record: &mut R::Record,
        input: &InputMap,
        mode: Mode,
    ) -> Option<FieldErrors> {
        if let Some(validatable) = self.resource.as_validatable() {
            let rules = validatable.validation_rules(request, record);
            if let Err(err) = validatable.validator().validate(input, rules.for_mode(mode)) {
                tracing::debug!(fields = err.errors.len(), "validation failed");
                return Some(err.errors);
            }
        }
        match record.fill(input) {
            Ok(()) => None,
            Err(err) => {
                tracing::debug!(fields = err.errors.len(), "fill rejected input");
                Some(err.errors)
            }
        }
    }

    fn save(&self, record: &mut R::Record) -> Result<bool, CrudError> {
        let saved = self.services.store().save(record).map_err(CrudError::Store)?;
        if !saved {
            tracing::warn!(
                resource = %self.resource.collection_name(),
                "save rejected by store"
            );
        }
        Ok(saved)
    }

    fn store_failure(
        &self,
        cx: &Context<'_, R::Record>,
        errors: FieldErrors,
    ) -> Result<Outcome, CrudError> {
        if cx.request().wants_json() {
            return Ok(respond::structured(false, Some(&errors)));
        }
        let submitted = cx.request().all();
        let attach = |redirect: Redirect| redirect.with_errors(errors.clone()).with_input(submitted.clone());
        self.resource.failure_outcome_for_store(cx, Some(&attach))
    }

    fn update_failure(
        &self,
        cx: &Context<'_, R::Record>,
        errors: FieldErrors,
    ) -> Result<Outcome, CrudError> {
        if cx.request().wants_json() {
            return Ok(respond::structured(false, Some(&errors)));
        }
        let submitted = cx.request().all();
        let attach = |redirect: Redirect| redirect.with_errors(errors.clone()).with_input(submitted.clone());
        self.resource.failure_outcome_for_update(cx, Some(&attach))
    }

    fn success_message(&self, key: &str) -> String {
        let key = format!("{}.{key}", self.resource.language_base());
        self.services.translator().translate(&key)
    }

    fn single_params(&self, record: Option<&R::Record>) -> Result<Params, CrudError> {
        let mut base = Params::new();
        base.insert(self.resource.single_name(), serde_json::to_value(record)?);
        Ok(base)
    }

    fn render(&self, cx: &Context<'_, R::Record>, base: Params) -> Result<Outcome, CrudError> {
        let data = params::assemble(&self.resource, cx, base)?;
        Ok(params::load_view(&self.resource, cx.action(), data))
    }
}

impl<R: Resource> PlaceholderTarget<R::Record> for Controller<R> {
    fn placeholder(&self, event: &str, args: &mut CallbackArgs<'_, R::Record>) -> CallbackResult {
        let request = args.request();
        if event == events::BEFORE_ALL {
            self.resource.before_all(request)?;
            return Ok(None);
        }

        let Some(record) = args.record_mut() else {
            return Ok(None);
        };
        match event {
            events::BEFORE_STORE => self.resource.before_store(request, record)?,
            events::BEFORE_UPDATE => self.resource.before_update(request, record)?,
            events::BEFORE_SAVE => self.resource.before_save(request, record)?,
            events::BEFORE_DESTROY => self.resource.before_destroy(request, record)?,
            events::AFTER_STORE => self.resource.after_store(request, record)?,
            events::AFTER_UPDATE => self.resource.after_update(request, record)?,
            events::AFTER_SAVE => self.resource.after_save(request, record)?,
            events::AFTER_DESTROY => self.resource.after_destroy(request, record)?,
            _ => {}
        }
        Ok(None)
    }
}

impl<R: Resource> std::fmt::Debug for Controller<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("resource", &self.resource.collection_name())
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}
