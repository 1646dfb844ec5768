//! # The resource contract
//!
//! A [`Resource`] declares which records a controller manages and overrides
//! whichever pipeline stages it needs. Only [`Resource::collection_name`] is
//! required; everything else has a working default.
//!
//! ```rust,ignore
//! struct ArticlesController {
//!     gate: ArticlePolicy,
//! }
//!
//! impl Resource for ArticlesController {
//!     type Record = Article;
//!
//!     fn collection_name(&self) -> &str {
//!         "articles"
//!     }
//!
//!     crudline::capabilities!(Authorizable);
//! }
//!
//! impl Authorizable<Article> for ArticlesController {
//!     fn gate(&self) -> &dyn Gate<Article> {
//!         &self.gate
//!     }
//! }
//! ```
//!
//! # Stages
//!
//! | Stage | Methods |
//! |---|---|
//! | Descriptor | `single_name`, `language_base`, `route_base`, `record_type`, `view_base`, `config` |
//! | Capabilities | `as_authorizable`, `as_formerable`, `as_validatable` |
//! | Input | `record_id`, `checkboxes`, `nullable` |
//! | Fetch | `fetch_for_*`, `fetch_instance`, `fetch_new_instance` |
//! | Params | `to_params`, `to_params_*` |
//! | Respond | `success_outcome*`, `failure_outcome*` |
//! | Callbacks | `before_*`, `after_*` |

use crate::{
    config::ResourceConfig,
    fetch, naming,
    params::ViewData,
    respond::{self, Transform},
    services::Context,
};
use crudline_core::{
    Authorizable, BoxError, CrudError, Formerable, Outcome, Params, Record, Request, Validatable,
};
use crudline_std::Nullable;

/// A controller's declaration of the records it manages.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a crudline `Resource`",
    label = "missing `Resource` implementation",
    note = "Implement `Resource` with at least `type Record` and `collection_name`."
)]
pub trait Resource: Sized + 'static {
    /// The record type managed by this controller.
    type Record: Record;

    // ------------------------------------------------------------------
    // Descriptor
    // ------------------------------------------------------------------

    /// Plural name of the collection, e.g. `articles`.
    fn collection_name(&self) -> &str;

    /// View variable holding a single record.
    fn single_name(&self) -> String {
        naming::singularize(self.collection_name())
    }

    /// Namespace of the translation keys.
    fn language_base(&self) -> String {
        self.collection_name().to_string()
    }

    /// Base of the named routes and the route parameter carrying the key.
    fn route_base(&self) -> String {
        self.collection_name().to_string()
    }

    /// Short name of the record type, used in errors and type-level checks.
    fn record_type(&self) -> &'static str {
        naming::short_type_name::<Self::Record>()
    }

    /// Directory prefix of the view identifiers.
    fn view_base(&self) -> String {
        naming::view_base(naming::short_type_name::<Self>())
    }

    /// Controller configuration, read once at construction.
    fn config(&self) -> ResourceConfig {
        ResourceConfig::default()
    }

    // ------------------------------------------------------------------
    // Capabilities
    // ------------------------------------------------------------------

    /// Return `Some(self)` to have abilities checked.
    ///
    /// Implementing [`Authorizable`] is not enough on its own; without this
    /// override no ability is ever checked. See [`capabilities!`](crate::capabilities).
    fn as_authorizable(&self) -> Option<&dyn Authorizable<Self::Record>> {
        None
    }

    /// Return `Some(self)` to have a form populated on `edit`.
    fn as_formerable(&self) -> Option<&dyn Formerable<Self::Record>> {
        None
    }

    /// Return `Some(self)` to have input validated.
    fn as_validatable(&self) -> Option<&dyn Validatable<Self::Record>> {
        None
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// The record key, read from the route parameter named by the route base.
    fn record_id(&self, request: &dyn Request) -> Option<String> {
        request.route_param(&self.route_base()).map(str::to_string)
    }

    /// Fields submitted as checkboxes.
    fn checkboxes(&self, _request: &dyn Request, _record: &Self::Record) -> Vec<String> {
        Vec::new()
    }

    /// Fields whose empty values become null.
    fn nullable(&self, _request: &dyn Request, _record: &Self::Record) -> Nullable {
        Nullable::All
    }

    // ------------------------------------------------------------------
    // Fetch
    // ------------------------------------------------------------------

    /// Records listed by `index`.
    fn fetch_for_index(&self, cx: &Context<'_, Self::Record>) -> Result<Vec<Self::Record>, CrudError> {
        fetch::all(cx)
    }

    /// Blank record shown by `create`.
    fn fetch_for_create(&self, cx: &Context<'_, Self::Record>) -> Result<Self::Record, CrudError> {
        Ok(self.fetch_new_instance(cx))
    }

    /// Blank record filled by `store`.
    fn fetch_for_store(&self, cx: &Context<'_, Self::Record>) -> Result<Self::Record, CrudError> {
        Ok(self.fetch_new_instance(cx))
    }

    /// Record shown by `show`.
    fn fetch_for_show(
        &self,
        cx: &Context<'_, Self::Record>,
        id: &str,
    ) -> Result<Option<Self::Record>, CrudError> {
        self.fetch_instance(cx, id)
    }

    /// Record edited by `edit`.
    fn fetch_for_edit(
        &self,
        cx: &Context<'_, Self::Record>,
        id: &str,
    ) -> Result<Option<Self::Record>, CrudError> {
        self.fetch_instance(cx, id)
    }

    /// Record changed by `update`.
    fn fetch_for_update(
        &self,
        cx: &Context<'_, Self::Record>,
        id: &str,
    ) -> Result<Option<Self::Record>, CrudError> {
        self.fetch_instance(cx, id)
    }

    /// Record shown by `confirmDestroy`.
    fn fetch_for_confirm_destroy(
        &self,
        cx: &Context<'_, Self::Record>,
        id: &str,
    ) -> Result<Option<Self::Record>, CrudError> {
        self.fetch_instance(cx, id)
    }

    /// Record deleted by `destroy`.
    fn fetch_for_destroy(
        &self,
        cx: &Context<'_, Self::Record>,
        id: &str,
    ) -> Result<Option<Self::Record>, CrudError> {
        self.fetch_instance(cx, id)
    }

    /// Look a record up by key.
    fn fetch_instance(
        &self,
        cx: &Context<'_, Self::Record>,
        id: &str,
    ) -> Result<Option<Self::Record>, CrudError> {
        fetch::instance(cx, self.record_type(), id)
    }

    /// A zero-valued record. Never touches the store.
    fn fetch_new_instance(&self, _cx: &Context<'_, Self::Record>) -> Self::Record {
        Default::default()
    }

    // ------------------------------------------------------------------
    // Params
    // ------------------------------------------------------------------

    /// Runs before every action-specific parameter hook.
    fn to_params(&self, _cx: &Context<'_, Self::Record>, params: Params) -> Result<ViewData, CrudError> {
        Ok(params.into())
    }

    /// Parameters of `index`.
    fn to_params_index(&self, _cx: &Context<'_, Self::Record>, params: Params) -> Result<ViewData, CrudError> {
        Ok(params.into())
    }

    /// Parameters of `create`.
    fn to_params_create(&self, _cx: &Context<'_, Self::Record>, params: Params) -> Result<ViewData, CrudError> {
        Ok(params.into())
    }

    /// Parameters of `show`.
    fn to_params_show(&self, _cx: &Context<'_, Self::Record>, params: Params) -> Result<ViewData, CrudError> {
        Ok(params.into())
    }

    /// Parameters of `edit`.
    fn to_params_edit(&self, _cx: &Context<'_, Self::Record>, params: Params) -> Result<ViewData, CrudError> {
        Ok(params.into())
    }

    /// Parameters of `confirmDestroy`.
    fn to_params_confirm_destroy(
        &self,
        _cx: &Context<'_, Self::Record>,
        params: Params,
    ) -> Result<ViewData, CrudError> {
        Ok(params.into())
    }

    // ------------------------------------------------------------------
    // Respond
    // ------------------------------------------------------------------

    /// Redirect after a successful mutation.
    fn success_outcome(
        &self,
        cx: &Context<'_, Self::Record>,
        transform: Transform<'_>,
    ) -> Result<Outcome, CrudError> {
        respond::success(cx, &self.route_base(), transform)
    }

    /// Redirect after a failed mutation.
    fn failure_outcome(
        &self,
        _cx: &Context<'_, Self::Record>,
        transform: Transform<'_>,
    ) -> Result<Outcome, CrudError> {
        Ok(respond::failure(transform))
    }

    /// Success outcome of `store`.
    fn success_outcome_for_store(
        &self,
        cx: &Context<'_, Self::Record>,
        transform: Transform<'_>,
    ) -> Result<Outcome, CrudError> {
        self.success_outcome(cx, transform)
    }

    /// Success outcome of `update` for HTML clients.
    fn success_outcome_for_update(
        &self,
        cx: &Context<'_, Self::Record>,
        transform: Transform<'_>,
    ) -> Result<Outcome, CrudError> {
        self.success_outcome(cx, transform)
    }

    /// Success outcome of `destroy`.
    fn success_outcome_for_destroy(
        &self,
        cx: &Context<'_, Self::Record>,
        transform: Transform<'_>,
    ) -> Result<Outcome, CrudError> {
        self.success_outcome(cx, transform)
    }

    /// Failure outcome of `store` for HTML clients.
    fn failure_outcome_for_store(
        &self,
        cx: &Context<'_, Self::Record>,
        transform: Transform<'_>,
    ) -> Result<Outcome, CrudError> {
        self.failure_outcome(cx, transform)
    }

    /// Failure outcome of `update` for HTML clients.
    fn failure_outcome_for_update(
        &self,
        cx: &Context<'_, Self::Record>,
        transform: Transform<'_>,
    ) -> Result<Outcome, CrudError> {
        self.failure_outcome(cx, transform)
    }

    // ------------------------------------------------------------------
    // Callbacks
    //
    // Reached through the placeholder registered for the event of the same
    // name. Errors abort the action.
    // ------------------------------------------------------------------

    /// Start of every action.
    fn before_all(&self, _request: &dyn Request) -> Result<(), BoxError> {
        Ok(())
    }

    /// Before a new record is saved.
    fn before_store(&self, _request: &dyn Request, _record: &mut Self::Record) -> Result<(), BoxError> {
        Ok(())
    }

    /// Before an existing record is saved.
    fn before_update(&self, _request: &dyn Request, _record: &mut Self::Record) -> Result<(), BoxError> {
        Ok(())
    }

    /// Before any save.
    fn before_save(&self, _request: &dyn Request, _record: &mut Self::Record) -> Result<(), BoxError> {
        Ok(())
    }

    /// Before a record is deleted.
    fn before_destroy(&self, _request: &dyn Request, _record: &mut Self::Record) -> Result<(), BoxError> {
        Ok(())
    }

    /// After a new record was saved.
    fn after_store(&self, _request: &dyn Request, _record: &mut Self::Record) -> Result<(), BoxError> {
        Ok(())
    }

    /// After an existing record was saved.
    fn after_update(&self, _request: &dyn Request, _record: &mut Self::Record) -> Result<(), BoxError> {
        Ok(())
    }

    /// After any save.
    fn after_save(&self, _request: &dyn Request, _record: &mut Self::Record) -> Result<(), BoxError> {
        Ok(())
    }

    /// After a record was deleted.
    fn after_destroy(&self, _request: &dyn Request, _record: &mut Self::Record) -> Result<(), BoxError> {
        Ok(())
    }
}
