//! Testing utilities for crudline.
//!
//! In-memory stand-ins for every collaborator a controller talks to, plus a
//! shared [`Journal`] they write to so tests can assert on call order.
//!
//! # Features
//!
//! - [`Journal`]: An ordered, shareable log of calls
//! - [`TestRequest`]: A request builder implementing [`Request`]
//! - [`MemoryStore`]: A [`Store`] over an in-memory map
//! - [`RecordingCallback`]: A callback that logs its label when fired
//! - [`AllowAll`] / [`DenyAll`]: Gates
//! - [`StubValidator`]: A validator with a fixed verdict
//! - [`RecordingForm`]: A form populator that logs what it was given

use crudline_core::{
    Ability, AuthorizationError, BoxError, Callback, CallbackArgs, CallbackResult, FieldErrors,
    FormPopulator, Gate, InputMap, Method, Request, Rules, Store, Subject, ValidationError,
    Validator,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

// ============================================================================
// Journal
// ============================================================================

/// An ordered log shared between test collaborators.
///
/// # Example
///
/// ```rust,ignore
/// let journal = Journal::new();
/// let store = MemoryStore::<Article>::new().with_journal(journal.clone());
///
/// // run an action...
///
/// assert_eq!(journal.entries(), vec!["gate:update", "save"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// A copy of every entry so far.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Check if an entry was recorded.
    pub fn contains(&self, entry: &str) -> bool {
        self.lock().iter().any(|e| e == entry)
    }

    /// Position of the first matching entry.
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.lock().iter().position(|e| e == entry)
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Test Request
// ============================================================================

/// A request assembled in code.
///
/// # Example
///
/// ```rust,ignore
/// let request = TestRequest::put()
///     .route("articles", "7")
///     .field("title", "Hello")
///     .json();
/// ```
#[derive(Debug, Clone)]
pub struct TestRequest {
    method: Method,
    route: IndexMap<String, String>,
    fields: InputMap,
    json: bool,
}

impl TestRequest {
    /// A request with the given method and nothing else.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            route: IndexMap::new(),
            fields: InputMap::new(),
            json: false,
        }
    }

    /// A `GET` request.
    pub fn get() -> Self {
        Self::new(Method::Get)
    }

    /// A `POST` request.
    pub fn post() -> Self {
        Self::new(Method::Post)
    }

    /// A `PUT` request.
    pub fn put() -> Self {
        Self::new(Method::Put)
    }

    /// A `DELETE` request.
    pub fn delete() -> Self {
        Self::new(Method::Delete)
    }

    /// Set a route parameter.
    pub fn route(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.route.insert(name.into(), value.into());
        self
    }

    /// Set a submitted field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Ask for a structured response.
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

impl Request for TestRequest {
    fn method(&self) -> Method {
        self.method
    }

    fn route_param(&self, name: &str) -> Option<&str> {
        self.route.get(name).map(String::as_str)
    }

    fn input(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    fn all(&self) -> InputMap {
        self.fields.clone()
    }

    fn wants_json(&self) -> bool {
        self.json
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// Records a [`MemoryStore`] can hold.
pub trait Keyed: Clone + Send {
    /// The primary key, once assigned.
    fn key(&self) -> Option<String>;

    /// Assign a primary key on first save.
    fn assign_key(&mut self, key: &str);

    /// Model-level check run on save; `false` rejects the save.
    ///
    /// Records report the reasons through `Record::errors`.
    fn check(&mut self) -> bool {
        true
    }
}

/// An in-memory [`Store`].
///
/// Keys are assigned from a counter starting at 1. Every call is journaled
/// as `find:<id>`, `all`, `save` or `delete`.
pub struct MemoryStore<M> {
    records: Mutex<IndexMap<String, M>>,
    next_key: AtomicU64,
    fail_saves: AtomicBool,
    journal: Journal,
}

impl<M: Keyed> Default for MemoryStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Keyed> MemoryStore<M> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(IndexMap::new()),
            next_key: AtomicU64::new(1),
            fail_saves: AtomicBool::new(false),
            journal: Journal::new(),
        }
    }

    /// Log calls to the given journal.
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    /// Insert a record directly, assigning a key when it has none.
    pub fn seed(&self, mut record: M) -> String {
        let key = match record.key() {
            Some(key) => key,
            None => {
                let key = self.allocate_key();
                record.assign_key(&key);
                key
            }
        };
        self.lock().insert(key.clone(), record);
        key
    }

    fn allocate_key(&self) -> String {
        self.next_key.fetch_add(1, Ordering::SeqCst).to_string()
    }

    /// Make every following save report failure.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// A copy of a stored record.
    pub fn get(&self, key: &str) -> Option<M> {
        self.lock().get(key).cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, M>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<M: Keyed> Store<M> for MemoryStore<M> {
    fn find(&self, id: &str) -> Result<Option<M>, BoxError> {
        self.journal.push(format!("find:{id}"));
        Ok(self.get(id))
    }

    fn all(&self) -> Result<Vec<M>, BoxError> {
        self.journal.push("all");
        Ok(self.lock().values().cloned().collect())
    }

    fn save(&self, record: &mut M) -> Result<bool, BoxError> {
        self.journal.push("save");
        if self.fail_saves.load(Ordering::SeqCst) || !record.check() {
            return Ok(false);
        }
        if record.key().is_none() {
            record.assign_key(&self.allocate_key());
        }
        self.seed(record.clone());
        Ok(true)
    }

    fn delete(&self, record: &M) -> Result<(), BoxError> {
        self.journal.push("delete");
        if let Some(key) = record.key() {
            self.lock().shift_remove(&key);
        }
        Ok(())
    }
}

// ============================================================================
// Recording Callback
// ============================================================================

/// A callback that writes its label to a journal when fired.
///
/// # Example
///
/// ```rust,ignore
/// let journal = Journal::new();
/// controller.register(events::BEFORE_SAVE, RecordingCallback::new("beforeSave", journal.clone()));
/// ```
#[derive(Debug, Clone)]
pub struct RecordingCallback {
    label: String,
    journal: Journal,
    result: Option<InputMap>,
}

impl RecordingCallback {
    /// Create a callback that records `label` and returns nothing.
    pub fn new(label: impl Into<String>, journal: Journal) -> Self {
        Self {
            label: label.into(),
            journal,
            result: None,
        }
    }

    /// Return the given map from every call.
    pub fn returning(mut self, input: InputMap) -> Self {
        self.result = Some(input);
        self
    }
}

impl<M: 'static> Callback<M> for RecordingCallback {
    fn call(&self, _args: &mut CallbackArgs<'_, M>) -> CallbackResult {
        self.journal.push(self.label.clone());
        Ok(self.result.clone())
    }
}

// ============================================================================
// Gates
// ============================================================================

fn subject_label<M>(subject: &Subject<'_, M>) -> &'static str {
    match subject {
        Subject::Type(_) => "type",
        Subject::Record(_) => "record",
    }
}

/// A gate that allows everything, journaling `gate:<ability>:<subject>`.
#[derive(Debug, Clone, Default)]
pub struct AllowAll {
    journal: Journal,
}

impl AllowAll {
    /// Create a gate journaling to `journal`.
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl<M> Gate<M> for AllowAll {
    fn authorize(&self, ability: Ability, subject: Subject<'_, M>) -> Result<(), AuthorizationError> {
        self.journal
            .push(format!("gate:{ability}:{}", subject_label(&subject)));
        Ok(())
    }
}

/// A gate that refuses abilities, journaling like [`AllowAll`].
#[derive(Debug, Clone, Default)]
pub struct DenyAll {
    journal: Journal,
    only: Option<Vec<Ability>>,
}

impl DenyAll {
    /// Create a gate refusing every ability.
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            only: None,
        }
    }

    /// Refuse only the listed abilities and allow the rest.
    pub fn only(mut self, abilities: &[Ability]) -> Self {
        self.only = Some(abilities.to_vec());
        self
    }
}

impl<M> Gate<M> for DenyAll {
    fn authorize(&self, ability: Ability, subject: Subject<'_, M>) -> Result<(), AuthorizationError> {
        self.journal
            .push(format!("gate:{ability}:{}", subject_label(&subject)));
        let denied = self
            .only
            .as_ref()
            .is_none_or(|abilities| abilities.contains(&ability));
        if denied {
            Err(AuthorizationError::new(ability).with_reason("denied by test gate"))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Stub Validator
// ============================================================================

/// A validator with a fixed verdict.
///
/// Journals `validate:<rule fields>` so tests can tell which rule set ran.
#[derive(Debug, Clone, Default)]
pub struct StubValidator {
    errors: FieldErrors,
    journal: Journal,
}

impl StubValidator {
    /// A validator accepting any input.
    pub fn passing(journal: Journal) -> Self {
        Self {
            errors: FieldErrors::new(),
            journal,
        }
    }

    /// A validator rejecting any input with `errors`.
    pub fn failing(journal: Journal, errors: FieldErrors) -> Self {
        Self { errors, journal }
    }
}

impl Validator for StubValidator {
    fn validate(&self, _input: &InputMap, rules: &Rules) -> Result<(), ValidationError> {
        let fields: Vec<&str> = rules.keys().map(String::as_str).collect();
        self.journal.push(format!("validate:{}", fields.join(",")));
        self.errors.clone().into_result()
    }
}

// ============================================================================
// Recording Form
// ============================================================================

/// A form populator journaling `form:populate` and `form:translate:<base>`.
#[derive(Debug, Clone, Default)]
pub struct RecordingForm {
    journal: Journal,
}

impl RecordingForm {
    /// Create a form journaling to `journal`.
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl<M> FormPopulator<M> for RecordingForm {
    fn populate(&self, _record: &M) {
        self.journal.push("form:populate");
    }

    fn translate_from(&self, language_base: &str) {
        self.journal.push(format!("form:translate:{language_base}"));
    }
}
