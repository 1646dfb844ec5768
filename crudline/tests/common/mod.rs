#![allow(dead_code)]

use crudline::{
    Authorizable, Catalog, Controller, FieldErrors, FormPopulator, Formerable, Gate, NamedRoutes,
    Record, Request, Resource, ResourceConfig, RuleSet, Services, Validatable, Validator,
    testing::{Journal, Keyed, MemoryStore, RecordingForm, StubValidator},
};
use crudline::{BoxError, Nullable};
use serde::Serialize;
use std::sync::Arc;

// ============================================================================
// Test Record
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, crudline_macros::Fillable)]
pub struct Article {
    pub id: Option<u64>,
    #[fillable]
    pub title: String,
    #[fillable]
    pub slug: String,
    #[fillable]
    pub published: bool,
    #[fillable]
    pub summary: Option<String>,
    #[serde(skip)]
    pub errors: FieldErrors,
}

impl Article {
    pub fn new(title: &str, slug: &str) -> Self {
        Self {
            title: title.to_string(),
            slug: slug.to_string(),
            ..Self::default()
        }
    }
}

impl Record for Article {
    // slugs are fixed once created
    fn fillable_for_update(&self, _request: &dyn Request) -> Option<Vec<String>> {
        Some(vec!["title".into(), "published".into(), "summary".into()])
    }

    fn errors(&self) -> FieldErrors {
        self.errors.clone()
    }
}

impl Keyed for Article {
    fn key(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    fn assign_key(&mut self, key: &str) {
        self.id = key.parse().ok();
    }

    fn check(&mut self) -> bool {
        if self.title == "reject" {
            self.errors = [("title", "is reserved")].into_iter().collect();
            false
        } else {
            self.errors = FieldErrors::new();
            true
        }
    }
}

// ============================================================================
// Test Resource
// ============================================================================

/// A resource whose placeholder callbacks write `placeholder:<event>` to the
/// journal and whose capabilities are switched on by the builder.
pub struct ArticlesController {
    pub journal: Journal,
    gate: Option<Box<dyn Gate<Article>>>,
    validation: Option<(RuleSet, StubValidator)>,
    form: Option<RecordingForm>,
    config: ResourceConfig,
    checkboxes: Vec<String>,
    nullable: Nullable,
}

impl ArticlesController {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            gate: None,
            validation: None,
            form: None,
            config: ResourceConfig::default(),
            checkboxes: Vec::new(),
            nullable: Nullable::All,
        }
    }

    pub fn with_gate(mut self, gate: impl Gate<Article> + 'static) -> Self {
        self.gate = Some(Box::new(gate));
        self
    }

    pub fn with_validation(mut self, rules: RuleSet, validator: StubValidator) -> Self {
        self.validation = Some((rules, validator));
        self
    }

    pub fn with_form(mut self) -> Self {
        self.form = Some(RecordingForm::new(self.journal.clone()));
        self
    }

    pub fn with_config(mut self, config: ResourceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_checkboxes(mut self, fields: &[&str]) -> Self {
        self.checkboxes = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_nullable(mut self, nullable: Nullable) -> Self {
        self.nullable = nullable;
        self
    }

    fn note(&self, event: &str) -> Result<(), BoxError> {
        self.journal.push(format!("placeholder:{event}"));
        Ok(())
    }
}

impl Resource for ArticlesController {
    type Record = Article;

    fn collection_name(&self) -> &str {
        "articles"
    }

    fn config(&self) -> ResourceConfig {
        self.config.clone()
    }

    fn as_authorizable(&self) -> Option<&dyn Authorizable<Article>> {
        self.gate.as_ref().map(|_| self as &dyn Authorizable<Article>)
    }

    fn as_formerable(&self) -> Option<&dyn Formerable<Article>> {
        self.form.as_ref().map(|_| self as &dyn Formerable<Article>)
    }

    fn as_validatable(&self) -> Option<&dyn Validatable<Article>> {
        self.validation
            .as_ref()
            .map(|_| self as &dyn Validatable<Article>)
    }

    fn checkboxes(&self, _request: &dyn Request, _record: &Article) -> Vec<String> {
        self.checkboxes.clone()
    }

    fn nullable(&self, _request: &dyn Request, _record: &Article) -> Nullable {
        self.nullable.clone()
    }

    fn before_all(&self, _request: &dyn Request) -> Result<(), BoxError> {
        self.note("beforeAll")
    }

    fn before_store(&self, _request: &dyn Request, _record: &mut Article) -> Result<(), BoxError> {
        self.note("beforeStore")
    }

    fn before_update(&self, _request: &dyn Request, _record: &mut Article) -> Result<(), BoxError> {
        self.note("beforeUpdate")
    }

    fn before_save(&self, _request: &dyn Request, _record: &mut Article) -> Result<(), BoxError> {
        self.note("beforeSave")
    }

    fn before_destroy(&self, _request: &dyn Request, _record: &mut Article) -> Result<(), BoxError> {
        self.note("beforeDestroy")
    }

    fn after_store(&self, _request: &dyn Request, _record: &mut Article) -> Result<(), BoxError> {
        self.note("afterStore")
    }

    fn after_update(&self, _request: &dyn Request, _record: &mut Article) -> Result<(), BoxError> {
        self.note("afterUpdate")
    }

    fn after_save(&self, _request: &dyn Request, _record: &mut Article) -> Result<(), BoxError> {
        self.note("afterSave")
    }

    fn after_destroy(&self, _request: &dyn Request, _record: &mut Article) -> Result<(), BoxError> {
        self.note("afterDestroy")
    }
}

impl Authorizable<Article> for ArticlesController {
    fn gate(&self) -> &dyn Gate<Article> {
        self.gate.as_deref().expect("authorizable without a gate")
    }
}

impl Formerable<Article> for ArticlesController {
    fn form(&self) -> &dyn FormPopulator<Article> {
        self.form.as_ref().expect("formerable without a form")
    }
}

impl Validatable<Article> for ArticlesController {
    fn validation_rules(&self, _request: &dyn Request, _record: &Article) -> RuleSet {
        self.validation
            .as_ref()
            .map(|(rules, _)| rules.clone())
            .unwrap_or_default()
    }

    fn validator(&self) -> &dyn Validator {
        &self.validation.as_ref().expect("validatable without a validator").1
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// A store journaling to `journal`, holding article 1 ("Hello").
pub fn seeded_store(journal: &Journal) -> Arc<MemoryStore<Article>> {
    let store = MemoryStore::new().with_journal(journal.clone());
    store.seed(Article::new("Hello", "hello"));
    Arc::new(store)
}

pub fn services(store: &Arc<MemoryStore<Article>>) -> Services<Article> {
    let catalog = Catalog::new()
        .with("articles.success_create", "Article created.")
        .with("articles.success_update", "Article updated.")
        .with("articles.success_destroy", "Article deleted.");

    Services::new(
        store.clone(),
        Arc::new(NamedRoutes::new().resource("articles", "/articles")),
        Arc::new(catalog),
    )
}

pub fn controller(
    resource: ArticlesController,
    store: &Arc<MemoryStore<Article>>,
) -> Controller<ArticlesController> {
    Controller::new(resource, services(store))
}
