//! Narrow collaborator interfaces for URL generation, translation and form
//! population.

use crate::error::RoutingError;

/// Named-route URL generation.
pub trait UrlGenerator: Send + Sync {
    /// URL for a named route such as `articles.index`.
    fn route(&self, name: &str) -> Result<String, RoutingError>;
}

/// String lookup for user-facing messages.
pub trait Translator: Send + Sync {
    /// Translate a key such as `articles.success_create`.
    ///
    /// Implementations return the key itself when no translation exists.
    fn translate(&self, key: &str) -> String;
}

/// Form-builder population used by formerable controllers.
pub trait FormPopulator<M>: Send + Sync {
    /// Fill form fields from a record before an edit page renders.
    fn populate(&self, record: &M);

    /// Namespace the form builder translates labels from.
    fn translate_from(&self, _language_base: &str) {}
}
