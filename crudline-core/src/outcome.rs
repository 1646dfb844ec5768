//! Action outcomes.
//!
//! Every action ends in an [`Outcome`]: either a render directive for the
//! view layer, a redirect, or a structured payload for clients that asked
//! for JSON.

use crate::{
    error::CrudError,
    fields::{FieldErrors, InputMap, Params},
    render::{Renderer, Response},
};
use indexmap::IndexMap;
use serde_json::Value;

/// The terminal result of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Render a view with parameters.
    View(View),
    /// Redirect the client.
    Redirect(Redirect),
    /// A structured payload (`{"success": .., "errors": ..}`).
    Json(Value),
}

impl Outcome {
    /// The render directive, if this is one.
    pub fn as_view(&self) -> Option<&View> {
        match self {
            Self::View(view) => Some(view),
            _ => None,
        }
    }

    /// The redirect, if this is one.
    pub fn as_redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }

    /// The structured payload, if this is one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Hand view directives to a renderer; other outcomes pass through.
    pub fn render_with<R: Renderer + ?Sized>(
        self,
        renderer: &R,
    ) -> Result<Response<R::Output>, CrudError> {
        match self {
            Self::View(view) => renderer
                .render(&view)
                .map(Response::Page)
                .map_err(CrudError::Render),
            Self::Redirect(redirect) => Ok(Response::Redirect(redirect)),
            Self::Json(value) => Ok(Response::Json(value)),
        }
    }
}

/// A view identifier plus the variables it renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Dotted view identifier, e.g. `articles.index`.
    pub name: String,
    /// Variables for the template.
    pub params: Params,
}

/// Where a redirect points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// An absolute URL or path.
    To(String),
    /// The page the request came from.
    Back,
}

/// A redirect with optional flash data.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    /// Target of the redirect.
    pub location: Location,
    /// Flash messages keyed by flash key (e.g. `alerts.success`).
    pub flash: IndexMap<String, String>,
    /// Field errors to show on the next page.
    pub errors: FieldErrors,
    /// Previously submitted input to re-populate a form.
    pub old_input: Option<InputMap>,
}

impl Redirect {
    /// Redirect to a URL or path.
    pub fn to(url: impl Into<String>) -> Self {
        Self::new(Location::To(url.into()))
    }

    /// Redirect back to the originating page.
    pub fn back() -> Self {
        Self::new(Location::Back)
    }

    fn new(location: Location) -> Self {
        Self {
            location,
            flash: IndexMap::new(),
            errors: FieldErrors::new(),
            old_input: None,
        }
    }

    /// Flash a message under a key.
    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.flash.insert(key.into(), message.into());
        self
    }

    /// Attach field errors.
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    /// Re-attach submitted input.
    pub fn with_input(mut self, input: InputMap) -> Self {
        self.old_input = Some(input);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redirect_builder() {
        let mut input = InputMap::new();
        input.insert("title".into(), json!("Draft"));
        let errors: FieldErrors = [("title", "taken")].into_iter().collect();

        let redirect = Redirect::back()
            .with("alerts.error", "Nope")
            .with_errors(errors.clone())
            .with_input(input.clone());

        assert_eq!(redirect.location, Location::Back);
        assert_eq!(redirect.flash.get("alerts.error").map(String::as_str), Some("Nope"));
        assert_eq!(redirect.errors, errors);
        assert_eq!(redirect.old_input, Some(input));
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = Outcome::Json(json!({"success": true}));
        assert!(outcome.as_view().is_none());
        assert!(outcome.as_redirect().is_none());
        assert_eq!(outcome.as_json(), Some(&json!({"success": true})));
    }
}
