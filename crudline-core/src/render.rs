//! Rendering collaborator.

use crate::{
    error::BoxError,
    outcome::{Redirect, View},
};
use serde_json::Value;

/// The template/view renderer.
pub trait Renderer {
    /// What a rendered page looks like to the web layer.
    type Output;

    /// Render a view with its parameters.
    fn render(&self, view: &View) -> Result<Self::Output, BoxError>;
}

/// An outcome after the renderer has seen it.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T> {
    /// A rendered page.
    Page(T),
    /// A redirect, untouched by the renderer.
    Redirect(Redirect),
    /// A structured payload, untouched by the renderer.
    Json(Value),
}
