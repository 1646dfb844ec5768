//! View-parameter assembly.

use crate::{action::Action, resource::Resource, services::Context};
use crudline_core::{CrudError, Outcome, Params, Redirect, View};

/// What a parameter hook hands back: parameters for the view, or an outcome
/// that replaces the view entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    /// Render the action's view with these parameters.
    Params(Params),
    /// Skip the view and respond with this outcome.
    Respond(Outcome),
}

impl From<Params> for ViewData {
    fn from(params: Params) -> Self {
        Self::Params(params)
    }
}

impl From<Outcome> for ViewData {
    fn from(outcome: Outcome) -> Self {
        Self::Respond(outcome)
    }
}

impl From<Redirect> for ViewData {
    fn from(redirect: Redirect) -> Self {
        Self::Respond(Outcome::Redirect(redirect))
    }
}

/// `<view_base>.<action>`, e.g. `articles.confirmDestroy`.
pub fn view_name(view_base: &str, action: Action) -> String {
    format!("{view_base}.{action}")
}

/// Run `to_params`, then the hook for the running action.
///
/// An outcome returned by `to_params` skips the action hook.
pub(crate) fn assemble<R: Resource>(
    resource: &R,
    cx: &Context<'_, R::Record>,
    base: Params,
) -> Result<ViewData, CrudError> {
    let params = match resource.to_params(cx, base)? {
        ViewData::Params(params) => params,
        respond @ ViewData::Respond(_) => return Ok(respond),
    };

    match cx.action() {
        Action::Index => resource.to_params_index(cx, params),
        Action::Create => resource.to_params_create(cx, params),
        Action::Show => resource.to_params_show(cx, params),
        Action::Edit => resource.to_params_edit(cx, params),
        Action::ConfirmDestroy => resource.to_params_confirm_destroy(cx, params),
        Action::Store | Action::Update | Action::Destroy => Ok(ViewData::Params(params)),
    }
}

/// Turn assembled data into the action's outcome.
pub(crate) fn load_view<R: Resource>(resource: &R, action: Action, data: ViewData) -> Outcome {
    match data {
        ViewData::Params(params) => Outcome::View(View {
            name: view_name(&resource.view_base(), action),
            params,
        }),
        ViewData::Respond(outcome) => outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_name() {
        assert_eq!(view_name("articles", Action::ConfirmDestroy), "articles.confirmDestroy");
        assert_eq!(view_name("blog_posts", Action::Index), "blog_posts.index");
    }
}
