//! Default redirect and structured responses.

use crate::services::Context;
use crudline_core::{CrudError, FieldErrors, Outcome, Redirect};
use serde_json::{Value, json};

/// Optional adjustment applied to a redirect before it is returned, such as
/// attaching a flash message or errors.
pub type Transform<'t> = Option<&'t dyn Fn(Redirect) -> Redirect>;

fn apply(redirect: Redirect, transform: Transform<'_>) -> Redirect {
    match transform {
        Some(transform) => transform(redirect),
        None => redirect,
    }
}

/// Redirect to the request's redirect field when given, else `<route_base>.index`.
pub fn success<M>(
    cx: &Context<'_, M>,
    route_base: &str,
    transform: Transform<'_>,
) -> Result<Outcome, CrudError> {
    let requested = cx
        .request()
        .input(&cx.config().redirect_field)
        .and_then(Value::as_str)
        .filter(|target| !target.is_empty());

    let redirect = match requested {
        Some(target) => Redirect::to(target),
        None => Redirect::to(cx.services().urls().route(&format!("{route_base}.index"))?),
    };
    Ok(Outcome::Redirect(apply(redirect, transform)))
}

/// Redirect back to the originating page.
pub fn failure(transform: Transform<'_>) -> Outcome {
    Outcome::Redirect(apply(Redirect::back(), transform))
}

/// `{"success": bool}` plus `errors` when given.
pub fn structured(success: bool, errors: Option<&FieldErrors>) -> Outcome {
    let mut payload = json!({ "success": success });
    if let (Some(errors), Value::Object(map)) = (errors, &mut payload) {
        map.insert("errors".to_string(), errors.to_value());
    }
    Outcome::Json(payload)
}
