//! Procedural macros for crudline.
//!
//! Re-exported by `crudline` under the `macros` feature.

use proc_macro::TokenStream;

mod fillable;

/// Derive `crudline::Fillable` from `#[fillable]` field markers.
///
/// ```rust,ignore
/// #[derive(Default, Serialize, Fillable)]
/// struct Article {
///     id: Option<u64>,
///     #[fillable]
///     title: String,
///     #[fillable(rename = "body")]
///     content: String,
/// }
///
/// assert_eq!(Article::default().fillable(), ["title", "body"]);
/// ```
#[proc_macro_derive(Fillable, attributes(fillable))]
pub fn derive_fillable(input: TokenStream) -> TokenStream {
    fillable::derive_fillable_impl(input)
}
