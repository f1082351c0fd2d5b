//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[entity(crate = "...")]` attribute value into the
//! path prefix used by every item the generated code names.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::entity_tree`. Inside `entity_tree` itself the attribute can
/// be set to `crate`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::entity_tree }, |path| quote! { #path })
}
