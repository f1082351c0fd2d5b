//! Parsing utilities for the `Entity` derive macro.
//!
//! Attributes live under `#[entity(...)]`. Unknown keys are discarded so
//! callers keep compiling when new keys appear; misspelt keys are therefore
//! silently ignored.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Lit, LitStr, Token, parenthesized};

mod input;
mod type_utils;

pub(crate) use input::{EntityField, EntityInput, parse_input};
pub(crate) use type_utils::Shape;

/// Struct-level attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Entity)]`.
#[derive(Default, Clone, Copy)]
pub(crate) struct FieldAttrs {
    pub protected: bool,
    pub skip: bool,
    pub read_only: bool,
    pub nested: bool,
    pub identifier: bool,
}

/// Iterate all `#[entity(...)]` attributes once and apply a callback.
fn parse_entity_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("entity")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}

/// Read a flag written either bare (`protected`) or as `protected = bool`.
fn flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        Ok(meta.value()?.parse::<syn::LitBool>()?.value)
    } else {
        Ok(true)
    }
}

/// Extracts `#[entity(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_entity_attrs(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            return Ok(());
        }
        discard_unknown(meta)
    })?;
    Ok(out)
}

/// Parses field-level `#[entity(...)]` attributes.
///
/// Recognised keys are `protected`, `skip`, `read_only`, `nested` and
/// `identifier`.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_entity_attrs(&field.attrs, |meta| {
        let Some(ident) = meta.path.get_ident() else {
            return discard_unknown(meta);
        };
        let slot = match ident.to_string().as_str() {
            "protected" => &mut out.protected,
            "skip" => &mut out.skip,
            "read_only" => &mut out.read_only,
            "nested" => &mut out.nested,
            "identifier" => &mut out.identifier,
            _ => return discard_unknown(meta),
        };
        *slot = flag(meta)?;
        Ok(())
    })?;
    if out.nested && out.identifier {
        return Err(syn::Error::new_spanned(
            field,
            "a nested entity cannot be the identifier",
        ));
    }
    Ok(out)
}
