//! Procedural macros for `entity_tree`.
//!
//! The [`Entity`](macro@Entity) derive turns a struct with named fields into
//! an `entity_tree::Entity`: it declares one field spec per field, with the
//! shape inferred from the field type, and generates readers and writers that
//! go through `serde_json`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `entity_tree::Entity`.
///
/// Struct attribute:
///
/// - `#[entity(crate = "path")]` points generated code at an aliased
///   dependency instead of `::entity_tree`.
///
/// Field attributes:
///
/// - `#[entity(protected)]` lists the field in `protected_fields`.
/// - `#[entity(read_only)]` declares the field without a writer.
/// - `#[entity(skip)]` leaves the field out of the entity entirely.
/// - `#[entity(nested)]` marks a field holding another entity, either `T` or
///   `Option<T>`.
/// - `#[entity(identifier)]` makes the field's value the entity identifier.
///
/// Readable data fields must implement `Serialize`, writable ones
/// `DeserializeOwned`.
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
