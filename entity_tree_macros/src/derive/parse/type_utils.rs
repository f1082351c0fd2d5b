//! Type introspection helpers.
//!
//! These utilities perform shallow inspection of `syn::Type` values to
//! recognise `Option<T>` and the collection containers whose shape decides
//! how a field is merged.

use syn::{GenericArgument, PathArguments, Type};

/// Merge shape of a field, mirroring `entity_tree::FieldShape`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    Scalar,
    Sequence,
    Mapping,
    Entity,
    Fixed,
}

const SEQUENCES: &[&str] = &["Vec", "VecDeque", "HashSet", "BTreeSet"];
const MAPPINGS: &[&str] = &["BTreeMap", "HashMap"];

/// Final path segment of `ty` when it is a path type.
fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(p) = ty else {
        return None;
    };
    p.path.segments.last()
}

/// Type arguments of the outermost path segment.
fn type_arguments(segment: &syn::PathSegment) -> impl Iterator<Item = &Type> {
    let args = match &segment.arguments {
        PathArguments::AngleBracketed(angle) => Some(angle.args.iter()),
        _ => None,
    };
    args.into_iter().flatten().filter_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

/// Returns the generic parameter if `ty` is one of `wrappers`.
///
/// Only the final path segment is compared, so `std::option::Option<T>` and
/// `Option<T>` both match. The check is not recursive.
fn type_inner<'a>(ty: &'a Type, wrappers: &[&str]) -> Option<&'a Type> {
    let last = last_segment(ty)?;
    if !wrappers.iter().any(|wrapper| last.ident == wrapper) {
        return None;
    }
    type_arguments(last).next()
}

/// Returns the inner type if `ty` is `Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    type_inner(ty, &["Option"])
}

/// Returns the element type if `ty` is a sequence container.
pub(crate) fn sequence_inner(ty: &Type) -> Option<&Type> {
    type_inner(ty, SEQUENCES)
}

/// Whether `ty` serialises as a sequence whose length is part of the type.
pub(crate) fn is_fixed_length(ty: &Type) -> bool {
    match ty {
        Type::Array(_) => true,
        Type::Tuple(tuple) => !tuple.elems.is_empty(),
        _ => false,
    }
}

/// Returns the key and value types if `ty` is a map container.
pub(crate) fn map_inner(ty: &Type) -> Option<(&Type, &Type)> {
    let last = last_segment(ty)?;
    if !MAPPINGS.iter().any(|wrapper| last.ident == wrapper) {
        return None;
    }
    let mut args = type_arguments(last);
    Some((args.next()?, args.next()?))
}

/// Infer the merge shape of a field that is not marked `nested`.
///
/// One layer of `Option` is looked through, so `Option<Vec<T>>` is a
/// sequence. Arrays and tuples cannot grow, so they are never unioned.
pub(crate) fn infer_shape(ty: &Type) -> Shape {
    let inner = option_inner(ty).unwrap_or(ty);
    if is_fixed_length(inner) {
        Shape::Fixed
    } else if sequence_inner(inner).is_some() {
        Shape::Sequence
    } else if map_inner(inner).is_some() {
        Shape::Mapping
    } else {
        Shape::Scalar
    }
}
