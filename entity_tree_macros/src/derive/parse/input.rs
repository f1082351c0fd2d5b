//! Input parsing for the `Entity` derive macro.
//!
//! Gathers the struct identifier, its fields and all attribute metadata in
//! one pass so expansion can fail fast with useful errors.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields};

use super::type_utils::{Shape, infer_shape, option_inner};
use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A struct field taking part in the entity.
pub(crate) struct EntityField {
    pub ident: syn::Ident,
    /// Name exposed to projections, without any `r#` prefix.
    pub name: String,
    pub attrs: FieldAttrs,
    pub shape: Shape,
    /// Whether a nested entity is wrapped in `Option`.
    pub optional: bool,
}

/// Everything the generator needs about the deriving struct.
pub(crate) struct EntityInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub attrs: StructAttrs,
    /// Fields in declaration order, skipped fields removed.
    pub fields: Vec<EntityField>,
}

impl EntityInput {
    /// The field marked `identifier`, if any.
    pub(crate) fn identifier(&self) -> Option<&EntityField> {
        self.fields.iter().find(|field| field.attrs.identifier)
    }
}

/// Collect the entity description from `input`.
///
/// Fails on anything but a struct with named fields and on more than one
/// `identifier` field.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<EntityInput> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Entity requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Entity can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    for field in named {
        let field_attrs = parse_field_attrs(field)?;
        if field_attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Entity requires named fields"));
        };
        let (shape, optional) = if field_attrs.nested {
            (Shape::Entity, option_inner(&field.ty).is_some())
        } else {
            (infer_shape(&field.ty), false)
        };
        fields.push(EntityField {
            name: ident.unraw().to_string(),
            ident,
            attrs: field_attrs,
            shape,
            optional,
        });
    }

    let mut identifiers = fields.iter().filter(|field| field.attrs.identifier);
    if let (Some(_), Some(second)) = (identifiers.next(), identifiers.next()) {
        return Err(syn::Error::new_spanned(
            &second.ident,
            "only one field may be marked `identifier`",
        ));
    }

    Ok(EntityInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        fields,
    })
}
