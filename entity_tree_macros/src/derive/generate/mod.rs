//! Code generation for the `Entity` implementation.
//!
//! Every generated path is rooted at `krate` so callers can alias the
//! runtime crate with `#[entity(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::{EntityField, EntityInput, Shape};

#[cfg(test)]
mod tests;

/// Emit `impl Entity for <struct>`.
pub(crate) fn entity_impl(input: &EntityInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let entity_name = ident.to_string();
    let specs = input.fields.iter().map(|field| field_spec(field, krate));
    let protected = input
        .fields
        .iter()
        .filter(|field| field.attrs.protected)
        .map(|field| field.name.as_str());
    let read = read_fn(input, krate);
    let write = write_fn(input, krate);
    let entity_mut = entity_mut_fn(input, krate);
    let identifier = identifier_fn(input, krate);

    quote! {
        impl #impl_generics #krate::Entity for #ident #ty_generics #where_clause {
            fn fields(&self) -> &'static [#krate::FieldSpec] {
                const FIELDS: &[#krate::FieldSpec] = &[#(#specs),*];
                FIELDS
            }

            fn protected_fields(&self) -> &'static [&'static str] {
                &[#(#protected),*]
            }

            fn entity_name(&self) -> &'static str {
                #entity_name
            }

            #identifier
            #read
            #write
            #entity_mut
        }
    }
}

fn shape_tokens(shape: Shape, krate: &TokenStream) -> TokenStream {
    let variant = match shape {
        Shape::Scalar => format_ident!("Scalar"),
        Shape::Sequence => format_ident!("Sequence"),
        Shape::Mapping => format_ident!("Mapping"),
        Shape::Entity => format_ident!("Entity"),
        Shape::Fixed => format_ident!("Fixed"),
    };
    quote! { #krate::FieldShape::#variant }
}

fn field_spec(field: &EntityField, krate: &TokenStream) -> TokenStream {
    let name = &field.name;
    let shape = shape_tokens(field.shape, krate);
    if field.attrs.read_only {
        quote! { #krate::FieldSpec::new(#name, #shape).read_only() }
    } else {
        quote! { #krate::FieldSpec::new(#name, #shape) }
    }
}

fn missing(krate: &TokenStream, constructor: &str) -> TokenStream {
    let constructor = format_ident!("{constructor}");
    quote! {
        ::core::result::Result::Err(::std::sync::Arc::new(
            #krate::ModelError::#constructor(#krate::Entity::entity_name(self), field),
        ))
    }
}

fn read_fn(input: &EntityInput, krate: &TokenStream) -> TokenStream {
    let arms = input.fields.iter().map(|field| {
        let name = &field.name;
        let ident = &field.ident;
        let body = match (field.shape, field.optional) {
            (Shape::Entity, false) => quote! {
                ::core::result::Result::Ok(#krate::FieldValue::Entity(&self.#ident))
            },
            (Shape::Entity, true) => quote! {
                ::core::result::Result::Ok(match &self.#ident {
                    ::core::option::Option::Some(inner) => #krate::FieldValue::Entity(inner),
                    ::core::option::Option::None => {
                        #krate::FieldValue::Data(#krate::serde_json::Value::Null)
                    }
                })
            },
            _ => quote! { #krate::entity::encode_field(self, field, &self.#ident) },
        };
        quote! { #name => #body, }
    });
    let fallback = missing(krate, "missing_reader");
    quote! {
        fn read(&self, field: &str) -> #krate::ModelResult<#krate::FieldValue<'_>> {
            match field {
                #(#arms)*
                _ => #fallback,
            }
        }
    }
}

fn write_fn(input: &EntityInput, krate: &TokenStream) -> TokenStream {
    let writable: Vec<&EntityField> = input
        .fields
        .iter()
        .filter(|field| !field.attrs.read_only)
        .collect();
    let fallback = missing(krate, "missing_writer");
    if writable.is_empty() {
        return quote! {
            fn write(
                &mut self,
                field: &str,
                _value: #krate::serde_json::Value,
            ) -> #krate::ModelResult<()> {
                #fallback
            }
        };
    }
    let arms = writable.iter().map(|field| {
        let name = &field.name;
        let ident = &field.ident;
        quote! {
            #name => {
                self.#ident = #krate::entity::decode_field(&*self, field, value)?;
            }
        }
    });
    quote! {
        fn write(
            &mut self,
            field: &str,
            value: #krate::serde_json::Value,
        ) -> #krate::ModelResult<()> {
            match field {
                #(#arms)*
                _ => return #fallback,
            }
            ::core::result::Result::Ok(())
        }
    }
}

fn entity_mut_fn(input: &EntityInput, krate: &TokenStream) -> TokenStream {
    let arms = input
        .fields
        .iter()
        .filter(|field| field.shape == Shape::Entity)
        .map(|field| {
            let name = &field.name;
            let ident = &field.ident;
            if field.optional {
                quote! {
                    #name => self
                        .#ident
                        .as_mut()
                        .map(|inner| inner as &mut dyn #krate::Entity),
                }
            } else {
                quote! {
                    #name => ::core::option::Option::Some(&mut self.#ident as &mut dyn #krate::Entity),
                }
            }
        });
    quote! {
        fn entity_mut(&mut self, field: &str) -> ::core::option::Option<&mut dyn #krate::Entity> {
            match field {
                #(#arms)*
                _ => ::core::option::Option::None,
            }
        }
    }
}

fn identifier_fn(input: &EntityInput, krate: &TokenStream) -> TokenStream {
    let Some(field) = input.identifier() else {
        return TokenStream::new();
    };
    let name = &field.name;
    let ident = &field.ident;
    quote! {
        fn identifier(
            &self,
        ) -> #krate::ModelResult<::core::option::Option<#krate::serde_json::Value>> {
            #krate::entity::encode_field(self, #name, &self.#ident)
                .map(#krate::FieldValue::into_data)
        }
    }
}
