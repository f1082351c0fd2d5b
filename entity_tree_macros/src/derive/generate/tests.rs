//! Tests that validate the generated `Entity` implementation tokens.

use anyhow::{Result, anyhow, ensure};
use proc_macro2::TokenStream;
use quote::quote;
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::entity_impl;
use crate::derive::parse::parse_input;

fn render(input: &DeriveInput, krate: &TokenStream) -> Result<String> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err))?;
    let tokens = entity_impl(&parsed, krate);
    Ok(tokens.to_string().replace(" :: ", "::").replace(' ', ""))
}

fn account() -> DeriveInput {
    parse_quote! {
        struct Account {
            #[entity(protected, identifier)]
            id: u64,
            tags: Vec<String>,
            labels: BTreeMap<String, String>,
            #[entity(read_only)]
            created: String,
            #[entity(nested)]
            address: Address,
            #[entity(nested)]
            billing: Option<Address>,
            slots: [String; 2],
        }
    }
}

#[rstest]
#[case::spec_id("FieldSpec::new(\"id\",::entity_tree::FieldShape::Scalar)")]
#[case::spec_tags("FieldSpec::new(\"tags\",::entity_tree::FieldShape::Sequence)")]
#[case::spec_labels("FieldSpec::new(\"labels\",::entity_tree::FieldShape::Mapping)")]
#[case::spec_read_only("FieldSpec::new(\"created\",::entity_tree::FieldShape::Scalar).read_only()")]
#[case::spec_fixed("FieldSpec::new(\"slots\",::entity_tree::FieldShape::Fixed)")]
#[case::spec_nested("FieldSpec::new(\"address\",::entity_tree::FieldShape::Entity)")]
#[case::protected("&[\"id\"]")]
#[case::name("\"Account\"")]
#[case::read_data("\"tags\"=>::entity_tree::entity::encode_field(self,field,&self.tags)")]
#[case::read_nested("\"address\"=>::core::result::Result::Ok(::entity_tree::FieldValue::Entity(&self.address))")]
#[case::read_optional("::core::option::Option::Some(inner)=>::entity_tree::FieldValue::Entity(inner)")]
#[case::write("self.tags=::entity_tree::entity::decode_field(&*self,field,value)?;")]
#[case::entity_mut("Some(&mutself.addressas&mutdyn::entity_tree::Entity)")]
#[case::entity_mut_optional("self.billing.as_mut().map(|inner|inneras&mutdyn::entity_tree::Entity)")]
#[case::identifier("encode_field(self,\"id\",&self.id).map(::entity_tree::FieldValue::into_data)")]
fn account_impl_contains(#[case] fragment: &str) -> Result<()> {
    let rendered = render(&account(), &quote! { ::entity_tree })?;
    ensure!(
        rendered.contains(fragment),
        "missing {fragment}\nin:\n{rendered}"
    );
    Ok(())
}

#[test]
fn read_only_fields_have_no_writer_arm() -> Result<()> {
    let rendered = render(&account(), &quote! { ::entity_tree })?;
    ensure!(
        !rendered.contains("self.created=::entity_tree::entity::decode_field"),
        "read-only field received a writer"
    );
    Ok(())
}

#[test]
fn skipped_fields_are_absent() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Cache {
            key: String,
            #[entity(skip)]
            scratch: Vec<u8>,
        }
    };
    let rendered = render(&input, &quote! { ::entity_tree })?;
    ensure!(!rendered.contains("scratch"), "skipped field leaked");
    ensure!(
        !rendered.contains("fnidentifier"),
        "identifier generated without marker"
    );
    Ok(())
}

#[test]
fn all_read_only_fields_bind_unused_value() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Frozen {
            #[entity(read_only)]
            key: String,
        }
    };
    let rendered = render(&input, &quote! { ::entity_tree })?;
    ensure!(
        rendered.contains("_value:::entity_tree::serde_json::Value"),
        "expected underscored value binding:\n{rendered}"
    );
    Ok(())
}

#[test]
fn generics_and_crate_alias_are_honoured() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Wrapper<T: Clone> where T: Send {
            inner: T,
        }
    };
    let rendered = render(&input, &quote! { crate })?;
    ensure!(
        rendered.contains("impl<T:Clone>crate::EntityforWrapper<T>whereT:Send"),
        "unexpected impl header:\n{rendered}"
    );
    ensure!(!rendered.contains("::entity_tree"), "default path leaked");
    Ok(())
}
