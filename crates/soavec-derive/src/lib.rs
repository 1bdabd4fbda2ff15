//! # soavec-derive
//!
//! `#[derive(StructOfArray)]`, generating the columnar container, views,
//! references, iterators and selector implementations of the `soavec` crate.
//! This crate is re-exported by `soavec` and is not meant to be used on its
//! own: the generated code refers to `::soavec`.
//!
//! ## Pipeline
//!
//! ```text
//! DeriveInput ─> Input::new ─┬─> vec    (…Vec, StructOfArray)
//!  (syn)        (validation) ├─> slice  (…Slice, …SliceMut)
//!                            ├─> refs   (…Ref, …RefMut)
//!                            ├─> index  (SoAIndex, SoAIndexMut)
//!                            ├─> iter   (…Iter, …IterMut)
//!                            ├─> raw    (SoARaw)
//!                            └─> generic (SoASlice, SoASliceMut, SoAVec)
//! ```
//!
//! Invalid input never panics; it is reported as a `compile_error!` spanned
//! on the offending tokens.

#![warn(clippy::all)]

extern crate proc_macro;

mod generic;
mod index;
mod input;
mod iter;
mod names;
mod raw;
mod refs;
mod slice;
mod vec;

use proc_macro2::TokenStream;
use syn::{parse_macro_input, DeriveInput};

use crate::input::Input;

/// Generate the struct of arrays types for a struct with named fields.
///
/// Attributes:
///
/// - `#[soa_derive(Trait, ...)]` on the struct derives the traits on the
///   generated types (`Clone`, `Serialize` and `Deserialize` on `…Vec` only)
/// - `#[soa_attr(Vec|Slice|SliceMut|Ref|RefMut, attribute)]` on the struct or
///   a field forwards `#[attribute]` to one generated type or field
/// - `#[soa(skip)]` on a field stores no column for it
/// - `#[soa(nested)]` (or `#[nested_soa]`) on a field stores the field's own
///   generated container
#[proc_macro_derive(StructOfArray, attributes(soa_derive, soa_attr, soa, nested_soa))]
pub fn soa_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match Input::new(input) {
        Ok(input) => generate(&input).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate(input: &Input) -> TokenStream {
    let mut generated = TokenStream::new();
    generated.extend(vec::derive(input));
    generated.extend(slice::derive(input));
    generated.extend(refs::derive(input));
    generated.extend(index::derive(input));
    generated.extend(iter::derive(input));
    generated.extend(raw::derive(input));
    generated.extend(generic::derive(input));
    generated
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_generated_code_parses() {
        let input = Input::new(parse_quote! {
            #[soa_derive(Debug, Clone, PartialEq)]
            pub struct Particle {
                pub name: String,
                pub mass: f64,
                #[soa(nested)]
                pub color: Color,
                #[soa(skip)]
                pub cache: Option<u64>,
            }
        })
        .unwrap();

        let file: syn::File = syn::parse2(generate(&input)).unwrap();
        let structs = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Struct(item) => Some(item.ident.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>();

        pretty_assertions::assert_eq!(
            structs,
            vec![
                "ParticleVec",
                "ParticleSlice",
                "ParticleSliceMut",
                "ParticleRef",
                "ParticleRefMut",
                "ParticleIter",
                "ParticleIterMut",
            ]
        );
    }

    #[test]
    fn test_deserialize_adds_hidden_columns() {
        let input = Input::new(parse_quote! {
            #[soa_derive(Serialize, Deserialize)]
            pub struct Reading {
                pub value: f32,
            }
        })
        .unwrap();

        let file: syn::File = syn::parse2(generate(&input)).unwrap();
        let structs = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Struct(item) => Some(item.ident.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(structs.len(), 8);
        assert!(structs.contains(&"__ReadingVecColumns".to_string()));
    }

    #[test]
    fn test_one_field_with_reserved_looking_names() {
        let input = Input::new(parse_quote! {
            struct Tricky {
                index: usize,
                element: u8,
                len: u32,
                range: u16,
            }
        })
        .unwrap();

        assert!(syn::parse2::<syn::File>(generate(&input)).is_ok());
    }
}
