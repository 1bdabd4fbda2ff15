//! Single-element references, `…Ref<'a>` and `…RefMut<'a>`

use proc_macro2::TokenStream;
use quote::quote;

use crate::input::{Input, SoAKind};
use crate::names;

pub fn derive(input: &Input) -> TokenStream {
    let name = &input.name;
    let visibility = &input.visibility;
    let vec_name = names::vec_name(name);
    let ref_name = names::ref_name(name);
    let ref_mut_name = names::ref_mut_name(name);

    let ref_attrs = input.attrs.forwarded.get(SoAKind::Ref);
    let ref_mut_attrs = input.attrs.forwarded.get(SoAKind::RefMut);
    let doc_url = format!("[`{0}`](struct.{0}.html)", name);
    let doc_url_vec = format!("[`{0}`](struct.{0}.html)", vec_name);
    let ref_doc = format!(
        "A reference to a {} with struct of array layout, borrowing every column of a {}",
        doc_url, doc_url_vec
    );
    let ref_mut_doc = format!(
        "A mutable reference to a {} with struct of array layout, borrowing every column of a {}",
        doc_url, doc_url_vec
    );

    let fields_names = input.stored_idents();
    let ref_fields_attrs = input.stored().map(|field| field.forwarded(SoAKind::Ref));
    let ref_mut_fields_attrs = input.stored().map(|field| field.forwarded(SoAKind::RefMut));
    let ref_fields_doc = fields_names
        .iter()
        .map(|ident| format!("A reference to the `{}` field of a {}", ident, doc_url));
    let ref_mut_fields_doc = fields_names
        .iter()
        .map(|ident| format!("A mutable reference to the `{}` field of a {}", ident, doc_url));

    let ref_fields_types = input.map_stored(
        |_, path| {
            let nested = names::nested(path, names::ref_name);
            quote! { #nested<'a> }
        },
        |_, ty| quote! { &'a #ty },
    );

    let ref_mut_fields_types = input.map_stored(
        |_, path| {
            let nested = names::nested(path, names::ref_mut_name);
            quote! { #nested<'a> }
        },
        |_, ty| quote! { &'a mut #ty },
    );

    let as_soa_ref = input.map_stored(
        |ident, _| quote! { self.#ident.as_soa_ref() },
        |ident, _| quote! { &self.#ident },
    );

    let as_soa_mut = input.map_stored(
        |ident, _| quote! { self.#ident.as_soa_mut() },
        |ident, _| quote! { &mut self.#ident },
    );

    let as_ref = input.map_stored(
        |ident, _| quote! { self.#ident.as_ref() },
        |ident, _| quote! { &*self.#ident },
    );

    let replace = input.map_stored(
        |ident, _| {
            let local = quote::format_ident!("__soa_{}", ident);
            quote! { let #local = self.#ident.replace(#local); }
        },
        |ident, _| {
            let local = quote::format_ident!("__soa_{}", ident);
            quote! { let #local = ::std::mem::replace(&mut *self.#ident, #local); }
        },
    );

    let value = quote::format_ident!("value");
    let destructure = input.destructure_record(&value);
    let rebuild = input.rebuild_record();

    let mut generated = quote! {
        #[doc = #ref_doc]
        #[allow(dead_code)]
        #[derive(Copy, Clone)]
        #(#[#ref_attrs])*
        #visibility struct #ref_name<'a> {
            #(
                #[doc = #ref_fields_doc]
                #ref_fields_attrs
                pub #fields_names: #ref_fields_types,
            )*
        }

        #[doc = #ref_mut_doc]
        #[allow(dead_code)]
        #(#[#ref_mut_attrs])*
        #visibility struct #ref_mut_name<'a> {
            #(
                #[doc = #ref_mut_fields_doc]
                #ref_mut_fields_attrs
                pub #fields_names: #ref_mut_fields_types,
            )*
        }

        #[allow(dead_code)]
        impl #name {
            /// Borrow every stored field of this element, with the same
            /// shape as a reference into a container
            pub fn as_soa_ref(&self) -> #ref_name<'_> {
                #ref_name {
                    #(#fields_names: #as_soa_ref,)*
                }
            }

            /// Mutably borrow every stored field of this element, with the
            /// same shape as a mutable reference into a container
            pub fn as_soa_mut(&mut self) -> #ref_mut_name<'_> {
                #ref_mut_name {
                    #(#fields_names: #as_soa_mut,)*
                }
            }
        }

        #[allow(dead_code)]
        #[allow(clippy::should_implement_trait)]
        impl<'a> #ref_mut_name<'a> {
            /// Shared reference to the same element, borrowing `self`
            pub fn as_ref(&self) -> #ref_name<'_> {
                #ref_name {
                    #(#fields_names: #as_ref,)*
                }
            }

            /// Overwrite every stored field of the element with the fields of
            /// `value`, returning the previous element
            pub fn replace(&mut self, value: #name) -> #name {
                #destructure
                #(#replace)*
                #rebuild
            }
        }
    };

    if input.attrs.derive_clone {
        let ref_to_record = input.map_stored(
            |ident, _| quote! { self.#ident.to_record() },
            |ident, _| quote! { ::std::clone::Clone::clone(self.#ident) },
        );
        let ref_mut_to_record = input.map_stored(
            |ident, _| quote! { self.#ident.to_record() },
            |ident, _| quote! { ::std::clone::Clone::clone(&*self.#ident) },
        );
        let skipped = input.skipped().map(|field| &field.ident).collect::<Vec<_>>();

        generated.extend(quote! {
            #[allow(dead_code)]
            impl<'a> #ref_name<'a> {
                /// Clone every referenced field into a new element
                pub fn to_record(&self) -> #name {
                    #name {
                        #(#fields_names: #ref_to_record,)*
                        #(#skipped: ::std::default::Default::default(),)*
                    }
                }
            }

            #[allow(dead_code)]
            impl<'a> #ref_mut_name<'a> {
                /// Clone every referenced field into a new element
                pub fn to_record(&self) -> #name {
                    #name {
                        #(#fields_names: #ref_mut_to_record,)*
                        #(#skipped: ::std::default::Default::default(),)*
                    }
                }
            }
        });
    }

    generated
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn generate(input: syn::DeriveInput) -> String {
        derive(&Input::new(input).unwrap()).to_string()
    }

    #[test]
    fn test_reference_types() {
        let code = generate(parse_quote! {
            pub struct Particle {
                pub mass: f64,
            }
        });

        assert!(code.contains("pub struct ParticleRef < 'a >"));
        assert!(code.contains("pub mass : & 'a f64"));
        assert!(code.contains("pub struct ParticleRefMut < 'a >"));
        assert!(code.contains("pub mass : & 'a mut f64"));
        assert!(code.contains("pub fn as_soa_ref (& self) -> ParticleRef < '_ >"));
        assert!(code.contains("pub fn as_soa_mut (& mut self) -> ParticleRefMut < '_ >"));
    }

    #[test]
    fn test_replace_swaps_every_field() {
        let code = generate(parse_quote! {
            struct Particle {
                mass: f64,
                #[soa(nested)]
                color: Color,
            }
        });

        assert!(code.contains(
            "let __soa_mass = :: std :: mem :: replace (& mut * self . mass , __soa_mass) ;"
        ));
        assert!(code.contains("let __soa_color = self . color . replace (__soa_color) ;"));
    }

    #[test]
    fn test_to_record_with_clone() {
        let code = generate(parse_quote! {
            #[soa_derive(Clone)]
            struct Particle {
                mass: f64,
                #[soa(skip)]
                cache: u32,
            }
        });

        assert!(code.contains("fn to_record"));
        assert!(code.contains("mass : :: std :: clone :: Clone :: clone (self . mass)"));
        assert!(code.contains("cache : :: std :: default :: Default :: default ()"));
    }
}
