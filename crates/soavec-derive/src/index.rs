//! `SoAIndex` / `SoAIndexMut` implementations for positions and ranges

use proc_macro2::TokenStream;
use quote::quote;

use crate::input::Input;
use crate::names;

/// The range selectors, all resolved with `resolve_range`
fn range_types() -> Vec<TokenStream> {
    vec![
        quote! { ::std::ops::Range<usize> },
        quote! { ::std::ops::RangeTo<usize> },
        quote! { ::std::ops::RangeFrom<usize> },
        quote! { ::std::ops::RangeFull },
        quote! { ::std::ops::RangeInclusive<usize> },
        quote! { ::std::ops::RangeToInclusive<usize> },
    ]
}

pub fn derive(input: &Input) -> TokenStream {
    let name = &input.name;
    let vec_name = names::vec_name(name);
    let slice_name = names::slice_name(name);
    let slice_mut_name = names::slice_mut_name(name);
    let ref_name = names::ref_name(name);
    let ref_mut_name = names::ref_mut_name(name);

    let fields_names = input.stored_idents();

    let get_position = input.map_stored(
        |ident, _| quote! { ::soavec::SoAIndex::try_get(self, slice.#ident)? },
        |ident, _| quote! { &slice.#ident[self] },
    );
    let get_position_mut = input.map_stored(
        |ident, _| quote! { ::soavec::SoAIndexMut::try_get_mut(self, slice.#ident)? },
        |ident, _| quote! { &mut slice.#ident[self] },
    );
    let get_range = input.map_stored(
        |ident, _| quote! { ::soavec::SoAIndex::try_get(range.clone(), slice.#ident)? },
        |ident, _| quote! { &slice.#ident[range.clone()] },
    );
    let get_range_mut = input.map_stored(
        |ident, _| quote! { ::soavec::SoAIndexMut::try_get_mut(range.clone(), slice.#ident)? },
        |ident, _| quote! { &mut slice.#ident[range.clone()] },
    );

    let mut generated = quote! {
        impl<'a> ::soavec::SoAIndex<#slice_name<'a>> for usize {
            type RefOutput = #ref_name<'a>;

            #[inline]
            fn try_get(self, slice: #slice_name<'a>) -> ::soavec::Result<Self::RefOutput> {
                ::soavec::check_position(self, slice.len())?;
                ::std::result::Result::Ok(#ref_name {
                    #(#fields_names: #get_position,)*
                })
            }
        }

        impl<'a> ::soavec::SoAIndexMut<#slice_mut_name<'a>> for usize {
            type MutOutput = #ref_mut_name<'a>;

            #[inline]
            fn try_get_mut(self, slice: #slice_mut_name<'a>) -> ::soavec::Result<Self::MutOutput> {
                ::soavec::check_position(self, slice.len())?;
                ::std::result::Result::Ok(#ref_mut_name {
                    #(#fields_names: #get_position_mut,)*
                })
            }
        }
    };

    for range in range_types() {
        generated.extend(quote! {
            impl<'a> ::soavec::SoAIndex<#slice_name<'a>> for #range {
                type RefOutput = #slice_name<'a>;

                #[inline]
                fn try_get(self, slice: #slice_name<'a>) -> ::soavec::Result<Self::RefOutput> {
                    let range = ::soavec::resolve_range(self, slice.len())?;
                    ::std::result::Result::Ok(#slice_name {
                        #(#fields_names: #get_range,)*
                    })
                }
            }

            impl<'a> ::soavec::SoAIndexMut<#slice_mut_name<'a>> for #range {
                type MutOutput = #slice_mut_name<'a>;

                #[inline]
                fn try_get_mut(self, slice: #slice_mut_name<'a>) -> ::soavec::Result<Self::MutOutput> {
                    let range = ::soavec::resolve_range(self, slice.len())?;
                    ::std::result::Result::Ok(#slice_mut_name {
                        #(#fields_names: #get_range_mut,)*
                    })
                }
            }
        });
    }

    // The container delegates every selector to its whole-range views
    let mut selectors = vec![quote! { usize }];
    selectors.extend(range_types());
    for selector in selectors {
        generated.extend(quote! {
            impl<'a> ::soavec::SoAIndex<&'a #vec_name> for #selector {
                type RefOutput = <#selector as ::soavec::SoAIndex<#slice_name<'a>>>::RefOutput;

                #[inline]
                fn try_get(self, soa: &'a #vec_name) -> ::soavec::Result<Self::RefOutput> {
                    ::soavec::SoAIndex::try_get(self, soa.as_slice())
                }
            }

            impl<'a> ::soavec::SoAIndexMut<&'a mut #vec_name> for #selector {
                type MutOutput = <#selector as ::soavec::SoAIndexMut<#slice_mut_name<'a>>>::MutOutput;

                #[inline]
                fn try_get_mut(self, soa: &'a mut #vec_name) -> ::soavec::Result<Self::MutOutput> {
                    ::soavec::SoAIndexMut::try_get_mut(self, soa.as_mut_slice())
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
    fn test_every_selector_on_every_target() {
        let code = generate(parse_quote! {
            struct Particle { mass: f64 }
        });

        // usize and 6 range types, each on the two views and the container
        assert_eq!(code.matches("impl < 'a > :: soavec :: SoAIndex <").count(), 14);
        assert_eq!(code.matches("impl < 'a > :: soavec :: SoAIndexMut <").count(), 14);
        assert!(code.contains("for :: std :: ops :: RangeToInclusive < usize >"));
        assert!(code.contains("for :: std :: ops :: RangeFull"));
    }

    #[test]
    fn test_positions_are_checked_before_columns() {
        let code = generate(parse_quote! {
            struct Particle {
                mass: f64,
                #[soa(nested)]
                color: Color,
            }
        });

        assert!(code.contains(":: soavec :: check_position (self , slice . len ()) ?"));
        assert!(code.contains("mass : & slice . mass [self]"));
        assert!(code.contains("color : :: soavec :: SoAIndex :: try_get (self , slice . color) ?"));
        assert!(code.contains("mass : & mut slice . mass [range . clone ()]"));
    }
}
