//! Iterators over references, `…Iter<'a>` and `…IterMut<'a>`

use proc_macro2::TokenStream;
use quote::quote;

use crate::input::Input;
use crate::names;

pub fn derive(input: &Input) -> TokenStream {
    let name = &input.name;
    let visibility = &input.visibility;
    let vec_name = names::vec_name(name);
    let slice_name = names::slice_name(name);
    let slice_mut_name = names::slice_mut_name(name);
    let ref_name = names::ref_name(name);
    let ref_mut_name = names::ref_mut_name(name);
    let iter_name = names::iter_name(name);
    let iter_mut_name = names::iter_mut_name(name);

    let iter_doc = format!(
        "Iterator over [`{0}`](struct.{0}.html), created by `{1}::iter()`",
        ref_name, vec_name
    );
    let iter_mut_doc = format!(
        "Iterator over [`{0}`](struct.{0}.html), created by `{1}::iter_mut()`",
        ref_mut_name, vec_name
    );

    quote! {
        #[doc = #iter_doc]
        #[allow(dead_code)]
        #[derive(Clone)]
        #visibility struct #iter_name<'a> {
            remaining: #slice_name<'a>,
        }

        impl<'a> ::std::iter::Iterator for #iter_name<'a> {
            type Item = #ref_name<'a>;

            #[inline]
            fn next(&mut self) -> ::std::option::Option<#ref_name<'a>> {
                let (head, tail) = self.remaining.split_first()?;
                self.remaining = tail;
                ::std::option::Option::Some(head)
            }

            #[inline]
            fn size_hint(&self) -> (usize, ::std::option::Option<usize>) {
                let len = self.remaining.len();
                (len, ::std::option::Option::Some(len))
            }
        }

        impl<'a> ::std::iter::DoubleEndedIterator for #iter_name<'a> {
            #[inline]
            fn next_back(&mut self) -> ::std::option::Option<#ref_name<'a>> {
                let (last, rest) = self.remaining.split_last()?;
                self.remaining = rest;
                ::std::option::Option::Some(last)
            }
        }

        impl<'a> ::std::iter::ExactSizeIterator for #iter_name<'a> {}
        impl<'a> ::std::iter::FusedIterator for #iter_name<'a> {}

        impl<'a> ::std::iter::IntoIterator for #slice_name<'a> {
            type Item = #ref_name<'a>;
            type IntoIter = #iter_name<'a>;

            fn into_iter(self) -> #iter_name<'a> {
                #iter_name { remaining: self }
            }
        }

        impl<'a> ::std::iter::IntoIterator for &'a #vec_name {
            type Item = #ref_name<'a>;
            type IntoIter = #iter_name<'a>;

            fn into_iter(self) -> #iter_name<'a> {
                self.iter()
            }
        }

        #[doc = #iter_mut_doc]
        #[allow(dead_code)]
        #visibility struct #iter_mut_name<'a> {
            remaining: #slice_mut_name<'a>,
        }

        impl<'a> ::std::iter::Iterator for #iter_mut_name<'a> {
            type Item = #ref_mut_name<'a>;

            #[inline]
            fn next(&mut self) -> ::std::option::Option<#ref_mut_name<'a>> {
                let remaining = ::std::mem::take(&mut self.remaining);
                let (head, tail) = remaining.into_split_first()?;
                self.remaining = tail;
                ::std::option::Option::Some(head)
            }

            #[inline]
            fn size_hint(&self) -> (usize, ::std::option::Option<usize>) {
                let len = self.remaining.len();
                (len, ::std::option::Option::Some(len))
            }
        }

        impl<'a> ::std::iter::DoubleEndedIterator for #iter_mut_name<'a> {
            #[inline]
            fn next_back(&mut self) -> ::std::option::Option<#ref_mut_name<'a>> {
                let remaining = ::std::mem::take(&mut self.remaining);
                let (last, rest) = remaining.into_split_last()?;
                self.remaining = rest;
                ::std::option::Option::Some(last)
            }
        }

        impl<'a> ::std::iter::ExactSizeIterator for #iter_mut_name<'a> {}
        impl<'a> ::std::iter::FusedIterator for #iter_mut_name<'a> {}

        impl<'a> ::std::iter::IntoIterator for #slice_mut_name<'a> {
            type Item = #ref_mut_name<'a>;
            type IntoIter = #iter_mut_name<'a>;

            fn into_iter(self) -> #iter_mut_name<'a> {
                #iter_mut_name { remaining: self }
            }
        }

        impl<'a> ::std::iter::IntoIterator for &'a mut #vec_name {
            type Item = #ref_mut_name<'a>;
            type IntoIter = #iter_mut_name<'a>;

            fn into_iter(self) -> #iter_mut_name<'a> {
                self.iter_mut()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_iterators() {
        let input = Input::new(parse_quote! {
            pub(crate) struct Particle { mass: f64 }
        })
        .unwrap();
        let code = derive(&input).to_string();

        assert!(code.contains("pub (crate) struct ParticleIter < 'a >"));
        assert!(code.contains("pub (crate) struct ParticleIterMut < 'a >"));
        assert!(code.contains("impl < 'a > :: std :: iter :: IntoIterator for & 'a mut ParticleVec"));
        assert!(code.contains("impl < 'a > :: std :: iter :: DoubleEndedIterator for ParticleIterMut < 'a >"));
    }
}
