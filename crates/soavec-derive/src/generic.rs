//! `SoASlice`, `SoASliceMut` and `SoAVec` implementations, forwarding to the
//! inherent methods of the generated types

use proc_macro2::TokenStream;
use quote::quote;

use crate::input::Input;
use crate::names;

pub fn derive(input: &Input) -> TokenStream {
    let mut generated = derive_slice(input);
    generated.extend(derive_slice_mut(input));
    generated.extend(derive_vec(input));
    generated
}

fn derive_slice(input: &Input) -> TokenStream {
    let name = &input.name;
    let slice_name = names::slice_name(name);
    let ref_name = names::ref_name(name);
    let iter_name = names::iter_name(name);

    quote! {
        impl<'a> ::soavec::SoASlice<#name> for #slice_name<'a> {
            type Ref<'t> = #ref_name<'t> where Self: 't;
            type Slice<'t> = #slice_name<'t> where Self: 't;
            type Iter<'t> = #iter_name<'t> where Self: 't;

            fn len(&self) -> usize {
                #slice_name::len(self)
            }

            fn as_slice(&self) -> #slice_name<'_> {
                self.reborrow()
            }

            #[track_caller]
            fn slice<R: ::std::ops::RangeBounds<usize>>(&self, range: R) -> #slice_name<'_> {
                match ::soavec::resolve_range(range, #slice_name::len(self)) {
                    ::std::result::Result::Ok(range) => ::soavec::SoAIndex::index(range, self.reborrow()),
                    ::std::result::Result::Err(err) => panic!("{}", err),
                }
            }

            fn get(&self, index: usize) -> ::std::option::Option<#ref_name<'_>> {
                ::soavec::SoAIndex::get(index, self.reborrow())
            }

            #[track_caller]
            fn index(&self, index: usize) -> #ref_name<'_> {
                ::soavec::SoAIndex::index(index, self.reborrow())
            }

            fn iter(&self) -> #iter_name<'_> {
                ::std::iter::IntoIterator::into_iter(self.reborrow())
            }
        }
    }
}

fn derive_slice_mut(input: &Input) -> TokenStream {
    let name = &input.name;
    let slice_name = names::slice_name(name);
    let slice_mut_name = names::slice_mut_name(name);
    let ref_name = names::ref_name(name);
    let ref_mut_name = names::ref_mut_name(name);
    let iter_name = names::iter_name(name);
    let iter_mut_name = names::iter_mut_name(name);

    quote! {
        impl<'a> ::soavec::SoASlice<#name> for #slice_mut_name<'a> {
            type Ref<'t> = #ref_name<'t> where Self: 't;
            type Slice<'t> = #slice_name<'t> where Self: 't;
            type Iter<'t> = #iter_name<'t> where Self: 't;

            fn len(&self) -> usize {
                #slice_mut_name::len(self)
            }

            fn as_slice(&self) -> #slice_name<'_> {
                #slice_mut_name::as_slice(self)
            }

            #[track_caller]
            fn slice<R: ::std::ops::RangeBounds<usize>>(&self, range: R) -> #slice_name<'_> {
                let view = #slice_mut_name::as_slice(self);
                match ::soavec::resolve_range(range, view.len()) {
                    ::std::result::Result::Ok(range) => ::soavec::SoAIndex::index(range, view),
                    ::std::result::Result::Err(err) => panic!("{}", err),
                }
            }

            fn get(&self, index: usize) -> ::std::option::Option<#ref_name<'_>> {
                ::soavec::SoAIndex::get(index, #slice_mut_name::as_slice(self))
            }

            #[track_caller]
            fn index(&self, index: usize) -> #ref_name<'_> {
                ::soavec::SoAIndex::index(index, #slice_mut_name::as_slice(self))
            }

            fn iter(&self) -> #iter_name<'_> {
                #slice_mut_name::iter(self)
            }
        }

        impl<'a> ::soavec::SoASliceMut<#name> for #slice_mut_name<'a> {
            type RefMut<'t> = #ref_mut_name<'t> where Self: 't;
            type SliceMut<'t> = #slice_mut_name<'t> where Self: 't;
            type IterMut<'t> = #iter_mut_name<'t> where Self: 't;

            fn as_mut_slice(&mut self) -> #slice_mut_name<'_> {
                self.reborrow()
            }

            #[track_caller]
            fn slice_mut<R: ::std::ops::RangeBounds<usize>>(&mut self, range: R) -> #slice_mut_name<'_> {
                match ::soavec::resolve_range(range, #slice_mut_name::len(self)) {
                    ::std::result::Result::Ok(range) => ::soavec::SoAIndexMut::index_mut(range, self.reborrow()),
                    ::std::result::Result::Err(err) => panic!("{}", err),
                }
            }

            fn get_mut(&mut self, index: usize) -> ::std::option::Option<#ref_mut_name<'_>> {
                ::soavec::SoAIndexMut::get_mut(index, self.reborrow())
            }

            #[track_caller]
            fn index_mut(&mut self, index: usize) -> #ref_mut_name<'_> {
                ::soavec::SoAIndexMut::index_mut(index, self.reborrow())
            }

            fn iter_mut(&mut self) -> #iter_mut_name<'_> {
                #slice_mut_name::iter_mut(self)
            }

            fn apply_permutation(&mut self, permutation: &::soavec::Permutation) -> ::soavec::Result<()> {
                #slice_mut_name::apply_permutation(self, permutation)
            }
        }
    }
}

fn derive_vec(input: &Input) -> TokenStream {
    let name = &input.name;
    let vec_name = names::vec_name(name);
    let slice_name = names::slice_name(name);
    let slice_mut_name = names::slice_mut_name(name);
    let ref_name = names::ref_name(name);
    let ref_mut_name = names::ref_mut_name(name);
    let iter_name = names::iter_name(name);
    let iter_mut_name = names::iter_mut_name(name);

    quote! {
        impl ::soavec::SoASlice<#name> for #vec_name {
            type Ref<'t> = #ref_name<'t> where Self: 't;
            type Slice<'t> = #slice_name<'t> where Self: 't;
            type Iter<'t> = #iter_name<'t> where Self: 't;

            fn len(&self) -> usize {
                #vec_name::len(self)
            }

            fn as_slice(&self) -> #slice_name<'_> {
                #vec_name::as_slice(self)
            }

            #[track_caller]
            fn slice<R: ::std::ops::RangeBounds<usize>>(&self, range: R) -> #slice_name<'_> {
                #vec_name::slice(self, range)
            }

            fn get(&self, index: usize) -> ::std::option::Option<#ref_name<'_>> {
                #vec_name::get(self, index)
            }

            #[track_caller]
            fn index(&self, index: usize) -> #ref_name<'_> {
                #vec_name::index(self, index)
            }

            fn iter(&self) -> #iter_name<'_> {
                #vec_name::iter(self)
            }
        }

        impl ::soavec::SoASliceMut<#name> for #vec_name {
            type RefMut<'t> = #ref_mut_name<'t> where Self: 't;
            type SliceMut<'t> = #slice_mut_name<'t> where Self: 't;
            type IterMut<'t> = #iter_mut_name<'t> where Self: 't;

            fn as_mut_slice(&mut self) -> #slice_mut_name<'_> {
                #vec_name::as_mut_slice(self)
            }

            #[track_caller]
            fn slice_mut<R: ::std::ops::RangeBounds<usize>>(&mut self, range: R) -> #slice_mut_name<'_> {
                #vec_name::slice_mut(self, range)
            }

            fn get_mut(&mut self, index: usize) -> ::std::option::Option<#ref_mut_name<'_>> {
                #vec_name::get_mut(self, index)
            }

            #[track_caller]
            fn index_mut(&mut self, index: usize) -> #ref_mut_name<'_> {
                #vec_name::index_mut(self, index)
            }

            fn iter_mut(&mut self) -> #iter_mut_name<'_> {
                #vec_name::iter_mut(self)
            }

            fn apply_permutation(&mut self, permutation: &::soavec::Permutation) -> ::soavec::Result<()> {
                #vec_name::as_mut_slice(self).apply_permutation(permutation)
            }
        }

        impl ::soavec::SoAVec<#name> for #vec_name {
            fn new() -> Self {
                #vec_name::new()
            }

            fn with_capacity(capacity: usize) -> Self {
                #vec_name::with_capacity(capacity)
            }

            fn capacity(&self) -> usize {
                #vec_name::capacity(self)
            }

            fn reserve(&mut self, additional: usize) {
                #vec_name::reserve(self, additional)
            }

            fn reserve_exact(&mut self, additional: usize) {
                #vec_name::reserve_exact(self, additional)
            }

            fn shrink_to_fit(&mut self) {
                #vec_name::shrink_to_fit(self)
            }

            fn truncate(&mut self, len: usize) {
                #vec_name::truncate(self, len)
            }

            fn push(&mut self, element: #name) {
                #vec_name::push(self, element)
            }

            fn pop(&mut self) -> ::std::option::Option<#name> {
                #vec_name::pop(self)
            }

            fn insert(&mut self, index: usize, element: #name) -> ::soavec::Result<()> {
                #vec_name::try_insert(self, index, element)
            }

            fn remove(&mut self, index: usize) -> ::soavec::Result<#name> {
                #vec_name::try_remove(self, index)
            }

            fn swap_remove(&mut self, index: usize) -> ::soavec::Result<#name> {
                #vec_name::try_swap_remove(self, index)
            }

            fn replace(&mut self, index: usize, element: #name) -> ::soavec::Result<#name> {
                #vec_name::try_replace(self, index, element)
            }

            fn append(&mut self, other: &mut Self) -> ::soavec::Result<()> {
                #vec_name::try_append(self, other)
            }

            fn clear(&mut self) {
                #vec_name::clear(self)
            }

            #[track_caller]
            fn split_off(&mut self, at: usize) -> Self {
                #vec_name::split_off(self, at)
            }
        }
    }
}
