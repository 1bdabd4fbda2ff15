//! The owning container, `…Vec`

use proc_macro2::TokenStream;
use quote::quote;

use crate::input::{FieldKind, Input, SoAKind};
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

    let vec_attrs = input.attrs.forwarded.get(SoAKind::Vec);
    let doc_url = format!("[`{0}`](struct.{0}.html)", name);
    let vec_doc = format!(
        "An analog of `Vec<{}>` with Struct of Array (SoA) layout, one column per field of {}",
        name, doc_url
    );

    let fields_names = input.stored_idents();
    let fields_locals = input.stored_locals();
    let fields_attrs = input.stored().map(|field| field.forwarded(SoAKind::Vec));
    let fields_doc = fields_names
        .iter()
        .map(|ident| format!("A vector of `{}` from a {}", ident, doc_url));

    let fields_types = input.map_stored(
        |_, path| {
            let nested = names::nested(path, names::vec_name);
            quote! { #nested }
        },
        |_, ty| quote! { ::std::vec::Vec<#ty> },
    );

    let with_capacity = input.map_stored(
        |_, path| {
            let nested = names::nested(path, names::vec_name);
            quote! { #nested::with_capacity(capacity) }
        },
        |_, _| quote! { ::std::vec::Vec::with_capacity(capacity) },
    );

    let check_lengths = input.map_stored(
        |ident, _| quote! { self.#ident.check_lengths(expected)?; },
        |ident, _| {
            let field = ident.to_string();
            quote! {
                if self.#ident.len() != expected {
                    return ::std::result::Result::Err(::soavec::SoAError::LengthMismatch {
                        field: #field,
                        expected,
                        got: self.#ident.len(),
                    });
                }
            }
        },
    );

    let first = &input.first_stored().ident;
    let first_len = match input.first_stored().kind {
        FieldKind::Nested(_) => quote! { self.#first.first_column_len() },
        _ => quote! { self.#first.len() },
    };
    let element = quote::format_ident!("element");
    let destructure = input.destructure_record(&element);
    let rebuild = input.rebuild_record();

    let checked_deserialize = if input.attrs.derive_deserialize {
        let columns_name = names::columns_name(name).to_string();
        quote! { #[serde(try_from = #columns_name)] }
    } else {
        TokenStream::new()
    };

    let mut generated = quote! {
        #[doc = #vec_doc]
        #[allow(dead_code)]
        #[derive(Default)]
        #(#[#vec_attrs])*
        #checked_deserialize
        #visibility struct #vec_name {
            #(
                #[doc = #fields_doc]
                #fields_attrs
                pub #fields_names: #fields_types,
            )*
        }

        impl ::soavec::StructOfArray for #name {
            type Type = #vec_name;
        }

        #[allow(dead_code)]
        #[allow(clippy::len_without_is_empty, clippy::new_without_default)]
        impl #vec_name {
            /// Similar to `Vec::new()`
            pub fn new() -> #vec_name {
                ::std::default::Default::default()
            }

            /// Similar to `Vec::with_capacity()`, reserving `capacity` in
            /// every column
            pub fn with_capacity(capacity: usize) -> #vec_name {
                #vec_name {
                    #(#fields_names: #with_capacity,)*
                }
            }

            /// Build a container from one column per stored field, in
            /// declaration order.
            ///
            /// # Errors
            ///
            /// Returns `LengthMismatch` naming the first column whose length
            /// differs from the first one.
            pub fn try_from_columns(#(#fields_names: #fields_types),*) -> ::soavec::Result<#vec_name> {
                let __soa_columns = #vec_name { #(#fields_names),* };
                __soa_columns.check_lengths(__soa_columns.first_column_len())?;
                ::std::result::Result::Ok(__soa_columns)
            }

            /// Length of the first leaf column, without checking the others
            #[doc(hidden)]
            pub fn first_column_len(&self) -> usize {
                #first_len
            }

            /// Check that every column, nested ones included, holds
            /// `expected` elements.
            ///
            /// # Errors
            ///
            /// Returns `LengthMismatch` naming the first offending field.
            pub fn check_lengths(&self, expected: usize) -> ::soavec::Result<()> {
                #(#check_lengths)*
                ::std::result::Result::Ok(())
            }

            /// Similar to `Vec::len()`, all the columns have the same length
            pub fn len(&self) -> usize {
                let len = self.first_column_len();
                #(debug_assert_eq!(self.#fields_names.len(), len);)*
                len
            }

            /// Similar to `Vec::is_empty()`
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Similar to `Vec::capacity()`, the smallest capacity of all
            /// the columns
            pub fn capacity(&self) -> usize {
                let mut capacity = usize::MAX;
                #(capacity = capacity.min(self.#fields_names.capacity());)*
                capacity
            }

            /// Similar to `Vec::reserve()`
            pub fn reserve(&mut self, additional: usize) {
                #(self.#fields_names.reserve(additional);)*
            }

            /// Similar to `Vec::reserve_exact()`
            pub fn reserve_exact(&mut self, additional: usize) {
                #(self.#fields_names.reserve_exact(additional);)*
            }

            /// Similar to `Vec::shrink_to_fit()`
            pub fn shrink_to_fit(&mut self) {
                #(self.#fields_names.shrink_to_fit();)*
            }

            /// Similar to `Vec::truncate()`
            pub fn truncate(&mut self, len: usize) {
                #(self.#fields_names.truncate(len);)*
            }

            /// Similar to `Vec::clear()`
            pub fn clear(&mut self) {
                #(self.#fields_names.clear();)*
            }

            /// Similar to `Vec::push()`, appending every field of `element`
            /// to its column
            pub fn push(&mut self, element: #name) {
                #destructure
                #(self.#fields_names.push(#fields_locals);)*
            }

            /// Similar to `Vec::pop()`
            pub fn pop(&mut self) -> ::std::option::Option<#name> {
                if self.is_empty() {
                    return ::std::option::Option::None;
                }
                #(let #fields_locals = self.#fields_names.pop()?;)*
                ::std::option::Option::Some(#rebuild)
            }

            /// Insert `element` at `index`, shifting everything after it.
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` if `index > len`. The container is
            /// left unchanged.
            pub fn try_insert(&mut self, index: usize, element: #name) -> ::soavec::Result<()> {
                ::soavec::check_insertion(index, self.len())?;
                #destructure
                #(self.#fields_names.insert(index, #fields_locals);)*
                ::std::result::Result::Ok(())
            }

            /// Similar to `Vec::insert()`
            ///
            /// # Panics
            ///
            /// If `index > len`
            #[track_caller]
            pub fn insert(&mut self, index: usize, element: #name) {
                if let ::std::result::Result::Err(err) = self.try_insert(index, element) {
                    panic!("{}", err);
                }
            }

            /// Remove and return the element at `index`, shifting everything
            /// after it.
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` if `index >= len`. The container is
            /// left unchanged.
            pub fn try_remove(&mut self, index: usize) -> ::soavec::Result<#name> {
                ::soavec::check_position(index, self.len())?;
                #(let #fields_locals = self.#fields_names.remove(index);)*
                ::std::result::Result::Ok(#rebuild)
            }

            /// Similar to `Vec::remove()`
            ///
            /// # Panics
            ///
            /// If `index >= len`
            #[track_caller]
            pub fn remove(&mut self, index: usize) -> #name {
                match self.try_remove(index) {
                    ::std::result::Result::Ok(element) => element,
                    ::std::result::Result::Err(err) => panic!("{}", err),
                }
            }

            /// Remove and return the element at `index`, moving the last
            /// element into its place.
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` if `index >= len`. The container is
            /// left unchanged.
            pub fn try_swap_remove(&mut self, index: usize) -> ::soavec::Result<#name> {
                ::soavec::check_position(index, self.len())?;
                #(let #fields_locals = self.#fields_names.swap_remove(index);)*
                ::std::result::Result::Ok(#rebuild)
            }

            /// Similar to `Vec::swap_remove()`
            ///
            /// # Panics
            ///
            /// If `index >= len`
            #[track_caller]
            pub fn swap_remove(&mut self, index: usize) -> #name {
                match self.try_swap_remove(index) {
                    ::std::result::Result::Ok(element) => element,
                    ::std::result::Result::Err(err) => panic!("{}", err),
                }
            }

            /// Overwrite every field of the element at `index` with the
            /// fields of `element`, returning the previous element.
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` if `index >= len`. The container is
            /// left unchanged.
            pub fn try_replace(&mut self, index: usize, element: #name) -> ::soavec::Result<#name> {
                let mut slot = ::soavec::SoAIndexMut::try_get_mut(index, self.as_mut_slice())?;
                ::std::result::Result::Ok(slot.replace(element))
            }

            /// Panicking version of `try_replace`
            ///
            /// # Panics
            ///
            /// If `index >= len`
            #[track_caller]
            pub fn replace(&mut self, index: usize, element: #name) -> #name {
                match self.try_replace(index, element) {
                    ::std::result::Result::Ok(previous) => previous,
                    ::std::result::Result::Err(err) => panic!("{}", err),
                }
            }

            /// Move every element of `other` to the end of `self`.
            ///
            /// # Errors
            ///
            /// Returns `LengthMismatch` if the columns of `other` differ in
            /// length. Neither container is changed in that case.
            pub fn try_append(&mut self, other: &mut #vec_name) -> ::soavec::Result<()> {
                other.check_lengths(other.first_column_len())?;
                #(self.#fields_names.append(&mut other.#fields_names);)*
                ::std::result::Result::Ok(())
            }

            /// Similar to `Vec::append()`
            ///
            /// # Panics
            ///
            /// If the columns of `other` differ in length
            #[track_caller]
            pub fn append(&mut self, other: &mut #vec_name) {
                if let ::std::result::Result::Err(err) = self.try_append(other) {
                    panic!("{}", err);
                }
            }

            /// Similar to `Vec::split_off()`
            ///
            /// # Panics
            ///
            /// If `at > len`
            #[track_caller]
            pub fn split_off(&mut self, at: usize) -> #vec_name {
                if let ::std::result::Result::Err(err) = ::soavec::check_insertion(at, self.len()) {
                    panic!("{}", err);
                }
                #vec_name {
                    #(#fields_names: self.#fields_names.split_off(at),)*
                }
            }

            /// Similar to `Vec::retain()`, with the predicate looking at
            /// each element through a reference
            pub fn retain<F>(&mut self, mut f: F)
            where
                F: FnMut(#ref_name<'_>) -> bool,
            {
                let len = self.len();
                let mut deleted = 0;
                {
                    let mut slice = self.as_mut_slice();
                    for i in 0..len {
                        if !f(slice.index(i)) {
                            deleted += 1;
                        } else if deleted > 0 {
                            slice.swap(i - deleted, i);
                        }
                    }
                }
                if deleted > 0 {
                    self.truncate(len - deleted);
                }
            }

            /// Similar to `Vec::retain_mut()`
            pub fn retain_mut<F>(&mut self, mut f: F)
            where
                F: FnMut(#ref_mut_name<'_>) -> bool,
            {
                let len = self.len();
                let mut deleted = 0;
                {
                    let mut slice = self.as_mut_slice();
                    for i in 0..len {
                        if !f(slice.index_mut(i)) {
                            deleted += 1;
                        } else if deleted > 0 {
                            slice.swap(i - deleted, i);
                        }
                    }
                }
                if deleted > 0 {
                    self.truncate(len - deleted);
                }
            }

            /// Shared view over the whole container
            pub fn as_slice(&self) -> #slice_name<'_> {
                #slice_name {
                    #(#fields_names: self.#fields_names.as_slice(),)*
                }
            }

            /// Exclusive view over the whole container
            pub fn as_mut_slice(&mut self) -> #slice_mut_name<'_> {
                #slice_mut_name {
                    #(#fields_names: self.#fields_names.as_mut_slice(),)*
                }
            }

            /// Shared view over `range`
            ///
            /// # Panics
            ///
            /// If `range` does not fit in the container
            #[track_caller]
            pub fn slice<R>(&self, range: R) -> #slice_name<'_>
            where
                R: ::std::ops::RangeBounds<usize>,
            {
                match ::soavec::resolve_range(range, self.len()) {
                    ::std::result::Result::Ok(range) => ::soavec::SoAIndex::index(range, self.as_slice()),
                    ::std::result::Result::Err(err) => panic!("{}", err),
                }
            }

            /// Exclusive view over `range`
            ///
            /// # Panics
            ///
            /// If `range` does not fit in the container
            #[track_caller]
            pub fn slice_mut<R>(&mut self, range: R) -> #slice_mut_name<'_>
            where
                R: ::std::ops::RangeBounds<usize>,
            {
                match ::soavec::resolve_range(range, self.len()) {
                    ::std::result::Result::Ok(range) => ::soavec::SoAIndexMut::index_mut(range, self.as_mut_slice()),
                    ::std::result::Result::Err(err) => panic!("{}", err),
                }
            }

            /// Get a reference or a view for the given selector, or `None`
            /// if it does not fit in the container
            pub fn get<'a, I>(&'a self, index: I) -> ::std::option::Option<I::RefOutput>
            where
                I: ::soavec::SoAIndex<&'a #vec_name>,
            {
                ::soavec::SoAIndex::get(index, self)
            }

            /// Get a reference or a view for the given selector
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` if the selector does not fit in the
            /// container
            pub fn try_get<'a, I>(&'a self, index: I) -> ::soavec::Result<I::RefOutput>
            where
                I: ::soavec::SoAIndex<&'a #vec_name>,
            {
                ::soavec::SoAIndex::try_get(index, self)
            }

            /// Get a reference or a view for the given selector
            ///
            /// # Panics
            ///
            /// If the selector does not fit in the container
            #[track_caller]
            pub fn index<'a, I>(&'a self, index: I) -> I::RefOutput
            where
                I: ::soavec::SoAIndex<&'a #vec_name>,
            {
                ::soavec::SoAIndex::index(index, self)
            }

            /// Get a mutable reference or view for the given selector, or
            /// `None` if it does not fit in the container
            pub fn get_mut<'a, I>(&'a mut self, index: I) -> ::std::option::Option<I::MutOutput>
            where
                I: ::soavec::SoAIndexMut<&'a mut #vec_name>,
            {
                ::soavec::SoAIndexMut::get_mut(index, self)
            }

            /// Get a mutable reference or view for the given selector
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` if the selector does not fit in the
            /// container
            pub fn try_get_mut<'a, I>(&'a mut self, index: I) -> ::soavec::Result<I::MutOutput>
            where
                I: ::soavec::SoAIndexMut<&'a mut #vec_name>,
            {
                ::soavec::SoAIndexMut::try_get_mut(index, self)
            }

            /// Get a mutable reference or view for the given selector
            ///
            /// # Panics
            ///
            /// If the selector does not fit in the container
            #[track_caller]
            pub fn index_mut<'a, I>(&'a mut self, index: I) -> I::MutOutput
            where
                I: ::soavec::SoAIndexMut<&'a mut #vec_name>,
            {
                ::soavec::SoAIndexMut::index_mut(index, self)
            }

            /// Iterate over references to the elements
            pub fn iter(&self) -> #iter_name<'_> {
                self.as_slice().into_iter()
            }

            /// Iterate over mutable references to the elements
            pub fn iter_mut(&mut self) -> #iter_mut_name<'_> {
                self.as_mut_slice().into_iter()
            }
        }

        impl ::std::iter::FromIterator<#name> for #vec_name {
            fn from_iter<T: ::std::iter::IntoIterator<Item = #name>>(iter: T) -> Self {
                let mut result = #vec_name::new();
                ::std::iter::Extend::extend(&mut result, iter);
                result
            }
        }

        impl ::std::iter::Extend<#name> for #vec_name {
            fn extend<T: ::std::iter::IntoIterator<Item = #name>>(&mut self, iter: T) {
                let iter = iter.into_iter();
                self.reserve(iter.size_hint().0);
                for element in iter {
                    self.push(element);
                }
            }
        }
    };

    if input.attrs.derive_deserialize {
        generated.extend(derive_checked_columns(input));
    }

    if input.attrs.derive_clone {
        let resize_values = &fields_locals;
        generated.extend(quote! {
            #[allow(dead_code)]
            impl #vec_name {
                /// Similar to `Vec::resize()`, filling new positions with
                /// clones of the fields of `value`
                pub fn resize(&mut self, new_len: usize, value: #name) {
                    let #name { #(#fields_names: #resize_values,)* .. } = value;
                    #(self.#fields_names.resize(new_len, #resize_values);)*
                }
            }

            impl<'a> ::std::iter::Extend<#ref_name<'a>> for #vec_name {
                fn extend<T: ::std::iter::IntoIterator<Item = #ref_name<'a>>>(&mut self, iter: T) {
                    ::std::iter::Extend::extend(self, iter.into_iter().map(|element| element.to_record()));
                }
            }
        });
    }

    generated
}

/// Unchecked mirror of the container that serde deserializes into, turned
/// into the container with `try_from_columns`.
fn derive_checked_columns(input: &Input) -> TokenStream {
    let visibility = &input.visibility;
    let vec_name = names::vec_name(&input.name);
    let columns_name = names::columns_name(&input.name);

    let serde_attrs = serde_only(input.attrs.forwarded.get(SoAKind::Vec));
    let fields_names = input.stored_idents();
    let fields_attrs = input
        .stored()
        .map(|field| serde_only(field.attrs.get(SoAKind::Vec)))
        .collect::<Vec<_>>();
    let fields_types = input.map_stored(
        |_, path| {
            let nested = names::nested(path, names::vec_name);
            quote! { #nested }
        },
        |_, ty| quote! { ::std::vec::Vec<#ty> },
    );

    quote! {
        #[doc(hidden)]
        #[allow(non_camel_case_types)]
        #[derive(Deserialize)]
        #(#[#serde_attrs])*
        #visibility struct #columns_name {
            #(
                #(#[#fields_attrs])*
                #fields_names: #fields_types,
            )*
        }

        impl ::std::convert::TryFrom<#columns_name> for #vec_name {
            type Error = ::soavec::SoAError;

            fn try_from(columns: #columns_name) -> ::soavec::Result<#vec_name> {
                #vec_name::try_from_columns(#(columns.#fields_names),*)
            }
        }
    }
}

fn serde_only(attrs: &[syn::Meta]) -> Vec<&syn::Meta> {
    attrs
        .iter()
        .filter(|meta| meta.path().is_ident("serde"))
        .collect()
}
