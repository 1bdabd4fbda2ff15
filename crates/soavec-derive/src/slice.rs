//! Views over a contiguous range of every column, `…Slice<'a>` and
//! `…SliceMut<'a>`

use proc_macro2::TokenStream;
use quote::quote;

use crate::input::{Input, SoAKind};
use crate::names;

pub fn derive(input: &Input) -> TokenStream {
    let name = &input.name;
    let visibility = &input.visibility;
    let slice_name = names::slice_name(name);
    let vec_name = names::vec_name(name);
    let ref_name = names::ref_name(name);
    let iter_name = names::iter_name(name);

    let slice_attrs = input.attrs.forwarded.get(SoAKind::Slice);
    let doc_url = format!("[`{0}`](struct.{0}.html)", name);
    let doc_url_vec = format!("[`{0}`](struct.{0}.html)", vec_name);
    let slice_doc = format!(
        "A shared view over a range of a {}, the SoA analog of `&[{}]`",
        doc_url_vec, name
    );

    let fields_names = input.stored_idents();
    let fields_attrs = input.stored().map(|field| field.forwarded(SoAKind::Slice));
    let fields_doc = fields_names
        .iter()
        .map(|ident| format!("A slice of `{}` from a {}", ident, doc_url));
    let first = &input.first_stored().ident;

    let fields_types = input.map_stored(
        |_, path| {
            let nested = names::nested(path, names::slice_name);
            quote! { #nested<'a> }
        },
        |_, ty| quote! { &'a [#ty] },
    );

    let left = input
        .stored()
        .map(|field| quote::format_ident!("{}_left", field.local()))
        .collect::<Vec<_>>();
    let right = input
        .stored()
        .map(|field| quote::format_ident!("{}_right", field.local()))
        .collect::<Vec<_>>();

    let mut generated = quote! {
        #[doc = #slice_doc]
        #[allow(dead_code)]
        #[derive(Copy, Clone, Default)]
        #(#[#slice_attrs])*
        #visibility struct #slice_name<'a> {
            #(
                #[doc = #fields_doc]
                #fields_attrs
                pub #fields_names: #fields_types,
            )*
        }

        #[allow(dead_code)]
        #[allow(clippy::len_without_is_empty)]
        impl<'a> #slice_name<'a> {
            /// Similar to `<[T]>::len()`, all the fields have the same length
            pub fn len(&self) -> usize {
                let len = self.#first.len();
                #(debug_assert_eq!(self.#fields_names.len(), len);)*
                len
            }

            /// Similar to `<[T]>::is_empty()`
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Similar to `<[T]>::first()`
            pub fn first(&self) -> ::std::option::Option<#ref_name<'a>> {
                ::soavec::SoAIndex::get(0usize, *self)
            }

            /// Similar to `<[T]>::last()`
            pub fn last(&self) -> ::std::option::Option<#ref_name<'a>> {
                let last = self.len().checked_sub(1)?;
                ::soavec::SoAIndex::get(last, *self)
            }

            /// Similar to `<[T]>::split_at()`
            ///
            /// # Panics
            ///
            /// If `mid > len`
            #[track_caller]
            pub fn split_at(&self, mid: usize) -> (#slice_name<'a>, #slice_name<'a>) {
                if let ::std::result::Result::Err(err) = ::soavec::check_insertion(mid, self.len()) {
                    panic!("{}", err);
                }
                #(let (#left, #right) = self.#fields_names.split_at(mid);)*
                (
                    #slice_name { #(#fields_names: #left),* },
                    #slice_name { #(#fields_names: #right),* },
                )
            }

            /// Similar to `<[T]>::split_first()`
            pub fn split_first(&self) -> ::std::option::Option<(#ref_name<'a>, #slice_name<'a>)> {
                if self.is_empty() {
                    return ::std::option::Option::None;
                }
                let (head, tail) = self.split_at(1);
                ::std::option::Option::Some((::soavec::SoAIndex::index(0usize, head), tail))
            }

            /// Similar to `<[T]>::split_last()`
            pub fn split_last(&self) -> ::std::option::Option<(#ref_name<'a>, #slice_name<'a>)> {
                if self.is_empty() {
                    return ::std::option::Option::None;
                }
                let (head, tail) = self.split_at(self.len() - 1);
                ::std::option::Option::Some((::soavec::SoAIndex::index(0usize, tail), head))
            }

            /// Get a reference or a sub-view for the given selector, or
            /// `None` if it does not fit in this view
            pub fn get<I>(&self, index: I) -> ::std::option::Option<I::RefOutput>
            where
                I: ::soavec::SoAIndex<#slice_name<'a>>,
            {
                ::soavec::SoAIndex::get(index, *self)
            }

            /// Get a reference or a sub-view for the given selector
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` if the selector does not fit in
            /// this view
            pub fn try_get<I>(&self, index: I) -> ::soavec::Result<I::RefOutput>
            where
                I: ::soavec::SoAIndex<#slice_name<'a>>,
            {
                ::soavec::SoAIndex::try_get(index, *self)
            }

            /// Get a reference or a sub-view for the given selector
            ///
            /// # Panics
            ///
            /// If the selector does not fit in this view
            #[track_caller]
            pub fn index<I>(&self, index: I) -> I::RefOutput
            where
                I: ::soavec::SoAIndex<#slice_name<'a>>,
            {
                ::soavec::SoAIndex::index(index, *self)
            }

            /// Shorten the lifetime of this view
            pub fn reborrow<'b>(&'b self) -> #slice_name<'b>
            where
                'a: 'b,
            {
                *self
            }

            /// Iterate over references to the elements
            pub fn iter(&self) -> #iter_name<'a> {
                ::std::iter::IntoIterator::into_iter(*self)
            }
        }
    };

    if input.attrs.derive_clone {
        generated.extend(quote! {
            #[allow(dead_code)]
            impl<'a> #slice_name<'a> {
                /// Similar to `<[T]>::to_vec()`, cloning every column of
                /// this view into a new container
                pub fn to_vec(&self) -> #vec_name {
                    #vec_name {
                        #(#fields_names: self.#fields_names.to_vec(),)*
                    }
                }
            }
        });
    }

    generated.extend(derive_mut(input));
    generated
}

pub fn derive_mut(input: &Input) -> TokenStream {
    let name = &input.name;
    let visibility = &input.visibility;
    let slice_name = names::slice_name(name);
    let slice_mut_name = names::slice_mut_name(name);
    let vec_name = names::vec_name(name);
    let ref_name = names::ref_name(name);
    let ref_mut_name = names::ref_mut_name(name);
    let iter_name = names::iter_name(name);
    let iter_mut_name = names::iter_mut_name(name);

    let slice_mut_attrs = input.attrs.forwarded.get(SoAKind::SliceMut);
    let doc_url = format!("[`{0}`](struct.{0}.html)", name);
    let doc_url_vec = format!("[`{0}`](struct.{0}.html)", vec_name);
    let slice_mut_doc = format!(
        "An exclusive view over a range of a {}, the SoA analog of `&mut [{}]`",
        doc_url_vec, name
    );

    let fields_names = input.stored_idents();
    let fields_attrs = input
        .stored()
        .map(|field| field.forwarded(SoAKind::SliceMut));
    let fields_doc = fields_names
        .iter()
        .map(|ident| format!("A mutable slice of `{}` from a {}", ident, doc_url));
    let first = &input.first_stored().ident;

    let fields_types = input.map_stored(
        |_, path| {
            let nested = names::nested(path, names::slice_mut_name);
            quote! { #nested<'a> }
        },
        |_, ty| quote! { &'a mut [#ty] },
    );

    let as_slice = input.map_stored(
        |ident, _| quote! { self.#ident.as_slice() },
        |ident, _| quote! { &*self.#ident },
    );

    let reborrow = input.map_stored(
        |ident, _| quote! { self.#ident.reborrow() },
        |ident, _| quote! { &mut *self.#ident },
    );

    let into_slice = input.map_stored(
        |ident, _| quote! { self.#ident.into_slice() },
        |ident, _| quote! { self.#ident },
    );

    let split = input.map_stored(
        |ident, _| quote! { self.#ident.into_split_at(mid) },
        |ident, _| quote! { self.#ident.split_at_mut(mid) },
    );

    let replace = input.map_stored(
        |ident, _| quote! { self.#ident.replace_columns(columns.#ident)?; },
        |ident, _| {
            quote! {
                for (slot, value) in self.#ident.iter_mut().zip(columns.#ident) {
                    *slot = value;
                }
            }
        },
    );

    let reorder = input.map_stored(
        |ident, _| quote! { self.#ident.apply_permutation(permutation)?; },
        |ident, _| quote! { permutation.apply(&mut *self.#ident)?; },
    );

    let left = input
        .stored()
        .map(|field| quote::format_ident!("{}_left", field.local()))
        .collect::<Vec<_>>();
    let right = input
        .stored()
        .map(|field| quote::format_ident!("{}_right", field.local()))
        .collect::<Vec<_>>();

    let mut generated = quote! {
        #[doc = #slice_mut_doc]
        #[allow(dead_code)]
        #[derive(Default)]
        #(#[#slice_mut_attrs])*
        #visibility struct #slice_mut_name<'a> {
            #(
                #[doc = #fields_doc]
                #fields_attrs
                pub #fields_names: #fields_types,
            )*
        }

        #[allow(dead_code)]
        #[allow(clippy::len_without_is_empty)]
        impl<'a> #slice_mut_name<'a> {
            /// Similar to `<[T]>::len()`, all the fields have the same length
            pub fn len(&self) -> usize {
                let len = self.#first.len();
                #(debug_assert_eq!(self.#fields_names.len(), len);)*
                len
            }

            /// Similar to `<[T]>::is_empty()`
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Shared view over the same range, borrowing `self`
            pub fn as_slice(&self) -> #slice_name<'_> {
                #slice_name {
                    #(#fields_names: #as_slice,)*
                }
            }

            /// Exclusive view over the same range, borrowing `self`
            pub fn reborrow(&mut self) -> #slice_mut_name<'_> {
                #slice_mut_name {
                    #(#fields_names: #reborrow,)*
                }
            }

            /// Turn this view into a shared view with the same lifetime
            pub fn into_slice(self) -> #slice_name<'a> {
                #slice_name {
                    #(#fields_names: #into_slice,)*
                }
            }

            /// Similar to `<[T]>::first_mut()`
            pub fn first_mut(&mut self) -> ::std::option::Option<#ref_mut_name<'_>> {
                ::soavec::SoAIndexMut::get_mut(0usize, self.reborrow())
            }

            /// Similar to `<[T]>::last_mut()`
            pub fn last_mut(&mut self) -> ::std::option::Option<#ref_mut_name<'_>> {
                let last = self.len().checked_sub(1)?;
                ::soavec::SoAIndexMut::get_mut(last, self.reborrow())
            }

            /// Similar to `<[T]>::split_at_mut()`
            ///
            /// # Panics
            ///
            /// If `mid > len`
            #[track_caller]
            pub fn split_at_mut(&mut self, mid: usize) -> (#slice_mut_name<'_>, #slice_mut_name<'_>) {
                self.reborrow().into_split_at(mid)
            }

            /// Consuming version of `split_at_mut`, keeping the lifetime of
            /// this view
            ///
            /// # Panics
            ///
            /// If `mid > len`
            #[track_caller]
            pub fn into_split_at(self, mid: usize) -> (#slice_mut_name<'a>, #slice_mut_name<'a>) {
                if let ::std::result::Result::Err(err) = ::soavec::check_insertion(mid, self.len()) {
                    panic!("{}", err);
                }
                #(let (#left, #right) = #split;)*
                (
                    #slice_mut_name { #(#fields_names: #left),* },
                    #slice_mut_name { #(#fields_names: #right),* },
                )
            }

            /// Similar to `<[T]>::split_first_mut()`
            pub fn split_first_mut(&mut self) -> ::std::option::Option<(#ref_mut_name<'_>, #slice_mut_name<'_>)> {
                self.reborrow().into_split_first()
            }

            /// Consuming version of `split_first_mut`
            pub fn into_split_first(self) -> ::std::option::Option<(#ref_mut_name<'a>, #slice_mut_name<'a>)> {
                if self.is_empty() {
                    return ::std::option::Option::None;
                }
                let (head, tail) = self.into_split_at(1);
                ::std::option::Option::Some((::soavec::SoAIndexMut::index_mut(0usize, head), tail))
            }

            /// Similar to `<[T]>::split_last_mut()`
            pub fn split_last_mut(&mut self) -> ::std::option::Option<(#ref_mut_name<'_>, #slice_mut_name<'_>)> {
                self.reborrow().into_split_last()
            }

            /// Consuming version of `split_last_mut`
            pub fn into_split_last(self) -> ::std::option::Option<(#ref_mut_name<'a>, #slice_mut_name<'a>)> {
                if self.is_empty() {
                    return ::std::option::Option::None;
                }
                let mid = self.len() - 1;
                let (head, tail) = self.into_split_at(mid);
                ::std::option::Option::Some((::soavec::SoAIndexMut::index_mut(0usize, tail), head))
            }

            /// Similar to `<[T]>::swap()`, swapping the elements at `a` and
            /// `b` in every column
            ///
            /// # Panics
            ///
            /// If `a` or `b` is out of bounds
            #[track_caller]
            pub fn swap(&mut self, a: usize, b: usize) {
                let len = self.len();
                for position in [a, b] {
                    if let ::std::result::Result::Err(err) = ::soavec::check_position(position, len) {
                        panic!("{}", err);
                    }
                }
                #(self.#fields_names.swap(a, b);)*
            }

            /// Overwrite every element of this view with the elements of
            /// `columns`, column by column.
            ///
            /// # Errors
            ///
            /// Returns `LengthMismatch` if any column of `columns` does not
            /// have the length of this view. Nothing is written in that case.
            pub fn replace_columns(&mut self, columns: #vec_name) -> ::soavec::Result<()> {
                columns.check_lengths(self.len())?;
                #(#replace)*
                ::std::result::Result::Ok(())
            }

            /// Reorder every column with `permutation`, so that position `i`
            /// holds the element that was at `permutation.order()[i]`.
            ///
            /// # Errors
            ///
            /// Returns `LengthMismatch` if `permutation` does not have the
            /// length of this view. Nothing is moved in that case.
            pub fn apply_permutation(&mut self, permutation: &::soavec::Permutation) -> ::soavec::Result<()> {
                permutation.check_len(self.len())?;
                #(#reorder)*
                ::std::result::Result::Ok(())
            }

            /// Reorder every column so that position `i` holds the element
            /// that was at `indices[i]`.
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` or `DuplicateIndex` if `indices` is
            /// not a reordering of `0..indices.len()`, and `LengthMismatch`
            /// if it does not have the length of this view. Nothing is moved
            /// in either case.
            pub fn apply_index(&mut self, indices: &[usize]) -> ::soavec::Result<()> {
                let permutation = ::soavec::Permutation::from_order(indices.to_vec())?;
                self.apply_permutation(&permutation)
            }

            /// Similar to `<[T]>::sort_by()`, a stable sort comparing
            /// elements through references
            pub fn sort_by<F>(&mut self, mut compare: F)
            where
                F: FnMut(#ref_name<'_>, #ref_name<'_>) -> ::std::cmp::Ordering,
            {
                let permutation = {
                    let view = self.as_slice();
                    ::soavec::Permutation::sort_by(view.len(), |a, b| compare(view.index(a), view.index(b)))
                };
                self.reorder_sorted(&permutation);
            }

            /// Similar to `<[T]>::sort_by_key()`, a stable sort on the key
            /// of each element
            pub fn sort_by_key<K, F>(&mut self, mut key: F)
            where
                K: ::std::cmp::Ord,
                F: FnMut(#ref_name<'_>) -> K,
            {
                let permutation = {
                    let view = self.as_slice();
                    ::soavec::Permutation::sort_by_key(view.len(), |i| key(view.index(i)))
                };
                self.reorder_sorted(&permutation);
            }

            fn reorder_sorted(&mut self, permutation: &::soavec::Permutation) {
                // built from `0..len`, so the lengths always agree
                if let ::std::result::Result::Err(err) = self.apply_permutation(permutation) {
                    panic!("{}", err);
                }
            }

            /// Get a reference or a sub-view for the given selector, or
            /// `None` if it does not fit in this view
            pub fn get<'b, I>(&'b self, index: I) -> ::std::option::Option<I::RefOutput>
            where
                I: ::soavec::SoAIndex<#slice_name<'b>>,
            {
                ::soavec::SoAIndex::get(index, self.as_slice())
            }

            /// Get a reference or a sub-view for the given selector
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` if the selector does not fit in
            /// this view
            pub fn try_get<'b, I>(&'b self, index: I) -> ::soavec::Result<I::RefOutput>
            where
                I: ::soavec::SoAIndex<#slice_name<'b>>,
            {
                ::soavec::SoAIndex::try_get(index, self.as_slice())
            }

            /// Get a reference or a sub-view for the given selector
            ///
            /// # Panics
            ///
            /// If the selector does not fit in this view
            #[track_caller]
            pub fn index<'b, I>(&'b self, index: I) -> I::RefOutput
            where
                I: ::soavec::SoAIndex<#slice_name<'b>>,
            {
                ::soavec::SoAIndex::index(index, self.as_slice())
            }

            /// Get a mutable reference or sub-view for the given selector,
            /// or `None` if it does not fit in this view
            pub fn get_mut<'b, I>(&'b mut self, index: I) -> ::std::option::Option<I::MutOutput>
            where
                I: ::soavec::SoAIndexMut<#slice_mut_name<'b>>,
            {
                ::soavec::SoAIndexMut::get_mut(index, self.reborrow())
            }

            /// Get a mutable reference or sub-view for the given selector
            ///
            /// # Errors
            ///
            /// Returns `IndexOutOfRange` if the selector does not fit in
            /// this view
            pub fn try_get_mut<'b, I>(&'b mut self, index: I) -> ::soavec::Result<I::MutOutput>
            where
                I: ::soavec::SoAIndexMut<#slice_mut_name<'b>>,
            {
                ::soavec::SoAIndexMut::try_get_mut(index, self.reborrow())
            }

            /// Get a mutable reference or sub-view for the given selector
            ///
            /// # Panics
            ///
            /// If the selector does not fit in this view
            #[track_caller]
            pub fn index_mut<'b, I>(&'b mut self, index: I) -> I::MutOutput
            where
                I: ::soavec::SoAIndexMut<#slice_mut_name<'b>>,
            {
                ::soavec::SoAIndexMut::index_mut(index, self.reborrow())
            }

            /// Iterate over references to the elements
            pub fn iter(&self) -> #iter_name<'_> {
                ::std::iter::IntoIterator::into_iter(self.as_slice())
            }

            /// Iterate over mutable references to the elements
            pub fn iter_mut(&mut self) -> #iter_mut_name<'_> {
                ::std::iter::IntoIterator::into_iter(self.reborrow())
            }
        }
    };

    if input.attrs.derive_ord {
        generated.extend(quote! {
            #[allow(dead_code)]
            impl<'a> #slice_mut_name<'a> {
                /// Similar to `<[T]>::sort()`, a stable sort in the order of
                /// the element references
                pub fn sort(&mut self) {
                    self.sort_by(|a, b| ::std::cmp::Ord::cmp(&a, &b));
                }
            }
        });
    }

    if input.attrs.derive_clone {
        generated.extend(quote! {
            #[allow(dead_code)]
            impl<'a> #slice_mut_name<'a> {
                /// Similar to `<[T]>::to_vec()`, cloning every column of
                /// this view into a new container
                pub fn to_vec(&self) -> #vec_name {
                    self.as_slice().to_vec()
                }
            }
        });
    }

    generated
}
