//! `SoARaw` for the generated container, building views straight from column
//! pointers

use proc_macro2::TokenStream;
use quote::quote;

use crate::input::Input;
use crate::names;

pub fn derive(input: &Input) -> TokenStream {
    let name = &input.name;
    let vec_name = names::vec_name(name);
    let slice_name = names::slice_name(name);
    let slice_mut_name = names::slice_mut_name(name);
    let fields_names = input.stored_idents();

    let slice_raw = input.map_stored(
        |ident, path| {
            let nested = names::nested(path, names::vec_name);
            quote! {
                <#nested as ::soavec::SoARaw>::slice_raw(
                    ::std::ptr::addr_of!((*this).#ident),
                    range.clone(),
                )
            }
        },
        |ident, _| {
            quote! {
                ::std::slice::from_raw_parts((*this).#ident.as_ptr().add(range.start), len)
            }
        },
    );

    let slice_raw_mut = input.map_stored(
        |ident, path| {
            let nested = names::nested(path, names::vec_name);
            quote! {
                <#nested as ::soavec::SoARaw>::slice_raw_mut(
                    ::std::ptr::addr_of_mut!((*this).#ident),
                    range.clone(),
                )
            }
        },
        |ident, _| {
            quote! {
                ::std::slice::from_raw_parts_mut((*this).#ident.as_mut_ptr().add(range.start), len)
            }
        },
    );

    quote! {
        // SAFETY: every view covers `range` of every column, nested columns
        // included, and `len` is the shared column length.
        unsafe impl ::soavec::SoARaw for #vec_name {
            type Slice<'a> = #slice_name<'a> where Self: 'a;
            type SliceMut<'a> = #slice_mut_name<'a> where Self: 'a;

            #[inline]
            fn len(&self) -> usize {
                #vec_name::len(self)
            }

            #[allow(unused_unsafe)]
            unsafe fn slice_raw<'a>(this: *const Self, range: ::std::ops::Range<usize>) -> #slice_name<'a> {
                #[allow(unused_variables)]
                let len = range.end - range.start;
                unsafe {
                    #slice_name {
                        #(#fields_names: #slice_raw,)*
                    }
                }
            }

            #[allow(unused_unsafe)]
            unsafe fn slice_raw_mut<'a>(this: *mut Self, range: ::std::ops::Range<usize>) -> #slice_mut_name<'a> {
                #[allow(unused_variables)]
                let len = range.end - range.start;
                unsafe {
                    #slice_mut_name {
                        #(#fields_names: #slice_raw_mut,)*
                    }
                }
            }
        }
    }
}
