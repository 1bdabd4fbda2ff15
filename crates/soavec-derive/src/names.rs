//! Names of the generated types

use quote::format_ident;
use syn::Ident;

/// Get the ident for the `Vec` type associated with `name`
pub fn vec_name(name: &Ident) -> Ident {
    format_ident!("{}Vec", name)
}

/// Get the ident for the slice type associated with `name`
pub fn slice_name(name: &Ident) -> Ident {
    format_ident!("{}Slice", name)
}

/// Get the ident for the mutable slice type associated with `name`
pub fn slice_mut_name(name: &Ident) -> Ident {
    format_ident!("{}SliceMut", name)
}

/// Get the ident for the reference type associated with `name`
pub fn ref_name(name: &Ident) -> Ident {
    format_ident!("{}Ref", name)
}

/// Get the ident for the mutable reference type associated with `name`
pub fn ref_mut_name(name: &Ident) -> Ident {
    format_ident!("{}RefMut", name)
}

/// Get the ident for the iterator type associated with `name`
pub fn iter_name(name: &Ident) -> Ident {
    format_ident!("{}Iter", name)
}

/// Get the ident for the mutable iterator type associated with `name`
pub fn iter_mut_name(name: &Ident) -> Ident {
    format_ident!("{}IterMut", name)
}

/// Get the ident for the unchecked columns a `Deserialize` container is
/// read into before its lengths are checked
pub fn columns_name(name: &Ident) -> Ident {
    format_ident!("__{}VecColumns", name)
}

/// Path to a generated type of a nested record: `geometry::Color` becomes
/// `geometry::ColorVec` with `rename = vec_name`.
pub fn nested(path: &syn::Path, rename: fn(&Ident) -> Ident) -> syn::Path {
    let mut path = path.clone();
    if let Some(last) = path.segments.last_mut() {
        last.ident = rename(&last.ident);
    }
    path
}
