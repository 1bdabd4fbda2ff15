//! Parsed form of the element record the derive is applied to
//!
//! All validation of user input happens here, so the generators in the other
//! modules can assume a well-formed record: named fields, no generics, at
//! least one stored field, and plain path types on nested fields.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Meta, Token, Type, Visibility};

/// The generated types that attributes can be forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoAKind {
    /// `…Vec`
    Vec,
    /// `…Slice<'a>`
    Slice,
    /// `…SliceMut<'a>`
    SliceMut,
    /// `…Ref<'a>`
    Ref,
    /// `…RefMut<'a>`
    RefMut,
}

impl SoAKind {
    fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "Vec" => Some(SoAKind::Vec),
            "Slice" => Some(SoAKind::Slice),
            "SliceMut" => Some(SoAKind::SliceMut),
            "Ref" => Some(SoAKind::Ref),
            "RefMut" => Some(SoAKind::RefMut),
            _ => None,
        }
    }
}

/// Attributes forwarded onto each generated type.
#[derive(Debug, Clone, Default)]
pub struct ForwardedAttrs {
    vec: Vec<Meta>,
    slice: Vec<Meta>,
    slice_mut: Vec<Meta>,
    ref_: Vec<Meta>,
    ref_mut: Vec<Meta>,
}

impl ForwardedAttrs {
    /// Forward `meta` onto the generated type `kind`.
    pub fn push(&mut self, kind: SoAKind, meta: Meta) {
        match kind {
            SoAKind::Vec => self.vec.push(meta),
            SoAKind::Slice => self.slice.push(meta),
            SoAKind::SliceMut => self.slice_mut.push(meta),
            SoAKind::Ref => self.ref_.push(meta),
            SoAKind::RefMut => self.ref_mut.push(meta),
        }
    }

    /// Attributes to emit on the generated type `kind`.
    pub fn get(&self, kind: SoAKind) -> &[Meta] {
        match kind {
            SoAKind::Vec => &self.vec,
            SoAKind::Slice => &self.slice,
            SoAKind::SliceMut => &self.slice_mut,
            SoAKind::Ref => &self.ref_,
            SoAKind::RefMut => &self.ref_mut,
        }
    }

    /// Whether no attribute is forwarded at all.
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
            && self.slice.is_empty()
            && self.slice_mut.is_empty()
            && self.ref_.is_empty()
            && self.ref_mut.is_empty()
    }
}

/// Struct-level configuration from `#[soa_derive(...)]` and
/// `#[soa_attr(...)]`.
#[derive(Debug, Clone, Default)]
pub struct ExtraAttributes {
    /// Whether `Clone` was requested, which enables the record-cloning helpers
    pub derive_clone: bool,

    /// Whether `Deserialize` was requested, which routes deserialization of
    /// the container through a length check
    pub derive_deserialize: bool,

    /// Whether `Ord` was requested, which enables `sort` on exclusive views
    pub derive_ord: bool,

    /// Attributes per generated type
    pub forwarded: ForwardedAttrs,
}

impl ExtraAttributes {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one trait from `#[soa_derive(...)]`.
    ///
    /// `Clone`, `Serialize` and `Deserialize` only make sense on the owning
    /// container and are not forwarded to the views. `Default` is always
    /// provided and is ignored here.
    pub fn add_derive(&mut self, ident: &Ident) -> syn::Result<()> {
        static CONTAINER_ONLY: &[&str] = &["Clone", "Serialize", "Deserialize"];

        if ident == "Copy" {
            return Err(syn::Error::new(
                ident.span(),
                "can not derive Copy for struct of arrays containers",
            ));
        }
        if ident == "Default" {
            return Ok(());
        }

        let derive: Meta = syn::parse_quote!(derive(#ident));
        if !CONTAINER_ONLY.iter().any(|name| ident == name) {
            for kind in [SoAKind::Slice, SoAKind::SliceMut, SoAKind::Ref, SoAKind::RefMut] {
                self.forwarded.push(kind, derive.clone());
            }
        }
        self.forwarded.push(SoAKind::Vec, derive);

        if ident == "Clone" {
            self.derive_clone = true;
        } else if ident == "Deserialize" {
            self.derive_deserialize = true;
        } else if ident == "Ord" {
            self.derive_ord = true;
        }
        Ok(())
    }
}

/// How a field is laid out in the generated types.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// One `Vec<T>` column
    Column,

    /// The generated container of another `StructOfArray` record, named by
    /// the path of the field type
    Nested(syn::Path),

    /// No storage; rebuilt records get `Default::default()`
    Skip,
}

/// One field of the element record.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Field name
    pub ident: Ident,

    /// Field type as written
    pub ty: Type,

    /// Layout in the generated types
    pub kind: FieldKind,

    /// Attributes forwarded with `#[soa_attr(Kind, ...)]`
    pub attrs: ForwardedAttrs,
}

impl FieldInfo {
    /// Whether the field has storage in the generated types.
    pub fn is_stored(&self) -> bool {
        !matches!(self.kind, FieldKind::Skip)
    }

    /// Name of the local variable holding this field's value in generated
    /// code, distinct from any parameter name used there.
    pub fn local(&self) -> Ident {
        format_ident!("__soa_{}", self.ident)
    }

    /// Attributes to put on this field inside the generated type `kind`.
    pub fn forwarded(&self, kind: SoAKind) -> TokenStream {
        let attrs = self.attrs.get(kind);
        quote! { #(#[#attrs])* }
    }
}

/// Representing the struct we are deriving
#[derive(Debug, Clone)]
pub struct Input {
    /// The input struct name
    pub name: Ident,

    /// The struct overall visibility
    pub visibility: Visibility,

    /// All fields, stored or not, in declaration order
    pub fields: Vec<FieldInfo>,

    /// Position in `fields` of the first stored field
    first: usize,

    /// Additional attributes requested with `#[soa_attr(...)]` or
    /// `#[soa_derive(...)]`
    pub attrs: ExtraAttributes,
}

impl Input {
    /// Validate a derive input.
    ///
    /// # Errors
    ///
    /// Returns a spanned error for enums, unions, tuple and unit structs,
    /// generic structs, records without any stored field, and malformed
    /// `soa`, `soa_derive` or `soa_attr` attributes.
    pub fn new(input: DeriveInput) -> syn::Result<Input> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "#[derive(StructOfArray)] does not support generic structs",
            ));
        }

        let named = match input.data {
            Data::Struct(data) => match data.fields {
                Fields::Named(named) => named.named,
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "#[derive(StructOfArray)] only supports structs with named fields",
                    ))
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "#[derive(StructOfArray)] only supports structs",
                ))
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "#[derive(StructOfArray)] only supports structs",
                ))
            }
        };

        let mut fields = Vec::with_capacity(named.len());
        for field in named {
            fields.push(parse_field(field)?);
        }

        let first = fields.iter().position(FieldInfo::is_stored).ok_or_else(|| {
            syn::Error::new(
                input.ident.span(),
                "#[derive(StructOfArray)] requires at least one field that is not #[soa(skip)]",
            )
        })?;

        let mut attrs = ExtraAttributes::new();
        for attr in &input.attrs {
            if attr.path().is_ident("soa_derive") {
                parse_soa_derive(attr, &mut attrs)?;
            } else if attr.path().is_ident("soa_attr") {
                let (kind, meta) = parse_soa_attr(attr)?;
                attrs.forwarded.push(kind, meta);
            }
        }

        Ok(Input {
            name: input.ident,
            visibility: input.vis,
            fields,
            first,
            attrs,
        })
    }

    /// Fields with storage, in declaration order.
    pub fn stored(&self) -> impl Iterator<Item = &FieldInfo> + '_ {
        self.fields.iter().filter(|field| field.is_stored())
    }

    /// Fields marked `#[soa(skip)]`.
    pub fn skipped(&self) -> impl Iterator<Item = &FieldInfo> + '_ {
        self.fields.iter().filter(|field| !field.is_stored())
    }

    /// The field whose length stands for the length of the container.
    pub fn first_stored(&self) -> &FieldInfo {
        &self.fields[self.first]
    }

    /// Names of the stored fields.
    pub fn stored_idents(&self) -> Vec<&Ident> {
        self.stored().map(|field| &field.ident).collect()
    }

    /// Local variable names for the stored fields.
    pub fn stored_locals(&self) -> Vec<Ident> {
        self.stored().map(FieldInfo::local).collect()
    }

    /// Map over the stored fields, calling `nested` with the nested record's
    /// path for `#[soa(nested)]` fields and `column` with the field type
    /// otherwise.
    pub fn map_stored<A, B>(&self, nested: A, column: B) -> Vec<TokenStream>
    where
        A: Fn(&Ident, &syn::Path) -> TokenStream,
        B: Fn(&Ident, &Type) -> TokenStream,
    {
        self.stored()
            .map(|field| match &field.kind {
                FieldKind::Nested(path) => nested(&field.ident, path),
                _ => column(&field.ident, &field.ty),
            })
            .collect()
    }

    /// Expression rebuilding the element record from the stored field
    /// locals, filling skipped fields with their default value.
    pub fn rebuild_record(&self) -> TokenStream {
        let name = &self.name;
        let idents = self.stored_idents();
        let locals = self.stored_locals();
        let skipped = self.skipped().map(|field| &field.ident);
        quote! {
            #name {
                #(#idents: #locals,)*
                #(#skipped: ::std::default::Default::default(),)*
            }
        }
    }

    /// Statement moving the stored fields of `value` into their locals.
    pub fn destructure_record(&self, value: &Ident) -> TokenStream {
        let name = &self.name;
        let idents = self.stored_idents();
        let locals = self.stored_locals();
        quote! {
            let #name { #(#idents: #locals,)* .. } = #value;
        }
    }
}

fn parse_field(field: syn::Field) -> syn::Result<FieldInfo> {
    let span = field.span();
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new(span, "expected a named field"))?;

    let mut kind = FieldKind::Column;
    let mut attrs = ForwardedAttrs::default();

    for attr in &field.attrs {
        if attr.path().is_ident("soa") {
            attr.parse_nested_meta(|meta| {
                if !matches!(kind, FieldKind::Column) {
                    return Err(meta.error("a field can only be one of #[soa(skip)] or #[soa(nested)]"));
                }
                if meta.path.is_ident("skip") {
                    kind = FieldKind::Skip;
                    Ok(())
                } else if meta.path.is_ident("nested") {
                    kind = FieldKind::Nested(nested_path(&field.ty)?);
                    Ok(())
                } else {
                    Err(meta.error("expected #[soa(skip)] or #[soa(nested)]"))
                }
            })?;
        } else if attr.path().is_ident("nested_soa") {
            if !matches!(attr.meta, Meta::Path(_)) {
                return Err(syn::Error::new_spanned(attr, "expected #[nested_soa] without arguments"));
            }
            if !matches!(kind, FieldKind::Column) {
                return Err(syn::Error::new_spanned(
                    attr,
                    "a field can only be one of #[soa(skip)] or #[soa(nested)]",
                ));
            }
            kind = FieldKind::Nested(nested_path(&field.ty)?);
        } else if attr.path().is_ident("soa_attr") {
            let (soa_kind, meta) = parse_soa_attr(attr)?;
            attrs.push(soa_kind, meta);
        }
    }

    if matches!(kind, FieldKind::Skip) && !attrs.is_empty() {
        return Err(syn::Error::new(
            span,
            "#[soa_attr] has no effect on a #[soa(skip)] field",
        ));
    }

    Ok(FieldInfo {
        ident,
        ty: field.ty,
        kind,
        attrs,
    })
}

/// Extract the path of a nested record type, rejecting anything the derive
/// could not append a suffix to.
fn nested_path(ty: &Type) -> syn::Result<syn::Path> {
    let error = || {
        syn::Error::new_spanned(
            ty,
            "#[soa(nested)] requires the field type to be a plain path to a struct deriving StructOfArray",
        )
    };

    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let last = type_path.path.segments.last().ok_or_else(error)?;
            if last.arguments.is_empty() {
                Ok(type_path.path.clone())
            } else {
                Err(error())
            }
        }
        _ => Err(error()),
    }
}

fn parse_soa_derive(attr: &Attribute, attrs: &mut ExtraAttributes) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| match meta.path.get_ident() {
        Some(ident) => attrs.add_derive(ident),
        None => Err(meta.error("expected #[soa_derive(Trait, ...)] with plain trait names")),
    })
}

fn parse_soa_attr(attr: &Attribute) -> syn::Result<(SoAKind, Meta)> {
    let usage = || {
        syn::Error::new_spanned(
            attr,
            "expected #[soa_attr(<Vec|Slice|SliceMut|Ref|RefMut>, <attribute>)]",
        )
    };

    let nested = attr
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .map_err(|_| usage())?;
    if nested.len() != 2 {
        return Err(usage());
    }

    let mut items = nested.into_iter();
    let (soa_type, meta) = match (items.next(), items.next()) {
        (Some(soa_type), Some(meta)) => (soa_type, meta),
        _ => return Err(usage()),
    };

    let kind = soa_type
        .path()
        .get_ident()
        .and_then(SoAKind::from_ident)
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &soa_type,
                "expected one of Vec, Slice, SliceMut, Ref or RefMut",
            )
        })?;

    Ok((kind, meta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn parse(input: DeriveInput) -> syn::Result<Input> {
        Input::new(input)
    }

    #[test]
    fn test_plain_fields() {
        let input = parse(parse_quote! {
            pub struct Particle {
                pub x: f64,
                pub y: f64,
            }
        })
        .unwrap();

        assert_eq!(input.name, "Particle");
        assert_eq!(input.fields.len(), 2);
        assert!(input.fields.iter().all(|f| matches!(f.kind, FieldKind::Column)));
        assert_eq!(input.first_stored().ident, "x");
        assert!(!input.attrs.derive_clone);
    }

    #[test]
    fn test_skip_and_nested() {
        let input = parse(parse_quote! {
            struct Particle {
                #[soa(nested)]
                color: shapes::Color,
                #[soa(skip)]
                cache: Option<u32>,
                mass: f32,
            }
        })
        .unwrap();

        match &input.fields[0].kind {
            FieldKind::Nested(path) => assert_eq!(quote!(#path).to_string(), "shapes :: Color"),
            other => panic!("expected nested, got {:?}", other),
        }
        assert!(matches!(input.fields[1].kind, FieldKind::Skip));
        assert_eq!(input.stored_idents(), vec!["color", "mass"]);
        assert_eq!(input.skipped().count(), 1);
    }

    #[test]
    fn test_nested_soa_alias() {
        let input = parse(parse_quote! {
            struct Particle {
                #[nested_soa]
                color: Color,
                mass: f32,
            }
        })
        .unwrap();
        assert!(matches!(input.fields[0].kind, FieldKind::Nested(_)));

        let err = parse(parse_quote! {
            struct Particle {
                #[soa(skip)]
                #[nested_soa]
                color: Color,
                mass: f32,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only be one of"));

        let err = parse(parse_quote! {
            struct Particle {
                #[nested_soa(deep)]
                color: Color,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("without arguments"));
    }

    #[test]
    fn test_soa_derive_flags() {
        let input = parse(parse_quote! {
            #[soa_derive(Deserialize, PartialEq, Eq, PartialOrd, Ord)]
            struct Point { x: u32 }
        })
        .unwrap();

        assert!(input.attrs.derive_deserialize);
        assert!(input.attrs.derive_ord);
        assert!(!input.attrs.derive_clone);
        assert_eq!(input.attrs.forwarded.get(SoAKind::Ref).len(), 4);
        assert_eq!(input.attrs.forwarded.get(SoAKind::Vec).len(), 5);
    }

    #[test]
    fn test_soa_derive_routes_container_only_traits() {
        let input = parse(parse_quote! {
            #[soa_derive(Debug, Clone, Serialize, Default)]
            struct Point { x: f32 }
        })
        .unwrap();

        assert!(input.attrs.derive_clone);
        assert_eq!(input.attrs.forwarded.get(SoAKind::Vec).len(), 3);
        assert_eq!(input.attrs.forwarded.get(SoAKind::Slice).len(), 1);
        assert_eq!(input.attrs.forwarded.get(SoAKind::RefMut).len(), 1);
    }

    #[test]
    fn test_soa_attr_on_struct_and_field() {
        let input = parse(parse_quote! {
            #[soa_attr(Vec, cfg_attr(test, derive(PartialEq)))]
            struct Point {
                #[soa_attr(Slice, deprecated)]
                x: f32,
            }
        })
        .unwrap();

        assert_eq!(input.attrs.forwarded.get(SoAKind::Vec).len(), 1);
        assert_eq!(input.fields[0].attrs.get(SoAKind::Slice).len(), 1);
        assert!(input.fields[0].attrs.get(SoAKind::Vec).is_empty());
    }

    #[test]
    fn test_rejects_copy() {
        let err = parse(parse_quote! {
            #[soa_derive(Copy)]
            struct Point { x: f32 }
        })
        .unwrap_err();
        assert!(err.to_string().contains("Copy"));
    }

    #[test]
    fn test_rejects_enum_and_tuple_struct() {
        let err = parse(parse_quote! { enum Shape { Circle } }).unwrap_err();
        assert!(err.to_string().contains("only supports structs"));

        let err = parse(parse_quote! { struct Pair(f32, f32); }).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn test_rejects_generics() {
        let err = parse(parse_quote! { struct Wrapper<T> { value: T } }).unwrap_err();
        assert!(err.to_string().contains("generic"));
    }

    #[test]
    fn test_rejects_records_without_storage() {
        let err = parse(parse_quote! { struct Empty {} }).unwrap_err();
        assert!(err.to_string().contains("at least one field"));

        let err = parse(parse_quote! {
            struct AllSkipped {
                #[soa(skip)]
                cache: u32,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("at least one field"));
    }

    #[test]
    fn test_rejects_bad_field_attributes() {
        let err = parse(parse_quote! {
            struct Point {
                #[soa(flatten)]
                x: f32,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("expected #[soa(skip)]"));

        let err = parse(parse_quote! {
            struct Point {
                #[soa(skip, nested)]
                x: Color,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only be one of"));

        let err = parse(parse_quote! {
            struct Point {
                #[soa(nested)]
                x: Vec<Color>,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("plain path"));
    }

    #[test]
    fn test_rejects_bad_soa_attr() {
        let err = parse(parse_quote! {
            #[soa_attr(Array, deprecated)]
            struct Point { x: f32 }
        })
        .unwrap_err();
        assert!(err.to_string().contains("expected one of Vec"));

        let err = parse(parse_quote! {
            #[soa_attr(Vec)]
            struct Point { x: f32 }
        })
        .unwrap_err();
        assert!(err.to_string().contains("expected #[soa_attr"));

        let err = parse(parse_quote! {
            struct Point {
                x: f32,
                #[soa(skip)]
                #[soa_attr(Vec, deprecated)]
                y: f32,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("no effect"));
    }

    #[test]
    fn test_rebuild_record_fills_skipped_fields() {
        let input = parse(parse_quote! {
            struct Point {
                x: f32,
                #[soa(skip)]
                cache: u32,
            }
        })
        .unwrap();

        let rebuilt = input.rebuild_record().to_string();
        assert!(rebuilt.contains("x : __soa_x"));
        assert!(rebuilt.contains("cache : :: std :: default :: Default :: default ()"));
    }
}
