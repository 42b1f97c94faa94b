//! See following macros:
//!
//! - [`Mappable`](derive_mappable)
//! - [`impl_auto_register`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static MAPPER_ATTRIBUTE_NAME: &str = "mapper";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Mappable Derivation
///
/// `#[derive(Mappable)]` implements the following traits:
///
/// - `TypePath`: the type path is `module_path!()` + `::` + the type name.
/// - `Typed`: a field table with one `FieldInfo` per mappable field.
/// - `Mappable`
/// - `FieldType`: the type can be the type of a field of another mappable type.
/// - `GetTypeMeta`: a getter and a setter per field, stored under the
///   `getFieldName` / `setFieldName` names, and a constructor calling
///   `Default::default`.
///
/// Only non-generic structs with named fields are supported, and the type
/// must implement `Default`.
///
/// ## Which fields are mapped
///
/// Only private fields (no visibility modifier). `pub` and `pub(...)`
/// fields are ignored, and so are fields marked `#[mapper(skip)]`.
/// The type of every mapped field must implement `FieldType`.
///
/// ## Field attributes
///
/// - `#[mapper(skip)]`: leave the field out.
/// - `#[mapper(rename = "name")]`: the key of the field in a mapping. The
///   accessor names are derived from it, and two fields whose names give the
///   same accessor (`foo bar` and `foo_bar`) are a compile error.
/// - `#[mapper(getter = false)]`: generate no getter; the field is left out
///   of serialized mappings.
/// - `#[mapper(setter = false)]`: generate no setter; the key is skipped when
///   populating.
/// - `#[mapper(type_hint = "Name")]`: the type of a `Box<dyn Mappable>` field,
///   or the element type of an array field, as a short name or a full path.
///
/// With the `doc_annotations` feature the doc comment of a field is kept as
/// its annotation. `@var Name[]` in it names the element type of an array
/// field that has no static element type and no type hint.
///
/// ```rust, ignore
/// #[derive(Mappable, Default)]
/// struct Order {
///     number: String,
///     /// @var Item[]
///     lines: Vec<Box<dyn Mappable>>,
///     #[mapper(type_hint = "Address")]
///     shipping: Option<Box<dyn Mappable>>,
///     #[mapper(getter = false)]
///     token: String,
/// }
/// ```
///
/// ## Type attributes
///
/// - `#[mapper(auto_register)]`: collect the type for
///   `TypeRegistry::auto_register`. Requires the `auto_register` feature,
///   ignored otherwise.
#[proc_macro_derive(Mappable, attributes(mapper))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let data = match derive_data::MappableStruct::from_ast(&ast) {
        Ok(data) => data,
        Err(err) => return err.into_compile_error().into(),
    };

    let type_path_impl = impls::impl_type_path(&data);
    let typed_impl = impls::impl_typed(&data);
    let mappable_impl = impls::impl_mappable(&data);
    let field_type_impl = impls::impl_field_type(&data);
    let get_type_meta_impl = impls::impl_get_type_meta(&data);
    let auto_register_impl = impls::impl_auto_register(&data);

    TokenStream::from(quote! {
        const _: () = {
            #type_path_impl

            #typed_impl

            #mappable_impl

            #field_type_impl

            #get_type_meta_impl

            #auto_register_impl
        };
    })
}

/// Add the type to the automatic registry.
///
/// If the feature is not enabled, this macro will not do anything.
///
/// The type must implement `GetTypeMeta`, usually through
/// `#[derive(Mappable)]`.
///
/// ## Example
///
/// ```ignore
/// impl_auto_register!(dto::Person);
/// ```
///
/// This does not conflict with the `mapper(auto_register)` attribute.
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return TokenStream::new();

    #[cfg(feature = "auto_register")]
    {
        let type_path = parse_macro_input!(_input as syn::Type);

        let dto_reflect_path = path::dto_reflect();
        let auto_register_ = path::auto_register_(&dto_reflect_path);

        TokenStream::from(quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#type_path as #auto_register_::__RegisterType>::__register
                    )
                }
            };
        })
    }
}
