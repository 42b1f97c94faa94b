use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{MappableField, MappableStruct};

/// Generate implementation code for `Typed`.
///
/// The `TypeInfo` lives in a static cell, built on first access.
pub(crate) fn impl_typed(data: &MappableStruct) -> TokenStream {
    let info_ = crate::path::info_(data.dto_reflect_path());
    let ident = data.ident();

    let field_infos = data
        .fields()
        .iter()
        .map(|field| field_info_tokens(&info_, field));

    quote! {
        impl #info_::Typed for #ident {
            fn type_info() -> &'static #info_::TypeInfo {
                static CELL: #info_::TypeInfoCell = #info_::TypeInfoCell::new();
                CELL.get_or_init(|| {
                    #info_::TypeInfo::new::<Self>([
                        #(#field_infos),*
                    ])
                })
            }
        }
    }
}

/// Returns content similar to this:
///
/// ```ignore
/// FieldInfo::new::<Vec<Box<dyn Mappable>>>("items")
///     .with_type_hint(Some("Item"))
///     .with_annotation(Some("@var Item[]"))
/// ```
fn field_info_tokens(info_: &TokenStream, field: &MappableField) -> TokenStream {
    let option_ = crate::path::option_();
    let ty = field.ty;
    let name = &field.name;

    let type_hint = field.attrs.type_hint.as_ref().map(|hint| {
        quote! { .with_type_hint(#option_::Some(#hint)) }
    });

    #[cfg(feature = "doc_annotations")]
    let annotation = field.attrs.doc_string().map(|doc| {
        quote! { .with_annotation(#option_::Some(#doc)) }
    });
    #[cfg(not(feature = "doc_annotations"))]
    let annotation: Option<TokenStream> = None;

    quote! {
        #info_::FieldInfo::new::<#ty>(#name)
            #type_hint
            #annotation
    }
}
