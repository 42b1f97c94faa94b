use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::MappableStruct;

/// Generate implementation code for `TypePath`.
///
/// The path is the module path of the definition plus the type name.
pub(crate) fn impl_type_path(data: &MappableStruct) -> TokenStream {
    let info_ = crate::path::info_(data.dto_reflect_path());
    let option_ = crate::path::option_();
    let ident = data.ident();
    let type_name = data.type_name();

    quote! {
        impl #info_::TypePath for #ident {
            #[inline]
            fn type_path() -> &'static str {
                ::core::concat!(::core::module_path!(), "::", #type_name)
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> #option_<&'static str> {
                #option_::Some(::core::module_path!())
            }
        }
    }
}
