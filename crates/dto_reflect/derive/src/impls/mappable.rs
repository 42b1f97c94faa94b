use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::MappableStruct;

/// Generate implementation code for `Mappable`.
pub(crate) fn impl_mappable(data: &MappableStruct) -> TokenStream {
    let dto_reflect_path = data.dto_reflect_path();
    let mappable_ = crate::path::mappable_(dto_reflect_path);
    let info_ = crate::path::info_(dto_reflect_path);
    let ident = data.ident();

    quote! {
        impl #mappable_ for #ident {
            #[inline]
            fn reflect_type_info(&self) -> &'static #info_::TypeInfo {
                <Self as #info_::Typed>::type_info()
            }
        }
    }
}

/// Generate implementation code for `FieldType`, so the type can be nested
/// in other mappable types.
pub(crate) fn impl_field_type(data: &MappableStruct) -> TokenStream {
    let dto_reflect_path = data.dto_reflect_path();
    let info_ = crate::path::info_(dto_reflect_path);
    let value_ = crate::path::value_(dto_reflect_path);
    let registry_ = crate::path::registry_(dto_reflect_path);
    let option_ = crate::path::option_();
    let result_ = crate::path::result_();
    let ident = data.ident();

    quote! {
        impl #value_::FieldType for #ident {
            #[inline]
            fn declared_type() -> #info_::DeclaredType {
                #info_::DeclaredType::Object(#option_::Some(#info_::Type::of::<Self>()))
            }

            #[inline]
            fn to_field_ref(&self) -> #value_::FieldRef<'_> {
                #value_::FieldRef::Object(self)
            }

            #[inline]
            fn from_field_value(
                value: #value_::FieldValue,
            ) -> #result_<Self, #value_::CoerceError> {
                value.downcast::<Self>()
            }

            #[inline]
            fn register_dependencies(registry: &mut #registry_::TypeRegistry) {
                registry.register::<Self>();
            }
        }
    }
}
