use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::MappableStruct;

/// Generate implementation code for `GetTypeMeta`.
///
/// Every field gets a getter and a setter function (unless disabled), which
/// downcast the instance and convert the field through `FieldType`. They are
/// stored in the accessor table under the conventional accessor names.
pub(crate) fn impl_get_type_meta(data: &MappableStruct) -> TokenStream {
    let dto_reflect_path = data.dto_reflect_path();
    let mappable_ = crate::path::mappable_(dto_reflect_path);
    let registry_ = crate::path::registry_(dto_reflect_path);
    let value_ = crate::path::value_(dto_reflect_path);
    let option_ = crate::path::option_();
    let result_ = crate::path::result_();
    let ident = data.ident();
    let type_name = data.type_name();

    let mut accessor_fns = Vec::new();
    let mut with_fields = Vec::new();
    let mut dependencies = Vec::new();

    for (index, field) in data.fields().iter().enumerate() {
        let member = field.member;
        let ty = field.ty;
        let name = &field.name;

        let getter = if field.attrs.getter {
            let getter_ident = format_ident!("__get_{}", index);
            accessor_fns.push(quote! {
                fn #getter_ident(
                    object: &dyn #mappable_,
                ) -> #option_<#value_::FieldRef<'_>> {
                    object
                        .downcast_ref::<#ident>()
                        .map(|this| #value_::FieldType::to_field_ref(&this.#member))
                }
            });
            quote! { #option_::Some(#getter_ident as #registry_::Getter) }
        } else {
            quote! { #option_::None }
        };

        let setter = if field.attrs.setter {
            let setter_ident = format_ident!("__set_{}", index);
            accessor_fns.push(quote! {
                fn #setter_ident(
                    object: &mut dyn #mappable_,
                    value: #value_::FieldValue,
                ) -> #result_<(), #value_::CoerceError> {
                    let this = object
                        .downcast_mut::<#ident>()
                        .ok_or(#value_::CoerceError::TypeMismatch { expected: #type_name })?;
                    this.#member = <#ty as #value_::FieldType>::from_field_value(value)?;
                    #result_::Ok(())
                }
            });
            quote! { #option_::Some(#setter_ident as #registry_::Setter) }
        } else {
            quote! { #option_::None }
        };

        with_fields.push(quote! {
            .with_field(#name, #getter, #setter)
        });
        dependencies.push(quote! {
            <#ty as #value_::FieldType>::register_dependencies(registry);
        });
    }

    quote! {
        impl #registry_::GetTypeMeta for #ident {
            fn get_type_meta() -> #registry_::TypeMeta {
                #(#accessor_fns)*

                let accessors = #registry_::Accessors::new()
                    #(#with_fields)*;

                #registry_::TypeMeta::of::<Self>()
                    .with_accessors(accessors)
                    .with_constructor(#registry_::Constructor::of::<Self>())
            }

            #[allow(unused_variables)]
            fn register_dependencies(registry: &mut #registry_::TypeRegistry) {
                #(#dependencies)*
            }
        }
    }
}
