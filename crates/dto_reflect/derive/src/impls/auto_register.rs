use proc_macro2::TokenStream;
use quote::quote_spanned;

use crate::derive_data::MappableStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn impl_auto_register(data: &MappableStruct) -> TokenStream {
    let Some(span) = data.attrs().auto_register else {
        return TokenStream::new();
    };

    let auto_register_ = crate::path::auto_register_(data.dto_reflect_path());
    let ident = data.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#ident as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn impl_auto_register(_: &MappableStruct) -> TokenStream {
    TokenStream::new()
}
