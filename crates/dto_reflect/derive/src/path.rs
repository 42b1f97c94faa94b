//! Paths of the runtime items used by the generated code.
//!
//! Keeping them here means a change to the `dto_reflect` layout only
//! touches this file.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `dto_reflect` crate.
///
/// 1. For crates that depend on `dto_reflect`, `::dto_reflect` is returned.
/// 2. For crates that depend on `dto_mapper`, `::dto_mapper::reflect` is returned.
/// 3. For other situations, `::dto_reflect` is returned, but this may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so the path is computed once per
/// derive and passed around.
pub(crate) fn dto_reflect() -> syn::Path {
    dto_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("dto_reflect"))
}

// -----------------------------------------------------------------------------
// Core

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

// -----------------------------------------------------------------------------
// dto_reflect

#[inline(always)]
pub(crate) fn mappable_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! { #dto_reflect_path::Mappable }
}

#[inline(always)]
pub(crate) fn info_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! { #dto_reflect_path::info }
}

#[inline(always)]
pub(crate) fn registry_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! { #dto_reflect_path::registry }
}

#[inline(always)]
pub(crate) fn value_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! { #dto_reflect_path::value }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! { #dto_reflect_path::__macro_exports::auto_register }
}
