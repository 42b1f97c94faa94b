//! Code generation, one module per generated trait.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod get_type_meta;
mod mappable;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use auto_register::impl_auto_register;
pub(crate) use get_type_meta::impl_get_type_meta;
pub(crate) use mappable::{impl_field_type, impl_mappable};
pub(crate) use type_path::impl_type_path;
pub(crate) use typed::impl_typed;
