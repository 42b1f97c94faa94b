//! Parsed form of a `#[derive(Mappable)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod mappable_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use mappable_struct::{MappableField, MappableStruct};
