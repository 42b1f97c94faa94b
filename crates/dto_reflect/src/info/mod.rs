//! Static type information of mappable types.
//!
//! ## Menu
//!
//! - [`TypePath`]: static type path and short name of a type.
//! - [`Type`]: `TypeId` plus the names from [`TypePath`].
//! - [`Typed`]: provides the static [`TypeInfo`] of a type.
//! - [`TypeInfo`]: the field table of a mappable type.
//! - [`FieldInfo`]: descriptor of one field: name, declared type, annotation.
//! - [`DeclaredType`]: scalar, nested object, or array.
//! - [`element_type_in`]: reads `@var Name[]` out of an annotation.

// -----------------------------------------------------------------------------
// Modules

mod annotation;
mod field_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use annotation::element_type_in;
pub use field_info::{DeclaredType, FieldInfo};
pub use type_info::TypeInfo;
pub use type_path::{Type, TypePath};
pub use typed::{TypeInfoCell, Typed};
