//! The type registry.
//!
//! ## Menu
//!
//! - [`Accessors`]: the getter/setter table of a type, keyed by accessor name.
//! - [`Constructor`]: builds a default instance of a type.
//! - [`TypeMeta`]: a [`TypeInfo`], an [`Accessors`] table and an optional [`Constructor`].
//! - [`GetTypeMeta`]: creates the `TypeMeta` of a type.
//! - [`TypeRegistry`]: the store of `TypeMeta`s, indexed by `TypeId`, type path and type name.
//! - [`global`]: a process-wide registry filled by `auto_register`.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`].
//!
//! Static registration relies on the [`inventory`] crate, which does not
//! support every platform. Where it is unsupported, `auto_register` returns
//! `false` and registers nothing.
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod accessors;
mod global;
mod type_meta;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use accessors::{Accessors, Getter, Setter};
pub use global::global;
pub use type_meta::{Constructor, GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
