#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `dto_reflect`; unit tests and doc tests
// derive `Mappable` from inside the crate, so the alias must also exist here.
extern crate self as dto_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod mappable;

pub mod info;
pub mod mapper;
pub mod naming;
pub mod registry;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use dto_reflect_derive as derive;
pub use error::IntrospectionError;
pub use mappable::Mappable;
pub use mapper::{MappableExt, Mapper, Mapping};
