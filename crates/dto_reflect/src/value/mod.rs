//! Field values and scalar coercion.
//!
//! - [`FieldRef`]: a borrowed field value, produced by getters.
//! - [`FieldValue`]: an owned field value, consumed by setters.
//! - [`FieldType`]: conversion between a Rust field type and the two above.
//! - [`ScalarKind`]: the declared scalar kinds and their coercion table.

// -----------------------------------------------------------------------------
// Modules

mod coerce;
mod field_type;
mod field_value;

// -----------------------------------------------------------------------------
// Exports

pub use coerce::{CoerceError, ScalarKind};
pub use field_type::FieldType;
pub use field_value::{FieldRef, FieldValue};
