use std::sync::OnceLock;

use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// Provides the static [`TypeInfo`] of a type.
///
/// The info is built on first access and cached for the process lifetime,
/// usually in a [`TypeInfoCell`].
///
/// Implemented by [`#[derive(Mappable)]`](crate::derive::Mappable).
pub trait Typed: TypePath {
    /// Returns the static [`TypeInfo`].
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// TypeInfoCell

/// Write-once storage for the [`TypeInfo`] of a non-generic type.
///
/// ```
/// use dto_reflect::info::{TypeInfo, TypeInfoCell, TypePath, Typed};
///
/// struct Empty;
///
/// impl TypePath for Empty {
///     fn type_path() -> &'static str { "demo::Empty" }
///     fn type_name() -> &'static str { "Empty" }
/// }
///
/// impl Typed for Empty {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: TypeInfoCell = TypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::new::<Self>(Vec::new()))
///     }
/// }
///
/// assert!(core::ptr::eq(Empty::type_info(), Empty::type_info()));
/// ```
pub struct TypeInfoCell(OnceLock<TypeInfo>);

impl TypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}
