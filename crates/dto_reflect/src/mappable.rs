use alloc::boxed::Box;
use core::any::Any;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Mappable

/// A data-transfer type that can be converted to and from a plain mapping.
///
/// Implemented by [`#[derive(Mappable)]`](crate::derive::Mappable), which also
/// implements [`Typed`](crate::info::Typed),
/// [`GetTypeMeta`](crate::registry::GetTypeMeta) and
/// [`FieldType`](crate::value::FieldType) for the type.
///
/// The trait itself only gives type-erased access; conversions are driven by
/// the [`TypeMeta`](crate::registry::TypeMeta) registered for the type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Mappable`",
    note = "consider annotating `{Self}` with `#[derive(Mappable)]`"
)]
pub trait Mappable: Any {
    /// Returns the static [`TypeInfo`] of the underlying type.
    fn reflect_type_info(&self) -> &'static TypeInfo;

    /// Returns the type path of the underlying type.
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        self.reflect_type_info().type_path()
    }
}

impl dyn Mappable {
    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: Mappable>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    /// Downcasts to a reference of the underlying type.
    #[inline]
    pub fn downcast_ref<T: Mappable>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    /// Downcasts to a mutable reference of the underlying type.
    #[inline]
    pub fn downcast_mut<T: Mappable>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }

    /// Downcasts a boxed value, or returns `None` if the type does not match.
    #[inline]
    pub fn downcast<T: Mappable>(self: Box<Self>) -> Option<Box<T>> {
        let any: Box<dyn Any> = self;
        any.downcast().ok()
    }
}

impl core::fmt::Debug for dyn Mappable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "dyn Mappable<{}>", self.reflect_type_path())
    }
}
