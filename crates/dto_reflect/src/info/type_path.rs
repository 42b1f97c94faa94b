use core::any::TypeId;
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// Static names of a type.
///
/// `type_path` is the full path (`my_crate::dto::Person`), `type_name` the
/// short name (`Person`) used when a type is looked up by name, for example
/// from a `type_hint` attribute or a `@var Person[]` annotation.
///
/// Implemented by [`#[derive(Mappable)]`](crate::derive::Mappable).
pub trait TypePath: 'static {
    /// Returns the full path of the type.
    fn type_path() -> &'static str;

    /// Returns the short name of the type.
    fn type_name() -> &'static str;

    /// Returns the module path of the type, if any.
    #[inline]
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// Type

/// The [`TypeId`] and names of a type.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: TypePath>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path(),
            name: T::type_name(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the short type name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this is the type `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}
