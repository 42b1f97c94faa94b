use alloc::boxed::Box;
use core::any::TypeId;

use crate::Mappable;
use crate::info::{FieldInfo, Type, TypeInfo, Typed};
use crate::registry::{Accessors, TypeRegistry};

// -----------------------------------------------------------------------------
// Constructor

/// Builds a fresh instance of a registered type.
#[derive(Clone, Copy)]
pub struct Constructor {
    func: fn() -> Box<dyn Mappable>,
}

impl Constructor {
    /// Creates a constructor calling `T::default()`.
    #[inline]
    pub fn of<T: Mappable + Default>() -> Self {
        Self {
            func: || Box::new(T::default()),
        }
    }

    /// Creates a constructor from a function.
    #[inline]
    pub const fn from_fn(func: fn() -> Box<dyn Mappable>) -> Self {
        Self { func }
    }

    /// Builds an instance.
    #[inline]
    pub fn construct(&self) -> Box<dyn Mappable> {
        (self.func)()
    }
}

impl core::fmt::Debug for Constructor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Constructor")
    }
}

// -----------------------------------------------------------------------------
// TypeMeta

/// Registry entry of a mappable type.
///
/// Holds the static [`TypeInfo`], the [`Accessors`] table and, if the type
/// can be instantiated by the mapper, a [`Constructor`].
///
/// Usually generated by [`#[derive(Mappable)]`](crate::derive::Mappable)
/// through [`GetTypeMeta`], but it can be assembled by hand, e.g. to leave
/// out an accessor:
///
/// ```
/// use dto_reflect::derive::Mappable;
/// use dto_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
///
/// #[derive(Mappable, Default)]
/// struct Secret {
///     login: String,
///     password: String,
/// }
///
/// let derived = Secret::get_type_meta();
/// let mut accessors = derived.accessors().clone();
/// accessors.remove_getter("getPassword");
///
/// let meta = TypeMeta::of::<Secret>().with_accessors(accessors);
/// assert!(meta.accessors().getter_for("login").is_some());
/// assert!(meta.accessors().getter_for("password").is_none());
/// assert!(meta.constructor().is_none());
///
/// let mut registry = TypeRegistry::new();
/// registry.insert_type_meta(meta);
/// ```
#[derive(Clone, Debug)]
pub struct TypeMeta {
    ty: &'static Type,
    type_info: &'static TypeInfo,
    accessors: Accessors,
    constructor: Option<Constructor>,
}

impl TypeMeta {
    /// Creates an entry with no accessors and no constructor.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        let type_info = T::type_info();
        Self {
            ty: type_info.ty(),
            type_info,
            accessors: Accessors::new(),
            constructor: None,
        }
    }

    /// Replaces the accessor table.
    #[inline]
    pub fn with_accessors(self, accessors: Accessors) -> Self {
        Self { accessors, ..self }
    }

    /// Sets the constructor.
    #[inline]
    pub fn with_constructor(self, constructor: Constructor) -> Self {
        Self {
            constructor: Some(constructor),
            ..self
        }
    }

    /// Returns the [`Type`].
    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    /// Returns the [`TypeId`].
    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    /// Returns the full type path.
    #[inline(always)]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the short type name.
    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Returns the [`TypeInfo`].
    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &'static [FieldInfo] {
        self.type_info.fields()
    }

    /// Returns the accessor table.
    #[inline(always)]
    pub const fn accessors(&self) -> &Accessors {
        &self.accessors
    }

    /// Returns a mutable reference to the accessor table.
    #[inline(always)]
    pub const fn accessors_mut(&mut self) -> &mut Accessors {
        &mut self.accessors
    }

    /// Returns the constructor, if any.
    #[inline(always)]
    pub const fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Creates the [`TypeMeta`] of a type.
///
/// Implemented by [`#[derive(Mappable)]`](crate::derive::Mappable).
pub trait GetTypeMeta: Typed {
    /// Returns the default [`TypeMeta`] of the type.
    fn get_type_meta() -> TypeMeta;

    /// Registers the types this type depends on: the nested object types and
    /// array element types of its fields.
    ///
    /// Called by [`TypeRegistry::register`] after the type itself is inserted,
    /// so self-referential types terminate.
    #[inline(always)]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
