use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;

use dto_utils::hash::HashMap;

use crate::info::{FieldInfo, Type, TypePath};

/// The field table of a mappable type.
///
/// Fields keep their declaration order; lookup by name is O(1).
///
/// # Examples
///
/// ```rust
/// use dto_reflect::{derive::Mappable, info::Typed};
///
/// #[derive(Mappable, Default)]
/// struct Item {
///     id: i64,
///     label: String,
/// }
///
/// let info = Item::type_info();
///
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.field("label").unwrap().type_name(), "string");
/// assert_eq!(info.type_name(), "Item");
/// ```
#[derive(Clone, Debug)]
pub struct TypeInfo {
    ty: Type,
    fields: Box<[FieldInfo]>,
    field_indices: HashMap<&'static str, usize>,
}

impl TypeInfo {
    /// Creates the info of `T` from its fields in declaration order.
    pub fn new<T: TypePath>(fields: impl IntoIterator<Item = FieldInfo>) -> Self {
        let fields: Vec<FieldInfo> = fields.into_iter().collect();
        let field_indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            fields: fields.into_boxed_slice(),
            field_indices,
        }
    }

    /// Returns the [`Type`].
    #[inline(always)]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    /// Returns the full type path.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the short type name.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the field with the given name, if present.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.field_indices.get(name).map(|&index| &self.fields[index])
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
