use alloc::string::ToString;
use core::any::TypeId;

use dto_utils::TypeIdMap;
use dto_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::IntrospectionError;
use crate::info::{FieldInfo, Type};
use crate::registry::{GetTypeMeta, TypeMeta};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of mappable types.
///
/// The central store of [`TypeMeta`]s. [Registering] a type creates its
/// entry through its [`GetTypeMeta`] implementation (generated by
/// [`#[derive(Mappable)]`](crate::derive::Mappable)) and registers the types
/// its fields refer to.
///
/// Entries are found by [`TypeId`], by full type path, or by short type
/// name. A short name shared by two registered types is ambiguous and no
/// longer resolves.
///
/// # Example
///
/// ```
/// use dto_reflect::{derive::Mappable, registry::TypeRegistry};
///
/// #[derive(Mappable, Default)]
/// struct Item {
///     id: i64,
/// }
///
/// #[derive(Mappable, Default)]
/// struct Order {
///     items: Vec<Item>,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Order>();
///
/// // The element type was registered along with `Order`.
/// let meta = registry.get_with_type_name("Item").unwrap();
/// assert_eq!(meta.fields()[0].name(), "id");
/// ```
///
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = type_meta.ty();
        let type_name = ty.name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                log::warn!(
                    "type name `{type_name}` is ambiguous, `{}` needs its full path",
                    ty.path()
                );
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.path(), ty.id());
    }

    // - If key [`TypeId`] has already exist, the function will do nothing and return `false`.
    // - If the key [`TypeId`] does not exist, the function will insert value and return `true`.
    fn register_internal(
        &mut self,
        type_id: TypeId,
        get_type_meta: impl FnOnce() -> TypeMeta,
    ) -> bool {
        self.type_meta_table.try_insert(type_id, || {
            let meta = get_type_meta();
            Self::add_new_type_indices(
                &meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            meta
        })
    }

    /// Inserts the entry unless its type is already registered.
    ///
    /// Returns `true` if the entry was inserted.
    ///
    /// This method will _not_ register type dependencies.
    /// Use [`register`](Self::register) to register a type with its dependencies.
    #[inline]
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.register_internal(type_meta.type_id(), || type_meta)
    }

    /// Inserts or **overwrites** the entry of a type.
    ///
    /// The path and name indices are only updated for a new type.
    ///
    /// This method will _not_ register type dependencies.
    /// Use [`register`](Self::register) to register a type with its dependencies.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains(&type_meta.type_id()) {
            Self::add_new_type_indices(
                &type_meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
        }
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
    }

    /// Registers `T` if it is not registered yet, then the types it depends
    /// on as given by [`GetTypeMeta::register_dependencies`].
    ///
    /// If `T` is already registered, neither it nor its dependencies are
    /// registered again. Use [`insert_type_meta`](Self::insert_type_meta) to
    /// overwrite an entry.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            T::register_dependencies(self);
        }
    }

    /// Registers every type annotated with `#[mapper(auto_register)]` or
    /// listed in `impl_auto_register!`.
    ///
    /// Equivalent to calling [`register`](Self::register) for each of them.
    /// Repeated calls are cheap and insert nothing twice.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if static registration works on the current platform.
    ///
    /// ## Feature Dependency
    ///
    /// Requires the `auto_register` feature; without it this does nothing
    /// and returns `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use core::any::TypeId;
    /// use dto_reflect::{derive::Mappable, registry::TypeRegistry};
    ///
    /// #[derive(Mappable, Default)]
    /// #[mapper(auto_register)]
    /// struct Foo {
    ///     name: Option<String>,
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// ```
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        use crate::__macro_exports::auto_register;
        // Reduce the cost of duplicate registrations.
        if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
            return true;
        }
        auto_register::__register_types(self);
        self.contains(TypeId::of::<auto_register::__AvailFlag>())
    }

    /// Does nothing: the `auto_register` feature is disabled.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }

    /// Registers the type of the referenced value.
    ///
    /// See [`register`](Self::register).
    #[inline]
    pub fn register_by_val<T: GetTypeMeta>(&mut self, _: &T) {
        self.register::<T>();
    }

    /// Returns `true` if the type is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    /// Returns the entry of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns a mutable reference to the entry of the type.
    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    /// Returns the entry of the type with the given [type path].
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the entry of the type with the given [type name].
    ///
    /// Returns `None` if the name is ambiguous or unknown.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the given [type name] matches several registered types.
    ///
    /// ```
    /// # use dto_reflect::registry::TypeRegistry;
    /// # mod foo {
    /// #     use dto_reflect::derive::Mappable;
    /// #     #[derive(Mappable, Default)]
    /// #     pub struct MyType { id: i32 }
    /// # }
    /// # mod bar {
    /// #     use dto_reflect::derive::Mappable;
    /// #     #[derive(Mappable, Default)]
    /// #     pub struct MyType { id: i32 }
    /// # }
    /// let mut registry = TypeRegistry::new();
    /// registry.register::<foo::MyType>();
    /// registry.register::<bar::MyType>();
    /// assert!(registry.is_ambiguous("MyType"));
    /// assert!(registry.get_with_type_name("MyType").is_none());
    /// ```
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Resolves a type name written in a type hint or an annotation.
    ///
    /// Names containing `::` are full type paths, others are short names.
    pub fn resolve_name(&self, name: &str) -> Result<&TypeMeta, IntrospectionError> {
        let meta = if name.contains("::") {
            self.get_with_type_path(name.trim_start_matches("::"))
        } else {
            self.get_with_type_name(name)
        };
        meta.ok_or_else(|| IntrospectionError::UnresolvedType {
            name: name.to_string(),
        })
    }

    /// Returns the fields of a registered type in declaration order.
    ///
    /// Fails if the type is not registered.
    pub fn list_fields(&self, ty: &Type) -> Result<&'static [FieldInfo], IntrospectionError> {
        match self.get(ty.id()) {
            Some(meta) => Ok(meta.fields()),
            None => Err(IntrospectionError::Unregistered {
                type_path: ty.path(),
            }),
        }
    }

    /// Returns an iterator over the registered entries, in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.type_path_to_id.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use serde_json::json;

    use crate::IntrospectionError;
    use crate::derive::Mappable;
    use crate::info::{TypePath, Typed};
    use crate::mapper::{Mapper, SkipReason};
    use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

    #[derive(Mappable, Default)]
    struct Leaf {
        value: i32,
    }

    #[derive(Mappable, Default)]
    struct Node {
        leaf: Leaf,
        children: Vec<Node>,
        parent: Option<Box<dyn crate::Mappable>>,
    }

    mod other {
        use crate::derive::Mappable;

        #[derive(Mappable, Default)]
        pub struct Leaf {
            name: String,
        }
    }

    #[test]
    fn register_with_dependencies() {
        let mut registry = TypeRegistry::new();
        registry.register::<Node>();

        assert!(registry.contains(TypeId::of::<Node>()));
        assert!(registry.contains(TypeId::of::<Leaf>()));
        assert_eq!(registry.len(), 2);

        // Registering again is a no-op.
        registry.register::<Leaf>();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_by_path_and_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<Leaf>();

        let by_path = registry.get_with_type_path(Leaf::type_path()).unwrap();
        let by_name = registry.get_with_type_name("Leaf").unwrap();
        assert_eq!(by_path.type_id(), by_name.type_id());
        assert_eq!(
            registry.resolve_name(&alloc::format!("::{}", Leaf::type_path())).unwrap().type_id(),
            TypeId::of::<Leaf>()
        );
    }

    #[test]
    fn ambiguous_names_need_the_full_path() {
        let mut registry = TypeRegistry::new();
        registry.register::<Leaf>();
        registry.register::<other::Leaf>();

        assert!(registry.is_ambiguous("Leaf"));
        assert!(registry.get_with_type_name("Leaf").is_none());
        assert_eq!(
            registry.resolve_name("Leaf").unwrap_err(),
            IntrospectionError::UnresolvedType {
                name: "Leaf".into()
            }
        );
        assert!(registry.resolve_name(other::Leaf::type_path()).is_ok());
    }

    #[test]
    fn insert_and_try_insert() {
        let mut registry = TypeRegistry::new();
        assert!(registry.try_insert_type_meta(TypeMeta::of::<Leaf>()));
        assert!(!registry.try_insert_type_meta(Leaf::get_type_meta()));
        assert!(registry.get(TypeId::of::<Leaf>()).unwrap().constructor().is_none());

        registry.insert_type_meta(Leaf::get_type_meta());
        let meta = registry.get(TypeId::of::<Leaf>()).unwrap();
        assert!(meta.constructor().is_some());
        assert!(meta.accessors().getter_for("value").is_some());
        assert!(!registry.is_ambiguous("Leaf"));
    }

    #[test]
    fn edit_registered_accessors() {
        let mut registry = TypeRegistry::new();
        registry.register_by_val(&Leaf { value: 1 });

        let meta = registry.get_mut(TypeId::of::<Leaf>()).unwrap();
        assert!(meta.accessors_mut().remove_setter("setValue").is_some());
        assert!(meta.accessors_mut().remove_setter("setValue").is_none());
        assert!(registry.get_mut(TypeId::of::<Node>()).is_none());

        let mapper = Mapper::new(&registry);
        let mut leaf = Leaf { value: 1 };
        let report = mapper
            .populate_with_report(&mut leaf, json!({ "value": 5 }).as_object().cloned())
            .unwrap();
        assert_eq!(leaf.value, 1);
        assert_eq!(
            report.skipped()[0].reason,
            SkipReason::MissingSetter
        );
        assert_eq!(
            mapper.serialize_value(&leaf).unwrap(),
            json!({ "value": 1 })
        );
    }

    #[test]
    fn list_fields() {
        let mut registry = TypeRegistry::new();
        let ty = Node::type_info().ty();
        assert_eq!(
            registry.list_fields(ty).unwrap_err(),
            IntrospectionError::Unregistered {
                type_path: Node::type_path()
            }
        );

        registry.register::<Node>();
        let names: Vec<_> = registry
            .list_fields(ty)
            .unwrap()
            .iter()
            .map(|field| (field.name(), field.type_name()))
            .collect();
        assert_eq!(
            names,
            [("leaf", "Leaf"), ("children", "array"), ("parent", "object")]
        );
    }
}
