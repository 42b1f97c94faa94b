//! Conversion between mappable instances and plain mappings.
//!
//! A [`Mapper`] borrows a [`TypeRegistry`] and walks the registered metadata:
//!
//! - [`Mapper::serialize`]: instance → [`Mapping`], recursing into nested
//!   mappable fields and typed arrays; fields without a getter are omitted.
//! - [`Mapper::populate`]: [`Mapping`] → instance, constructing nested
//!   instances through the registry and coercing scalars to their declared
//!   type. Unknown keys, fields without a setter and values that cannot be
//!   coerced are skipped; [`Mapper::populate_with_report`] lists them.
//!
//! The only error is [`IntrospectionError`], raised when a type involved in
//! the conversion is not registered or cannot be resolved. It aborts the
//! whole call.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod de;
mod report;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use de::coerce_to_mapping;
pub use report::{PopulateReport, SkipReason, SkippedField};

use alloc::boxed::Box;
use alloc::string::String;

use serde_json::Value;

use crate::info::{FieldInfo, Typed};
use crate::registry::{self, TypeRegistry};
use crate::{IntrospectionError, Mappable};
use de::Populator;
use report::Recorder;

/// A plain mapping: field name to plain value, in insertion order.
pub type Mapping = serde_json::Map<String, Value>;

// -----------------------------------------------------------------------------
// Mapper

/// Converts mappable instances to and from [`Mapping`]s.
///
/// # Examples
///
/// ```
/// use dto_reflect::{Mapper, derive::Mappable, registry::TypeRegistry};
/// use serde_json::json;
///
/// #[derive(Mappable, Default)]
/// struct Item {
///     id: i64,
///     label: String,
/// }
///
/// #[derive(Mappable, Default)]
/// struct Order {
///     number: String,
///     items: Vec<Item>,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Order>();
/// let mapper = Mapper::new(&registry);
///
/// let mut order = Order::default();
/// let input = json!({
///     "number": 17,
///     "items": [{ "id": "1", "label": "a" }, { "id": 2 }],
///     "note": "ignored",
/// });
/// mapper.populate_value(&mut order, input).unwrap();
///
/// assert_eq!(order.number, "17");
/// assert_eq!(order.items[0].id, 1);
/// assert_eq!(
///     mapper.serialize_value(&order).unwrap(),
///     json!({
///         "number": "17",
///         "items": [{ "id": 1, "label": "a" }, { "id": 2, "label": "" }],
///     }),
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Mapper<'r> {
    registry: &'r TypeRegistry,
}

impl Mapper<'static> {
    /// Returns a mapper over the [global registry](registry::global).
    #[inline]
    pub fn global() -> Self {
        Self::new(registry::global())
    }
}

impl<'r> Mapper<'r> {
    /// Creates a mapper over `registry`.
    #[inline]
    pub const fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry.
    #[inline(always)]
    pub const fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Lists the mappable fields of the instance's type in declaration order.
    pub fn list_fields(&self, object: &dyn Mappable) -> Result<&'static [FieldInfo], IntrospectionError> {
        self.registry.list_fields(object.reflect_type_info().ty())
    }

    /// Lists the mappable fields of `T` in declaration order.
    pub fn list_fields_of<T: Typed>(&self) -> Result<&'static [FieldInfo], IntrospectionError> {
        self.registry.list_fields(T::type_info().ty())
    }

    /// Serializes an instance into a mapping.
    ///
    /// Fields appear in declaration order. Serializing does not modify the
    /// instance, so repeated calls give equal results.
    pub fn serialize(&self, object: &dyn Mappable) -> Result<Mapping, IntrospectionError> {
        ser::serialize(self.registry, object)
    }

    /// Serializes an instance into a [`Value::Object`].
    pub fn serialize_value(&self, object: &dyn Mappable) -> Result<Value, IntrospectionError> {
        self.serialize(object).map(Value::Object)
    }

    /// Populates `target` from `data` and returns it.
    ///
    /// `None` leaves the target untouched and never fails; `Some` of an empty
    /// mapping still requires the type to be registered.
    pub fn populate<'t, T: Mappable>(
        &self,
        target: &'t mut T,
        data: Option<Mapping>,
    ) -> Result<&'t mut T, IntrospectionError> {
        self.populate_dyn(&mut *target, data)?;
        Ok(target)
    }

    /// Populates a type-erased target. See [`populate`](Self::populate).
    pub fn populate_dyn(
        &self,
        target: &mut dyn Mappable,
        data: Option<Mapping>,
    ) -> Result<(), IntrospectionError> {
        match data {
            Some(data) => Populator::new(self.registry, Recorder::silent()).populate(target, data),
            None => Ok(()),
        }
    }

    /// Populates `target` from any plain value.
    ///
    /// `Value::Null` counts as absent data; other values go through
    /// [`coerce_to_mapping`].
    pub fn populate_value<'t, T: Mappable>(
        &self,
        target: &'t mut T,
        data: Value,
    ) -> Result<&'t mut T, IntrospectionError> {
        match data {
            Value::Null => Ok(target),
            data => self.populate(target, Some(coerce_to_mapping(data))),
        }
    }

    /// Populates `target` like [`populate`](Self::populate) and reports every
    /// skipped key.
    ///
    /// ```
    /// use dto_reflect::{Mapper, derive::Mappable, registry::TypeRegistry};
    /// use dto_reflect::mapper::SkipReason;
    /// use serde_json::json;
    ///
    /// #[derive(Mappable, Default)]
    /// struct Point {
    ///     x: i32,
    ///     y: i32,
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register::<Point>();
    ///
    /// let data = json!({ "x": "one", "y": 2, "z": 3 });
    /// let mut point = Point::default();
    /// let report = Mapper::new(&registry)
    ///     .populate_with_report(&mut point, data.as_object().cloned())
    ///     .unwrap();
    ///
    /// assert_eq!(point.y, 2);
    /// assert_eq!(report.paths().collect::<Vec<_>>(), ["x", "z"]);
    /// assert!(matches!(report.skipped()[0].reason, SkipReason::Rejected(_)));
    /// ```
    pub fn populate_with_report<T: Mappable>(
        &self,
        target: &mut T,
        data: Option<Mapping>,
    ) -> Result<PopulateReport, IntrospectionError> {
        let Some(data) = data else {
            return Ok(PopulateReport::default());
        };
        let mut populator = Populator::new(self.registry, Recorder::collecting());
        populator.populate(target, data)?;
        Ok(populator.recorder.finish())
    }

    /// Builds `T::default()` and populates it.
    pub fn from_mapping<T: Mappable + Default>(
        &self,
        data: Option<Mapping>,
    ) -> Result<T, IntrospectionError> {
        let mut value = T::default();
        self.populate(&mut value, data)?;
        Ok(value)
    }

    /// Builds and populates an instance of the registered type named
    /// `type_name` (a short name or a full type path).
    pub fn create(
        &self,
        type_name: &str,
        data: Option<Mapping>,
    ) -> Result<Box<dyn Mappable>, IntrospectionError> {
        let meta = self.registry.resolve_name(type_name)?;
        let mut populator = Populator::new(self.registry, Recorder::silent());
        populator.build(meta, data.unwrap_or_default())
    }
}

// -----------------------------------------------------------------------------
// MappableExt

/// Conversions through the [global registry](registry::global).
///
/// Only auto-registered types (`#[mapper(auto_register)]`) are found there.
pub trait MappableExt: Mappable + Sized {
    /// See [`Mapper::serialize`].
    fn to_mapping(&self) -> Result<Mapping, IntrospectionError> {
        Mapper::global().serialize(self)
    }

    /// See [`Mapper::populate`].
    fn populate_from(&mut self, data: Option<Mapping>) -> Result<&mut Self, IntrospectionError> {
        Mapper::global().populate(self, data)
    }

    /// See [`Mapper::from_mapping`].
    fn from_mapping(data: Option<Mapping>) -> Result<Self, IntrospectionError>
    where
        Self: Default,
    {
        Mapper::global().from_mapping(data)
    }
}

impl<T: Mappable> MappableExt for T {}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use core::any::TypeId;

    use serde_json::{Value, json};

    use super::{Mapper, Mapping, MappableExt, SkipReason};
    use crate::derive::Mappable;
    use crate::info::{TypeInfo, TypeInfoCell, TypePath, Typed};
    use crate::registry::TypeRegistry;
    use crate::value::CoerceError;
    use crate::{IntrospectionError, Mappable};

    #[derive(Mappable, Default, Debug, PartialEq)]
    struct Address {
        city: String,
        zip: Option<String>,
    }

    #[derive(Mappable, Default, Debug, PartialEq)]
    struct Person {
        name: String,
        age: i64,
        address: Address,
        nickname: Option<String>,
    }

    #[derive(Mappable, Default, Debug, PartialEq)]
    struct Item {
        id: i64,
        label: String,
    }

    #[derive(Mappable, Default, Debug)]
    struct Order {
        items: Vec<Item>,
        tags: Vec<String>,
        /// Loose attachments.
        /// @var Item[] in upload order
        attachments: Vec<Box<dyn Mappable>>,
        #[mapper(type_hint = "Address")]
        shipping: Option<Box<dyn Mappable>>,
        untyped: Vec<Box<dyn Mappable>>,
    }

    #[derive(Mappable, Default, Debug)]
    struct Bundle {
        /// @var Missing[]
        payload: Vec<Value>,
    }

    #[derive(Mappable, Default, Debug)]
    struct Account {
        login: String,
        #[mapper(getter = false)]
        password: String,
        #[mapper(setter = false)]
        id: i64,
        #[mapper(rename = "display name")]
        display: String,
        #[mapper(skip)]
        cache: u32,
        pub note: String,
    }

    #[derive(Mappable, Default, Debug)]
    struct Broken {
        #[mapper(type_hint = "Nowhere")]
        target: Option<Box<dyn Mappable>>,
        loose: Option<Box<dyn Mappable>>,
    }

    #[derive(Debug)]
    struct Unregistered;

    impl TypePath for Unregistered {
        fn type_path() -> &'static str {
            "tests::Unregistered"
        }

        fn type_name() -> &'static str {
            "Unregistered"
        }
    }

    impl Typed for Unregistered {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| TypeInfo::new::<Self>(Vec::new()))
        }
    }

    impl Mappable for Unregistered {
        fn reflect_type_info(&self) -> &'static TypeInfo {
            Self::type_info()
        }
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register::<Person>();
        registry.register::<Order>();
        registry.register::<Account>();
        registry.register::<Broken>();
        registry.register::<Bundle>();
        registry
    }

    fn mapping(value: Value) -> Option<Mapping> {
        value.as_object().cloned()
    }

    #[test]
    fn round_trip() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let data = json!({
            "name": "A",
            "age": 30,
            "address": { "city": "X", "zip": null },
            "nickname": "ace",
        });

        let person: Person = mapper.from_mapping(mapping(data.clone())).unwrap();
        assert_eq!(person.address.city, "X");
        assert_eq!(person.nickname.as_deref(), Some("ace"));
        assert_eq!(mapper.serialize_value(&person).unwrap(), data);
    }

    #[test]
    fn serialize_keeps_declaration_order() {
        let registry = registry();
        let person = Person::default();
        let keys: Vec<String> = Mapper::new(&registry)
            .serialize(&person)
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, ["name", "age", "address", "nickname"]);
    }

    #[test]
    fn serialize_is_idempotent() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut person = Person::default();
        mapper
            .populate_value(&mut person, json!({ "name": "B", "address": { "city": "Y" } }))
            .unwrap();

        let first = mapper.serialize(&person).unwrap();
        let second = mapper.serialize(&person).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn absent_data_is_a_no_op() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut person = Person {
            name: "kept".into(),
            ..Person::default()
        };

        mapper.populate(&mut person, None).unwrap();
        mapper.populate_value(&mut person, Value::Null).unwrap();
        assert_eq!(person.name, "kept");

        // Absent data never looks at the registry.
        let mut unregistered = Unregistered;
        let empty = TypeRegistry::new();
        assert!(Mapper::new(&empty).populate(&mut unregistered, None).is_ok());
        assert!(Mapper::new(&empty).populate(&mut person, Some(Mapping::new())).is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut person = Person::default();
        mapper
            .populate_value(&mut person, json!({ "name": "C", "foo": 1, "bar": [1, 2] }))
            .unwrap();
        assert_eq!(
            person,
            Person {
                name: "C".into(),
                ..Person::default()
            }
        );
    }

    #[test]
    fn nested_object_is_built_through_the_registry() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut person = Person::default();
        mapper
            .populate_value(&mut person, json!({ "address": { "city": "X", "zip": 12345 } }))
            .unwrap();

        assert_eq!(
            person.address,
            Address {
                city: "X".into(),
                zip: Some("12345".into()),
            }
        );

        // Scalars and lists are cast to a mapping first.
        mapper
            .populate_value(&mut person, json!({ "address": ["Y"] }))
            .unwrap();
        assert_eq!(person.address, Address::default());
    }

    #[test]
    fn null_handling() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut person = Person {
            age: 7,
            address: Address {
                city: "kept".into(),
                zip: None,
            },
            nickname: Some("old".into()),
            ..Person::default()
        };

        let report = mapper
            .populate_with_report(
                &mut person,
                mapping(json!({ "nickname": null, "address": null, "age": null })),
            )
            .unwrap();

        assert_eq!(person.nickname, None);
        assert_eq!(person.address.city, "kept");
        assert_eq!(person.age, 0);
        assert_eq!(report.skipped().len(), 1);
        assert_eq!(report.skipped()[0].path, "address");
        assert_eq!(
            report.skipped()[0].reason,
            SkipReason::Rejected(CoerceError::Null)
        );
    }

    #[test]
    fn rejected_scalar_keeps_prior_value() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut person = Person {
            age: 41,
            ..Person::default()
        };

        let report = mapper
            .populate_with_report(&mut person, mapping(json!({ "age": "old", "name": 5 })))
            .unwrap();

        assert_eq!(person.age, 41);
        assert_eq!(person.name, "5");
        assert_eq!(
            report.skipped()[0].reason,
            SkipReason::Rejected(CoerceError::NotNumeric("old".into()))
        );
    }

    #[test]
    fn typed_array_both_ways() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut order = Order::default();
        mapper
            .populate_value(
                &mut order,
                json!({ "items": [{ "id": 1, "label": "a" }, { "id": "2" }, { "id": 3.9 }] }),
            )
            .unwrap();

        let ids: Vec<i64> = order.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(order.items[0].label, "a");

        let out = mapper.serialize_value(&order).unwrap();
        assert_eq!(
            out["items"],
            json!([
                { "id": 1, "label": "a" },
                { "id": 2, "label": "" },
                { "id": 3, "label": "" },
            ])
        );
    }

    #[test]
    fn non_array_value_for_typed_array_passes_through() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut order = Order::default();
        let report = mapper
            .populate_with_report(&mut order, mapping(json!({ "items": "nope" })))
            .unwrap();

        assert!(order.items.is_empty());
        assert!(matches!(
            report.skipped()[0].reason,
            SkipReason::Rejected(CoerceError::TypeMismatch { .. })
        ));
    }

    #[cfg(feature = "doc_annotations")]
    #[test]
    fn annotation_names_the_element_type() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut order = Order::default();
        mapper
            .populate_value(&mut order, json!({ "attachments": [{ "id": 5 }, { "id": 6 }] }))
            .unwrap();

        let ids: Vec<i64> = order
            .attachments
            .iter()
            .filter_map(|object| object.downcast_ref::<Item>())
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, [5, 6]);

        let out = mapper.serialize_value(&order).unwrap();
        assert_eq!(
            out["attachments"],
            json!([{ "id": 5, "label": "" }, { "id": 6, "label": "" }])
        );
    }

    #[test]
    fn type_hint_names_the_object_type() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut order = Order::default();
        mapper
            .populate_value(&mut order, json!({ "shipping": { "city": "Y" } }))
            .unwrap();

        let shipping = order.shipping.as_ref().unwrap();
        assert_eq!(shipping.downcast_ref::<Address>().unwrap().city, "Y");
        assert_eq!(
            mapper.serialize_value(&order).unwrap()["shipping"],
            json!({ "city": "Y", "zip": null })
        );
    }

    #[test]
    fn unresolvable_arrays_pass_through() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut order = Order {
            untyped: vec![Box::new(Item { id: 1, label: "x".into() })],
            ..Order::default()
        };
        mapper
            .populate_value(&mut order, json!({ "tags": ["a", 1, true] }))
            .unwrap();

        assert_eq!(order.tags, ["a", "1", "1"]);
        let out = mapper.serialize_value(&order).unwrap();
        assert_eq!(out["tags"], json!(["a", "1", "1"]));
        assert_eq!(out["untyped"], json!([{}]));
    }

    #[test]
    fn unknown_element_type_copies_verbatim() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let payload = json!([1, "a", { "x": 1 }, null]);
        let mut bundle = Bundle::default();
        let report = mapper
            .populate_with_report(&mut bundle, mapping(json!({ "payload": payload.clone() })))
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(Value::Array(bundle.payload.clone()), payload);
        assert_eq!(
            serde_json::to_string(&mapper.serialize_value(&bundle).unwrap()).unwrap(),
            r#"{"payload":[1,"a",{"x":1},null]}"#
        );
    }

    #[test]
    fn missing_accessors() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut account = Account::default();
        let report = mapper
            .populate_with_report(
                &mut account,
                mapping(json!({
                    "login": "u",
                    "password": "p",
                    "id": 9,
                    "display name": "D",
                    "cache": 1,
                    "note": "n",
                })),
            )
            .unwrap();

        assert_eq!(account.password, "p");
        assert_eq!(account.id, 0);
        assert_eq!(account.cache, 0);
        assert_eq!(account.note, "");
        assert_eq!(
            report.skipped().iter().map(|s| (s.path.as_str(), s.reason.clone())).collect::<Vec<_>>(),
            [
                ("id", SkipReason::MissingSetter),
                ("cache", SkipReason::UnknownField),
                ("note", SkipReason::UnknownField),
            ]
        );

        assert_eq!(
            mapper.serialize_value(&account).unwrap(),
            json!({ "login": "u", "id": 0, "display name": "D" })
        );
    }

    #[test]
    fn report_paths() {
        let registry = registry();
        let mapper = Mapper::new(&registry);

        let mut order = Order::default();
        let report = mapper
            .populate_with_report(
                &mut order,
                mapping(json!({ "items": [{ "id": 1 }, { "id": 2, "bogus": true }], "zzz": 1 })),
            )
            .unwrap();
        assert_eq!(report.paths().collect::<Vec<_>>(), ["items[1].bogus", "zzz"]);

        let mut person = Person::default();
        let report = mapper
            .populate_with_report(&mut person, mapping(json!({ "address": { "street": "s" } })))
            .unwrap();
        assert_eq!(report.paths().collect::<Vec<_>>(), ["address.street"]);
    }

    #[test]
    fn introspection_errors_abort() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let mut broken = Broken::default();

        assert_eq!(
            mapper
                .populate_value(&mut broken, json!({ "target": {} }))
                .unwrap_err(),
            IntrospectionError::UnresolvedType {
                name: "Nowhere".into()
            }
        );
        assert!(matches!(
            mapper.populate_value(&mut broken, json!({ "loose": {} })),
            Err(IntrospectionError::UntypedField { field: "loose", .. })
        ));

        // A nested unregistered type fails the whole call.
        let order = Order {
            shipping: Some(Box::new(Unregistered)),
            ..Order::default()
        };
        assert_eq!(
            mapper.serialize(&order).unwrap_err(),
            IntrospectionError::Unregistered {
                type_path: "tests::Unregistered"
            }
        );
    }

    #[test]
    fn list_fields() {
        let registry = registry();
        let mapper = Mapper::new(&registry);
        let fields = mapper.list_fields(&Person::default()).unwrap();

        let names: Vec<_> = fields.iter().map(|field| field.name()).collect();
        let types: Vec<_> = fields.iter().map(|field| field.type_name()).collect();
        assert_eq!(names, ["name", "age", "address", "nickname"]);
        assert_eq!(types, ["string", "int", "Address", "string"]);

        let fields = mapper.list_fields_of::<Account>().unwrap();
        let names: Vec<_> = fields.iter().map(|field| field.name()).collect();
        assert_eq!(names, ["login", "password", "id", "display name"]);

        assert!(Mapper::new(&TypeRegistry::new()).list_fields_of::<Item>().is_err());
    }

    #[test]
    fn create_by_name() {
        let registry = registry();
        let mapper = Mapper::new(&registry);

        let object = mapper.create("Item", mapping(json!({ "id": 4 }))).unwrap();
        assert_eq!(object.downcast_ref::<Item>().unwrap().id, 4);

        let object = mapper.create(Address::type_path(), None).unwrap();
        assert!(object.is::<Address>());

        assert!(mapper.create("Missing", None).is_err());
    }

    #[derive(Mappable, Default, Debug)]
    #[mapper(auto_register)]
    struct Registered {
        value: i32,
        inner: Item,
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register_and_global() {
        let mut registry = TypeRegistry::new();
        assert!(registry.auto_register());
        assert!(registry.contains(TypeId::of::<Registered>()));
        // Dependencies come along.
        assert!(registry.contains(TypeId::of::<Item>()));
        assert!(registry.auto_register());

        let value = Registered::from_mapping(mapping(json!({ "value": "3", "inner": { "id": 8 } })))
            .unwrap();
        assert_eq!(value.value, 3);
        assert_eq!(value.inner.id, 8);
        assert_eq!(
            Value::Object(value.to_mapping().unwrap()),
            json!({ "value": 3, "inner": { "id": 8, "label": "" } })
        );
    }
}
