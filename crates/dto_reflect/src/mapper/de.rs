use alloc::boxed::Box;
use alloc::string::ToString;

use serde_json::Value;

use crate::info::{DeclaredType, FieldInfo, Type};
use crate::mapper::report::{Recorder, SkipReason};
use crate::mapper::{Mapping, array};
use crate::registry::{TypeMeta, TypeRegistry};
use crate::value::FieldValue;
use crate::{IntrospectionError, Mappable};

/// Converts any plain value to a mapping.
///
/// - object: itself;
/// - null: an empty mapping;
/// - array: keyed by index, `"0"`, `"1"`, ...;
/// - scalar: `{"0": value}`.
///
/// ```
/// use dto_reflect::mapper::coerce_to_mapping;
/// use serde_json::{Value, json};
///
/// let mapping = coerce_to_mapping(json!(["a", "b"]));
/// assert_eq!(Value::Object(mapping), json!({ "0": "a", "1": "b" }));
/// assert!(coerce_to_mapping(Value::Null).is_empty());
/// ```
pub fn coerce_to_mapping(value: Value) -> Mapping {
    match value {
        Value::Object(map) => map,
        Value::Null => Mapping::new(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        scalar => {
            let mut map = Mapping::new();
            map.insert("0".into(), scalar);
            map
        }
    }
}

/// One populate walk over a mapping and its nested values.
pub(crate) struct Populator<'r> {
    pub(crate) registry: &'r TypeRegistry,
    pub(crate) recorder: Recorder,
}

impl<'r> Populator<'r> {
    #[inline]
    pub(crate) const fn new(registry: &'r TypeRegistry, recorder: Recorder) -> Self {
        Self { registry, recorder }
    }

    pub(crate) fn populate(
        &mut self,
        target: &mut dyn Mappable,
        data: Mapping,
    ) -> Result<(), IntrospectionError> {
        let registry = self.registry;
        let ty = target.reflect_type_info().ty();
        let meta = registry
            .get(ty.id())
            .ok_or(IntrospectionError::Unregistered {
                type_path: ty.path(),
            })?;
        let info = meta.type_info();

        for (key, value) in data {
            let Some(field) = info.field(&key) else {
                self.recorder.skip(&key, SkipReason::UnknownField);
                continue;
            };
            let Some(setter) = meta.accessors().setter_for(field.name()) else {
                self.recorder.skip(&key, SkipReason::MissingSetter);
                continue;
            };

            let incoming = match field.declared() {
                DeclaredType::Object(ty) => {
                    let nested = self.resolve_object(meta, field, ty)?;
                    if value.is_null() {
                        FieldValue::Null
                    } else {
                        self.recorder.enter_key(&key);
                        let object = self.build(nested, coerce_to_mapping(value));
                        self.recorder.leave();
                        FieldValue::Object(object?)
                    }
                }
                DeclaredType::Array(_) => {
                    self.recorder.enter_key(&key);
                    let list = array::expand_inbound(self, field, value);
                    self.recorder.leave();
                    list?
                }
                DeclaredType::Scalar(_) if value.is_null() => FieldValue::Null,
                DeclaredType::Scalar(kind) => match kind.coerce(value) {
                    Ok(value) => FieldValue::from_plain(value),
                    Err(err) => {
                        self.recorder.skip(&key, SkipReason::Rejected(err));
                        continue;
                    }
                },
            };

            if let Err(err) = setter(target, incoming) {
                self.recorder.skip(&key, SkipReason::Rejected(err));
            }
        }
        Ok(())
    }

    /// Constructs a fresh instance of `meta`'s type and populates it.
    pub(crate) fn build(
        &mut self,
        meta: &TypeMeta,
        data: Mapping,
    ) -> Result<Box<dyn Mappable>, IntrospectionError> {
        let constructor = meta
            .constructor()
            .ok_or(IntrospectionError::MissingConstructor {
                type_path: meta.type_path(),
            })?;
        log::trace!("populating nested `{}`", meta.type_path());

        let mut object = constructor.construct();
        self.populate(object.as_mut(), data)?;
        Ok(object)
    }

    fn resolve_object(
        &self,
        owner: &TypeMeta,
        field: &FieldInfo,
        ty: Option<Type>,
    ) -> Result<&'r TypeMeta, IntrospectionError> {
        match (ty, field.type_hint()) {
            (Some(ty), _) => self
                .registry
                .get(ty.id())
                .ok_or(IntrospectionError::Unregistered {
                    type_path: ty.path(),
                }),
            (None, Some(name)) => self.registry.resolve_name(name),
            (None, None) => Err(IntrospectionError::UntypedField {
                type_path: owner.type_path(),
                field: field.name(),
            }),
        }
    }
}
