use serde_json::Value;

use crate::IntrospectionError;
use crate::info::{DeclaredType, FieldInfo};
use crate::mapper::de::{Populator, coerce_to_mapping};
use crate::mapper::ser;
use crate::registry::{TypeMeta, TypeRegistry};
use crate::value::{FieldRef, FieldValue};

/// Resolves the element type of an array field.
///
/// The static element type wins, then the type hint, then the `@var Name[]`
/// annotation. `None` means the array passes through unchanged.
pub(crate) fn resolve_element<'r>(
    registry: &'r TypeRegistry,
    field: &FieldInfo,
) -> Option<&'r TypeMeta> {
    let meta = match field.declared() {
        DeclaredType::Array(Some(ty)) => registry.get(ty.id()),
        DeclaredType::Array(None) => field
            .element_name()
            .and_then(|name| registry.resolve_name(name).ok()),
        _ => None,
    };
    if meta.is_none() {
        log::trace!("array field `{}` has no resolvable element type", field.name());
    }
    meta
}

/// Builds one element instance per array item.
///
/// Values that are not arrays, and arrays whose element type does not
/// resolve to a constructible type, pass through as they are.
pub(crate) fn expand_inbound(
    populator: &mut Populator<'_>,
    field: &FieldInfo,
    value: Value,
) -> Result<FieldValue, IntrospectionError> {
    let element = match resolve_element(populator.registry, field) {
        Some(meta) if meta.constructor().is_some() => meta,
        _ => return Ok(FieldValue::from_plain(value)),
    };

    let items = match value {
        Value::Array(items) => items,
        other => return Ok(FieldValue::from_plain(other)),
    };

    log::trace!(
        "expanding {} elements of `{}` into `{}`",
        items.len(),
        field.name(),
        element.type_path()
    );
    let mut list = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        populator.recorder.enter_index(index);
        let object = populator.build(element, coerce_to_mapping(item));
        populator.recorder.leave();
        list.push(FieldValue::Object(object?));
    }
    Ok(FieldValue::List(list))
}

/// Serializes every mappable element of the array.
///
/// Without a resolvable element type the value passes through, objects
/// rendering as empty mappings.
pub(crate) fn expand_outbound(
    registry: &TypeRegistry,
    field: &FieldInfo,
    value: FieldRef<'_>,
) -> Result<Value, IntrospectionError> {
    let items = match (resolve_element(registry, field), value) {
        (Some(_), FieldRef::List(items)) => items,
        (_, value) => return Ok(value.into_plain()),
    };

    let mut list = Vec::with_capacity(items.len());
    for item in items {
        list.push(match item {
            FieldRef::Object(object) => Value::Object(ser::serialize(registry, object)?),
            other => other.into_plain(),
        });
    }
    Ok(Value::Array(list))
}
