use alloc::string::ToString;

use serde_json::Value;

use crate::info::DeclaredType;
use crate::mapper::{Mapping, array};
use crate::registry::TypeRegistry;
use crate::value::FieldRef;
use crate::{IntrospectionError, Mappable};

/// Serializes `object` field by field in declaration order.
///
/// Fields without a getter are left out. Nested mappable objects are
/// serialized recursively, array fields go through the typed-array expansion.
pub(crate) fn serialize(
    registry: &TypeRegistry,
    object: &dyn Mappable,
) -> Result<Mapping, IntrospectionError> {
    let ty = object.reflect_type_info().ty();
    let meta = registry
        .get(ty.id())
        .ok_or(IntrospectionError::Unregistered {
            type_path: ty.path(),
        })?;

    let mut mapping = Mapping::new();
    for field in meta.fields() {
        let Some(getter) = meta.accessors().getter_for(field.name()) else {
            log::debug!("`{}::{}` has no getter, omitted", ty.name(), field.name());
            continue;
        };
        let Some(value) = getter(object) else {
            log::debug!("getter of `{}::{}` rejected the instance", ty.name(), field.name());
            continue;
        };

        let value = match (field.declared(), value) {
            (DeclaredType::Object(_), FieldRef::Object(nested)) => {
                log::trace!("serializing nested `{}`", nested.reflect_type_path());
                Value::Object(serialize(registry, nested)?)
            }
            (DeclaredType::Array(_), value) => array::expand_outbound(registry, field, value)?,
            (_, value) => value.into_plain(),
        };
        mapping.insert(field.name().to_string(), value);
    }
    Ok(mapping)
}
