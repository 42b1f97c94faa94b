use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::type_name;

use serde_json::Value;

use crate::Mappable;
use crate::mapper::Mapping;
use crate::value::CoerceError;

// -----------------------------------------------------------------------------
// FieldRef

/// A borrowed field value, as returned by a getter.
///
/// Nested mappable objects stay type-erased so the serializer can recurse
/// into them through the registry.
#[derive(Debug)]
pub enum FieldRef<'a> {
    Null,
    Plain(Value),
    Object(&'a dyn Mappable),
    List(Vec<FieldRef<'a>>),
}

impl FieldRef<'_> {
    /// Returns `true` for [`FieldRef::Null`] and `Plain(Value::Null)`.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Plain(Value::Null))
    }

    /// Converts to a plain value without consulting the registry.
    ///
    /// Objects render as an empty mapping, the same as an object whose fields
    /// are all hidden.
    pub fn into_plain(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Plain(value) => value,
            Self::Object(_) => Value::Object(Mapping::new()),
            Self::List(items) => Value::Array(items.into_iter().map(Self::into_plain).collect()),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldValue

/// An owned field value, as passed to a setter.
#[derive(Debug)]
pub enum FieldValue {
    Null,
    Plain(Value),
    Object(Box<dyn Mappable>),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Wraps a plain value, mapping `Value::Null` to [`FieldValue::Null`].
    #[inline]
    pub fn from_plain(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            value => Self::Plain(value),
        }
    }

    /// Returns the plain value, or a [`CoerceError::TypeMismatch`] naming
    /// `expected` for objects and lists.
    pub fn into_plain(self, expected: &'static str) -> Result<Value, CoerceError> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Plain(value) => Ok(value),
            Self::Object(_) | Self::List(_) => Err(CoerceError::TypeMismatch { expected }),
        }
    }

    /// Takes the object out if its type is `T`.
    pub fn downcast<T: Mappable>(self) -> Result<T, CoerceError> {
        let expected = type_name::<T>();
        match self {
            Self::Object(object) => object
                .downcast::<T>()
                .map(|boxed| *boxed)
                .ok_or(CoerceError::TypeMismatch { expected }),
            Self::Null => Err(CoerceError::Null),
            _ => Err(CoerceError::TypeMismatch { expected }),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use serde_json::{Value, json};

    use super::{FieldRef, FieldValue};
    use crate::value::CoerceError;

    #[test]
    fn null_refs() {
        assert!(FieldRef::Null.is_null());
        assert!(FieldRef::Plain(Value::Null).is_null());
        assert!(!FieldRef::Plain(json!(0)).is_null());
        assert!(!FieldRef::List(vec![]).is_null());
    }

    #[test]
    fn plain_conversions() {
        let list = FieldRef::List(vec![FieldRef::Null, FieldRef::Plain(json!("a"))]);
        assert_eq!(list.into_plain(), json!([null, "a"]));

        assert!(matches!(FieldValue::from_plain(Value::Null), FieldValue::Null));
        assert_eq!(
            FieldValue::List(vec![]).into_plain("string"),
            Err(CoerceError::TypeMismatch { expected: "string" })
        );
    }
}
