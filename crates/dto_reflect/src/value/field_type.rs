use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use serde_json::Value;

use crate::Mappable;
use crate::info::DeclaredType;
use crate::registry::TypeRegistry;
use crate::value::{CoerceError, FieldRef, FieldValue, ScalarKind};

// -----------------------------------------------------------------------------
// FieldType

/// A Rust type that can be the type of a mappable field.
///
/// Implemented for the scalar types, `serde_json::Value`, `Option<T>`,
/// `Vec<T>`, `Box<dyn Mappable>`, and by
/// [`#[derive(Mappable)]`](crate::derive::Mappable) for every derived type.
pub trait FieldType: Sized + 'static {
    /// Returns the declared type of the field.
    fn declared_type() -> DeclaredType;

    /// Borrows the value for serialization.
    fn to_field_ref(&self) -> FieldRef<'_>;

    /// Converts an incoming value to `Self`.
    ///
    /// Scalars are coerced again here, so elements of a pass-through array
    /// still end up with the element type.
    fn from_field_value(value: FieldValue) -> Result<Self, CoerceError>;

    /// Registers the mappable types this type refers to.
    #[inline]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

// -----------------------------------------------------------------------------
// Scalars

impl FieldType for bool {
    fn declared_type() -> DeclaredType {
        DeclaredType::Scalar(ScalarKind::Bool)
    }

    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Plain(Value::Bool(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, CoerceError> {
        match ScalarKind::Bool.coerce(value.into_plain("bool")?)? {
            Value::Bool(b) => Ok(b),
            _ => Err(CoerceError::TypeMismatch { expected: "bool" }),
        }
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldType for $ty {
            fn declared_type() -> DeclaredType {
                DeclaredType::Scalar(ScalarKind::Int)
            }

            fn to_field_ref(&self) -> FieldRef<'_> {
                FieldRef::Plain(Value::from(*self))
            }

            fn from_field_value(value: FieldValue) -> Result<Self, CoerceError> {
                let number = ScalarKind::Int.coerce(value.into_plain("int")?)?;
                let out_of_range = || CoerceError::OutOfRange {
                    value: number.to_string(),
                    target: stringify!($ty),
                };
                if let Some(i) = number.as_i64() {
                    <$ty>::try_from(i).map_err(|_| out_of_range())
                } else if let Some(u) = number.as_u64() {
                    <$ty>::try_from(u).map_err(|_| out_of_range())
                } else {
                    Err(CoerceError::TypeMismatch { expected: "int" })
                }
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FieldType for f64 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Scalar(ScalarKind::Float)
    }

    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Plain(Value::from(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, CoerceError> {
        ScalarKind::Float
            .coerce(value.into_plain("float")?)?
            .as_f64()
            .ok_or(CoerceError::TypeMismatch { expected: "float" })
    }
}

impl FieldType for f32 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Scalar(ScalarKind::Float)
    }

    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Plain(Value::from(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, CoerceError> {
        let wide = f64::from_field_value(value)?;
        let narrow = wide as f32;
        if narrow.is_finite() {
            Ok(narrow)
        } else {
            Err(CoerceError::OutOfRange {
                value: wide.to_string(),
                target: "f32",
            })
        }
    }
}

impl FieldType for String {
    fn declared_type() -> DeclaredType {
        DeclaredType::Scalar(ScalarKind::String)
    }

    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Plain(Value::String(self.clone()))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, CoerceError> {
        match ScalarKind::String.coerce(value.into_plain("string")?)? {
            Value::String(s) => Ok(s),
            _ => Err(CoerceError::TypeMismatch { expected: "string" }),
        }
    }
}

impl FieldType for Value {
    fn declared_type() -> DeclaredType {
        DeclaredType::Scalar(ScalarKind::Mixed)
    }

    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Plain(self.clone())
    }

    fn from_field_value(value: FieldValue) -> Result<Self, CoerceError> {
        value.into_plain("mixed")
    }
}

// -----------------------------------------------------------------------------
// Wrappers

impl<T: FieldType> FieldType for Option<T> {
    #[inline]
    fn declared_type() -> DeclaredType {
        T::declared_type()
    }

    fn to_field_ref(&self) -> FieldRef<'_> {
        match self {
            Some(value) => value.to_field_ref(),
            None => FieldRef::Null,
        }
    }

    fn from_field_value(value: FieldValue) -> Result<Self, CoerceError> {
        match value {
            FieldValue::Null | FieldValue::Plain(Value::Null) => Ok(None),
            value => T::from_field_value(value).map(Some),
        }
    }

    #[inline]
    fn register_dependencies(registry: &mut TypeRegistry) {
        T::register_dependencies(registry);
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn declared_type() -> DeclaredType {
        match T::declared_type() {
            DeclaredType::Object(Some(ty)) => DeclaredType::Array(Some(ty)),
            _ => DeclaredType::Array(None),
        }
    }

    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::List(self.iter().map(T::to_field_ref).collect())
    }

    fn from_field_value(value: FieldValue) -> Result<Self, CoerceError> {
        let from_plain = |item| T::from_field_value(FieldValue::from_plain(item));
        match value {
            FieldValue::Null | FieldValue::Plain(Value::Null) => Ok(Vec::new()),
            FieldValue::List(items) => items.into_iter().map(T::from_field_value).collect(),
            FieldValue::Plain(Value::Array(items)) => items.into_iter().map(from_plain).collect(),
            FieldValue::Plain(Value::Object(map)) => {
                map.into_iter().map(|(_, item)| from_plain(item)).collect()
            }
            single => T::from_field_value(single).map(|item| vec![item]),
        }
    }

    #[inline]
    fn register_dependencies(registry: &mut TypeRegistry) {
        T::register_dependencies(registry);
    }
}

impl FieldType for Box<dyn Mappable> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Object(None)
    }

    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Object(self.as_ref())
    }

    fn from_field_value(value: FieldValue) -> Result<Self, CoerceError> {
        match value {
            FieldValue::Object(object) => Ok(object),
            FieldValue::Null => Err(CoerceError::Null),
            _ => Err(CoerceError::TypeMismatch { expected: "object" }),
        }
    }
}
