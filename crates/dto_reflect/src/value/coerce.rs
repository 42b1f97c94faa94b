use alloc::string::{String, ToString};
use alloc::format;

use serde_json::{Number, Value};
use thiserror::Error;

// -----------------------------------------------------------------------------
// CoerceError

/// A value could not be converted to the declared type of a field.
///
/// Never returned from a conversion; the field is skipped instead and the
/// error shows up in a [`PopulateReport`](crate::mapper::PopulateReport).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoerceError {
    /// A string that does not parse as a number.
    #[error("`{0}` is not a numeric string")]
    NotNumeric(String),

    /// An array or object where a scalar is required.
    #[error("expected a scalar, found {0}")]
    NotScalar(&'static str),

    /// A number that does not fit the target type.
    #[error("`{value}` is out of range for `{target}`")]
    OutOfRange { value: String, target: &'static str },

    /// A NaN or infinite number.
    #[error("non-finite number cannot be stored as `{0}`")]
    NonFinite(&'static str),

    /// An explicit null for a field that cannot hold one.
    #[error("null is not accepted")]
    Null,

    /// A value of the wrong shape, e.g. a nested object for a scalar field.
    #[error("expected {expected}")]
    TypeMismatch { expected: &'static str },
}

// -----------------------------------------------------------------------------
// ScalarKind

/// The scalar kinds a field can declare.
///
/// [`ScalarKind::coerce`] converts an arbitrary plain value to the kind:
///
/// | from     | `Bool`           | `Int`                  | `Float`        | `String`            |
/// |----------|------------------|------------------------|----------------|---------------------|
/// | null     | `false`          | `0`                    | `0.0`          | `""`                |
/// | bool     | itself           | `0` / `1`              | `0.0` / `1.0`  | `""` / `"1"`        |
/// | number   | `!= 0`           | truncated              | itself         | decimal             |
/// | string   | not `""` / `"0"` | parsed, else rejected  | parsed, else rejected | itself       |
/// | array    | non-empty        | rejected               | rejected       | rejected            |
/// | object   | non-empty        | rejected               | rejected       | rejected            |
///
/// `Mixed` returns every value unchanged.
///
/// # Examples
///
/// ```
/// use dto_reflect::value::ScalarKind;
/// use serde_json::json;
///
/// assert_eq!(ScalarKind::Int.coerce(json!(" 42 ")), Ok(json!(42)));
/// assert_eq!(ScalarKind::Int.coerce(json!(3.9)), Ok(json!(3)));
/// assert_eq!(ScalarKind::Bool.coerce(json!("0")), Ok(json!(false)));
/// assert_eq!(ScalarKind::String.coerce(json!(1.0)), Ok(json!("1")));
/// assert!(ScalarKind::Float.coerce(json!([1])).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    String,
    Mixed,
}

impl ScalarKind {
    /// Returns the declared type name: `bool`, `int`, `float`, `string` or `mixed`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Mixed => "mixed",
        }
    }

    /// Converts `value` to this kind.
    pub fn coerce(self, value: Value) -> Result<Value, CoerceError> {
        match self {
            Self::Bool => Ok(Value::Bool(to_bool(&value))),
            Self::Int => to_int(value).map(Value::Number),
            Self::Float => to_float(value).map(Value::Number),
            Self::String => to_string(value).map(Value::String),
            Self::Mixed => Ok(value),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn to_int(value: Value) -> Result<Number, CoerceError> {
    match value {
        Value::Null => Ok(Number::from(0)),
        Value::Bool(b) => Ok(Number::from(i64::from(b))),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n),
        Value::Number(n) => truncate(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Ok(Number::from(i))
            } else if let Ok(u) = s.parse::<u64>() {
                Ok(Number::from(u))
            } else if let Ok(f) = s.parse::<f64>() {
                truncate(f)
            } else {
                Err(CoerceError::NotNumeric(s.to_string()))
            }
        }
        other => Err(CoerceError::NotScalar(kind_of(&other))),
    }
}

// 2^63 and 2^64 are exact in f64.
const I64_END: f64 = 9_223_372_036_854_775_808.0;
const U64_END: f64 = 18_446_744_073_709_551_616.0;

fn truncate(f: f64) -> Result<Number, CoerceError> {
    if !f.is_finite() {
        return Err(CoerceError::NonFinite("int"));
    }
    let t = f.trunc();
    if (-I64_END..I64_END).contains(&t) {
        Ok(Number::from(t as i64))
    } else if (0.0..U64_END).contains(&t) {
        Ok(Number::from(t as u64))
    } else {
        Err(CoerceError::OutOfRange {
            value: f.to_string(),
            target: "int",
        })
    }
}

fn to_float(value: Value) -> Result<Number, CoerceError> {
    let f = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(b)),
        Value::Number(n) if n.is_f64() => return Ok(n),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<f64>()
                .map_err(|_| CoerceError::NotNumeric(s.to_string()))?
        }
        other => return Err(CoerceError::NotScalar(kind_of(&other))),
    };
    Number::from_f64(f).ok_or(CoerceError::NonFinite("float"))
}

// Integral floats below this magnitude print without a fraction.
const PLAIN_FLOAT_LIMIT: f64 = 1e15;

fn to_string(value: Value) -> Result<String, CoerceError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(true) => Ok(String::from("1")),
        Value::Bool(false) => Ok(String::new()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => {
                if f.fract() == 0.0 && f.abs() < PLAIN_FLOAT_LIMIT {
                    Ok(format!("{}", f as i64))
                } else {
                    Ok(f.to_string())
                }
            }
            _ => Ok(n.to_string()),
        },
        Value::String(s) => Ok(s),
        other => Err(CoerceError::NotScalar(kind_of(&other))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CoerceError, ScalarKind};

    #[test]
    fn to_bool() {
        let kind = ScalarKind::Bool;
        assert_eq!(kind.coerce(json!(null)), Ok(json!(false)));
        assert_eq!(kind.coerce(json!(0)), Ok(json!(false)));
        assert_eq!(kind.coerce(json!(-2)), Ok(json!(true)));
        assert_eq!(kind.coerce(json!(0.0)), Ok(json!(false)));
        assert_eq!(kind.coerce(json!("")), Ok(json!(false)));
        assert_eq!(kind.coerce(json!("0")), Ok(json!(false)));
        assert_eq!(kind.coerce(json!("0.0")), Ok(json!(true)));
        assert_eq!(kind.coerce(json!("false")), Ok(json!(true)));
        assert_eq!(kind.coerce(json!([])), Ok(json!(false)));
        assert_eq!(kind.coerce(json!({ "a": 1 })), Ok(json!(true)));
    }

    #[test]
    fn to_int() {
        let kind = ScalarKind::Int;
        assert_eq!(kind.coerce(json!(null)), Ok(json!(0)));
        assert_eq!(kind.coerce(json!(true)), Ok(json!(1)));
        assert_eq!(kind.coerce(json!(-7)), Ok(json!(-7)));
        assert_eq!(kind.coerce(json!(u64::MAX)), Ok(json!(u64::MAX)));
        assert_eq!(kind.coerce(json!(-3.7)), Ok(json!(-3)));
        assert_eq!(kind.coerce(json!(" 12 ")), Ok(json!(12)));
        assert_eq!(kind.coerce(json!("12.9")), Ok(json!(12)));
        assert_eq!(kind.coerce(json!("1e3")), Ok(json!(1000)));
        assert_eq!(
            kind.coerce(json!("abc")),
            Err(CoerceError::NotNumeric("abc".into()))
        );
        assert_eq!(kind.coerce(json!("")), Err(CoerceError::NotNumeric("".into())));
        assert_eq!(kind.coerce(json!("inf")), Err(CoerceError::NonFinite("int")));
        assert!(matches!(
            kind.coerce(json!(1e30)),
            Err(CoerceError::OutOfRange { target: "int", .. })
        ));
        assert_eq!(kind.coerce(json!([1])), Err(CoerceError::NotScalar("array")));
        assert_eq!(kind.coerce(json!({})), Err(CoerceError::NotScalar("object")));
    }

    #[test]
    fn to_float() {
        let kind = ScalarKind::Float;
        assert_eq!(kind.coerce(json!(null)), Ok(json!(0.0)));
        assert_eq!(kind.coerce(json!(false)), Ok(json!(0.0)));
        assert_eq!(kind.coerce(json!(true)), Ok(json!(1.0)));
        assert_eq!(kind.coerce(json!(2)), Ok(json!(2.0)));
        assert_eq!(kind.coerce(json!(2.5)), Ok(json!(2.5)));
        assert_eq!(kind.coerce(json!(" -0.25")), Ok(json!(-0.25)));
        assert_eq!(kind.coerce(json!("NaN")), Err(CoerceError::NonFinite("float")));
        assert_eq!(
            kind.coerce(json!("x1")),
            Err(CoerceError::NotNumeric("x1".into()))
        );
        assert_eq!(kind.coerce(json!([])), Err(CoerceError::NotScalar("array")));
    }

    #[test]
    fn to_string() {
        let kind = ScalarKind::String;
        assert_eq!(kind.coerce(json!(null)), Ok(json!("")));
        assert_eq!(kind.coerce(json!(true)), Ok(json!("1")));
        assert_eq!(kind.coerce(json!(false)), Ok(json!("")));
        assert_eq!(kind.coerce(json!(-15)), Ok(json!("-15")));
        assert_eq!(kind.coerce(json!(1.0)), Ok(json!("1")));
        assert_eq!(kind.coerce(json!(-0.5)), Ok(json!("-0.5")));
        assert_eq!(kind.coerce(json!("text")), Ok(json!("text")));
        assert_eq!(kind.coerce(json!({})), Err(CoerceError::NotScalar("object")));
    }

    #[test]
    fn mixed_passes_through() {
        let value = json!({ "a": [1, "b", null] });
        assert_eq!(ScalarKind::Mixed.coerce(value.clone()), Ok(value));
    }
}
