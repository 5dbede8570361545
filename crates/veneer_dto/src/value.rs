//! Conversion of individual field values to and from JSON.

use crate::error::DtoError;
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

/// A type that can be stored in a DTO field.
///
/// Encoding never fails; decoding checks the JSON kind. `#[derive(Dto)]`
/// implements this for the DTO itself so DTOs nest.
pub trait FieldValue: Sized {
    /// Whether `null` is one of this type's own values.
    ///
    /// A [`Field`](crate::Field) already has a null state, so
    /// `#[derive(Dto)]` rejects `Field<T>` when `T` is nullable: its
    /// `Value(null)` would decode as `Field::Null`.
    const NULLABLE: bool = false;

    /// Encodes as JSON.
    fn to_value(&self) -> Value;

    /// Decodes from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DtoError`] if `value` has the wrong kind or range.
    fn from_value(value: Value) -> Result<Self, DtoError>;
}

impl FieldValue for Value {
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self, DtoError> {
        Ok(value)
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, DtoError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(DtoError::mismatch("boolean", &other)),
        }
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, DtoError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(DtoError::mismatch("string", &other)),
        }
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn to_value(&self) -> Value {
                Value::Number(Number::from(*self))
            }

            fn from_value(value: Value) -> Result<Self, DtoError> {
                match value {
                    Value::Number(n) => n
                        .as_i64()
                        .and_then(|v| <$ty>::try_from(v).ok())
                        .ok_or(DtoError::OutOfRange(n)),
                    other => Err(DtoError::mismatch("integer", &other)),
                }
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn to_value(&self) -> Value {
                Value::Number(Number::from(*self))
            }

            fn from_value(value: Value) -> Result<Self, DtoError> {
                match value {
                    Value::Number(n) => n
                        .as_u64()
                        .and_then(|v| <$ty>::try_from(v).ok())
                        .ok_or(DtoError::OutOfRange(n)),
                    other => Err(DtoError::mismatch("integer", &other)),
                }
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

impl FieldValue for f64 {
    /// JSON numbers are finite, so `NaN` and the infinities encode as the
    /// strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
    fn to_value(&self) -> Value {
        match Number::from_f64(*self) {
            Some(n) => Value::Number(n),
            None if self.is_nan() => Value::String(NAN.to_string()),
            None if self.is_sign_positive() => Value::String(INFINITY.to_string()),
            None => Value::String(NEG_INFINITY.to_string()),
        }
    }

    fn from_value(value: Value) -> Result<Self, DtoError> {
        match value {
            Value::Number(n) => n.as_f64().ok_or(DtoError::OutOfRange(n)),
            Value::String(s) => match s.as_str() {
                NAN => Ok(f64::NAN),
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                _ => Err(DtoError::Mismatch {
                    expected: "number",
                    found: "string",
                }),
            },
            other => Err(DtoError::mismatch("number", &other)),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn from_value(value: Value) -> Result<Self, DtoError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, DtoError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_value(item).map_err(|e| e.in_field(i.to_string())))
                .collect(),
            other => Err(DtoError::mismatch("array", &other)),
        }
    }
}

impl FieldValue for Map<String, Value> {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, DtoError> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(DtoError::mismatch("object", &other)),
        }
    }
}

impl<T: FieldValue> FieldValue for IndexMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Object(self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect())
    }

    fn from_value(value: Value) -> Result<Self, DtoError> {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| match T::from_value(v) {
                    Ok(v) => Ok((k, v)),
                    Err(e) => Err(e.in_field(k)),
                })
                .collect(),
            other => Err(DtoError::mismatch("object", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_check_range() {
        assert_eq!(u8::from_value(json!(255)), Ok(255));
        assert!(matches!(u8::from_value(json!(256)), Err(DtoError::OutOfRange(_))));
        assert!(matches!(u32::from_value(json!(-1)), Err(DtoError::OutOfRange(_))));
        assert!(matches!(i64::from_value(json!(1.5)), Err(DtoError::OutOfRange(_))));
    }

    #[test]
    fn option_maps_null() {
        assert_eq!(Option::<bool>::from_value(Value::Null), Ok(None));
        assert_eq!(Some(true).to_value(), json!(true));
    }

    #[test]
    fn vec_error_names_index() {
        let err = Vec::<String>::from_value(json!(["a", 2])).unwrap_err();
        assert_eq!(err.to_string(), "invalid field '1': expected string, found number");
    }

    #[test]
    fn non_finite_floats_survive() {
        assert_eq!(2.5f64.to_value(), json!(2.5));
        assert_eq!(f64::INFINITY.to_value(), json!("Infinity"));
        assert_eq!(f64::NEG_INFINITY.to_value(), json!("-Infinity"));
        assert_eq!(f64::NAN.to_value(), json!("NaN"));

        assert_eq!(f64::from_value(json!("Infinity")), Ok(f64::INFINITY));
        assert_eq!(f64::from_value(json!("-Infinity")), Ok(f64::NEG_INFINITY));
        assert!(f64::from_value(json!("NaN")).is_ok_and(f64::is_nan));
        assert_eq!(
            f64::from_value(json!("1.5")),
            Err(DtoError::Mismatch { expected: "number", found: "string" })
        );
    }

    #[test]
    fn nullable_types_are_marked() {
        let marks = [
            <Option<bool> as FieldValue>::NULLABLE,
            <Value as FieldValue>::NULLABLE,
            <bool as FieldValue>::NULLABLE,
            <Vec<Option<bool>> as FieldValue>::NULLABLE,
        ];
        assert_eq!(marks, [true, true, false, false]);
    }
}
