//! Values crossing the foreign runtime boundary.

use crate::handle::Handle;
use core::fmt;
use veneer_lattice::TypeName;

/// A value read from or written to a foreign object.
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignValue {
    /// No value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
    /// Member of a foreign enum.
    Enum(EnumValue),
    /// Another foreign object.
    Object(Handle),
    /// Ordered collection.
    List(Vec<ForeignValue>),
}

impl ForeignValue {
    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
            Self::Enum(_) => ValueKind::Enum,
            Self::Object(_) => ValueKind::Object,
            Self::List(_) => ValueKind::List,
        }
    }

    /// Returns whether this is [`Null`](Self::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the handle if this is an object.
    #[must_use]
    pub fn as_handle(&self) -> Option<&Handle> {
        match self {
            Self::Object(handle) => Some(handle),
            _ => None,
        }
    }
}

impl From<bool> for ForeignValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ForeignValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ForeignValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ForeignValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for ForeignValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for ForeignValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<Handle> for ForeignValue {
    fn from(value: Handle) -> Self {
        Self::Object(value)
    }
}

impl From<EnumValue> for ForeignValue {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<Vec<ForeignValue>> for ForeignValue {
    fn from(value: Vec<ForeignValue>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<ForeignValue>> From<Option<T>> for ForeignValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Discriminant of a [`ForeignValue`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// [`ForeignValue::Null`]
    Null,
    /// [`ForeignValue::Bool`]
    Bool,
    /// [`ForeignValue::Int`]
    Int,
    /// [`ForeignValue::Float`]
    Float,
    /// [`ForeignValue::Str`]
    Str,
    /// [`ForeignValue::Enum`]
    Enum,
    /// [`ForeignValue::Object`]
    Object,
    /// [`ForeignValue::List`]
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "string",
            Self::Enum => "enum",
            Self::Object => "object",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// A foreign enum member, identified by its enum type and member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    enum_type: TypeName,
    member: String,
}

impl EnumValue {
    /// Creates an enum value.
    pub fn new(enum_type: TypeName, member: impl Into<String>) -> Self {
        Self {
            enum_type,
            member: member.into(),
        }
    }

    /// Qualified name of the enum type.
    #[must_use]
    pub fn enum_type(&self) -> &TypeName {
        &self.enum_type
    }

    /// Member name.
    #[must_use]
    pub fn member(&self) -> &str {
        &self.member
    }
}

/// A plain value that marshals to and from a single [`ForeignValue`].
///
/// Scalar properties never report absence to the caller: a foreign `Null`
/// is read back as [`absent()`](Self::absent).
pub trait Scalar: Sized {
    /// Expected kind, reported on mismatch.
    const KIND: ValueKind;

    /// Converts a non-null foreign value, handing it back on mismatch.
    fn from_foreign(value: ForeignValue) -> Result<Self, ForeignValue>;

    /// Converts into a foreign value.
    fn into_foreign(self) -> ForeignValue;

    /// Value used when the foreign side reports no value.
    fn absent() -> Self;
}

impl Scalar for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_foreign(value: ForeignValue) -> Result<Self, ForeignValue> {
        match value {
            ForeignValue::Float(v) => Ok(v),
            ForeignValue::Int(v) => Ok(v as f64),
            other => Err(other),
        }
    }

    fn into_foreign(self) -> ForeignValue {
        ForeignValue::Float(self)
    }

    fn absent() -> Self {
        0.0
    }
}

impl Scalar for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_foreign(value: ForeignValue) -> Result<Self, ForeignValue> {
        match value {
            ForeignValue::Int(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_foreign(self) -> ForeignValue {
        ForeignValue::Int(self)
    }

    fn absent() -> Self {
        0
    }
}

impl Scalar for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_foreign(value: ForeignValue) -> Result<Self, ForeignValue> {
        match value {
            ForeignValue::Int(v) => i32::try_from(v).map_err(|_| ForeignValue::Int(v)),
            other => Err(other),
        }
    }

    fn into_foreign(self) -> ForeignValue {
        ForeignValue::Int(i64::from(self))
    }

    fn absent() -> Self {
        0
    }
}

impl Scalar for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_foreign(value: ForeignValue) -> Result<Self, ForeignValue> {
        match value {
            ForeignValue::Bool(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_foreign(self) -> ForeignValue {
        ForeignValue::Bool(self)
    }

    fn absent() -> Self {
        false
    }
}

impl Scalar for String {
    const KIND: ValueKind = ValueKind::Str;

    fn from_foreign(value: ForeignValue) -> Result<Self, ForeignValue> {
        match value {
            ForeignValue::Str(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_foreign(self) -> ForeignValue {
        ForeignValue::Str(self)
    }

    fn absent() -> Self {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_is_null() {
        let value: ForeignValue = Option::<f64>::None.into();
        assert!(value.is_null());
        let value: ForeignValue = Some(2.5).into();
        assert_eq!(value, ForeignValue::Float(2.5));
    }

    #[test]
    fn float_accepts_integers() {
        assert_eq!(f64::from_foreign(ForeignValue::Int(3)), Ok(3.0));
    }

    #[test]
    fn i32_rejects_out_of_range() {
        let big = ForeignValue::Int(i64::MAX);
        assert_eq!(i32::from_foreign(big.clone()), Err(big));
    }

    #[test]
    fn mismatch_hands_value_back() {
        let value = ForeignValue::Str("yes".into());
        assert_eq!(bool::from_foreign(value.clone()), Err(value));
    }

    #[test]
    fn kind_display() {
        assert_eq!(ValueKind::Str.to_string(), "string");
        assert_eq!(ForeignValue::List(vec![]).kind(), ValueKind::List);
    }
}
