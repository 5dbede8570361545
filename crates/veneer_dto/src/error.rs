//! Codec errors.

use serde_json::Value;

/// Errors raised while decoding a DTO from a mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DtoError {
    /// A required field was absent from the mapping.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// A field value could not be decoded.
    #[error("invalid field '{field}': {source}")]
    InvalidField {
        /// Field name as it appears in the mapping.
        field: String,
        /// Why decoding failed.
        source: Box<DtoError>,
    },

    /// A value was of the wrong JSON kind.
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// Expected JSON kind.
        expected: &'static str,
        /// Actual JSON kind.
        found: &'static str,
    },

    /// A declared key was written to the additional-properties bag.
    #[error("'{0}' is a declared field and cannot be an additional property")]
    DeclaredKey(String),

    /// A number did not fit the target type.
    #[error("number {0} is out of range")]
    OutOfRange(serde_json::Number),
}

impl DtoError {
    /// Builds a [`Mismatch`](Self::Mismatch) for `found`.
    #[must_use]
    pub fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::Mismatch {
            expected,
            found: json_kind(found),
        }
    }

    /// Attributes this error to `field`.
    #[must_use]
    pub fn in_field(self, field: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            source: Box::new(self),
        }
    }
}

/// Name of a JSON value's kind, for error messages.
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_message_reads_as_path() {
        let err = DtoError::mismatch("boolean", &json!("yes"))
            .in_field("verified")
            .in_field("email");
        assert_eq!(
            err.to_string(),
            "invalid field 'email': invalid field 'verified': expected boolean, found string"
        );
    }
}
