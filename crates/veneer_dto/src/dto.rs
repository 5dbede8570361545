//! The DTO codec trait.

use crate::additional::AdditionalProperties;
use crate::error::{DtoError, json_kind};
use serde_json::{Map, Value};

/// A typed record convertible to and from a string-keyed mapping.
///
/// Implemented by `#[derive(Dto)]`. The codec is lossless: keys the type
/// does not declare are captured in its [`AdditionalProperties`] bag on
/// decode and written back on encode, and an unset
/// [`Field`](crate::Field) stays unset across a round trip.
pub trait Dto: Sized {
    /// Declared keys, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Encodes into a new mapping.
    ///
    /// Unset fields are omitted, null fields are written as `null`, and bag
    /// entries follow the declared fields.
    fn to_mapping(&self) -> Map<String, Value>;

    /// Decodes from a mapping, moving undeclared keys into the bag.
    ///
    /// # Errors
    ///
    /// - [`DtoError::MissingField`] if a required field is absent.
    /// - [`DtoError::InvalidField`] if a present value cannot be decoded.
    fn from_mapping(data: Map<String, Value>) -> Result<Self, DtoError>;

    /// Keys captured on decode that the type does not declare.
    fn additional_properties(&self) -> &AdditionalProperties;

    /// Mutable access to the bag. Entries can be edited or removed; new keys
    /// go through [`set_additional`](Self::set_additional).
    fn additional_properties_mut(&mut self) -> &mut AdditionalProperties;

    /// Encodes as a JSON object.
    fn to_json(&self) -> Value {
        Value::Object(self.to_mapping())
    }

    /// Decodes from a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`DtoError::Mismatch`] for non-objects, and otherwise the
    /// errors of [`from_mapping`](Self::from_mapping).
    fn from_json(value: Value) -> Result<Self, DtoError> {
        match value {
            Value::Object(map) => Self::from_mapping(map),
            other => Err(DtoError::Mismatch {
                expected: "object",
                found: json_kind(&other),
            }),
        }
    }

    /// Reads an undeclared key.
    fn get_additional(&self, key: &str) -> Option<&Value> {
        self.additional_properties().get(key)
    }

    /// Writes an undeclared key, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`DtoError::DeclaredKey`] if `key` is one of
    /// [`FIELDS`](Self::FIELDS); set the typed field instead.
    fn set_additional(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, DtoError> {
        let key = key.into();
        if Self::FIELDS.contains(&key.as_str()) {
            tracing::debug!(key = %key, "declared key refused by additional properties");
            return Err(DtoError::DeclaredKey(key));
        }
        Ok(self.additional_properties_mut().insert(key, value))
    }

    /// Removes an undeclared key.
    fn remove_additional(&mut self, key: &str) -> Option<Value> {
        self.additional_properties_mut().remove(key)
    }

    /// Returns whether an undeclared key is present.
    fn contains_additional(&self, key: &str) -> bool {
        self.additional_properties().contains_key(key)
    }
}

/// Appends bag entries after the declared fields.
///
/// Used by derived [`Dto::to_mapping`]. The bag never holds a declared key,
/// so no declared field is overwritten.
pub fn merge_additional(map: &mut Map<String, Value>, additional: &AdditionalProperties) {
    for (key, value) in additional {
        map.entry(key.clone()).or_insert_with(|| value.clone());
    }
}
