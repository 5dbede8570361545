//! Keys a DTO did not declare, kept for lossless round trips.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Ordered bag of undeclared keys captured by
/// [`Dto::from_mapping`](crate::Dto::from_mapping).
///
/// New keys enter only through decoding or
/// [`Dto::set_additional`](crate::Dto::set_additional), which
/// refuses the DTO's declared keys. The bag therefore never holds a key that
/// encodes over a declared field.
///
/// ```
/// use serde_json::json;
/// use veneer_dto::{AdditionalProperties, Dto, Field};
///
/// #[derive(Debug, Clone, PartialEq, Dto)]
/// struct Phone {
///     number: Field<String>,
///     #[dto(additional)]
///     extra: AdditionalProperties,
/// }
///
/// let mut phone = Phone::from_json(json!({"number": "555", "legacy_flag": 1})).unwrap();
/// assert!(phone.extra.contains_key("legacy_flag"));
/// assert_eq!(phone.extra["legacy_flag"], json!(1));
/// assert_eq!(phone.extra.remove("legacy_flag"), Some(json!(1)));
/// assert!(phone.extra.is_empty());
///
/// assert!(phone.set_additional("number", json!("556")).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct AdditionalProperties(IndexMap<String, Value>);

/// Collects the keys left over after the declared fields were taken.
///
/// Used by derived [`Dto::from_mapping`](crate::Dto::from_mapping).
#[must_use]
pub fn undeclared(rest: Map<String, Value>) -> AdditionalProperties {
    AdditionalProperties(rest.into_iter().collect())
}

impl AdditionalProperties {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value for `key` mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Sets `key`, returning the previous value. Callers check `key` against
    /// the declared fields.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes `key`, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl core::ops::Index<&str> for AdditionalProperties {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `key` is absent.
    fn index(&self, key: &str) -> &Value {
        match self.0.get(key) {
            Some(value) => value,
            None => panic!("no additional property '{key}'"),
        }
    }
}

impl<'a> IntoIterator for &'a AdditionalProperties {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AdditionalProperties {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
