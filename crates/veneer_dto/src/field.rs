//! Three-state optional fields.

/// A DTO field that may be unset, explicitly null, or carry a value.
///
/// `Unset` and `Null` are distinct on the wire: an unset field is omitted
/// from the mapping, a null field is written as `null`.
///
/// ```
/// use veneer_dto::Field;
///
/// let primary: Field<bool> = Field::Unset;
/// assert!(primary.is_unset());
///
/// let name = Field::from_option(Some("ada".to_string()));
/// assert_eq!(name.value().map(String::as_str), Some("ada"));
/// assert!(Field::<i64>::from_option(None).is_null());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// Not provided. Omitted when serialized.
    #[default]
    Unset,
    /// Provided as null.
    Null,
    /// Provided with a value.
    Value(T),
}

impl<T> Field<T> {
    /// `None` becomes [`Null`](Self::Null).
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }

    /// Returns whether the field is unset.
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns whether the field is explicitly null.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns whether the field carries a value.
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns the value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }

    /// Returns the value mutably, if any.
    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }

    /// Converts `&Field<T>` to `Field<&T>`.
    pub const fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Unset => Field::Unset,
            Self::Null => Field::Null,
            Self::Value(v) => Field::Value(v),
        }
    }

    /// Maps the value, keeping `Unset` and `Null`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Unset => Field::Unset,
            Self::Null => Field::Null,
            Self::Value(v) => Field::Value(f(v)),
        }
    }

    /// Drops the unset/null distinction.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }

    /// Returns the value or `default` when unset or null.
    pub fn unwrap_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }

    /// Takes the field out, leaving it unset.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        assert_eq!(Field::<u8>::default(), Field::Unset);
    }

    #[test]
    fn map_keeps_state() {
        assert_eq!(Field::Value(2).map(|v| v * 3), Field::Value(6));
        assert_eq!(Field::<i32>::Null.map(|v| v * 3), Field::Null);
        assert_eq!(Field::<i32>::Unset.map(|v| v * 3), Field::Unset);
    }

    #[test]
    fn take_leaves_unset() {
        let mut f = Field::Value("x");
        assert_eq!(f.take(), Field::Value("x"));
        assert!(f.is_unset());
    }

    #[test]
    fn option_conversions() {
        assert_eq!(Field::from_option(Some(1)), Field::Value(1));
        assert_eq!(Field::<i32>::Null.into_option(), None);
        assert_eq!(Field::<i32>::Unset.unwrap_or(7), 7);
        assert_eq!(Field::from(true), Field::Value(true));
    }
}
