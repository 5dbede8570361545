//! Qualified type names reported by a foreign runtime.

use core::fmt;
use std::sync::Arc;

/// Namespace-qualified name of a foreign type.
///
/// The foreign runtime reports every object's concrete type as a namespace
/// plus a simple name (e.g. `SMT.MastaAPI.Bearings.BearingResults` and
/// `LoadedBearingResults`). `TypeName` stores the joined form once and is
/// cheap to clone, since every cast hands a copy to the new wrapper.
///
/// # Example
///
/// ```
/// use veneer_lattice::TypeName;
///
/// let name = TypeName::new("SMT.MastaAPI.Bearings", "BearingDesign");
/// assert_eq!(name.namespace(), "SMT.MastaAPI.Bearings");
/// assert_eq!(name.name(), "BearingDesign");
/// assert_eq!(name.to_string(), "SMT.MastaAPI.Bearings.BearingDesign");
///
/// assert_eq!(TypeName::parse("SMT.MastaAPI.Bearings.BearingDesign"), name);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    qualified: Arc<str>,
    // Byte offset where the simple name starts.
    split: usize,
}

impl TypeName {
    /// Creates a name from a namespace and a simple name.
    ///
    /// An empty namespace produces an unqualified name.
    #[must_use]
    pub fn new(namespace: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        let namespace = namespace.as_ref();
        let name = name.as_ref();

        if namespace.is_empty() {
            return Self {
                qualified: Arc::from(name),
                split: 0,
            };
        }

        let qualified = format!("{namespace}.{name}");
        Self {
            qualified: Arc::from(qualified),
            split: namespace.len() + 1,
        }
    }

    /// Parses a dotted qualified name, splitting at the last `.`.
    #[must_use]
    pub fn parse(qualified: impl AsRef<str>) -> Self {
        let qualified = qualified.as_ref();
        match qualified.rsplit_once('.') {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", qualified),
        }
    }

    /// Returns the namespace, or `""` for unqualified names.
    #[must_use]
    pub fn namespace(&self) -> &str {
        if self.split == 0 {
            ""
        } else {
            &self.qualified[..self.split - 1]
        }
    }

    /// Returns the simple name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.qualified[self.split..]
    }

    /// Returns the fully qualified name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.qualified
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({})", self.qualified)
    }
}

impl From<&str> for TypeName {
    fn from(qualified: &str) -> Self {
        Self::parse(qualified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unqualified_name() {
        let name = TypeName::new("", "Design");
        assert_eq!(name.namespace(), "");
        assert_eq!(name.name(), "Design");
        assert_eq!(name.as_str(), "Design");
    }

    #[test]
    fn parse_without_dot_is_unqualified() {
        let name = TypeName::parse("Design");
        assert_eq!(name, TypeName::new("", "Design"));
    }

    #[test]
    fn parse_splits_at_last_dot() {
        let name = TypeName::parse("SMT.MastaAPI.SystemModel.Design");
        assert_eq!(name.namespace(), "SMT.MastaAPI.SystemModel");
        assert_eq!(name.name(), "Design");
    }

    #[test]
    fn clones_share_storage() {
        let name = TypeName::new("A.B", "C");
        let copy = name.clone();
        assert!(Arc::ptr_eq(&name.qualified, &copy.qualified));
    }

    #[test]
    fn debug_shows_qualified_name() {
        let name = TypeName::new("A", "B");
        assert_eq!(format!("{name:?}"), "TypeName(A.B)");
    }
}
