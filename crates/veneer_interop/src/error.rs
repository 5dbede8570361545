//! Error types for wrapper construction, casting and marshalling.

use crate::handle::ForeignError;
use crate::value::ValueKind;
use veneer_lattice::{CastError, LatticeError, TypeName};

/// Errors raised while constructing, casting or reading through wrappers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InteropError {
    /// The foreign runtime reported a type with no registered wrapper.
    #[error("no wrapper registered for foreign type '{0}'")]
    MissingWrapperType(TypeName),

    /// A cast was rejected.
    #[error(transparent)]
    Cast(#[from] CastError),

    /// The foreign runtime reported an error.
    #[error(transparent)]
    Foreign(#[from] ForeignError),

    /// A foreign value did not have the kind the accessor expects.
    #[error("'{member}' returned {found}, expected {expected}")]
    TypeMismatch {
        /// Property or method name.
        member: String,
        /// Kind the accessor expects.
        expected: ValueKind,
        /// Kind the runtime returned.
        found: ValueKind,
    },

    /// A foreign enum value belongs to a different enum type.
    #[error("'{member}' returned a member of '{found}', expected '{expected}'")]
    EnumTypeMismatch {
        /// Property or method name.
        member: String,
        /// Enum type the accessor expects.
        expected: TypeName,
        /// Enum type the runtime returned.
        found: TypeName,
    },

    /// A foreign enum member has no local counterpart.
    #[error("enum '{enum_type}' has no member '{value}'")]
    UnknownEnumMember {
        /// Enum type.
        enum_type: TypeName,
        /// Unrecognized member name.
        value: String,
    },
}

impl InteropError {
    pub(crate) fn mismatch(member: &str, expected: ValueKind, found: ValueKind) -> Self {
        Self::TypeMismatch {
            member: member.to_string(),
            expected,
            found,
        }
    }
}

/// Errors raised while freezing a [`BindingsBuilder`](crate::BindingsBuilder).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingsError {
    /// The declared type hierarchy is invalid.
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// A module depends on a module that was never added.
    #[error("module '{module}' requires '{dependency}' which was not added")]
    MissingDependency {
        /// Module declaring the dependency.
        module: String,
        /// Missing dependency.
        dependency: &'static str,
    },

    /// Module dependencies form a cycle.
    #[error("circular dependency detected among modules: {modules:?}")]
    DependencyCycle {
        /// Modules that could not be ordered.
        modules: Vec<String>,
    },
}
