//! Error types for lattice construction and cast resolution.

use crate::TypeName;

/// Error building a [`TypeLattice`](crate::TypeLattice).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LatticeError {
    /// A declaration names a supertype that was never declared.
    #[error("type '{ty}' extends undeclared type '{supertype}'")]
    UnknownSupertype {
        /// The declaring type.
        ty: TypeName,
        /// The missing supertype.
        supertype: TypeName,
    },

    /// The supertype relation contains a cycle.
    #[error("inheritance cycle detected among types: {types:?}")]
    Cycle {
        /// Types that could not be ordered.
        types: Vec<TypeName>,
    },
}

/// Error resolving a cast between wrapper types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    /// The target is not an ancestor or known descendant of the source type.
    #[error("Detected an invalid cast. Cannot cast to type \"{target}\"")]
    InvalidTarget {
        /// Declared type of the wrapper being cast.
        from: TypeName,
        /// Class name of the rejected target.
        target: String,
    },

    /// A downcast was rejected because the handle's runtime type is not a
    /// subtype of the target.
    #[error(
        "Detected an invalid cast. Cannot cast object of runtime type \"{runtime}\" to type \"{target}\""
    )]
    IncompatibleRuntimeType {
        /// Requested downcast target.
        target: TypeName,
        /// Type reported by the foreign runtime.
        runtime: TypeName,
    },
}

impl CastError {
    /// Returns the class name of the rejected target.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::InvalidTarget { target, .. } => target,
            Self::IncompatibleRuntimeType { target, .. } => target.name(),
        }
    }
}
