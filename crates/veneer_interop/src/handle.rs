//! Opaque handles to objects owned by a foreign runtime.
//!
//! The foreign runtime is only reachable through the [`ForeignObject`]
//! trait: report a runtime type, read or write a property by name, invoke a
//! method by name. Everything else in this crate is built on top of those
//! four operations.

use crate::value::ForeignValue;
use std::sync::Arc;
use veneer_lattice::TypeName;

/// Errors reported by the foreign runtime itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForeignError {
    /// The object has no property with this name.
    #[error("type '{type_name}' has no property '{property}'")]
    UnknownProperty {
        /// Runtime type of the object.
        type_name: TypeName,
        /// Requested property.
        property: String,
    },

    /// The property exists but cannot be written.
    #[error("property '{property}' of type '{type_name}' is read-only")]
    ReadOnly {
        /// Runtime type of the object.
        type_name: TypeName,
        /// Rejected property.
        property: String,
    },

    /// The object has no method with this name.
    #[error("type '{type_name}' has no method '{method}'")]
    UnknownMethod {
        /// Runtime type of the object.
        type_name: TypeName,
        /// Requested method.
        method: String,
    },

    /// Any other failure raised on the far side of the boundary.
    #[error("foreign runtime error: {0}")]
    Runtime(String),
}

impl ForeignError {
    /// Creates a [`Runtime`](Self::Runtime) error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}

/// An object living in a foreign runtime.
///
/// Implementations own whatever synchronization the runtime needs; all
/// methods take `&self` so a handle can be read from several wrappers at once.
pub trait ForeignObject: Send + Sync + 'static {
    /// Concrete type of the object as reported by the runtime.
    fn runtime_type(&self) -> TypeName;

    /// Reads a property. An absent value is reported as [`ForeignValue::Null`].
    fn get_property(&self, name: &str) -> Result<ForeignValue, ForeignError>;

    /// Writes a property.
    fn set_property(&self, name: &str, value: ForeignValue) -> Result<(), ForeignError>;

    /// Invokes a method with positional arguments.
    fn invoke(&self, method: &str, args: &[ForeignValue]) -> Result<ForeignValue, ForeignError>;
}

/// Shared reference to a [`ForeignObject`].
///
/// Cloning a handle never copies the foreign object; every clone refers to
/// the same object and compares equal to it.
#[derive(Clone)]
pub struct Handle(Arc<dyn ForeignObject>);

impl Handle {
    /// Wraps a foreign object.
    pub fn new(object: impl ForeignObject) -> Self {
        Self(Arc::new(object))
    }

    /// Wraps an already shared foreign object.
    #[must_use]
    pub fn from_arc(object: Arc<dyn ForeignObject>) -> Self {
        Self(object)
    }

    /// Returns whether both handles refer to the same foreign object.
    #[must_use]
    pub fn same_object(&self, other: &Handle) -> bool {
        core::ptr::eq(
            Arc::as_ptr(&self.0).cast::<()>(),
            Arc::as_ptr(&other.0).cast::<()>(),
        )
    }

    /// Concrete type reported by the foreign runtime.
    #[must_use]
    pub fn runtime_type(&self) -> TypeName {
        self.0.runtime_type()
    }

    /// Reads a property of the foreign object.
    pub fn get_property(&self, name: &str) -> Result<ForeignValue, ForeignError> {
        self.0.get_property(name)
    }

    /// Writes a property of the foreign object.
    pub fn set_property(&self, name: &str, value: ForeignValue) -> Result<(), ForeignError> {
        self.0.set_property(name, value)
    }

    /// Invokes a method on the foreign object.
    pub fn invoke(&self, method: &str, args: &[ForeignValue]) -> Result<ForeignValue, ForeignError> {
        self.0.invoke(method, args)
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.same_object(other)
    }
}

impl Eq for Handle {}

impl core::fmt::Debug for Handle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Handle").field(&self.runtime_type()).finish()
    }
}
