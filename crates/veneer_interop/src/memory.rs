//! An in-process [`ForeignObject`] backed by a property map.
//!
//! Useful wherever a real foreign runtime is unavailable: tests, demos, or
//! replaying captured object graphs.
//!
//! ```
//! use veneer_interop::memory::MemoryObject;
//! use veneer_interop::{ForeignError, ForeignValue};
//!
//! let handle = MemoryObject::builder("Bearings.LoadedBallBearingResults")
//!     .property("Duration", 3.5)
//!     .read_only("Name", "B1")
//!     .method("Scale", |args| match args {
//!         [ForeignValue::Float(f)] => Ok(ForeignValue::Float(f * 2.0)),
//!         _ => Err(ForeignError::runtime("Scale expects one float")),
//!     })
//!     .build();
//!
//! assert_eq!(handle.get_property("Duration").unwrap(), ForeignValue::Float(3.5));
//! assert!(handle.set_property("Name", "B2".into()).is_err());
//! ```

use crate::handle::{ForeignError, ForeignObject, Handle};
use crate::value::ForeignValue;
use indexmap::IndexMap;
use parking_lot::RwLock;
use veneer_lattice::TypeName;

type Method = Box<dyn Fn(&[ForeignValue]) -> Result<ForeignValue, ForeignError> + Send + Sync>;

struct Property {
    value: ForeignValue,
    writable: bool,
}

/// A foreign object held entirely in memory.
pub struct MemoryObject {
    type_name: TypeName,
    properties: RwLock<IndexMap<String, Property>>,
    methods: IndexMap<String, Method>,
}

impl MemoryObject {
    /// Starts building an object of the given runtime type.
    pub fn builder(type_name: impl Into<TypeName>) -> MemoryObjectBuilder {
        MemoryObjectBuilder {
            type_name: type_name.into(),
            properties: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }
}

impl ForeignObject for MemoryObject {
    fn runtime_type(&self) -> TypeName {
        self.type_name.clone()
    }

    fn get_property(&self, name: &str) -> Result<ForeignValue, ForeignError> {
        self.properties
            .read()
            .get(name)
            .map(|p| p.value.clone())
            .ok_or_else(|| ForeignError::UnknownProperty {
                type_name: self.type_name.clone(),
                property: name.to_string(),
            })
    }

    fn set_property(&self, name: &str, value: ForeignValue) -> Result<(), ForeignError> {
        let mut properties = self.properties.write();
        let Some(property) = properties.get_mut(name) else {
            return Err(ForeignError::UnknownProperty {
                type_name: self.type_name.clone(),
                property: name.to_string(),
            });
        };
        if !property.writable {
            return Err(ForeignError::ReadOnly {
                type_name: self.type_name.clone(),
                property: name.to_string(),
            });
        }
        property.value = value;
        Ok(())
    }

    fn invoke(&self, method: &str, args: &[ForeignValue]) -> Result<ForeignValue, ForeignError> {
        let f = self
            .methods
            .get(method)
            .ok_or_else(|| ForeignError::UnknownMethod {
                type_name: self.type_name.clone(),
                method: method.to_string(),
            })?;
        f(args)
    }
}

/// Builder for [`MemoryObject`].
pub struct MemoryObjectBuilder {
    type_name: TypeName,
    properties: IndexMap<String, Property>,
    methods: IndexMap<String, Method>,
}

impl MemoryObjectBuilder {
    /// Adds a writable property.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<ForeignValue>) -> Self {
        self.properties.insert(
            name.into(),
            Property {
                value: value.into(),
                writable: true,
            },
        );
        self
    }

    /// Adds a read-only property.
    #[must_use]
    pub fn read_only(mut self, name: impl Into<String>, value: impl Into<ForeignValue>) -> Self {
        self.properties.insert(
            name.into(),
            Property {
                value: value.into(),
                writable: false,
            },
        );
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[ForeignValue]) -> Result<ForeignValue, ForeignError> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Box::new(f));
        self
    }

    /// Finishes the object and returns a handle to it.
    #[must_use]
    pub fn build(self) -> Handle {
        Handle::new(MemoryObject {
            type_name: self.type_name,
            properties: RwLock::new(self.properties),
            methods: self.methods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_members_are_reported() {
        let handle = MemoryObject::builder("M.Thing").build();
        assert!(matches!(
            handle.get_property("Missing"),
            Err(ForeignError::UnknownProperty { .. })
        ));
        assert!(matches!(
            handle.set_property("Missing", ForeignValue::Null),
            Err(ForeignError::UnknownProperty { .. })
        ));
        assert!(matches!(
            handle.invoke("Run", &[]),
            Err(ForeignError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn writes_are_visible_through_clones() {
        let handle = MemoryObject::builder("M.Thing").property("Speed", 1.0).build();
        let other = handle.clone();
        handle.set_property("Speed", ForeignValue::Float(4.0)).unwrap();
        assert_eq!(other.get_property("Speed").unwrap(), ForeignValue::Float(4.0));
        assert!(other.same_object(&handle));
        assert_eq!(other.runtime_type().as_str(), "M.Thing");
    }
}
