//! Lookup from foreign type names to wrapper constructors.

use crate::wrapper::{AnyWrapper, Proxy, Wrapper};
use hashbrown::HashMap;
use veneer_lattice::TypeName;

/// Builds a boxed wrapper around a proxy.
pub type Factory = fn(Proxy) -> Box<dyn AnyWrapper>;

fn construct<W: Wrapper>(proxy: Proxy) -> Box<dyn AnyWrapper> {
    Box::new(W::from_proxy(proxy))
}

#[derive(Clone, Copy)]
struct Registration {
    factory: Factory,
    rust_type: &'static str,
}

/// Registered wrapper constructors, keyed by qualified foreign type name.
#[derive(Clone, Default)]
pub struct WrapperRegistry {
    wrappers: HashMap<TypeName, Registration>,
}

impl WrapperRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `W` under [`W::type_name()`](Wrapper::type_name).
    ///
    /// # Panics
    ///
    /// Panics if a wrapper is already registered for the same foreign type.
    pub fn register<W: Wrapper>(&mut self) {
        let type_name = W::type_name();
        let rust_type = core::any::type_name::<W>();
        if let Some(existing) = self.wrappers.get(&type_name) {
            panic!(
                "foreign type '{type_name}' already has wrapper '{}', cannot register '{rust_type}'",
                existing.rust_type
            );
        }
        self.wrappers.insert(
            type_name,
            Registration {
                factory: construct::<W>,
                rust_type,
            },
        );
    }

    /// Returns the constructor for a foreign type.
    #[must_use]
    pub fn factory(&self, type_name: &TypeName) -> Option<Factory> {
        self.wrappers.get(type_name).map(|r| r.factory)
    }

    /// Returns the Rust type name of the wrapper registered for a foreign type.
    #[must_use]
    pub fn rust_type(&self, type_name: &TypeName) -> Option<&'static str> {
        self.wrappers.get(type_name).map(|r| r.rust_type)
    }

    /// Returns whether a wrapper is registered for a foreign type.
    #[must_use]
    pub fn contains(&self, type_name: &TypeName) -> bool {
        self.wrappers.contains_key(type_name)
    }

    /// Registered foreign type names, in no particular order.
    pub fn type_names(&self) -> impl Iterator<Item = &TypeName> {
        self.wrappers.keys()
    }

    /// Number of registered wrappers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    /// Returns whether no wrappers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }
}

impl core::fmt::Debug for WrapperRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.wrappers.iter().map(|(k, v)| (k, v.rust_type)))
            .finish()
    }
}
