//! Frozen bindings: the lattice, the wrapper registry and configuration.

use crate::builder::BindingsBuilder;
use crate::config::BindingsConfig;
use crate::error::InteropError;
use crate::extensions::Extensions;
use crate::handle::Handle;
use crate::registry::WrapperRegistry;
use crate::wrapper::{AnyWrapper, Proxy, Wrapper};
use std::sync::Arc;
use veneer_lattice::{CastError, TypeLattice, TypeName};

pub(crate) struct BindingsInner {
    pub(crate) lattice: TypeLattice,
    pub(crate) registry: WrapperRegistry,
    pub(crate) config: BindingsConfig,
    pub(crate) extensions: Extensions,
    pub(crate) modules: Vec<String>,
}

/// An immutable set of wrapper bindings.
///
/// Created by [`BindingsBuilder::finish`]. Cloning is cheap, and every
/// [`Proxy`] keeps a clone so that wrappers can construct further wrappers
/// for the objects they return.
#[derive(Clone)]
pub struct Bindings(pub(crate) Arc<BindingsInner>);

impl Bindings {
    /// Starts a new builder.
    #[must_use]
    pub fn builder() -> BindingsBuilder {
        BindingsBuilder::new()
    }

    /// The type lattice.
    #[must_use]
    pub fn lattice(&self) -> &TypeLattice {
        &self.0.lattice
    }

    /// The wrapper registry.
    #[must_use]
    pub fn registry(&self) -> &WrapperRegistry {
        &self.0.registry
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &BindingsConfig {
        &self.0.config
    }

    /// A value attached by a module while building.
    #[must_use]
    pub fn extension<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.0.extensions.get::<T>()
    }

    /// Names of the modules these bindings were built from, in build order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.modules.iter().map(String::as_str)
    }

    /// Foreign types with a registered wrapper.
    pub fn registered_types(&self) -> impl Iterator<Item = &TypeName> {
        self.0.registry.type_names()
    }

    /// Wraps `handle` in the wrapper registered for `type_name`.
    ///
    /// `type_name` becomes the declared type and must be the handle's runtime
    /// type or one of its supertypes.
    ///
    /// # Errors
    ///
    /// - [`InteropError::MissingWrapperType`] if no wrapper is registered for
    ///   `type_name`.
    /// - [`InteropError::Cast`] with [`CastError::IncompatibleRuntimeType`]
    ///   if the runtime type is not `type_name` or one of its subtypes.
    pub fn construct(
        &self,
        handle: Handle,
        type_name: &TypeName,
    ) -> Result<Box<dyn AnyWrapper>, InteropError> {
        if !self.0.registry.contains(type_name) {
            tracing::warn!(type_name = %type_name, "no wrapper registered");
            return Err(InteropError::MissingWrapperType(type_name.clone()));
        }

        let runtime = handle.runtime_type();
        if !self.0.lattice.is_subtype(&runtime, type_name) {
            tracing::warn!(
                declared = %type_name,
                runtime = %runtime,
                "runtime type is not a subtype of the declared type"
            );
            return Err(CastError::IncompatibleRuntimeType {
                target: type_name.clone(),
                runtime,
            }
            .into());
        }

        self.instantiate(Proxy::new(handle, type_name.clone(), self.clone()))
    }

    /// Wraps `handle` in the wrapper registered for its runtime type.
    ///
    /// # Errors
    ///
    /// Returns [`InteropError::MissingWrapperType`] if the runtime type has
    /// no registered wrapper.
    pub fn wrap(&self, handle: Handle) -> Result<Box<dyn AnyWrapper>, InteropError> {
        let runtime = handle.runtime_type();
        self.construct(handle, &runtime)
    }

    /// Wraps `handle` and views it as `W`.
    ///
    /// The runtime type must have a registered wrapper even when `W` is one
    /// of its supertypes.
    ///
    /// # Errors
    ///
    /// - [`InteropError::MissingWrapperType`] if the runtime type has no
    ///   registered wrapper.
    /// - [`InteropError::Cast`] if `W` is not in the runtime type's lattice.
    pub fn wrap_as<W: Wrapper>(&self, handle: Handle) -> Result<W, InteropError> {
        let runtime = handle.runtime_type();
        if !self.0.registry.contains(&runtime) {
            tracing::warn!(type_name = %runtime, "no wrapper registered");
            return Err(InteropError::MissingWrapperType(runtime));
        }
        let proxy = Proxy::new(handle, runtime, self.clone());
        Ok(proxy.cast::<W>()?)
    }

    pub(crate) fn instantiate(&self, proxy: Proxy) -> Result<Box<dyn AnyWrapper>, InteropError> {
        let type_name = proxy.declared_type();
        let Some(factory) = self.0.registry.factory(type_name) else {
            tracing::warn!(type_name = %type_name, "no wrapper registered");
            return Err(InteropError::MissingWrapperType(type_name.clone()));
        };
        tracing::trace!(type_name = %type_name, "constructed wrapper");
        Ok(factory(proxy))
    }
}

impl core::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bindings")
            .field("types", &self.0.lattice.len())
            .field("registry", &self.0.registry)
            .field("config", &self.0.config)
            .field("modules", &self.0.modules)
            .finish_non_exhaustive()
    }
}
