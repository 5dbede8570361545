//! Wrappers and the untyped [`Proxy`] view they are built on.
//!
//! A [`Proxy`] pairs a foreign [`Handle`] with a declared type from the
//! lattice. Typed wrappers implement [`Wrapper`] (normally through
//! `#[derive(Wrapper)]`) and hold exactly one proxy. A cast never touches the
//! foreign runtime: it validates the target against the lattice and produces
//! a new proxy around the same handle.
//!
//! # Example
//!
//! ```
//! use veneer_interop::memory::MemoryObject;
//! use veneer_interop::{Bindings, Proxy, Wrapper};
//!
//! #[derive(Debug, Clone, Wrapper)]
//! #[wrapper(namespace = "Model")]
//! struct Component(Proxy);
//!
//! #[derive(Debug, Clone, Wrapper)]
//! #[wrapper(namespace = "Model", extends = Component)]
//! struct Gear(Proxy);
//!
//! let mut builder = Bindings::builder();
//! builder.register::<Component>().register::<Gear>();
//! let bindings = builder.finish().unwrap();
//!
//! let handle = MemoryObject::builder(Gear::type_name()).build();
//! let gear: Gear = bindings.wrap_as(handle).unwrap();
//!
//! let component: Component = gear.cast().unwrap();
//! let back: Gear = component.cast().unwrap();
//! assert_eq!(back.proxy(), gear.proxy());
//! ```

use crate::bindings::Bindings;
use crate::config::CastPolicy;
use crate::error::InteropError;
use crate::handle::Handle;
use downcast_rs::{DowncastSync, impl_downcast};
use veneer_lattice::{CastError, CastRelation, TypeName};

/// A typed local view of a foreign object.
///
/// Implementations hold a single [`Proxy`] whose declared type is
/// [`type_name()`](Self::type_name). Prefer `#[derive(Wrapper)]`, which also
/// fills in the supertype and interface declarations used to build the
/// lattice.
pub trait Wrapper: Sized + Send + Sync + core::fmt::Debug + 'static {
    /// Foreign type this wrapper represents.
    fn type_name() -> TypeName;

    /// Primary supertype, if any.
    fn supertype() -> Option<TypeName> {
        None
    }

    /// Additional interface supertypes.
    fn interfaces() -> Vec<TypeName> {
        Vec::new()
    }

    /// Builds the wrapper around a proxy declared as [`type_name()`](Self::type_name).
    ///
    /// Called by the registry and by casts, which only pass proxies of the
    /// right declared type. Obtain wrappers through [`Bindings`] or
    /// [`cast`](Self::cast) instead.
    ///
    /// # Panics
    ///
    /// Panics if `proxy` is declared as another type.
    #[doc(hidden)]
    fn from_proxy(proxy: Proxy) -> Self;

    /// Returns the underlying proxy.
    fn proxy(&self) -> &Proxy;

    /// Re-wraps the same handle as another type from this type's lattice.
    ///
    /// # Errors
    ///
    /// Returns [`CastError`] if `T` is not an ancestor or known descendant, or
    /// if a verified downcast does not match the runtime type.
    fn cast<T: Wrapper>(&self) -> Result<T, CastError> {
        self.proxy().cast::<T>()
    }

    /// Casts to the target named by a snake-case accessor and instantiates
    /// its registered wrapper.
    ///
    /// # Errors
    ///
    /// See [`Proxy::cast_by_accessor`].
    fn cast_by_accessor(&self, accessor: &str) -> Result<Box<dyn AnyWrapper>, InteropError> {
        self.proxy().cast_by_accessor(accessor)
    }
}

/// Type-erased wrapper, as returned when the concrete type is only known at
/// run time.
///
/// Use `downcast_ref`/`downcast` to recover the concrete wrapper, or
/// [`cast`](Self::cast) to view it through any type in its lattice.
pub trait AnyWrapper: DowncastSync + core::fmt::Debug {
    /// Returns the underlying proxy.
    fn as_proxy(&self) -> &Proxy;

    /// Declared type of this wrapper.
    fn declared_type(&self) -> &TypeName {
        self.as_proxy().declared_type()
    }
}

impl_downcast!(sync AnyWrapper);

impl<W: Wrapper> AnyWrapper for W {
    fn as_proxy(&self) -> &Proxy {
        self.proxy()
    }
}

impl dyn AnyWrapper {
    /// Views this wrapper as `W`.
    ///
    /// # Errors
    ///
    /// Same as [`Proxy::cast`].
    pub fn cast<W: Wrapper>(&self) -> Result<W, CastError> {
        self.as_proxy().cast::<W>()
    }
}

/// A foreign handle paired with its declared type.
///
/// The pair is fixed at construction; casting yields a new `Proxy`.
#[derive(Clone)]
pub struct Proxy {
    handle: Handle,
    declared: TypeName,
    bindings: Bindings,
}

impl Proxy {
    pub(crate) fn new(handle: Handle, declared: TypeName, bindings: Bindings) -> Self {
        Self {
            handle,
            declared,
            bindings,
        }
    }

    /// The foreign handle.
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// The declared type.
    #[must_use]
    pub fn declared_type(&self) -> &TypeName {
        &self.declared
    }

    /// Runtime type reported by the foreign object.
    #[must_use]
    pub fn runtime_type(&self) -> TypeName {
        self.handle.runtime_type()
    }

    /// The bindings this proxy was created from.
    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Re-types the handle as `target`.
    ///
    /// Upcasts always succeed. Downcasts succeed when `target` is a known
    /// descendant; under [`CastPolicy::Verified`] the runtime type must also
    /// be a subtype of `target`.
    ///
    /// # Errors
    ///
    /// - [`CastError::InvalidTarget`] if `target` is outside the lattice of
    ///   the declared type.
    /// - [`CastError::IncompatibleRuntimeType`] if a verified downcast fails.
    pub fn cast_to(&self, target: &TypeName) -> Result<Proxy, CastError> {
        let lattice = self.bindings.lattice();
        let relation = lattice.resolve_cast(&self.declared, target)?;

        if relation == CastRelation::Downcast
            && self.bindings.config().cast_policy == CastPolicy::Verified
        {
            let runtime = self.handle.runtime_type();
            if !lattice.is_subtype(&runtime, target) {
                tracing::warn!(
                    from = %self.declared,
                    target = %target,
                    runtime = %runtime,
                    "rejected downcast"
                );
                return Err(CastError::IncompatibleRuntimeType {
                    target: target.clone(),
                    runtime,
                });
            }
        }

        tracing::debug!(from = %self.declared, to = %target, ?relation, "cast");

        Ok(Self {
            handle: self.handle.clone(),
            declared: target.clone(),
            bindings: self.bindings.clone(),
        })
    }

    /// Re-types the handle as wrapper `W`.
    ///
    /// # Errors
    ///
    /// Same as [`cast_to`](Self::cast_to).
    pub fn cast<W: Wrapper>(&self) -> Result<W, CastError> {
        self.cast_to(&W::type_name()).map(W::from_proxy)
    }

    /// Casts to the target named by a snake-case accessor
    /// (`"loaded_bearing_results"`) and instantiates its wrapper.
    ///
    /// # Errors
    ///
    /// - [`InteropError::Cast`] if no target matches the accessor, with the
    ///   class name rebuilt from it.
    /// - [`InteropError::MissingWrapperType`] if the target is declared but
    ///   has no registered wrapper.
    pub fn cast_by_accessor(&self, accessor: &str) -> Result<Box<dyn AnyWrapper>, InteropError> {
        let target = self
            .bindings
            .lattice()
            .resolve_accessor(&self.declared, accessor)?
            .clone();
        let proxy = self.cast_to(&target)?;
        self.bindings.instantiate(proxy)
    }

    /// Re-wraps the handle as the wrapper registered for its runtime type.
    ///
    /// # Errors
    ///
    /// Returns [`InteropError::MissingWrapperType`] if the runtime type has
    /// no registered wrapper.
    pub fn specialize(&self) -> Result<Box<dyn AnyWrapper>, InteropError> {
        self.bindings.wrap(self.handle.clone())
    }
}

impl PartialEq for Proxy {
    fn eq(&self, other: &Self) -> bool {
        self.declared == other.declared && self.handle.same_object(&other.handle)
    }
}

impl core::fmt::Debug for Proxy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Proxy")
            .field("declared", &self.declared)
            .field("handle", &self.handle)
            .finish()
    }
}
