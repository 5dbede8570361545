//! Typed wrappers over objects owned by a foreign runtime.
//!
//! `veneer_interop` turns opaque foreign handles into Rust values:
//!
//! - [`handle`] - the [`ForeignObject`] boundary and shared [`Handle`]s
//! - [`value`] - values crossing the boundary and [`Scalar`] conversions
//! - [`Wrapper`] / [`Proxy`] - typed views, casts along the type lattice
//! - [`Bindings`] / [`BindingsBuilder`] - the registry that maps runtime
//!   types to wrapper constructors, assembled from [`BindingModule`]s
//! - [`ForeignEnum`] - local mirrors of foreign enums
//! - [`memory`] - an in-process foreign object for tests and demos
//!
//! # Construction
//!
//! Every object returned by the foreign runtime is wrapped through the
//! bindings: the runtime type is looked up in the registry and the matching
//! wrapper is built around the handle. A runtime type with no registered
//! wrapper is an [`InteropError::MissingWrapperType`], never a silent
//! fallback to a supertype.
//!
//! # Casting
//!
//! Casts are resolved against a static [`TypeLattice`]. Upcasts and casts to
//! known descendants produce a new wrapper around the same handle; anything
//! else is a [`CastError`].

// Derived code refers to `veneer_interop::` paths, including in this crate's
// own tests and doc tests.
extern crate self as veneer_interop;

/// Assembly of bindings from modules.
mod builder;

/// Frozen bindings.
mod bindings;

/// Bindings configuration.
mod config;

/// Foreign enum mirrors.
mod enums;

/// Error types.
mod error;

/// Type-keyed module extensions.
mod extensions;

/// Foreign object boundary.
pub mod handle;

/// Typed property access on proxies.
mod marshal;

/// In-memory foreign objects.
pub mod memory;

/// Binding modules and module groups.
mod module;

/// Wrapper constructor registry.
mod registry;

/// Values crossing the boundary.
pub mod value;

/// Wrapper traits and proxies.
mod wrapper;

pub use bindings::Bindings;
pub use builder::BindingsBuilder;
pub use config::{BindingsConfig, CastPolicy};
pub use enums::ForeignEnum;
pub use error::{BindingsError, InteropError};
pub use extensions::Extensions;
pub use handle::{ForeignError, ForeignObject, Handle};
pub use module::{BindingModule, ModuleGroup, ModuleGroupBuilder, ModuleId, Modules};
pub use registry::{Factory, WrapperRegistry};
pub use value::{EnumValue, ForeignValue, Scalar, ValueKind};
pub use wrapper::{AnyWrapper, Proxy, Wrapper};

pub use veneer_lattice::{CastError, CastRelation, LatticeError, TypeLattice, TypeName};

/// Derive macros for [`Wrapper`] and [`ForeignEnum`].
pub use veneer_interop_macros::{ForeignEnum, Wrapper};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::{
        AnyWrapper, BindingModule, Bindings, BindingsBuilder, BindingsConfig, CastPolicy,
        ForeignEnum, ForeignValue, Handle, InteropError, ModuleGroup, ModuleGroupBuilder,
        ModuleId, Proxy, TypeName, Wrapper,
    };
}
