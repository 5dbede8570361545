//! Binding modules: the unit in which wrappers are contributed.
//!
//! A generated bindings crate typically exposes one module per foreign
//! namespace. Each module registers its wrappers and declares any abstract
//! types; modules that extend types from another namespace declare that
//! namespace's module as a dependency.
//!
//! # Example
//!
//! ```
//! use veneer_interop::{BindingModule, Bindings, BindingsBuilder, ModuleId, Proxy, Wrapper};
//!
//! #[derive(Debug, Wrapper)]
//! #[wrapper(namespace = "Model")]
//! struct Component(Proxy);
//!
//! #[derive(Debug, Wrapper)]
//! #[wrapper(namespace = "Model.Gears", extends = Component)]
//! struct Gear(Proxy);
//!
//! struct ModelModule;
//!
//! impl BindingModule for ModelModule {
//!     fn build(&self, builder: &mut BindingsBuilder) {
//!         builder.register::<Component>();
//!     }
//! }
//!
//! struct GearsModule;
//!
//! impl BindingModule for GearsModule {
//!     fn build(&self, builder: &mut BindingsBuilder) {
//!         builder.register::<Gear>();
//!     }
//!
//!     fn dependencies(&self) -> Vec<ModuleId> {
//!         vec![ModuleId::of::<ModelModule>()]
//!     }
//! }
//!
//! let bindings = Bindings::builder()
//!     .add_modules(GearsModule)
//!     .add_modules(ModelModule)
//!     .finish()
//!     .unwrap();
//! assert_eq!(bindings.modules().count(), 2);
//! ```

use crate::builder::BindingsBuilder;
use core::any::TypeId;

// ─────────────────────────────────────────────────────────────────────────────
// ModuleId
// ─────────────────────────────────────────────────────────────────────────────

/// Unique identifier for a module type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ModuleId {
    /// Creates a `ModuleId` for the given module type.
    #[must_use]
    pub fn of<M: BindingModule>() -> Self {
        Self {
            type_id: TypeId::of::<M>(),
            type_name: core::any::type_name::<M>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name for debugging.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BindingModule Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A group of wrapper registrations and type declarations.
///
/// Modules follow a two-phase lifecycle driven by
/// [`BindingsBuilder::finish`]:
///
/// 1. **Build Phase** - `build()` is called in dependency order
/// 2. **Ready Phase** - `ready()` is called in the same order, once every
///    module has been built
///
/// After the ready phase the builder is frozen into an immutable
/// [`Bindings`](crate::Bindings).
pub trait BindingModule: Send + Sync + 'static {
    /// Registers wrappers, declares types and inserts extensions.
    ///
    /// Modules added from here are built immediately.
    fn build(&self, builder: &mut BindingsBuilder);

    /// Called after every module has been built.
    ///
    /// Use this for checks or setup that depend on other modules' output.
    fn ready(&self, _builder: &mut BindingsBuilder) {}

    /// Returns the module's name for logs and error messages.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Declares modules that must be built before this one.
    fn dependencies(&self) -> Vec<ModuleId> {
        Vec::new()
    }

    /// Returns true if this module can only be added once.
    fn is_unique(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Modules Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Types accepted by [`BindingsBuilder::add_modules`]: a single
/// [`BindingModule`] or a [`ModuleGroupBuilder`].
pub trait Modules {
    /// Adds these modules to the builder.
    fn add_to_builder(self, builder: &mut BindingsBuilder);
}

impl<M: BindingModule> Modules for M {
    fn add_to_builder(self, builder: &mut BindingsBuilder) {
        builder.add_module_boxed(ModuleId::of::<M>(), Box::new(self));
    }
}

impl Modules for ModuleGroupBuilder {
    fn add_to_builder(self, builder: &mut BindingsBuilder) {
        for boxed in self.modules {
            builder.add_module_boxed(boxed.id, boxed.module);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ModuleGroup
// ─────────────────────────────────────────────────────────────────────────────

/// A bundle of modules added together.
pub trait ModuleGroup {
    /// Returns the modules in this group.
    fn build(self) -> ModuleGroupBuilder;
}

pub(crate) struct BoxedModule {
    pub(crate) id: ModuleId,
    pub(crate) module: Box<dyn BindingModule>,
}

/// Builder for customizing module groups.
#[derive(Default)]
pub struct ModuleGroupBuilder {
    modules: Vec<BoxedModule>,
}

impl ModuleGroupBuilder {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module to the end of the group.
    #[must_use]
    #[expect(
        clippy::should_implement_trait,
        reason = "This is a builder method, not std::ops::Add"
    )]
    pub fn add<M: BindingModule>(mut self, module: M) -> Self {
        self.modules.push(BoxedModule {
            id: ModuleId::of::<M>(),
            module: Box::new(module),
        });
        self
    }

    /// Removes a module from the group by type. No-op if absent.
    #[must_use]
    pub fn disable<M: BindingModule>(mut self) -> Self {
        let id = ModuleId::of::<M>();
        self.modules.retain(|m| m.id != id);
        self
    }

    /// Returns whether the group contains a module of type `M`.
    #[must_use]
    pub fn contains<M: BindingModule>(&self) -> bool {
        let id = ModuleId::of::<M>();
        self.modules.iter().any(|m| m.id == id)
    }

    /// Number of modules in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns whether the group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    impl BindingModule for A {
        fn build(&self, _builder: &mut BindingsBuilder) {}
    }

    struct B;
    impl BindingModule for B {
        fn build(&self, _builder: &mut BindingsBuilder) {}
    }

    #[test]
    fn module_ids_are_distinct() {
        assert_ne!(ModuleId::of::<A>(), ModuleId::of::<B>());
        assert_eq!(ModuleId::of::<A>(), ModuleId::of::<A>());
        assert!(ModuleId::of::<A>().type_name().ends_with("::A"));
    }

    #[test]
    fn group_disable_removes_module() {
        let group = ModuleGroupBuilder::new().add(A).add(B).disable::<A>();
        assert_eq!(group.len(), 1);
        assert!(!group.contains::<A>());
        assert!(group.contains::<B>());
    }
}
