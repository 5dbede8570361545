//! Assembly of [`Bindings`] from modules and wrapper registrations.
//!
//! # Lifecycle
//!
//! 1. **Collection** - modules are queued with
//!    [`add_modules`](BindingsBuilder::add_modules); wrappers may also be
//!    registered directly.
//! 2. **Dependency Resolution** - queued modules are sorted topologically.
//! 3. **Build Phase** - `build()` runs for each module in that order.
//! 4. **Ready Phase** - `ready()` runs for each module in the same order.
//! 5. **Freeze** - the lattice is validated and everything becomes an
//!    immutable, cheaply clonable [`Bindings`].

use crate::bindings::{Bindings, BindingsInner};
use crate::config::BindingsConfig;
use crate::error::BindingsError;
use crate::extensions::Extensions;
use crate::module::{BindingModule, ModuleId, Modules};
use crate::registry::WrapperRegistry;
use crate::wrapper::Wrapper;
use hashbrown::{HashMap, HashSet};
use std::sync::Arc;
use veneer_lattice::{LatticeBuilder, TypeName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildState {
    NotStarted,
    Building,
    Readying,
    Finished,
}

struct ModuleEntry {
    id: ModuleId,
    module: Box<dyn BindingModule>,
    name: String,
}

/// Mutable collector for wrappers, type declarations and modules.
///
/// # Example
///
/// ```
/// use veneer_interop::{Bindings, BindingsConfig, CastPolicy, Proxy, Wrapper};
/// use veneer_lattice::TypeName;
///
/// #[derive(Debug, Wrapper)]
/// #[wrapper(namespace = "Model", extends = "Model.Part")]
/// struct Shaft(Proxy);
///
/// let mut builder = Bindings::builder()
///     .with_config(BindingsConfig::new().with_cast_policy(CastPolicy::Trusted));
/// builder
///     .declare(TypeName::new("Model", "Part"), None, [])
///     .register::<Shaft>();
/// let bindings = builder.finish().unwrap();
///
/// assert!(bindings.lattice().is_subtype(&Shaft::type_name(), &TypeName::parse("Model.Part")));
/// ```
pub struct BindingsBuilder {
    lattice: LatticeBuilder,
    registry: WrapperRegistry,
    config: BindingsConfig,
    extensions: Extensions,
    pending_modules: Vec<ModuleEntry>,
    built_modules: Vec<ModuleEntry>,
    module_ids: HashSet<ModuleId>,
    build_state: BuildState,
}

impl Default for BindingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for BindingsBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BindingsBuilder")
            .field("lattice", &self.lattice)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("pending_modules", &self.pending_modules.len())
            .field("built_modules", &self.built_modules.len())
            .finish_non_exhaustive()
    }
}

impl BindingsBuilder {
    /// Creates an empty builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lattice: LatticeBuilder::new(),
            registry: WrapperRegistry::new(),
            config: BindingsConfig::default(),
            extensions: Extensions::new(),
            pending_modules: Vec::new(),
            built_modules: Vec::new(),
            module_ids: HashSet::new(),
            build_state: BuildState::NotStarted,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: BindingsConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &BindingsConfig {
        &self.config
    }

    /// Mutable access to the configuration, for modules that adjust it.
    pub fn config_mut(&mut self) -> &mut BindingsConfig {
        &mut self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modules
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a module or a [`ModuleGroupBuilder`](crate::ModuleGroupBuilder).
    ///
    /// Modules added from another module's `build()` are built immediately.
    ///
    /// # Panics
    ///
    /// Panics if a unique module is added twice, or if modules are added once
    /// the ready phase has started.
    pub fn add_modules<M: Modules>(&mut self, modules: M) -> &mut Self {
        modules.add_to_builder(self);
        self
    }

    pub(crate) fn add_module_boxed(&mut self, id: ModuleId, module: Box<dyn BindingModule>) {
        let name = module.name().to_string();

        assert!(
            !(module.is_unique() && self.module_ids.contains(&id)),
            "Module '{name}' is unique and was already added.\n\
             If you intended to add this module multiple times, \
             set `is_unique()` to return `false`."
        );
        assert!(
            !matches!(self.build_state, BuildState::Readying | BuildState::Finished),
            "Module '{name}' was added after the build phase ended"
        );

        self.module_ids.insert(id);
        let entry = ModuleEntry { id, module, name };

        if self.build_state == BuildState::Building {
            tracing::debug!(module = %entry.name, "building nested module");
            entry.module.build(self);
            self.built_modules.push(entry);
        } else {
            self.pending_modules.push(entry);
        }
    }

    /// Returns true if a module of type `M` has been added.
    #[must_use]
    pub fn has_module<M: BindingModule>(&self) -> bool {
        self.module_ids.contains(&ModuleId::of::<M>())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Types
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers wrapper `W` and declares its type in the lattice.
    ///
    /// # Panics
    ///
    /// Panics if the foreign type is already declared or already has a
    /// wrapper.
    pub fn register<W: Wrapper>(&mut self) -> &mut Self {
        self.lattice
            .declare(W::type_name(), W::supertype(), W::interfaces());
        self.registry.register::<W>();
        tracing::trace!(
            type_name = %W::type_name(),
            wrapper = core::any::type_name::<W>(),
            "registered wrapper"
        );
        self
    }

    /// Declares a type that has no wrapper of its own, such as an abstract
    /// base or an interface.
    ///
    /// Handles whose runtime type is only declared cannot be constructed, but
    /// wrappers may still extend the type and casts may traverse it.
    ///
    /// # Panics
    ///
    /// Panics if the type is already declared.
    pub fn declare(
        &mut self,
        type_name: TypeName,
        supertype: Option<TypeName>,
        interfaces: impl IntoIterator<Item = TypeName>,
    ) -> &mut Self {
        self.lattice.declare(type_name, supertype, interfaces);
        self
    }

    /// Returns whether a type is declared.
    #[must_use]
    pub fn is_declared(&self, type_name: &TypeName) -> bool {
        self.lattice.contains(type_name)
    }

    /// Returns whether a wrapper is registered for a type.
    #[must_use]
    pub fn is_registered(&self, type_name: &TypeName) -> bool {
        self.registry.contains(type_name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Extensions
    // ─────────────────────────────────────────────────────────────────────────

    /// Attaches a value readable from the finished bindings.
    pub fn insert_extension<T: Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.extensions.insert(value)
    }

    /// Returns a previously attached value.
    #[must_use]
    pub fn extension<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions.get::<T>()
    }

    /// Returns a previously attached value mutably.
    pub fn extension_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.extensions.get_mut::<T>()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Finish
    // ─────────────────────────────────────────────────────────────────────────

    /// Builds and readies all modules, then freezes the result.
    ///
    /// # Errors
    ///
    /// - [`BindingsError::MissingDependency`] if a module depends on a module
    ///   that was never added.
    /// - [`BindingsError::DependencyCycle`] if module dependencies are cyclic.
    /// - [`BindingsError::Lattice`] if the declared types do not form a
    ///   valid hierarchy.
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn finish(&mut self) -> Result<Bindings, BindingsError> {
        assert!(
            self.build_state == BuildState::NotStarted,
            "BindingsBuilder::finish() was already called"
        );

        let sorted = self.sort_modules_by_dependencies()?;

        self.build_state = BuildState::Building;
        for entry in sorted {
            tracing::debug!(module = %entry.name, "building module");
            entry.module.build(self);
            self.built_modules.push(entry);
        }

        self.build_state = BuildState::Readying;
        let built = core::mem::take(&mut self.built_modules);
        for entry in &built {
            entry.module.ready(self);
        }
        self.built_modules = built;
        self.build_state = BuildState::Finished;

        let lattice = core::mem::take(&mut self.lattice).build()?;
        let modules = self.built_modules.iter().map(|m| m.name.clone()).collect();

        tracing::debug!(
            types = lattice.len(),
            wrappers = self.registry.len(),
            modules = self.built_modules.len(),
            "bindings ready"
        );

        Ok(Bindings(Arc::new(BindingsInner {
            lattice,
            registry: core::mem::take(&mut self.registry),
            config: self.config,
            extensions: core::mem::take(&mut self.extensions),
            modules,
        })))
    }

    /// Drains the pending modules in dependency order (Kahn's algorithm).
    fn sort_modules_by_dependencies(&mut self) -> Result<Vec<ModuleEntry>, BindingsError> {
        let pending = core::mem::take(&mut self.pending_modules);
        let n = pending.len();

        let mut index_of: HashMap<ModuleId, Vec<usize>> = HashMap::new();
        for (i, entry) in pending.iter().enumerate() {
            index_of.entry(entry.id).or_default().push(i);
        }

        let mut in_degree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (i, entry) in pending.iter().enumerate() {
            for dep in entry.module.dependencies() {
                let Some(dep_indices) = index_of.get(&dep) else {
                    return Err(BindingsError::MissingDependency {
                        module: entry.name.clone(),
                        dependency: dep.type_name(),
                    });
                };
                for &dep_idx in dep_indices {
                    dependents[dep_idx].push(i);
                    in_degree[i] += 1;
                }
            }
        }

        let mut queue: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).rev().collect();
        let mut order: Vec<usize> = Vec::with_capacity(n);

        while let Some(idx) = queue.pop() {
            order.push(idx);
            for &dependent in dependents[idx].iter().rev() {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    queue.push(dependent);
                }
            }
        }

        if order.len() != n {
            let modules = in_degree
                .iter()
                .enumerate()
                .filter(|(_, deg)| **deg > 0)
                .map(|(i, _)| pending[i].name.clone())
                .collect();
            return Err(BindingsError::DependencyCycle { modules });
        }

        let mut slots: Vec<Option<ModuleEntry>> = pending.into_iter().map(Some).collect();
        Ok(order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    static LOG: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

    fn log(event: &'static str) {
        LOG.lock().push(event);
    }

    struct Base;
    impl BindingModule for Base {
        fn build(&self, builder: &mut BindingsBuilder) {
            log("build base");
            builder.declare(TypeName::new("M", "Base"), None, []);
        }
        fn ready(&self, _builder: &mut BindingsBuilder) {
            log("ready base");
        }
    }

    struct Derived;
    impl BindingModule for Derived {
        fn build(&self, builder: &mut BindingsBuilder) {
            log("build derived");
            assert!(builder.is_declared(&TypeName::new("M", "Base")));
            builder.declare(
                TypeName::new("M", "Derived"),
                Some(TypeName::new("M", "Base")),
                [],
            );
        }
        fn ready(&self, _builder: &mut BindingsBuilder) {
            log("ready derived");
        }
        fn dependencies(&self) -> Vec<ModuleId> {
            vec![ModuleId::of::<Base>()]
        }
    }

    struct Loop1;
    impl BindingModule for Loop1 {
        fn build(&self, _builder: &mut BindingsBuilder) {}
        fn dependencies(&self) -> Vec<ModuleId> {
            vec![ModuleId::of::<Loop2>()]
        }
    }

    struct Loop2;
    impl BindingModule for Loop2 {
        fn build(&self, _builder: &mut BindingsBuilder) {}
        fn dependencies(&self) -> Vec<ModuleId> {
            vec![ModuleId::of::<Loop1>()]
        }
    }

    #[test]
    fn modules_build_and_ready_in_dependency_order() {
        LOG.lock().clear();

        let bindings = BindingsBuilder::new()
            .add_modules(Derived)
            .add_modules(Base)
            .finish()
            .unwrap();

        assert_eq!(
            *LOG.lock(),
            ["build base", "build derived", "ready base", "ready derived"]
        );
        assert_eq!(bindings.lattice().len(), 2);
        assert_eq!(bindings.modules().count(), 2);
    }

    #[test]
    fn missing_dependency_is_reported() {
        let err = BindingsBuilder::new()
            .add_modules(Loop1)
            .finish()
            .unwrap_err();
        assert!(matches!(
            err,
            BindingsError::MissingDependency { ref module, .. } if module.ends_with("Loop1")
        ));
    }

    #[test]
    fn dependency_cycle_is_reported() {
        let err = BindingsBuilder::new()
            .add_modules(Loop1)
            .add_modules(Loop2)
            .finish()
            .unwrap_err();
        let BindingsError::DependencyCycle { modules } = err else {
            panic!("expected cycle, got {err:?}");
        };
        assert_eq!(modules.len(), 2);
    }

    #[test]
    #[should_panic(expected = "is unique and was already added")]
    fn unique_module_added_twice_panics() {
        BindingsBuilder::new().add_modules(Base).add_modules(Base);
    }

    #[test]
    fn unknown_supertype_fails_finish() {
        let err = BindingsBuilder::new()
            .declare(TypeName::new("M", "Orphan"), Some(TypeName::new("M", "Gone")), [])
            .finish()
            .unwrap_err();
        assert!(matches!(err, BindingsError::Lattice(_)));
    }

    struct Nested;
    impl BindingModule for Nested {
        fn build(&self, builder: &mut BindingsBuilder) {
            builder.declare(TypeName::new("M", "Nested"), None, []);
        }
    }

    struct AddsInBuild;
    impl BindingModule for AddsInBuild {
        fn build(&self, builder: &mut BindingsBuilder) {
            builder.add_modules(Nested);
        }
    }

    struct AddsInReady;
    impl BindingModule for AddsInReady {
        fn build(&self, _builder: &mut BindingsBuilder) {}
        fn ready(&self, builder: &mut BindingsBuilder) {
            builder.add_modules(Nested);
        }
    }

    #[test]
    fn module_added_during_build_is_built() {
        let bindings = BindingsBuilder::new()
            .add_modules(AddsInBuild)
            .finish()
            .unwrap();
        assert!(bindings.lattice().contains(&TypeName::new("M", "Nested")));
        assert_eq!(bindings.modules().count(), 2);
    }

    #[test]
    #[should_panic(expected = "was added after the build phase ended")]
    fn module_added_during_ready_panics() {
        let _ = BindingsBuilder::new().add_modules(AddsInReady).finish();
    }

    #[test]
    #[should_panic(expected = "already called")]
    fn finish_twice_panics() {
        let mut builder = BindingsBuilder::new();
        builder.finish().unwrap();
        let _ = builder.finish();
    }
}
