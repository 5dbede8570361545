//! Infrastructure modules for veneer bindings.
//!
//! - [`TracingModule`] - installs a `tracing` subscriber
//! - [`DefaultModules`] - bundle of the infrastructure modules
//!
//! # Example
//!
//! ```
//! use veneer_core::{DefaultModules, TracingConfig};
//! use veneer_interop::{Bindings, ModuleGroup};
//!
//! let bindings = Bindings::builder()
//!     .add_modules(DefaultModules.build())
//!     .finish()
//!     .unwrap();
//! assert!(bindings.extension::<TracingConfig>().is_some());
//! ```

mod tracing_module;

pub use tracing_module::{TracingConfig, TracingFormat, TracingModule};

use veneer_interop::{ModuleGroup, ModuleGroupBuilder};

/// Default infrastructure modules.
///
/// Includes:
/// - [`TracingModule`] - Logging
///
/// Generated binding modules are added next to this group:
///
/// ```ignore
/// Bindings::builder()
///     .add_modules(DefaultModules.build().disable::<TracingModule>())
///     .add_modules(BearingsModule)
///     .finish()?;
/// ```
pub struct DefaultModules;

impl ModuleGroup for DefaultModules {
    fn build(self) -> ModuleGroupBuilder {
        ModuleGroupBuilder::new().add(TracingModule::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_modules_contains_tracing() {
        let group = DefaultModules.build();
        assert!(group.contains::<TracingModule>());
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn disabling_tracing_empties_group() {
        let group = DefaultModules.build().disable::<TracingModule>();
        assert!(group.is_empty());
    }
}
