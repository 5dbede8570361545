//! # Veneer Internal Library
//!
//! Re-exports the core veneer crates for convenience.

/// Type lattice and cast resolution.
pub use veneer_lattice;

/// Proxy construction, casting and marshalling over foreign handles.
pub use veneer_interop;

/// Lossless DTO codecs.
pub use veneer_dto;

/// Infrastructure binding modules.
pub use veneer_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use veneer_core::{DefaultModules, TracingModule};
    pub use veneer_dto::prelude::*;
    pub use veneer_interop::prelude::*;
}
