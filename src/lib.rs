//! Typed wrappers over foreign object handles.
//!
//! Generated wrappers are constructed by runtime type, cast along a static
//! type lattice, and exchange data through lossless DTO codecs.

pub use veneer_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use veneer_internal::prelude::*;
}
