//! Static type lattice for veneer wrappers.
//!
//! Foreign object models are fixed single-inheritance hierarchies with
//! additional interface supertypes. This crate captures such a hierarchy as
//! an explicit table and answers the questions a cast needs:
//!
//! - [`TypeName`] - namespace-qualified foreign type name
//! - [`LatticeBuilder`] - collects declarations, validates and freezes them
//! - [`TypeLattice`] - read-only ancestor/descendant table
//! - [`CastError`] - rejected cast, carrying the invalid target name
//!
//! Accessor helpers ([`accessor_name`], [`class_name_from_accessor`]) map
//! between type names and the snake-case names used for dynamic casts.

mod accessor;
mod error;
mod lattice;
mod name;

pub use accessor::{accessor_name, class_name_from_accessor};
pub use error::{CastError, LatticeError};
pub use lattice::{CastRelation, LatticeBuilder, LatticeEntry, TypeLattice};
pub use name::TypeName;
