//! Static type lattice.
//!
//! A [`TypeLattice`] records, for every declared wrapper type, its single
//! primary supertype, any additional interface supertypes, the transitive
//! ancestor set and the set of known descendants. It is assembled once with
//! a [`LatticeBuilder`] and is read-only afterwards.
//!
//! # Example
//!
//! ```
//! use veneer_lattice::{CastRelation, LatticeBuilder, TypeName};
//!
//! let base = TypeName::new("Model", "Component");
//! let gear = TypeName::new("Model", "Gear");
//! let mountable = TypeName::new("Model", "IMountable");
//!
//! let mut builder = LatticeBuilder::new();
//! builder
//!     .declare(mountable.clone(), None, [])
//!     .declare(base.clone(), None, [])
//!     .declare(gear.clone(), Some(base.clone()), [mountable.clone()]);
//! let lattice = builder.build().unwrap();
//!
//! assert!(lattice.is_subtype(&gear, &mountable));
//! assert_eq!(lattice.relation(&base, &gear), CastRelation::Downcast);
//! assert_eq!(lattice.relation(&gear, &base), CastRelation::Upcast);
//! ```

use crate::accessor::{accessor_name, class_name_from_accessor};
use crate::error::{CastError, LatticeError};
use crate::name::TypeName;
use hashbrown::HashMap;
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;

/// How a cast moves through the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastRelation {
    /// Source and target are the same type.
    Identity,
    /// Target is an ancestor of the source.
    Upcast,
    /// Target is a known descendant of the source.
    Downcast,
    /// Target is outside the source's ancestor/descendant set.
    Unrelated,
}

struct Declaration {
    supertype: Option<TypeName>,
    interfaces: Vec<TypeName>,
}

impl Declaration {
    fn parents(&self) -> impl Iterator<Item = &TypeName> {
        self.supertype.iter().chain(self.interfaces.iter())
    }
}

/// Mutable collector of type declarations.
///
/// Declarations may appear in any order; supertypes are resolved when
/// [`build`](Self::build) is called.
#[derive(Default)]
pub struct LatticeBuilder {
    declarations: IndexMap<TypeName, Declaration>,
}

impl core::fmt::Debug for LatticeBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LatticeBuilder")
            .field("types", &self.declarations.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl LatticeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declarations: IndexMap::new(),
        }
    }

    /// Declares a type with its primary supertype and interface supertypes.
    ///
    /// # Panics
    ///
    /// Panics if `ty` was already declared.
    pub fn declare(
        &mut self,
        ty: TypeName,
        supertype: Option<TypeName>,
        interfaces: impl IntoIterator<Item = TypeName>,
    ) -> &mut Self {
        assert!(
            !self.declarations.contains_key(&ty),
            "type '{ty}' is already declared"
        );
        self.declarations.insert(
            ty,
            Declaration {
                supertype,
                interfaces: interfaces.into_iter().collect(),
            },
        );
        self
    }

    /// Returns whether `ty` has been declared.
    #[must_use]
    pub fn contains(&self, ty: &TypeName) -> bool {
        self.declarations.contains_key(ty)
    }

    /// Returns the number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns whether no types have been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Resolves all declarations into an immutable lattice.
    ///
    /// # Errors
    ///
    /// - [`LatticeError::UnknownSupertype`] if a supertype or interface was
    ///   never declared.
    /// - [`LatticeError::Cycle`] if the supertype relation is cyclic.
    pub fn build(self) -> Result<TypeLattice, LatticeError> {
        let n = self.declarations.len();

        // Parent indices per type, validated against the declarations.
        let mut parents: Vec<Vec<usize>> = Vec::with_capacity(n);
        for (ty, decl) in &self.declarations {
            let mut indices = Vec::new();
            for parent in decl.parents() {
                let idx = self.declarations.get_index_of(parent).ok_or_else(|| {
                    LatticeError::UnknownSupertype {
                        ty: ty.clone(),
                        supertype: parent.clone(),
                    }
                })?;
                indices.push(idx);
            }
            parents.push(indices);
        }

        // Kahn's algorithm, parents before children, ties in declaration order.
        let mut in_degree: Vec<usize> = parents.iter().map(Vec::len).collect();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (child, indices) in parents.iter().enumerate() {
            for &parent in indices {
                children[parent].push(child);
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut sorted: Vec<usize> = Vec::with_capacity(n);
        while let Some(idx) = queue.pop_front() {
            sorted.push(idx);
            for &child in &children[idx] {
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    queue.push_back(child);
                }
            }
        }

        if sorted.len() != n {
            let types = in_degree
                .iter()
                .enumerate()
                .filter(|(_, deg)| **deg > 0)
                .filter_map(|(i, _)| self.declarations.get_index(i))
                .map(|(ty, _)| ty.clone())
                .collect();
            return Err(LatticeError::Cycle { types });
        }

        // Ancestors: primary chain first, then each interface and its chain.
        let mut ancestors: Vec<IndexSet<usize>> = vec![IndexSet::new(); n];
        for &idx in &sorted {
            let mut set = IndexSet::new();
            for &parent in &parents[idx] {
                set.insert(parent);
                set.extend(ancestors[parent].iter().copied());
            }
            ancestors[idx] = set;
        }

        let mut descendants: Vec<IndexSet<usize>> = vec![IndexSet::new(); n];
        for &idx in &sorted {
            for &ancestor in &ancestors[idx] {
                descendants[ancestor].insert(idx);
            }
        }

        let names: Vec<TypeName> = self.declarations.keys().cloned().collect();
        let mut entries = HashMap::with_capacity(n);
        for (idx, (ty, decl)) in self.declarations.into_iter().enumerate() {
            let entry = LatticeEntry {
                accessor: accessor_name(ty.name()),
                type_name: ty.clone(),
                supertype: decl.supertype,
                interfaces: decl.interfaces,
                ancestors: ancestors[idx].iter().map(|&i| names[i].clone()).collect(),
                descendants: descendants[idx]
                    .iter()
                    .map(|&i| names[i].clone())
                    .collect(),
            };
            entries.insert(ty, entry);
        }

        tracing::debug!(types = n, "type lattice built");

        Ok(TypeLattice {
            entries,
            order: names,
        })
    }
}

/// Lattice metadata for one declared type.
#[derive(Debug, Clone)]
pub struct LatticeEntry {
    type_name: TypeName,
    accessor: String,
    supertype: Option<TypeName>,
    interfaces: Vec<TypeName>,
    ancestors: IndexSet<TypeName>,
    descendants: IndexSet<TypeName>,
}

impl LatticeEntry {
    /// The declared type.
    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Snake-case accessor used by [`TypeLattice::resolve_accessor`].
    #[must_use]
    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    /// Primary supertype, if any.
    #[must_use]
    pub fn supertype(&self) -> Option<&TypeName> {
        self.supertype.as_ref()
    }

    /// Additional interface supertypes.
    #[must_use]
    pub fn interfaces(&self) -> &[TypeName] {
        &self.interfaces
    }

    /// All transitive ancestors, nearest primary ancestor first.
    #[must_use]
    pub fn ancestors(&self) -> &IndexSet<TypeName> {
        &self.ancestors
    }

    /// All known transitive descendants.
    #[must_use]
    pub fn descendants(&self) -> &IndexSet<TypeName> {
        &self.descendants
    }
}

/// Immutable "is-a" table over declared wrapper types.
#[derive(Debug, Clone, Default)]
pub struct TypeLattice {
    entries: HashMap<TypeName, LatticeEntry>,
    order: Vec<TypeName>,
}

impl TypeLattice {
    /// Returns the entry for `ty`.
    #[must_use]
    pub fn get(&self, ty: &TypeName) -> Option<&LatticeEntry> {
        self.entries.get(ty)
    }

    /// Returns whether `ty` is declared.
    #[must_use]
    pub fn contains(&self, ty: &TypeName) -> bool {
        self.entries.contains_key(ty)
    }

    /// Returns the number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the lattice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over declared types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeName> {
        self.order.iter()
    }

    /// Returns whether `sub` equals `sup` or has it as an ancestor.
    #[must_use]
    pub fn is_subtype(&self, sub: &TypeName, sup: &TypeName) -> bool {
        self.entries
            .get(sub)
            .is_some_and(|entry| sub == sup || entry.ancestors.contains(sup))
    }

    /// Classifies a cast from `from` to `to`.
    #[must_use]
    pub fn relation(&self, from: &TypeName, to: &TypeName) -> CastRelation {
        let Some(entry) = self.entries.get(from) else {
            return CastRelation::Unrelated;
        };

        if from == to {
            CastRelation::Identity
        } else if entry.ancestors.contains(to) {
            CastRelation::Upcast
        } else if entry.descendants.contains(to) {
            CastRelation::Downcast
        } else {
            CastRelation::Unrelated
        }
    }

    /// Classifies a cast, rejecting targets outside the lattice of `from`.
    ///
    /// # Errors
    ///
    /// Returns [`CastError::InvalidTarget`] when `to` is neither `from`, one
    /// of its ancestors, nor one of its known descendants.
    pub fn resolve_cast(&self, from: &TypeName, to: &TypeName) -> Result<CastRelation, CastError> {
        match self.relation(from, to) {
            CastRelation::Unrelated => Err(CastError::InvalidTarget {
                from: from.clone(),
                target: to.name().to_string(),
            }),
            relation => Ok(relation),
        }
    }

    /// Finds the cast target of `from` addressed by a snake-case accessor.
    ///
    /// # Errors
    ///
    /// Returns [`CastError::InvalidTarget`] carrying the class name rebuilt
    /// from `accessor` when no target matches.
    pub fn resolve_accessor(&self, from: &TypeName, accessor: &str) -> Result<&TypeName, CastError> {
        self.cast_targets(from)
            .into_iter()
            .find(|ty| {
                self.entries
                    .get(*ty)
                    .is_some_and(|entry| entry.accessor == accessor)
            })
            .ok_or_else(|| CastError::InvalidTarget {
                from: from.clone(),
                target: class_name_from_accessor(accessor),
            })
    }

    /// Every valid cast target of `from`: itself, its ancestors, then its
    /// descendants.
    #[must_use]
    pub fn cast_targets(&self, from: &TypeName) -> Vec<&TypeName> {
        let Some(entry) = self.entries.get(from) else {
            return Vec::new();
        };

        core::iter::once(&entry.type_name)
            .chain(entry.ancestors.iter())
            .chain(entry.descendants.iter())
            .collect()
    }

    /// Accessor names of every valid cast target of `from`.
    #[must_use]
    pub fn accessor_names(&self, from: &TypeName) -> Vec<&str> {
        self.cast_targets(from)
            .into_iter()
            .filter_map(|ty| self.entries.get(ty))
            .map(LatticeEntry::accessor)
            .collect()
    }
}
