//! Property tests for cast resolution over generated hierarchies.

use proptest::prelude::*;
use veneer_lattice::{CastRelation, LatticeBuilder, TypeLattice, TypeName};

fn ty(i: usize) -> TypeName {
    TypeName::new("Generated", format!("Type{i}"))
}

/// Builds a forest where type `i` optionally extends a type with a smaller index.
fn lattice_from(parents: &[Option<usize>]) -> TypeLattice {
    let mut builder = LatticeBuilder::new();
    for (i, parent) in parents.iter().enumerate() {
        builder.declare(ty(i), parent.map(ty), []);
    }
    builder.build().expect("generated hierarchy is acyclic")
}

fn hierarchy() -> impl Strategy<Value = Vec<Option<usize>>> {
    (1usize..24).prop_flat_map(|n| {
        (0..n)
            .map(|i| {
                if i == 0 {
                    Just(None).boxed()
                } else {
                    proptest::option::of(0..i).boxed()
                }
            })
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn upcast_then_downcast_returns_to_origin(parents in hierarchy()) {
        let lattice = lattice_from(&parents);
        for i in 0..parents.len() {
            let entry = lattice.get(&ty(i)).unwrap();
            for ancestor in entry.ancestors() {
                prop_assert_eq!(lattice.resolve_cast(&ty(i), ancestor), Ok(CastRelation::Upcast));
                prop_assert_eq!(lattice.resolve_cast(ancestor, &ty(i)), Ok(CastRelation::Downcast));
            }
        }
    }

    #[test]
    fn relation_matches_parent_chain(parents in hierarchy()) {
        let lattice = lattice_from(&parents);
        for i in 0..parents.len() {
            let mut chain = Vec::new();
            let mut cursor = parents[i];
            while let Some(p) = cursor {
                chain.push(p);
                cursor = parents[p];
            }
            for j in 0..parents.len() {
                let expected = if i == j {
                    CastRelation::Identity
                } else if chain.contains(&j) {
                    CastRelation::Upcast
                } else if lattice.is_subtype(&ty(j), &ty(i)) {
                    CastRelation::Downcast
                } else {
                    CastRelation::Unrelated
                };
                prop_assert_eq!(lattice.relation(&ty(i), &ty(j)), expected);
            }
        }
    }

    #[test]
    fn unrelated_targets_always_fail(parents in hierarchy()) {
        let lattice = lattice_from(&parents);
        let outsider = TypeName::new("Elsewhere", "Outsider");
        for i in 0..parents.len() {
            let err = lattice.resolve_cast(&ty(i), &outsider).unwrap_err();
            prop_assert_eq!(err.target(), "Outsider");
        }
    }
}
