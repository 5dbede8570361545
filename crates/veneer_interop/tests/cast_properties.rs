//! Cast laws over every (runtime type, declared type, target) combination of
//! a small wrapper hierarchy.
//!
//! ```text
//! Part
//! ├── Shaft
//! └── Gear ── (IMeshable)
//!     ├── SpurGear
//!     └── HelicalGear
//! ```

use proptest::prelude::*;
use veneer_interop::memory::MemoryObject;
use veneer_interop::{
    Bindings, BindingsConfig, CastError, CastPolicy, Proxy, TypeName, Wrapper,
};

#[derive(Debug, Wrapper)]
#[wrapper(namespace = "Model")]
struct Part(Proxy);

#[derive(Debug, Wrapper)]
#[wrapper(namespace = "Model", extends = Part)]
struct Shaft(Proxy);

#[derive(Debug, Wrapper)]
#[wrapper(namespace = "Model", extends = Part, implements("Model.IMeshable"))]
struct Gear(Proxy);

#[derive(Debug, Wrapper)]
#[wrapper(namespace = "Model", extends = Gear)]
struct SpurGear(Proxy);

#[derive(Debug, Wrapper)]
#[wrapper(namespace = "Model", extends = Gear)]
struct HelicalGear(Proxy);

static TYPES: [&str; 6] = [
    "Part",
    "Shaft",
    "Gear",
    "SpurGear",
    "HelicalGear",
    "IMeshable",
];

/// Every type's ancestors, itself included.
fn chain(ty: &str) -> &'static [&'static str] {
    match ty {
        "Part" => &["Part"],
        "Shaft" => &["Shaft", "Part"],
        "Gear" => &["Gear", "Part", "IMeshable"],
        "SpurGear" => &["SpurGear", "Gear", "Part", "IMeshable"],
        "HelicalGear" => &["HelicalGear", "Gear", "Part", "IMeshable"],
        _ => &["IMeshable"],
    }
}

fn ty(name: &str) -> TypeName {
    TypeName::new("Model", name)
}

fn bindings(policy: CastPolicy) -> Bindings {
    let mut builder =
        Bindings::builder().with_config(BindingsConfig::new().with_cast_policy(policy));
    builder
        .declare(ty("IMeshable"), None, [])
        .register::<Part>()
        .register::<Shaft>()
        .register::<Gear>()
        .register::<SpurGear>()
        .register::<HelicalGear>();
    builder.finish().unwrap()
}

/// A proxy over an object of runtime type `runtime`, declared as `declared`.
fn proxy(bindings: &Bindings, runtime: &str, declared: &str) -> Proxy {
    let handle = MemoryObject::builder(ty(runtime)).build();
    bindings
        .wrap(handle)
        .unwrap()
        .as_proxy()
        .cast_to(&ty(declared))
        .unwrap()
}

fn concrete() -> impl Strategy<Value = &'static str> {
    prop::sample::select(&TYPES[..5])
}

fn any_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(&TYPES[..])
}

proptest! {
    #[test]
    fn cast_to_ancestor_and_back_is_identity(
        runtime in concrete(),
        declared_idx in any::<prop::sample::Index>(),
        ancestor_idx in any::<prop::sample::Index>(),
    ) {
        let bindings = bindings(CastPolicy::Verified);
        let ancestors = chain(runtime);
        let declared = ancestors[declared_idx.index(ancestors.len())];
        let original = proxy(&bindings, runtime, declared);

        let up_chain = chain(declared);
        let ancestor = up_chain[ancestor_idx.index(up_chain.len())];
        let up = original.cast_to(&ty(ancestor)).unwrap();
        prop_assert!(up.handle().same_object(original.handle()));

        let back = up.cast_to(&ty(declared)).unwrap();
        prop_assert_eq!(back, original);
    }

    #[test]
    fn cast_succeeds_exactly_within_the_lattice(
        runtime in concrete(),
        declared_idx in any::<prop::sample::Index>(),
        target in any_type(),
        trusted in any::<bool>(),
    ) {
        let policy = if trusted { CastPolicy::Trusted } else { CastPolicy::Verified };
        let bindings = bindings(policy);
        let ancestors = chain(runtime);
        let declared = ancestors[declared_idx.index(ancestors.len())];
        let original = proxy(&bindings, runtime, declared);

        let is_ancestor = chain(declared).contains(&target);
        let is_descendant = chain(target).contains(&declared);
        let matches_runtime = chain(runtime).contains(&target);

        match original.cast_to(&ty(target)) {
            Ok(cast) => {
                prop_assert!(is_ancestor || is_descendant);
                prop_assert!(trusted || matches_runtime);
                prop_assert_eq!(cast.declared_type(), &ty(target));
            }
            Err(CastError::InvalidTarget { target: name, .. }) => {
                prop_assert!(!is_ancestor && !is_descendant);
                prop_assert_eq!(name, target);
            }
            Err(CastError::IncompatibleRuntimeType { runtime: found, .. }) => {
                prop_assert!(!trusted && is_descendant && !matches_runtime);
                prop_assert_eq!(found, ty(runtime));
            }
        }
    }
}
