//! Shared utilities for veneer procedural macro crates.
//!
//! Derived code must name the runtime crate it expands against. Consumers
//! may depend on `veneer_interop` / `veneer_dto` directly, under a renamed
//! key, or only through the `veneer` umbrella crate.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// A veneer crate that derived code may reference.
pub enum VeneerCrate {
    /// `veneer_interop`
    Interop,
    /// `veneer_dto`
    Dto,
}

impl VeneerCrate {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Interop => "veneer_interop",
            Self::Dto => "veneer_dto",
        }
    }
}

/// Returns a [`TokenStream`] path for the given crate.
///
/// Resolution order:
/// 1. Direct dependency (possibly renamed in `Cargo.toml`).
/// 2. Through the `veneer` umbrella crate (`veneer::<name>`).
/// 3. The literal crate name, so the compile error names the missing
///    dependency.
pub fn resolve_crate_path(krate: VeneerCrate) -> TokenStream {
    let name = krate.as_str();

    match crate_name(name) {
        Ok(FoundCrate::Itself) => {
            let ident = format_ident!("{}", name);
            quote!(#ident)
        }
        Ok(FoundCrate::Name(found)) => {
            let ident = format_ident!("{}", found);
            quote!(#ident)
        }
        Err(_) => match crate_name("veneer") {
            Ok(FoundCrate::Name(found)) => {
                let umbrella = format_ident!("{}", found);
                let ident = format_ident!("{}", name);
                quote!(#umbrella::#ident)
            }
            _ => {
                let ident = format_ident!("{}", name);
                quote!(#ident)
            }
        },
    }
}
