//! Procedural macros for `veneer_interop`.
//!
//! - `#[derive(Wrapper)]` - typed wrapper over a single `Proxy` field
//! - `#[derive(ForeignEnum)]` - unit-only enum mirroring a foreign enum

mod foreign_enum;
mod type_ref;
mod wrapper;

use proc_macro::TokenStream;

/// Derive macro for the `Wrapper` trait.
///
/// The struct must have exactly one field, holding the `Proxy`.
///
/// # Attributes
///
/// - `namespace` (required): namespace of the foreign type.
/// - `name` (optional): foreign type name. Defaults to the struct name.
/// - `extends` (optional): primary supertype, either a wrapper type
///   (`extends = Component`) or a qualified name (`extends = "Model.Part"`).
/// - `implements(...)` (optional): interface supertypes, in the same forms.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Wrapper)]
/// #[wrapper(namespace = "Bearings", extends = LoadedBearingResults, implements("Bearings.IHasDuration"))]
/// pub struct LoadedRollingBearingResults(Proxy);
/// ```
#[proc_macro_derive(Wrapper, attributes(wrapper))]
pub fn derive_wrapper(input: TokenStream) -> TokenStream {
    wrapper::derive_wrapper(input)
}

/// Derive macro for the `ForeignEnum` trait.
///
/// # Attributes
///
/// - `namespace` (required): namespace of the foreign enum.
/// - `name` (optional): foreign enum name. Defaults to the enum name.
/// - `rename` (variant, optional): foreign member name. Defaults to the
///   variant name.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, ForeignEnum)]
/// #[foreign_enum(namespace = "Bearings")]
/// pub enum Orientations {
///     Left,
///     #[foreign_enum(rename = "BOTH_SIDES")]
///     Both,
/// }
/// ```
#[proc_macro_derive(ForeignEnum, attributes(foreign_enum))]
pub fn derive_foreign_enum(input: TokenStream) -> TokenStream {
    foreign_enum::derive_foreign_enum(input)
}
