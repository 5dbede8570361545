//! Procedural macros for `veneer_dto`.
//!
//! This crate provides `#[derive(Dto)]`.

mod dto;

use proc_macro::TokenStream;

/// Derive macro for the `Dto` trait.
///
/// Also implements `FieldValue` (so DTOs nest), `Index<&str>` over the
/// additional-properties bag, and `serde::Serialize`/`Deserialize` through
/// the mapping codec.
///
/// # Field attributes
///
/// - `rename = "..."`: key used in the mapping. Defaults to the field name.
/// - `additional`: marks the single `AdditionalProperties` field. Required.
/// - `default`: an absent key decodes as `Default::default()` instead of
///   failing.
///
/// Fields of type `Field<T>` are optional: absent keys decode as
/// `Field::Unset` and unset fields are omitted on encode. Any other field is
/// required.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Dto)]
/// struct EmailAddress {
///     #[dto(rename = "email_address")]
///     address: String,
///     verified: Field<bool>,
///     #[dto(additional)]
///     extra: AdditionalProperties,
/// }
/// ```
#[proc_macro_derive(Dto, attributes(dto))]
pub fn derive_dto(input: TokenStream) -> TokenStream {
    dto::derive_dto(input)
}
