//! Lossless codecs between typed records and plain JSON mappings.
//!
//! - [`Field`] - three-state field: unset, null, or a value
//! - [`AdditionalProperties`] - ordered bag for undeclared keys
//! - [`Dto`] - `to_mapping` / `from_mapping`, usually derived
//! - [`FieldValue`] - per-value JSON conversion
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use veneer_dto::{AdditionalProperties, Dto, Field};
//!
//! #[derive(Debug, Clone, PartialEq, Dto)]
//! struct EmailAddress {
//!     verified: Field<bool>,
//!     primary: Field<bool>,
//!     #[dto(additional)]
//!     extra: AdditionalProperties,
//! }
//!
//! let mut email = EmailAddress {
//!     verified: Field::Value(true),
//!     primary: Field::Unset,
//!     extra: AdditionalProperties::new(),
//! };
//! email.set_additional("legacy_flag", json!(1)).unwrap();
//!
//! let mapping = email.to_json();
//! assert_eq!(mapping, json!({"verified": true, "legacy_flag": 1}));
//!
//! let back = EmailAddress::from_json(mapping).unwrap();
//! assert!(back.primary.is_unset());
//! assert_eq!(back["legacy_flag"], json!(1));
//! assert_eq!(back, email);
//! ```

// Derived code refers to `veneer_dto::` paths, including in this crate's
// own tests and doc tests.
extern crate self as veneer_dto;

mod additional;
mod dto;
mod error;
mod field;
mod value;

pub use additional::AdditionalProperties;
pub use dto::{Dto, merge_additional};
pub use error::{DtoError, json_kind};
pub use field::Field;
pub use value::FieldValue;

/// Derive macro for [`Dto`].
pub use veneer_dto_macros::Dto;

#[doc(hidden)]
pub mod __private {
    pub use crate::additional::undeclared;
    pub use serde;
    pub use serde_json;
}

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::{AdditionalProperties, Dto, DtoError, Field, FieldValue};
}
