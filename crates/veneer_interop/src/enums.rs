//! Local mirrors of foreign enum types.

use crate::error::InteropError;
use crate::value::{EnumValue, ForeignValue, ValueKind};
use veneer_lattice::TypeName;

/// A Rust enum mirroring a foreign enum, matched by member name.
///
/// Usually derived:
///
/// ```
/// use veneer_interop::ForeignEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, ForeignEnum)]
/// #[foreign_enum(namespace = "Bearings")]
/// enum Orientations {
///     Left,
///     Right,
///     #[foreign_enum(rename = "BOTH_SIDES")]
///     Both,
/// }
///
/// assert_eq!(Orientations::enum_type().as_str(), "Bearings.Orientations");
/// assert_eq!(Orientations::Both.member(), "BOTH_SIDES");
/// assert_eq!(Orientations::from_member("Left"), Some(Orientations::Left));
/// ```
pub trait ForeignEnum: Sized + 'static {
    /// Qualified foreign enum type.
    fn enum_type() -> TypeName;

    /// Foreign member name of this variant.
    fn member(&self) -> &'static str;

    /// Variant for a foreign member name.
    fn from_member(member: &str) -> Option<Self>;

    /// Converts to a foreign enum value.
    fn to_foreign(&self) -> EnumValue {
        EnumValue::new(Self::enum_type(), self.member())
    }
}

/// Decodes a foreign value read from `member` into `E`.
///
/// `Null` reads as `None`. An unknown member name is an error when `strict`,
/// and otherwise also reads as `None`.
pub(crate) fn decode_enum<E: ForeignEnum>(
    member: &str,
    value: ForeignValue,
    strict: bool,
) -> Result<Option<E>, InteropError> {
    let value = match value {
        ForeignValue::Null => return Ok(None),
        ForeignValue::Enum(value) => value,
        other => return Err(InteropError::mismatch(member, ValueKind::Enum, other.kind())),
    };

    let expected = E::enum_type();
    if *value.enum_type() != expected {
        return Err(InteropError::EnumTypeMismatch {
            member: member.to_string(),
            expected,
            found: value.enum_type().clone(),
        });
    }

    match E::from_member(value.member()) {
        Some(variant) => Ok(Some(variant)),
        None if strict => Err(InteropError::UnknownEnumMember {
            enum_type: expected,
            value: value.member().to_string(),
        }),
        None => {
            tracing::debug!(
                enum_type = %expected,
                value = value.member(),
                "unknown enum member read as absent"
            );
            Ok(None)
        }
    }
}
