//! Typed property and method access through a [`Proxy`].
//!
//! Generated wrapper accessors are thin calls into these methods:
//!
//! | Foreign member            | Proxy method                         | Absent value      |
//! |---------------------------|--------------------------------------|-------------------|
//! | scalar property           | [`get`](Proxy::get)                  | [`Scalar::absent`]|
//! | object property           | [`object`](Proxy::object)            | `None`            |
//! | list of objects           | [`objects`](Proxy::objects)          | empty `Vec`       |
//! | list of scalars           | [`scalars`](Proxy::scalars)          | empty `Vec`       |
//! | enum property             | [`enum_value`](Proxy::enum_value)    | `None`            |
//!
//! Object values are always wrapped through the bindings, so a property
//! declared as a base type yields the wrapper for the object's runtime type
//! viewed as the requested type.

use crate::enums::{ForeignEnum, decode_enum};
use crate::error::InteropError;
use crate::value::{ForeignValue, Scalar, ValueKind};
use crate::wrapper::{AnyWrapper, Proxy, Wrapper};

fn scalar_from<T: Scalar>(member: &str, value: ForeignValue) -> Result<T, InteropError> {
    if value.is_null() {
        return Ok(T::absent());
    }
    T::from_foreign(value).map_err(|found| InteropError::mismatch(member, T::KIND, found.kind()))
}

impl Proxy {
    fn read(&self, property: &str) -> Result<ForeignValue, InteropError> {
        tracing::trace!(type_name = %self.declared_type(), property, "get");
        Ok(self.handle().get_property(property)?)
    }

    fn write(&self, property: &str, value: ForeignValue) -> Result<(), InteropError> {
        tracing::trace!(type_name = %self.declared_type(), property, "set");
        Ok(self.handle().set_property(property, value)?)
    }

    fn object_from<W: Wrapper>(
        &self,
        member: &str,
        value: ForeignValue,
    ) -> Result<Option<W>, InteropError> {
        match value {
            ForeignValue::Null => Ok(None),
            ForeignValue::Object(handle) => self.bindings().wrap_as::<W>(handle).map(Some),
            other => Err(InteropError::mismatch(member, ValueKind::Object, other.kind())),
        }
    }

    fn list_from(member: &str, value: ForeignValue) -> Result<Vec<ForeignValue>, InteropError> {
        match value {
            ForeignValue::Null => Ok(Vec::new()),
            ForeignValue::List(items) => Ok(items),
            other => Err(InteropError::mismatch(member, ValueKind::List, other.kind())),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scalars
    // ─────────────────────────────────────────────────────────────────────────

    /// Reads a scalar property. A foreign `Null` reads as [`Scalar::absent`].
    ///
    /// # Errors
    ///
    /// - [`InteropError::Foreign`] if the runtime rejects the read.
    /// - [`InteropError::TypeMismatch`] if the value is of another kind.
    pub fn get<T: Scalar>(&self, property: &str) -> Result<T, InteropError> {
        scalar_from(property, self.read(property)?)
    }

    /// Writes a scalar property.
    ///
    /// # Errors
    ///
    /// Returns [`InteropError::Foreign`] if the runtime rejects the write.
    pub fn set<T: Scalar>(&self, property: &str, value: T) -> Result<(), InteropError> {
        self.write(property, value.into_foreign())
    }

    /// Writes a scalar property, writing [`Scalar::absent`] for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`InteropError::Foreign`] if the runtime rejects the write.
    pub fn set_or_absent<T: Scalar>(&self, property: &str, value: Option<T>) -> Result<(), InteropError> {
        self.set(property, value.unwrap_or_else(T::absent))
    }

    /// Reads a list of scalars. A foreign `Null` reads as an empty list and
    /// `Null` elements read as [`Scalar::absent`].
    ///
    /// # Errors
    ///
    /// - [`InteropError::Foreign`] if the runtime rejects the read.
    /// - [`InteropError::TypeMismatch`] if the value or an element is of
    ///   another kind.
    pub fn scalars<T: Scalar>(&self, property: &str) -> Result<Vec<T>, InteropError> {
        Self::list_from(property, self.read(property)?)?
            .into_iter()
            .map(|item| scalar_from(property, item))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Objects
    // ─────────────────────────────────────────────────────────────────────────

    /// Reads an object property as wrapper `W`.
    ///
    /// # Errors
    ///
    /// - [`InteropError::Foreign`] if the runtime rejects the read.
    /// - [`InteropError::TypeMismatch`] if the value is not an object.
    /// - [`InteropError::MissingWrapperType`] if the object's runtime type has
    ///   no registered wrapper.
    /// - [`InteropError::Cast`] if `W` is not in the object's lattice.
    pub fn object<W: Wrapper>(&self, property: &str) -> Result<Option<W>, InteropError> {
        let value = self.read(property)?;
        self.object_from(property, value)
    }

    /// Reads an object property as the wrapper for its runtime type.
    ///
    /// # Errors
    ///
    /// Same as [`object`](Self::object), without the cast.
    pub fn any_object(&self, property: &str) -> Result<Option<Box<dyn AnyWrapper>>, InteropError> {
        match self.read(property)? {
            ForeignValue::Null => Ok(None),
            ForeignValue::Object(handle) => self.bindings().wrap(handle).map(Some),
            other => Err(InteropError::mismatch(property, ValueKind::Object, other.kind())),
        }
    }

    /// Reads a list of objects, wrapping each element as `W`.
    ///
    /// A foreign `Null` reads as an empty list; `Null` elements are skipped.
    ///
    /// # Errors
    ///
    /// Same as [`object`](Self::object), for the list and every element.
    pub fn objects<W: Wrapper>(&self, property: &str) -> Result<Vec<W>, InteropError> {
        let items = Self::list_from(property, self.read(property)?)?;
        let mut wrapped = Vec::with_capacity(items.len());
        for item in items {
            if let Some(w) = self.object_from::<W>(property, item)? {
                wrapped.push(w);
            }
        }
        Ok(wrapped)
    }

    /// Writes an object property. `None` writes `Null`.
    ///
    /// # Errors
    ///
    /// Returns [`InteropError::Foreign`] if the runtime rejects the write.
    pub fn set_object<W: Wrapper>(&self, property: &str, value: Option<&W>) -> Result<(), InteropError> {
        let value = value.map_or(ForeignValue::Null, |w| {
            ForeignValue::Object(w.proxy().handle().clone())
        });
        self.write(property, value)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Enums
    // ─────────────────────────────────────────────────────────────────────────

    /// Reads an enum property.
    ///
    /// A foreign `Null` reads as `None`. An unknown member is an error under
    /// strict enums and `None` otherwise.
    ///
    /// # Errors
    ///
    /// - [`InteropError::Foreign`] if the runtime rejects the read.
    /// - [`InteropError::TypeMismatch`] if the value is not an enum.
    /// - [`InteropError::EnumTypeMismatch`] if it belongs to another enum.
    /// - [`InteropError::UnknownEnumMember`] under strict enums.
    pub fn enum_value<E: ForeignEnum>(&self, property: &str) -> Result<Option<E>, InteropError> {
        let strict = self.bindings().config().strict_enums;
        decode_enum(property, self.read(property)?, strict)
    }

    /// Writes an enum property.
    ///
    /// # Errors
    ///
    /// Returns [`InteropError::Foreign`] if the runtime rejects the write.
    pub fn set_enum<E: ForeignEnum>(&self, property: &str, value: &E) -> Result<(), InteropError> {
        self.write(property, ForeignValue::Enum(value.to_foreign()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Invokes a method and returns the raw result.
    ///
    /// # Errors
    ///
    /// Returns [`InteropError::Foreign`] if the runtime rejects the call.
    pub fn invoke(&self, method: &str, args: &[ForeignValue]) -> Result<ForeignValue, InteropError> {
        tracing::trace!(type_name = %self.declared_type(), method, args = args.len(), "invoke");
        Ok(self.handle().invoke(method, args)?)
    }

    /// Invokes a method returning a scalar.
    ///
    /// # Errors
    ///
    /// Same as [`invoke`](Self::invoke) and [`get`](Self::get).
    pub fn invoke_scalar<T: Scalar>(&self, method: &str, args: &[ForeignValue]) -> Result<T, InteropError> {
        scalar_from(method, self.invoke(method, args)?)
    }

    /// Invokes a method returning an object.
    ///
    /// # Errors
    ///
    /// Same as [`invoke`](Self::invoke) and [`object`](Self::object).
    pub fn invoke_object<W: Wrapper>(
        &self,
        method: &str,
        args: &[ForeignValue],
    ) -> Result<Option<W>, InteropError> {
        let value = self.invoke(method, args)?;
        self.object_from(method, value)
    }
}
