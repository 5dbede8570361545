//! Behavioural switches for a set of bindings.

/// How downcasts are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CastPolicy {
    /// A downcast also requires the handle's runtime type to be a subtype of
    /// the target.
    #[default]
    Verified,
    /// A downcast only requires the target to be a known descendant of the
    /// declared type. Reads through a mistyped proxy fail later, on the
    /// foreign side.
    Trusted,
}

/// Configuration applied to every wrapper created from a
/// [`Bindings`](crate::Bindings).
///
/// # Example
///
/// ```
/// use veneer_interop::{BindingsConfig, CastPolicy};
///
/// let config = BindingsConfig::new()
///     .with_cast_policy(CastPolicy::Trusted)
///     .with_strict_enums(false);
/// assert_eq!(config.cast_policy, CastPolicy::Trusted);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingsConfig {
    /// Downcast checking.
    pub cast_policy: CastPolicy,
    /// Whether an unrecognized enum member is an error. When `false` it reads
    /// back as absent.
    pub strict_enums: bool,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingsConfig {
    /// Verified casts, strict enums.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cast_policy: CastPolicy::Verified,
            strict_enums: true,
        }
    }

    /// Sets the cast policy.
    #[must_use]
    pub const fn with_cast_policy(mut self, policy: CastPolicy) -> Self {
        self.cast_policy = policy;
        self
    }

    /// Sets enum strictness.
    #[must_use]
    pub const fn with_strict_enums(mut self, strict: bool) -> Self {
        self.strict_enums = strict;
        self
    }
}
