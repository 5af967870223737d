//! Common error infrastructure for playmode-core.
//!
//! Almost every in-play failure is recovered locally as a status message or a
//! default value. The few operations that can refuse (equipping an item that
//! is not held, using an item with no effect) return typed errors that
//! implement [`GameError`] so callers can classify them uniformly.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was refused; state is unchanged and play continues.
    ///
    /// Examples: item not in inventory, empty equipment slot
    Validation,

    /// Unexpected state inconsistency that should be investigated.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all playmode-core errors.
///
/// Use `#[derive(thiserror::Error)]` for the Display/Error impl and classify
/// severity by recoverability, not impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
