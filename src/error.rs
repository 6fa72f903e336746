//! Error type shared by the analyzer and the container.

use core::fmt;

/// The error type for ill-formed alternative lists and failed extractions.
///
/// Only [`VariantError::TypeMismatch`] is produced on a live instance; the
/// other two describe alternative lists that can never hold a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantError {
    /// An alternative is a reference type.
    ReferenceAlternative {
        /// Name of the offending alternative.
        type_name: &'static str,
    },
    /// An alternative appears more than once in the list.
    DuplicateAlternative {
        /// Name of the repeated alternative.
        type_name: &'static str,
    },
    /// `get` asked for a type that is not the live alternative.
    TypeMismatch {
        /// The type that was asked for.
        requested: &'static str,
        /// The type that is actually live.
        active: &'static str,
    },
}

impl VariantError {
    /// Returns `true` if this error describes an ill-formed alternative list.
    pub fn is_ill_formed(&self) -> bool {
        matches!(
            self,
            Self::ReferenceAlternative { .. } | Self::DuplicateAlternative { .. }
        )
    }
}

impl fmt::Display for VariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReferenceAlternative { type_name } => {
                write!(f, "reference types are not permitted in variant: `{type_name}`")
            }
            Self::DuplicateAlternative { type_name } => {
                write!(f, "variant type arguments contain duplicate type `{type_name}`")
            }
            Self::TypeMismatch { requested, active } => write!(
                f,
                "variant does not contain value of type `{requested}` (active alternative is `{active}`)"
            ),
        }
    }
}

impl std::error::Error for VariantError {}
