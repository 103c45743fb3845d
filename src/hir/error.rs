//! Error types for symbol-service reads and descriptor construction.

use thiserror::Error;

use crate::base::{MemberId, TypeId};

/// Errors raised while reading the type model.
///
/// None of these escape a chain search: lookups skip the offending member or
/// supertype branch and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HirError {
    /// The type id is not known to the symbol service.
    #[error("unknown type {0}")]
    UnknownType(TypeId),

    /// The member id is not known to the symbol service.
    #[error("unknown member {0}")]
    UnknownMember(MemberId),

    /// A type signature did not resolve to any known type.
    #[error("unresolved type signature `{signature}` in {context}")]
    UnresolvedSignature { signature: String, context: TypeId },

    /// A symbol's type could not be classified as a value type.
    #[error("cannot classify `{name}` of type `{signature}`")]
    Unclassifiable { name: String, signature: String },
}

impl HirError {
    /// Create an unresolved signature error.
    pub fn unresolved(signature: impl Into<String>, context: TypeId) -> Self {
        Self::UnresolvedSignature {
            signature: signature.into(),
            context,
        }
    }

    /// Create an unclassifiable symbol error.
    pub fn unclassifiable(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::Unclassifiable {
            name: name.into(),
            signature: signature.into(),
        }
    }
}
