//! Arena identifiers for types, members and locals.
//!
//! All three use `u32` for compact storage (supports ~4 billion entries) and
//! index straight into the owning arena.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from an arena index.
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Get the index into the arena.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

arena_id!(
    /// A nominal (class/interface) type known to a symbol service.
    TypeId,
    "type"
);

arena_id!(
    /// A declared field, method or constructor.
    MemberId,
    "member"
);

arena_id!(
    /// A local variable or parameter visible at a completion location.
    LocalId,
    "local"
);
