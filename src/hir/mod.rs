//! High-level IR (HIR): the type model the chain search runs on.
//!
//! ## Key Types
//!
//! - [`TypeDescriptor`] - A nominal or primitive type with an array rank
//! - [`MemberDescriptor`] - A resolved field, method, local or static anchor
//! - [`SymbolService`] - Read access to declarations and the supertype graph
//! - [`TypeIndex`] - In-memory `SymbolService` with a signature cache
//! - [`MemberLookup`] - Accessible members of a type, cached per search
//!
//! ## Layers
//!
//! ```text
//! SymbolService            ← declarations, supertypes, signature resolution
//!     │
//!     ▼
//! supertypes / is_assignable
//!     │
//!     ▼
//! MemberLookup             ← mode filter, accessibility, override collapse
//! ```

mod error;
mod hierarchy;
mod index;
mod lookup;
mod members;
mod service;
mod symbols;
mod types;

pub use error::HirError;
pub use hierarchy::{Supertypes, is_assignable, is_subtype, supertypes};
pub use index::{
    DEFAULT_SIGNATURE_CACHE_CAPACITY, MemberDef, SignatureCache, TypeDef, TypeIndex,
};
pub use lookup::{Accessibility, LookupStats, MemberKey, MemberLookup};
pub use members::{MemberDescriptor, MemberKind, SymbolRef};
pub use service::SymbolService;
pub use symbols::{DeclKind, MemberData, ParamData, TypeData, TypeKind, Visibility};
pub use types::{PrimitiveType, TypeDescriptor, TypeHandle, TypeSignature};
