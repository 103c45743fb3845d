//! # chainsearch-base
//!
//! Core library for chain completion: given the values in scope at a code
//! location and the type expected there, find short member-access chains
//! (`order.getCustomer().getAddress()`) that produce a value of that type.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Chain search engine, entry points, completion items
//!   ↓
//! hir       → Type/member descriptors, symbol service, member lookup
//!   ↓
//! base      → Primitives (TypeId, MemberId, LocalId, string interning)
//! ```

// ============================================================================
// MODULES (dependency order: base → hir → ide)
// ============================================================================

/// Foundation types: arena ids, string interning
pub mod base;

/// Semantic model: types, members, hierarchy, accessibility
pub mod hir;

/// IDE features: chain search and completion
pub mod ide;

// Re-export foundation types
pub use base::{IStr, Interner, LocalId, MemberId, TypeId};

// Re-export the semantic model entry points
pub use hir::{
    HirError, MemberDescriptor, MemberKind, SymbolService, TypeDescriptor, TypeIndex,
};

// Re-export the search API
pub use ide::{
    ChainOptions, ChainPath, ChainRequest, ChainSearchEngine, CompletionItem, SearchBounds,
    chain_completions,
};
