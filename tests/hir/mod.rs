//! HIR layer tests
//!
//! Tests for the semantic model the chain search runs on:
//! - Type signature resolution and the signature cache
//! - Supertype walks and assignability
//! - Member lookup: modes, overrides, accessibility

pub mod tests_member_lookup;
