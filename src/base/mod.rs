//! Foundation types shared by the semantic model and the search engine.
//!
//! - [`TypeId`], [`MemberId`], [`LocalId`] - Compact arena identifiers
//! - [`Interner`], [`IStr`] - String interning
//!
//! This module has NO dependencies on other crate modules.

mod ids;
mod intern;

pub use ids::{LocalId, MemberId, TypeId};
pub use intern::{IStr, Interner};
