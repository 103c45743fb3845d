//! IDE feature tests
//!
//! Tests for:
//! - Chain search scenarios and result invariants
//! - Cancellation and bounds
//! - Chain completion items

pub mod tests_completion;
