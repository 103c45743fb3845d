//! Shared fixtures and assertions for integration tests.

pub mod chain_assertions;
pub mod counting_service;
pub mod shop_fixture;
