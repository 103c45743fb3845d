//! Discovered chains.

use std::sync::Arc;

use crate::hir::{MemberDescriptor, TypeDescriptor};

/// One discovered chain: an ordered, immutable sequence of member accesses
/// starting at an entry point.
///
/// `expected_dimension` is the array rank of the target the chain matched;
/// when the last element has more dimensions the renderer indexes them away.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainPath {
    elements: Arc<[MemberDescriptor]>,
    target: TypeDescriptor,
}

impl ChainPath {
    /// Build a chain. `elements` must be non-empty.
    pub(crate) fn new(elements: Vec<MemberDescriptor>, target: TypeDescriptor) -> Self {
        debug_assert!(!elements.is_empty(), "chains have at least an entry point");
        Self {
            elements: elements.into(),
            target,
        }
    }

    pub fn elements(&self) -> &[MemberDescriptor] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The entry point the chain starts from.
    pub fn first(&self) -> &MemberDescriptor {
        &self.elements[0]
    }

    /// The element whose value ends the chain.
    pub fn last(&self) -> &MemberDescriptor {
        &self.elements[self.elements.len() - 1]
    }

    /// The target type this chain was accepted for.
    pub fn target(&self) -> TypeDescriptor {
        self.target
    }

    pub fn expected_dimension(&self) -> u8 {
        self.target.dimension()
    }

    /// Array dimensions of the last element beyond the expected ones.
    pub fn extra_dimensions(&self) -> u8 {
        self.last().dimension().saturating_sub(self.expected_dimension())
    }
}
