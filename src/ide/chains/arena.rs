//! Structural sharing for partial chains.
//!
//! Each partial chain is a node holding its last element and a link to the
//! chain it extends, so growing a chain by one element is O(1) instead of
//! copying the whole prefix.

use crate::hir::{MemberDescriptor, SymbolRef};

/// Index of a node in a [`ChainArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

#[derive(Debug)]
struct ChainNode {
    parent: Option<NodeId>,
    element: MemberDescriptor,
    len: u32,
}

/// Append-only storage of partial chains for one target.
#[derive(Debug, Default)]
pub struct ChainArena {
    nodes: Vec<ChainNode>,
}

impl ChainArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-element chain.
    pub fn root(&mut self, element: MemberDescriptor) -> NodeId {
        self.alloc(ChainNode {
            parent: None,
            element,
            len: 1,
        })
    }

    /// `parent`'s chain extended by `element`.
    pub fn extend(&mut self, parent: NodeId, element: MemberDescriptor) -> NodeId {
        let len = self.node(parent).len + 1;
        self.alloc(ChainNode {
            parent: Some(parent),
            element,
            len,
        })
    }

    /// The last element of the chain ending at `id`.
    pub fn last(&self, id: NodeId) -> &MemberDescriptor {
        &self.node(id).element
    }

    /// Number of elements in the chain ending at `id`.
    pub fn chain_len(&self, id: NodeId) -> usize {
        self.node(id).len as usize
    }

    /// Whether `symbol` already occurs in the chain ending at `id`.
    pub fn contains(&self, id: NodeId, symbol: SymbolRef) -> bool {
        self.ancestry(id).any(|node| node.element.symbol() == symbol)
    }

    /// The chain ending at `id`, entry point first.
    pub fn materialize(&self, id: NodeId) -> Vec<MemberDescriptor> {
        let mut elements: Vec<_> = self.ancestry(id).map(|node| node.element.clone()).collect();
        elements.reverse();
        elements
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    fn alloc(&mut self, node: ChainNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> &ChainNode {
        &self.nodes[id.0 as usize]
    }

    fn ancestry(&self, id: NodeId) -> impl Iterator<Item = &ChainNode> + '_ {
        std::iter::successors(Some(self.node(id)), |node| node.parent.map(|p| self.node(p)))
    }
}
