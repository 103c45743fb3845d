//! The bounded breadth-first chain search.
//!
//! For each target type the engine seeds a queue with one single-element
//! chain per entry point and repeatedly:
//!
//! 1. pops a chain and tests whether its last element ends it
//!    ([`ChainSearchEngine::is_valid_end`]);
//! 2. records ending chains that are at least `min_depth` long, stopping the
//!    whole search at `max_chains`;
//! 3. otherwise expands the chain through [`MemberLookup`] while it is
//!    shorter than `max_depth` and the queue has not grown past its ceiling.
//!
//! A chain that ends is never expanded further, even when it is too short to
//! be recorded. Results are best-effort: bounds and cancellation truncate
//! them silently.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::TypeId;
use crate::hir::{
    LookupStats, MemberDescriptor, MemberLookup, PrimitiveType, SymbolRef, SymbolService,
    TypeDescriptor, TypeHandle, is_assignable,
};

use super::arena::{ChainArena, NodeId};
use super::cancel::CancelCheck;
use super::options::SearchBounds;
use super::path::ChainPath;

// ============================================================================
// EXCLUDED TYPES
// ============================================================================

/// Type names pruned from entry points, lookup results and targets.
///
/// Names are resolved once up front, as qualified names first and then the
/// way a signature written in `context` resolves, so a simple name like
/// `Customer` works when it is unambiguous. Matching compares element types,
/// so excluding `shop.Customer` also prunes `Customer[]`.
#[derive(Debug, Clone, Default)]
pub struct ExcludedTypes {
    types: FxHashSet<TypeId>,
    primitives: FxHashSet<PrimitiveType>,
}

impl ExcludedTypes {
    pub fn resolve<S, I, T>(service: &S, context: TypeId, names: I) -> Self
    where
        S: SymbolService + ?Sized,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut excluded = Self::default();
        for name in names {
            let name = name.as_ref();
            if let Some(primitive) = PrimitiveType::from_keyword(name) {
                excluded.primitives.insert(primitive);
            } else if let Some(ty) = service.find_type(name) {
                excluded.types.insert(ty);
            } else if let Some(resolved) = service.resolve_type_from_signature(name, context) {
                match resolved.handle() {
                    TypeHandle::Nominal(id) => excluded.types.insert(id),
                    TypeHandle::Primitive(p) => excluded.primitives.insert(p),
                };
            } else {
                tracing::trace!(name, "excluded type not in model");
            }
        }
        excluded
    }

    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        match ty.handle() {
            TypeHandle::Nominal(id) => self.types.contains(&id),
            TypeHandle::Primitive(p) => self.primitives.contains(&p),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.primitives.is_empty()
    }
}

// ============================================================================
// STATS
// ============================================================================

/// Counters describing what one search did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Partial chains taken off the queue.
    pub chains_popped: usize,
    /// Partial chains whose last element was expanded through member lookup.
    pub chains_expanded: usize,
    /// Chains recorded as results.
    pub chains_recorded: usize,
    /// Candidates dropped because they were excluded or already in the chain.
    pub candidates_pruned: usize,
    /// End-of-chain tests that ran the assignability check.
    pub assignability_computations: usize,
    /// End-of-chain tests answered from the cache.
    pub assignability_cache_hits: usize,
    pub lookup: LookupStats,
    pub canceled: bool,
    /// The search stopped because `max_chains` was reached.
    pub capped: bool,
    /// At least one chain was dropped because the queue was full.
    pub queue_full: bool,
}

// ============================================================================
// ENGINE
// ============================================================================

/// One chain search: owns every cache it uses.
///
/// Construct a fresh engine per completion request; engines are not meant to
/// be shared between concurrent searches.
///
/// ```ignore
/// let mut engine = ChainSearchEngine::new(&index, current_class)
///     .with_bounds(SearchBounds::new(10, 1, 3))
///     .with_excluded_types(["java.lang.Object"]);
/// let chains = engine.search(&entry_points, &[expected], &NeverCancel);
/// ```
pub struct ChainSearchEngine<'a, S: ?Sized> {
    lookup: MemberLookup<'a, S>,
    bounds: SearchBounds,
    excluded: ExcludedTypes,
    /// `(edge, target) -> is valid end`
    end_cache: FxHashMap<(SymbolRef, TypeDescriptor), bool>,
    arena: ChainArena,
    stats: SearchStats,
}

impl<'a, S: SymbolService + ?Sized> ChainSearchEngine<'a, S> {
    /// Create an engine computing accessibility from `receiver_type`.
    pub fn new(service: &'a S, receiver_type: TypeId) -> Self {
        Self {
            lookup: MemberLookup::new(service, receiver_type),
            bounds: SearchBounds::default(),
            excluded: ExcludedTypes::default(),
            end_cache: FxHashMap::default(),
            arena: ChainArena::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: SearchBounds) -> Self {
        self.bounds = bounds.normalized();
        self
    }

    /// Prune the given type names: qualified, primitive keywords, or names
    /// resolvable from the receiver type.
    pub fn with_excluded_types<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let context = self.lookup.accessibility().context();
        self.excluded = ExcludedTypes::resolve(self.lookup.service(), context, names);
        self
    }

    pub fn bounds(&self) -> SearchBounds {
        self.bounds
    }

    pub fn excluded(&self) -> &ExcludedTypes {
        &self.excluded
    }

    /// The member lookup this search uses; shares its caches.
    pub fn lookup_mut(&mut self) -> &mut MemberLookup<'a, S> {
        &mut self.lookup
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            lookup: self.lookup.stats(),
            ..self.stats
        }
    }

    /// Search chains from `entry_points` to any of `targets`.
    ///
    /// Targets are processed in order and share one result list and one
    /// `max_chains` budget. The returned list is incomplete when a bound was
    /// hit or `cancel` fired; see [`stats`](Self::stats).
    pub fn search<C: CancelCheck + ?Sized>(
        &mut self,
        entry_points: &[MemberDescriptor],
        targets: &[TypeDescriptor],
        cancel: &C,
    ) -> Vec<ChainPath> {
        let seeds: Vec<MemberDescriptor> = entry_points
            .iter()
            .filter(|entry| self.is_usable_entry(entry))
            .cloned()
            .collect();
        let mut results = Vec::new();

        'targets: for target in targets {
            if cancel.is_canceled() {
                self.stats.canceled = true;
                break;
            }
            if self.excluded.contains(target) {
                tracing::debug!(?target, "skipping excluded target");
                continue;
            }

            self.arena.clear();
            let mut queue: VecDeque<NodeId> = seeds
                .iter()
                .map(|entry| self.arena.root(entry.clone()))
                .collect();

            loop {
                if cancel.is_canceled() {
                    self.stats.canceled = true;
                    break 'targets;
                }
                let Some(node) = queue.pop_front() else {
                    break;
                };
                self.stats.chains_popped += 1;

                let edge = self.arena.last(node).clone();
                let len = self.arena.chain_len(node);

                if self.is_valid_end(&edge, target) {
                    if len >= self.bounds.min_depth {
                        let path = ChainPath::new(self.arena.materialize(node), *target);
                        tracing::trace!(len, last = path.last().name(), "chain found");
                        results.push(path);
                        self.stats.chains_recorded += 1;
                        if results.len() >= self.bounds.max_chains {
                            self.stats.capped = true;
                            break 'targets;
                        }
                    }
                    continue;
                }

                if len >= self.bounds.max_depth {
                    continue;
                }
                if queue.len() > self.bounds.max_queue {
                    if !self.stats.queue_full {
                        tracing::debug!(max_queue = self.bounds.max_queue, "chain queue full");
                    }
                    self.stats.queue_full = true;
                    continue;
                }
                self.expand(node, &edge, &mut queue);
            }
        }

        let stats = self.stats();
        tracing::debug!(
            found = results.len(),
            popped = stats.chains_popped,
            expanded = stats.chains_expanded,
            canceled = stats.canceled,
            capped = stats.capped,
            queue_full = stats.queue_full,
            "chain search finished"
        );
        results
    }

    /// Whether `edge` ends a chain for `target`.
    ///
    /// Static anchors never end a chain. Otherwise the answer is the
    /// assignability of the edge's return type to the target, cached per
    /// `(edge, target)` for the life of the engine.
    pub fn is_valid_end(&mut self, edge: &MemberDescriptor, target: &TypeDescriptor) -> bool {
        if edge.is_type_ref() {
            return false;
        }
        let key = (edge.symbol(), *target);
        if let Some(&cached) = self.end_cache.get(&key) {
            self.stats.assignability_cache_hits += 1;
            return cached;
        }
        self.stats.assignability_computations += 1;
        let valid = is_assignable(self.lookup.service(), &edge.return_type(), target);
        self.end_cache.insert(key, valid);
        valid
    }

    fn is_usable_entry(&self, entry: &MemberDescriptor) -> bool {
        if self.excluded.contains(&entry.return_type()) {
            return false;
        }
        match entry.symbol() {
            SymbolRef::Member(member) => self.lookup.is_accessible(member),
            SymbolRef::Local(_) | SymbolRef::Type(_) => true,
        }
    }

    fn expand(&mut self, node: NodeId, edge: &MemberDescriptor, queue: &mut VecDeque<NodeId>) {
        let static_only = edge.is_type_ref();
        let candidates = self.lookup.find_members(&edge.return_type(), static_only);
        self.stats.chains_expanded += 1;

        for candidate in candidates.iter() {
            if self.excluded.contains(&candidate.return_type())
                || self.arena.contains(node, candidate.symbol())
            {
                self.stats.candidates_pruned += 1;
                continue;
            }
            let child = self.arena.extend(node, candidate.clone());
            queue.push_back(child);
        }
    }
}
