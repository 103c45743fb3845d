//! Supertype graph traversal and assignability.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::base::TypeId;

use super::service::SymbolService;
use super::types::{TypeDescriptor, TypeHandle};

/// Breadth-first walk over a type and all of its supertypes.
///
/// Yields `start` first, then superclass before superinterfaces at each
/// level. Every type is yielded once even under diamond inheritance or a
/// cyclic (malformed) hierarchy. Supertype reads that fail are skipped.
pub struct Supertypes<'a, S: ?Sized> {
    service: &'a S,
    queue: VecDeque<TypeId>,
    visited: FxHashSet<TypeId>,
}

/// Walk `start` and its supertype closure.
pub fn supertypes<S: SymbolService + ?Sized>(service: &S, start: TypeId) -> Supertypes<'_, S> {
    let mut visited = FxHashSet::default();
    visited.insert(start);
    Supertypes {
        service,
        queue: VecDeque::from([start]),
        visited,
    }
}

impl<S: SymbolService + ?Sized> Iterator for Supertypes<'_, S> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.queue.pop_front()?;

        match self.service.superclass(current) {
            Ok(Some(superclass)) => {
                if self.visited.insert(superclass) {
                    self.queue.push_back(superclass);
                }
            }
            Ok(None) => {}
            Err(err) => tracing::debug!(%current, %err, "skipping superclass"),
        }

        match self.service.superinterfaces(current) {
            Ok(interfaces) => {
                for &interface in interfaces {
                    if self.visited.insert(interface) {
                        self.queue.push_back(interface);
                    }
                }
            }
            Err(err) => tracing::debug!(%current, %err, "skipping superinterfaces"),
        }

        Some(current)
    }
}

/// True if `sub` is `sup` or reaches it through its supertype closure.
pub fn is_subtype<S: SymbolService + ?Sized>(service: &S, sub: TypeId, sup: TypeId) -> bool {
    sub == sup || supertypes(service, sub).any(|ty| ty == sup)
}

/// Assignment compatibility of a value of type `from` to a slot of type `to`.
///
/// - primitive to primitive: only the same primitive (no widening)
/// - primitive to nominal or nominal to primitive: never (no boxing)
/// - nominal to nominal: `to.dimension <= from.dimension` and the element
///   type of `from` is a subtype of the element type of `to`
///
/// A `from` with more dimensions than `to` is accepted; the extra
/// dimensions are indexed away when the chain is rendered.
pub fn is_assignable<S: SymbolService + ?Sized>(
    service: &S,
    from: &TypeDescriptor,
    to: &TypeDescriptor,
) -> bool {
    match (from.handle(), to.handle()) {
        (TypeHandle::Primitive(a), TypeHandle::Primitive(b)) => {
            a == b && to.dimension() <= from.dimension()
        }
        (TypeHandle::Nominal(sub), TypeHandle::Nominal(sup)) => {
            to.dimension() <= from.dimension() && is_subtype(service, sub, sup)
        }
        _ => false,
    }
}
