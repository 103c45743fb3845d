//! Entry points: what a chain may start from at a completion location.

use smol_str::SmolStr;

use crate::base::{LocalId, TypeId};
use crate::hir::{MemberDescriptor, MemberKind, MemberLookup, SymbolService, TypeDescriptor};

use super::engine::ExcludedTypes;

/// A local variable in scope at the completion location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalVar {
    pub id: LocalId,
    pub name: SmolStr,
    /// Declared type as written, e.g. `Order` or `int[]`.
    pub signature: String,
}

impl LocalVar {
    pub fn new(id: LocalId, name: &str, signature: &str) -> Self {
        Self {
            id,
            name: SmolStr::new(name),
            signature: signature.to_string(),
        }
    }
}

/// Builds the ordered entry point list for one completion location.
///
/// Order:
/// 1. locals, latest declared first
/// 2. members of the receiver type and its supertypes; instance members
///    only outside a static context
/// 3. static anchors for the requested types
///
/// A receiver field whose name is shadowed by a local keeps its place but
/// is marked as needing an explicit receiver.
#[derive(Clone, Debug, Default)]
pub struct EntryPointCollector {
    static_context: bool,
    /// In declaration order.
    locals: Vec<LocalVar>,
    static_anchors: Vec<TypeId>,
}

impl EntryPointCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_static_context(mut self, static_context: bool) -> Self {
        self.static_context = static_context;
        self
    }

    pub fn with_local(mut self, local: LocalVar) -> Self {
        self.locals.push(local);
        self
    }

    pub fn with_locals(mut self, locals: impl IntoIterator<Item = LocalVar>) -> Self {
        self.locals.extend(locals);
        self
    }

    pub fn with_static_anchor(mut self, ty: TypeId) -> Self {
        self.static_anchors.push(ty);
        self
    }

    pub fn with_static_anchors(mut self, types: impl IntoIterator<Item = TypeId>) -> Self {
        self.static_anchors.extend(types);
        self
    }

    /// Collect entry points, reading receiver members through `lookup` so
    /// the search reuses what was computed here.
    pub fn collect<S: SymbolService + ?Sized>(
        &self,
        lookup: &mut MemberLookup<'_, S>,
        excluded: &ExcludedTypes,
    ) -> Vec<MemberDescriptor> {
        let service = lookup.service();
        let receiver = lookup.accessibility().context();
        let mut entries = Vec::new();

        for local in self.locals.iter().rev() {
            match MemberDescriptor::local(service, local.id, &local.name, &local.signature, receiver) {
                Ok(descriptor) => entries.push(descriptor),
                Err(err) => tracing::debug!(name = %local.name, %err, "local skipped"),
            }
        }

        let receiver_ty = TypeDescriptor::nominal(receiver);
        let modes: &[bool] = if self.static_context {
            &[true]
        } else {
            &[false, true]
        };
        for &static_only in modes {
            for member in lookup.find_members(&receiver_ty, static_only).iter() {
                let shadowed = member.kind() == MemberKind::Field
                    && self.locals.iter().any(|local| local.name.as_str() == member.name());
                entries.push(member.clone().with_explicit_receiver(shadowed));
            }
        }

        for &ty in &self.static_anchors {
            match MemberDescriptor::type_ref(service, ty) {
                Ok(anchor) => entries.push(anchor),
                Err(err) => tracing::debug!(%ty, %err, "static anchor skipped"),
            }
        }

        entries.retain(|entry| !excluded.contains(&entry.return_type()));
        tracing::trace!(count = entries.len(), "entry points collected");
        entries
    }
}
