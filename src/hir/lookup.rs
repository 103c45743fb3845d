//! Member lookup: which fields and methods can follow a receiver.
//!
//! [`MemberLookup`] answers "what members of type T can be accessed from the
//! current class", walking T's supertype graph, filtering by static/instance
//! mode and by access modifiers, and collapsing overrides so each callable
//! slot appears once.
//!
//! ## Instance vs. static mode
//!
//! | mode     | fields       | methods                                  |
//! |----------|--------------|------------------------------------------|
//! | instance | non-static   | non-static, non-constructor, non-void    |
//! | static   | static       | static, non-constructor, non-void        |
//!
//! Methods returning primitives are kept in both modes: they cannot be
//! expanded further but they can end a chain whose target is a primitive.
//!
//! Results are cached per `(type, mode)` for the lifetime of the lookup,
//! which is the lifetime of one search.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::base::{IStr, MemberId, TypeId};

use super::hierarchy::supertypes;
use super::members::MemberDescriptor;
use super::service::SymbolService;
use super::symbols::{MemberData, Visibility};
use super::types::{TypeDescriptor, TypeSignature};

// ============================================================================
// ACCESSIBILITY
// ============================================================================

/// Access rules evaluated from one context type (the class the chain is
/// being built in).
#[derive(Debug, Clone)]
pub struct Accessibility {
    context: TypeId,
    package: Option<IStr>,
    outermost: TypeId,
    /// The context and every supertype of it.
    ancestors: FxHashSet<TypeId>,
}

impl Accessibility {
    pub fn new<S: SymbolService + ?Sized>(service: &S, context: TypeId) -> Self {
        Self {
            context,
            package: service.package_of(context),
            outermost: service.outermost_type(context),
            ancestors: supertypes(service, context).collect(),
        }
    }

    pub fn context(&self) -> TypeId {
        self.context
    }

    /// Whether `member` may be referenced from the context type.
    ///
    /// - public: always
    /// - declared on the context type itself: always
    /// - protected: same package, or the declaring type is the context or
    ///   one of its ancestors
    /// - private: context and declaring type share a top-level type
    /// - package-private: same package
    pub fn is_accessible<S: SymbolService + ?Sized>(&self, service: &S, member: &MemberData) -> bool {
        let declaring = member.declaring_type;
        if declaring == self.context {
            return true;
        }
        match member.visibility {
            Visibility::Public => true,
            Visibility::Protected => {
                self.same_package(service, declaring) || self.ancestors.contains(&declaring)
            }
            Visibility::Private => service.outermost_type(declaring) == self.outermost,
            Visibility::Package => self.same_package(service, declaring),
        }
    }

    fn same_package<S: SymbolService + ?Sized>(&self, service: &S, ty: TypeId) -> bool {
        match (&self.package, service.package_of(ty)) {
            (Some(ours), Some(theirs)) => *ours == theirs,
            _ => false,
        }
    }
}

// ============================================================================
// MEMBER KEY
// ============================================================================

/// Identity of a callable slot: overriding members share a key.
///
/// Name plus erased parameter signatures; the return type is not part of the
/// key so covariant overrides still collapse.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberKey {
    pub is_method: bool,
    pub name: SmolStr,
    pub parameters: Vec<String>,
}

impl MemberKey {
    pub fn of(member: &MemberData) -> Self {
        Self {
            is_method: member.is_method(),
            name: member.name.clone(),
            parameters: member
                .parameters
                .iter()
                .map(|p| match TypeSignature::parse(&p.signature) {
                    Some(sig) => sig.erased(),
                    None => p.signature.to_string(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// LOOKUP
// ============================================================================

/// Cache counters, exposed for instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LookupStats {
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Members skipped because they could not be read or classified.
    pub skipped_members: usize,
}

/// Per-search member lookup with accessibility filtering and caching.
pub struct MemberLookup<'a, S: ?Sized> {
    service: &'a S,
    access: Accessibility,
    members_by_type: FxHashMap<(TypeId, bool), Rc<[MemberDescriptor]>>,
    /// One descriptor per declared member; `None` when it failed to classify.
    descriptors: FxHashMap<MemberId, Option<MemberDescriptor>>,
    stats: LookupStats,
}

impl<'a, S: SymbolService + ?Sized> MemberLookup<'a, S> {
    /// Create a lookup evaluating accessibility from `context`.
    pub fn new(service: &'a S, context: TypeId) -> Self {
        Self {
            service,
            access: Accessibility::new(service, context),
            members_by_type: FxHashMap::default(),
            descriptors: FxHashMap::default(),
            stats: LookupStats::default(),
        }
    }

    pub fn service(&self) -> &'a S {
        self.service
    }

    pub fn accessibility(&self) -> &Accessibility {
        &self.access
    }

    pub fn stats(&self) -> LookupStats {
        self.stats
    }

    /// Accessible members of `ty` and its supertypes, most specific first.
    ///
    /// Primitive, `void` and array types have no members.
    pub fn find_members(&mut self, ty: &TypeDescriptor, static_only: bool) -> Rc<[MemberDescriptor]> {
        let Some(type_id) = ty.type_id().filter(|_| !ty.is_array()) else {
            return Vec::new().into();
        };

        if let Some(cached) = self.members_by_type.get(&(type_id, static_only)) {
            self.stats.cache_hits += 1;
            return Rc::clone(cached);
        }
        self.stats.cache_misses += 1;

        let members: Rc<[MemberDescriptor]> = self.collect_members(type_id, static_only).into();
        tracing::trace!(
            ty = %type_id,
            static_only,
            count = members.len(),
            "member lookup"
        );
        self.members_by_type
            .insert((type_id, static_only), Rc::clone(&members));
        members
    }

    /// Whether a declared member is accessible from the lookup context.
    pub fn is_accessible(&self, member: MemberId) -> bool {
        self.service
            .member_data(member)
            .is_ok_and(|data| self.access.is_accessible(self.service, data))
    }

    /// The (cached) descriptor for a declared member.
    pub fn descriptor(&mut self, member: MemberId) -> Option<MemberDescriptor> {
        if let Some(cached) = self.descriptors.get(&member) {
            return cached.clone();
        }
        let descriptor = match MemberDescriptor::from_member(self.service, member) {
            Ok(descriptor) => Some(descriptor),
            Err(err) => {
                tracing::debug!(%member, %err, "member excluded from search");
                self.stats.skipped_members += 1;
                None
            }
        };
        self.descriptors.insert(member, descriptor.clone());
        descriptor
    }

    fn collect_members(&mut self, ty: TypeId, static_only: bool) -> Vec<MemberDescriptor> {
        let service = self.service;
        let mut seen_keys: FxHashSet<MemberKey> = FxHashSet::default();
        let mut result = Vec::new();

        for current in supertypes(service, ty) {
            let declared = match service.declared_members(current) {
                Ok(declared) => declared,
                Err(err) => {
                    tracing::debug!(ty = %current, %err, "skipping declared members");
                    continue;
                }
            };

            for &member in declared {
                let data = match service.member_data(member) {
                    Ok(data) => data,
                    Err(err) => {
                        tracing::debug!(%member, %err, "skipping member");
                        self.stats.skipped_members += 1;
                        continue;
                    }
                };
                if !passes_mode_filter(data, static_only)
                    || !self.access.is_accessible(service, data)
                {
                    continue;
                }
                // First (most specific) classifiable declaration of a slot wins.
                let key = MemberKey::of(data);
                if seen_keys.contains(&key) {
                    continue;
                }
                if let Some(descriptor) = self.descriptor(member) {
                    seen_keys.insert(key);
                    result.push(descriptor);
                }
            }
        }

        result
    }
}

fn passes_mode_filter(member: &MemberData, static_only: bool) -> bool {
    if member.is_static != static_only || member.is_constructor() {
        return false;
    }
    if member.is_method() {
        // Void check on the raw signature; unresolvable returns fail later.
        return TypeSignature::parse(&member.type_signature).is_none_or(|sig| {
            sig.base != "void" || sig.dimension > 0
        });
    }
    true
}
