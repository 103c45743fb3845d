//! A symbol service wrapper that counts how often it is asked things and can
//! make chosen reads fail.

use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashSet;

use chainsearch::base::{MemberId, TypeId};
use chainsearch::hir::{HirError, MemberData, SymbolService, TypeData, TypeDescriptor};

pub struct CountingService<'a, S: ?Sized> {
    inner: &'a S,
    supertype_reads: AtomicUsize,
    member_reads: AtomicUsize,
    /// Types whose declared member list cannot be read.
    broken_types: FxHashSet<TypeId>,
    broken_members: FxHashSet<MemberId>,
}

impl<'a, S: SymbolService + ?Sized> CountingService<'a, S> {
    pub fn new(inner: &'a S) -> Self {
        Self {
            inner,
            supertype_reads: AtomicUsize::new(0),
            member_reads: AtomicUsize::new(0),
            broken_types: FxHashSet::default(),
            broken_members: FxHashSet::default(),
        }
    }

    /// Fail `declared_members` for `ty`.
    pub fn with_broken_type(mut self, ty: TypeId) -> Self {
        self.broken_types.insert(ty);
        self
    }

    /// Fail `member_data` for `member`.
    pub fn with_broken_member(mut self, member: MemberId) -> Self {
        self.broken_members.insert(member);
        self
    }

    /// Superclass plus superinterface reads.
    pub fn supertype_reads(&self) -> usize {
        self.supertype_reads.load(Ordering::Relaxed)
    }

    pub fn member_reads(&self) -> usize {
        self.member_reads.load(Ordering::Relaxed)
    }
}

impl<S: SymbolService + ?Sized> SymbolService for CountingService<'_, S> {
    fn type_data(&self, ty: TypeId) -> Result<&TypeData, HirError> {
        self.inner.type_data(ty)
    }

    fn member_data(&self, member: MemberId) -> Result<&MemberData, HirError> {
        if self.broken_members.contains(&member) {
            return Err(HirError::UnknownMember(member));
        }
        self.inner.member_data(member)
    }

    fn declared_members(&self, ty: TypeId) -> Result<&[MemberId], HirError> {
        self.member_reads.fetch_add(1, Ordering::Relaxed);
        if self.broken_types.contains(&ty) {
            return Err(HirError::UnknownType(ty));
        }
        self.inner.declared_members(ty)
    }

    fn superclass(&self, ty: TypeId) -> Result<Option<TypeId>, HirError> {
        self.supertype_reads.fetch_add(1, Ordering::Relaxed);
        self.inner.superclass(ty)
    }

    fn superinterfaces(&self, ty: TypeId) -> Result<&[TypeId], HirError> {
        self.supertype_reads.fetch_add(1, Ordering::Relaxed);
        self.inner.superinterfaces(ty)
    }

    fn find_type(&self, qualified_name: &str) -> Option<TypeId> {
        self.inner.find_type(qualified_name)
    }

    fn resolve_type_from_signature(
        &self,
        signature: &str,
        context: TypeId,
    ) -> Option<TypeDescriptor> {
        self.inner.resolve_type_from_signature(signature, context)
    }
}
