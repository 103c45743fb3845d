//! The symbol-service abstraction the search queries.
//!
//! A service answers "what does this type declare" and "what does it extend".
//! It owns storage and any resolution caches; the search only reads.

use crate::base::{IStr, MemberId, TypeId};

use super::error::HirError;
use super::symbols::{MemberData, TypeData};
use super::types::{TypeDescriptor, TypeHandle};

/// Read access to declared types, members and the supertype graph.
///
/// Implementations must be cheap to query repeatedly; the search layers its
/// own per-search caches on top but still calls into the service for every
/// first-time lookup.
pub trait SymbolService: Send + Sync {
    /// Declaration data for a nominal type.
    fn type_data(&self, ty: TypeId) -> Result<&TypeData, HirError>;

    /// Declaration data for a member.
    fn member_data(&self, member: MemberId) -> Result<&MemberData, HirError>;

    /// Members declared directly on `ty` (not inherited), in declaration order.
    fn declared_members(&self, ty: TypeId) -> Result<&[MemberId], HirError>;

    /// The declared superclass, if any.
    fn superclass(&self, ty: TypeId) -> Result<Option<TypeId>, HirError>;

    /// The declared superinterfaces, in declaration order.
    fn superinterfaces(&self, ty: TypeId) -> Result<&[TypeId], HirError>;

    /// Find a type by fully qualified name.
    fn find_type(&self, qualified_name: &str) -> Option<TypeId>;

    /// Resolve a source-style signature as seen from `context`.
    ///
    /// Returns `None` when the signature names no known type.
    fn resolve_type_from_signature(&self, signature: &str, context: TypeId)
    -> Option<TypeDescriptor>;

    /// Package of a type; empty for the default package or unknown types.
    fn package_of(&self, ty: TypeId) -> Option<IStr> {
        self.type_data(ty).ok().map(|data| data.package.clone())
    }

    /// Walk enclosing types up to the top-level type.
    fn outermost_type(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        // Enclosing cycles stop at the limit.
        for _ in 0..64 {
            match self.type_data(current).ok().and_then(|data| data.enclosing) {
                Some(outer) => current = outer,
                None => break,
            }
        }
        current
    }

    /// Display name of a descriptor's element type: qualified name for
    /// nominal types, keyword for primitives.
    fn element_name(&self, ty: &TypeDescriptor) -> Option<IStr> {
        match ty.handle() {
            TypeHandle::Nominal(id) => self.type_data(id).ok().map(|d| d.qualified_name.clone()),
            TypeHandle::Primitive(p) => Some(IStr::from(p.keyword())),
        }
    }

    /// Short display form, e.g. `Address[]` or `int`.
    fn display_type(&self, ty: &TypeDescriptor) -> String {
        let mut out = match ty.handle() {
            TypeHandle::Nominal(id) => self
                .type_data(id)
                .map(|d| d.name.to_string())
                .unwrap_or_else(|_| id.to_string()),
            TypeHandle::Primitive(p) => p.keyword().to_string(),
        };
        for _ in 0..ty.dimension() {
            out.push_str("[]");
        }
        out
    }
}
