//! In-memory symbol service.
//!
//! [`TypeIndex`] stores type and member declarations in flat arenas and
//! answers [`SymbolService`] queries from them. Hosts that already hold
//! declarations in memory populate it directly; tests use it as the model.
//!
//! Types are referenced by [`TypeId`] and members by [`MemberId`] from every
//! other map, so the arenas are the single source of truth.

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{IStr, Interner, MemberId, TypeId};

use super::error::HirError;
use super::service::SymbolService;
use super::symbols::{DeclKind, MemberData, ParamData, TypeData, TypeKind, Visibility};
use super::types::{PrimitiveType, TypeDescriptor, TypeSignature};

/// Default number of cached signature resolutions before the cache resets.
pub const DEFAULT_SIGNATURE_CACHE_CAPACITY: usize = 16_384;

// ============================================================================
// DEFINITIONS (builder input)
// ============================================================================

/// Input for [`TypeIndex::add_type`].
#[derive(Clone, Debug)]
pub struct TypeDef {
    qualified_name: String,
    kind: TypeKind,
    visibility: Visibility,
    enclosing: Option<TypeId>,
}

impl TypeDef {
    /// A public class. `qualified_name` is dotted, e.g. `shop.Order`.
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind: TypeKind::Class,
            visibility: Visibility::Public,
            enclosing: None,
        }
    }

    /// A public interface.
    pub fn interface(qualified_name: impl Into<String>) -> Self {
        Self::class(qualified_name).with_kind(TypeKind::Interface)
    }

    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as nested inside `outer`. The package is taken from `outer`.
    pub fn nested_in(mut self, outer: TypeId) -> Self {
        self.enclosing = Some(outer);
        self
    }
}

/// Input for [`TypeIndex::add_member`]. Members default to public instance
/// members; use the modifier methods to change that.
#[derive(Clone, Debug)]
pub struct MemberDef {
    name: SmolStr,
    kind: DeclKind,
    visibility: Visibility,
    is_static: bool,
    type_signature: String,
    parameters: Vec<(SmolStr, String)>,
}

impl MemberDef {
    pub fn field(name: &str, type_signature: &str) -> Self {
        Self::new(name, DeclKind::Field, type_signature)
    }

    pub fn method(name: &str, return_signature: &str) -> Self {
        Self::new(name, DeclKind::Method, return_signature)
    }

    pub fn constructor(type_name: &str) -> Self {
        Self::new(type_name, DeclKind::Constructor, "void")
    }

    fn new(name: &str, kind: DeclKind, type_signature: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            kind,
            visibility: Visibility::Public,
            is_static: false,
            type_signature: type_signature.to_string(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, name: &str, signature: &str) -> Self {
        self.parameters
            .push((SmolStr::new(name), signature.to_string()));
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn private(self) -> Self {
        self.with_visibility(Visibility::Private)
    }

    pub fn protected(self) -> Self {
        self.with_visibility(Visibility::Protected)
    }

    pub fn package_private(self) -> Self {
        self.with_visibility(Visibility::Package)
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

// ============================================================================
// SIGNATURE CACHE
// ============================================================================

/// Signature → type resolutions, keyed by `(context type, signature)`.
///
/// Owned by the symbol service rather than by a search, so repeated searches
/// over the same model reuse it. The cache resets wholesale once it holds
/// `capacity` entries; callers can also clear it explicitly.
#[derive(Debug)]
pub struct SignatureCache {
    state: RwLock<CacheState>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct CacheState {
    by_context: FxHashMap<TypeId, FxHashMap<IStr, Option<TypeDescriptor>>>,
    len: usize,
}

impl Default for SignatureCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SIGNATURE_CACHE_CAPACITY)
    }
}

impl SignatureCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            capacity: capacity.max(1),
        }
    }

    /// `Some(result)` on a hit; the inner option is the cached resolution.
    pub fn get(&self, context: TypeId, signature: &str) -> Option<Option<TypeDescriptor>> {
        self.state
            .read()
            .by_context
            .get(&context)
            .and_then(|by_sig| by_sig.get(signature).copied())
    }

    pub fn insert(&self, context: TypeId, signature: &str, resolved: Option<TypeDescriptor>) {
        let mut state = self.state.write();
        if state.len >= self.capacity {
            tracing::debug!(capacity = self.capacity, "signature cache full, resetting");
            state.by_context.clear();
            state.len = 0;
        }
        let previous = state
            .by_context
            .entry(context)
            .or_default()
            .insert(IStr::from(signature), resolved);
        if previous.is_none() {
            state.len += 1;
        }
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        state.by_context.clear();
        state.len = 0;
    }

    pub fn len(&self) -> usize {
        self.state.read().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// TYPE INDEX
// ============================================================================

#[derive(Debug)]
struct TypeEntry {
    data: TypeData,
    superclass: Option<TypeId>,
    interfaces: Vec<TypeId>,
    members: Vec<MemberId>,
}

/// Arena-backed [`SymbolService`].
#[derive(Debug, Default)]
pub struct TypeIndex {
    types: Vec<TypeEntry>,
    members: Vec<MemberData>,
    /// Qualified name -> type (IndexMap preserves insertion order).
    by_qualified_name: IndexMap<IStr, TypeId>,
    /// Simple name -> types (may have multiple across packages).
    by_simple_name: FxHashMap<SmolStr, Vec<TypeId>>,
    interner: Interner,
    signature_cache: SignatureCache,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. Re-registering a qualified name returns the existing id.
    ///
    /// # Panics
    ///
    /// Panics if the definition is nested in a type not created by this index.
    pub fn add_type(&mut self, def: TypeDef) -> TypeId {
        if let Some(&existing) = self.by_qualified_name.get(def.qualified_name.as_str()) {
            return existing;
        }

        let qualified_name = self.interner.intern(&def.qualified_name);
        let (package, name) = match def.enclosing {
            Some(outer) => {
                let package = self.types[outer.index()].data.package.clone();
                let name = def
                    .qualified_name
                    .rsplit('.')
                    .next()
                    .unwrap_or(&def.qualified_name);
                (package, name)
            }
            None => match def.qualified_name.rsplit_once('.') {
                Some((package, name)) => (self.interner.intern(package), name),
                None => (self.interner.intern(""), def.qualified_name.as_str()),
            },
        };
        let name = SmolStr::new(name);

        let id = TypeId::new(self.types.len());
        self.types.push(TypeEntry {
            data: TypeData {
                name: name.clone(),
                qualified_name: qualified_name.clone(),
                package,
                enclosing: def.enclosing,
                kind: def.kind,
                visibility: def.visibility,
            },
            superclass: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        });
        self.by_qualified_name.insert(qualified_name, id);
        self.by_simple_name.entry(name).or_default().push(id);
        self.signature_cache.clear();
        id
    }

    /// Declare a member on `ty`.
    ///
    /// # Panics
    ///
    /// Panics if `ty` was not created by this index.
    pub fn add_member(&mut self, ty: TypeId, def: MemberDef) -> MemberId {
        let id = MemberId::new(self.members.len());
        let type_signature = self.interner.intern(&def.type_signature);
        let parameters = def
            .parameters
            .into_iter()
            .map(|(name, signature)| ParamData {
                name,
                signature: self.interner.intern(&signature),
            })
            .collect();
        self.members.push(MemberData {
            name: def.name,
            kind: def.kind,
            visibility: def.visibility,
            is_static: def.is_static,
            declaring_type: ty,
            type_signature,
            parameters,
        });
        self.types[ty.index()].members.push(id);
        id
    }

    /// Set the superclass of `ty`. `superclass` is not checked, so a model
    /// may point at types it does not contain.
    ///
    /// # Panics
    ///
    /// Panics if `ty` was not created by this index.
    pub fn set_superclass(&mut self, ty: TypeId, superclass: TypeId) {
        self.types[ty.index()].superclass = Some(superclass);
    }

    /// # Panics
    ///
    /// Panics if `ty` was not created by this index.
    pub fn add_interface(&mut self, ty: TypeId, interface: TypeId) {
        let interfaces = &mut self.types[ty.index()].interfaces;
        if !interfaces.contains(&interface) {
            interfaces.push(interface);
        }
    }

    /// Look up a type by qualified name.
    pub fn lookup_qualified(&self, name: &str) -> Option<TypeId> {
        self.by_qualified_name.get(name).copied()
    }

    /// All types with the given simple name.
    pub fn lookup_simple(&self, name: &str) -> &[TypeId] {
        self.by_simple_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All registered types in insertion order.
    pub fn types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.by_qualified_name.values().copied()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn signature_cache(&self) -> &SignatureCache {
        &self.signature_cache
    }

    /// Drop all cached signature resolutions.
    pub fn clear_signature_cache(&self) {
        self.signature_cache.clear();
    }

    fn entry(&self, ty: TypeId) -> Result<&TypeEntry, HirError> {
        self.types.get(ty.index()).ok_or(HirError::UnknownType(ty))
    }

    fn resolve_uncached(&self, signature: &str, context: TypeId) -> Option<TypeDescriptor> {
        let sig = TypeSignature::parse(signature)?;

        if let Some(primitive) = PrimitiveType::from_keyword(sig.base) {
            if primitive == PrimitiveType::Void && sig.dimension > 0 {
                return None;
            }
            return Some(TypeDescriptor::primitive(primitive).with_dimension(sig.dimension));
        }

        let found = if sig.is_qualified() {
            self.lookup_qualified(sig.base)
                .or_else(|| self.resolve_relative(sig.base, context))
        } else {
            self.resolve_relative(sig.base, context)
                .or_else(|| self.lookup_qualified(sig.base))
                .or_else(|| match self.lookup_simple(sig.base) {
                    [only] => Some(*only),
                    _ => None,
                })
        };

        found.map(|ty| TypeDescriptor::nominal(ty).with_dimension(sig.dimension))
    }

    /// Resolve a name against the context's enclosing types, then its package.
    fn resolve_relative(&self, name: &str, context: TypeId) -> Option<TypeId> {
        let mut scope = Some(context);
        while let Some(current) = scope {
            let entry = self.types.get(current.index())?;
            let candidate = format!("{}.{}", entry.data.qualified_name, name);
            if let Some(ty) = self.lookup_qualified(&candidate) {
                return Some(ty);
            }
            scope = entry.data.enclosing;
        }

        let package = &self.types.get(context.index())?.data.package;
        if package.is_empty() {
            return None;
        }
        self.lookup_qualified(&format!("{}.{}", package, name))
    }
}

impl SymbolService for TypeIndex {
    fn type_data(&self, ty: TypeId) -> Result<&TypeData, HirError> {
        self.entry(ty).map(|entry| &entry.data)
    }

    fn member_data(&self, member: MemberId) -> Result<&MemberData, HirError> {
        self.members
            .get(member.index())
            .ok_or(HirError::UnknownMember(member))
    }

    fn declared_members(&self, ty: TypeId) -> Result<&[MemberId], HirError> {
        self.entry(ty).map(|entry| entry.members.as_slice())
    }

    fn superclass(&self, ty: TypeId) -> Result<Option<TypeId>, HirError> {
        self.entry(ty).map(|entry| entry.superclass)
    }

    fn superinterfaces(&self, ty: TypeId) -> Result<&[TypeId], HirError> {
        self.entry(ty).map(|entry| entry.interfaces.as_slice())
    }

    fn find_type(&self, qualified_name: &str) -> Option<TypeId> {
        self.lookup_qualified(qualified_name)
    }

    fn resolve_type_from_signature(
        &self,
        signature: &str,
        context: TypeId,
    ) -> Option<TypeDescriptor> {
        if let Some(cached) = self.signature_cache.get(context, signature) {
            return cached;
        }
        let resolved = self.resolve_uncached(signature, context);
        if resolved.is_none() {
            tracing::trace!(signature, %context, "unresolved type signature");
        }
        self.signature_cache.insert(context, signature, resolved);
        resolved
    }
}
