//! Member descriptors: one candidate step in a chain.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{LocalId, MemberId, TypeId};

use super::error::HirError;
use super::service::SymbolService;
use super::symbols::DeclKind;
use super::types::TypeDescriptor;

/// What kind of step a descriptor is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Field,
    LocalVariable,
    /// A bare type reference used as a static anchor; not a value.
    TypeRef,
}

/// Identity of the wrapped symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolRef {
    Member(MemberId),
    Local(LocalId),
    Type(TypeId),
}

/// A resolved field, method, local variable or static anchor with its
/// computed return type.
///
/// Equality and hashing use only the wrapped symbol's identity, so the same
/// member reached through different receivers compares equal.
#[derive(Clone, Debug)]
pub struct MemberDescriptor {
    symbol: SymbolRef,
    kind: MemberKind,
    name: SmolStr,
    return_type: TypeDescriptor,
    parameters: Arc<[SmolStr]>,
    declaring_type: Option<TypeId>,
    is_static: bool,
    requires_explicit_receiver: bool,
}

impl MemberDescriptor {
    /// Wrap a declared field or method.
    ///
    /// Fails for constructors, `void` methods and members whose declared type
    /// does not resolve.
    pub fn from_member<S: SymbolService + ?Sized>(
        service: &S,
        member: MemberId,
    ) -> Result<Self, HirError> {
        let data = service.member_data(member)?;
        let kind = match data.kind {
            DeclKind::Field => MemberKind::Field,
            DeclKind::Method => MemberKind::Method,
            DeclKind::Constructor => {
                return Err(HirError::unclassifiable(
                    data.name.as_str(),
                    &*data.type_signature,
                ));
            }
        };

        let return_type = service
            .resolve_type_from_signature(&data.type_signature, data.declaring_type)
            .ok_or_else(|| HirError::unresolved(&*data.type_signature, data.declaring_type))?;
        if return_type.is_void() {
            return Err(HirError::unclassifiable(
                data.name.as_str(),
                &*data.type_signature,
            ));
        }

        Ok(Self {
            symbol: SymbolRef::Member(member),
            kind,
            name: data.name.clone(),
            return_type,
            parameters: data.parameters.iter().map(|p| p.name.clone()).collect(),
            declaring_type: Some(data.declaring_type),
            is_static: data.is_static,
            requires_explicit_receiver: false,
        })
    }

    /// Wrap a local variable whose declared type is `signature`, resolved
    /// from inside `context`.
    pub fn local<S: SymbolService + ?Sized>(
        service: &S,
        local: LocalId,
        name: &str,
        signature: &str,
        context: TypeId,
    ) -> Result<Self, HirError> {
        let return_type = service
            .resolve_type_from_signature(signature, context)
            .ok_or_else(|| HirError::unresolved(signature, context))?;
        if return_type.is_void() {
            return Err(HirError::unclassifiable(name, signature));
        }

        Ok(Self {
            symbol: SymbolRef::Local(local),
            kind: MemberKind::LocalVariable,
            name: SmolStr::new(name),
            return_type,
            parameters: Vec::new().into(),
            declaring_type: None,
            is_static: false,
            requires_explicit_receiver: false,
        })
    }

    /// A static anchor for `ty`: expands into the type's static members.
    pub fn type_ref<S: SymbolService + ?Sized>(service: &S, ty: TypeId) -> Result<Self, HirError> {
        let data = service.type_data(ty)?;
        Ok(Self {
            symbol: SymbolRef::Type(ty),
            kind: MemberKind::TypeRef,
            name: data.name.clone(),
            return_type: TypeDescriptor::nominal(ty),
            parameters: Vec::new().into(),
            declaring_type: data.enclosing,
            is_static: true,
            requires_explicit_receiver: false,
        })
    }

    /// Mark whether rendering needs an explicit `this.`/type qualifier.
    pub fn with_explicit_receiver(mut self, required: bool) -> Self {
        self.requires_explicit_receiver = required;
        self
    }

    pub fn symbol(&self) -> SymbolRef {
        self.symbol
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> TypeDescriptor {
        self.return_type
    }

    /// Array rank of the return type.
    pub fn dimension(&self) -> u8 {
        self.return_type.dimension()
    }

    /// Parameter names (empty for everything but methods).
    pub fn parameters(&self) -> &[SmolStr] {
        &self.parameters
    }

    pub fn declaring_type(&self) -> Option<TypeId> {
        self.declaring_type
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_type_ref(&self) -> bool {
        self.kind == MemberKind::TypeRef
    }

    pub fn requires_explicit_receiver(&self) -> bool {
        self.requires_explicit_receiver
    }
}

impl PartialEq for MemberDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for MemberDescriptor {}

impl Hash for MemberDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}
