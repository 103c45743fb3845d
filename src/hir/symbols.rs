//! Declared symbols as stored by a symbol service.
//!
//! These are the raw declarations (names, modifiers, signatures). The search
//! never works on them directly; it wraps them in
//! [`MemberDescriptor`](super::MemberDescriptor)s once their types resolve.

use smol_str::SmolStr;

use crate::base::{IStr, TypeId};

/// Access modifier of a type or member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    Public,
    Protected,
    /// No modifier: visible inside the declaring package.
    #[default]
    Package,
    Private,
}

/// Kind of a nominal type declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A nominal type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeData {
    /// Simple name, e.g. `Entry` for `java.util.Map.Entry`.
    pub name: SmolStr,
    /// Fully qualified name, e.g. `java.util.Map.Entry`.
    pub qualified_name: IStr,
    /// Package name, empty for the default package.
    pub package: IStr,
    /// Directly enclosing type for nested types.
    pub enclosing: Option<TypeId>,
    pub kind: TypeKind,
    pub visibility: Visibility,
}

/// Kind of a member declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Field,
    Method,
    Constructor,
}

/// A method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamData {
    pub name: SmolStr,
    pub signature: IStr,
}

/// A field, method or constructor declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberData {
    pub name: SmolStr,
    pub kind: DeclKind,
    pub visibility: Visibility,
    pub is_static: bool,
    pub declaring_type: TypeId,
    /// Field type or method return type (`void` for constructors).
    pub type_signature: IStr,
    /// Parameters, empty for fields.
    pub parameters: Vec<ParamData>,
}

impl MemberData {
    pub fn is_method(&self) -> bool {
        self.kind == DeclKind::Method
    }

    pub fn is_field(&self) -> bool {
        self.kind == DeclKind::Field
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == DeclKind::Constructor
    }
}
