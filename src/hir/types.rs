//! Uniform type descriptors.
//!
//! A [`TypeDescriptor`] is either a nominal type (class/interface) known to a
//! symbol service or a primitive keyword, plus an array rank. The split is an
//! enum so "exactly one of nominal/primitive" holds by construction.

use std::fmt;

use crate::base::TypeId;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Built-in value types. `Void` is included so "no type" can be described
/// uniformly; it never carries members and never terminates a chain unless
/// the target is `void` too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    /// Parse a source keyword (`int`, `boolean`, `void`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "char" => Self::Char,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "void" => Self::Void,
            _ => return None,
        })
    }

    /// The source keyword for this primitive.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ============================================================================
// TYPE DESCRIPTOR
// ============================================================================

/// What a descriptor's element type refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeHandle {
    Nominal(TypeId),
    Primitive(PrimitiveType),
}

/// A nominal or primitive type with an array rank.
///
/// Immutable; two descriptors are equal when their handles and dimensions
/// are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    handle: TypeHandle,
    dimension: u8,
}

impl TypeDescriptor {
    /// A non-array nominal type.
    pub fn nominal(ty: TypeId) -> Self {
        Self {
            handle: TypeHandle::Nominal(ty),
            dimension: 0,
        }
    }

    /// A non-array primitive type.
    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self {
            handle: TypeHandle::Primitive(primitive),
            dimension: 0,
        }
    }

    /// The `void` pseudo-type.
    pub fn void() -> Self {
        Self::primitive(PrimitiveType::Void)
    }

    /// Same element type with the given array rank.
    pub fn with_dimension(mut self, dimension: u8) -> Self {
        self.dimension = dimension;
        self
    }

    /// The array-stripped element type.
    pub fn element(self) -> Self {
        self.with_dimension(0)
    }

    pub fn handle(&self) -> TypeHandle {
        self.handle
    }

    /// Array rank (0 for non-array types).
    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    pub fn is_array(&self) -> bool {
        self.dimension > 0
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.handle, TypeHandle::Primitive(_))
    }

    /// True for exactly `void` (an array of void is not a thing).
    pub fn is_void(&self) -> bool {
        self.handle == TypeHandle::Primitive(PrimitiveType::Void)
    }

    /// The nominal type id, if this is a nominal type.
    pub fn type_id(&self) -> Option<TypeId> {
        match self.handle {
            TypeHandle::Nominal(ty) => Some(ty),
            TypeHandle::Primitive(_) => None,
        }
    }

    /// The primitive, if this is a primitive type.
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self.handle {
            TypeHandle::Primitive(p) => Some(p),
            TypeHandle::Nominal(_) => None,
        }
    }
}

// ============================================================================
// SIGNATURES
// ============================================================================

/// A parsed source-style type signature: `Name`, `pkg.Name<T>[][]`, `int...`.
///
/// Generic arguments are erased; `...` counts as one array dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeSignature<'s> {
    /// Element type name with generics and array suffixes stripped.
    pub base: &'s str,
    pub dimension: u8,
}

impl<'s> TypeSignature<'s> {
    /// Parse a signature. Returns `None` for an empty or malformed name.
    pub fn parse(signature: &'s str) -> Option<Self> {
        let mut rest = signature.trim();
        let mut dimension: u8 = 0;

        if let Some(stripped) = rest.strip_suffix("...") {
            rest = stripped.trim_end();
            dimension += 1;
        }
        while let Some(stripped) = rest.strip_suffix("[]") {
            rest = stripped.trim_end();
            dimension = dimension.saturating_add(1);
        }

        let base = match rest.find('<') {
            Some(open) => {
                if !rest.ends_with('>') {
                    return None;
                }
                rest[..open].trim_end()
            }
            None => rest,
        };

        let well_formed = !base.is_empty()
            && base
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(is_ident_char));
        well_formed.then_some(Self { base, dimension })
    }

    /// Erased form used for member keys: `base` plus `[]` per dimension.
    pub fn erased(&self) -> String {
        let mut erased = String::with_capacity(self.base.len() + 2 * self.dimension as usize);
        erased.push_str(self.base);
        for _ in 0..self.dimension {
            erased.push_str("[]");
        }
        erased
    }

    /// Last dot-separated segment of the base name.
    pub fn simple_name(&self) -> &'s str {
        self.base.rsplit('.').next().unwrap_or(self.base)
    }

    pub fn is_qualified(&self) -> bool {
        self.base.contains('.')
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
