//! Type references as they appear in declaration signatures.

use crate::ids::DeclId;
use crate::names::FqName;
use serde::{Deserialize, Serialize};

pub const UNIT_FQ_NAME: &str = "kotlin.Unit";
pub const ANY_FQ_NAME: &str = "kotlin.Any";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

/// A type argument of a class type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeArg {
    Star,
    Type { variance: Variance, ty: TypeRef },
}

impl TypeArg {
    pub fn invariant(ty: TypeRef) -> Self {
        Self::Type {
            variance: Variance::Invariant,
            ty,
        }
    }
}

/// Reference to a type from a signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeRef {
    /// Class, interface or object type, possibly parameterized.
    Class {
        fq_name: FqName,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeArg>,
        #[serde(default)]
        nullable: bool,
    },
    /// Use of a type parameter declared by `container` at position `index`.
    TypeParameter {
        container: DeclId,
        index: u32,
        #[serde(default)]
        nullable: bool,
    },
}

impl TypeRef {
    pub fn class(fq_name: impl Into<FqName>) -> Self {
        Self::Class {
            fq_name: fq_name.into(),
            args: Vec::new(),
            nullable: false,
        }
    }

    pub fn generic(fq_name: impl Into<FqName>, args: Vec<TypeArg>) -> Self {
        Self::Class {
            fq_name: fq_name.into(),
            args,
            nullable: false,
        }
    }

    pub fn type_parameter(container: DeclId, index: u32) -> Self {
        Self::TypeParameter {
            container,
            index,
            nullable: false,
        }
    }

    pub fn unit() -> Self {
        Self::class(UNIT_FQ_NAME)
    }

    /// `kotlin.Any?`, the implicit upper bound of an unbounded type parameter.
    pub fn nullable_any() -> Self {
        Self::class(ANY_FQ_NAME).nullable()
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        match &mut self {
            Self::Class { nullable, .. } | Self::TypeParameter { nullable, .. } => *nullable = true,
        }
        self
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Class { nullable, .. } | Self::TypeParameter { nullable, .. } => *nullable,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Class { fq_name, nullable: false, .. } if fq_name.as_str() == UNIT_FQ_NAME)
    }

    /// Class name for class types, `None` for type parameter references.
    pub fn class_fq_name(&self) -> Option<&FqName> {
        match self {
            Self::Class { fq_name, .. } => Some(fq_name),
            Self::TypeParameter { .. } => None,
        }
    }
}
