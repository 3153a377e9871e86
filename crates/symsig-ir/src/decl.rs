//! Declaration nodes.
//!
//! Every declaration shape is one variant of [`DeclKind`]; attributes shared
//! by all shapes live on [`Declaration`]. Consumers match on the kind tag
//! exhaustively instead of dispatching through a class hierarchy.

use crate::annotations::{Annotation, AnnotationSet};
use crate::flags::{DeclFlags, Visibility};
use crate::ids::{DeclId, ModuleId};
use crate::metadata::MetadataRecord;
use crate::names::FqName;
use crate::types::{TypeRef, Variance};
use serde::{Deserialize, Serialize};

// =============================================================================
// Parent links
// =============================================================================

/// The scope a declaration is nested in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Parent {
    /// Top-level declaration of a package.
    Package(FqName),
    /// Member of a class, parameter of a callable, accessor of a property, ...
    Declaration(DeclId),
}

impl Parent {
    pub fn package(fq_name: impl Into<FqName>) -> Self {
        Self::Package(fq_name.into())
    }

    pub fn root() -> Self {
        Self::Package(FqName::ROOT)
    }

    pub const fn declaration(&self) -> Option<DeclId> {
        match self {
            Self::Declaration(id) => Some(*id),
            Self::Package(_) => None,
        }
    }
}

// =============================================================================
// Kind payloads
// =============================================================================

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Object,
    EnumClass,
    AnnotationClass,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassData {
    #[serde(default)]
    pub class_kind: ClassKind,
    #[serde(default)]
    pub type_params: Vec<DeclId>,
    /// Member declarations in declaration order.
    #[serde(default)]
    pub members: Vec<DeclId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionData {
    #[serde(default)]
    pub receiver: Option<TypeRef>,
    pub return_type: TypeRef,
    #[serde(default)]
    pub value_params: Vec<DeclId>,
    #[serde(default)]
    pub type_params: Vec<DeclId>,
    /// Directly overridden declarations in supertype order.
    #[serde(default)]
    pub overridden: Vec<DeclId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorData {
    #[serde(default)]
    pub value_params: Vec<DeclId>,
    #[serde(default)]
    pub type_params: Vec<DeclId>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessorRole {
    Getter,
    Setter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorData {
    pub role: AccessorRole,
    pub return_type: TypeRef,
    #[serde(default)]
    pub value_params: Vec<DeclId>,
    #[serde(default)]
    pub overridden: Vec<DeclId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyData {
    #[serde(default)]
    pub receiver: Option<TypeRef>,
    pub ty: TypeRef,
    #[serde(default)]
    pub type_params: Vec<DeclId>,
    #[serde(default)]
    pub getter: Option<DeclId>,
    #[serde(default)]
    pub setter: Option<DeclId>,
    #[serde(default)]
    pub overridden: Vec<DeclId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasData {
    pub expanded: TypeRef,
    #[serde(default)]
    pub type_params: Vec<DeclId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamData {
    /// Position in the container's type parameter list.
    #[serde(default)]
    pub index: u32,
    /// Declared upper bounds; empty means the implicit `kotlin.Any?`.
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
    #[serde(default)]
    pub variance: Variance,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueParamData {
    /// Position in the callable's value parameter list.
    #[serde(default)]
    pub index: u32,
    pub ty: TypeRef,
    #[serde(default)]
    pub has_default: bool,
}

/// Kind tag plus kind-specific payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclKind {
    Function(FunctionData),
    Constructor(ConstructorData),
    PropertyAccessor(AccessorData),
    Property(PropertyData),
    Class(ClassData),
    TypeAlias(TypeAliasData),
    TypeParameter(TypeParamData),
    ValueParameter(ValueParamData),
    Other,
}

impl DeclKind {
    pub fn function(return_type: TypeRef) -> Self {
        Self::Function(FunctionData {
            receiver: None,
            return_type,
            value_params: Vec::new(),
            type_params: Vec::new(),
            overridden: Vec::new(),
        })
    }

    pub fn constructor() -> Self {
        Self::Constructor(ConstructorData::default())
    }

    pub fn class(class_kind: ClassKind) -> Self {
        Self::Class(ClassData {
            class_kind,
            ..ClassData::default()
        })
    }

    pub fn property(ty: TypeRef) -> Self {
        Self::Property(PropertyData {
            receiver: None,
            ty,
            type_params: Vec::new(),
            getter: None,
            setter: None,
            overridden: Vec::new(),
        })
    }

    pub fn accessor(role: AccessorRole, return_type: TypeRef) -> Self {
        Self::PropertyAccessor(AccessorData {
            role,
            return_type,
            value_params: Vec::new(),
            overridden: Vec::new(),
        })
    }

    pub fn type_alias(expanded: TypeRef) -> Self {
        Self::TypeAlias(TypeAliasData {
            expanded,
            type_params: Vec::new(),
        })
    }

    pub fn type_parameter(bounds: Vec<TypeRef>) -> Self {
        Self::TypeParameter(TypeParamData {
            bounds,
            ..TypeParamData::default()
        })
    }

    pub fn value_parameter(ty: TypeRef) -> Self {
        Self::ValueParameter(ValueParamData {
            index: 0,
            ty,
            has_default: false,
        })
    }

    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Constructor(_) => "constructor",
            Self::PropertyAccessor(_) => "accessor",
            Self::Property(_) => "property",
            Self::Class(_) => "class",
            Self::TypeAlias(_) => "typealias",
            Self::TypeParameter(_) => "type-parameter",
            Self::ValueParameter(_) => "value-parameter",
            Self::Other => "other",
        }
    }
}

// =============================================================================
// Declaration
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub parent: Parent,
    pub module: ModuleId,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub flags: DeclFlags,
    #[serde(default, skip_serializing_if = "AnnotationSet::is_empty")]
    pub annotations: AnnotationSet,
    #[serde(default)]
    pub metadata: Option<MetadataRecord>,
    pub kind: DeclKind,
}

impl Declaration {
    /// A public, unannotated declaration. `parent` and `module` are filled in
    /// by [`DeclTree::insert`](crate::DeclTree::insert).
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            parent: Parent::root(),
            module: ModuleId(0),
            visibility: Visibility::Public,
            flags: DeclFlags::empty(),
            annotations: AnnotationSet::new(),
            metadata: None,
            kind,
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: DeclFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: MetadataRecord) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub fn with_receiver(mut self, receiver: TypeRef) -> Self {
        match &mut self.kind {
            DeclKind::Function(data) => data.receiver = Some(receiver),
            DeclKind::Property(data) => data.receiver = Some(receiver),
            _ => {}
        }
        self
    }

    #[must_use]
    pub fn with_overridden(mut self, overridden: Vec<DeclId>) -> Self {
        match &mut self.kind {
            DeclKind::Function(data) => data.overridden = overridden,
            DeclKind::PropertyAccessor(data) => data.overridden = overridden,
            DeclKind::Property(data) => data.overridden = overridden,
            _ => {}
        }
        self
    }

    pub fn has_annotation(&self, fq_name: &str) -> bool {
        self.annotations.has(fq_name)
    }

    pub fn is_fake_override(&self) -> bool {
        self.flags.contains(DeclFlags::FAKE_OVERRIDE)
    }

    pub fn is_synthesized(&self) -> bool {
        self.flags.contains(DeclFlags::SYNTHESIZED)
    }

    /// Functions, constructors, properties and accessors.
    pub const fn is_callable_member(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::Function(_)
                | DeclKind::Constructor(_)
                | DeclKind::Property(_)
                | DeclKind::PropertyAccessor(_)
        )
    }

    /// Callables that own value parameters.
    pub const fn is_function_like(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::Function(_) | DeclKind::Constructor(_) | DeclKind::PropertyAccessor(_)
        )
    }

    pub fn value_params(&self) -> &[DeclId] {
        match &self.kind {
            DeclKind::Function(data) => &data.value_params,
            DeclKind::Constructor(data) => &data.value_params,
            DeclKind::PropertyAccessor(data) => &data.value_params,
            _ => &[],
        }
    }

    pub fn type_params(&self) -> &[DeclId] {
        match &self.kind {
            DeclKind::Function(data) => &data.type_params,
            DeclKind::Constructor(data) => &data.type_params,
            DeclKind::Property(data) => &data.type_params,
            DeclKind::Class(data) => &data.type_params,
            DeclKind::TypeAlias(data) => &data.type_params,
            _ => &[],
        }
    }

    /// Directly overridden declarations, empty for non-overridable kinds.
    pub fn overridden(&self) -> &[DeclId] {
        match &self.kind {
            DeclKind::Function(data) => &data.overridden,
            DeclKind::PropertyAccessor(data) => &data.overridden,
            DeclKind::Property(data) => &data.overridden,
            _ => &[],
        }
    }

    /// Declared extension receiver. Accessors report theirs through
    /// [`DeclTree::extension_receiver`](crate::DeclTree::extension_receiver).
    pub fn own_receiver(&self) -> Option<&TypeRef> {
        match &self.kind {
            DeclKind::Function(data) => data.receiver.as_ref(),
            DeclKind::Property(data) => data.receiver.as_ref(),
            _ => None,
        }
    }
}
