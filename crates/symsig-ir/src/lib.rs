//! Declaration model for the symsig mangler.
//!
//! This crate provides the read-only view the mangler works on:
//! - Arena storage (`DeclTree`) with `DeclId` / `ModuleId` handles
//! - One tagged union (`DeclKind`) for every declaration shape
//! - Annotations (`AnnotationSet`) and the well-known keys the mangler reacts to
//! - Deserialized metadata records carrying interop unique ids
//! - Signature type references (`TypeRef`)
//! - A builder for front-ends and tests, plus JSON snapshot loading

pub mod annotations;
pub use annotations::{Annotation, AnnotationArg, AnnotationSet, well_known};

pub mod builder;
pub use builder::DeclTreeBuilder;

pub mod decl;
pub use decl::{
    AccessorData, AccessorRole, ClassData, ClassKind, ConstructorData, DeclKind, Declaration,
    FunctionData, Parent, PropertyData, TypeAliasData, TypeParamData, ValueParamData,
};

pub mod flags;
pub use flags::{DeclFlags, Visibility};

pub mod ids;
pub use ids::{DeclId, ModuleId};

pub mod metadata;
pub use metadata::{MetadataField, MetadataRecord, UniqueId};

pub mod module;
pub use module::{ModuleInfo, ModuleOrigin};

pub mod names;
pub use names::FqName;

pub mod tree;
pub use tree::{DeclTree, MAX_PARENT_CHAIN};

pub mod types;
pub use types::{TypeArg, TypeRef, Variance};
