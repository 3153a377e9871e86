//! Annotations attached to declarations.
//!
//! The mangler only ever asks two questions of an annotation set: "is this
//! well-known key present?" and "what is the value of this argument?". The
//! keys it cares about are collected in [`well_known`].

use crate::names::FqName;
use serde::{Deserialize, Serialize};

/// Fully-qualified names of the annotations the mangler reacts to.
pub mod well_known {
    /// Explicit linker symbol name.
    pub const SYMBOL_NAME: &str = "kotlin.native.SymbolName";
    /// Declaration is called from the native runtime.
    pub const EXPORT_FOR_CPP_RUNTIME: &str = "kotlin.native.internal.ExportForCppRuntime";
    /// Explicit native (C) name.
    pub const CNAME: &str = "kotlin.native.CName";
    /// Declaration is looked up by the compiler itself.
    pub const EXPORT_FOR_COMPILER: &str = "kotlin.native.internal.ExportForCompiler";

    /// Binding of a callable to a foreign method. Arguments: `selector`, `encoding`, `isStret`.
    pub const OBJC_METHOD: &str = "kotlinx.cinterop.ObjCMethod";
    /// Constructor backed by a foreign initializer. Arguments: `initSelector`, `designated`.
    pub const OBJC_CONSTRUCTOR: &str = "kotlinx.cinterop.ObjCConstructor";
    /// Factory method creating foreign instances. Arguments: `selector`, `encoding`, `isStret`.
    pub const OBJC_FACTORY: &str = "kotlinx.cinterop.ObjCFactory";

    /// Annotations that force a declaration to be exported, in precedence order.
    pub const EXPORT_FORCING: [&str; 4] = [
        SYMBOL_NAME,
        EXPORT_FOR_CPP_RUNTIME,
        CNAME,
        EXPORT_FOR_COMPILER,
    ];
}

/// Constant value of an annotation argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationArg {
    Bool(bool),
    Int(i64),
    String(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub fq_name: FqName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<(String, AnnotationArg)>,
}

impl Annotation {
    pub fn new(fq_name: impl Into<FqName>) -> Self {
        Self {
            fq_name: fq_name.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: AnnotationArg) -> Self {
        self.args.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn with_string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_arg(name, AnnotationArg::String(value.into()))
    }

    #[must_use]
    pub fn with_bool(self, name: impl Into<String>, value: bool) -> Self {
        self.with_arg(name, AnnotationArg::Bool(value))
    }

    pub fn arg(&self, name: &str) -> Option<&AnnotationArg> {
        self.args
            .iter()
            .find(|(arg_name, _)| arg_name == name)
            .map(|(_, value)| value)
    }

    pub fn string_arg(&self, name: &str) -> Option<&str> {
        match self.arg(name)? {
            AnnotationArg::String(value) => Some(value),
            _ => None,
        }
    }

    /// Missing boolean arguments read as `false`.
    pub fn bool_arg(&self, name: &str) -> bool {
        matches!(self.arg(name), Some(AnnotationArg::Bool(true)))
    }
}

/// The annotations of one declaration, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet(Vec<Annotation>);

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    pub fn has(&self, fq_name: &str) -> bool {
        self.find(fq_name).is_some()
    }

    /// First annotation with the given key.
    pub fn find(&self, fq_name: &str) -> Option<&Annotation> {
        self.0.iter().find(|a| a.fq_name.as_str() == fq_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Annotation> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
