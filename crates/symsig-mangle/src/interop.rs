//! Foreign-interop binding lookups.
//!
//! Interop libraries describe how a declaration maps onto a foreign
//! (Objective-C style) method through annotations placed by the binding
//! generator. This module decodes those annotations. Every lookup here is a
//! soft miss: `None` means "not a foreign method", never an error.

use crate::limits::MAX_OVERRIDE_RESOLUTION_DEPTH;
use rustc_hash::FxHashSet;
use symsig_ir::{Annotation, DeclFlags, DeclId, DeclKind, DeclTree, Declaration, well_known};
use tracing::trace;

/// Selector prefix of initializer methods.
pub const INIT_SELECTOR_PREFIX: &str = "init";

/// Foreign method a callable is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignMethodInfo {
    pub selector: String,
    pub encoding: String,
    pub is_stret: bool,
    /// Dispatched on the foreign meta-class rather than on instances.
    pub is_class_method: bool,
    /// Declared as a factory creating foreign instances.
    pub is_factory: bool,
}

impl ForeignMethodInfo {
    /// Initializer variants are the `init…` family of selectors.
    pub fn is_init(&self) -> bool {
        self.selector.starts_with(INIT_SELECTOR_PREFIX)
    }

    fn decode(decl: &Declaration, annotation: &Annotation) -> Option<Self> {
        let selector = annotation.string_arg("selector")?;
        Some(Self {
            selector: selector.to_string(),
            encoding: annotation.string_arg("encoding").unwrap_or_default().to_string(),
            is_stret: annotation.bool_arg("isStret"),
            is_class_method: is_foreign_class_method(decl),
            is_factory: has_foreign_factory_annotation(decl),
        })
    }
}

pub fn has_foreign_method_annotation(decl: &Declaration) -> bool {
    decl.has_annotation(well_known::OBJC_METHOD)
}

pub fn has_foreign_factory_annotation(decl: &Declaration) -> bool {
    decl.has_annotation(well_known::OBJC_FACTORY)
}

pub fn is_foreign_class_method(decl: &Declaration) -> bool {
    decl.flags.contains(DeclFlags::FOREIGN_CLASS_METHOD)
}

/// Constructor backed by a foreign initializer.
pub fn is_foreign_constructor(decl: &Declaration) -> bool {
    matches!(decl.kind, DeclKind::Constructor(_)) && decl.has_annotation(well_known::OBJC_CONSTRUCTOR)
}

/// Info declared directly on `decl`, without looking at overridden members.
pub fn declared_foreign_method_info(decl: &Declaration) -> Option<ForeignMethodInfo> {
    let annotation = decl.annotations.find(well_known::OBJC_METHOD)?;
    ForeignMethodInfo::decode(decl, annotation)
}

/// Foreign method bound to `id`.
///
/// Uses the declaration's own binding when present; otherwise inherits the
/// binding of the first overridden declaration (in supertype order) that has
/// one, so a subclass override of a foreign method keeps its selector.
pub fn resolve_foreign_method_info(tree: &DeclTree, id: DeclId) -> Option<ForeignMethodInfo> {
    let mut visited = FxHashSet::default();
    let info = lookup_through_overrides(tree, id, 0, &mut visited);
    if info.is_none() {
        trace!(%id, "no foreign method info");
    }
    info
}

fn lookup_through_overrides(
    tree: &DeclTree,
    id: DeclId,
    depth: usize,
    visited: &mut FxHashSet<DeclId>,
) -> Option<ForeignMethodInfo> {
    if depth > MAX_OVERRIDE_RESOLUTION_DEPTH || !visited.insert(id) {
        return None;
    }
    let decl = tree.get(id)?;
    if !decl.is_function_like() {
        return None;
    }
    if let Some(info) = declared_foreign_method_info(decl) {
        return Some(info);
    }
    decl.overridden()
        .iter()
        .find_map(|&parent| lookup_through_overrides(tree, parent, depth + 1, visited))
}

/// Designated foreign init method of a foreign-style constructor.
///
/// The constructor names the initializer through its `initSelector`; the
/// method is the first non-fake-override member function of the constructed
/// class declaring that selector.
pub fn foreign_init_method(tree: &DeclTree, ctor: DeclId) -> Option<DeclId> {
    let decl = tree.get(ctor)?;
    if !is_foreign_constructor(decl) {
        return None;
    }
    let init_selector = decl
        .annotations
        .find(well_known::OBJC_CONSTRUCTOR)?
        .string_arg("initSelector")?;

    let class = decl.parent.declaration()?;
    let DeclKind::Class(data) = &tree.get(class)?.kind else {
        return None;
    };

    let found = data.members.iter().copied().find(|&member| {
        tree.get(member).is_some_and(|m| {
            matches!(m.kind, DeclKind::Function(_))
                && !m.is_fake_override()
                && declared_foreign_method_info(m).is_some_and(|info| info.selector == init_selector)
        })
    });
    if found.is_none() {
        trace!(%ctor, init_selector, "foreign init method not found");
    }
    found
}

#[cfg(test)]
#[path = "../tests/interop_tests.rs"]
mod tests;
