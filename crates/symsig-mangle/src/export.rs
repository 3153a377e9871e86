//! Export checker.
//!
//! Decides whether a declaration is visible to the linker / runtime, i.e.
//! whether it gets an entry in the output symbol table.
//!
//! The decision has two layers:
//! 1. A generic [`ExportRule`] (visibility and nesting based by default).
//! 2. Platform overrides that can force a declaration in or veto it, applied
//!    in a fixed order where the first match wins.

use crate::limits::MAX_SCOPE_DEPTH;
use symsig_ir::{DeclId, DeclKind, DeclTree, Parent, Visibility, well_known};
use tracing::trace;

/// Language-level export rule, independent of the target platform.
pub trait ExportRule: Send + Sync {
    fn is_exported(&self, tree: &DeclTree, id: DeclId) -> bool;
}

/// Default generic rule.
///
/// | Declaration | Exported when |
/// |-------------|---------------|
/// | value parameter | never |
/// | type parameter | its container is exported |
/// | `private` / local visibility | never |
/// | nested in a callable body | never |
/// | accessor | its property is exported |
/// | anything else | every enclosing class is exported |
///
/// A parent chain deeper than [`MAX_SCOPE_DEPTH`] is treated as a cycle and
/// the declaration is not exported.
#[derive(Copy, Clone, Debug, Default)]
pub struct VisibilityExportRule;

impl ExportRule for VisibilityExportRule {
    fn is_exported(&self, tree: &DeclTree, id: DeclId) -> bool {
        self.exported_at_depth(tree, id, 0)
    }
}

impl VisibilityExportRule {
    fn exported_at_depth(&self, tree: &DeclTree, id: DeclId, depth: usize) -> bool {
        if depth >= MAX_SCOPE_DEPTH {
            trace!(%id, "parent chain too deep, not exported");
            return false;
        }
        let Some(decl) = tree.get(id) else {
            return false;
        };
        match &decl.kind {
            DeclKind::ValueParameter(_) => return false,
            DeclKind::TypeParameter(_) => {
                return decl
                    .parent
                    .declaration()
                    .is_some_and(|container| self.exported_at_depth(tree, container, depth + 1));
            }
            _ => {}
        }
        if matches!(decl.visibility, Visibility::Private | Visibility::Local) {
            return false;
        }

        match &decl.parent {
            Parent::Package(_) => true,
            Parent::Declaration(parent) => {
                let Some(parent_decl) = tree.get(*parent) else {
                    return false;
                };
                match parent_decl.kind {
                    DeclKind::Class(_) => self.exported_at_depth(tree, *parent, depth + 1),
                    DeclKind::Property(_) if matches!(decl.kind, DeclKind::PropertyAccessor(_)) => {
                        self.exported_at_depth(tree, *parent, depth + 1)
                    }
                    // Declared inside a function body or initializer.
                    _ => false,
                }
            }
        }
    }
}

/// Generic rule plus native platform overrides.
pub struct ExportChecker<'a> {
    tree: &'a DeclTree,
    generic: &'a dyn ExportRule,
}

impl<'a> ExportChecker<'a> {
    pub fn new(tree: &'a DeclTree, generic: &'a dyn ExportRule) -> Self {
        Self { tree, generic }
    }

    pub fn is_exported(&self, id: DeclId) -> bool {
        match self.platform_specific_exported(id) {
            Some(forced) => forced,
            None => self.generic.is_exported(self.tree, id),
        }
    }

    /// Platform verdict, or `None` to defer to the generic rule.
    ///
    /// 1. Simple functions flagged fake-override are never exported, whatever
    ///    they are annotated with.
    /// 2. Explicit symbol name, export-for-runtime, explicit native name and
    ///    export-for-compiler annotations each force export, checked in that
    ///    order.
    pub fn platform_specific_exported(&self, id: DeclId) -> Option<bool> {
        let decl = self.tree.get(id)?;
        if matches!(decl.kind, DeclKind::Function(_)) && decl.is_fake_override() {
            return Some(false);
        }
        well_known::EXPORT_FORCING
            .iter()
            .any(|key| decl.has_annotation(key))
            .then_some(true)
    }
}

#[cfg(test)]
#[path = "../tests/export_tests.rs"]
mod tests;
