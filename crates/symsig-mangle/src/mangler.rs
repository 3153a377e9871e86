//! Mangler facade.
//!
//! Bundles the export checker, mangle computer and identity resolver over one
//! declaration tree. This is the surface the linker and the klib serializer
//! talk to.

use crate::computer::MangleComputer;
use crate::error::MangleResult;
use crate::export::{ExportChecker, ExportRule, VisibilityExportRule};
use crate::identity::IdentityResolver;
use crate::mode::MangleMode;
use crate::options::ManglerOptions;
use crate::platform::ManglePlatform;
use rayon::prelude::*;
use symsig_ir::{DeclId, DeclTree};
use tracing::debug;

/// One row of a symbol table computed by [`Mangler::compute_table`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureEntry {
    pub id: DeclId,
    pub exported: bool,
    /// Mangled name in the configured display mode.
    pub display: String,
    pub signature_id: MangleResult<i64>,
}

pub struct Mangler<'a> {
    tree: &'a DeclTree,
    options: ManglerOptions,
    export_rule: Box<dyn ExportRule>,
    platform: &'a dyn ManglePlatform,
}

impl<'a> Mangler<'a> {
    /// Mangler with default options: native platform, `Full` display mode.
    pub fn new(tree: &'a DeclTree) -> Self {
        Self::with_options(tree, ManglerOptions::default())
    }

    pub fn with_options(tree: &'a DeclTree, options: ManglerOptions) -> Self {
        Self {
            tree,
            platform: options.platform.hooks(),
            options,
            export_rule: Box::new(VisibilityExportRule),
        }
    }

    /// Replace the generic export rule.
    #[must_use]
    pub fn with_export_rule(mut self, rule: impl ExportRule + 'static) -> Self {
        self.export_rule = Box::new(rule);
        self
    }

    /// Replace the platform hooks selected by the options.
    #[must_use]
    pub fn with_platform(mut self, platform: &'a dyn ManglePlatform) -> Self {
        self.platform = platform;
        self
    }

    pub fn tree(&self) -> &'a DeclTree {
        self.tree
    }

    pub fn options(&self) -> &ManglerOptions {
        &self.options
    }

    pub fn computer(&self) -> MangleComputer<'a> {
        MangleComputer::new(self.tree, self.platform).with_capacity(self.options.builder_capacity)
    }

    pub fn is_exported(&self, id: DeclId) -> bool {
        ExportChecker::new(self.tree, self.export_rule.as_ref()).is_exported(id)
    }

    pub fn mangle(&self, id: DeclId, mode: MangleMode) -> String {
        self.computer().mangle(id, mode)
    }

    /// Mangled name in the configured display mode.
    pub fn display(&self, id: DeclId) -> String {
        self.mangle(id, self.options.display_mode)
    }

    /// # Errors
    ///
    /// See [`IdentityResolver::signature_id`].
    pub fn signature_id(&self, id: DeclId) -> MangleResult<i64> {
        IdentityResolver::new(self.computer()).signature_id(id)
    }

    /// Export flag, display name and signature id for every id, computed in
    /// parallel. Rows come back in input order.
    pub fn compute_table(&self, ids: &[DeclId]) -> Vec<SignatureEntry> {
        debug!(count = ids.len(), "computing signature table");
        ids.par_iter()
            .map(|&id| SignatureEntry {
                id,
                exported: self.is_exported(id),
                display: self.display(id),
                signature_id: self.signature_id(id),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/mangler_tests.rs"]
mod tests;
