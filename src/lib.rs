//! symsig: export checks, mangled names and stable signature ids for klib
//! linking.
//!
//! This crate is the facade over the workspace:
//! - [`ir`] is the declaration model (`symsig-ir`)
//! - [`mangle`] holds the export checker, mangle computer and identity
//!   resolver (`symsig-mangle`)
//! - [`tracing_config`] sets up diagnostics output
//!
//! ```no_run
//! use symsig::{Mangler, MangleMode, load_snapshot};
//!
//! # fn main() -> anyhow::Result<()> {
//! symsig::tracing_config::init_tracing();
//! let tree = load_snapshot("foundation.json".as_ref())?;
//! let mangler = Mangler::new(&tree);
//! for id in tree.ids() {
//!     println!("{} {}", mangler.mangle(id, MangleMode::Full), mangler.signature_id(id)?);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::Path;

pub use symsig_ir as ir;
pub use symsig_mangle as mangle;

pub use symsig_ir::{DeclId, DeclTree, DeclTreeBuilder, Declaration};
pub use symsig_mangle::{
    MangleError, MangleMode, MangleResult, Mangler, ManglerOptions, SignatureEntry,
};

pub mod tracing_config;

/// Read a declaration tree snapshot written by [`DeclTree::to_json`].
pub fn load_snapshot(path: &Path) -> Result<DeclTree> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let tree = DeclTree::from_json(&text)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    tracing::debug!(path = %path.display(), declarations = tree.len(), "loaded snapshot");
    Ok(tree)
}

/// Read [`ManglerOptions`] from a JSON file.
pub fn load_options(path: &Path) -> Result<ManglerOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options {}", path.display()))?;
    ManglerOptions::from_json_str(&text).with_context(|| format!("in {}", path.display()))
}
