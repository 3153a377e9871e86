//! Errors surfaced by signature id resolution.
//!
//! Export checks and display mangling never fail: every lookup they make is a
//! soft miss that falls back to the generic behavior. Only the identity path
//! can hit a consistency violation in the input.

use symsig_ir::DeclId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MangleError {
    /// An interop declaration that must carry a unique id has none. The
    /// library is corrupt or was produced by a mismatched tool.
    #[error("{declaration} from interop library `{module}` has no unique id")]
    MissingUniqueId { declaration: String, module: String },

    /// A fake override whose overridden graph contains no concrete declaration.
    #[error("fake override {declaration} resolves to no concrete declaration")]
    UnresolvedFakeOverride { declaration: String },

    #[error("unknown declaration {0}")]
    UnknownDeclaration(DeclId),
}

pub type MangleResult<T> = Result<T, MangleError>;
