//! Symbol mangling for the symsig linker pipeline.
//!
//! Three operations over a read-only [`DeclTree`](symsig_ir::DeclTree):
//!
//! | Operation | Entry point | Fails |
//! |-----------|-------------|-------|
//! | export check | [`Mangler::is_exported`] | never |
//! | mangled name | [`Mangler::mangle`] | never |
//! | 64-bit signature | [`Mangler::signature_id`] | on corrupt interop metadata |
//!
//! The building blocks are public for embedders that need only one of them:
//! [`ExportChecker`], [`MangleComputer`] and [`IdentityResolver`].

pub mod computer;
pub use computer::MangleComputer;

pub mod error;
pub use error::{MangleError, MangleResult};

pub mod export;
pub use export::{ExportChecker, ExportRule, VisibilityExportRule};

pub mod identity;
pub use identity::{IdentityResolver, hash_mangle, read_unique_id};

pub mod interop;
pub use interop::{ForeignMethodInfo, resolve_foreign_method_info};

pub mod limits;

pub mod mangler;
pub use mangler::{Mangler, SignatureEntry};

pub mod mode;
pub use mode::MangleMode;

pub mod options;
pub use options::ManglerOptions;

pub mod overrides;
pub use overrides::{OverrideTargets, resolve_concrete_overrides};

pub mod platform;
pub use platform::{GenericPlatform, ManglePlatform, NativePlatform, PlatformKind};
