//! Mangle modes.

use serde::{Deserialize, Serialize};

/// Which facets of a declaration end up in its mangled name.
///
/// | Mode | qualifier | signature | return type | platform names |
/// |------|-----------|-----------|-------------|----------------|
/// | `Full` | yes | yes | no | yes |
/// | `FullWithReturnType` | yes | yes | yes | yes |
/// | `Signature` | no | yes | no | yes |
/// | `FqName` | yes | no | no | yes |
/// | `Structural` | yes | yes | no | no |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MangleMode {
    #[default]
    Full,
    FullWithReturnType,
    Signature,
    FqName,
    Structural,
}

impl MangleMode {
    /// Enclosing package and declarations are prepended.
    pub const fn includes_qualifier(self) -> bool {
        !matches!(self, Self::Signature)
    }

    /// Receiver, value parameters and type parameters are appended to callables.
    pub const fn includes_signature(self) -> bool {
        !matches!(self, Self::FqName)
    }

    pub const fn includes_return_type(self) -> bool {
        matches!(self, Self::FullWithReturnType)
    }

    /// Platform hooks may rename callables and prefix their parameters.
    pub const fn applies_platform_overrides(self) -> bool {
        !matches!(self, Self::Structural)
    }
}
