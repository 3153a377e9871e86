//! Declaration flags and visibility.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Boolean facts about a declaration computed by the front-end.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DeclFlags: u32 {
        /// Inherited member that is not redeclared in the subtype.
        const FAKE_OVERRIDE = 1 << 0;
        /// Member generated by the compiler (data class `copy`, enum `values`, ...).
        const SYNTHESIZED = 1 << 1;
        /// Class is a companion object.
        const COMPANION_OBJECT = 1 << 2;
        /// Callable lives on the meta-class of a foreign class.
        const FOREIGN_CLASS_METHOD = 1 << 3;
        /// Static member (no dispatch receiver).
        const STATIC = 1 << 4;
        /// Value parameter accepts a variable number of arguments.
        const VARARG = 1 << 5;
    }
}

/// Source visibility of a declaration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
    /// Declared inside a function body.
    Local,
}
