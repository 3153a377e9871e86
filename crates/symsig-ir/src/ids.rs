//! Arena identifiers for declarations and modules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a declaration inside a [`DeclTree`](crate::DeclTree).
///
/// Ids are dense and assigned in insertion order, so iterating `0..len`
/// visits declarations in the order the front-end produced them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

impl DeclId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Index of a module (compilation unit / library) inside a [`DeclTree`](crate::DeclTree).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub u32);

impl ModuleId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
