use serde::{Deserialize, Serialize};

/// Where the declarations of a module came from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleOrigin {
    /// Compiled from source in the current invocation.
    #[default]
    Source,
    /// Deserialized from an ordinary library.
    Library,
    /// Deserialized from a library generated from foreign (C / Objective-C) headers.
    ForeignInterop,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    #[serde(default)]
    pub origin: ModuleOrigin,
}

impl ModuleInfo {
    pub fn new(name: impl Into<String>, origin: ModuleOrigin) -> Self {
        Self {
            name: name.into(),
            origin,
        }
    }

    pub fn is_foreign_interop(&self) -> bool {
        self.origin == ModuleOrigin::ForeignInterop
    }
}
