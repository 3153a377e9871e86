//! Mangler configuration.
//!
//! Options are plain serde data so embedders can keep them next to the rest of
//! their build configuration:
//!
//! ```json
//! { "platform": "native", "displayMode": "fullWithReturnType", "builderCapacity": 512 }
//! ```
//!
//! Missing fields take their defaults.

use crate::limits::DEFAULT_MANGLE_CAPACITY;
use crate::mode::MangleMode;
use crate::platform::PlatformKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManglerOptions {
    /// Platform hooks consulted by the computer.
    pub platform: PlatformKind,
    /// Mode used by [`Mangler::display`](crate::Mangler::display).
    pub display_mode: MangleMode,
    /// Initial capacity of the string buffer behind each mangled name.
    pub builder_capacity: usize,
}

impl Default for ManglerOptions {
    fn default() -> Self {
        Self {
            platform: PlatformKind::default(),
            display_mode: MangleMode::default(),
            builder_capacity: DEFAULT_MANGLE_CAPACITY,
        }
    }
}

impl ManglerOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse mangler options")
    }

    #[must_use]
    pub fn with_platform(mut self, platform: PlatformKind) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_display_mode(mut self, mode: MangleMode) -> Self {
        self.display_mode = mode;
        self
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
