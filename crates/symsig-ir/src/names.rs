//! Fully-qualified names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between segments of a fully-qualified name.
pub const FQ_SEPARATOR: char = '.';

/// A dot-separated fully-qualified name such as `platform.Foundation.NSString`.
///
/// The root package is the empty name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FqName(String);

impl FqName {
    pub const ROOT: Self = Self(String::new());

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment, e.g. `NSString` for `platform.Foundation.NSString`.
    pub fn short_name(&self) -> &str {
        match self.0.rfind(FQ_SEPARATOR) {
            Some(pos) => &self.0[pos + 1..],
            None => &self.0,
        }
    }

    /// Everything before the last segment; the root package for single-segment names.
    pub fn parent(&self) -> Self {
        match self.0.rfind(FQ_SEPARATOR) {
            Some(pos) => Self(self.0[..pos].to_string()),
            None => Self::ROOT,
        }
    }

    pub fn child(&self, segment: &str) -> Self {
        if self.is_root() {
            Self(segment.to_string())
        } else {
            Self(format!("{}{FQ_SEPARATOR}{segment}", self.0))
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(FQ_SEPARATOR).filter(|s| !s.is_empty())
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FqName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FqName {
    fn from(value: String) -> Self {
        Self(value)
    }
}
