//! Deserialized metadata records.
//!
//! Declarations loaded from a library carry the record they were deserialized
//! from. Only one field matters here: the stored unique id, which lives in a
//! different extension field depending on the declaration kind.

use serde::{Deserialize, Serialize};

/// Extension field of a metadata record holding a unique id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataField {
    ClassUniqId,
    FunctionUniqId,
    PropertyUniqId,
    ConstructorUniqId,
    TypeParamUniqId,
    TypeAliasUniqId,
}

/// Precomputed stable identifier of an interop declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueId(pub i64);

/// Metadata record of one deserialized declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(default)]
    extensions: Vec<(MetadataField, UniqueId)>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_unique_id(mut self, field: MetadataField, id: i64) -> Self {
        self.set(field, UniqueId(id));
        self
    }

    pub fn set(&mut self, field: MetadataField, id: UniqueId) {
        match self.extensions.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = id,
            None => self.extensions.push((field, id)),
        }
    }

    /// Value of `field`, if the extension is present.
    pub fn get(&self, field: MetadataField) -> Option<UniqueId> {
        self.extensions
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, id)| *id)
    }
}
