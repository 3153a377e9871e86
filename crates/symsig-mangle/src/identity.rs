//! Signature id resolution.
//!
//! The klib serializer refers to declarations by a 64-bit signature id.
//! Declarations that come from a foreign-interop library already have one:
//! the binding generator stored a unique id in their metadata record, and
//! every consumer of that library must agree on it. All other declarations
//! hash their structural mangled name.
//!
//! ## Eligibility for the stored id
//!
//! | Condition | Reason |
//! |-----------|--------|
//! | module is foreign-interop | only interop libraries store ids |
//! | not a value parameter | parameters have no metadata record |
//! | not a synthesized callable | compiler-generated members have no record |
//! | not a property accessor | the linker identifies accessors by name |
//! | not a companion-object constructor | companion constructors are not serialized |
//!
//! Eligible fake overrides resolve to their first concrete declaration and use
//! that declaration's id.

use crate::computer::MangleComputer;
use crate::error::{MangleError, MangleResult};
use crate::mode::MangleMode;
use crate::overrides::resolve_concrete_overrides;
use symsig_ir::{DeclId, DeclKind, DeclTree, Declaration, MetadataField, MetadataRecord};
use tracing::{debug, trace};
use xxhash_rust::xxh64::xxh64;

/// Seed of the signature hash. Changing it changes every persisted id.
pub const SIGNATURE_HASH_SEED: u64 = 0;

/// Deterministic 64-bit hash of a mangled name.
///
/// XXH64 over the raw UTF-8 bytes, reinterpreted as `i64`. Ids are written
/// into klibs and compared across compiler runs, so the value must not depend
/// on the host, the target width or a hasher crate's version.
pub fn hash_mangle(mangled: &str) -> i64 {
    xxh64(mangled.as_bytes(), SIGNATURE_HASH_SEED) as i64
}

/// Metadata extension holding the unique id of a declaration kind.
pub const fn unique_id_field(kind: &DeclKind) -> Option<MetadataField> {
    match kind {
        DeclKind::Class(_) => Some(MetadataField::ClassUniqId),
        DeclKind::Function(_) => Some(MetadataField::FunctionUniqId),
        DeclKind::Property(_) => Some(MetadataField::PropertyUniqId),
        DeclKind::Constructor(_) => Some(MetadataField::ConstructorUniqId),
        DeclKind::TypeParameter(_) => Some(MetadataField::TypeParamUniqId),
        DeclKind::TypeAlias(_) => Some(MetadataField::TypeAliasUniqId),
        DeclKind::PropertyAccessor(_) | DeclKind::ValueParameter(_) | DeclKind::Other => None,
    }
}

/// Stored unique id of a declaration of `kind`, read from its record.
pub fn read_unique_id(kind: &DeclKind, record: &MetadataRecord) -> Option<i64> {
    record.get(unique_id_field(kind)?).map(|id| id.0)
}

/// Declarations that have a metadata record in an interop library.
pub fn is_originally_interop_declaration(decl: &Declaration) -> bool {
    match decl.kind {
        DeclKind::ValueParameter(_) => false,
        _ if decl.is_callable_member() => !decl.is_synthesized(),
        _ => true,
    }
}

/// Declarations that fall back to hashing even inside an interop library.
pub fn is_special_case(tree: &DeclTree, decl: &Declaration) -> bool {
    match decl.kind {
        DeclKind::PropertyAccessor(_) => true,
        DeclKind::Constructor(_) => decl
            .parent
            .declaration()
            .is_some_and(|class| tree.is_companion_object(class)),
        _ => false,
    }
}

pub struct IdentityResolver<'a> {
    tree: &'a DeclTree,
    computer: MangleComputer<'a>,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(computer: MangleComputer<'a>) -> Self {
        Self {
            tree: computer.tree(),
            computer,
        }
    }

    /// Whether `id` takes its signature id from interop metadata.
    pub fn should_extract_unique_id(&self, id: DeclId) -> bool {
        let Some(decl) = self.tree.get(id) else {
            return false;
        };
        self.tree
            .module(decl.module)
            .is_some_and(|module| module.is_foreign_interop())
            && is_originally_interop_declaration(decl)
            && !is_special_case(self.tree, decl)
    }

    /// 64-bit signature of `id`.
    ///
    /// # Errors
    ///
    /// [`MangleError::MissingUniqueId`] when an eligible interop declaration
    /// has no stored id, [`MangleError::UnresolvedFakeOverride`] when an
    /// eligible fake override has no concrete declaration behind it.
    #[tracing::instrument(level = "trace", skip_all, fields(id = %id))]
    pub fn signature_id(&self, id: DeclId) -> MangleResult<i64> {
        let decl = self.tree.get(id).ok_or(MangleError::UnknownDeclaration(id))?;

        if !self.should_extract_unique_id(id) {
            let signature = self.computer.mangle(id, MangleMode::Full);
            trace!(
                kind = decl.kind.tag(),
                signature = %signature,
                "hashing structural signature"
            );
            return Ok(hash_mangle(&signature));
        }

        if decl.is_callable_member() && decl.is_fake_override() {
            let targets = resolve_concrete_overrides(self.tree, id);
            let Some(&first) = targets.first() else {
                return Err(MangleError::UnresolvedFakeOverride {
                    declaration: self.tree.qualified_name(id),
                });
            };
            trace!(target = %first, "fake override defers to concrete declaration");
            return self.signature_id(first);
        }

        let unique_id = decl
            .metadata
            .as_ref()
            .and_then(|record| read_unique_id(&decl.kind, record));
        match unique_id {
            Some(value) => {
                debug!(value, "interop unique id");
                Ok(value)
            }
            None => Err(MangleError::MissingUniqueId {
                declaration: self.tree.qualified_name(id),
                module: self
                    .tree
                    .module(decl.module)
                    .map(|m| m.name.clone())
                    .unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../tests/identity_tests.rs"]
mod tests;
