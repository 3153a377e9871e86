//! Arena of declarations.
//!
//! `DeclTree` owns every module and declaration of a snapshot. Parent/child
//! links are stored as [`DeclId`]s in both directions: children point to their
//! parent through [`Parent`], and parents list their members, parameters and
//! accessors in declaration order. [`DeclTree::insert`] keeps both sides in
//! sync, so child lists always reflect insertion order.
//!
//! Once built, the tree is only read. It is `Send + Sync` and can be shared
//! across worker threads without coordination.

use crate::decl::{AccessorRole, DeclKind, Declaration, Parent};
use crate::ids::{DeclId, ModuleId};
use crate::module::ModuleInfo;
use crate::names::FQ_SEPARATOR;
use crate::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use tracing::trace;

/// Longest parent chain followed by the tree's own walks.
///
/// Snapshots are not validated, so a parent cycle is possible. Walks stop
/// after this many steps instead of looping.
pub const MAX_PARENT_CHAIN: usize = 256;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeclTree {
    #[serde(default)]
    modules: Vec<ModuleInfo>,
    #[serde(default)]
    decls: Vec<Declaration>,
}

impl DeclTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot previously written by [`DeclTree::to_json`].
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    pub fn add_module(&mut self, module: ModuleInfo) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(module);
        id
    }

    /// Add `decl` under `parent` and register it in the parent's child lists.
    ///
    /// Value and type parameters get their `index` from their position in the
    /// parent's list. A declaration whose parent is missing from the tree is
    /// still stored; it simply isn't linked from anywhere.
    pub fn insert(&mut self, module: ModuleId, parent: Parent, mut decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        decl.module = module;
        decl.parent = parent.clone();

        if let Some(parent_id) = parent.declaration() {
            if let Some(parent_decl) = self.decls.get_mut(parent_id.index()) {
                link_child(parent_decl, id, &mut decl);
            } else {
                trace!(%id, parent = %parent_id, "inserted declaration with unknown parent");
            }
        }

        self.decls.push(decl);
        id
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    pub fn contains(&self, id: DeclId) -> bool {
        id.index() < self.decls.len()
    }

    pub fn module(&self, id: ModuleId) -> Option<&ModuleInfo> {
        self.modules.get(id.index())
    }

    /// Module owning the declaration.
    pub fn module_of(&self, id: DeclId) -> Option<&ModuleInfo> {
        self.get(id).and_then(|decl| self.module(decl.module))
    }

    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &ModuleInfo)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, m)| (ModuleId(i as u32), m))
    }

    /// All declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }

    pub fn ids(&self) -> impl Iterator<Item = DeclId> + '_ {
        (0..self.decls.len() as u32).map(DeclId)
    }

    pub fn parent_decl(&self, id: DeclId) -> Option<DeclId> {
        self.get(id)?.parent.declaration()
    }

    /// Nearest enclosing class, skipping properties and callables on the way.
    pub fn containing_class(&self, id: DeclId) -> Option<DeclId> {
        let mut current = self.parent_decl(id);
        for _ in 0..MAX_PARENT_CHAIN {
            let candidate = current?;
            if matches!(self.get(candidate)?.kind, DeclKind::Class(_)) {
                return Some(candidate);
            }
            current = self.parent_decl(candidate);
        }
        trace!(%id, "parent chain too long, no containing class");
        None
    }

    /// Property owning an accessor.
    pub fn accessor_property(&self, id: DeclId) -> Option<DeclId> {
        let decl = self.get(id)?;
        if !matches!(decl.kind, DeclKind::PropertyAccessor(_)) {
            return None;
        }
        let parent = decl.parent.declaration()?;
        matches!(self.get(parent)?.kind, DeclKind::Property(_)).then_some(parent)
    }

    /// Extension receiver of a callable; accessors inherit their property's.
    pub fn extension_receiver(&self, id: DeclId) -> Option<&TypeRef> {
        let decl = self.get(id)?;
        match &decl.kind {
            DeclKind::PropertyAccessor(_) => {
                let property = self.accessor_property(id)?;
                self.get(property)?.own_receiver()
            }
            _ => decl.own_receiver(),
        }
    }

    pub fn is_companion_object(&self, id: DeclId) -> bool {
        self.get(id).is_some_and(|decl| {
            matches!(decl.kind, DeclKind::Class(_))
                && decl.flags.contains(crate::flags::DeclFlags::COMPANION_OBJECT)
        })
    }

    /// Dotted path of declaration names, package included. Used for diagnostics.
    pub fn qualified_name(&self, id: DeclId) -> String {
        let mut segments = Vec::new();
        let mut package = None;
        let mut current = Some(id);
        while let Some(cur) = current {
            if segments.len() >= MAX_PARENT_CHAIN {
                trace!(%id, "parent chain too long, qualified name truncated");
                break;
            }
            let Some(decl) = self.get(cur) else {
                break;
            };
            segments.push(decl.name.as_str());
            match &decl.parent {
                Parent::Package(fq_name) => {
                    package = Some(fq_name);
                    current = None;
                }
                Parent::Declaration(parent) => current = Some(*parent),
            }
        }

        let mut out = String::new();
        if let Some(package) = package.filter(|p| !p.is_root()) {
            out.push_str(package.as_str());
        }
        for segment in segments.iter().rev() {
            if !out.is_empty() {
                out.push(FQ_SEPARATOR);
            }
            out.push_str(segment);
        }
        out
    }
}

impl Index<DeclId> for DeclTree {
    type Output = Declaration;

    fn index(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }
}

/// Register `child` (about to be stored as `id`) in `parent`'s child lists.
fn link_child(parent: &mut Declaration, id: DeclId, child: &mut Declaration) {
    match &mut child.kind {
        DeclKind::ValueParameter(param) => {
            let list = match &mut parent.kind {
                DeclKind::Function(data) => &mut data.value_params,
                DeclKind::Constructor(data) => &mut data.value_params,
                DeclKind::PropertyAccessor(data) => &mut data.value_params,
                _ => return,
            };
            param.index = list.len() as u32;
            list.push(id);
        }
        DeclKind::TypeParameter(param) => {
            let list = match &mut parent.kind {
                DeclKind::Function(data) => &mut data.type_params,
                DeclKind::Constructor(data) => &mut data.type_params,
                DeclKind::Property(data) => &mut data.type_params,
                DeclKind::Class(data) => &mut data.type_params,
                DeclKind::TypeAlias(data) => &mut data.type_params,
                _ => return,
            };
            param.index = list.len() as u32;
            list.push(id);
        }
        DeclKind::PropertyAccessor(accessor) => {
            if let DeclKind::Property(property) = &mut parent.kind {
                match accessor.role {
                    AccessorRole::Getter => property.getter = Some(id),
                    AccessorRole::Setter => property.setter = Some(id),
                }
            }
        }
        _ => {
            if let DeclKind::Class(class) = &mut parent.kind {
                class.members.push(id);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/tree_tests.rs"]
mod tests;
