//! Fake-override resolution.
//!
//! A fake override has no identity of its own: it stands for the concrete
//! declarations it inherits. This module finds those declarations.
//!
//! ## Ordering
//!
//! Results feed persisted signatures, so the order must not depend on hashing:
//! overridden lists are walked depth-first in declaration order and the result
//! keeps first-discovery order (`IndexSet`).

use crate::limits::MAX_OVERRIDE_RESOLUTION_DEPTH;
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashSet};
use smallvec::{SmallVec, smallvec};
use symsig_ir::{DeclId, DeclTree};
use tracing::trace;

pub type OverrideTargets = SmallVec<[DeclId; 2]>;

/// Concrete (non-fake-override) declarations a member stands for.
///
/// - A declaration that is not a fake override resolves to itself.
/// - Otherwise, every non-fake-override reachable through the overridden graph
///   is collected; abstract members count as concrete.
/// - Candidates overridden by another candidate are dropped, so only the most
///   specific implementations remain.
///
/// Unknown ids resolve to nothing.
pub fn resolve_concrete_overrides(tree: &DeclTree, id: DeclId) -> OverrideTargets {
    let Some(decl) = tree.get(id) else {
        return OverrideTargets::new();
    };
    if !decl.is_fake_override() {
        return smallvec![id];
    }

    let mut found: IndexSet<DeclId, FxBuildHasher> = IndexSet::default();
    let mut visited = FxHashSet::default();
    visited.insert(id);
    collect_concrete(tree, id, 0, &mut visited, &mut found);

    let targets: OverrideTargets = found
        .iter()
        .copied()
        .filter(|&candidate| {
            !found
                .iter()
                .any(|&other| other != candidate && overrides_transitively(tree, other, candidate))
        })
        .collect();
    trace!(%id, targets = ?targets, "resolved fake override");
    targets
}

fn collect_concrete(
    tree: &DeclTree,
    id: DeclId,
    depth: usize,
    visited: &mut FxHashSet<DeclId>,
    found: &mut IndexSet<DeclId, FxBuildHasher>,
) {
    if depth >= MAX_OVERRIDE_RESOLUTION_DEPTH {
        trace!(%id, depth, "override resolution depth exceeded");
        return;
    }
    let Some(decl) = tree.get(id) else {
        return;
    };
    for &parent in decl.overridden() {
        if !visited.insert(parent) {
            continue;
        }
        match tree.get(parent) {
            Some(p) if p.is_fake_override() => {
                collect_concrete(tree, parent, depth + 1, visited, found);
            }
            Some(_) => {
                found.insert(parent);
            }
            None => trace!(%id, %parent, "overridden declaration missing from tree"),
        }
    }
}

/// Whether `sub` overrides `sup`, directly or through intermediate members.
fn overrides_transitively(tree: &DeclTree, sub: DeclId, sup: DeclId) -> bool {
    let mut stack: SmallVec<[(DeclId, usize); 8]> = smallvec![(sub, 0)];
    let mut visited = FxHashSet::default();
    while let Some((current, depth)) = stack.pop() {
        if depth >= MAX_OVERRIDE_RESOLUTION_DEPTH || !visited.insert(current) {
            continue;
        }
        let Some(decl) = tree.get(current) else {
            continue;
        };
        for &parent in decl.overridden() {
            if parent == sup {
                return true;
            }
            stack.push((parent, depth + 1));
        }
    }
    false
}

#[cfg(test)]
#[path = "../tests/overrides_tests.rs"]
mod tests;
