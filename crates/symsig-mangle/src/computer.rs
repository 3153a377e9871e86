//! Structural mangle computer.
//!
//! Encodes a declaration into a flat, deterministic string. The encoding is
//! built from three facets selected by [`MangleMode`]:
//!
//! - **qualifier**: enclosing package and declaration names, `.` separated
//! - **name**: the declaration's own name (`<init>` for constructors,
//!   `<get-p>` / `<set-p>` for accessors)
//! - **signature**: for callables, the receiver, value parameters, type
//!   parameters and optionally the return type
//!
//! ## Grammar
//!
//! ```text
//! function    := qualifier name [ "#static" ] [ "@" type ] "(" params ")" "{" tparams "}" [ type ]
//! param       := [ platform-prefix ] type [ "..." ]
//! tparam      := index "§" "<" type ( "&" type )* ">"
//! type        := fq-name [ "<" arg ( "," arg )* ">" ] [ "?" ]
//!              | depth ":" index [ "?" ]            // type parameter reference
//! arg         := "*" | [ "in " | "out " ] type
//! ```
//!
//! Type parameter references are written relative to the declaration being
//! mangled: `depth` 0 is the declaration itself, 1 its nearest enclosing
//! type-parameter container, and so on. That keeps signatures independent of
//! arena ids.
//!
//! Platform hooks ([`ManglePlatform`]) are consulted for callable names and
//! value-parameter prefixes when the mode applies platform overrides.

use crate::limits::{DEFAULT_MANGLE_CAPACITY, MAX_SCOPE_DEPTH, MAX_TYPE_NESTING_DEPTH};
use crate::mode::MangleMode;
use crate::platform::ManglePlatform;
use smallvec::SmallVec;
use std::borrow::Cow;
use symsig_ir::{
    AccessorRole, DeclFlags, DeclId, DeclKind, DeclTree, Declaration, Parent, TypeArg, TypeRef,
    Variance,
};
use tracing::trace;

// =============================================================================
// Mangle constants
// =============================================================================

pub const FQN_SEPARATOR: char = '.';
pub const CONSTRUCTOR_NAME: &str = "<init>";
pub const GETTER_PREFIX: &str = "<get-";
pub const SETTER_PREFIX: &str = "<set-";
pub const ACCESSOR_NAME_SUFFIX: &str = ">";
pub const STATIC_MEMBER_MARK: &str = "#static";
pub const EXTENSION_RECEIVER_PREFIX: char = '@';
pub const VALUE_PARAMS_START: char = '(';
pub const VALUE_PARAMS_END: char = ')';
pub const TYPE_PARAMS_START: char = '{';
pub const TYPE_PARAMS_END: char = '}';
pub const LIST_SEPARATOR: char = ';';
pub const TYPE_PARAM_INDEX_MARK: char = '§';
pub const UPPER_BOUNDS_START: char = '<';
pub const UPPER_BOUNDS_END: char = '>';
pub const UPPER_BOUND_SEPARATOR: char = '&';
pub const TYPE_ARGS_START: char = '<';
pub const TYPE_ARGS_END: char = '>';
pub const TYPE_ARG_SEPARATOR: char = ',';
pub const STAR_PROJECTION: char = '*';
pub const VARIANCE_IN: &str = "in ";
pub const VARIANCE_OUT: &str = "out ";
pub const NULLABLE_MARK: char = '?';
pub const VARARG_MARK: &str = "...";
pub const TYPE_PARAM_REF_SEPARATOR: char = ':';
pub const VALUE_PARAM_DECL_MARK: char = '#';

// =============================================================================
// MangleComputer
// =============================================================================

/// Computes mangled names over one declaration tree.
///
/// The computer is a cheap, copyable view: it holds no state between calls and
/// can be shared across threads.
#[derive(Copy, Clone)]
pub struct MangleComputer<'a> {
    tree: &'a DeclTree,
    platform: &'a dyn ManglePlatform,
    capacity: usize,
}

impl<'a> MangleComputer<'a> {
    pub fn new(tree: &'a DeclTree, platform: &'a dyn ManglePlatform) -> Self {
        Self {
            tree,
            platform,
            capacity: DEFAULT_MANGLE_CAPACITY,
        }
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn tree(&self) -> &'a DeclTree {
        self.tree
    }

    /// Mangled name of `id` in `mode`. Unknown ids mangle to the empty string.
    pub fn mangle(&self, id: DeclId, mode: MangleMode) -> String {
        let mut encoder = Encoder {
            tree: self.tree,
            platform: self.platform,
            mode,
            out: String::with_capacity(self.capacity),
        };
        encoder.declaration(id);
        encoder.out
    }
}

/// Shape of a function-like declaration, extracted from its kind payload.
struct CallableShape<'t> {
    name: Cow<'t, str>,
    is_constructor: bool,
    receiver: Option<&'t TypeRef>,
    return_type: Option<&'t TypeRef>,
    type_params: &'t [DeclId],
}

struct Encoder<'a> {
    tree: &'a DeclTree,
    platform: &'a dyn ManglePlatform,
    mode: MangleMode,
    out: String,
}

impl<'a> Encoder<'a> {
    fn declaration(&mut self, id: DeclId) {
        let tree = self.tree;
        let Some(decl) = tree.get(id) else {
            trace!(%id, "mangling unknown declaration");
            return;
        };

        match &decl.kind {
            DeclKind::Function(data) => self.callable(
                id,
                decl,
                CallableShape {
                    name: Cow::Borrowed(decl.name.as_str()),
                    is_constructor: false,
                    receiver: data.receiver.as_ref(),
                    return_type: Some(&data.return_type),
                    type_params: &data.type_params,
                },
            ),
            DeclKind::Constructor(data) => self.callable(
                id,
                decl,
                CallableShape {
                    name: Cow::Borrowed(CONSTRUCTOR_NAME),
                    is_constructor: true,
                    receiver: None,
                    return_type: None,
                    type_params: &data.type_params,
                },
            ),
            DeclKind::PropertyAccessor(data) => {
                let property = tree.accessor_property(id).and_then(|p| tree.get(p));
                let type_params: &[DeclId] = match property.map(|p| &p.kind) {
                    Some(DeclKind::Property(prop)) => prop.type_params.as_slice(),
                    _ => &[],
                };
                self.callable(
                    id,
                    decl,
                    CallableShape {
                        name: accessor_name(tree, id, decl, data.role),
                        is_constructor: false,
                        receiver: tree.extension_receiver(id),
                        return_type: Some(&data.return_type),
                        type_params,
                    },
                );
            }
            DeclKind::Property(data) => {
                self.qualifier(&decl.parent);
                self.out.push_str(&decl.name);
                if !self.mode.includes_signature() {
                    return;
                }
                let containers = type_param_containers(tree, id);
                if let Some(receiver) = &data.receiver {
                    self.out.push(EXTENSION_RECEIVER_PREFIX);
                    self.type_ref(receiver, &containers, 0);
                }
                if !data.type_params.is_empty() {
                    self.type_param_list(&data.type_params, &containers);
                }
            }
            DeclKind::Class(_) | DeclKind::TypeAlias(_) | DeclKind::Other => {
                self.qualifier(&decl.parent);
                self.out.push_str(&decl.name);
            }
            DeclKind::TypeParameter(data) => {
                match decl.parent.declaration() {
                    Some(container) => self.declaration(container),
                    None => self.out.push_str(&decl.name),
                }
                self.out.push(TYPE_PARAM_INDEX_MARK);
                self.out.push_str(&data.index.to_string());
            }
            DeclKind::ValueParameter(_) => {
                if let Some(container) = decl.parent.declaration() {
                    self.declaration(container);
                }
                self.out.push(VALUE_PARAM_DECL_MARK);
                self.out.push_str(&decl.name);
            }
        }
    }

    fn callable(&mut self, id: DeclId, decl: &Declaration, shape: CallableShape<'_>) {
        let tree = self.tree;
        if self.mode.applies_platform_overrides() {
            if let Some(name) = self.platform.platform_function_name(tree, id) {
                self.out.push_str(&name);
                return;
            }
        }

        let scope = match decl.kind {
            DeclKind::PropertyAccessor(_) => tree
                .accessor_property(id)
                .and_then(|p| tree.get(p))
                .map_or(&decl.parent, |p| &p.parent),
            _ => &decl.parent,
        };
        self.qualifier(scope);
        self.out.push_str(&shape.name);

        if !self.mode.includes_signature() {
            return;
        }
        let containers = type_param_containers(tree, id);

        if decl.flags.contains(DeclFlags::STATIC) {
            self.out.push_str(STATIC_MEMBER_MARK);
        }
        if let Some(receiver) = shape.receiver {
            self.out.push(EXTENSION_RECEIVER_PREFIX);
            self.type_ref(receiver, &containers, 0);
        }

        self.out.push(VALUE_PARAMS_START);
        for (i, &param) in decl.value_params().iter().enumerate() {
            if i > 0 {
                self.out.push(LIST_SEPARATOR);
            }
            self.value_param(id, param, &containers);
        }
        self.out.push(VALUE_PARAMS_END);

        self.type_param_list(shape.type_params, &containers);

        if self.mode.includes_return_type() && !shape.is_constructor {
            if let Some(return_type) = shape.return_type.filter(|t| !t.is_unit()) {
                self.type_ref(return_type, &containers, 0);
            }
        }
    }

    fn value_param(&mut self, callable: DeclId, param: DeclId, containers: &[DeclId]) {
        let tree = self.tree;
        let Some(decl) = tree.get(param) else {
            return;
        };
        let DeclKind::ValueParameter(data) = &decl.kind else {
            return;
        };
        if self.mode.applies_platform_overrides() {
            let prefix = self
                .platform
                .special_value_param_prefix(tree, callable, param);
            self.out.push_str(&prefix);
        }
        self.type_ref(&data.ty, containers, 0);
        if decl.flags.contains(DeclFlags::VARARG) {
            self.out.push_str(VARARG_MARK);
        }
    }

    fn type_param_list(&mut self, type_params: &[DeclId], containers: &[DeclId]) {
        let tree = self.tree;
        self.out.push(TYPE_PARAMS_START);
        for (i, &tp) in type_params.iter().enumerate() {
            if i > 0 {
                self.out.push(LIST_SEPARATOR);
            }
            let Some(DeclKind::TypeParameter(data)) = tree.get(tp).map(|d| &d.kind) else {
                continue;
            };
            self.out.push_str(&data.index.to_string());
            self.out.push(TYPE_PARAM_INDEX_MARK);
            self.out.push(UPPER_BOUNDS_START);
            if data.bounds.is_empty() {
                self.type_ref(&TypeRef::nullable_any(), containers, 0);
            }
            for (j, bound) in data.bounds.iter().enumerate() {
                if j > 0 {
                    self.out.push(UPPER_BOUND_SEPARATOR);
                }
                self.type_ref(bound, containers, 0);
            }
            self.out.push(UPPER_BOUNDS_END);
        }
        self.out.push(TYPE_PARAMS_END);
    }

    fn type_ref(&mut self, ty: &TypeRef, containers: &[DeclId], depth: usize) {
        if depth > MAX_TYPE_NESTING_DEPTH {
            trace!(depth, "type nesting limit reached");
            return;
        }
        match ty {
            TypeRef::Class {
                fq_name,
                args,
                nullable,
            } => {
                self.out.push_str(fq_name.as_str());
                if !args.is_empty() {
                    self.out.push(TYPE_ARGS_START);
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            self.out.push(TYPE_ARG_SEPARATOR);
                        }
                        match arg {
                            TypeArg::Star => self.out.push(STAR_PROJECTION),
                            TypeArg::Type { variance, ty } => {
                                match variance {
                                    Variance::Invariant => {}
                                    Variance::In => self.out.push_str(VARIANCE_IN),
                                    Variance::Out => self.out.push_str(VARIANCE_OUT),
                                }
                                self.type_ref(ty, containers, depth + 1);
                            }
                        }
                    }
                    self.out.push(TYPE_ARGS_END);
                }
                if *nullable {
                    self.out.push(NULLABLE_MARK);
                }
            }
            TypeRef::TypeParameter {
                container,
                index,
                nullable,
            } => {
                match containers.iter().position(|c| c == container) {
                    Some(level) => self.out.push_str(&level.to_string()),
                    // Not visible from here; fall back to the container's name
                    // so the result stays independent of arena ids.
                    None => {
                        let tree = self.tree;
                        let name = tree.get(*container).map_or("?", |d| d.name.as_str());
                        self.out.push_str(name);
                    }
                }
                self.out.push(TYPE_PARAM_REF_SEPARATOR);
                self.out.push_str(&index.to_string());
                if *nullable {
                    self.out.push(NULLABLE_MARK);
                }
            }
        }
    }

    /// Enclosing scopes of a declaration followed by a separator, in modes
    /// that include qualifiers. Nothing is written for the root package.
    fn qualifier(&mut self, parent: &Parent) {
        if !self.mode.includes_qualifier() {
            return;
        }
        let tree = self.tree;
        let mut segments: SmallVec<[Cow<'_, str>; 8]> = SmallVec::new();
        let mut package = None;
        let mut current = parent;
        loop {
            match current {
                Parent::Package(fq_name) => {
                    package = Some(fq_name);
                    break;
                }
                Parent::Declaration(id) => {
                    let Some(decl) = tree.get(*id) else {
                        break;
                    };
                    if segments.len() >= MAX_SCOPE_DEPTH {
                        trace!(%id, "scope depth limit reached");
                        break;
                    }
                    segments.push(scope_name(tree, *id, decl));
                    current = &decl.parent;
                }
            }
        }

        let start = self.out.len();
        if let Some(package) = package.filter(|p| !p.is_root()) {
            self.out.push_str(package.as_str());
        }
        for segment in segments.iter().rev() {
            if self.out.len() > start {
                self.out.push(FQN_SEPARATOR);
            }
            self.out.push_str(segment);
        }
        if self.out.len() > start {
            self.out.push(FQN_SEPARATOR);
        }
    }
}

/// Name a declaration contributes when it appears as an enclosing scope.
fn scope_name<'t>(tree: &'t DeclTree, id: DeclId, decl: &'t Declaration) -> Cow<'t, str> {
    match &decl.kind {
        DeclKind::Constructor(_) => Cow::Borrowed(CONSTRUCTOR_NAME),
        DeclKind::PropertyAccessor(data) => accessor_name(tree, id, decl, data.role),
        _ => Cow::Borrowed(decl.name.as_str()),
    }
}

/// `<get-name>` / `<set-name>` from the owning property; the accessor's own
/// name when it is detached from a property.
fn accessor_name<'t>(
    tree: &'t DeclTree,
    id: DeclId,
    decl: &'t Declaration,
    role: AccessorRole,
) -> Cow<'t, str> {
    let Some(property) = tree.accessor_property(id).and_then(|p| tree.get(p)) else {
        return Cow::Borrowed(decl.name.as_str());
    };
    let prefix = match role {
        AccessorRole::Getter => GETTER_PREFIX,
        AccessorRole::Setter => SETTER_PREFIX,
    };
    Cow::Owned(format!("{prefix}{}{ACCESSOR_NAME_SUFFIX}", property.name))
}

/// Declarations whose type parameters are visible from `id`, innermost first.
fn type_param_containers(tree: &DeclTree, id: DeclId) -> SmallVec<[DeclId; 4]> {
    let mut containers = SmallVec::new();
    let mut current = Some(id);
    let mut steps = 0;
    while let Some(cur) = current {
        let Some(decl) = tree.get(cur) else {
            break;
        };
        if matches!(
            decl.kind,
            DeclKind::Function(_)
                | DeclKind::Constructor(_)
                | DeclKind::Property(_)
                | DeclKind::Class(_)
                | DeclKind::TypeAlias(_)
        ) {
            containers.push(cur);
        }
        steps += 1;
        if steps >= MAX_SCOPE_DEPTH {
            break;
        }
        current = decl.parent.declaration();
    }
    containers
}

#[cfg(test)]
#[path = "../tests/computer_tests.rs"]
mod tests;
