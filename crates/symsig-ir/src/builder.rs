//! Convenience layer over [`DeclTree::insert`] for front-ends and tests.

use crate::decl::{AccessorRole, ClassKind, DeclKind, Declaration, Parent};
use crate::ids::{DeclId, ModuleId};
use crate::module::{ModuleInfo, ModuleOrigin};
use crate::tree::DeclTree;
use crate::types::TypeRef;

/// Builds a [`DeclTree`] one declaration at a time.
///
/// Declarations are added to the *current* module, which is the one most
/// recently created with [`module`](Self::module) or selected with
/// [`in_module`](Self::in_module).
pub struct DeclTreeBuilder {
    tree: DeclTree,
    current: ModuleId,
}

impl Default for DeclTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclTreeBuilder {
    /// Starts with a single source module named `main`.
    pub fn new() -> Self {
        let mut tree = DeclTree::new();
        let current = tree.add_module(ModuleInfo::new("main", ModuleOrigin::Source));
        Self { tree, current }
    }

    /// Add a module and make it current.
    pub fn module(&mut self, name: impl Into<String>, origin: ModuleOrigin) -> ModuleId {
        self.current = self.tree.add_module(ModuleInfo::new(name, origin));
        self.current
    }

    pub fn in_module(&mut self, module: ModuleId) -> &mut Self {
        self.current = module;
        self
    }

    pub fn add(&mut self, parent: Parent, decl: Declaration) -> DeclId {
        self.tree.insert(self.current, parent, decl)
    }

    pub fn add_member(&mut self, owner: DeclId, decl: Declaration) -> DeclId {
        self.add(Parent::Declaration(owner), decl)
    }

    pub fn class(&mut self, parent: Parent, name: &str) -> DeclId {
        self.add(parent, Declaration::new(name, DeclKind::class(ClassKind::Class)))
    }

    pub fn function(&mut self, parent: Parent, name: &str, return_type: TypeRef) -> DeclId {
        self.add(parent, Declaration::new(name, DeclKind::function(return_type)))
    }

    pub fn constructor(&mut self, class: DeclId) -> DeclId {
        self.add_member(class, Declaration::new("<init>", DeclKind::constructor()))
    }

    pub fn value_param(&mut self, callable: DeclId, name: &str, ty: TypeRef) -> DeclId {
        self.add_member(callable, Declaration::new(name, DeclKind::value_parameter(ty)))
    }

    pub fn type_param(&mut self, container: DeclId, name: &str, bounds: Vec<TypeRef>) -> DeclId {
        self.add_member(container, Declaration::new(name, DeclKind::type_parameter(bounds)))
    }

    pub fn property(&mut self, parent: Parent, name: &str, ty: TypeRef) -> DeclId {
        self.add(parent, Declaration::new(name, DeclKind::property(ty)))
    }

    /// Getter returning the property's type, with the property's visibility and flags.
    pub fn getter(&mut self, property: DeclId) -> Option<DeclId> {
        let (name, ty, visibility, flags) = self.accessor_template(property)?;
        let getter = Declaration::new(
            format!("<get-{name}>"),
            DeclKind::accessor(AccessorRole::Getter, ty),
        )
        .with_visibility(visibility)
        .with_flags(flags);
        Some(self.add_member(property, getter))
    }

    /// Setter taking a single `value` parameter of the property's type.
    pub fn setter(&mut self, property: DeclId) -> Option<DeclId> {
        let (name, ty, visibility, flags) = self.accessor_template(property)?;
        let setter = Declaration::new(
            format!("<set-{name}>"),
            DeclKind::accessor(AccessorRole::Setter, TypeRef::unit()),
        )
        .with_visibility(visibility)
        .with_flags(flags);
        let setter = self.add_member(property, setter);
        self.value_param(setter, "value", ty);
        Some(setter)
    }

    pub fn tree(&self) -> &DeclTree {
        &self.tree
    }

    pub fn finish(self) -> DeclTree {
        self.tree
    }

    fn accessor_template(
        &self,
        property: DeclId,
    ) -> Option<(String, TypeRef, crate::flags::Visibility, crate::flags::DeclFlags)> {
        let decl = self.tree.get(property)?;
        let DeclKind::Property(data) = &decl.kind else {
            return None;
        };
        Some((
            decl.name.clone(),
            data.ty.clone(),
            decl.visibility,
            decl.flags,
        ))
    }
}
