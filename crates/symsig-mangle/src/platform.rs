//! Platform hooks consulted by the mangle computer.
//!
//! The generic encoding is platform-neutral. A [`ManglePlatform`] can rename a
//! callable outright or prefix the encoding of its value parameters; the
//! computer asks it at exactly those two points and only in modes that apply
//! platform overrides.

use crate::interop::{
    foreign_init_method, has_foreign_factory_annotation, has_foreign_method_annotation,
    is_foreign_class_method, is_foreign_constructor, resolve_foreign_method_info,
};
use serde::{Deserialize, Serialize};
use symsig_ir::{DeclId, DeclKind, DeclTree};
use tracing::trace;

pub const FOREIGN_NAME_PREFIX: &str = "objc:";
pub const CONSTRUCTOR_SUFFIX: &str = "#Constructor";
pub const ACCESSOR_SUFFIX: &str = "#Accessor";
pub const RECEIVER_CLASS_SEPARATOR: char = '.';
pub const SELECTOR_PARAM_SUFFIX: char = ':';

pub trait ManglePlatform: Send + Sync {
    /// Name replacing the entire encoding of `callable`, or `None` to keep the
    /// generic encoding.
    fn platform_function_name(&self, tree: &DeclTree, callable: DeclId) -> Option<String> {
        let _ = (tree, callable);
        None
    }

    /// Prefix written in front of `param`'s encoding in `callable`'s signature.
    fn special_value_param_prefix(&self, tree: &DeclTree, callable: DeclId, param: DeclId) -> String {
        let _ = (tree, callable, param);
        String::new()
    }
}

/// No overrides at all.
#[derive(Copy, Clone, Debug, Default)]
pub struct GenericPlatform;

impl ManglePlatform for GenericPlatform {}

/// Native backend: foreign (Objective-C style) methods are named after their
/// selector.
#[derive(Copy, Clone, Debug, Default)]
pub struct NativePlatform;

impl ManglePlatform for NativePlatform {
    /// `[<ReceiverClass>.]objc:<selector>[#Constructor][#Accessor]`
    ///
    /// Foreign-style constructors are looked up through their designated init
    /// method. The suffixes always describe `callable` itself.
    fn platform_function_name(&self, tree: &DeclTree, callable: DeclId) -> Option<String> {
        let decl = tree.get(callable)?;
        if !decl.is_function_like() {
            return None;
        }
        let foreign_ctor = is_foreign_constructor(decl);
        let target = if foreign_ctor {
            foreign_init_method(tree, callable)?
        } else {
            callable
        };
        let info = resolve_foreign_method_info(tree, target)?;

        let mut name = String::new();
        // Constructors have no receiver of their own; they report the one of
        // the init method they are redirected to. Kotlin/Native reads only the
        // constructor's own receiver and never prefixes constructors, so the
        // two differ when the init method is an extension.
        let receiver = tree
            .extension_receiver(callable)
            .or_else(|| tree.extension_receiver(target));
        if let Some(receiver) = receiver {
            match receiver.class_fq_name() {
                Some(fq_name) => {
                    name.push_str(fq_name.short_name());
                    name.push(RECEIVER_CLASS_SEPARATOR);
                }
                None => trace!(%callable, "extension receiver is not a class type"),
            }
        }
        name.push_str(FOREIGN_NAME_PREFIX);
        name.push_str(&info.selector);
        if foreign_ctor {
            name.push_str(CONSTRUCTOR_SUFFIX);
        }
        if matches!(decl.kind, DeclKind::PropertyAccessor(_)) {
            name.push_str(ACCESSOR_SUFFIX);
        }
        Some(name)
    }

    /// `<paramName>:` for parameters of foreign instance methods, factories and
    /// class methods.
    ///
    /// Overloads that differ only in such a parameter name can still collide;
    /// the prefix disambiguates most interop overloads, not all of them.
    fn special_value_param_prefix(&self, tree: &DeclTree, callable: DeclId, param: DeclId) -> String {
        let (Some(owner), Some(param)) = (tree.get(callable), tree.get(param)) else {
            return String::new();
        };
        if has_foreign_method_annotation(owner)
            || has_foreign_factory_annotation(owner)
            || is_foreign_class_method(owner)
        {
            let mut prefix = param.name.clone();
            prefix.push(SELECTOR_PARAM_SUFFIX);
            prefix
        } else {
            String::new()
        }
    }
}

/// Platform selected through configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformKind {
    Generic,
    #[default]
    Native,
}

static GENERIC: GenericPlatform = GenericPlatform;
static NATIVE: NativePlatform = NativePlatform;

impl PlatformKind {
    pub fn hooks(self) -> &'static dyn ManglePlatform {
        match self {
            Self::Generic => &GENERIC,
            Self::Native => &NATIVE,
        }
    }
}

#[cfg(test)]
#[path = "../tests/platform_tests.rs"]
mod tests;
