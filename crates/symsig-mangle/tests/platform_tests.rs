use super::*;
use crate::computer::MangleComputer;
use crate::mode::MangleMode;
use symsig_ir::{Annotation, DeclFlags, DeclTreeBuilder, Declaration, Parent, TypeRef, well_known};

fn objc_method(selector: &str) -> Annotation {
    Annotation::new(well_known::OBJC_METHOD).with_string("selector", selector)
}

// =============================================================================
// Platform function names
// =============================================================================

#[test]
fn test_generic_platform_has_no_overrides() {
    let mut b = DeclTreeBuilder::new();
    let f = b.add(
        Parent::package("platform.Foundation"),
        Declaration::new("doThing", DeclKind::function(TypeRef::unit()))
            .with_annotation(objc_method("doThing:")),
    );
    let x = b.value_param(f, "x", TypeRef::class("kotlin.Int"));
    let tree = b.finish();

    assert_eq!(GenericPlatform.platform_function_name(&tree, f), None);
    assert_eq!(GenericPlatform.special_value_param_prefix(&tree, f, x), "");
}

#[test]
fn test_native_name_without_receiver() {
    let mut b = DeclTreeBuilder::new();
    let f = b.add(
        Parent::package("platform.Foundation"),
        Declaration::new("doThing", DeclKind::function(TypeRef::unit()))
            .with_annotation(objc_method("doThing:")),
    );
    let tree = b.finish();
    assert_eq!(
        NativePlatform.platform_function_name(&tree, f).as_deref(),
        Some("objc:doThing:")
    );
}

#[test]
fn test_native_name_with_extension_receiver() {
    let mut b = DeclTreeBuilder::new();
    let f = b.add(
        Parent::package("platform.Foundation"),
        Declaration::new("doThing", DeclKind::function(TypeRef::unit()))
            .with_receiver(TypeRef::class("platform.Foundation.Foo"))
            .with_annotation(objc_method("doThing:")),
    );
    let tree = b.finish();
    assert_eq!(
        NativePlatform.platform_function_name(&tree, f).as_deref(),
        Some("Foo.objc:doThing:")
    );
}

#[test]
fn test_type_parameter_receiver_gets_no_prefix() {
    let mut b = DeclTreeBuilder::new();
    let next = DeclId(b.tree().len() as u32);
    let f = b.add(
        Parent::package("p"),
        Declaration::new("doThing", DeclKind::function(TypeRef::unit()))
            .with_receiver(TypeRef::type_parameter(next, 0))
            .with_annotation(objc_method("doThing:")),
    );
    b.type_param(f, "T", vec![]);
    let tree = b.finish();

    assert_eq!(f, next);
    assert_eq!(
        NativePlatform.platform_function_name(&tree, f).as_deref(),
        Some("objc:doThing:")
    );
}

#[test]
fn test_plain_functions_and_non_callables_have_no_native_name() {
    let mut b = DeclTreeBuilder::new();
    let f = b.function(Parent::package("p"), "plain", TypeRef::unit());
    let class = b.class(Parent::package("p"), "Foo");
    let tree = b.finish();

    assert_eq!(NativePlatform.platform_function_name(&tree, f), None);
    assert_eq!(NativePlatform.platform_function_name(&tree, class), None);
    assert_eq!(NativePlatform.platform_function_name(&tree, DeclId(77)), None);
}

#[test]
fn test_native_name_of_foreign_constructor() {
    let mut b = DeclTreeBuilder::new();
    let class = b.class(Parent::package("platform.UIKit"), "UIView");
    b.add_member(
        class,
        Declaration::new("initWithFrame", DeclKind::function(TypeRef::unit()))
            .with_annotation(objc_method("initWithFrame:")),
    );
    let ctor = b.add_member(
        class,
        Declaration::new("<init>", DeclKind::constructor()).with_annotation(
            Annotation::new(well_known::OBJC_CONSTRUCTOR).with_string("initSelector", "initWithFrame:"),
        ),
    );
    let tree = b.finish();

    assert_eq!(
        NativePlatform.platform_function_name(&tree, ctor).as_deref(),
        Some("objc:initWithFrame:#Constructor")
    );
}

#[test]
fn test_foreign_constructor_without_init_method_falls_through() {
    let mut b = DeclTreeBuilder::new();
    let class = b.class(Parent::package("p"), "Foo");
    let ctor = b.add_member(
        class,
        Declaration::new("<init>", DeclKind::constructor()).with_annotation(
            Annotation::new(well_known::OBJC_CONSTRUCTOR).with_string("initSelector", "init"),
        ),
    );
    let tree = b.finish();
    assert_eq!(NativePlatform.platform_function_name(&tree, ctor), None);
}

#[test]
fn test_native_name_of_accessor() {
    let mut b = DeclTreeBuilder::new();
    let class = b.class(Parent::package("platform.Foundation"), "NSString");
    let prop = b.add_member(
        class,
        Declaration::new("length", DeclKind::property(TypeRef::class("kotlin.ULong"))),
    );
    let getter = b.add_member(
        prop,
        Declaration::new(
            "<get-length>",
            DeclKind::accessor(symsig_ir::AccessorRole::Getter, TypeRef::class("kotlin.ULong")),
        )
        .with_annotation(objc_method("length")),
    );
    let tree = b.finish();

    assert_eq!(
        NativePlatform.platform_function_name(&tree, getter).as_deref(),
        Some("objc:length#Accessor")
    );
}

// =============================================================================
// Value parameter prefixes
// =============================================================================

#[test]
fn test_param_prefix_on_foreign_callables() {
    let mut b = DeclTreeBuilder::new();
    let factory = b.add(
        Parent::package("p"),
        Declaration::new("create", DeclKind::function(TypeRef::unit()))
            .with_annotation(Annotation::new(well_known::OBJC_FACTORY)),
    );
    let factory_x = b.value_param(factory, "x", TypeRef::class("kotlin.Int"));
    let method = b.add(
        Parent::package("p"),
        Declaration::new("run", DeclKind::function(TypeRef::unit()))
            .with_annotation(objc_method("runWith:")),
    );
    let method_x = b.value_param(method, "x", TypeRef::class("kotlin.Int"));
    let class_method = b.add(
        Parent::package("p"),
        Declaration::new("make", DeclKind::function(TypeRef::unit()))
            .with_flags(DeclFlags::FOREIGN_CLASS_METHOD),
    );
    let class_method_x = b.value_param(class_method, "x", TypeRef::class("kotlin.Int"));
    let plain = b.function(Parent::package("p"), "plain", TypeRef::unit());
    let plain_x = b.value_param(plain, "x", TypeRef::class("kotlin.Int"));
    let tree = b.finish();

    assert_eq!(NativePlatform.special_value_param_prefix(&tree, factory, factory_x), "x:");
    assert_eq!(NativePlatform.special_value_param_prefix(&tree, method, method_x), "x:");
    assert_eq!(
        NativePlatform.special_value_param_prefix(&tree, class_method, class_method_x),
        "x:"
    );
    assert_eq!(NativePlatform.special_value_param_prefix(&tree, plain, plain_x), "");
}

#[test]
fn test_factory_param_encoding_in_signature() {
    let mut b = DeclTreeBuilder::new();
    let factory = b.add(
        Parent::package("p"),
        Declaration::new("create", DeclKind::function(TypeRef::unit()))
            .with_annotation(Annotation::new(well_known::OBJC_FACTORY)),
    );
    b.value_param(factory, "x", TypeRef::class("kotlin.Int"));
    let plain = b.function(Parent::package("p"), "create", TypeRef::unit());
    b.value_param(plain, "x", TypeRef::class("kotlin.Int"));
    let tree = b.finish();

    let computer = MangleComputer::new(&tree, &NativePlatform);
    assert_eq!(computer.mangle(factory, MangleMode::Full), "p.create(x:kotlin.Int){}");
    assert_eq!(computer.mangle(plain, MangleMode::Full), "p.create(kotlin.Int){}");
}

/// Known limitation: extension overloads that differ only in a parameter name
/// used as a selector fragment collide wherever the name prefix is not
/// applied. Only the native prefix tells them apart.
#[test]
fn test_param_name_overloads_collide_without_native_prefix() {
    let mut b = DeclTreeBuilder::new();
    let overload = |b: &mut DeclTreeBuilder, param: &str| {
        let f = b.add(
            Parent::package("platform.Foundation"),
            Declaration::new("make", DeclKind::function(TypeRef::unit()))
                .with_receiver(TypeRef::class("platform.Foundation.Foo"))
                .with_annotation(Annotation::new(well_known::OBJC_FACTORY)),
        );
        b.value_param(f, param, TypeRef::class("kotlin.Int"));
        f
    };
    let with_x = overload(&mut b, "x");
    let with_y = overload(&mut b, "y");
    let tree = b.finish();

    let generic = MangleComputer::new(&tree, &GenericPlatform);
    assert_eq!(
        generic.mangle(with_x, MangleMode::Full),
        generic.mangle(with_y, MangleMode::Full)
    );

    let native = MangleComputer::new(&tree, &NativePlatform);
    assert_eq!(
        native.mangle(with_x, MangleMode::Structural),
        native.mangle(with_y, MangleMode::Structural)
    );
    assert_ne!(
        native.mangle(with_x, MangleMode::Full),
        native.mangle(with_y, MangleMode::Full)
    );
}

#[test]
fn test_platform_kind_hooks() {
    let mut b = DeclTreeBuilder::new();
    let f = b.add(
        Parent::package("p"),
        Declaration::new("doThing", DeclKind::function(TypeRef::unit()))
            .with_annotation(objc_method("doThing:")),
    );
    let tree = b.finish();

    assert_eq!(PlatformKind::default(), PlatformKind::Native);
    assert!(PlatformKind::Native.hooks().platform_function_name(&tree, f).is_some());
    assert!(PlatformKind::Generic.hooks().platform_function_name(&tree, f).is_none());
}
