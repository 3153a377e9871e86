use super::*;
use crate::platform::NativePlatform;
use symsig_ir::{
    ClassKind, DeclFlags, DeclTreeBuilder, MAX_PARENT_CHAIN, ModuleInfo, ModuleOrigin, Parent,
    TypeRef,
};

fn resolver(tree: &DeclTree) -> IdentityResolver<'_> {
    IdentityResolver::new(MangleComputer::new(tree, &NativePlatform))
}

fn fallback(tree: &DeclTree, id: DeclId) -> i64 {
    hash_mangle(&MangleComputer::new(tree, &NativePlatform).mangle(id, MangleMode::Full))
}

fn with_id(field: MetadataField, id: i64) -> MetadataRecord {
    MetadataRecord::new().with_unique_id(field, id)
}

// =============================================================================
// Hashing and metadata
// =============================================================================

#[test]
fn test_hash_mangle_known_values() {
    assert_eq!(hash_mangle(""), -1_205_034_819_632_174_695);
    assert_eq!(hash_mangle("demo.run(){}"), 5_552_178_520_963_006_979);
    assert_eq!(hash_mangle("platform.posix.getpid(){}"), -4_818_186_904_890_312_625);
    // Longer than one 32-byte stripe.
    assert_eq!(
        hash_mangle("kotlin.collections.List.get(kotlin.Int){}kotlin.Any?"),
        -4_900_246_467_586_406_636
    );
}

#[test]
fn test_hash_mangle_is_stable_and_discriminating() {
    assert_eq!(hash_mangle("demo.run(){}"), hash_mangle("demo.run(){}"));
    assert_ne!(hash_mangle("demo.run(){}"), hash_mangle("demo.run(kotlin.Int){}"));
    assert_ne!(hash_mangle(""), hash_mangle("a"));
}

#[test]
fn test_read_unique_id_uses_field_of_kind() {
    let record = MetadataRecord::new()
        .with_unique_id(MetadataField::ClassUniqId, 1)
        .with_unique_id(MetadataField::FunctionUniqId, 2);

    assert_eq!(read_unique_id(&DeclKind::class(ClassKind::Class), &record), Some(1));
    assert_eq!(read_unique_id(&DeclKind::function(TypeRef::unit()), &record), Some(2));
    assert_eq!(read_unique_id(&DeclKind::constructor(), &record), None);
    assert_eq!(read_unique_id(&DeclKind::value_parameter(TypeRef::unit()), &record), None);
    assert_eq!(read_unique_id(&DeclKind::Other, &record), None);
}

#[test]
fn test_interop_origin_classification() {
    let function = Declaration::new("f", DeclKind::function(TypeRef::unit()));
    let synthesized = function.clone().with_flags(DeclFlags::SYNTHESIZED);
    let param = Declaration::new("x", DeclKind::value_parameter(TypeRef::unit()));
    let class = Declaration::new("C", DeclKind::class(ClassKind::Class)).with_flags(DeclFlags::SYNTHESIZED);

    assert!(is_originally_interop_declaration(&function));
    assert!(!is_originally_interop_declaration(&synthesized));
    assert!(!is_originally_interop_declaration(&param));
    // Synthesized only matters for callable members.
    assert!(is_originally_interop_declaration(&class));
}

// =============================================================================
// Fallback path
// =============================================================================

#[test]
fn test_source_declarations_hash_their_signature() {
    let mut b = DeclTreeBuilder::new();
    let f = b.add(
        Parent::package("demo"),
        Declaration::new("run", DeclKind::function(TypeRef::unit()))
            .with_metadata(with_id(MetadataField::FunctionUniqId, 99)),
    );
    b.value_param(f, "x", TypeRef::class("kotlin.Int"));
    let tree = b.finish();

    let id = resolver(&tree).signature_id(f).expect("hash fallback");
    assert_eq!(id, fallback(&tree, f));
    assert_ne!(id, 99);
}

#[test]
fn test_value_parameter_in_interop_module_hashes() {
    let mut b = DeclTreeBuilder::new();
    b.module("platform.Foundation", ModuleOrigin::ForeignInterop);
    let f = b.add(
        Parent::package("platform.Foundation"),
        Declaration::new("run", DeclKind::function(TypeRef::unit()))
            .with_metadata(with_id(MetadataField::FunctionUniqId, 5)),
    );
    let x = b.value_param(f, "x", TypeRef::class("kotlin.Int"));
    let tree = b.finish();

    let r = resolver(&tree);
    assert!(!r.should_extract_unique_id(x));
    assert_eq!(r.signature_id(x), Ok(fallback(&tree, x)));
}

#[test]
fn test_synthesized_interop_member_hashes() {
    let mut b = DeclTreeBuilder::new();
    b.module("platform.Foundation", ModuleOrigin::ForeignInterop);
    let class = b.class(Parent::package("platform.Foundation"), "NSData");
    let copy = b.add_member(
        class,
        Declaration::new("copy", DeclKind::function(TypeRef::unit())).with_flags(DeclFlags::SYNTHESIZED),
    );
    let tree = b.finish();
    assert_eq!(resolver(&tree).signature_id(copy), Ok(fallback(&tree, copy)));
}

#[test]
fn test_special_cases_bypass_unique_id() {
    let mut b = DeclTreeBuilder::new();
    b.module("platform.Foundation", ModuleOrigin::ForeignInterop);
    let class = b.add(
        Parent::package("platform.Foundation"),
        Declaration::new("NSString", DeclKind::class(ClassKind::Class))
            .with_metadata(with_id(MetadataField::ClassUniqId, 10)),
    );
    let prop = b.add_member(
        class,
        Declaration::new("length", DeclKind::property(TypeRef::class("kotlin.ULong")))
            .with_metadata(with_id(MetadataField::PropertyUniqId, 11)),
    );
    let getter = b.getter(prop).expect("property exists");
    let companion = b.add_member(
        class,
        Declaration::new("Companion", DeclKind::class(ClassKind::Object))
            .with_flags(DeclFlags::COMPANION_OBJECT)
            .with_metadata(with_id(MetadataField::ClassUniqId, 12)),
    );
    let companion_ctor = b.add_member(
        companion,
        Declaration::new("<init>", DeclKind::constructor())
            .with_metadata(with_id(MetadataField::ConstructorUniqId, 13)),
    );
    let ctor = b.add_member(
        class,
        Declaration::new("<init>", DeclKind::constructor())
            .with_metadata(with_id(MetadataField::ConstructorUniqId, 14)),
    );
    let tree = b.finish();
    let r = resolver(&tree);

    assert_eq!(r.signature_id(getter), Ok(fallback(&tree, getter)));
    assert_eq!(r.signature_id(companion_ctor), Ok(fallback(&tree, companion_ctor)));
    assert_eq!(r.signature_id(class), Ok(10));
    assert_eq!(r.signature_id(prop), Ok(11));
    assert_eq!(r.signature_id(companion), Ok(12));
    assert_eq!(r.signature_id(ctor), Ok(14));
}

// =============================================================================
// UniqueId path
// =============================================================================

#[test]
fn test_interop_type_parameter_and_alias_ids() {
    let mut b = DeclTreeBuilder::new();
    b.module("platform.posix", ModuleOrigin::ForeignInterop);
    let alias = b.add(
        Parent::package("platform.posix"),
        Declaration::new("size_t", DeclKind::type_alias(TypeRef::class("kotlin.ULong")))
            .with_metadata(with_id(MetadataField::TypeAliasUniqId, -3)),
    );
    let class = b.class(Parent::package("platform.posix"), "Holder");
    let tp = b.add_member(
        class,
        Declaration::new("T", DeclKind::type_parameter(vec![]))
            .with_metadata(with_id(MetadataField::TypeParamUniqId, 21)),
    );
    let tree = b.finish();
    let r = resolver(&tree);

    assert_eq!(r.signature_id(alias), Ok(-3));
    assert_eq!(r.signature_id(tp), Ok(21));
}

#[test]
fn test_missing_unique_id_is_an_error() {
    let mut b = DeclTreeBuilder::new();
    b.module("platform.AppKit", ModuleOrigin::ForeignInterop);
    let class = b.add(
        Parent::package("platform.AppKit"),
        Declaration::new("NSView", DeclKind::class(ClassKind::Class))
            .with_metadata(with_id(MetadataField::ClassUniqId, 1)),
    );
    let draw = b.function(Parent::Declaration(class), "draw", TypeRef::unit());
    let tree = b.finish();

    assert_eq!(
        resolver(&tree).signature_id(draw),
        Err(MangleError::MissingUniqueId {
            declaration: "platform.AppKit.NSView.draw".to_string(),
            module: "platform.AppKit".to_string(),
        })
    );
}

#[test]
fn test_missing_unique_id_under_parent_cycle() {
    let mut tree = DeclTree::new();
    let module = tree.add_module(ModuleInfo::new("platform.AppKit", ModuleOrigin::ForeignInterop));
    let class = tree.insert(
        module,
        Parent::Declaration(DeclId(0)),
        Declaration::new("NSView", DeclKind::class(ClassKind::Class)),
    );

    let Err(MangleError::MissingUniqueId { declaration, module }) =
        resolver(&tree).signature_id(class)
    else {
        panic!("expected a missing unique id");
    };
    assert_eq!(declaration.split('.').count(), MAX_PARENT_CHAIN);
    assert_eq!(module, "platform.AppKit");
}

#[test]
fn test_record_with_wrong_field_is_missing() {
    let mut b = DeclTreeBuilder::new();
    b.module("platform.AppKit", ModuleOrigin::ForeignInterop);
    let f = b.add(
        Parent::package("platform.AppKit"),
        Declaration::new("beep", DeclKind::function(TypeRef::unit()))
            .with_metadata(with_id(MetadataField::PropertyUniqId, 4)),
    );
    let tree = b.finish();
    assert!(matches!(
        resolver(&tree).signature_id(f),
        Err(MangleError::MissingUniqueId { .. })
    ));
}

#[test]
fn test_fake_override_uses_first_concrete_ancestor() {
    let mut b = DeclTreeBuilder::new();
    b.module("platform.AppKit", ModuleOrigin::ForeignInterop);
    let base = b.add(
        Parent::package("platform.AppKit"),
        Declaration::new("NSResponder", DeclKind::class(ClassKind::Class))
            .with_metadata(with_id(MetadataField::ClassUniqId, 1)),
    );
    let base_draw = b.add_member(
        base,
        Declaration::new("draw", DeclKind::function(TypeRef::unit()))
            .with_metadata(with_id(MetadataField::FunctionUniqId, 77)),
    );
    let other = b.add(
        Parent::package("platform.AppKit"),
        Declaration::new("NSDrawing", DeclKind::class(ClassKind::Interface))
            .with_metadata(with_id(MetadataField::ClassUniqId, 2)),
    );
    let other_draw = b.add_member(
        other,
        Declaration::new("draw", DeclKind::function(TypeRef::unit()))
            .with_metadata(with_id(MetadataField::FunctionUniqId, 88)),
    );
    let derived = b.add(
        Parent::package("platform.AppKit"),
        Declaration::new("NSView", DeclKind::class(ClassKind::Class))
            .with_metadata(with_id(MetadataField::ClassUniqId, 3)),
    );
    let fake = b.add_member(
        derived,
        Declaration::new("draw", DeclKind::function(TypeRef::unit()))
            .with_flags(DeclFlags::FAKE_OVERRIDE)
            .with_overridden(vec![base_draw, other_draw]),
    );
    let tree = b.finish();
    let r = resolver(&tree);

    assert_eq!(r.signature_id(fake), r.signature_id(base_draw));
    assert_eq!(r.signature_id(fake), Ok(77));
}

#[test]
fn test_fake_override_without_concrete_ancestor_is_an_error() {
    let mut b = DeclTreeBuilder::new();
    b.module("platform.AppKit", ModuleOrigin::ForeignInterop);
    let class = b.add(
        Parent::package("platform.AppKit"),
        Declaration::new("NSView", DeclKind::class(ClassKind::Class))
            .with_metadata(with_id(MetadataField::ClassUniqId, 3)),
    );
    let fake = b.add_member(
        class,
        Declaration::new("draw", DeclKind::function(TypeRef::unit())).with_flags(DeclFlags::FAKE_OVERRIDE),
    );
    let tree = b.finish();

    assert_eq!(
        resolver(&tree).signature_id(fake),
        Err(MangleError::UnresolvedFakeOverride {
            declaration: "platform.AppKit.NSView.draw".to_string(),
        })
    );
}

#[test]
fn test_fake_override_outside_interop_hashes_itself() {
    let mut b = DeclTreeBuilder::new();
    let base = b.class(Parent::package("demo"), "Base");
    let base_draw = b.function(Parent::Declaration(base), "draw", TypeRef::unit());
    let derived = b.class(Parent::package("demo"), "Derived");
    let fake = b.add_member(
        derived,
        Declaration::new("draw", DeclKind::function(TypeRef::unit()))
            .with_flags(DeclFlags::FAKE_OVERRIDE)
            .with_overridden(vec![base_draw]),
    );
    let tree = b.finish();
    let r = resolver(&tree);

    assert_eq!(r.signature_id(fake), Ok(fallback(&tree, fake)));
    assert_ne!(r.signature_id(fake), r.signature_id(base_draw));
}

#[test]
fn test_unknown_declaration_is_an_error() {
    let tree = DeclTreeBuilder::new().finish();
    assert_eq!(
        resolver(&tree).signature_id(DeclId(8)),
        Err(MangleError::UnknownDeclaration(DeclId(8)))
    );
}
