use super::*;

fn registry() -> TypeRegistry {
    let mut r = TypeRegistry::new();
    r.register_capability(CapabilityKey::new("Layoutable")).unwrap();
    r.register_type(
        TypeKey::new("View"),
        None,
        [CapabilityKey::new("Layoutable")],
    )
    .unwrap();
    r.register_type(TypeKey::new("Label"), Some("View"), [])
        .unwrap();
    r
}

#[test]
fn builtins_are_preregistered() {
    let r = TypeRegistry::new();
    assert!(r.get("Int").is_some());
    assert!(r.get("String").is_some());
    assert!(r.get("AnyObject").unwrap().is_reference());
    assert!(!r.get("Double").unwrap().is_reference());
}

#[test]
fn registered_types_link_to_parents() {
    let r = registry();
    let label = r.get("Label").unwrap();
    assert_eq!(label.parent().unwrap().key().as_str(), "View");
    assert!(label.conforms_to(&CapabilityKey::new("Layoutable")));
}

#[test]
fn rejects_duplicates_and_unknown_references() {
    let mut r = registry();
    assert!(matches!(
        r.register_type(TypeKey::new("View"), None, []),
        Err(ReflectError::Registration(_))
    ));
    assert!(
        r.register_type(TypeKey::new("Orphan"), Some("Missing"), [])
            .is_err()
    );
    assert!(
        r.register_type(TypeKey::new("Weird"), Some("Int"), [])
            .is_err()
    );
    assert!(
        r.register_type(
            TypeKey::new("Tap"),
            None,
            [CapabilityKey::new("Tappable")]
        )
        .is_err()
    );
    assert!(
        r.register_capability(CapabilityKey::new("Layoutable"))
            .is_err()
    );
}

#[test]
fn object_types_lists_reference_types_only() {
    let r = registry();
    let names: Vec<&str> = r.object_types().map(|t| t.key().as_str()).collect();
    assert_eq!(names, ["AnyObject", "Label", "View"]);
}
