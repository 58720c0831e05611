use super::*;

fn hierarchy() -> (TypeRef, TypeRef, TypeRef) {
    let view = TypeRef::object(
        TypeKey::new("View"),
        None,
        [CapabilityKey::new("Layoutable")],
    );
    let control = TypeRef::object(TypeKey::new("Control"), Some(view.clone()), []);
    let button = TypeRef::object(
        TypeKey::new("Button"),
        Some(control.clone()),
        [CapabilityKey::new("Tappable")],
    );
    (view, control, button)
}

#[test]
fn subtype_walks_the_parent_chain() {
    let (view, control, button) = hierarchy();
    assert!(button.is_subtype_of(&button));
    assert!(button.is_subtype_of(&control));
    assert!(button.is_subtype_of(&view));
    assert!(button.is_subtype_of(&TypeRef::any_object()));
    assert!(!view.is_subtype_of(&button));
}

#[test]
fn capabilities_are_inherited() {
    let (view, _, button) = hierarchy();
    assert!(button.conforms_to(&CapabilityKey::new("Layoutable")));
    assert!(button.conforms_to(&CapabilityKey::new("Tappable")));
    assert!(!view.conforms_to(&CapabilityKey::new("Tappable")));
}

#[test]
fn ancestry_is_most_derived_first() {
    let (_, _, button) = hierarchy();
    let keys: Vec<&str> = button.ancestry().map(|t| t.key().as_str()).collect();
    assert_eq!(keys, ["Button", "Control", "View", "AnyObject"]);
}

#[test]
fn identity_is_by_key() {
    assert_eq!(TypeRef::value(TypeKey::INT), TypeRef::value(TypeKey::new("Int")));
    assert_ne!(TypeRef::value(TypeKey::INT), TypeRef::value(TypeKey::UINT));
    assert!(!TypeRef::value(TypeKey::INT).is_reference());
}
