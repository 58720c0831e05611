use super::*;

#[test]
fn parses_scalar_codes() {
    assert_eq!(MemberType::parse("B"), MemberType::Bool);
    for code in ["c", "i", "s", "l", "q"] {
        assert_eq!(MemberType::parse(code), MemberType::Int, "{code}");
    }
    for code in ["C", "I", "S", "L", "Q"] {
        assert_eq!(MemberType::parse(code), MemberType::UInt, "{code}");
    }
    assert_eq!(MemberType::parse("f"), MemberType::Float);
    assert_eq!(MemberType::parse("d"), MemberType::Double);
    assert_eq!(MemberType::parse("*"), MemberType::CString);
    assert_eq!(MemberType::parse("#"), MemberType::Class);
    assert_eq!(MemberType::parse(":"), MemberType::Selector);
}

#[test]
fn parses_object_codes() {
    assert_eq!(MemberType::parse("@"), MemberType::Object(None));
    assert_eq!(
        MemberType::parse("@\"View\""),
        MemberType::Object(Some("View".into()))
    );
    assert_eq!(
        MemberType::parse("@\"<Tappable>\""),
        MemberType::Object(Some("<Tappable>".into()))
    );
    assert_eq!(MemberType::parse("@\"View"), MemberType::Object(None));
}

#[test]
fn unknown_codes_are_unsupported() {
    assert_eq!(
        MemberType::parse("{CGRect=dddd}"),
        MemberType::Unsupported("{CGRect=dddd}".into())
    );
    assert_eq!(MemberType::parse(""), MemberType::Unsupported(String::new()));
}

#[test]
fn decl_deserializes_codes_and_defaults() {
    let decl: MemberDecl =
        serde_json::from_str(r#"{ "name": "hidden", "type": "B", "getter": "isHidden" }"#)
            .unwrap();
    assert_eq!(
        decl,
        MemberDecl::new("hidden", MemberType::Bool).with_getter("isHidden")
    );

    let decl: MemberDecl =
        serde_json::from_str(r#"{ "name": "bounds", "type": "@", "readonly": true }"#).unwrap();
    assert!(decl.readonly);
}

#[test]
fn decl_deserializes_enum_cases_in_order() {
    let decl: MemberDecl = serde_json::from_str(
        r#"{ "name": "textAlignment", "type": { "enum": { "right": 2, "left": 0 } } }"#,
    )
    .unwrap();
    let MemberType::Enum(mapping) = decl.ty else {
        panic!("expected enum member");
    };
    assert_eq!(mapping.names().collect::<Vec<_>>(), ["right", "left"]);
    assert_eq!(mapping.get("left"), Some(&Value::Number(0.into())));
}

#[test]
fn empty_or_structured_enums_are_rejected() {
    assert!(
        serde_json::from_str::<MemberDecl>(r#"{ "name": "a", "type": { "enum": {} } }"#).is_err()
    );
    assert!(
        serde_json::from_str::<MemberDecl>(r#"{ "name": "a", "type": { "enum": { "x": [1] } } }"#)
            .is_err()
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = serde_json::from_str::<MemberDecl>(r#"{ "name": "a", "type": "B", "kind": 1 }"#)
        .unwrap_err();
    assert!(err.to_string().contains("kind"));
}
