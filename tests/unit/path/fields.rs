use super::*;

#[derive(Default)]
struct Toggle {
    hidden: bool,
    taps: i64,
}

fn table() -> FieldTable<Toggle> {
    FieldTable::<Toggle>::new()
        .field(
            "hidden",
            |t| Value::Bool(t.hidden),
            |t, v| match v {
                Value::Bool(b) => {
                    t.hidden = b;
                    Ok(())
                }
                other => Err(other),
            },
        )
        .alias("isHidden", "hidden")
        .read_only("taps", |t| Value::Int(t.taps))
}

#[test]
fn alias_reads_and_writes_target_field() {
    let table = table();
    let mut toggle = Toggle::default();
    table.set(&mut toggle, "isHidden", Value::Bool(true)).unwrap();
    assert!(toggle.hidden);
    assert_eq!(table.get(&toggle, "isHidden"), Some(Value::Bool(true)));
}

#[test]
fn read_only_and_missing_fields_refuse_writes() {
    let table = table();
    let mut toggle = Toggle::default();
    assert_eq!(
        table.set(&mut toggle, "taps", Value::Int(3)),
        Err(FieldError::ReadOnly)
    );
    assert_eq!(
        table.set(&mut toggle, "visible", Value::Bool(true)),
        Err(FieldError::Missing)
    );
    assert_eq!(table.get(&toggle, "visible"), None);
}

#[test]
fn setter_rejection_hands_the_value_back() {
    let table = table();
    let mut toggle = Toggle::default();
    let err = table.set(&mut toggle, "hidden", Value::Int(1)).unwrap_err();
    assert_eq!(err, FieldError::Rejected(Value::Int(1)));
    assert_eq!(err.to_string(), "field rejected a value of type `Int`");
    assert!(!toggle.hidden);
}

#[test]
fn names_exclude_aliases() {
    let names: Vec<_> = table().names().collect();
    assert_eq!(names, ["hidden", "taps"]);
}
