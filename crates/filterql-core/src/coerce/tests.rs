use super::*;
use crate::{test_fixtures::TestStatus, traits::FieldValue};
use time::macros::{date, datetime};

fn scalar(literal: &str, scalar: ScalarType) -> Result<Value, ValueError> {
    coerce_scalar(literal, scalar)
}

#[test]
fn quoted_text_is_stripped_and_unescaped() {
    assert_eq!(
        scalar("'Paul%20Mead'", ScalarType::Text),
        Ok(Value::Text("Paul Mead".into()))
    );
    assert_eq!(
        scalar("'[a-b].%25'", ScalarType::Text),
        Ok(Value::Text("[a-b].%".into()))
    );
}

#[test]
fn bare_literals_pass_through() {
    assert_eq!(
        scalar("Paul%20", ScalarType::Text),
        Ok(Value::Text("Paul%20".into()))
    );
    assert_eq!(unescape("abc").map(|s| s.into_owned()), Ok("abc".into()));
}

#[test]
fn numbers_use_their_parsers() {
    assert_eq!(scalar("-12", ScalarType::Int), Ok(Value::Int(-12)));
    assert_eq!(scalar("'12'", ScalarType::Uint), Ok(Value::Uint(12)));
    assert_eq!(scalar("2.5", ScalarType::Float), Ok(Value::Float(2.5)));
    assert_eq!(
        scalar("2.25", ScalarType::Decimal),
        Ok(Value::Decimal(Decimal::new(225, 2)))
    );
    assert!(matches!(
        scalar("-1", ScalarType::Uint),
        Err(ValueError::Invalid { .. })
    ));
    assert!(matches!(
        scalar("1.5", ScalarType::Int),
        Err(ValueError::Invalid { .. })
    ));
}

#[test]
fn f32_literals_widen_like_f32_fields() {
    let field = 0.1f32.to_field();

    assert_eq!(
        scalar("0.1", ScalarType::Float32).ok().as_ref(),
        field.as_value()
    );
    assert_ne!(
        scalar("0.1", ScalarType::Float).ok().as_ref(),
        field.as_value()
    );
}

#[test]
fn booleans_ignore_case() {
    assert_eq!(scalar("true", ScalarType::Bool), Ok(Value::Bool(true)));
    assert_eq!(scalar("False", ScalarType::Bool), Ok(Value::Bool(false)));
    assert!(scalar("yes", ScalarType::Bool).is_err());
}

#[test]
fn dates_and_timestamps() {
    assert_eq!(
        scalar("'2024-02-20'", ScalarType::Date),
        Ok(Value::Date(date!(2024 - 02 - 20)))
    );
    assert_eq!(
        scalar("'2024-02-20T10:30:00Z'", ScalarType::Timestamp),
        Ok(Value::Timestamp(datetime!(2024-02-20 10:30:00 UTC)))
    );
    assert_eq!(
        scalar("'2024-02-20'", ScalarType::Timestamp),
        Ok(Value::Timestamp(datetime!(2024-02-20 0:00 UTC)))
    );
    assert!(scalar("'20/02/2024'", ScalarType::Date).is_err());
}

#[test]
fn uuids_parse() {
    assert_eq!(
        scalar("'00000000-0000-0000-0000-000000000002'", ScalarType::Uuid),
        Ok(Value::Uuid(Uuid::from_u128(2)))
    );
    assert!(scalar("'not-a-uuid'", ScalarType::Uuid).is_err());
}

#[test]
fn enums_accept_name_or_ordinal() {
    let kind = TestStatus::kind();
    let Some(status) = kind.scalar() else {
        panic!("enum scalar expected");
    };

    assert_eq!(
        scalar("'Yes'", status),
        Ok(Value::Enum(ValueEnum::new(1, "Yes")))
    );
    assert_eq!(scalar("2", status), Ok(Value::Enum(ValueEnum::new(2, "No"))));
    assert!(matches!(
        scalar("'yes'", status),
        Err(ValueError::UnknownEnumMember { .. })
    ));
    assert!(matches!(
        scalar("7", status),
        Err(ValueError::UnknownEnumMember { .. })
    ));
}

#[test]
fn lists_coerce_each_element() {
    let config = QueryConfig::default();
    let kind = FieldKind::Scalar(ScalarType::Int);

    assert_eq!(
        coerce("[1, 3,1]", &kind, &config),
        Ok(Value::List(vec![Value::Int(1), Value::Int(3), Value::Int(1)]))
    );

    let tags = FieldKind::List(Box::new(FieldKind::Scalar(ScalarType::Text)));
    assert_eq!(
        coerce("['a,b', 'c']", &tags, &config),
        Ok(Value::List(vec![
            Value::Text("a,b".into()),
            Value::Text("c".into())
        ]))
    );
}

#[test]
fn list_limits_and_shape() {
    let config = QueryConfig {
        max_list_len: 2,
        ..QueryConfig::default()
    };
    let kind = FieldKind::Scalar(ScalarType::Int);

    assert_eq!(
        coerce("[1,2,3]", &kind, &config),
        Err(ValueError::ListTooLong { len: 3, max: 2 })
    );
    assert!(matches!(
        coerce_list_for("1", &kind, &config),
        Err(ValueError::ExpectedList { .. })
    ));
    assert!(matches!(
        coerce("[1,,2]", &kind, &config),
        Err(ValueError::Invalid { .. })
    ));
    assert_eq!(coerce_list_for("[]", &kind, &config), Ok(Vec::new()));
}

#[test]
fn invalid_utf8_escape_is_rejected() {
    assert!(matches!(
        scalar("'%FF'", ScalarType::Text),
        Err(ValueError::InvalidEscape { .. })
    ));
}

#[test]
fn count_literals() {
    assert_eq!(coerce_count("3"), Ok(3));
    assert_eq!(coerce_count("'3'"), Ok(3));
    assert!(coerce_count("three").is_err());
}

#[test]
fn split_list_respects_quotes() {
    assert_eq!(split_list("['a, b' , c]"), vec!["'a, b'", "c"]);
    assert!(split_list("[ ]").is_empty());
}
