use super::*;
use crate::{
    config::QueryConfig,
    error::FormatError,
    predicate::CompareOp,
    sort::{SortDirection, SortDirective},
    statement::{Connector, FilterStatement},
};

fn filter(input: &str) -> Result<Vec<FilterStatement>, FormatError> {
    parse_filter(input, &QueryConfig::default())
}

#[test]
fn statements_carry_preceding_connector() {
    let statements = filter("name eq 'Paul' or page gte 2 AND subtest.orgtags leneq 2")
        .expect("parses");

    assert_eq!(statements.len(), 3);
    assert_eq!(statements[0].connector, None);
    assert_eq!(statements[0].literal, "'Paul'");
    assert_eq!(statements[1].op, CompareOp::GreaterOrEqual);
    assert_eq!(statements[1].connector, Some(Connector::Or));
    assert_eq!(statements[2].path, "subtest.orgtags");
    assert_eq!(statements[2].op, CompareOp::LenEqual);
    assert_eq!(statements[2].connector, Some(Connector::And));
}

#[test]
fn literal_shapes() {
    let statements =
        filter("page in [1, 3] and points gt -2.5 and testing eq FALSE and name ct 'a b'")
            .expect("parses");

    let literals: Vec<&str> = statements.iter().map(|s| s.literal.as_str()).collect();
    assert_eq!(literals, ["[1, 3]", "-2.5", "FALSE", "'a b'"]);
}

#[test]
fn quoted_brackets_stay_inside_list_literal() {
    let statements = filter("name in ['a]b', 'c'] or name eq 'x]'").expect("parses");

    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].literal, "['a]b', 'c']");
    assert_eq!(statements[1].literal, "'x]'");
    assert_eq!(statements[1].connector, Some(Connector::Or));
}

#[test]
fn longer_operators_win() {
    let statements = filter("name ctic 'x' and page lte 3 and name lenlte 4").expect("parses");

    let ops: Vec<CompareOp> = statements.iter().map(|s| s.op).collect();
    assert_eq!(
        ops,
        [
            CompareOp::ContainsIgnoreCase,
            CompareOp::LessOrEqual,
            CompareOp::LenLessOrEqual
        ]
    );
}

#[test]
fn unknown_connector_is_named() {
    let err = filter("name eq 'Paul' flub page eq 2").unwrap_err();

    assert_eq!(
        err,
        FormatError::InvalidConnector {
            token: "flub".into()
        }
    );
    assert_eq!(err.to_string(), "flub is an invalid connector");
}

#[test]
fn unmatched_input() {
    assert_eq!(filter(""), Err(FormatError::NoStatements));
    assert_eq!(filter("name equals 'Paul'"), Err(FormatError::NoStatements));
    assert_eq!(
        filter("page eq 1 and ???"),
        Err(FormatError::UnexpectedText {
            text: "???".into(),
            offset: 14,
        })
    );
    assert!(matches!(
        filter("junk page eq 1"),
        Err(FormatError::UnexpectedText { offset: 0, .. })
    ));
}

#[test]
fn trailing_connector_dangles() {
    assert_eq!(
        filter("page eq 1 or"),
        Err(FormatError::DanglingConnector { token: "or".into() })
    );
}

#[test]
fn empty_literals_are_rejected() {
    assert_eq!(
        filter("name eq ''"),
        Err(FormatError::EmptyLiteral {
            path: "name".into()
        })
    );
    assert!(matches!(
        filter("page in [ ]"),
        Err(FormatError::EmptyLiteral { .. })
    ));
}

#[test]
fn statement_limit() {
    let config = QueryConfig {
        max_statements: 2,
        ..QueryConfig::default()
    };

    assert_eq!(
        parse_filter("page eq 1 or page eq 2 or page eq 3", &config),
        Err(FormatError::TooManyStatements { count: 3, max: 2 })
    );
}

#[test]
fn sort_directives() {
    assert_eq!(
        parse_sort("lastname desc, name, subtest.name NATASC").expect("parses"),
        [
            SortDirective::new("lastname", SortDirection::Descending),
            SortDirective::new("name", SortDirection::Ascending),
            SortDirective::new("subtest.name", SortDirection::NaturalAscending),
        ]
    );
}

#[test]
fn sort_errors() {
    assert_eq!(
        parse_sort("page sideways"),
        Err(FormatError::InvalidDirection {
            token: "sideways".into()
        })
    );
    assert!(matches!(parse_sort("  "), Err(FormatError::InvalidSort { .. })));
    assert!(matches!(
        parse_sort("page asc,"),
        Err(FormatError::InvalidSort { .. })
    ));
    assert!(matches!(
        parse_sort("page asc extra"),
        Err(FormatError::InvalidSort { .. })
    ));
}
