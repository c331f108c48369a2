mod common;

use common::{Employee, employees, names};
use filterql::{
    config::{NullOrdering, QueryConfig},
    error::{ConfigError, ErrorClass, FormatError, QueryError},
    obs::{metrics_report, metrics_reset_all},
    prelude::*,
};

#[test]
fn apply_filters_then_sorts() {
    let query = QueryString::<Employee>::new();

    let items = query
        .apply(Some("page gt 1"), Some("lastname desc"), employees())
        .expect("query applies");

    assert_eq!(names(&items), ["Brian", "George"]);
}

#[test]
fn blank_inputs_are_skipped() {
    let query = QueryString::<Employee>::new();

    let items = query
        .apply(None, Some("   "), employees())
        .expect("nothing to apply");
    assert_eq!(names(&items), ["Paul", "George", "Brian"]);

    let items = query
        .apply(Some(""), Some("page desc"), employees())
        .expect("sort only");
    assert_eq!(names(&items), ["Brian", "George", "Paul"]);
}

#[test]
fn apply_rejects_before_touching_items() {
    let query = QueryString::<Employee>::new();

    let err = query
        .apply(Some("page gt 1"), Some("page sideways"), employees())
        .expect_err("bad sort");
    assert!(matches!(
        err,
        QueryError::Format(FormatError::InvalidDirection { .. })
    ));
}

#[test]
fn config_from_toml() {
    let config = QueryConfig::from_toml_str(
        r#"
        max_statements = 1
        null_ordering = "last"
        "#,
    )
    .expect("config parses");

    assert_eq!(config.max_statements, 1);
    assert_eq!(config.max_path_depth, QueryConfig::DEFAULT_MAX_PATH_DEPTH);
    assert_eq!(config.null_ordering, NullOrdering::Last);

    let query = QueryString::<Employee>::with_config(config);

    assert!(matches!(
        query.filter("page eq 1 or page eq 2"),
        Err(QueryError::Format(FormatError::TooManyStatements {
            count: 2,
            max: 1
        }))
    ));

    let items = query
        .apply(None, Some("subtest.name"), employees())
        .expect("sorts");
    assert_eq!(names(&items), ["Paul", "George", "Brian"]);
}

#[test]
fn config_limits_paths_and_lists() {
    let config = QueryConfig::from_toml_str("max_path_depth = 2\nmax_list_len = 2")
        .expect("config parses");
    let query = QueryString::<Employee>::with_config(config);

    assert_eq!(
        query
            .filter("manager.manager.name eq 'Paul'")
            .expect_err("too deep")
            .class(),
        ErrorClass::Schema
    );
    assert_eq!(
        query
            .filter("page in [1,2,3]")
            .expect_err("too long")
            .class(),
        ErrorClass::Value
    );
    assert!(query.filter("page in [1,2]").is_ok());
}

#[test]
fn invalid_config() {
    assert!(matches!(
        QueryConfig::from_toml_str("max_statements = 0"),
        Err(ConfigError::ZeroLimit {
            field: "max_statements"
        })
    ));
    assert!(matches!(
        QueryConfig::from_toml_str("max_statments = 3"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn global_counters_see_compilations() {
    metrics_reset_all();

    let query = QueryString::<Employee>::new();
    query.filter("page eq 1").expect("compiles");
    let _ = query.filter("nosuch eq 1");

    let report = metrics_report();
    assert!(report.ops.filters_compiled >= 1);
    assert!(report.ops.rejected_schema >= 1);
}
