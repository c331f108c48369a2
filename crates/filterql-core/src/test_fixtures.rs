use filterql_derive::{Entity, EnumValue};
use rust_decimal::Decimal;
use time::{Date, macros::date};
use uuid::Uuid;

///
/// TestStatus
///

#[derive(Clone, Copy, Debug, EnumValue, Eq, PartialEq)]
pub enum TestStatus {
    Maybe,
    Yes,
    No,
}

///
/// AnotherModel
///

#[derive(Clone, Debug, Entity)]
pub struct AnotherModel {
    pub value: String,
    pub values: Vec<String>,
}

///
/// SubTestModel
///

#[derive(Clone, Debug, Entity)]
pub struct SubTestModel {
    pub name: String,
    pub index: i32,
    #[filterql(rename = "orgtags")]
    pub org_tags: Vec<String>,
    pub model: Option<AnotherModel>,
    pub models: Vec<AnotherModel>,
}

///
/// TestModel
///

#[derive(Clone, Debug, Entity)]
pub struct TestModel {
    pub id: Uuid,
    pub name: String,
    #[filterql(rename = "lastname")]
    pub last_name: String,
    pub page: i32,
    #[filterql(rename = "testitems")]
    pub test_items: Vec<String>,
    #[filterql(rename = "subtest")]
    pub sub_test: Option<SubTestModel>,
    #[filterql(rename = "teststrings")]
    pub test_strings: Vec<String>,
    #[filterql(rename = "testmodels")]
    pub test_models: Vec<SubTestModel>,
    pub points: Decimal,
    pub testing: bool,
    #[filterql(rename = "testingnullable")]
    pub testing_nullable: Option<i32>,
    pub status: TestStatus,
    #[filterql(rename = "applydate")]
    pub apply_date: Option<Date>,
    #[filterql(skip)]
    pub notes: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn sub_test(index: i32, tags: &[&str]) -> SubTestModel {
    SubTestModel {
        name: format!("Sub Test {index}"),
        index,
        org_tags: strings(tags),
        model: None,
        models: Vec::new(),
    }
}

/// Paul Mead, George Castanza, Brian Collins.
pub fn rows() -> Vec<TestModel> {
    vec![
        TestModel {
            id: Uuid::from_u128(1),
            name: "Paul".to_string(),
            last_name: "Mead".to_string(),
            page: 1,
            test_items: strings(&["Test", "Test1", "Test2"]),
            sub_test: Some(SubTestModel {
                model: Some(AnotherModel {
                    value: "v1".to_string(),
                    values: strings(&["x", "y"]),
                }),
                ..sub_test(1, &["OrgTag1", "OrgTag12"])
            }),
            test_strings: strings(&["Org1", "OrgTag12"]),
            test_models: vec![sub_test(11, &["A", "B"])],
            points: Decimal::new(150, 2),
            testing: true,
            testing_nullable: Some(1),
            status: TestStatus::Maybe,
            apply_date: Some(date!(2024 - 01 - 15)),
            notes: "first".to_string(),
        },
        TestModel {
            id: Uuid::from_u128(2),
            name: "George".to_string(),
            last_name: "Castanza".to_string(),
            page: 2,
            test_items: strings(&["Tes12t", "Test13", "Test23"]),
            sub_test: Some(sub_test(2, &["OrgTag1", "OrgTag22"])),
            test_strings: strings(&["Org2"]),
            test_models: vec![sub_test(21, &["A", "B"]), sub_test(22, &["B", "C"])],
            points: Decimal::new(225, 2),
            testing: false,
            testing_nullable: None,
            status: TestStatus::Yes,
            apply_date: Some(date!(2024 - 02 - 20)),
            notes: "second".to_string(),
        },
        TestModel {
            id: Uuid::from_u128(3),
            name: "Brian".to_string(),
            last_name: "Collins".to_string(),
            page: 3,
            test_items: strings(&["Test31", "Test32", "Test33"]),
            sub_test: Some(sub_test(3, &["OrgTag1", "OrgTag32", "OrgTag33"])),
            test_strings: Vec::new(),
            test_models: Vec::new(),
            points: Decimal::new(300, 2),
            testing: true,
            testing_nullable: Some(3),
            status: TestStatus::No,
            apply_date: None,
            notes: "third".to_string(),
        },
    ]
}

/// A row with no sub test at all.
pub fn orphan() -> TestModel {
    TestModel {
        id: Uuid::from_u128(4),
        name: "Cosmo".to_string(),
        last_name: "Kramer".to_string(),
        page: 4,
        test_items: Vec::new(),
        sub_test: None,
        test_strings: Vec::new(),
        test_models: Vec::new(),
        points: Decimal::ZERO,
        testing: false,
        testing_nullable: None,
        status: TestStatus::Maybe,
        apply_date: None,
        notes: String::new(),
    }
}

/// `rows()` plus `orphan()`.
pub fn all_rows() -> Vec<TestModel> {
    let mut rows = rows();
    rows.push(orphan());
    rows
}
