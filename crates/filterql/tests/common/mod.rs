#![allow(dead_code)]

use filterql::{Entity, EnumValue};
use rust_decimal::Decimal;
use time::{OffsetDateTime, macros::datetime};
use uuid::Uuid;

///
/// Rank
///

#[derive(Clone, Copy, Debug, EnumValue, Eq, PartialEq)]
pub enum Rank {
    Junior = 1,
    Senior = 5,
    Lead,
}

///
/// Division
///

#[derive(Clone, Debug, Entity)]
pub struct Division {
    pub name: String,
    #[filterql(rename = "orgtags")]
    pub org_tags: Vec<String>,
}

///
/// Employee
///

#[derive(Clone, Debug, Entity)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    #[filterql(rename = "lastname")]
    pub last_name: String,
    pub page: u32,
    #[filterql(rename = "subtest")]
    pub sub_test: Option<Division>,
    pub divisions: Vec<Division>,
    pub rank: Rank,
    pub hired: OffsetDateTime,
    pub salary: Decimal,
    pub ratio: f32,
    pub tags: Option<Vec<String>>,
    pub manager: Option<Box<Employee>>,
}

fn division(name: &str, tags: &[&str]) -> Division {
    Division {
        name: name.to_string(),
        org_tags: tags.iter().map(ToString::to_string).collect(),
    }
}

/// Paul, George and Brian; each managed by the one before.
pub fn employees() -> Vec<Employee> {
    let paul = Employee {
        id: Uuid::from_u128(1),
        name: "Paul".into(),
        last_name: "Mead".into(),
        page: 1,
        sub_test: Some(division("North", &["Tag1", "Tag2"])),
        divisions: vec![division("North", &["A", "B"])],
        rank: Rank::Junior,
        hired: datetime!(2023-03-01 9:00 UTC),
        salary: Decimal::new(10050, 2),
        ratio: 0.1,
        tags: None,
        manager: None,
    };

    let george = Employee {
        id: Uuid::from_u128(2),
        name: "George".into(),
        last_name: "Castanza".into(),
        page: 2,
        sub_test: Some(division("South", &["Tag1", "Tag3"])),
        divisions: vec![
            division("East", &["A", "B"]),
            division("West", &["B", "C"]),
        ],
        rank: Rank::Senior,
        hired: datetime!(2024-06-15 12:00 UTC),
        salary: Decimal::from(80),
        ratio: 0.25,
        tags: Some(Vec::new()),
        manager: Some(Box::new(paul.clone())),
    };

    let brian = Employee {
        id: Uuid::from_u128(3),
        name: "Brian".into(),
        last_name: "Collins".into(),
        page: 3,
        sub_test: None,
        divisions: Vec::new(),
        rank: Rank::Lead,
        hired: datetime!(2025-01-10 8:30 UTC),
        salary: Decimal::from(120),
        ratio: 0.7,
        tags: Some(vec!["x".into(), "y".into()]),
        manager: Some(Box::new(george.clone())),
    };

    vec![paul, george, brian]
}

pub fn names(items: &[Employee]) -> Vec<&str> {
    items.iter().map(|e| e.name.as_str()).collect()
}
