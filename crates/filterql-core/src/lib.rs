//! Core runtime for FilterQL: entity traits, values, schema descriptors, the
//! filter/sort compilers, and the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

extern crate self as filterql;

// public exports are one module level down
pub mod coerce;
pub mod config;
pub mod error;
pub mod model;
pub mod obs;
pub mod parse;
pub mod path;
pub mod predicate;
pub mod query;
pub mod schema;
pub mod sort;
pub mod statement;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Domain vocabulary plus the three compiled artifacts.
/// Errors and the observability surface stay one module down.
///

pub mod prelude {
    pub use crate::{
        config::{NullOrdering, QueryConfig},
        predicate::CompareOp,
        query::QueryString,
        sort::{Comparator, SortDirection},
        statement::{Filter, FilterBuilder},
        traits::{EntityKind, FieldValue, FieldValues},
        value::Value,
    };
}
