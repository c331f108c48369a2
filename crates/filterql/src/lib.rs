//! FilterQL: filter and sort strings compiled into typed predicates and
//! comparators over entities described at runtime.
//!
//! This is the public meta-crate. Downstream users depend on **filterql** only.
//!
//! It re-exports the stable public API from:
//!   - `filterql-core`   (values, schema descriptors, compilers, errors…)
//!   - `filterql-derive` (`Entity` and `EnumValue` derives)

pub use filterql_core::{
    coerce, config, error, model, obs, parse, path, predicate, query, schema, sort, statement,
    traits, value,
};

//
// Derives
//

pub use filterql_derive::{Entity, EnumValue};

//
// Prelude
//

pub mod prelude {
    pub use filterql_core::prelude::*;
    pub use filterql_derive::{Entity, EnumValue};
}
