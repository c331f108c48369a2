//! Module: statement
//! Responsibility: fluent accumulation of filter statements and their
//! left-to-right fold into one compiled `Filter`.
//! Does not own: grammar parsing or per-statement compilation.
//! Boundary: the grammar parser drives this; callers may drive it directly.

mod builder;
mod filter;


use crate::{error::FormatError, predicate::CompareOp};
use std::{fmt, str::FromStr};

// re-exports
pub use builder::FilterBuilder;
pub use filter::Filter;

///
/// Connector
///
/// Logical joiner recorded on every statement after the first.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Connector {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        if token.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if token.eq_ignore_ascii_case("or") {
            Ok(Self::Or)
        } else {
            Err(FormatError::InvalidConnector {
                token: token.to_string(),
            })
        }
    }
}

///
/// FilterStatement
///
/// One uncompiled `<path> <op> <literal>` triple plus the connector that
/// joins it to the statements before it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterStatement {
    pub path: String,
    pub literal: String,
    pub op: CompareOp,
    pub connector: Option<Connector>,
}

impl fmt::Display for FilterStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(connector) = self.connector {
            write!(f, "{connector} ")?;
        }

        write!(f, "{} {} {}", self.path, self.op, self.literal)
    }
}
