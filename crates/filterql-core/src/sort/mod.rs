//! Module: sort
//! Responsibility: sort directives and the comparators compiled from them.
//! Does not own: sort string parsing.
//! Boundary: resolves paths through `path`, never through `predicate`.

mod comparator;
mod natural;


use crate::error::FormatError;
use std::{fmt, str::FromStr};

// re-exports
pub use comparator::Comparator;
pub use natural::natural_cmp;

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
    NaturalAscending,
    NaturalDescending,
}

impl SortDirection {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
            Self::NaturalAscending => "natasc",
            Self::NaturalDescending => "natdesc",
        }
    }

    #[must_use]
    pub const fn is_natural(self) -> bool {
        matches!(self, Self::NaturalAscending | Self::NaturalDescending)
    }

    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Descending | Self::NaturalDescending)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for SortDirection {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        [
            Self::Ascending,
            Self::Descending,
            Self::NaturalAscending,
            Self::NaturalDescending,
        ]
        .into_iter()
        .find(|direction| direction.keyword().eq_ignore_ascii_case(token))
        .ok_or_else(|| FormatError::InvalidDirection {
            token: token.to_string(),
        })
    }
}

///
/// SortDirective
///
/// One `<path> <direction>` pair; later directives break ties of earlier ones.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortDirective {
    pub path: String,
    pub direction: SortDirection,
}

impl SortDirective {
    #[must_use]
    pub fn new(path: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            path: path.into(),
            direction,
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.direction)
    }
}
