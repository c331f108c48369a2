use crate::{
    error::FormatError,
    value::{TextMode, Value},
};
use std::{fmt, str::FromStr};

///
/// CompareOp
///
/// Every comparison the filter language knows.
/// The `Len*` family compares a length or count instead of the value.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    Contains,
    ContainsIgnoreCase,
    In,
    LenEqual,
    LenNotEqual,
    LenGreaterThan,
    LenGreaterOrEqual,
    LenLessThan,
    LenLessOrEqual,
}

impl CompareOp {
    pub const ALL: [Self; 15] = [
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessOrEqual,
        Self::GreaterThan,
        Self::GreaterOrEqual,
        Self::Contains,
        Self::ContainsIgnoreCase,
        Self::In,
        Self::LenEqual,
        Self::LenNotEqual,
        Self::LenGreaterThan,
        Self::LenGreaterOrEqual,
        Self::LenLessThan,
        Self::LenLessOrEqual,
    ];

    /// Grammar token for this operator.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::LessThan => "lt",
            Self::LessOrEqual => "lte",
            Self::GreaterThan => "gt",
            Self::GreaterOrEqual => "gte",
            Self::Contains => "ct",
            Self::ContainsIgnoreCase => "ctic",
            Self::In => "in",
            Self::LenEqual => "leneq",
            Self::LenNotEqual => "lenne",
            Self::LenGreaterThan => "lengt",
            Self::LenGreaterOrEqual => "lengte",
            Self::LenLessThan => "lenlt",
            Self::LenLessOrEqual => "lenlte",
        }
    }

    #[must_use]
    pub const fn is_length(self) -> bool {
        matches!(
            self,
            Self::LenEqual
                | Self::LenNotEqual
                | Self::LenGreaterThan
                | Self::LenGreaterOrEqual
                | Self::LenLessThan
                | Self::LenLessOrEqual
        )
    }

    /// Operators for which an absent value counts as a match.
    #[must_use]
    pub const fn admits_absent(self) -> bool {
        matches!(
            self,
            Self::NotEqual | Self::LenNotEqual | Self::LenLessThan | Self::LenLessOrEqual
        )
    }

    /// Relational operator a length comparison reduces to.
    /// Non-length operators map to themselves.
    #[must_use]
    pub const fn relational(self) -> Self {
        match self {
            Self::LenEqual => Self::Equal,
            Self::LenNotEqual => Self::NotEqual,
            Self::LenGreaterThan => Self::GreaterThan,
            Self::LenGreaterOrEqual => Self::GreaterOrEqual,
            Self::LenLessThan => Self::LessThan,
            Self::LenLessOrEqual => Self::LessOrEqual,
            other => other,
        }
    }

    /// Apply a relational operator to an ordering result.
    /// Non-relational operators never match.
    #[must_use]
    pub const fn holds(self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};

        match self {
            Self::Equal => matches!(ordering, Equal),
            Self::NotEqual => !matches!(ordering, Equal),
            Self::LessThan => matches!(ordering, Less),
            Self::LessOrEqual => matches!(ordering, Less | Equal),
            Self::GreaterThan => matches!(ordering, Greater),
            Self::GreaterOrEqual => matches!(ordering, Greater | Equal),
            _ => false,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for CompareOp {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        Self::ALL
            .into_iter()
            .find(|op| op.keyword().eq_ignore_ascii_case(token))
            .ok_or_else(|| FormatError::InvalidOperator {
                token: token.to_string(),
            })
    }
}

///
/// Expr
///
/// Compiled predicate tree. Every node is evaluated against a *focus*:
/// the root entity, a nested record, a collection, or a leaf value.
/// `Member` moves the focus one property down.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Member {
        name: &'static str,
        then: Box<Self>,
    },
    IsNull,
    NotNull,
    Compare {
        op: CompareOp,
        value: Value,
    },
    TextContains {
        needle: Value,
        mode: TextMode,
    },
    InList(Vec<Value>),

    /// At least one element of the focused collection satisfies the inner node.
    Any(Box<Self>),

    /// Length of focused text, or element count of a focused collection.
    Length {
        op: CompareOp,
        count: i64,
    },

    /// Count of distinct values reachable from each element of the focused
    /// collection through `steps`, with nested collections flattened.
    DistinctCount {
        steps: Vec<&'static str>,
        op: CompareOp,
        count: i64,
    },

    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
}

impl Expr {
    #[must_use]
    pub fn member(name: &'static str, then: Self) -> Self {
        Self::Member {
            name,
            then: Box::new(then),
        }
    }

    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn any(inner: Self) -> Self {
        Self::Any(Box::new(inner))
    }

    /// `present AND inner`, or `absent OR inner` when absence matches.
    #[must_use]
    pub fn guarded(inner: Self, admits_absent: bool) -> Self {
        if admits_absent {
            Self::or(Self::IsNull, inner)
        } else {
            Self::and(Self::NotNull, inner)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member { name, then } => write!(f, "{name}.{then}"),
            Self::IsNull => f.write_str("is_null"),
            Self::NotNull => f.write_str("not_null"),
            Self::Compare { op, value } => write!(f, "{op} {value}"),
            Self::TextContains { needle, mode } => match mode {
                TextMode::Cs => write!(f, "ct {needle}"),
                TextMode::Ci => write!(f, "ctic {needle}"),
            },
            Self::InList(values) => write!(f, "in {}", Value::List(values.clone())),
            Self::Any(inner) => write!(f, "any({inner})"),
            Self::Length { op, count } => write!(f, "len {op} {count}"),
            Self::DistinctCount { steps, op, count } => {
                write!(f, "distinct({}) {op} {count}", steps.join("."))
            }
            Self::And(left, right) => write!(f, "({left} and {right})"),
            Self::Or(left, right) => write!(f, "({left} or {right})"),
        }
    }
}
