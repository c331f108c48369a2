use std::fmt;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Public error surface for filter/sort compilation.
/// Every variant is detected while compiling; compiled filters and
/// comparators never fail at evaluation time.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedOperatorError),

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl QueryError {
    /// Stable classification for callers that only need the error kind.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Format(_) => ErrorClass::Format,
            Self::Schema(_) => ErrorClass::Schema,
            Self::Sequence(_) => ErrorClass::Sequence,
            Self::Unsupported(_) => ErrorClass::Unsupported,
            Self::Value(_) => ErrorClass::Value,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    Format,
    Schema,
    Sequence,
    Unsupported,
    Value,
}

impl ErrorClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Schema => "schema",
            Self::Sequence => "sequence",
            Self::Unsupported => "unsupported",
            Self::Value => "value",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// FormatError
///
/// Malformed filter or sort text.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FormatError {
    #[error("the filter string provided does not meet the expected format")]
    NoStatements,

    #[error("unexpected text '{text}' at offset {offset}")]
    UnexpectedText { text: String, offset: usize },

    #[error("{token} is an invalid connector")]
    InvalidConnector { token: String },

    #[error("{token} is not a supported comparison")]
    InvalidOperator { token: String },

    #[error("connector '{token}' is not followed by a statement")]
    DanglingConnector { token: String },

    #[error("literal for '{path}' is empty")]
    EmptyLiteral { path: String },

    #[error("filter has {count} statements, the limit is {max}")]
    TooManyStatements { count: usize, max: usize },

    #[error("the sort string '{input}' does not meet the expected format")]
    InvalidSort { input: String },

    #[error("{token} is not a supported sort direction")]
    InvalidDirection { token: String },

    #[error("natural sorting must be on a text property, '{path}' is {found}")]
    NaturalSortOnNonText { path: String, found: String },
}

///
/// SchemaError
///
/// Unknown or unreachable property names.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("'{segment}' in '{path}' is not a valid property on type {entity}")]
    UnknownProperty {
        segment: String,
        path: String,
        entity: String,
    },

    #[error("'{segment}' in '{path}' cannot be resolved: '{parent}' is {found}, not a record")]
    NotARecord {
        segment: String,
        path: String,
        parent: String,
        found: String,
    },

    #[error("property path is empty")]
    EmptyPath,

    #[error("property path '{path}' has {depth} segments, the limit is {max}")]
    PathTooDeep {
        path: String,
        depth: usize,
        max: usize,
    },
}

///
/// ValueError
///
/// A literal that does not coerce to the type it is compared against.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValueError {
    #[error("'{literal}' is not a valid {expected}")]
    Invalid { literal: String, expected: String },

    #[error("'{literal}' is not a member of enum {enum_name}")]
    UnknownEnumMember { literal: String, enum_name: String },

    #[error("'{literal}' is not a bracketed list")]
    ExpectedList { literal: String },

    #[error("list literal has {len} elements, the limit is {max}")]
    ListTooLong { len: usize, max: usize },

    #[error("'{literal}' contains an invalid percent-escape")]
    InvalidEscape { literal: String },
}

///
/// SequenceError
///
/// Misuse of the fluent statement builder.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SequenceError {
    #[error("a connector cannot be added before the first statement")]
    ConnectorBeforeStatement,

    #[error("filter connector must be assigned before adding statement '{path}'")]
    MissingConnector { path: String },

    #[error("connector {connector} is not followed by a statement")]
    DanglingConnector { connector: String },
}

///
/// UnsupportedOperatorError
///
/// Operator and property type combinations that cannot be compiled.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum UnsupportedOperatorError {
    #[error("operator {op} is not supported on '{path}' of type {found}")]
    OperatorOnType {
        op: String,
        path: String,
        found: String,
    },

    #[error("operator in requires a bracketed list literal for '{path}'")]
    InRequiresList { path: String },

    #[error("cannot sort on a multi-valued property '{path}'")]
    SortOnCollection { path: String },

    #[error("cannot sort on '{path}' of type {found}")]
    SortOnRecord { path: String, found: String },
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid query config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("query config field '{field}' must be greater than zero")]
    ZeroLimit { field: &'static str },
}
