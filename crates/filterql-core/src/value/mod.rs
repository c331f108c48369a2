mod compare;


use crate::traits::FieldValues;
use rust_decimal::Decimal;
use std::fmt;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

// re-exports
pub use compare::{cmp_numeric, strict_order_cmp};

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextMode {
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// Value
///
/// Owned scalar runtime value. Literals are coerced into this shape and
/// entity fields are read out as it.
///
/// Null → the property is an `Option::None`.
///

#[remain::sorted]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Date(Date),
    Decimal(Decimal),
    Enum(ValueEnum),
    Float(f64),
    Int(i64),
    /// Ordered list of values; only produced by bracketed literals.
    List(Vec<Self>),
    Null,
    Text(String),
    Timestamp(OffsetDateTime),
    Uint(u64),
    Uuid(Uuid),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Decimal(_) | Self::Float(_) | Self::Int(_) | Self::Uint(_)
        )
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Substring test; `None` when either side is not text.
    #[must_use]
    pub fn text_contains(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        let (haystack, needle) = (self.as_text()?, needle.as_text()?);

        Some(match mode {
            TextMode::Cs => haystack.contains(needle),
            TextMode::Ci => casefold(haystack).contains(&casefold(needle)),
        })
    }

    /// Character length for text, element count for lists.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Text(text) => Some(text.chars().count()),
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Enum(v) => write!(f, "{}", v.name),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Uuid(v) => write!(f, "{v}"),
        }
    }
}

///
/// ValueEnum
///
/// Enum member carried as ordinal plus name.
/// Equality and ordering use the ordinal.
///

#[derive(Clone, Copy, Debug)]
pub struct ValueEnum {
    pub ordinal: i64,
    pub name: &'static str,
}

impl ValueEnum {
    #[must_use]
    pub const fn new(ordinal: i64, name: &'static str) -> Self {
        Self { ordinal, name }
    }
}

impl PartialEq for ValueEnum {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal
    }
}

impl PartialOrd for ValueEnum {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.ordinal.cmp(&other.ordinal))
    }
}

///
/// Field
///
/// Borrowed runtime view of one property of an entity.
/// Records stay borrowed so nested paths never clone whole entities.
///

#[derive(Clone)]
pub enum Field<'a> {
    Null,
    Value(Value),
    Record(&'a dyn FieldValues),
    List(Vec<Self>),
}

impl Field<'_> {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Value(Value::Null))
    }

    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Length of a text value or element count of a list.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::List(items) => Some(items.len()),
            Self::Value(value) => value.len(),
            Self::Null | Self::Record(_) => None,
        }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

pub(crate) fn casefold(input: &str) -> String {
    if input.is_ascii() {
        return input.to_ascii_lowercase();
    }

    input.to_lowercase()
}
