//! Module: coerce
//! Responsibility: textual literal -> typed `Value` for a declared kind.
//! Does not own: deciding which kind a literal is compared against.
//! Boundary: called by the predicate compiler once per statement.

#[cfg(test)]
mod tests;

use crate::{
    config::QueryConfig,
    error::ValueError,
    model::{FieldKind, ScalarType},
    value::{Value, ValueEnum},
};
use rust_decimal::Decimal;
use std::{borrow::Cow, str::FromStr};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};
use uuid::Uuid;

/// Coerce a literal against a declared kind.
///
/// Bracketed literals become `Value::List` with each element coerced
/// against the element type (or the kind itself for scalar targets).
pub fn coerce(literal: &str, kind: &FieldKind, config: &QueryConfig) -> Result<Value, ValueError> {
    let scalar = target_scalar(kind).ok_or_else(|| ValueError::Invalid {
        literal: literal.to_string(),
        expected: kind.to_string(),
    })?;

    if is_bracketed(literal) {
        return coerce_list(literal, scalar, config);
    }

    coerce_scalar(literal, scalar)
}

/// Coerce a bracketed literal, failing when it is not a list.
pub fn coerce_list_for(
    literal: &str,
    kind: &FieldKind,
    config: &QueryConfig,
) -> Result<Vec<Value>, ValueError> {
    if !is_bracketed(literal) {
        return Err(ValueError::ExpectedList {
            literal: literal.to_string(),
        });
    }

    match coerce(literal, kind, config)? {
        Value::List(items) => Ok(items),
        other => Ok(vec![other]),
    }
}

/// Coerce the integer operand of a length comparison.
pub fn coerce_count(literal: &str) -> Result<i64, ValueError> {
    unescape(literal)?
        .parse::<i64>()
        .map_err(|_| ValueError::Invalid {
            literal: literal.to_string(),
            expected: "count".to_string(),
        })
}

/// Coerce one non-list literal into a scalar type.
pub fn coerce_scalar(literal: &str, scalar: ScalarType) -> Result<Value, ValueError> {
    let text = unescape(literal)?;
    let text = text.as_ref();
    let invalid = || ValueError::Invalid {
        literal: literal.to_string(),
        expected: scalar.to_string(),
    };

    let value = match scalar {
        ScalarType::Bool => Value::Bool(parse_bool(text).ok_or_else(invalid)?),
        ScalarType::Date => Value::Date(parse_date(text).ok_or_else(invalid)?),
        ScalarType::Decimal => Value::Decimal(Decimal::from_str(text).map_err(|_| invalid())?),
        ScalarType::Enum(model) => {
            let variant = match text.parse::<i64>() {
                Ok(ordinal) => model.by_ordinal(ordinal),
                Err(_) => model.by_name(text),
            }
            .ok_or_else(|| ValueError::UnknownEnumMember {
                literal: literal.to_string(),
                enum_name: model.name.to_string(),
            })?;

            Value::Enum(ValueEnum::new(variant.ordinal, variant.name))
        }
        ScalarType::Float => Value::Float(text.parse::<f64>().map_err(|_| invalid())?),
        // parse at the field's width so the widened literal equals the widened field
        ScalarType::Float32 => {
            Value::Float(f64::from(text.parse::<f32>().map_err(|_| invalid())?))
        }
        ScalarType::Int => Value::Int(text.parse::<i64>().map_err(|_| invalid())?),
        ScalarType::Text => Value::Text(text.to_string()),
        ScalarType::Timestamp => Value::Timestamp(parse_timestamp(text).ok_or_else(invalid)?),
        ScalarType::Uint => Value::Uint(text.parse::<u64>().map_err(|_| invalid())?),
        ScalarType::Uuid => Value::Uuid(Uuid::parse_str(text).map_err(|_| invalid())?),
    };

    Ok(value)
}

/// A literal is quoted when it starts and ends with `'`.
#[must_use]
pub fn is_quoted(literal: &str) -> bool {
    literal.len() >= 2 && literal.starts_with('\'') && literal.ends_with('\'')
}

#[must_use]
pub fn is_bracketed(literal: &str) -> bool {
    literal.len() >= 2 && literal.starts_with('[') && literal.ends_with(']')
}

/// Strip surrounding quotes and decode `%XX` escapes.
/// Bare literals pass through untouched.
pub fn unescape(literal: &str) -> Result<Cow<'_, str>, ValueError> {
    if !is_quoted(literal) {
        return Ok(Cow::Borrowed(literal));
    }

    let inner = &literal[1..literal.len() - 1];

    urlencoding::decode(inner).map_err(|_| ValueError::InvalidEscape {
        literal: literal.to_string(),
    })
}

/// Split the inside of a bracketed literal on commas outside quotes.
#[must_use]
pub fn split_list(literal: &str) -> Vec<&str> {
    let inner = literal
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(literal);

    if inner.trim().is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut quoted = false;
    let mut start = 0;

    for (i, ch) in inner.char_indices() {
        match ch {
            '\'' => quoted = !quoted,
            ',' if !quoted => {
                items.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(inner[start..].trim());

    items
}

fn coerce_list(
    literal: &str,
    scalar: ScalarType,
    config: &QueryConfig,
) -> Result<Value, ValueError> {
    let items = split_list(literal);
    if items.len() > config.max_list_len {
        return Err(ValueError::ListTooLong {
            len: items.len(),
            max: config.max_list_len,
        });
    }

    let values = items
        .into_iter()
        .map(|item| {
            if item.is_empty() {
                return Err(ValueError::Invalid {
                    literal: literal.to_string(),
                    expected: format!("list<{scalar}>"),
                });
            }
            coerce_scalar(item, scalar)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Value::List(values))
}

fn target_scalar(kind: &FieldKind) -> Option<ScalarType> {
    kind.scalar()
        .or_else(|| kind.element().and_then(FieldKind::scalar))
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
}

// RFC 3339 first; offset-less forms are taken as UTC.
fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    if let Ok(ts) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(ts);
    }

    let primitive = PrimitiveDateTime::parse(
        text,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            text,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        )
    })
    .ok()
    .or_else(|| parse_date(text).map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT)))?;

    Some(primitive.assume_utc())
}
