use crate::{
    predicate::{CompareOp, Expr},
    traits::FieldValues,
    value::{Field, Value, strict_order_cmp},
};
use std::{cmp::Ordering, collections::HashSet};

///
/// Evaluate a compiled expression against a focus.
///
/// Pure runtime evaluation: no schema access, no coercion.
/// Shape mismatches evaluate to `false`; they were ruled out at compile time.
///
#[must_use]
pub(crate) fn eval(expr: &Expr, focus: &Field<'_>) -> bool {
    match expr {
        Expr::Member { name, then } => {
            let field = match focus {
                Field::Record(record) => record.get_field(name).unwrap_or(Field::Null),
                _ => Field::Null,
            };

            eval(then, &field)
        }

        Expr::IsNull => focus.is_null(),
        Expr::NotNull => !focus.is_null(),

        Expr::Compare { op, value } => focus
            .as_value()
            .is_some_and(|actual| compare(*op, actual, value)),

        Expr::TextContains { needle, mode } => focus
            .as_value()
            .and_then(|actual| actual.text_contains(needle, *mode))
            .unwrap_or(false),

        Expr::InList(values) => focus.as_value().is_some_and(|actual| {
            values
                .iter()
                .any(|candidate| compare(CompareOp::Equal, actual, candidate))
        }),

        Expr::Any(inner) => match focus {
            Field::List(items) => items.iter().any(|item| eval(inner, item)),
            _ => false,
        },

        Expr::Length { op, count } => focus
            .len()
            .is_some_and(|len| compare_count(*op, len, *count)),

        Expr::DistinctCount { steps, op, count } => match focus {
            Field::List(items) => compare_count(*op, distinct_count(items, steps), *count),
            _ => false,
        },

        Expr::And(left, right) => eval(left, focus) && eval(right, focus),
        Expr::Or(left, right) => eval(left, focus) || eval(right, focus),
    }
}

/// Evaluate against a root entity.
#[must_use]
pub(crate) fn eval_root(expr: &Expr, entity: &dyn FieldValues) -> bool {
    eval(expr, &Field::Record(entity))
}

fn compare(op: CompareOp, actual: &Value, expected: &Value) -> bool {
    strict_order_cmp(actual, expected).is_some_and(|ordering| op.holds(ordering))
}

fn compare_count(op: CompareOp, len: usize, count: i64) -> bool {
    let ordering = i64::try_from(len).map_or(Ordering::Greater, |len| len.cmp(&count));

    op.holds(ordering)
}

///
/// Flatten every element through `steps` and count distinct leaves.
///
/// Nested collections are flattened at every hop, nulls are dropped.
/// Values dedupe by equality; records dedupe by identity.
///
fn distinct_count<'a>(items: &[Field<'a>], steps: &[&'static str]) -> usize {
    let mut frontier: Vec<Field<'a>> = Vec::new();
    flatten_into(items.iter().cloned(), &mut frontier);

    for step in steps {
        let mut next: Vec<Field<'a>> = Vec::new();
        for field in &frontier {
            if let Field::Record(record) = field
                && let Some(child) = record.get_field(step)
            {
                flatten_into(std::iter::once(child), &mut next);
            }
        }
        frontier = next;
    }

    // text and records hash; other values can hold an f64 and widen across
    // numeric variants, so they fall back to a pairwise scan
    let mut texts: HashSet<&str> = HashSet::new();
    let mut records: HashSet<*const ()> = HashSet::new();
    let mut others: Vec<&Value> = Vec::new();

    for field in &frontier {
        match field {
            Field::Value(Value::Text(text)) => {
                texts.insert(text.as_str());
            }
            Field::Value(value) => {
                if !others.iter().any(|seen| same_value(seen, value)) {
                    others.push(value);
                }
            }
            Field::Record(record) => {
                records.insert(std::ptr::from_ref(*record).cast::<()>());
            }
            Field::List(_) | Field::Null => {}
        }
    }

    texts.len() + records.len() + others.len()
}

fn flatten_into<'a>(fields: impl Iterator<Item = Field<'a>>, out: &mut Vec<Field<'a>>) {
    for field in fields {
        match field {
            Field::List(items) => flatten_into(items.into_iter(), out),
            other if other.is_null() => {}
            other => out.push(other),
        }
    }
}

fn same_value(left: &Value, right: &Value) -> bool {
    left == right || strict_order_cmp(left, right) == Some(Ordering::Equal)
}
