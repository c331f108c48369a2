use crate::{
    coerce::{coerce_count, coerce_list_for, coerce_scalar, is_bracketed},
    config::QueryConfig,
    error::{QueryError, UnsupportedOperatorError},
    model::{EntityRef, FieldKind, ScalarType},
    path::{PathNode, resolve},
    predicate::{CompareOp, Expr},
    value::TextMode,
};
use tracing::trace;

///
/// Compiler
///
/// Turns one (path, operator, literal) statement into an `Expr` rooted at
/// the entity. All coercion and type checks happen here.
///

struct Compiler<'a> {
    op: CompareOp,
    literal: &'a str,
    path: &'a str,
    config: &'a QueryConfig,
}

/// Compile one statement against an entity.
pub fn compile(
    entity: EntityRef,
    path: &str,
    op: CompareOp,
    literal: &str,
    config: &QueryConfig,
) -> Result<Expr, QueryError> {
    let node = resolve(entity, path, config)?;
    let compiler = Compiler {
        op,
        literal,
        path,
        config,
    };
    let expr = compiler.node(&node)?;

    trace!(entity = entity.name, path, op = %op, "compiled statement");

    Ok(expr)
}

impl Compiler<'_> {
    fn node(&self, node: &PathNode) -> Result<Expr, QueryError> {
        match node {
            PathNode::Leaf(segment)
            | PathNode::Quantified {
                segment,
                element: None,
            } => Ok(Expr::member(segment.name, self.value(&segment.kind)?)),

            PathNode::Guarded { segment, next } => {
                let inner = self.node(next)?;

                Ok(Expr::member(
                    segment.name,
                    Expr::guarded(inner, self.op.admits_absent()),
                ))
            }

            PathNode::Quantified {
                segment,
                element: Some(sub),
            } => {
                let inner = if self.op.is_length() {
                    self.distinct_count(sub)?
                } else {
                    Expr::and(Expr::NotNull, Expr::any(self.node(sub)?))
                };

                Ok(Expr::member(segment.name, inner))
            }
        }
    }

    // length through an intervening collection: flatten, dedupe, count
    fn distinct_count(&self, sub: &PathNode) -> Result<Expr, QueryError> {
        let terminal = sub.terminal();
        if !terminal.kind.is_measurable() {
            return Err(self.unsupported(&terminal.kind));
        }

        let count = self.count()?;
        let expr = Expr::DistinctCount {
            steps: sub.names(),
            op: self.op.relational(),
            count,
        };

        Ok(Expr::guarded(expr, self.op.admits_absent()))
    }

    fn value(&self, kind: &FieldKind) -> Result<Expr, QueryError> {
        match kind {
            FieldKind::Scalar(scalar) => self.scalar(*scalar),

            FieldKind::Optional(inner) => {
                let expr = self.value(inner)?;
                let absent_matches = self.op.admits_absent()
                    && (self.op.is_length() || matches!(**inner, FieldKind::Scalar(_)));

                if absent_matches && !self.op.is_length() {
                    // absent, or present and different
                    Ok(Expr::or(Expr::IsNull, Expr::and(Expr::NotNull, expr)))
                } else {
                    Ok(Expr::guarded(expr, absent_matches))
                }
            }

            FieldKind::List(element) => {
                if self.op.is_length() {
                    Ok(Expr::Length {
                        op: self.op.relational(),
                        count: self.count()?,
                    })
                } else {
                    Ok(Expr::any(self.value(element)?))
                }
            }

            FieldKind::Record(_) => Err(self.unsupported(kind)),
        }
    }

    fn scalar(&self, scalar: ScalarType) -> Result<Expr, QueryError> {
        let op = self.op;
        let kind = FieldKind::Scalar(scalar);

        if op.is_length() {
            if !scalar.is_text() {
                return Err(self.unsupported(&kind));
            }

            return Ok(Expr::Length {
                op: op.relational(),
                count: self.count()?,
            });
        }

        let expr = match op {
            CompareOp::Contains | CompareOp::ContainsIgnoreCase => {
                if !scalar.is_text() {
                    return Err(self.unsupported(&kind));
                }

                let mode = if op == CompareOp::Contains {
                    TextMode::Cs
                } else {
                    TextMode::Ci
                };

                Expr::TextContains {
                    needle: coerce_scalar(self.literal, ScalarType::Text)?,
                    mode,
                }
            }

            CompareOp::In => {
                if !is_bracketed(self.literal) {
                    return Err(UnsupportedOperatorError::InRequiresList {
                        path: self.path.to_string(),
                    }
                    .into());
                }

                Expr::InList(coerce_list_for(self.literal, &kind, self.config)?)
            }

            _ => Expr::Compare {
                op,
                value: coerce_scalar(self.literal, scalar)?,
            },
        };

        Ok(expr)
    }

    fn count(&self) -> Result<i64, QueryError> {
        Ok(coerce_count(self.literal)?)
    }

    fn unsupported(&self, found: &FieldKind) -> QueryError {
        UnsupportedOperatorError::OperatorOnType {
            op: self.op.keyword().to_string(),
            path: self.path.to_string(),
            found: found.to_string(),
        }
        .into()
    }
}
