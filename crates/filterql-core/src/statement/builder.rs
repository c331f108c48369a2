use crate::{
    config::QueryConfig,
    error::{QueryError, SequenceError},
    model::EntityRef,
    obs::sink::{MetricsEvent, record, reject},
    parse::parse_filter,
    predicate::{CompareOp, Expr, compile},
    statement::{Connector, Filter, FilterStatement},
    traits::EntityKind,
};
use std::{marker::PhantomData, mem};
use tracing::debug;

///
/// FilterBuilder
///
/// Mutable session that accumulates statements for one entity type.
/// Not shared between callers; `build` drains it so it can be reused.
///

#[derive(Debug)]
pub struct FilterBuilder<E> {
    statements: Vec<FilterStatement>,
    pending: Option<Connector>,
    config: QueryConfig,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind> FilterBuilder<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(QueryConfig::default())
    }

    #[must_use]
    pub const fn with_config(config: QueryConfig) -> Self {
        Self {
            statements: Vec::new(),
            pending: None,
            config,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Statements accumulated since the last `build`.
    #[must_use]
    pub fn statements(&self) -> &[FilterStatement] {
        &self.statements
    }

    /// Append a statement, consuming the pending connector.
    pub fn by(
        &mut self,
        path: impl Into<String>,
        literal: impl Into<String>,
        op: CompareOp,
    ) -> Result<&mut Self, QueryError> {
        let path = path.into();

        if !self.statements.is_empty() && self.pending.is_none() {
            return Err(reject(SequenceError::MissingConnector { path }.into()));
        }

        let statement = FilterStatement {
            path,
            literal: literal.into(),
            op,
            connector: self.pending.take(),
        };
        debug!(entity = E::ENTITY_NAME, statement = %statement, "filter statement added");
        self.statements.push(statement);

        Ok(self)
    }

    pub fn and(&mut self) -> Result<&mut Self, QueryError> {
        self.connect(Connector::And)
    }

    pub fn or(&mut self) -> Result<&mut Self, QueryError> {
        self.connect(Connector::Or)
    }

    pub fn and_by(
        &mut self,
        path: impl Into<String>,
        literal: impl Into<String>,
        op: CompareOp,
    ) -> Result<&mut Self, QueryError> {
        self.and()?.by(path, literal, op)
    }

    pub fn or_by(
        &mut self,
        path: impl Into<String>,
        literal: impl Into<String>,
        op: CompareOp,
    ) -> Result<&mut Self, QueryError> {
        self.or()?.by(path, literal, op)
    }

    /// Parse a filter string and feed its statements into this session.
    pub fn parse(&mut self, input: &str) -> Result<&mut Self, QueryError> {
        let statements =
            parse_filter(input, &self.config).map_err(|err| reject(QueryError::from(err)))?;

        for statement in statements {
            if let Some(connector) = statement.connector {
                self.connect(connector)?;
            }
            self.by(statement.path, statement.literal, statement.op)?;
        }

        Ok(self)
    }

    fn connect(&mut self, connector: Connector) -> Result<&mut Self, QueryError> {
        if self.statements.is_empty() {
            return Err(reject(SequenceError::ConnectorBeforeStatement.into()));
        }

        self.pending = Some(connector);

        Ok(self)
    }

    ///
    /// Compile every accumulated statement and fold them left to right.
    ///
    /// The session is drained first, so it is empty afterwards whether or
    /// not compilation succeeds. An empty session yields `Ok(None)`.
    ///
    pub fn build(&mut self) -> Result<Option<Filter<E>>, QueryError> {
        let statements = mem::take(&mut self.statements);
        let pending = self.pending.take();

        if let Some(connector) = pending {
            return Err(reject(
                SequenceError::DanglingConnector {
                    connector: connector.to_string(),
                }
                .into(),
            ));
        }

        let Some(expr) = fold(EntityRef::of::<E>(), &statements, &self.config).map_err(reject)?
        else {
            return Ok(None);
        };

        let count = u64::try_from(statements.len()).unwrap_or(u64::MAX);
        record(MetricsEvent::FilterCompiled {
            entity: E::ENTITY_NAME,
            statements: count,
        });

        if self.config.debug {
            debug!(entity = E::ENTITY_NAME, expr = %expr, "compiled filter");
        } else {
            debug!(entity = E::ENTITY_NAME, statements = count, "compiled filter");
        }

        Ok(Some(Filter::new(expr)))
    }
}

impl<E: EntityKind> Default for FilterBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

// strict left-to-right: `a or b and c` is `(a or b) and c`
fn fold(
    entity: EntityRef,
    statements: &[FilterStatement],
    config: &QueryConfig,
) -> Result<Option<Expr>, QueryError> {
    let mut folded: Option<Expr> = None;

    for statement in statements {
        let expr = compile(
            entity,
            &statement.path,
            statement.op,
            &statement.literal,
            config,
        )?;

        folded = Some(match (folded, statement.connector) {
            (None, _) => expr,
            (Some(acc), Some(Connector::Or)) => Expr::or(acc, expr),
            (Some(acc), Some(Connector::And) | None) => Expr::and(acc, expr),
        });
    }

    Ok(folded)
}
