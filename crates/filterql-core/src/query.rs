use crate::{
    config::QueryConfig,
    error::{FormatError, QueryError},
    obs::sink::reject,
    parse::parse_sort,
    sort::Comparator,
    statement::{Filter, FilterBuilder},
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// QueryString
///
/// Front door for raw filter and sort strings, as they arrive from a
/// request. Holds only configuration; every call compiles afresh.
///

#[derive(Clone, Debug)]
pub struct QueryString<E> {
    config: QueryConfig,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind> QueryString<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(QueryConfig::default())
    }

    #[must_use]
    pub const fn with_config(config: QueryConfig) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Compile a filter string.
    pub fn filter(&self, input: &str) -> Result<Filter<E>, QueryError> {
        let mut builder = FilterBuilder::<E>::with_config(self.config.clone());

        builder
            .parse(input)?
            .build()?
            .ok_or_else(|| reject(FormatError::NoStatements.into()))
    }

    /// Compile a sort string.
    pub fn sort(&self, input: &str) -> Result<Comparator<E>, QueryError> {
        let directives = parse_sort(input).map_err(|err| reject(err.into()))?;

        Comparator::build(&directives, &self.config)
    }

    ///
    /// Filter then sort `items`.
    ///
    /// `None`, empty and whitespace-only strings skip that step. Both
    /// strings are compiled before any item is touched.
    ///
    pub fn apply(
        &self,
        filter: Option<&str>,
        sort: Option<&str>,
        items: Vec<E>,
    ) -> Result<Vec<E>, QueryError> {
        let filter = present(filter).map(|input| self.filter(input)).transpose()?;
        let sort = present(sort).map(|input| self.sort(input)).transpose()?;

        let items = match filter {
            Some(filter) => filter.filter_vec(items),
            None => items,
        };

        Ok(match sort {
            Some(comparator) => comparator.sort_vec(items),
            None => items,
        })
    }
}

impl<E: EntityKind> Default for QueryString<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn present(input: Option<&str>) -> Option<&str> {
    input.filter(|text| !text.trim().is_empty())
}
