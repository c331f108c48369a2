use crate::{
    config::{NullOrdering, QueryConfig},
    error::{FormatError, QueryError, UnsupportedOperatorError},
    model::EntityRef,
    obs::sink::{MetricsEvent, record, reject},
    path::resolve,
    sort::{SortDirection, SortDirective, natural_cmp},
    traits::{EntityKind, FieldValues},
    value::{Field, Value, strict_order_cmp},
};
use std::{cmp::Ordering, fmt, marker::PhantomData};
use tracing::debug;

///
/// SortKey
///
/// Resolved directive: the declared names to walk and how to order the leaf.
///

#[derive(Clone, Debug, Eq, PartialEq)]
struct SortKey {
    steps: Vec<&'static str>,
    direction: SortDirection,
}

impl SortKey {
    // None when any hop on the way is absent
    fn read(&self, entity: &dyn FieldValues) -> Option<Value> {
        let mut field = Field::Record(entity);

        for step in &self.steps {
            field = match field {
                Field::Record(record) => record.get_field(step)?,
                _ => return None,
            };
        }

        match field {
            Field::Value(value) if !value.is_null() => Some(value),
            _ => None,
        }
    }
}

///
/// Comparator
///
/// Compiled, immutable ordering over `E` built from one or more directives.
///

pub struct Comparator<E> {
    keys: Vec<SortKey>,
    null_ordering: NullOrdering,
    _marker: PhantomData<fn(&E, &E) -> Ordering>,
}

impl<E: EntityKind> Comparator<E> {
    /// Single-directive comparator with default settings.
    pub fn by(path: &str, direction: SortDirection) -> Result<Self, QueryError> {
        Self::build(
            &[SortDirective::new(path, direction)],
            &QueryConfig::default(),
        )
    }

    /// Resolve and type-check every directive.
    pub fn build(
        directives: &[SortDirective],
        config: &QueryConfig,
    ) -> Result<Self, QueryError> {
        let entity = EntityRef::of::<E>();

        let keys = directives
            .iter()
            .map(|directive| sort_key(entity, directive, config))
            .collect::<Result<Vec<_>, _>>()
            .map_err(reject)?;

        record(MetricsEvent::SortCompiled {
            entity: E::ENTITY_NAME,
        });
        debug!(entity = E::ENTITY_NAME, keys = keys.len(), "compiled comparator");

        Ok(Self {
            keys,
            null_ordering: config.null_ordering,
            _marker: PhantomData,
        })
    }
}

impl<E: FieldValues> Comparator<E> {
    #[must_use]
    pub fn compare(&self, left: &E, right: &E) -> Ordering {
        for key in &self.keys {
            let ordering = self.compare_key(key, left, right);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }

    /// Stable in-place sort.
    pub fn sort(&self, items: &mut [E]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    #[must_use]
    pub fn sort_vec(&self, mut items: Vec<E>) -> Vec<E> {
        self.sort(&mut items);
        items
    }

    fn compare_key(&self, key: &SortKey, left: &E, right: &E) -> Ordering {
        let absent = match self.null_ordering {
            NullOrdering::First => Ordering::Less,
            NullOrdering::Last => Ordering::Greater,
        };

        let ordering = match (key.read(left), key.read(right)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => absent,
            (Some(_), None) => absent.reverse(),
            (Some(a), Some(b)) => match (key.direction.is_natural(), &a, &b) {
                (true, Value::Text(a), Value::Text(b)) => natural_cmp(a, b),
                // NaN sorts after every number
                (_, Value::Float(a), Value::Float(b)) => a.total_cmp(b),
                _ => strict_order_cmp(&a, &b).unwrap_or(Ordering::Equal),
            },
        };

        if key.direction.is_descending() {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

fn sort_key(
    entity: EntityRef,
    directive: &SortDirective,
    config: &QueryConfig,
) -> Result<SortKey, QueryError> {
    let node = resolve(entity, &directive.path, config)?;
    let path = directive.path.trim().to_string();

    if node.is_quantified() {
        return Err(UnsupportedOperatorError::SortOnCollection { path }.into());
    }

    let terminal = node.terminal();
    if terminal.kind.record().is_some() {
        return Err(UnsupportedOperatorError::SortOnRecord {
            path,
            found: terminal.kind.to_string(),
        }
        .into());
    }

    if directive.direction.is_natural() && !terminal.kind.is_text() {
        return Err(FormatError::NaturalSortOnNonText {
            path,
            found: terminal.kind.to_string(),
        }
        .into());
    }

    Ok(SortKey {
        steps: node.names(),
        direction: directive.direction,
    })
}

impl<E> Clone for Comparator<E> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            null_ordering: self.null_ordering,
            _marker: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Comparator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("keys", &self.keys)
            .field("null_ordering", &self.null_ordering)
            .finish()
    }
}
