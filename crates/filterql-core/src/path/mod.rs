//! Module: path
//! Responsibility: dotted property path -> resolved node tree.
//! Does not own: operator semantics or literal coercion.
//! Boundary: predicate compiler and comparator builder both resolve here.


use crate::{
    config::QueryConfig,
    error::SchemaError,
    model::{Classification, EntityRef, FieldKind, FieldModel},
    schema::describe_ref,
};
use std::fmt;
use tracing::trace;

///
/// PathSegment
///
/// One resolved hop: declared name, declared kind and its classification.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathSegment {
    pub name: &'static str,
    pub kind: FieldKind,
    pub classification: Classification,
}

impl PathSegment {
    fn from_model(model: &FieldModel) -> Self {
        Self {
            name: model.name,
            kind: model.kind.clone(),
            classification: model.kind.classification(),
        }
    }
}

///
/// PathNode
///
/// Leaf       → scalar, nullable or record property at the end of the path
/// Guarded    → record property with more segments after it
/// Quantified → collection property; `element` is the sub-path resolved
///              against the element type, absent when the collection ends
///              the path
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathNode {
    Leaf(PathSegment),
    Guarded {
        segment: PathSegment,
        next: Box<Self>,
    },
    Quantified {
        segment: PathSegment,
        element: Option<Box<Self>>,
    },
}

impl PathNode {
    #[must_use]
    pub const fn segment(&self) -> &PathSegment {
        match self {
            Self::Leaf(segment)
            | Self::Guarded { segment, .. }
            | Self::Quantified { segment, .. } => segment,
        }
    }

    /// Next node in the chain, if any.
    #[must_use]
    pub fn next(&self) -> Option<&Self> {
        match self {
            Self::Leaf(_) => None,
            Self::Guarded { next, .. } => Some(next),
            Self::Quantified { element, .. } => element.as_deref(),
        }
    }

    /// Last segment of the chain.
    #[must_use]
    pub fn terminal(&self) -> &PathSegment {
        let mut node = self;
        while let Some(next) = node.next() {
            node = next;
        }

        node.segment()
    }

    /// Declared names from this node to the end of the chain.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = vec![self.segment().name];
        let mut node = self;
        while let Some(next) = node.next() {
            names.push(next.segment().name);
            node = next;
        }

        names
    }

    /// True when any hop on the chain is a collection.
    #[must_use]
    pub fn is_quantified(&self) -> bool {
        let mut node = Some(self);
        while let Some(current) = node {
            if matches!(current, Self::Quantified { .. }) {
                return true;
            }
            node = current.next();
        }

        false
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join("."))
    }
}

/// Resolve a dotted path against an entity.
pub fn resolve(
    entity: EntityRef,
    path: &str,
    config: &QueryConfig,
) -> Result<PathNode, SchemaError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(SchemaError::EmptyPath);
    }

    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    if segments.len() > config.max_path_depth {
        return Err(SchemaError::PathTooDeep {
            path: path.to_string(),
            depth: segments.len(),
            max: config.max_path_depth,
        });
    }

    let node = resolve_segments(entity, &segments, path)?;
    trace!(entity = entity.name, path, "resolved property path");

    Ok(node)
}

fn resolve_segments(
    entity: EntityRef,
    segments: &[&str],
    path: &str,
) -> Result<PathNode, SchemaError> {
    let (head, rest) = segments.split_first().ok_or(SchemaError::EmptyPath)?;

    let descriptor = describe_ref(entity);
    let model = descriptor
        .field(head)
        .ok_or_else(|| SchemaError::UnknownProperty {
            segment: (*head).to_string(),
            path: path.to_string(),
            entity: entity.name.to_string(),
        })?;
    let segment = PathSegment::from_model(model);

    if rest.is_empty() {
        return Ok(match segment.classification {
            Classification::Enumerable => PathNode::Quantified {
                segment,
                element: None,
            },
            _ => PathNode::Leaf(segment),
        });
    }

    // only records can be walked into
    let not_a_record = |segment: &PathSegment| SchemaError::NotARecord {
        segment: rest[0].to_string(),
        path: path.to_string(),
        parent: segment.name.to_string(),
        found: segment.kind.to_string(),
    };

    match segment.classification {
        Classification::Scalar | Classification::Nullable => Err(not_a_record(&segment)),

        Classification::Reference => {
            let record = segment.kind.record().ok_or_else(|| not_a_record(&segment))?;
            let next = resolve_segments(record, rest, path)?;

            Ok(PathNode::Guarded {
                segment,
                next: Box::new(next),
            })
        }

        Classification::Enumerable => {
            let record = segment
                .kind
                .element()
                .and_then(FieldKind::record)
                .ok_or_else(|| not_a_record(&segment))?;
            let element = resolve_segments(record, rest, path)?;

            Ok(PathNode::Quantified {
                segment,
                element: Some(Box::new(element)),
            })
        }
    }
}
