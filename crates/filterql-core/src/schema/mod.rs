//! Module: schema
//! Responsibility: per-type, memoized lookup from lower-cased property name
//! to declared field model.
//! Does not own: path walking or error reporting for unknown names.
//! Boundary: the only cross-call shared state in the crate.


use crate::{
    model::{Classification, EntityRef, FieldKind, FieldModel},
    obs::sink::{MetricsEvent, record},
    traits::EntityKind,
};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};
use tracing::trace;

type DescriptorCache = RwLock<HashMap<TypeId, Arc<EntityDescriptor>>>;

static DESCRIPTORS: LazyLock<DescriptorCache> = LazyLock::new(|| RwLock::new(HashMap::new()));

///
/// EntityDescriptor
///
/// Immutable, case-insensitive view of one entity's declared fields.
///

#[derive(Debug)]
pub struct EntityDescriptor {
    entity: EntityRef,
    fields: HashMap<String, FieldModel>,
}

impl EntityDescriptor {
    fn build(entity: EntityRef) -> Self {
        let fields = (entity.fields)()
            .into_iter()
            .map(|field| (field.name.to_lowercase(), field))
            .collect();

        Self { entity, fields }
    }

    #[must_use]
    pub const fn entity(&self) -> EntityRef {
        self.entity
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.entity.name
    }

    /// Case-insensitive field lookup.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.get(&name.to_lowercase())
    }

    /// Declared kind and classification for one property.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<(&FieldKind, Classification)> {
        self.field(name)
            .map(|field| (&field.kind, field.kind.classification()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Descriptor for a statically known entity type.
#[must_use]
pub fn describe<E: EntityKind>() -> Arc<EntityDescriptor> {
    describe_ref(EntityRef::of::<E>())
}

/// Descriptor for a late-bound entity handle.
///
/// Built at most once per type under normal use; two threads racing on the
/// first build both produce equal descriptors and the last insert wins.
#[must_use]
pub fn describe_ref(entity: EntityRef) -> Arc<EntityDescriptor> {
    let type_id = entity.type_id();

    if let Some(found) = DESCRIPTORS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&type_id)
    {
        return Arc::clone(found);
    }

    // build outside the lock, then publish
    let descriptor = Arc::new(EntityDescriptor::build(entity));
    trace!(
        entity = entity.name,
        fields = descriptor.len(),
        "built entity descriptor"
    );
    record(MetricsEvent::DescriptorBuilt {
        entity: entity.name,
    });

    DESCRIPTORS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(type_id, Arc::clone(&descriptor));

    descriptor
}
