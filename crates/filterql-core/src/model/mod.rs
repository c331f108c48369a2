//! Declared shapes of queryable types.
//!
//! Models describe what a property *is*; runtime values live in `value`.
//! Everything here is produced by `FieldValue::kind` and the derive macros.


use crate::traits::EntityKind;
use derive_more::Display;
use std::{any::TypeId, fmt};

///
/// ScalarType
///
/// Leaf types a literal can be coerced into.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ScalarType {
    #[display("bool")]
    Bool,
    #[display("date")]
    Date,
    #[display("decimal")]
    Decimal,
    #[display("enum {}", _0.name)]
    Enum(&'static EnumModel),
    #[display("float")]
    Float,
    #[display("float32")]
    Float32,
    #[display("int")]
    Int,
    #[display("text")]
    Text,
    #[display("timestamp")]
    Timestamp,
    #[display("uint")]
    Uint,
    #[display("uuid")]
    Uuid,
}

impl ScalarType {
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Decimal | Self::Float | Self::Float32 | Self::Int | Self::Uint
        )
    }
}

///
/// Classification
///
/// Coarse role of one property hop inside a path.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Classification {
    Scalar,
    Nullable,
    Enumerable,
    Reference,
}

///
/// FieldKind
///
/// Declared type of one property.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarType),
    Record(EntityRef),
    List(Box<Self>),
    Optional(Box<Self>),
}

impl FieldKind {
    /// Classification is a pure function of the declared kind.
    #[must_use]
    pub fn classification(&self) -> Classification {
        match self {
            Self::Scalar(_) => Classification::Scalar,
            Self::Record(_) => Classification::Reference,
            Self::List(_) => Classification::Enumerable,
            Self::Optional(inner) => match inner.classification() {
                Classification::Scalar | Classification::Nullable => Classification::Nullable,
                other => other,
            },
        }
    }

    /// Kind with every `Optional` wrapper removed.
    #[must_use]
    pub fn unwrap_optional(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner.unwrap_optional(),
            other => other,
        }
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Element kind for collection-valued properties.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self.unwrap_optional() {
            Self::List(element) => Some(element),
            _ => None,
        }
    }

    /// Nested entity for record-valued properties.
    #[must_use]
    pub fn record(&self) -> Option<EntityRef> {
        match self.unwrap_optional() {
            Self::Record(entity) => Some(*entity),
            _ => None,
        }
    }

    /// Leaf scalar type, looking through `Optional`.
    #[must_use]
    pub fn scalar(&self) -> Option<ScalarType> {
        match self.unwrap_optional() {
            Self::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.scalar().is_some_and(ScalarType::is_text)
    }

    /// Text and collections have a length; nothing else does.
    #[must_use]
    pub fn is_measurable(&self) -> bool {
        self.is_text() || self.element().is_some()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{scalar}"),
            Self::Record(entity) => write!(f, "{}", entity.name),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Optional(inner) => write!(f, "{inner}?"),
        }
    }
}

///
/// FieldModel
///
/// One declared property of an entity.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Property name as exposed to filter and sort strings.
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

///
/// EntityRef
///
/// Late-bound handle to an entity's declared fields.
/// Function pointers keep self-referential entity graphs finite.
///

#[derive(Clone, Copy)]
pub struct EntityRef {
    pub name: &'static str,
    pub type_id: fn() -> TypeId,
    pub fields: fn() -> Vec<FieldModel>,
}

impl EntityRef {
    #[must_use]
    pub fn of<E: EntityKind>() -> Self {
        Self {
            name: E::ENTITY_NAME,
            type_id: TypeId::of::<E>,
            fields: E::field_models,
        }
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef").field("name", &self.name).finish()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for EntityRef {}

///
/// EnumModel
///
/// Variant table for a unit-only enum.
///

#[derive(Debug, Eq, PartialEq)]
pub struct EnumModel {
    pub name: &'static str,
    pub variants: &'static [EnumVariant],
}

impl EnumModel {
    /// Case-sensitive lookup by member name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|variant| variant.name == name)
    }

    #[must_use]
    pub fn by_ordinal(&self, ordinal: i64) -> Option<&EnumVariant> {
        self.variants
            .iter()
            .find(|variant| variant.ordinal == ordinal)
    }
}

///
/// EnumVariant
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EnumVariant {
    pub name: &'static str,
    pub ordinal: i64,
}
