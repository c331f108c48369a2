
use crate::{
    model::{FieldKind, FieldModel, ScalarType},
    value::{Field, Value},
};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

///
/// FieldValue
///
/// Per-type capability: the declared kind of a Rust type, and a borrowed
/// runtime view of one instance. Implemented for primitives here and for
/// user types by `#[derive(Entity)]` / `#[derive(EnumValue)]`.
///

pub trait FieldValue {
    fn kind() -> FieldKind
    where
        Self: Sized;

    fn to_field(&self) -> Field<'_>;
}

///
/// FieldValues
///
/// Name-keyed field reads on an entity.
/// Object safe; nested records are evaluated through `&dyn FieldValues`.
///

pub trait FieldValues {
    /// Read one declared property by its exact (declared) name.
    fn get_field(&self, name: &str) -> Option<Field<'_>>;
}

///
/// EntityKind
///
/// Static description of an entity type.
///

pub trait EntityKind: FieldValues + 'static {
    const ENTITY_NAME: &'static str;

    /// Declared queryable fields in declaration order.
    fn field_models() -> Vec<FieldModel>;
}

// Scalars whose runtime value is a plain conversion.
macro_rules! impl_field_value_scalar {
    ($($ty:ty => $scalar:ident, $variant:ident, $conv:expr;)*) => {
        $(
            impl FieldValue for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Scalar(ScalarType::$scalar)
                }

                fn to_field(&self) -> Field<'_> {
                    #[allow(clippy::redundant_closure_call)]
                    Field::Value(Value::$variant(($conv)(self)))
                }
            }
        )*
    };
}

impl_field_value_scalar! {
    bool => Bool, Bool, |v: &bool| *v;
    i8 => Int, Int, |v: &i8| i64::from(*v);
    i16 => Int, Int, |v: &i16| i64::from(*v);
    i32 => Int, Int, |v: &i32| i64::from(*v);
    i64 => Int, Int, |v: &i64| *v;
    u8 => Uint, Uint, |v: &u8| u64::from(*v);
    u16 => Uint, Uint, |v: &u16| u64::from(*v);
    u32 => Uint, Uint, |v: &u32| u64::from(*v);
    u64 => Uint, Uint, |v: &u64| *v;
    f32 => Float32, Float, |v: &f32| f64::from(*v);
    f64 => Float, Float, |v: &f64| *v;
    Decimal => Decimal, Decimal, |v: &Decimal| *v;
    String => Text, Text, |v: &String| v.clone();
    Date => Date, Date, |v: &Date| *v;
    OffsetDateTime => Timestamp, Timestamp, |v: &OffsetDateTime| *v;
    Uuid => Uuid, Uuid, |v: &Uuid| *v;
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Optional(Box::new(T::kind()))
    }

    fn to_field(&self) -> Field<'_> {
        match self {
            Some(inner) => inner.to_field(),
            None => Field::Null,
        }
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn to_field(&self) -> Field<'_> {
        self.as_ref().to_field()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(T::kind()))
    }

    fn to_field(&self) -> Field<'_> {
        Field::List(self.iter().map(FieldValue::to_field).collect())
    }
}

impl<T: FieldValue> FieldValue for BTreeSet<T> {
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(T::kind()))
    }

    fn to_field(&self) -> Field<'_> {
        Field::List(self.iter().map(FieldValue::to_field).collect())
    }
}
