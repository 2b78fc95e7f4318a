//! Field descriptors.
//!
//! A [`Field`] describes one target field of a record type: its declared
//! [`FieldKind`], how to read its current value and how to write a coerced
//! value into an instance. Descriptors are built once, when the mapping is
//! declared, and reused for every decoded row.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Semantic type of a target field, used to pick a coercion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Boolean,
    DateTime,
    Integer,
    Float,
    Text,
    /// Any type the importer has no coercion for. Values are never written.
    Other,
}

impl FieldKind {
    /// True for integer and floating-point kinds.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// A value already coerced to one of the importer's semantic types.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Boolean(bool),
    DateTime(NaiveDateTime),
    Number(f64),
    Text(String),
}

/// Rust types that can be the target of a mapped column.
///
/// `Option<T>` is implemented for every `T: FieldType`, so nullable fields
/// share the kind of their inner type.
pub trait FieldType: Sized {
    /// Declared kind of the field.
    const KIND: FieldKind;

    /// Converts a coerced value into this type, `None` when it does not fit.
    fn from_value(value: FieldValue) -> Option<Self>;

    /// Current value as a [`FieldValue`], `None` when unset.
    fn to_value(&self) -> Option<FieldValue>;
}

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Boolean(b) => Some(b),
            _ => None,
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Boolean(*self))
    }
}

impl FieldType for NaiveDateTime {
    const KIND: FieldKind = FieldKind::DateTime;

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::DateTime(*self))
    }
}

impl FieldType for NaiveDate {
    const KIND: FieldKind = FieldKind::DateTime;

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::DateTime(self.and_time(chrono::NaiveTime::MIN)))
    }
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Text(self.clone()))
    }
}

// Integer targets take integral values that fit the target width; anything
// else is left unset. `MAX as f64 + 1.0` is the exact power of two above the
// range, so the strict upper bound holds for 64-bit widths too.
macro_rules! integer_field_type {
    ($($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                const KIND: FieldKind = FieldKind::Integer;

                fn from_value(value: FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::Number(n)
                            if n.fract() == 0.0
                                && n >= <$ty>::MIN as f64
                                && n < <$ty>::MAX as f64 + 1.0 =>
                        {
                            Some(n as $ty)
                        }
                        _ => None,
                    }
                }

                fn to_value(&self) -> Option<FieldValue> {
                    Some(FieldValue::Number(*self as f64))
                }
            }
        )*
    };
}

integer_field_type!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! float_field_type {
    ($($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                const KIND: FieldKind = FieldKind::Float;

                fn from_value(value: FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::Number(n) => Some(n as $ty),
                        _ => None,
                    }
                }

                fn to_value(&self) -> Option<FieldValue> {
                    Some(FieldValue::Number(f64::from(*self)))
                }
            }
        )*
    };
}

float_field_type!(f32, f64);

impl<T: FieldType> FieldType for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn from_value(value: FieldValue) -> Option<Self> {
        T::from_value(value).map(Some)
    }

    fn to_value(&self) -> Option<FieldValue> {
        self.as_ref().and_then(T::to_value)
    }
}

type ReadFn<R> = Box<dyn Fn(&R) -> Option<FieldValue> + Send + Sync>;
type WriteFn<R> = Box<dyn Fn(&mut R, FieldValue) -> bool + Send + Sync>;

/// Accessor for one field of a record type `R`.
///
/// Usually built with the [`field!`](crate::field) macro:
///
/// ```
/// use tabula_model::{Field, FieldKind, field};
///
/// #[derive(Default)]
/// struct Person {
///     name: String,
///     age: Option<u32>,
/// }
///
/// let name = field!(Person, name);
/// let age = field!(Person, age);
/// assert_eq!(name.kind(), FieldKind::Text);
/// assert_eq!(age.kind(), FieldKind::Integer);
/// ```
pub struct Field<R> {
    kind: FieldKind,
    read: ReadFn<R>,
    write: WriteFn<R>,
}

impl<R: 'static> Field<R> {
    /// Builds a descriptor from a pair of accessors to a typed field.
    pub fn new<T: FieldType + 'static>(get: fn(&R) -> &T, set: fn(&mut R) -> &mut T) -> Self {
        Self {
            kind: T::KIND,
            read: Box::new(move |record| get(record).to_value()),
            write: Box::new(move |record, value| match T::from_value(value) {
                Some(v) => {
                    *set(record) = v;
                    true
                }
                None => false,
            }),
        }
    }

    /// Builds a descriptor from explicit closures.
    ///
    /// `write` returns whether the value was assigned.
    pub fn from_fns<G, S>(kind: FieldKind, read: G, write: S) -> Self
    where
        G: Fn(&R) -> Option<FieldValue> + Send + Sync + 'static,
        S: Fn(&mut R, FieldValue) -> bool + Send + Sync + 'static,
    {
        Self {
            kind,
            read: Box::new(read),
            write: Box::new(write),
        }
    }
}

impl<R> Field<R> {
    /// Declared kind of the field.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Reads the field from a record.
    pub fn read(&self, record: &R) -> Option<FieldValue> {
        (self.read)(record)
    }

    /// Writes a coerced value into a record. Returns false when the value
    /// does not fit the field and nothing was written.
    pub fn write(&self, record: &mut R, value: FieldValue) -> bool {
        (self.write)(record, value)
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("kind", &self.kind).finish_non_exhaustive()
    }
}

/// Builds a [`Field`] for a named struct field.
///
/// `field!(Person, name)` expands to accessors reading and writing
/// `person.name`; the field's type must implement [`FieldType`].
#[macro_export]
macro_rules! field {
    ($record:ty, $name:ident) => {
        $crate::Field::<$record>::new(
            |record: &$record| &record.$name,
            |record: &mut $record| &mut record.$name,
        )
    };
}
