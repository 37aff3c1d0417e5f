//! Value objects: immutable, compared by the value of their fields.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// A single field value as seen by structural equality.
#[derive(Debug, Clone)]
pub enum Field<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    Nested(&'a dyn ValueObject),
    List(Vec<Field<'a>>),
}

impl PartialEq for Field<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Field::Null, Field::Null) => true,
            (Field::Bool(a), Field::Bool(b)) => a == b,
            (Field::Int(a), Field::Int(b)) => a == b,
            (Field::Float(a), Field::Float(b)) => a == b,
            (Field::Str(a), Field::Str(b)) => a == b,
            (Field::Nested(a), Field::Nested(b)) => equals(*a, Some(*b)),
            (Field::List(a), Field::List(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> From<&'a str> for Field<'a> {
    fn from(value: &'a str) -> Self {
        Field::Str(value)
    }
}

impl<'a> From<&'a String> for Field<'a> {
    fn from(value: &'a String) -> Self {
        Field::Str(value.as_str())
    }
}

impl From<bool> for Field<'_> {
    fn from(value: bool) -> Self {
        Field::Bool(value)
    }
}

impl From<i64> for Field<'_> {
    fn from(value: i64) -> Self {
        Field::Int(value)
    }
}

impl From<f64> for Field<'_> {
    fn from(value: f64) -> Self {
        Field::Float(value)
    }
}

impl<'a, T: Into<Field<'a>>> From<Option<T>> for Field<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Null, Into::into)
    }
}

/// Contract for value objects.
///
/// Each concrete type declares its own field record; equality never looks
/// past the record, and two different concrete types are never equal even
/// when their records happen to match.
pub trait ValueObject: Any + Debug {
    /// Named fields that make up the value. Declaration order is irrelevant.
    fn fields(&self) -> BTreeMap<&'static str, Field<'_>>;

    fn as_any(&self) -> &dyn Any;

    fn equals(&self, other: Option<&dyn ValueObject>) -> bool
    where
        Self: Sized,
    {
        equals(self, other)
    }
}

/// Structural equality between two value objects.
///
/// `None` stands in for a missing counterpart and is never equal.
pub fn equals(this: &dyn ValueObject, other: Option<&dyn ValueObject>) -> bool {
    let Some(other) = other else {
        return false;
    };

    if this.as_any().type_id() != other.as_any().type_id() {
        return false;
    }

    this.fields() == other.fields()
}
