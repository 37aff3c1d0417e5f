//! Entities: identity that persists across state changes.

use serde::Serialize;

use crate::shared::domain::value_object::{self, ValueObject};

pub trait Entity {
    /// Identity value object, assigned once at creation.
    type Id: ValueObject;

    /// Plain serializable snapshot of the entity state.
    type Output: Serialize;

    fn entity_id(&self) -> &Self::Id;

    fn to_json(&self) -> Self::Output;
}

/// Two entities are the same when their identities are value-equal,
/// regardless of the rest of their state.
pub fn same_identity<E: Entity>(a: &E, b: &E) -> bool {
    value_object::equals(a.entity_id(), Some(b.entity_id()))
}
