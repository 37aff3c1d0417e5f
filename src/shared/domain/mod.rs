pub mod entity;
pub mod uuid;
pub mod value_object;

pub use entity::{same_identity, Entity};
pub use uuid::{InvalidUuidError, Uuid};
pub use value_object::{Field, ValueObject};
