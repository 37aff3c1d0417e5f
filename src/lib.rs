//! Category catalog domain: the `Category` entity, the value-object
//! abstraction and the validated `Uuid` identifier.

pub mod core;
pub mod features;
pub mod shared;

pub use crate::core::error::{DomainError, EntityValidationError, Result};
pub use crate::features::categories::{Category, CategoryOutputDto, CategoryProps};
pub use crate::shared::domain::{Entity, InvalidUuidError, Uuid, ValueObject};
