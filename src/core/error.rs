use std::collections::BTreeMap;

use thiserror::Error;
use validator::ValidationErrors;

use crate::shared::domain::InvalidUuidError;

/// Field-level validation failure of an entity.
///
/// Every violated rule is kept, grouped by field name.
#[derive(Debug, Clone, Error)]
#[error("Entity validation error: {0}")]
pub struct EntityValidationError(pub ValidationErrors);

impl EntityValidationError {
    /// Field name to ordered list of violation messages
    pub fn messages(&self) -> BTreeMap<String, Vec<String>> {
        self.0
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect()
    }

    pub fn field_messages(&self, field: &str) -> Vec<String> {
        self.messages().remove(field).unwrap_or_default()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.messages().contains_key(field)
    }
}

impl From<ValidationErrors> for EntityValidationError {
    fn from(errors: ValidationErrors) -> Self {
        Self(errors)
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid UUID: {0}")]
    InvalidUuid(#[from] InvalidUuidError),

    #[error(transparent)]
    Validation(#[from] EntityValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
