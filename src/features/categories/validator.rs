use serde_json::{Map, Value};

use crate::core::error::EntityValidationError;
use crate::shared::constants::CATEGORY_NAME_MAX_LENGTH;
use crate::shared::validation::{validate_fields, FieldRules, Rule};

pub const CATEGORY_RULES: &[FieldRules] = &[
    FieldRules::required(
        "name",
        &[
            Rule::NotEmpty,
            Rule::IsString,
            Rule::MaxLength(CATEGORY_NAME_MAX_LENGTH),
        ],
    ),
    FieldRules::optional("description", &[Rule::IsString]),
    FieldRules::required("is_active", &[Rule::IsBoolean]),
];

#[cfg(test)]
thread_local! {
    static VALIDATE_CALLS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Number of `validate` runs on the current thread
#[cfg(test)]
pub(crate) fn validate_calls() -> usize {
    VALIDATE_CALLS.with(|calls| calls.get())
}

/// Check the `name`, `description` and `is_active` entries of `fields`.
pub fn validate(fields: &Map<String, Value>) -> Result<(), EntityValidationError> {
    #[cfg(test)]
    VALIDATE_CALLS.with(|calls| calls.set(calls.get() + 1));

    validate_fields(fields, CATEGORY_RULES).map_err(|errors| {
        let err = EntityValidationError::from(errors);
        tracing::debug!(errors = ?err.messages(), "Category validation failed");
        err
    })
}
