use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    /// Regex for validating UUID strings in the canonical hyphenated form
    /// Accepts versions 1-8 with the RFC 4122 variant, plus the nil and max UUIDs
    /// - Valid: "6db17410-eddd-42b4-8e2c-b99ba3a876a8", "00000000-0000-0000-0000-000000000000"
    /// - Invalid: "invalid-uuid", "6db17410eddd42b48e2cb99ba3a876a8", "{6db17410-eddd-42b4-8e2c-b99ba3a876a8}"
    pub static ref UUID_REGEX: Regex = Regex::new(
        r"(?i)^(?:[0-9a-f]{8}-[0-9a-f]{4}-[1-8][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}|00000000-0000-0000-0000-000000000000|ffffffff-ffff-ffff-ffff-ffffffffffff)$"
    )
    .unwrap();
}

pub fn is_valid_uuid(value: &str) -> bool {
    !value.is_empty() && UUID_REGEX.is_match(value)
}

/// A single validation rule applied to a loosely-typed field value.
///
/// `None` means the field is absent from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    NotEmpty,
    IsString,
    MaxLength(usize),
    IsBoolean,
}

impl Rule {
    pub fn code(&self) -> &'static str {
        match self {
            Rule::NotEmpty => "not_empty",
            Rule::IsString => "is_string",
            Rule::MaxLength(_) => "max_length",
            Rule::IsBoolean => "is_boolean",
        }
    }

    pub fn check(&self, value: Option<&Value>) -> bool {
        match self {
            Rule::NotEmpty => !matches!(value, None | Some(Value::Null))
                && value.and_then(Value::as_str) != Some(""),
            Rule::IsString => matches!(value, Some(Value::String(_))),
            Rule::MaxLength(max) => match value {
                Some(Value::String(s)) => s.chars().count() <= *max,
                _ => false,
            },
            Rule::IsBoolean => matches!(value, Some(Value::Bool(_))),
        }
    }

    pub fn message(&self, field: &str) -> String {
        match self {
            Rule::NotEmpty => format!("{} should not be empty", field),
            Rule::IsString => format!("{} must be a string", field),
            Rule::MaxLength(max) => format!(
                "{} must be shorter than or equal to {} characters",
                field, max
            ),
            Rule::IsBoolean => format!("{} must be a boolean value", field),
        }
    }

    fn to_error(self, field: &str) -> ValidationError {
        let mut error =
            ValidationError::new(self.code()).with_message(Cow::Owned(self.message(field)));
        if let Rule::MaxLength(max) = self {
            error.add_param(Cow::Borrowed("max"), &max);
        }
        error
    }
}

/// Ordered rule list for one named field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    /// Optional fields skip every rule when absent or null
    pub optional: bool,
    pub rules: &'static [Rule],
}

impl FieldRules {
    pub const fn required(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            optional: false,
            rules,
        }
    }

    pub const fn optional(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            optional: true,
            rules,
        }
    }
}

/// Run every rule of every field against `target`.
///
/// Nothing short-circuits: all failing rules are collected, grouped by field,
/// in declaration order.
pub fn validate_fields(
    target: &Map<String, Value>,
    field_rules: &[FieldRules],
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for field_spec in field_rules {
        let value = target.get(field_spec.field);
        if field_spec.optional && matches!(value, None | Some(Value::Null)) {
            continue;
        }

        for rule in field_spec.rules {
            if !rule.check(value) {
                errors.add(field_spec.field, rule.to_error(field_spec.field));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
