//! UUID identifier value object.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::shared::domain::value_object::{self, Field, ValueObject};
use crate::shared::validation::is_valid_uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ID must be a valid UUID")]
pub struct InvalidUuidError;

#[cfg(test)]
thread_local! {
    static VALIDATE_CALLS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Number of `Uuid` validations on the current thread
#[cfg(test)]
pub(crate) fn validate_calls() -> usize {
    VALIDATE_CALLS.with(|calls| calls.get())
}

/// Identifier backed by a canonical UUID string.
#[derive(Debug, Clone)]
pub struct Uuid {
    id: String,
}

impl Uuid {
    /// Wrap `id`, or generate a fresh v4 identifier when `None`.
    pub fn new(id: Option<&str>) -> Result<Self, InvalidUuidError> {
        let uuid = Self {
            id: id.map_or_else(|| ::uuid::Uuid::new_v4().to_string(), str::to_string),
        };
        uuid.validate()?;
        Ok(uuid)
    }

    pub fn generate() -> Self {
        Self {
            id: ::uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn into_inner(self) -> String {
        self.id
    }

    fn validate(&self) -> Result<(), InvalidUuidError> {
        #[cfg(test)]
        VALIDATE_CALLS.with(|calls| calls.set(calls.get() + 1));

        if is_valid_uuid(&self.id) {
            Ok(())
        } else {
            tracing::debug!(id = %self.id, "Rejected malformed UUID");
            Err(InvalidUuidError)
        }
    }
}

impl ValueObject for Uuid {
    fn fields(&self) -> BTreeMap<&'static str, Field<'_>> {
        BTreeMap::from([("id", Field::from(&self.id))])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PartialEq for Uuid {
    fn eq(&self, other: &Self) -> bool {
        value_object::equals(self, Some(other))
    }
}

impl Eq for Uuid {}

impl Default for Uuid {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl FromStr for Uuid {
    type Err = InvalidUuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(Some(s))
    }
}

impl TryFrom<&str> for Uuid {
    type Error = InvalidUuidError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(Some(value))
    }
}

impl TryFrom<String> for Uuid {
    type Error = InvalidUuidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let uuid = Self { id: value };
        uuid.validate()?;
        Ok(uuid)
    }
}

impl TryFrom<::uuid::Uuid> for Uuid {
    type Error = InvalidUuidError;

    fn try_from(value: ::uuid::Uuid) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl Serialize for Uuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

impl<'de> Deserialize<'de> for Uuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Uuid::try_from(id).map_err(serde::de::Error::custom)
    }
}
