use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features::categories::models::Category;
use crate::shared::domain::Uuid;

/// Input for creating a category
#[derive(Debug, Clone, Default)]
pub struct CategoryProps {
    pub name: String,
    /// Defaults to `None`
    pub description: Option<String>,
    /// Defaults to `true`
    pub is_active: Option<bool>,
    /// Generated when absent
    pub category_id: Option<Uuid>,
    /// Defaults to the creation time
    pub created_at: Option<DateTime<Utc>>,
}

impl CategoryProps {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Plain snapshot of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOutputDto {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryOutputDto {
    fn from(c: &Category) -> Self {
        Self {
            category_id: c.category_id().id().to_string(),
            name: c.name().to_string(),
            description: c.description().map(str::to_string),
            is_active: c.is_active(),
            created_at: c.created_at(),
        }
    }
}
