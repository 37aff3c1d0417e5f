use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::core::error::{DomainError, EntityValidationError, Result};
use crate::features::categories::dtos::{CategoryOutputDto, CategoryProps};
use crate::features::categories::validator;
use crate::shared::domain::{Entity, InvalidUuidError, Uuid};

/// Category aggregate
///
/// `category_id` and `created_at` are fixed at creation. Mutating methods
/// assign first and validate afterwards, so a rejected value stays in place
/// when they return an error. They take typed input only; wrong-typed values
/// are reachable through [`Category::create_from_value`] alone.
#[derive(Debug, Clone)]
pub struct Category {
    category_id: Uuid,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Category {
    pub fn create(props: CategoryProps) -> std::result::Result<Self, EntityValidationError> {
        let category = Self {
            category_id: props.category_id.unwrap_or_default(),
            name: props.name,
            description: props.description,
            is_active: props.is_active.unwrap_or(true),
            created_at: props.created_at.unwrap_or_else(Utc::now),
        };
        category.validate()?;
        Ok(category)
    }

    /// Create from loosely-typed props, e.g. a decoded request body or seed entry.
    ///
    /// Values of the wrong JSON type are reported through the same rule table
    /// as typed input, so a `null` or numeric name yields every name violation.
    /// The field rules run before `category_id` and `created_at` are parsed.
    pub fn create_from_value(value: Value) -> Result<Self> {
        let Value::Object(mut props) = value else {
            return Err(DomainError::InvalidInput(
                "category props must be a JSON object".to_string(),
            ));
        };

        let mut fields = Map::new();
        if let Some(name) = props.remove("name") {
            fields.insert("name".to_string(), name);
        }
        let description = props.remove("description").unwrap_or(Value::Null);
        fields.insert("description".to_string(), description);
        let is_active = match props.remove("is_active") {
            None | Some(Value::Null) => Value::Bool(true),
            Some(v) => v,
        };
        fields.insert("is_active".to_string(), is_active);

        validator::validate(&fields)?;

        let category_id = match props.remove("category_id") {
            None | Some(Value::Null) => Uuid::generate(),
            Some(Value::String(id)) => Uuid::try_from(id)?,
            Some(_) => return Err(InvalidUuidError.into()),
        };

        let created_at = match props.remove("created_at") {
            None | Some(Value::Null) => Utc::now(),
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    DomainError::InvalidInput(format!(
                        "created_at must be an RFC 3339 timestamp: {}",
                        e
                    ))
                })?,
            Some(other) => {
                return Err(DomainError::InvalidInput(format!(
                    "created_at must be an RFC 3339 timestamp, got {}",
                    other
                )))
            }
        };

        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        Ok(Self {
            category_id,
            name: text("name").unwrap_or_default(),
            description: text("description"),
            is_active: fields
                .get("is_active")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            created_at,
        })
    }

    pub fn category_id(&self) -> &Uuid {
        &self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn change_name(
        &mut self,
        name: impl Into<String>,
    ) -> std::result::Result<(), EntityValidationError> {
        self.name = name.into();
        self.validate()
    }

    pub fn change_description(
        &mut self,
        description: Option<String>,
    ) -> std::result::Result<(), EntityValidationError> {
        self.description = description;
        self.validate()
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn to_json(&self) -> CategoryOutputDto {
        CategoryOutputDto::from(self)
    }

    fn validate(&self) -> std::result::Result<(), EntityValidationError> {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        fields.insert(
            "description".to_string(),
            self.description.clone().map_or(Value::Null, Value::String),
        );
        fields.insert("is_active".to_string(), Value::Bool(self.is_active));

        validator::validate(&fields)
    }
}

impl Entity for Category {
    type Id = Uuid;
    type Output = CategoryOutputDto;

    fn entity_id(&self) -> &Uuid {
        &self.category_id
    }

    fn to_json(&self) -> CategoryOutputDto {
        Category::to_json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::domain::same_identity;
    use crate::shared::validation::is_valid_uuid;
    use fake::faker::lorem::en::{Sentence, Word};
    use fake::Fake;
    use serde_json::json;

    const NAME_VIOLATIONS: [&str; 3] = [
        "name should not be empty",
        "name must be a string",
        "name must be shorter than or equal to 255 characters",
    ];

    fn movie() -> Category {
        Category::create(CategoryProps::new("Movie")).unwrap()
    }

    fn name_errors_from_value(value: Value) -> Vec<String> {
        match Category::create_from_value(value) {
            Err(DomainError::Validation(err)) => {
                assert_eq!(err.messages().len(), 1, "only name should fail");
                err.field_messages("name")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    // =========================================================================
    // create
    // =========================================================================

    #[test]
    fn test_create_with_default_values() {
        let before = Utc::now();
        let category = movie();

        assert!(is_valid_uuid(category.category_id().id()));
        assert_eq!(category.name(), "Movie");
        assert_eq!(category.description(), None);
        assert!(category.is_active());
        assert!(category.created_at() >= before && category.created_at() <= Utc::now());
    }

    #[test]
    fn test_create_with_all_values() {
        let created_at = Utc::now();
        let category_id = Uuid::generate();
        let category = Category::create(
            CategoryProps::new("Movie")
                .description("Movie description")
                .is_active(false)
                .category_id(category_id.clone())
                .created_at(created_at),
        )
        .unwrap();

        assert_eq!(category.category_id(), &category_id);
        assert_eq!(category.name(), "Movie");
        assert_eq!(category.description(), Some("Movie description"));
        assert!(!category.is_active());
        assert_eq!(category.created_at(), created_at);
    }

    #[test]
    fn test_create_with_generated_values() {
        for _ in 0..20 {
            let name: String = Word().fake();
            let description: String = Sentence(3..8).fake();

            let category =
                Category::create(CategoryProps::new(name.clone()).description(description.clone()))
                    .unwrap();

            assert_eq!(category.name(), name);
            assert_eq!(category.description(), Some(description.as_str()));
        }
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let err = Category::create(CategoryProps::new("")).unwrap_err();
        assert_eq!(err.field_messages("name"), vec!["name should not be empty"]);
        assert_eq!(err.messages().len(), 1);
    }

    #[test]
    fn test_create_rejects_name_longer_than_255_characters() {
        let err = Category::create(CategoryProps::new("a".repeat(256))).unwrap_err();
        assert_eq!(
            err.field_messages("name"),
            vec!["name must be shorter than or equal to 255 characters"]
        );

        assert!(Category::create(CategoryProps::new("a".repeat(255))).is_ok());
    }

    // =========================================================================
    // create_from_value
    // =========================================================================

    #[test]
    fn test_create_from_value_with_defaults() {
        let category = Category::create_from_value(json!({ "name": "Movie" })).unwrap();

        assert!(is_valid_uuid(category.category_id().id()));
        assert_eq!(category.name(), "Movie");
        assert_eq!(category.description(), None);
        assert!(category.is_active());
    }

    #[test]
    fn test_create_from_value_with_all_values() {
        let category = Category::create_from_value(json!({
            "category_id": "6db17410-eddd-42b4-8e2c-b99ba3a876a8",
            "name": "Movie",
            "description": "Movie description",
            "is_active": false,
            "created_at": "2024-01-15T10:30:00Z",
        }))
        .unwrap();

        assert_eq!(
            category.category_id().id(),
            "6db17410-eddd-42b4-8e2c-b99ba3a876a8"
        );
        assert_eq!(category.description(), Some("Movie description"));
        assert!(!category.is_active());
        assert_eq!(category.created_at().to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_create_from_value_null_category_id_is_generated() {
        for props in [
            json!({ "name": "Movie", "category_id": null }),
            json!({ "name": "Movie" }),
        ] {
            let category = Category::create_from_value(props).unwrap();
            assert!(is_valid_uuid(category.category_id().id()));
        }
    }

    #[test]
    fn test_create_from_value_null_is_active_defaults_to_true() {
        let category =
            Category::create_from_value(json!({ "name": "Movie", "is_active": null })).unwrap();
        assert!(category.is_active());
    }

    #[test]
    fn test_name_null_reports_three_violations() {
        assert_eq!(
            name_errors_from_value(json!({ "name": null })),
            NAME_VIOLATIONS
        );
    }

    #[test]
    fn test_name_absent_reports_three_violations() {
        assert_eq!(name_errors_from_value(json!({})), NAME_VIOLATIONS);
    }

    #[test]
    fn test_name_empty_reports_not_empty_only() {
        assert_eq!(
            name_errors_from_value(json!({ "name": "" })),
            vec!["name should not be empty"]
        );
    }

    #[test]
    fn test_name_not_a_string() {
        assert_eq!(
            name_errors_from_value(json!({ "name": 5 })),
            vec![
                "name must be a string",
                "name must be shorter than or equal to 255 characters",
            ]
        );
    }

    #[test]
    fn test_name_longer_than_255_characters() {
        assert_eq!(
            name_errors_from_value(json!({ "name": "a".repeat(256) })),
            vec!["name must be shorter than or equal to 255 characters"]
        );
    }

    #[test]
    fn test_description_not_a_string() {
        let Err(DomainError::Validation(err)) =
            Category::create_from_value(json!({ "name": "Movie", "description": 5 }))
        else {
            panic!("expected validation error");
        };
        assert_eq!(
            err.field_messages("description"),
            vec!["description must be a string"]
        );
        assert!(!err.has_field("name"));
    }

    #[test]
    fn test_is_active_not_a_boolean() {
        let Err(DomainError::Validation(err)) =
            Category::create_from_value(json!({ "name": "Movie", "is_active": 5 }))
        else {
            panic!("expected validation error");
        };
        assert_eq!(
            err.field_messages("is_active"),
            vec!["is_active must be a boolean value"]
        );
    }

    #[test]
    fn test_create_from_value_rejects_invalid_category_id() {
        for category_id in [json!(""), json!("invalid-uuid"), json!(5)] {
            let result =
                Category::create_from_value(json!({ "name": "Movie", "category_id": category_id }));
            assert!(matches!(result, Err(DomainError::InvalidUuid(_))));
        }
    }

    #[test]
    fn test_create_from_value_rejects_bad_input_shape() {
        assert!(matches!(
            Category::create_from_value(json!(["Movie"])),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            Category::create_from_value(json!({ "name": "Movie", "created_at": "yesterday" })),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            Category::create_from_value(json!({ "name": "Movie", "created_at": 1700000000 })),
            Err(DomainError::InvalidInput(_))
        ));
    }

    // =========================================================================
    // Methods
    // =========================================================================

    #[test]
    fn test_activate() {
        let mut category = Category::create(CategoryProps::new("Movie").is_active(false)).unwrap();
        assert!(!category.is_active());

        category.activate();
        assert!(category.is_active());
        category.activate();
        assert!(category.is_active());
    }

    #[test]
    fn test_deactivate() {
        let mut category = movie();
        assert!(category.is_active());

        category.deactivate();
        assert!(!category.is_active());
        category.deactivate();
        assert!(!category.is_active());
    }

    #[test]
    fn test_change_name() {
        let mut category = movie();

        category.change_name("Movie 2").unwrap();
        assert_eq!(category.name(), "Movie 2");
    }

    #[test]
    fn test_change_name_rejects_empty_name() {
        let mut category = movie();

        let err = category.change_name("").unwrap_err();
        assert_eq!(err.field_messages("name"), vec!["name should not be empty"]);
        // assigned before validation
        assert_eq!(category.name(), "");
    }

    #[test]
    fn test_change_name_rejects_long_name() {
        let mut category = movie();

        let err = category.change_name("a".repeat(256)).unwrap_err();
        assert_eq!(
            err.field_messages("name"),
            vec!["name must be shorter than or equal to 255 characters"]
        );
        assert_eq!(category.name().len(), 256);

        category.change_name("Movie").unwrap();
        assert_eq!(category.name(), "Movie");
    }

    #[test]
    fn test_change_description() {
        let mut category = movie();
        assert_eq!(category.description(), None);

        category
            .change_description(Some("Movie description".to_string()))
            .unwrap();
        assert_eq!(category.description(), Some("Movie description"));

        category.change_description(None).unwrap();
        assert_eq!(category.description(), None);
    }

    #[test]
    fn test_identity_survives_mutation() {
        let mut category = movie();
        let original = category.clone();
        let category_id = category.category_id().clone();
        let created_at = category.created_at();

        category.change_name("Documentary").unwrap();
        category
            .change_description(Some("Long form".to_string()))
            .unwrap();
        category.deactivate();

        assert_eq!(category.category_id(), &category_id);
        assert_eq!(category.created_at(), created_at);
        assert!(same_identity(&category, &original));
        assert!(!same_identity(&category, &movie()));
    }

    #[test]
    fn test_to_json() {
        let category = Category::create(
            CategoryProps::new("Movie")
                .description("Movie description")
                .is_active(false),
        )
        .unwrap();

        assert_eq!(
            category.to_json(),
            CategoryOutputDto {
                category_id: category.category_id().id().to_string(),
                name: "Movie".to_string(),
                description: Some("Movie description".to_string()),
                is_active: false,
                created_at: category.created_at(),
            }
        );

        let value = serde_json::to_value(category.to_json()).unwrap();
        assert_eq!(value["category_id"], json!(category.category_id().id()));
        assert_eq!(value["name"], json!("Movie"));
        assert_eq!(value["is_active"], json!(false));
    }

    #[test]
    fn test_to_json_through_entity_trait() {
        fn snapshot<E: Entity>(entity: &E) -> Value {
            serde_json::to_value(entity.to_json()).unwrap()
        }

        let category = movie();
        let value = snapshot(&category);
        assert_eq!(value["category_id"], json!(category.category_id().id()));
        assert_eq!(value["description"], Value::Null);
    }

    #[test]
    fn test_category_id_from_uuid_crate_must_be_valid() {
        assert!(Uuid::try_from(::uuid::Uuid::from_u128(1)).is_err());

        let category_id = Uuid::try_from(::uuid::Uuid::new_v4()).unwrap();
        let category =
            Category::create(CategoryProps::new("Movie").category_id(category_id)).unwrap();
        assert!(is_valid_uuid(category.category_id().id()));
    }

    #[test]
    fn test_field_rules_reported_before_id_and_timestamp_errors() {
        let Err(DomainError::Validation(err)) = Category::create_from_value(json!({
            "name": null,
            "category_id": "invalid-uuid",
            "created_at": "yesterday",
        })) else {
            panic!("expected validation error");
        };
        assert_eq!(err.field_messages("name"), NAME_VIOLATIONS);
    }

    // =========================================================================
    // Validation run count
    // =========================================================================

    fn validations_during(f: impl FnOnce()) -> usize {
        let before = crate::features::categories::validator::validate_calls();
        f();
        crate::features::categories::validator::validate_calls() - before
    }

    #[test]
    fn test_create_validates_once() {
        assert_eq!(validations_during(|| drop(movie())), 1);
        assert_eq!(
            validations_during(|| {
                let _ = Category::create(CategoryProps::new(""));
            }),
            1
        );
    }

    #[test]
    fn test_create_from_value_validates_once() {
        assert_eq!(
            validations_during(|| {
                Category::create_from_value(json!({ "name": "Movie" })).unwrap();
            }),
            1
        );
        assert_eq!(
            validations_during(|| {
                let _ = Category::create_from_value(json!({ "name": null }));
            }),
            1
        );
    }

    #[test]
    fn test_mutations_validate_once() {
        let mut category = movie();

        assert_eq!(
            validations_during(|| category.change_name("Movie 2").unwrap()),
            1
        );
        assert_eq!(
            validations_during(|| {
                let _ = category.change_name("");
            }),
            1
        );
        assert_eq!(
            validations_during(|| {
                category
                    .change_description(Some("Movie description".to_string()))
                    .unwrap()
            }),
            1
        );
    }

    #[test]
    fn test_activate_and_deactivate_skip_validation() {
        let mut category = movie();

        assert_eq!(
            validations_during(|| {
                category.deactivate();
                category.activate();
                category.activate();
            }),
            0
        );
    }
}
