use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Assigned by storage, never reused
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Lamp")]
    pub title: String,
    #[schema(example = "https://shop.example.com/lamp")]
    pub url: String,
    #[schema(example = "A desk lamp with a warm bulb")]
    pub description: String,
    #[schema(example = 10)]
    pub amount: i32,
}

/// Payload for creating an item
///
/// Every field is required; a missing or mistyped field is rejected before
/// validation runs. Whether `amount` may be negative is decided by
/// [`ItemPolicy`](crate::ItemPolicy).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "title must not be empty"))]
    #[schema(example = "Lamp")]
    pub title: String,

    #[validate(url(message = "url must be a valid absolute URL"))]
    #[schema(example = "https://shop.example.com/lamp")]
    pub url: String,

    #[validate(length(min = 1, message = "description must not be empty"))]
    #[schema(example = "A desk lamp with a warm bulb")]
    pub description: String,

    #[schema(example = 10)]
    pub amount: i32,
}

/// Row to insert, after validation and policy have been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    /// Value the unique index is built on
    pub title_key: String,
    pub url: String,
    pub description: String,
    pub amount: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateItem {
        CreateItem {
            title: "Lamp".to_string(),
            url: "https://x.test".to_string(),
            description: "A lamp".to_string(),
            amount: 10,
        }
    }

    #[test]
    fn test_valid_payload() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_empty_strings_are_rejected() {
        let input = CreateItem {
            title: String::new(),
            description: String::new(),
            ..valid()
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
        assert!(!fields.contains_key("url"));
    }

    #[test]
    fn test_url_must_parse() {
        for url in ["not a url", "x.test", ""] {
            let input = CreateItem {
                url: url.to_string(),
                ..valid()
            };
            assert!(input.validate().is_err(), "{url:?} should be rejected");
        }
    }

    #[test]
    fn test_missing_field_fails_deserialization() {
        let result = serde_json::from_str::<CreateItem>(
            r#"{"title":"Lamp","url":"https://x.test","description":"A lamp"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_amount_fails_deserialization() {
        let result = serde_json::from_str::<CreateItem>(
            r#"{"title":"Lamp","url":"https://x.test","description":"A lamp","amount":"ten"}"#,
        );
        assert!(result.is_err());
    }
}
