use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::products::models::Product;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::validation::{validate_not_blank, validate_price};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query params for listing products
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProductQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Only products of this category
    pub category_id: Option<Uuid>,
}

impl ProductQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Request DTO for creating or replacing a product
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductRequestDto {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub name: String,

    /// Decimal with at most two fractional digits, e.g. "1299.90"
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "1299.90")]
    pub price: Decimal,

    /// Path or URL of the product photo
    #[validate(length(max = 255))]
    pub photo: Option<String>,

    #[serde(default)]
    pub description: String,

    pub category_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "1299.90")]
    pub price: Decimal,
    pub photo: Option<String>,
    pub description: String,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            photo: p.photo,
            description: p.description,
            category_id: p.category_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ProductRequestDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_price_accepts_string_and_number() {
        let category_id = Uuid::new_v4();
        let from_string = parse(json!({
            "name": "Phone X",
            "price": "199.99",
            "category_id": category_id,
        }));
        let from_number = parse(json!({
            "name": "Phone X",
            "price": 199.99,
            "category_id": category_id,
        }));

        assert_eq!(from_string.price, from_number.price);
        assert!(from_string.validate().is_ok());
        assert_eq!(from_string.description, "");
        assert!(from_string.photo.is_none());
    }

    #[test]
    fn test_invalid_product_fields() {
        let dto = parse(json!({
            "name": "Phone X",
            "price": "-5",
            "category_id": Uuid::new_v4(),
        }));
        let err = dto.validate().unwrap_err();
        assert!(err.field_errors().contains_key("price"));

        let dto = parse(json!({
            "name": "",
            "price": "5.00",
            "category_id": Uuid::new_v4(),
        }));
        let err = dto.validate().unwrap_err();
        assert!(err.field_errors().contains_key("name"));
    }

    #[test]
    fn test_query_params_pagination() {
        let params = ProductQueryParams {
            page: 2,
            page_size: 500,
            category_id: None,
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
        assert_eq!(params.offset(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_query_params_huge_page_does_not_overflow() {
        let params = ProductQueryParams {
            page: i64::MAX,
            page_size: 10,
            category_id: None,
        };
        assert_eq!(params.offset(), i64::MAX);
    }
}
