use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::cart::models::{Cart, CartProduct};

/// Upper bound for a single add-to-cart request
pub const MAX_ADD_AMOUNT: i32 = 10_000;

/// Upper bound for the accumulated amount of one cart line
pub const MAX_LINE_AMOUNT: i32 = 1_000_000;

fn default_amount() -> i32 {
    1
}

/// Request DTO for adding a product to the active cart
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddCartProductDto {
    pub product_id: Uuid,

    /// Quantity to add on top of what is already in the cart (default: 1)
    #[serde(default = "default_amount")]
    #[validate(range(min = 1, max = MAX_ADD_AMOUNT, message = "amount must be between 1 and 10000"))]
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartProductResponseDto {
    pub id: Uuid,
    pub amount: i32,
    pub product_id: Uuid,
    pub cart_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CartProduct> for CartProductResponseDto {
    fn from(item: CartProduct) -> Self {
        Self {
            id: item.id,
            amount: item.amount,
            product_id: item.product_id,
            cart_id: item.cart_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartResponseDto {
    pub id: Uuid,
    pub user_id: String,
    pub is_purchase: bool,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartProductResponseDto>,
}

impl CartResponseDto {
    pub fn new(cart: Cart, items: Vec<CartProduct>) -> Self {
        Self {
            id: cart.id,
            user_id: cart.user_id,
            is_purchase: cart.is_purchase,
            created_at: cart.created_at,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_defaults_to_one() {
        let dto: AddCartProductDto =
            serde_json::from_value(json!({ "product_id": Uuid::new_v4() })).unwrap();
        assert_eq!(dto.amount, 1);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_amount_must_be_positive() {
        for amount in [0, -3] {
            let dto: AddCartProductDto = serde_json::from_value(json!({
                "product_id": Uuid::new_v4(),
                "amount": amount,
            }))
            .unwrap();
            let err = dto.validate().unwrap_err();
            assert!(err.field_errors().contains_key("amount"));
        }
    }

    #[test]
    fn test_amount_upper_bound() {
        let dto = AddCartProductDto {
            product_id: Uuid::new_v4(),
            amount: MAX_ADD_AMOUNT,
        };
        assert!(dto.validate().is_ok());

        let dto = AddCartProductDto {
            product_id: Uuid::new_v4(),
            amount: MAX_ADD_AMOUNT + 1,
        };
        assert!(dto.validate().is_err());
    }
}
