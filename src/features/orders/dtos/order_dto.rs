use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::orders::delivery::check_delivery;
use crate::features::orders::models::Order;
use crate::shared::validation::PHONE_REGEX;

/// Request DTO for placing an order from the active cart
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_delivery"))]
pub struct CreateOrderDto {
    /// `true` for pickup at `shop_address_id`, `false` for home delivery
    pub delivery_type: bool,

    #[validate(length(max = 150))]
    pub delivery_address: Option<String>,

    #[validate(regex(
        path = *PHONE_REGEX,
        message = "Phone number must be entered in the format: +375299999999 or 80299999999"
    ))]
    pub delivery_phone_number: Option<String>,

    pub shop_address_id: Option<Uuid>,
}

fn validate_create_delivery(dto: &CreateOrderDto) -> Result<(), ValidationError> {
    check_delivery(
        dto.delivery_type,
        dto.delivery_address.as_deref(),
        dto.shop_address_id,
    )
}

/// Request DTO for editing an order.
///
/// Delivery fields are replaced as a whole. `delivery_status_id` is only
/// accepted from admins and is left unchanged when omitted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_delivery"))]
pub struct UpdateOrderDto {
    pub delivery_type: bool,

    #[validate(length(max = 150))]
    pub delivery_address: Option<String>,

    #[validate(regex(
        path = *PHONE_REGEX,
        message = "Phone number must be entered in the format: +375299999999 or 80299999999"
    ))]
    pub delivery_phone_number: Option<String>,

    pub shop_address_id: Option<Uuid>,

    pub delivery_status_id: Option<Uuid>,
}

fn validate_update_delivery(dto: &UpdateOrderDto) -> Result<(), ValidationError> {
    check_delivery(
        dto.delivery_type,
        dto.delivery_address.as_deref(),
        dto.shop_address_id,
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponseDto {
    pub id: Uuid,
    pub delivery_address: Option<String>,
    pub delivery_type: bool,
    pub delivery_phone_number: Option<String>,
    pub date: DateTime<Utc>,
    pub cart_id: Uuid,
    pub user_id: String,
    pub shop_address_id: Option<Uuid>,
    pub delivery_status_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponseDto {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            delivery_address: o.delivery_address,
            delivery_type: o.delivery_type,
            delivery_phone_number: o.delivery_phone_number,
            date: o.date,
            cart_id: o.cart_id,
            user_id: o.user_id,
            shop_address_id: o.shop_address_id,
            delivery_status_id: o.delivery_status_id,
            updated_at: o.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::PHONE_FORMAT_MESSAGE;
    use serde_json::json;

    fn pickup_with_phone(phone: &str) -> CreateOrderDto {
        serde_json::from_value(json!({
            "delivery_type": true,
            "shop_address_id": Uuid::new_v4(),
            "delivery_phone_number": phone,
        }))
        .unwrap()
    }

    #[test]
    fn test_phone_formats() {
        assert!(pickup_with_phone("+375291234567").validate().is_ok());
        assert!(pickup_with_phone("80291234567").validate().is_ok());

        let errors = pickup_with_phone("123456").validate().unwrap_err();
        let fields = errors.field_errors();
        let phone_errors = fields["delivery_phone_number"];
        assert_eq!(
            phone_errors[0].message.as_deref(),
            Some(PHONE_FORMAT_MESSAGE)
        );
    }

    #[test]
    fn test_phone_is_optional() {
        let dto: CreateOrderDto = serde_json::from_value(json!({
            "delivery_type": false,
            "delivery_address": "Main st. 1",
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_delivery_type_is_required() {
        let result = serde_json::from_value::<CreateOrderDto>(json!({
            "shop_address_id": Uuid::new_v4(),
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<UpdateOrderDto>(json!({
            "delivery_address": "Main st. 1",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_pickup_with_address_names_the_rule() {
        let dto: CreateOrderDto = serde_json::from_value(json!({
            "delivery_type": true,
            "delivery_address": "Main st. 1",
            "shop_address_id": Uuid::new_v4(),
        }))
        .unwrap();

        let errors = dto.validate().unwrap_err();
        assert!(errors
            .to_string()
            .contains("delivery_address must be null if delivery_type is true"));
    }

    #[test]
    fn test_update_reruns_delivery_rules() {
        let dto: UpdateOrderDto = serde_json::from_value(json!({
            "delivery_type": false,
            "delivery_address": "Main st. 1",
            "shop_address_id": Uuid::new_v4(),
        }))
        .unwrap();
        assert!(dto.validate().is_err());

        let dto: UpdateOrderDto = serde_json::from_value(json!({
            "delivery_type": false,
            "delivery_address": "Main st. 1",
            "delivery_status_id": Uuid::new_v4(),
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
    }
}
