//! Delivery mode rules shared by order placement and order edits.
//!
//! `delivery_type = true` means pickup at a shop address, `false` means home
//! delivery. Exactly one of `shop_address_id` and `delivery_address` is set,
//! matching the mode. A blank address counts as absent.

use uuid::Uuid;
use validator::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    Pickup,
    Home,
}

impl From<bool> for DeliveryMode {
    fn from(delivery_type: bool) -> Self {
        if delivery_type {
            DeliveryMode::Pickup
        } else {
            DeliveryMode::Home
        }
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Trimmed address, or `None` when missing or blank
pub fn normalize_address(address: Option<&str>) -> Option<&str> {
    address.map(str::trim).filter(|a| !a.is_empty())
}

pub fn check_delivery(
    delivery_type: bool,
    delivery_address: Option<&str>,
    shop_address_id: Option<Uuid>,
) -> Result<(), ValidationError> {
    let address = normalize_address(delivery_address);

    match DeliveryMode::from(delivery_type) {
        DeliveryMode::Pickup => {
            if address.is_some() {
                return Err(violation(
                    "pickup_with_address",
                    "delivery_address must be null if delivery_type is true",
                ));
            }
            if shop_address_id.is_none() {
                return Err(violation(
                    "pickup_without_shop",
                    "shop_address_id can't be null if delivery_type is true",
                ));
            }
        }
        DeliveryMode::Home => {
            if address.is_none() {
                return Err(violation(
                    "home_without_address",
                    "delivery_address can't be null if delivery_type is false",
                ));
            }
            if shop_address_id.is_some() {
                return Err(violation(
                    "home_with_shop",
                    "shop_address_id must be null if delivery_type is false",
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: ValidationError) -> String {
        err.message.map(|m| m.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_pickup_requires_shop_and_no_address() {
        let shop = Some(Uuid::new_v4());

        assert!(check_delivery(true, None, shop).is_ok());

        let err = check_delivery(true, Some("Main st. 1"), shop).unwrap_err();
        assert_eq!(
            message(err),
            "delivery_address must be null if delivery_type is true"
        );

        let err = check_delivery(true, None, None).unwrap_err();
        assert_eq!(err.code, "pickup_without_shop");
    }

    #[test]
    fn test_home_requires_address_and_no_shop() {
        assert!(check_delivery(false, Some("Main st. 1"), None).is_ok());

        let err = check_delivery(false, None, None).unwrap_err();
        assert_eq!(
            message(err),
            "delivery_address can't be null if delivery_type is false"
        );

        let err = check_delivery(false, Some("Main st. 1"), Some(Uuid::new_v4())).unwrap_err();
        assert_eq!(err.code, "home_with_shop");
    }

    #[test]
    fn test_blank_address_counts_as_absent() {
        assert!(check_delivery(true, Some("   "), Some(Uuid::new_v4())).is_ok());
        assert!(check_delivery(false, Some(""), None).is_err());
        assert_eq!(normalize_address(Some("  Main st. 1 ")), Some("Main st. 1"));
    }
}
