use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::shop_addresses::models::ShopAddress;
use crate::shared::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ShopAddressRequestDto {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShopAddressResponseDto {
    pub id: Uuid,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShopAddress> for ShopAddressResponseDto {
    fn from(s: ShopAddress) -> Self {
        Self {
            id: s.id,
            address: s.address,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
