use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::delivery_statuses::models::DeliveryStatus;
use crate::shared::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeliveryStatusRequestDto {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliveryStatusResponseDto {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DeliveryStatus> for DeliveryStatusResponseDto {
    fn from(s: DeliveryStatus) -> Self {
        Self {
            id: s.id,
            name: s.name,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
