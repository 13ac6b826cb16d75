use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub delivery_address: Option<String>,
    /// `true` for pickup at a shop address
    pub delivery_type: bool,
    pub delivery_phone_number: Option<String>,
    pub date: DateTime<Utc>,
    pub cart_id: Uuid,
    pub user_id: String,
    pub shop_address_id: Option<Uuid>,
    pub delivery_status_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}
