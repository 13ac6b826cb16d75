mod delivery_status;

pub use delivery_status::DeliveryStatus;
