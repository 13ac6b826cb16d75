mod delivery_status_service;

pub use delivery_status_service::DeliveryStatusService;
