mod delivery_status_dto;

pub use delivery_status_dto::*;
