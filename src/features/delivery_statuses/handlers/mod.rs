mod delivery_status_handler;

pub use delivery_status_handler::*;
