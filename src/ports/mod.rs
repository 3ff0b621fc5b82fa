pub mod booking_store;
pub mod item_service;
pub mod user_service;

pub use booking_store::*;
pub use item_service::*;
pub use user_service::*;
