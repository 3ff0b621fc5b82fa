mod availability;
mod booking_queries;
mod booking_service;
mod comment_eligibility;
mod errors;

pub use availability::{last_booking, next_booking};
pub use booking_queries::{list_for_booker, list_for_owner};
pub use booking_service::{ServiceDependencies, create_booking, get_booking, update_status};
pub use comment_eligibility::ensure_may_comment;
pub use errors::{BookingApplicationError, Result};
