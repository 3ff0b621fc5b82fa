use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_booking, get_booking, list_booker_bookings, list_owner_bookings,
    update_status,
};

/// Creates the API router with all booking endpoints
///
/// Command endpoints (Write operations):
/// - POST /bookings - Create a new booking
/// - PATCH /bookings/:id?approved= - Approve or reject a booking
///
/// Query endpoints (Read operations):
/// - GET /bookings/:id - Get booking details
/// - GET /bookings - List bookings for the requesting booker
/// - GET /bookings/owner - List bookings on the requester's items
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Booking endpoints
        .route("/bookings", post(create_booking).get(list_booker_bookings))
        .route("/bookings/owner", get(list_owner_bookings))
        .route("/bookings/:id", patch(update_status).get(get_booking))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
