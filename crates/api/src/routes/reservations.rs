//! Route definitions for the `/reservations` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::reservation;
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(reservation::create))
        .route("/reservations/{id}", get(reservation::get_by_id))
        .route("/reservations/{id}/status", patch(reservation::change_status))
        .route(
            "/reservations/{id}/payment",
            patch(reservation::change_payment_status),
        )
        .route(
            "/properties/{property_id}/reservations",
            get(reservation::list_by_property),
        )
}
