pub mod availability;
pub mod health;
pub mod reservations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST   /reservations                          create
/// GET    /reservations/{id}                     get_by_id
/// PATCH  /reservations/{id}/status              change_status
/// PATCH  /reservations/{id}/payment             change_payment_status
/// GET    /properties/{property_id}/reservations list_by_property
///
/// GET    /availability                          per-date calendar
/// POST   /availability/block                    block range
/// DELETE /availability/block                    unblock range
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(reservations::router())
        .merge(availability::router())
}
