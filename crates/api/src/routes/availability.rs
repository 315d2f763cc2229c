//! Route definitions for the availability calendar and blocks.

use axum::routing::get;
use axum::Router;

use crate::handlers::availability;
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/availability", get(availability::get_calendar))
        .route(
            "/availability/block",
            axum::routing::post(availability::block).delete(availability::unblock),
        )
}
