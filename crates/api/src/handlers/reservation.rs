//! Handlers for the `/reservations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use casabook_core::error::CoreError;
use casabook_core::types::DbId;
use casabook_db::models::reservation::Reservation;
use casabook_db::repositories::ReservationRepo;

use crate::auth::Principal;
use crate::engine::booking::{
    self, CreateReservationRequest, PaymentStatusRequest, StatusChangeRequest,
};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/reservations
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Reservation>>)> {
    let reservation = booking::create_reservation(&state, &principal, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}

/// GET /api/v1/reservations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Reservation>>> {
    let reservation = ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id,
        }))?;
    Ok(Json(DataResponse { data: reservation }))
}

/// GET /api/v1/properties/{property_id}/reservations
pub async fn list_by_property(
    State(state): State<AppState>,
    Path(property_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Reservation>>>> {
    let reservations = ReservationRepo::list_by_property(&state.pool, property_id).await?;
    Ok(Json(DataResponse { data: reservations }))
}

/// PATCH /api/v1/reservations/{id}/payment
pub async fn change_payment_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<PaymentStatusRequest>,
) -> AppResult<Json<DataResponse<Reservation>>> {
    let reservation = booking::change_payment_status(&state, &principal, id, input).await?;
    Ok(Json(DataResponse { data: reservation }))
}

/// PATCH /api/v1/reservations/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<StatusChangeRequest>,
) -> AppResult<Json<DataResponse<Reservation>>> {
    let reservation = booking::change_status(&state, &principal, id, input).await?;
    Ok(Json(DataResponse { data: reservation }))
}
