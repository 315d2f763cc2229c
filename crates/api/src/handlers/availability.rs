//! Handlers for the availability calendar and administrative blocks.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use casabook_core::dates::StayRange;
use casabook_core::error::CoreError;
use casabook_core::status::BlockedReason;
use casabook_core::types::{Date, DbId, Money};
use casabook_db::repositories::{AvailabilityRepo, PropertyRepo};

use crate::auth::Principal;
use crate::engine::blocks::{self, BlockRequest, UnblockRequest};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query string of `GET /availability`.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub property_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
}

/// One calendar day as shown to callers. Dates without a stored record
/// are synthesized as available at the property defaults.
#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: Date,
    pub is_available: bool,
    pub blocked_reason: Option<&'static str>,
    /// Effective nightly price: the override when set, else the
    /// property base price.
    pub price: Money,
    pub minimum_stay: i32,
}

/// Outcome of a block/unblock call.
#[derive(Debug, Serialize)]
pub struct BlockOutcome {
    /// Number of dates written (block) or released (unblock).
    pub dates: u64,
}

/// GET /api/v1/availability?property_id=&start_date=&end_date=
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<DataResponse<Vec<CalendarDay>>>> {
    // Display queries may look at the past; only ordering is enforced.
    let range = StayRange::new(query.start_date, query.end_date)?;

    let property = PropertyRepo::find_by_id(&state.pool, query.property_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id: query.property_id,
        }))?;

    let records = AvailabilityRepo::list_range(&state.pool, property.id, &range).await?;
    let mut by_date = records
        .into_iter()
        .map(|record| (record.date, record))
        .collect::<std::collections::HashMap<_, _>>();

    let days = range
        .days()
        .map(|date| match by_date.remove(&date) {
            Some(record) => CalendarDay {
                date,
                is_available: record.is_available,
                blocked_reason: record
                    .blocked_reason_id
                    .and_then(BlockedReason::try_from_id)
                    .map(BlockedReason::label),
                price: record.price_override.unwrap_or(property.base_price),
                minimum_stay: record.minimum_stay.unwrap_or(property.default_minimum_stay),
            },
            None => CalendarDay {
                date,
                is_available: true,
                blocked_reason: None,
                price: property.base_price,
                minimum_stay: property.default_minimum_stay,
            },
        })
        .collect();

    Ok(Json(DataResponse { data: days }))
}

/// POST /api/v1/availability/block
pub async fn block(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<BlockRequest>,
) -> AppResult<Json<DataResponse<BlockOutcome>>> {
    let dates = blocks::block(&state, &principal, input).await?;
    Ok(Json(DataResponse {
        data: BlockOutcome { dates },
    }))
}

/// DELETE /api/v1/availability/block
pub async fn unblock(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<UnblockRequest>,
) -> AppResult<Json<DataResponse<BlockOutcome>>> {
    let dates = blocks::unblock(&state, &principal, input).await?;
    Ok(Json(DataResponse {
        data: BlockOutcome { dates },
    }))
}
