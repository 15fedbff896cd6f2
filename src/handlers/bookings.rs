use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::errors::{AppError, ValidationErrors};
use crate::models::{Booking, BookingSubmission, Classification};
use crate::services::intake;
use crate::services::listing::{self, ListQuery};
use crate::state::AppState;

// POST /api/bookings
#[derive(Serialize)]
pub struct CreateBookingResponse {
    id: String,
    ok: bool,
    auto_reply: String,
    whatsapp_link: String,
    classification: Classification,
    priority: bool,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookingSubmission>, JsonRejection>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| malformed("body", rejection.body_text()))?;
    let receipt = intake::submit_booking(
        state.store.as_ref(),
        state.config.whatsapp_contact(),
        payload,
    )
    .await?;

    Ok(Json(CreateBookingResponse {
        id: receipt.id,
        ok: true,
        auto_reply: receipt.auto_reply,
        whatsapp_link: receipt.whatsapp_link,
        classification: receipt.classification,
        priority: receipt.priority,
    }))
}

// GET /api/bookings
#[derive(Serialize)]
pub struct BookingsResponse {
    items: Vec<Booking>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<BookingsResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| malformed("query", rejection.body_text()))?;
    let items = listing::list_bookings(state.store.as_ref(), query).await?;
    Ok(Json(BookingsResponse { items }))
}

/// Requests the extractors could not decode at all are reported in the same
/// shape as field-level validation failures.
fn malformed(field: &'static str, message: String) -> AppError {
    let mut errors = ValidationErrors::default();
    errors.push(field, message);
    AppError::Validation(errors)
}
