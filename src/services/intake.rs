use serde::Serialize;

use crate::db::BookingStore;
use crate::errors::AppError;
use crate::models::{BookingRecord, BookingSubmission, Classification};
use crate::services::classifier::classify;
use crate::services::confirmation::build_confirmation;

#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub id: String,
    pub classification: Classification,
    pub priority: bool,
    pub auto_reply: String,
    pub whatsapp_link: String,
}

/// Validates, classifies and stores one submission, then builds the
/// confirmation message for it.
///
/// A single store attempt is made. Duplicate submissions produce duplicate
/// records.
pub async fn submit_booking(
    store: &dyn BookingStore,
    contact: &str,
    submission: BookingSubmission,
) -> Result<BookingReceipt, AppError> {
    let booking = submission.validate()?;

    let (classification, priority) = classify(
        booking.service_requested.as_str(),
        booking.device_type.as_str(),
        booking.pickup_or_dropoff.as_str(),
    );

    let record = BookingRecord {
        booking,
        classification,
        priority,
    };
    let id = store.insert(&record).await.map_err(AppError::Store)?;

    tracing::info!(
        booking_id = %id,
        classification = classification.as_str(),
        priority,
        "booking stored"
    );

    let b = &record.booking;
    let confirmation = build_confirmation(
        &b.full_name,
        b.device_type.as_str(),
        b.brand_model.as_deref(),
        b.service_requested.as_str(),
        contact,
    );

    Ok(BookingReceipt {
        id,
        classification,
        priority,
        auto_reply: confirmation.auto_reply,
        whatsapp_link: confirmation.whatsapp_link,
    })
}
