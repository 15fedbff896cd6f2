pub mod booking;
pub mod submission;

pub use booking::{
    Booking, BookingFilter, BookingRecord, Classification, DeviceType, Logistics, NewBooking, PreferredTime,
    ServiceRequested,
};
pub use submission::BookingSubmission;
