//! Booking command and query handlers.

mod cancel_booking;
mod confirm_notify_bookings;
mod create_booking;
mod get_booking_details;
mod list_bookings;
mod process_bookings;

pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler};
pub use confirm_notify_bookings::{
    ConfirmNotifyBookingsCommand, ConfirmNotifyBookingsHandler, ReminderSummary,
};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler};
pub use get_booking_details::{
    BookingDetailsView, GetBookingDetailsHandler, GetBookingDetailsQuery,
};
pub use list_bookings::{ListBookingsHandler, ListBookingsQuery, ListPendingBookingsQuery};
pub use process_bookings::{
    ProcessBookingsCommand, ProcessBookingsHandler, ProcessBookingsSummary,
};
