pub mod booking;
pub mod contact;
pub mod validation;

pub use booking::{Booking, BookingForm, NewBooking, PaymentStatus};
pub use contact::{ContactForm, ContactSubmission};
pub use validation::ValidationFailure;
