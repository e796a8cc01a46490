pub mod bookings;
pub mod estimates;
