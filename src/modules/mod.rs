pub mod availability;
pub mod bookings;
pub mod dashboard;
pub mod providers;
pub mod services;
