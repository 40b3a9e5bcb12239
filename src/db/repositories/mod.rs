mod availability_repository;
mod booking_repository;
mod service_repository;
mod user_repository;

pub use availability_repository::AvailabilityRepository;
pub use booking_repository::BookingRepository;
pub use service_repository::ServiceRepository;
pub use user_repository::UserRepository;
