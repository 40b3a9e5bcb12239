mod availability;
mod booking;
mod service;
mod user;

pub use availability::*;
pub use booking::*;
pub use service::*;
pub use user::*;
