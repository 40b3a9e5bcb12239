pub mod auth;
pub mod tracing;

pub use auth::AuthUser;
