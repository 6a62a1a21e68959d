pub mod admin_auth;
pub mod logging;

pub use admin_auth::AdminAuth;
pub use logging::LoggingMiddleware;
