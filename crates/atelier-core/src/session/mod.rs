//! Admin sessions.
//!
//! Two layers: a device-local flag with an expiry (`AdminSession`) for the
//! client shell, and a server-signed token (`SessionSigner`) that the admin
//! API checks on every request.

mod admin_session;
mod token;

pub use admin_session::{
    AdminSession, AUTHENTICATED_KEY, AUTH_EXPIRY_KEY, AUTH_TOKEN_KEY, SESSION_DURATION_MS,
};
pub use token::{verify_password, IssuedToken, SessionSigner, TokenError};
