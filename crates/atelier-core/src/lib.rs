//! # atelier-core
//!
//! Domain layer of the Atelier storefront: catalog, order, custom-order and
//! stock-request models, their status state machines, the device-local cart
//! and admin session, configuration, errors, and the storage traits that
//! `atelier-storage` implements. `services::Storefront` ties them together.

pub mod cart;
pub mod config;
pub mod errors;
pub mod models;
pub mod reporting;
pub mod services;
pub mod session;
pub mod telemetry;
pub mod tracking;
pub mod traits;
pub mod workflow;

pub use config::StorefrontConfig;
pub use errors::{StorefrontError, StorefrontResult};
pub use services::Storefront;
