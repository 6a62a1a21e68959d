//! Storage traits: the contract between storefront workflows and the
//! persistence backend. The SQLite implementation lives in
//! `atelier-storage`; `test_helpers` has an in-memory one. All traits are
//! object-safe, `Send + Sync`, and have blanket `Arc<T>` impls.

pub mod catalog;
pub mod custom_orders;
pub mod orders;
pub mod stock_requests;
pub mod test_helpers;

pub use catalog::{ICatalogStorage, ProductFilter};
pub use custom_orders::{CustomOrderFilter, ICustomOrderStorage};
pub use orders::{IOrderStorage, OrderFilter};
pub use stock_requests::IStockRequestStorage;

/// Everything the storefront needs from one backend.
pub trait IStorefrontStorage:
    ICatalogStorage + IOrderStorage + ICustomOrderStorage + IStockRequestStorage
{
}

impl<T> IStorefrontStorage for T where
    T: ICatalogStorage + IOrderStorage + ICustomOrderStorage + IStockRequestStorage + ?Sized
{
}
