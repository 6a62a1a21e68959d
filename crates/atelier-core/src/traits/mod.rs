pub mod blob;
pub mod key_value;
pub mod storage;

pub use blob::IBlobStorage;
pub use key_value::{IKeyValueStore, MemoryKeyValueStore};
pub use storage::{
    ICatalogStorage, ICustomOrderStorage, IOrderStorage, IStockRequestStorage, IStorefrontStorage,
};
