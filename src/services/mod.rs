// Service exports
pub mod cache;
pub mod postgres;
pub mod shelter;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use postgres::{RequestStats, RequestStore, RequestStoreError};
pub use shelter::{RegistryClient, RegistryError};
