//! Collection cache backends

mod memory;
mod redis_cache;

pub use memory::InMemoryCollectionCache;
pub use redis_cache::RedisCollectionCache;
