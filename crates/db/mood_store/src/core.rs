pub mod error;
pub mod memory;
pub mod model;
pub mod redis_store;
pub mod store;

// Re-export commonly used types
pub use error::{ParseError, StoreError};
pub use memory::InMemoryMoodStore;
pub use model::*;
pub use redis_store::{RedisMoodStore, RedisStoreConfig};
pub use store::{store_key, MoodStore};
