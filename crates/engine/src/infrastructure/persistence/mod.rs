//! Store adapters behind the persistence ports.

pub mod json_store;
pub mod memory;

pub use json_store::JsonFileStores;
pub use memory::{MemoryStores, DEFAULT_SCREEN_TIME_GOAL_HOURS};
