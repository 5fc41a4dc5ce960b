//! Key-value storage abstractions.
//!
//! The client keeps two stores: a durable one that survives restarts and a
//! per-run session cache. Both implement [`kv_store::KvStore`]; the durable
//! implementation lives in fitcoach-infra.

pub mod kv_store;
pub mod memory;

pub use kv_store::{KvStore, get_json, set_json};
pub use memory::MemoryKvStore;
