//! Session persistence
//!
//! Handles storage of the session record:
//! - Field-wise decoding with defaults for missing or malformed data
//! - File-backed store with atomic replacement
//! - In-memory store

mod codec;
mod store;

pub use codec::{decode_state, encode_state};
pub use store::{FileStateStore, MemoryStateStore, StateStore, StoreError};
