//! Implementations of the [InboxBackend] trait.
//!
//! [InboxBackend]: crate::traits::InboxBackend

mod memory;
pub use memory::{MemoryBackendError, MemoryInboxBackend};
