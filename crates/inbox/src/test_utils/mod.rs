//! Test utilities for `arb-inbox`.

mod backend;
pub use backend::{TestBackendError, TestInboxBackend};

mod segments;
pub use segments::{
    advance_block_segment, advance_timestamp_segment, batch_bytes, brotli_l2_segment,
    delayed_segment, l2_segment,
};

mod tracing;
pub use tracing::{CollectingLayer, TraceStorage};
