#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(test, feature = "test-utils")), warn(unused_crate_dependencies))]

/// Re-export commonly used types and traits.
pub mod prelude {
    pub use crate::{
        batch::{BatchHeader, SegmentKind, SequencerBatch},
        cursor::{ResolvedSegment, SegmentCursor},
        errors::{BatchDecodingError, InboxError},
        interpreter::{Resolution, SegmentInterpreter},
        multiplexer::InboxMultiplexer,
        sources::{MemoryBackendError, MemoryInboxBackend},
        traits::{DelayedMessageParser, InboxBackend, L1MessageParser, MessageMultiplexer},
    };
    pub use arb_primitives::prelude::*;
}

pub mod batch;
pub mod compression;
pub mod cursor;
pub mod errors;
pub mod interpreter;
pub mod multiplexer;
pub mod sources;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod macros;
