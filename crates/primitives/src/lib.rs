#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![no_std]

extern crate alloc;

pub mod kinds;
pub mod message;
pub mod metadata;
pub mod params;

/// The prelude exports common types and traits.
pub mod prelude {
    pub use crate::{
        kinds::{L1MessageKind, L2MessageKind},
        message::{L1IncomingMessage, L1IncomingMessageHeader, MessageDecodingError},
        metadata::MessageWithMetadata,
        params::{
            BATCH_HEADER_LEN, MAX_DECOMPRESSED_BATCH_SIZE, MAX_L2_MESSAGE_SIZE, SEQUENCER_ADDRESS,
        },
    };
}
