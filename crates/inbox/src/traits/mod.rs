//! This module contains the traits at the seams of the inbox: the [InboxBackend] it reads from,
//! the [DelayedMessageParser] it decodes delayed messages with, and the [MessageMultiplexer] it
//! exposes.

mod backend;
pub use backend::InboxBackend;

mod parser;
pub use parser::{DelayedMessageParser, L1MessageParser};

mod multiplexer;
pub use multiplexer::MessageMultiplexer;
