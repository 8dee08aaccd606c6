//! Contains the [Fixture] type, the on-disk contents of both inboxes.

use alloy_primitives::Bytes;
use anyhow::{anyhow, Result};
use arb_inbox::sources::MemoryInboxBackend;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The raw contents of the sequencer inbox and the delayed inbox, with the position to resume
/// from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Fixture {
    /// The posted sequencer batches, in order.
    pub(crate) batches: Vec<Bytes>,
    /// The delayed messages in their standard encoding, by sequence number.
    #[serde(default)]
    pub(crate) delayed_messages: Vec<Bytes>,
    /// The sequencer batch to start from.
    #[serde(default)]
    pub(crate) batch_index: u64,
    /// The submessage within the starting batch to start from.
    #[serde(default)]
    pub(crate) submessage_index: u64,
    /// The number of delayed messages already read at the starting position.
    #[serde(default)]
    pub(crate) delayed_messages_read: u64,
}

impl Fixture {
    /// Reads a [Fixture] from a JSON file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Error reading fixture file {}: {e}", path.display()))?;
        serde_json::from_str(&raw).map_err(|e| anyhow!("Error deserializing fixture: {e}"))
    }

    /// Builds the [MemoryInboxBackend] positioned at the fixture's starting point.
    pub(crate) fn into_backend(self) -> MemoryInboxBackend {
        MemoryInboxBackend::new(self.batches, self.delayed_messages)
            .with_position(self.batch_index, self.submessage_index)
    }
}
