//! Drains the inbox multiplexer over a [Fixture].

use crate::fixture::Fixture;
use anyhow::{Context, Result};
use arb_inbox::{multiplexer::InboxMultiplexer, traits::MessageMultiplexer};
use std::io::Write;
use tracing::debug;

/// Replays `fixture`, writing each message to `out` as a JSON line.
///
/// Stops once the batches run out or `limit` messages were written, and returns the number of
/// messages written.
pub(crate) async fn replay<W: Write>(
    fixture: Fixture,
    limit: Option<usize>,
    out: &mut W,
) -> Result<usize> {
    let delayed_messages_read = fixture.delayed_messages_read;
    let mut multiplexer = InboxMultiplexer::new(fixture.into_backend(), delayed_messages_read);

    let mut count = 0;
    while limit.map_or(true, |limit| count < limit) && !multiplexer.backend().is_exhausted() {
        let (batch, submessage) = multiplexer.backend().position();
        let message = multiplexer.pop().await.with_context(|| {
            format!("failed to pop message at batch {batch}, submessage {submessage}")
        })?;
        debug!(
            target: "replay",
            batch,
            submessage,
            kind = message.message.header.kind,
            delayed_messages_read = message.delayed_messages_read,
            "Popped message"
        );

        serde_json::to_writer(&mut *out, &message)?;
        writeln!(out)?;
        count += 1;
    }

    Ok(count)
}
