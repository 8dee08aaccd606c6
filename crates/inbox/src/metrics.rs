//! Metrics for the inbox multiplexer.

use lazy_static::lazy_static;
use prometheus::{self, register_counter_vec, register_int_counter, register_int_gauge};
use prometheus::{CounterVec, IntCounter, IntGauge};

lazy_static! {
    /// Tracks the messages popped from the multiplexer, by source.
    pub static ref MESSAGES_EMITTED: CounterVec = register_counter_vec!(
        "arb_inbox_messages_emitted",
        "Number of messages emitted by the inbox multiplexer",
        &["source"]
    ).expect("Messages emitted failed to register");

    /// Tracks the number of sequencer batches fully consumed.
    pub static ref BATCHES_COMPLETED: IntCounter = register_int_counter!(
        "arb_inbox_batches_completed",
        "Number of sequencer batches fully consumed"
    ).expect("Batches completed failed to register");

    /// Tracks the running total of delayed messages read.
    pub static ref DELAYED_MESSAGES_READ: IntGauge = register_int_gauge!(
        "arb_inbox_delayed_messages_read",
        "Running total of delayed messages read"
    ).expect("Delayed messages read failed to register");
}
