//! A `tracing-subscriber` layer that records every event with its level, for asserting on the
//! diagnostics emitted while decoding and resolving batches.

use spin::Mutex;
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, Layer};

/// The recorded events, shared between a [CollectingLayer] and the test that installed it.
#[derive(Debug, Default, Clone)]
pub struct TraceStorage(pub Arc<Mutex<Vec<(Level, String)>>>);

impl TraceStorage {
    /// Returns the recorded events at exactly `level`.
    pub fn get_by_level(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Returns the number of events at or above `level` in severity.
    pub fn count_at_least(&self, level: Level) -> usize {
        self.0.lock().iter().filter(|(l, _)| *l <= level).count()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// Records each event's level and debug rendering into a [TraceStorage].
#[derive(Debug, Default)]
pub struct CollectingLayer {
    storage: TraceStorage,
}

impl CollectingLayer {
    /// Creates a layer writing into `storage`.
    pub const fn new(storage: TraceStorage) -> Self {
        Self { storage }
    }
}

impl<S: Subscriber> Layer<S> for CollectingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        self.storage.0.lock().push((level, format!("{event:?}")));
    }
}
