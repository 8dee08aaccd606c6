//! Summaries of single sequencer batches.

use anyhow::Result;
use arb_inbox::batch::{SegmentKind, SequencerBatch};
use serde::Serialize;

/// A decoded sequencer batch, summarized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchReport {
    min_timestamp: u64,
    max_timestamp: u64,
    min_l1_block: u64,
    max_l1_block: u64,
    after_delayed_messages: u64,
    segments: Vec<SegmentReport>,
}

/// A single segment of a [BatchReport].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SegmentReport {
    index: usize,
    kind: String,
    len: usize,
}

impl BatchReport {
    /// Decodes a posted batch into its report.
    pub(crate) fn decode(data: &[u8]) -> Result<Self> {
        let SequencerBatch { header, segments } = SequencerBatch::decode(data)?;

        let segments = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let kind = match SegmentKind::of(segment) {
                    None => "Empty".to_string(),
                    Some(Ok(kind)) => format!("{kind:?}"),
                    Some(Err(raw)) => format!("Unknown({raw})"),
                };
                SegmentReport { index, kind, len: segment.len() }
            })
            .collect();

        Ok(Self {
            min_timestamp: header.min_timestamp,
            max_timestamp: header.max_timestamp,
            min_l1_block: header.min_l1_block,
            max_l1_block: header.max_l1_block,
            after_delayed_messages: header.after_delayed_messages,
            segments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Bytes;
    use arb_inbox::{
        batch::BatchHeader,
        test_utils::{advance_timestamp_segment, batch_bytes, delayed_segment},
    };

    #[test]
    fn test_report_segments() {
        let header =
            BatchHeader { max_timestamp: 9, after_delayed_messages: 1, ..Default::default() };
        let batch = batch_bytes(
            header,
            vec![
                advance_timestamp_segment(3),
                Bytes::new(),
                Bytes::from_static(&[7]),
                delayed_segment(),
            ],
        );

        let report = BatchReport::decode(&batch).unwrap();
        assert_eq!(report.max_timestamp, 9);
        assert_eq!(report.after_delayed_messages, 1);
        let kinds: Vec<_> = report.segments.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(kinds, ["AdvanceTimestamp", "Empty", "Unknown(7)", "DelayedMessages"]);
        assert_eq!(report.segments[0].len, 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["afterDelayedMessages"], 1);
        assert_eq!(json["segments"][2]["index"], 2);
    }

    #[test]
    fn test_report_missing_header() {
        let err = BatchReport::decode(&[0; 8]).unwrap_err();
        assert_eq!(err.to_string(), "sequencer batch missing L1 header: got 8 bytes");
    }
}
