use std::sync::Arc;

use crate::engine::core::{
    KeyComparator, MergeHeap, RowAdapter, SegmentProperties, SegmentStream, WriteSink,
};
use crate::engine::errors::{MergeError, MergeFailure, StreamError};
use tracing::{debug, info, trace, warn};

/// Counters reported by a successful merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    pub rows_written: u64,
    pub input_streams: usize,
    pub empty_streams: usize,
}

/// Merges sorted segment streams into a single sorted run handed to a sink.
///
/// The sink is initialized, finalized and released by [`RowMerger::merge`].
/// Rows with equal keys coming from different streams are written in no
/// particular order.
pub struct RowMerger<S: WriteSink> {
    properties: Arc<SegmentProperties>,
    comparator: Arc<KeyComparator>,
    adapter: RowAdapter,
    sink: S,
}

impl<S: WriteSink> RowMerger<S> {
    pub fn new(properties: Arc<SegmentProperties>, sink: S) -> Self {
        let comparator = Arc::new(KeyComparator::new(&properties));
        let adapter = RowAdapter::new(&properties);
        Self {
            properties,
            comparator,
            adapter,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Runs the merge to completion. Once the sink has been initialized it is
    /// released exactly once, whatever the outcome. A release failure never
    /// hides an earlier failure; it is attached to it instead.
    pub fn merge(
        &mut self,
        mut streams: Vec<Box<dyn SegmentStream>>,
    ) -> Result<MergeSummary, MergeFailure> {
        self.check_schemas(&streams)
            .map_err(|cause| MergeFailure::new(cause, 0))?;

        let labels: Vec<String> = streams.iter().map(|s| s.label().to_string()).collect();
        info!(
            target: "seg_merge::merge",
            streams = streams.len(),
            segments = ?labels,
            "Starting segment merge"
        );

        let mut summary = MergeSummary {
            input_streams: streams.len(),
            ..MergeSummary::default()
        };
        let outcome = self.run(&mut streams, &labels, &mut summary);
        let released = self.sink.release();

        match (outcome, released) {
            (Ok(()), Ok(())) => {
                info!(
                    target: "seg_merge::merge",
                    rows_written = summary.rows_written,
                    input_streams = summary.input_streams,
                    empty_streams = summary.empty_streams,
                    "Segment merge complete"
                );
                Ok(summary)
            }
            (Ok(()), Err(release)) => {
                warn!(target: "seg_merge::merge", error = %release, "Sink release failed");
                Err(MergeFailure::new(
                    MergeError::Release(release),
                    summary.rows_written,
                ))
            }
            (Err(cause), Ok(())) => {
                warn!(
                    target: "seg_merge::merge",
                    rows_written = summary.rows_written,
                    error = %cause,
                    "Segment merge aborted"
                );
                Err(MergeFailure::new(cause, summary.rows_written))
            }
            (Err(cause), Err(release)) => {
                warn!(
                    target: "seg_merge::merge",
                    rows_written = summary.rows_written,
                    error = %cause,
                    release_error = %release,
                    "Segment merge aborted and sink release failed"
                );
                Err(MergeFailure::new(cause, summary.rows_written).with_release_error(release))
            }
        }
    }

    fn check_schemas(&self, streams: &[Box<dyn SegmentStream>]) -> Result<(), MergeError> {
        match streams
            .iter()
            .find(|s| s.schema() != self.properties.as_ref())
        {
            Some(stream) => Err(MergeError::SchemaMismatch {
                stream: stream.label().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn run(
        &mut self,
        streams: &mut [Box<dyn SegmentStream>],
        labels: &[String],
        summary: &mut MergeSummary,
    ) -> Result<(), MergeError> {
        self.sink.initialize().map_err(MergeError::Initialize)?;

        let mut heap = MergeHeap::new(Arc::clone(&self.comparator), streams.len());
        for (index, stream) in streams.iter_mut().enumerate() {
            if !stream.has_more() {
                debug!(
                    target: "seg_merge::merge",
                    segment = %labels[index],
                    "Skipping empty segment"
                );
                summary.empty_streams += 1;
                continue;
            }
            Self::refill(&mut heap, index, stream.as_mut(), &labels[index])?;
        }

        while heap.len() > 1 {
            let Some(index) = heap.pop() else {
                break;
            };
            let stream = streams[index].as_mut();
            self.transfer_row(stream, &labels[index], summary)?;

            if stream.has_more() {
                Self::refill(&mut heap, index, stream, &labels[index])?;
            } else {
                debug!(
                    target: "seg_merge::merge",
                    segment = %labels[index],
                    active = heap.len(),
                    "Segment exhausted"
                );
            }
        }

        if let Some(index) = heap.pop() {
            debug!(
                target: "seg_merge::merge",
                segment = %labels[index],
                "Draining last active segment"
            );
            let stream = streams[index].as_mut();
            while stream.has_more() {
                self.transfer_row(stream, &labels[index], summary)?;
            }
        }

        self.sink.finalize().map_err(MergeError::Finalize)?;
        Ok(())
    }

    fn refill(
        heap: &mut MergeHeap,
        index: usize,
        stream: &mut dyn SegmentStream,
        label: &str,
    ) -> Result<(), MergeError> {
        let key = stream
            .peek_key()
            .map_err(|source| MergeError::KeyMaterialization {
                stream: label.to_string(),
                source,
            })?
            .clone();
        heap.push(index, key)
            .map_err(|source| MergeError::MalformedKey {
                stream: label.to_string(),
                source,
            })
    }

    fn transfer_row(
        &mut self,
        stream: &mut dyn SegmentStream,
        label: &str,
        summary: &mut MergeSummary,
    ) -> Result<(), MergeError> {
        let row = match stream.consume() {
            Ok(Some(row)) => row,
            Ok(None) => {
                return Err(MergeError::RowConsumption {
                    stream: label.to_string(),
                    source: StreamError::Exhausted(label.to_string()),
                });
            }
            Err(source) => {
                return Err(MergeError::RowConsumption {
                    stream: label.to_string(),
                    source,
                });
            }
        };

        // the drained stream never goes back through the heap
        self.comparator
            .check(&row.key)
            .map_err(|source| MergeError::MalformedKey {
                stream: label.to_string(),
                source,
            })?;

        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(
                target: "seg_merge::merge",
                segment = label,
                dictionary = %hex::encode(&row.key.dictionary),
                "Writing merged row"
            );
        }

        let writable = self
            .adapter
            .convert(row)
            .map_err(|source| MergeError::RowConversion {
                stream: label.to_string(),
                source,
            })?;
        self.sink.write(writable).map_err(MergeError::Write)?;
        summary.rows_written += 1;
        Ok(())
    }
}
