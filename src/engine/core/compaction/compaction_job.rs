use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::core::{
    ColumnarFileSink, JsonSegmentReader, LoadContext, MergeSummary, RowMerger, SegmentStream,
    SinkConfig,
};
use crate::engine::errors::CompactionError;
use tracing::{debug, info};

/// Compacts a set of segment files into one columnar output segment.
pub struct CompactionJob {
    pub inputs: Vec<PathBuf>,
    pub context: LoadContext,
}

impl CompactionJob {
    pub fn new(inputs: Vec<PathBuf>, context: LoadContext) -> Self {
        Self { inputs, context }
    }

    /// Runs the compaction: open input segments, provision the output
    /// directory, merge into a columnar sink.
    pub fn run(&self) -> Result<MergeSummary, CompactionError> {
        if self.inputs.is_empty() {
            info!(
                target: "seg_merge::compaction",
                table = %self.context.table,
                "No input segments, nothing to compact"
            );
            return Ok(MergeSummary::default());
        }

        // Step 1: Open input segments
        let mut streams: Vec<Box<dyn SegmentStream>> = Vec::with_capacity(self.inputs.len());
        for path in &self.inputs {
            let reader = JsonSegmentReader::open(path)?;
            debug!(
                target: "seg_merge::compaction",
                segment = reader.label(),
                "Opened input segment"
            );
            streams.push(Box::new(reader));
        }

        // Step 2: Schema of the first segment drives the merge
        let Some(first) = streams.first() else {
            return Ok(MergeSummary::default());
        };
        let properties = Arc::new(first.schema().clone());

        // Step 3: Resolve and provision the output location
        let config = SinkConfig::build(&properties, &self.context);
        config.provision_data_dir()?;
        let data_dir = config.data_dir.clone();

        // Step 4: Merge
        let mut merger = RowMerger::new(properties, ColumnarFileSink::new(config));
        let summary = merger.merge(streams).map_err(|failure| {
            failure.log_error();
            CompactionError::Merge(failure)
        })?;

        info!(
            target: "seg_merge::compaction",
            database = %self.context.database,
            table = %self.context.table,
            segment_id = %self.context.segment_id,
            output = %data_dir.display(),
            rows = summary.rows_written,
            inputs = summary.input_streams,
            "Compaction complete"
        );
        Ok(summary)
    }
}
