pub mod compaction;
pub mod merge;
pub mod segment;
pub mod sink;

pub use compaction::compaction_job::CompactionJob;
pub use merge::composite_key::CompositeKey;
pub use merge::key_comparator::KeyComparator;
pub use merge::merge_heap::MergeHeap;
pub use merge::merge_row::{MeasureValue, MergeRow};
pub use merge::row_adapter::{RowAdapter, WritableRow, WritableValue, WriteLayout};
pub use merge::row_merger::{MergeSummary, RowMerger};
pub use merge::segment_properties::{
    ComplexDimensionSpec, DimensionEncoding, DimensionSpec, MeasureSpec, MeasureType,
    SegmentProperties,
};
pub use merge::segment_stream::SegmentStream;

pub use segment::json_segment::{JsonSegmentReader, JsonSegmentWriter};
pub use segment::memory_stream::MemorySegmentStream;

pub use sink::column_file_reader::ColumnFileReader;
pub use sink::columnar_file_sink::{BlockletMeta, ColumnarFileSink, SegmentMeta};
pub use sink::sink_config::{AggType, DataFileAttributes, LoadContext, SinkConfig};
pub use sink::write_sink::WriteSink;
