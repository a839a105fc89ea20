pub mod load_context_factory;
pub mod merge_row_factory;
pub mod recording_sink_factory;
pub mod segment_properties_factory;
pub mod segment_stream_factory;

pub use load_context_factory::LoadContextFactory;
pub use merge_row_factory::MergeRowFactory;
pub use recording_sink_factory::{RecordingSink, RecordingSinkFactory, SinkCall};
pub use segment_properties_factory::SegmentPropertiesFactory;
pub use segment_stream_factory::{FaultyStream, SegmentStreamFactory};

#[cfg(test)]
mod merge_row_factory_test;
#[cfg(test)]
mod recording_sink_factory_test;
#[cfg(test)]
mod segment_stream_factory_test;
