pub use super::factories::{
    LoadContextFactory, MergeRowFactory, RecordingSinkFactory, SegmentPropertiesFactory,
    SegmentStreamFactory,
};

pub struct Factory;

impl Factory {
    pub fn segment_properties() -> SegmentPropertiesFactory {
        SegmentPropertiesFactory::new()
    }

    pub fn merge_row() -> MergeRowFactory {
        MergeRowFactory::new()
    }

    pub fn segment_stream() -> SegmentStreamFactory {
        SegmentStreamFactory::new()
    }

    pub fn recording_sink() -> RecordingSinkFactory {
        RecordingSinkFactory::new()
    }

    pub fn load_context() -> LoadContextFactory {
        LoadContextFactory::new()
    }
}
