pub mod composite_key;
pub mod key_comparator;
pub mod merge_heap;
pub mod merge_row;
pub mod row_adapter;
pub mod row_merger;
pub mod segment_properties;
pub mod segment_stream;
