pub mod column_codec;
pub mod column_file_reader;
pub mod columnar_file_sink;
pub mod sink_config;
pub mod write_sink;
