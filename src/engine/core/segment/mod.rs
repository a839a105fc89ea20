pub mod json_segment;
pub mod memory_stream;

#[cfg(test)]
mod memory_stream_test;
