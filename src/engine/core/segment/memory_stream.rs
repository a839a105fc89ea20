use std::collections::VecDeque;
use std::sync::Arc;

use crate::engine::core::{CompositeKey, MergeRow, SegmentProperties, SegmentStream};
use crate::engine::errors::StreamError;

/// Segment stream over rows already held in memory.
#[derive(Debug, Clone)]
pub struct MemorySegmentStream {
    label: String,
    schema: Arc<SegmentProperties>,
    rows: VecDeque<MergeRow>,
}

impl MemorySegmentStream {
    pub fn new(label: &str, schema: Arc<SegmentProperties>, rows: Vec<MergeRow>) -> Self {
        Self {
            label: label.to_string(),
            schema,
            rows: rows.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl SegmentStream for MemorySegmentStream {
    fn label(&self) -> &str {
        &self.label
    }

    fn schema(&self) -> &SegmentProperties {
        &self.schema
    }

    fn has_more(&self) -> bool {
        !self.rows.is_empty()
    }

    fn peek_key(&mut self) -> Result<&CompositeKey, StreamError> {
        self.rows
            .front()
            .map(|row| &row.key)
            .ok_or_else(|| StreamError::Exhausted(self.label.clone()))
    }

    fn consume(&mut self) -> Result<Option<MergeRow>, StreamError> {
        Ok(self.rows.pop_front())
    }
}
