use super::{MergeRowFactory, SegmentPropertiesFactory};
use crate::engine::core::{
    CompositeKey, MemorySegmentStream, MergeRow, SegmentProperties, SegmentStream,
};
use crate::engine::errors::StreamError;
use std::sync::Arc;

pub struct SegmentStreamFactory {
    label: String,
    schema: Option<Arc<SegmentProperties>>,
    rows: Vec<MergeRow>,
    fail_key_at: Option<usize>,
    fail_consume_at: Option<usize>,
    drop_row_at: Option<usize>,
}

impl SegmentStreamFactory {
    pub fn new() -> Self {
        Self {
            label: "segment-0".to_string(),
            schema: None,
            rows: Vec::new(),
            fail_key_at: None,
            fail_consume_at: None,
            drop_row_at: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_schema(mut self, schema: Arc<SegmentProperties>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_rows(mut self, rows: Vec<MergeRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Single-byte keyed rows; each measure carries its key.
    pub fn with_keys(mut self, keys: &[u8]) -> Self {
        self.rows = keys
            .iter()
            .map(|k| MergeRowFactory::keyed(*k, *k as i64))
            .collect();
        self
    }

    /// `peek_key` fails once `n` rows have been consumed.
    pub fn failing_key_at(mut self, n: usize) -> Self {
        self.fail_key_at = Some(n);
        self
    }

    /// `consume` fails once `n` rows have been consumed.
    pub fn failing_consume_at(mut self, n: usize) -> Self {
        self.fail_consume_at = Some(n);
        self
    }

    /// Once `n` rows have been consumed, `has_more` keeps reporting a row
    /// but `consume` hands out nothing.
    pub fn dropping_row_at(mut self, n: usize) -> Self {
        self.drop_row_at = Some(n);
        self
    }

    pub fn create_memory(self) -> MemorySegmentStream {
        let schema = self
            .schema
            .unwrap_or_else(|| SegmentPropertiesFactory::single_byte_key().shared());
        MemorySegmentStream::new(&self.label, schema, self.rows)
    }

    pub fn create(self) -> Box<dyn SegmentStream> {
        let fail_key_at = self.fail_key_at;
        let fail_consume_at = self.fail_consume_at;
        let drop_row_at = self.drop_row_at;
        let inner = self.create_memory();
        if fail_key_at.is_none() && fail_consume_at.is_none() && drop_row_at.is_none() {
            return Box::new(inner);
        }
        Box::new(FaultyStream {
            inner,
            consumed: 0,
            fail_key_at,
            fail_consume_at,
            drop_row_at,
        })
    }
}

/// Memory stream that fails on a chosen row.
pub struct FaultyStream {
    inner: MemorySegmentStream,
    consumed: usize,
    fail_key_at: Option<usize>,
    fail_consume_at: Option<usize>,
    drop_row_at: Option<usize>,
}

impl FaultyStream {
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl SegmentStream for FaultyStream {
    fn label(&self) -> &str {
        self.inner.label()
    }

    fn schema(&self) -> &SegmentProperties {
        self.inner.schema()
    }

    fn has_more(&self) -> bool {
        self.drop_row_at == Some(self.consumed) || self.inner.has_more()
    }

    fn peek_key(&mut self) -> Result<&CompositeKey, StreamError> {
        if self.fail_key_at == Some(self.consumed) {
            return Err(StreamError::Other(format!(
                "injected key failure at row {}",
                self.consumed
            )));
        }
        self.inner.peek_key()
    }

    fn consume(&mut self) -> Result<Option<MergeRow>, StreamError> {
        if self.fail_consume_at == Some(self.consumed) {
            return Err(StreamError::Other(format!(
                "injected read failure at row {}",
                self.consumed
            )));
        }
        if self.drop_row_at == Some(self.consumed) {
            return Ok(None);
        }
        let row = self.inner.consume()?;
        if row.is_some() {
            self.consumed += 1;
        }
        Ok(row)
    }
}
