use crate::engine::core::{WritableRow, WriteSink};
use crate::engine::errors::SinkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCall {
    Initialize,
    Write,
    Finalize,
    Release,
}

/// In-memory sink that records every call and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
    pub rows: Vec<WritableRow>,
    fail_init: bool,
    fail_write_at: Option<usize>,
    fail_finalize: bool,
    fail_release: bool,
}

impl RecordingSink {
    pub fn release_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == SinkCall::Release)
            .count()
    }

    pub fn write_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == SinkCall::Write).count()
    }

    /// First byte of every written mdkey, in write order.
    pub fn leading_key_bytes(&self) -> Vec<u8> {
        self.rows
            .iter()
            .filter_map(|r| r.mdkey().and_then(|k| k.first().copied()))
            .collect()
    }
}

impl WriteSink for RecordingSink {
    fn initialize(&mut self) -> Result<(), SinkError> {
        self.calls.push(SinkCall::Initialize);
        if self.fail_init {
            return Err(SinkError::Other("injected initialize failure".into()));
        }
        Ok(())
    }

    fn write(&mut self, row: WritableRow) -> Result<(), SinkError> {
        self.calls.push(SinkCall::Write);
        if self.fail_write_at == Some(self.rows.len()) {
            return Err(SinkError::Other("injected write failure".into()));
        }
        self.rows.push(row);
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), SinkError> {
        self.calls.push(SinkCall::Finalize);
        if self.fail_finalize {
            return Err(SinkError::Other("injected finalize failure".into()));
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), SinkError> {
        self.calls.push(SinkCall::Release);
        if self.fail_release {
            return Err(SinkError::Other("injected release failure".into()));
        }
        Ok(())
    }
}

pub struct RecordingSinkFactory {
    sink: RecordingSink,
}

impl RecordingSinkFactory {
    pub fn new() -> Self {
        Self {
            sink: RecordingSink::default(),
        }
    }

    pub fn failing_init(mut self) -> Self {
        self.sink.fail_init = true;
        self
    }

    /// The write of the `n`-th row (zero based) fails.
    pub fn failing_write_at(mut self, n: usize) -> Self {
        self.sink.fail_write_at = Some(n);
        self
    }

    pub fn failing_finalize(mut self) -> Self {
        self.sink.fail_finalize = true;
        self
    }

    pub fn failing_release(mut self) -> Self {
        self.sink.fail_release = true;
        self
    }

    pub fn create(self) -> RecordingSink {
        self.sink
    }
}
