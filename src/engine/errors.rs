use std::io;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::engine::core::MeasureType;

/// Errors raised by a segment stream while reading or decoding rows.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode line {line} of segment {segment}: {message}")]
    Decode {
        segment: String,
        line: usize,
        message: String,
    },

    #[error("Segment {0} has no current row")]
    Exhausted(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// A composite key that does not fit the segment schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("dictionary key is {actual} bytes, schema expects {expected}")]
    DictionaryLength { expected: usize, actual: usize },

    #[error("key carries {actual} no-dictionary values, schema expects {expected}")]
    NoDictionaryCount { expected: usize, actual: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdapterError {
    #[error("row has {actual} measures, layout expects {expected}")]
    MeasureCount { expected: usize, actual: usize },

    #[error("measure {index} holds a {found} value, layout expects {expected:?}")]
    MeasureType {
        index: usize,
        expected: MeasureType,
        found: &'static str,
    },

    #[error("key carries {actual} complex values, layout expects {expected}")]
    ComplexCount { expected: usize, actual: usize },

    #[error("invalid key: {0}")]
    Key(#[from] KeyError),

    #[error("non-dictionary value of {len} bytes exceeds {max} bytes")]
    ValueTooLong { len: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write segment metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sink is not initialized")]
    NotInitialized,

    #[error("Sink is already initialized")]
    AlreadyInitialized,

    #[error("Sink is finalized")]
    Finalized,

    #[error("Row does not match sink layout: {0}")]
    Layout(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Phase classification for a failed merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeErrorKind {
    SchemaMismatch,
    KeyMaterialization,
    RowConsumption,
    RowConversion,
    Write,
    Release,
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Schema mismatch: segment {stream} does not share the merge schema")]
    SchemaMismatch { stream: String },

    #[error("Key materialization failed for segment {stream}: {source}")]
    KeyMaterialization {
        stream: String,
        #[source]
        source: StreamError,
    },

    #[error("Malformed key in segment {stream}: {source}")]
    MalformedKey {
        stream: String,
        #[source]
        source: KeyError,
    },

    #[error("Row consumption failed for segment {stream}: {source}")]
    RowConsumption {
        stream: String,
        #[source]
        source: StreamError,
    },

    #[error("Row conversion failed for segment {stream}: {source}")]
    RowConversion {
        stream: String,
        #[source]
        source: AdapterError,
    },

    #[error("Sink initialization failed: {0}")]
    Initialize(#[source] SinkError),

    #[error("Sink write failed: {0}")]
    Write(#[source] SinkError),

    #[error("Sink finalize failed: {0}")]
    Finalize(#[source] SinkError),

    #[error("Sink release failed: {0}")]
    Release(#[source] SinkError),
}

impl MergeError {
    pub fn kind(&self) -> MergeErrorKind {
        match self {
            MergeError::SchemaMismatch { .. } => MergeErrorKind::SchemaMismatch,
            MergeError::KeyMaterialization { .. } | MergeError::MalformedKey { .. } => {
                MergeErrorKind::KeyMaterialization
            }
            MergeError::RowConsumption { .. } => MergeErrorKind::RowConsumption,
            MergeError::RowConversion { .. } => MergeErrorKind::RowConversion,
            MergeError::Initialize(_) | MergeError::Write(_) | MergeError::Finalize(_) => {
                MergeErrorKind::Write
            }
            MergeError::Release(_) => MergeErrorKind::Release,
        }
    }
}

/// Outcome of a failed merge. `cause` is the first failure observed; a sink
/// release failure that happened afterwards is kept in `release_error`.
#[derive(Debug, Error)]
#[error("merge failed after {rows_written} rows: {cause}")]
pub struct MergeFailure {
    #[source]
    pub cause: MergeError,
    pub rows_written: u64,
    pub release_error: Option<SinkError>,
}

impl MergeFailure {
    pub fn new(cause: MergeError, rows_written: u64) -> Self {
        Self {
            cause,
            rows_written,
            release_error: None,
        }
    }

    pub fn with_release_error(mut self, err: SinkError) -> Self {
        self.release_error = Some(err);
        self
    }

    pub fn kind(&self) -> MergeErrorKind {
        self.cause.kind()
    }

    /// True when at least one row reached the sink before the failure.
    pub fn is_partial_write(&self) -> bool {
        self.rows_written > 0
    }

    pub fn log_error(&self) {
        error!(
            kind = ?self.kind(),
            rows_written = self.rows_written,
            "Merge failed: {}",
            self.cause
        );
        debug!("Merge failure details: {:?}", self.cause);
        if let Some(release) = &self.release_error {
            warn!("Sink release also failed: {}", release);
        }
    }
}

#[derive(Debug, Error)]
pub enum CompactionError {
    #[error("Segment open error: {0}")]
    SegmentOpen(#[from] StreamError),

    #[error("Output directory error: {0}")]
    OutputDir(#[from] io::Error),

    #[error("Merge error: {0}")]
    Merge(#[from] MergeFailure),
}
