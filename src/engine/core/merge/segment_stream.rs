use crate::engine::core::{CompositeKey, MergeRow, SegmentProperties};
use crate::engine::errors::StreamError;

/// A sorted sequence of rows from one input segment.
///
/// `peek_key` and `consume` share one cursor: the key returned by `peek_key`
/// stays the same until the next `consume`, which returns that row and moves
/// on to the following one.
pub trait SegmentStream {
    /// Human readable name used in logs and errors.
    fn label(&self) -> &str;

    fn schema(&self) -> &SegmentProperties;

    /// True when a further row is available. A row that is known to be
    /// undecodable still counts; the failure surfaces on `peek_key`/`consume`.
    fn has_more(&self) -> bool;

    fn peek_key(&mut self) -> Result<&CompositeKey, StreamError>;

    /// Returns the current row and advances. `Ok(None)` means the stream had
    /// nothing to hand out, which callers treat as a contract violation when
    /// `has_more` said otherwise.
    fn consume(&mut self) -> Result<Option<MergeRow>, StreamError>;
}
