use crate::engine::core::WritableRow;
use crate::engine::errors::SinkError;

/// Destination of merged rows.
///
/// Lifecycle: `initialize`, any number of `write`s, `finalize`. `release`
/// is called once after any of these, including after a failed step, and
/// must free whatever the sink still holds.
pub trait WriteSink {
    fn initialize(&mut self) -> Result<(), SinkError>;

    fn write(&mut self, row: WritableRow) -> Result<(), SinkError>;

    fn finalize(&mut self) -> Result<(), SinkError>;

    fn release(&mut self) -> Result<(), SinkError>;
}
