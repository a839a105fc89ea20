use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

use crate::engine::core::{CompositeKey, MergeRow, SegmentProperties, SegmentStream};
use crate::engine::errors::StreamError;
use tracing::{debug, trace};

/// Reads a JSON-lines segment file: the first line is the segment schema,
/// every following non-blank line is one row. Rows are decoded one ahead of
/// the consumer so `peek_key` never touches the file.
pub struct JsonSegmentReader {
    label: String,
    schema: SegmentProperties,
    lines: Lines<BufReader<File>>,
    line_no: usize,
    current: Option<MergeRow>,
    /// Line number and message of the first row that failed to decode.
    broken: Option<(usize, String)>,
}

impl JsonSegmentReader {
    pub fn open(path: &Path) -> Result<Self, StreamError> {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mut lines = BufReader::new(File::open(path)?).lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(StreamError::Decode {
                    segment: label,
                    line: 1,
                    message: "missing schema header".to_string(),
                });
            }
        };
        let schema: SegmentProperties =
            serde_json::from_str(&header).map_err(|e| StreamError::Decode {
                segment: label.clone(),
                line: 1,
                message: e.to_string(),
            })?;

        let mut reader = Self {
            label,
            schema,
            lines,
            line_no: 1,
            current: None,
            broken: None,
        };
        reader.advance();

        debug!(
            target: "seg_merge::segment",
            segment = %reader.label,
            path = %path.display(),
            has_rows = reader.has_more(),
            "Opened segment file"
        );
        Ok(reader)
    }

    fn advance(&mut self) {
        self.current = None;
        if self.broken.is_some() {
            return;
        }

        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    self.broken = Some((self.line_no, e.to_string()));
                    return;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<MergeRow>(&line) {
                Ok(row) => self.current = Some(row),
                Err(e) => self.broken = Some((self.line_no, e.to_string())),
            }
            return;
        }

        trace!(
            target: "seg_merge::segment",
            segment = %self.label,
            lines = self.line_no,
            "End of segment file"
        );
    }

    fn broken_error(&self) -> Option<StreamError> {
        self.broken.as_ref().map(|(line, message)| StreamError::Decode {
            segment: self.label.clone(),
            line: *line,
            message: message.clone(),
        })
    }
}

impl SegmentStream for JsonSegmentReader {
    fn label(&self) -> &str {
        &self.label
    }

    fn schema(&self) -> &SegmentProperties {
        &self.schema
    }

    fn has_more(&self) -> bool {
        self.current.is_some() || self.broken.is_some()
    }

    fn peek_key(&mut self) -> Result<&CompositeKey, StreamError> {
        if let Some(err) = self.broken_error() {
            return Err(err);
        }
        self.current
            .as_ref()
            .map(|row| &row.key)
            .ok_or_else(|| StreamError::Exhausted(self.label.clone()))
    }

    fn consume(&mut self) -> Result<Option<MergeRow>, StreamError> {
        if let Some(err) = self.broken_error() {
            return Err(err);
        }
        let row = self.current.take();
        if row.is_some() {
            self.advance();
        }
        Ok(row)
    }
}

/// Writes segment files readable by [`JsonSegmentReader`].
pub struct JsonSegmentWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    rows: usize,
}

impl JsonSegmentWriter {
    pub fn create(path: &Path, schema: &SegmentProperties) -> Result<Self, StreamError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, schema)?;
        writer.write_all(b"\n")?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows: 0,
        })
    }

    pub fn append(&mut self, row: &MergeRow) -> Result<(), StreamError> {
        serde_json::to_writer(&mut self.writer, row)?;
        self.writer.write_all(b"\n")?;
        self.rows += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize, StreamError> {
        self.writer.flush()?;
        debug!(
            target: "seg_merge::segment",
            path = %self.path.display(),
            rows = self.rows,
            "Wrote segment file"
        );
        Ok(self.rows)
    }

    /// Writes `rows` to a fresh segment file at `path`.
    pub fn write_all(
        path: &Path,
        schema: &SegmentProperties,
        rows: &[MergeRow],
    ) -> Result<usize, StreamError> {
        let mut writer = Self::create(path, schema)?;
        for row in rows {
            writer.append(row)?;
        }
        writer.finish()
    }
}
