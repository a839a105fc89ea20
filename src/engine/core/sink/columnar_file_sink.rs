use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::engine::core::sink::column_codec::encode_measure;
use crate::engine::core::{
    AggType, DataFileAttributes, SinkConfig, WritableRow, WritableValue, WriteSink,
};
use crate::engine::errors::SinkError;
use crate::shared::storage_header::{FileKind, create_with_header};

pub const META_FILE: &str = "segment.meta.json";

/// Summary of a run of consecutive output rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockletMeta {
    pub first_row: u64,
    pub row_count: u64,
    /// Hex encoded smallest and largest dictionary key in the blocklet.
    pub min_mdkey: String,
    pub max_mdkey: String,
}

/// Metadata written next to the column files when the sink is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMeta {
    pub database: String,
    pub table: String,
    pub row_count: u64,
    pub columns: Vec<String>,
    pub agg_types: Vec<AggType>,
    pub mdkey_len: usize,
    pub dim_lens: Vec<u32>,
    pub file_attributes: DataFileAttributes,
    pub blocklets: Vec<BlockletMeta>,
}

impl SegmentMeta {
    pub fn load(segment_dir: &Path) -> Result<Self, SinkError> {
        let file = File::open(segment_dir.join(META_FILE))?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}

struct ColumnOutput {
    name: String,
    writer: BufWriter<File>,
}

enum SinkState {
    Created,
    Open(Vec<ColumnOutput>),
    Finalized,
    Released,
}

struct BlockletBuilder {
    first_row: u64,
    row_count: u64,
    min_mdkey: Vec<u8>,
    max_mdkey: Vec<u8>,
}

impl BlockletBuilder {
    fn start(first_row: u64, mdkey: &[u8]) -> Self {
        Self {
            first_row,
            row_count: 1,
            min_mdkey: mdkey.to_vec(),
            max_mdkey: mdkey.to_vec(),
        }
    }

    fn add(&mut self, mdkey: &[u8]) {
        self.row_count += 1;
        if mdkey < self.min_mdkey.as_slice() {
            self.min_mdkey = mdkey.to_vec();
        }
        if mdkey > self.max_mdkey.as_slice() {
            self.max_mdkey = mdkey.to_vec();
        }
    }

    fn finish(self) -> BlockletMeta {
        BlockletMeta {
            first_row: self.first_row,
            row_count: self.row_count,
            min_mdkey: hex::encode(self.min_mdkey),
            max_mdkey: hex::encode(self.max_mdkey),
        }
    }
}

/// Writes merged rows column by column into the configured data directory.
///
/// Each column file starts with a checked header and holds one
/// `u32`-length-prefixed value per row.
pub struct ColumnarFileSink {
    config: SinkConfig,
    state: SinkState,
    rows_written: u64,
    blocklets: Vec<BlockletMeta>,
    current: Option<BlockletBuilder>,
}

impl ColumnarFileSink {
    pub fn new(config: SinkConfig) -> Self {
        Self {
            config,
            state: SinkState::Created,
            rows_written: 0,
            blocklets: Vec::new(),
            current: None,
        }
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn column_file_name(column: &str) -> String {
        format!("{}.col", column)
    }

    fn file_kind(&self, index: usize) -> FileKind {
        let layout = &self.config.layout;
        if index < layout.measure_count() {
            FileKind::MeasureColumn
        } else if index == layout.mdkey_index() {
            FileKind::MdKeyColumn
        } else {
            FileKind::NonDictionaryColumn
        }
    }

    fn track_blocklet(&mut self, mdkey: &[u8]) {
        match self.current.as_mut() {
            Some(builder) => builder.add(mdkey),
            None => self.current = Some(BlockletBuilder::start(self.rows_written, mdkey)),
        }

        let full = self
            .current
            .as_ref()
            .is_some_and(|b| b.row_count as usize >= self.config.rows_per_blocklet);
        if full {
            self.close_blocklet();
        }
    }

    fn close_blocklet(&mut self) {
        if let Some(builder) = self.current.take() {
            let meta = builder.finish();
            debug!(
                target: "seg_merge::sink",
                first_row = meta.first_row,
                row_count = meta.row_count,
                "Closed blocklet"
            );
            self.blocklets.push(meta);
        }
    }

    fn write_meta(&self) -> Result<(), SinkError> {
        let meta = SegmentMeta {
            database: self.config.database.clone(),
            table: self.config.table.clone(),
            row_count: self.rows_written,
            columns: self.config.layout.column_names(),
            agg_types: self.config.agg_types.clone(),
            mdkey_len: self.config.mdkey_len,
            dim_lens: self.config.dim_lens.clone(),
            file_attributes: self.config.file_attributes,
            blocklets: self.blocklets.clone(),
        };
        let path = self.config.data_dir.join(META_FILE);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &meta)?;
        writer.flush()?;
        writer.get_ref().sync_data()?;
        Ok(())
    }
}

fn value_matches(value: &WritableValue, kind: FileKind) -> bool {
    matches!(
        (value, kind),
        (WritableValue::Measure(_), FileKind::MeasureColumn)
            | (WritableValue::NonDictionary(_), FileKind::NonDictionaryColumn)
            | (WritableValue::MdKey(_), FileKind::MdKeyColumn)
    )
}

impl WriteSink for ColumnarFileSink {
    fn initialize(&mut self) -> Result<(), SinkError> {
        match self.state {
            SinkState::Created => {}
            SinkState::Open(_) => return Err(SinkError::AlreadyInitialized),
            SinkState::Finalized | SinkState::Released => return Err(SinkError::Finalized),
        }

        let names = self.config.layout.column_names();
        let mut outputs = Vec::with_capacity(names.len());
        for (index, name) in names.into_iter().enumerate() {
            let path = self.config.data_dir.join(Self::column_file_name(&name));
            let file = create_with_header(&path, self.file_kind(index))?;
            outputs.push(ColumnOutput {
                name,
                writer: BufWriter::new(file),
            });
        }

        info!(
            target: "seg_merge::sink",
            dir = %self.config.data_dir.display(),
            columns = outputs.len(),
            "Initialized columnar sink"
        );
        self.state = SinkState::Open(outputs);
        Ok(())
    }

    fn write(&mut self, row: WritableRow) -> Result<(), SinkError> {
        let expected = self.config.layout.column_count();
        if row.columns.len() != expected {
            return Err(SinkError::Layout(format!(
                "expected {} columns, got {}",
                expected,
                row.columns.len()
            )));
        }
        for (index, value) in row.columns.iter().enumerate() {
            let kind = self.file_kind(index);
            if !value_matches(value, kind) {
                return Err(SinkError::Layout(format!(
                    "column {} holds {:?}, expected {:?}",
                    index, value, kind
                )));
            }
        }

        let outputs = match &mut self.state {
            SinkState::Open(outputs) => outputs,
            SinkState::Created => return Err(SinkError::NotInitialized),
            SinkState::Finalized | SinkState::Released => return Err(SinkError::Finalized),
        };

        for (output, value) in outputs.iter_mut().zip(&row.columns) {
            let encoded;
            let bytes: &[u8] = match value {
                WritableValue::Measure(m) => {
                    encoded = encode_measure(m);
                    &encoded
                }
                WritableValue::NonDictionary(b) | WritableValue::MdKey(b) => b,
            };
            if bytes.len() > u32::MAX as usize {
                return Err(SinkError::Layout(format!(
                    "value too long for column {}",
                    output.name
                )));
            }
            output.writer.write_all(&(bytes.len() as u32).to_le_bytes())?;
            output.writer.write_all(bytes)?;
        }

        let mdkey = row.mdkey().unwrap_or_default();
        self.track_blocklet(mdkey);
        self.rows_written += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), SinkError> {
        let outputs = match std::mem::replace(&mut self.state, SinkState::Finalized) {
            SinkState::Open(outputs) => outputs,
            SinkState::Created => {
                self.state = SinkState::Created;
                return Err(SinkError::NotInitialized);
            }
            other => {
                self.state = other;
                return Err(SinkError::Finalized);
            }
        };

        for mut output in outputs {
            output.writer.flush()?;
            output.writer.get_ref().sync_data()?;
            debug!(target: "seg_merge::sink", column = %output.name, "Flushed column");
        }

        self.close_blocklet();
        self.write_meta()?;
        info!(
            target: "seg_merge::sink",
            rows = self.rows_written,
            blocklets = self.blocklets.len(),
            "Finalized columnar sink"
        );
        Ok(())
    }

    fn release(&mut self) -> Result<(), SinkError> {
        match std::mem::replace(&mut self.state, SinkState::Released) {
            SinkState::Open(outputs) => {
                warn!(
                    target: "seg_merge::sink",
                    rows = self.rows_written,
                    "Releasing sink that was never finalized"
                );
                let mut first_error = None;
                for mut output in outputs {
                    if let Err(e) = output.writer.flush() {
                        first_error.get_or_insert(e);
                    }
                }
                match first_error {
                    Some(e) => Err(SinkError::Io(e)),
                    None => Ok(()),
                }
            }
            SinkState::Created | SinkState::Finalized | SinkState::Released => Ok(()),
        }
    }
}
