use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::engine::core::MeasureValue;
use crate::engine::core::sink::column_codec::decode_measure;
use crate::engine::errors::SinkError;
use crate::shared::storage_header::{FileKind, open_with_header};

/// Reads back column files produced by the columnar sink.
pub struct ColumnFileReader;

impl ColumnFileReader {
    pub fn read_values(path: &Path, kind: FileKind) -> Result<Vec<Vec<u8>>, SinkError> {
        let file = open_with_header(path, kind)?;
        let mut reader = BufReader::new(file);
        let mut values = Vec::new();

        loop {
            let mut len_buf = [0u8; 4];
            match reader.read_exact(&mut len_buf) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
            let len = u32::from_le_bytes(len_buf) as usize;
            let mut value = vec![0u8; len];
            reader.read_exact(&mut value)?;
            values.push(value);
        }

        Ok(values)
    }

    pub fn read_measures(path: &Path) -> Result<Vec<MeasureValue>, SinkError> {
        Self::read_values(path, FileKind::MeasureColumn)?
            .iter()
            .enumerate()
            .map(|(row, bytes)| {
                decode_measure(bytes)
                    .ok_or_else(|| SinkError::Other(format!("undecodable measure at row {}", row)))
            })
            .collect()
    }
}
