use crate::engine::core::{MeasureType, MeasureValue, MergeRow, SegmentProperties};
use crate::engine::errors::{AdapterError, KeyError};

/// One column of a row in sink order.
#[derive(Debug, Clone, PartialEq)]
pub enum WritableValue {
    Measure(MeasureValue),
    /// Every no-dictionary value followed by every complex payload, each
    /// prefixed by its little-endian `u16` length.
    NonDictionary(Vec<u8>),
    MdKey(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WritableRow {
    pub columns: Vec<WritableValue>,
}

impl WritableRow {
    pub fn mdkey(&self) -> Option<&[u8]> {
        match self.columns.last() {
            Some(WritableValue::MdKey(bytes)) => Some(bytes),
            _ => None,
        }
    }
}

/// Column layout the write sink expects: measures, then an optional packed
/// non-dictionary column, then the dictionary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteLayout {
    pub measure_types: Vec<MeasureType>,
    pub mdkey_len: usize,
    pub no_dictionary_count: usize,
    pub complex_count: usize,
}

impl WriteLayout {
    pub fn from_properties(properties: &SegmentProperties) -> Self {
        Self {
            measure_types: properties.measure_types(),
            mdkey_len: properties.mdkey_len(),
            no_dictionary_count: properties.no_dictionary_count(),
            complex_count: properties.complex_count(),
        }
    }

    pub fn measure_count(&self) -> usize {
        self.measure_types.len()
    }

    pub fn has_non_dictionary(&self) -> bool {
        self.no_dictionary_count > 0 || self.complex_count > 0
    }

    pub fn mdkey_index(&self) -> usize {
        if self.has_non_dictionary() {
            self.measure_count() + 1
        } else {
            self.measure_count()
        }
    }

    pub fn column_count(&self) -> usize {
        self.mdkey_index() + 1
    }

    pub fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = (0..self.measure_count())
            .map(|i| format!("measure_{}", i))
            .collect();
        if self.has_non_dictionary() {
            names.push("non_dictionary".to_string());
        }
        names.push("mdkey".to_string());
        names
    }
}

/// Stateless conversion from merged rows to the sink's flat layout.
#[derive(Debug, Clone)]
pub struct RowAdapter {
    layout: WriteLayout,
}

impl RowAdapter {
    pub fn new(properties: &SegmentProperties) -> Self {
        Self {
            layout: WriteLayout::from_properties(properties),
        }
    }

    pub fn layout(&self) -> &WriteLayout {
        &self.layout
    }

    pub fn convert(&self, row: MergeRow) -> Result<WritableRow, AdapterError> {
        let layout = &self.layout;

        if row.measures.len() != layout.measure_count() {
            return Err(AdapterError::MeasureCount {
                expected: layout.measure_count(),
                actual: row.measures.len(),
            });
        }
        let typed = row.measures.iter().zip(&layout.measure_types);
        for (index, (value, expected)) in typed.enumerate() {
            if !value.fits(*expected) {
                return Err(AdapterError::MeasureType {
                    index,
                    expected: *expected,
                    found: value.type_name(),
                });
            }
        }

        let key = row.key;
        if key.dictionary.len() != layout.mdkey_len {
            return Err(KeyError::DictionaryLength {
                expected: layout.mdkey_len,
                actual: key.dictionary.len(),
            }
            .into());
        }
        if key.no_dictionary.len() != layout.no_dictionary_count {
            return Err(KeyError::NoDictionaryCount {
                expected: layout.no_dictionary_count,
                actual: key.no_dictionary.len(),
            }
            .into());
        }
        if key.complex.len() != layout.complex_count {
            return Err(AdapterError::ComplexCount {
                expected: layout.complex_count,
                actual: key.complex.len(),
            });
        }

        let mut columns = Vec::with_capacity(layout.column_count());
        columns.extend(row.measures.into_iter().map(WritableValue::Measure));
        if layout.has_non_dictionary() {
            let packed = pack_non_dictionary(
                key.no_dictionary
                    .iter()
                    .chain(key.complex.iter())
                    .map(Vec::as_slice),
            )?;
            columns.push(WritableValue::NonDictionary(packed));
        }
        columns.push(WritableValue::MdKey(key.dictionary));

        Ok(WritableRow { columns })
    }
}

pub fn pack_non_dictionary<'a>(
    values: impl Iterator<Item = &'a [u8]>,
) -> Result<Vec<u8>, AdapterError> {
    let mut packed = Vec::new();
    for value in values {
        if value.len() > u16::MAX as usize {
            return Err(AdapterError::ValueTooLong {
                len: value.len(),
                max: u16::MAX as usize,
            });
        }
        packed.extend_from_slice(&(value.len() as u16).to_le_bytes());
        packed.extend_from_slice(value);
    }
    Ok(packed)
}

/// Splits a packed non-dictionary column back into its values.
/// Returns `None` when the buffer is truncated.
pub fn unpack_non_dictionary(packed: &[u8]) -> Option<Vec<Vec<u8>>> {
    let mut values = Vec::new();
    let mut rest = packed;
    while !rest.is_empty() {
        let (len_bytes, tail) = rest.split_at_checked(2)?;
        let len = u16::from_le_bytes([len_bytes[0], len_bytes[1]]) as usize;
        let (value, tail) = tail.split_at_checked(len)?;
        values.push(value.to_vec());
        rest = tail;
    }
    Some(values)
}
