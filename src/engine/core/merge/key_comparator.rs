use std::cmp::Ordering;

use crate::engine::core::{CompositeKey, DimensionEncoding, SegmentProperties};
use crate::engine::errors::KeyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyColumn {
    Dictionary(usize),
    NoDictionary,
}

/// Orders composite keys column by column in schema declaration order.
///
/// Dictionary columns compare their fixed-width slices of the packed blob,
/// no-dictionary columns compare whole values. Both comparisons are unsigned
/// byte-wise, a shorter value sorting first when it is a prefix of the other.
#[derive(Debug, Clone)]
pub struct KeyComparator {
    columns: Vec<KeyColumn>,
    mdkey_len: usize,
    no_dictionary_count: usize,
}

impl KeyComparator {
    pub fn new(properties: &SegmentProperties) -> Self {
        let columns = properties
            .dimensions
            .iter()
            .map(|d| match d.encoding {
                DimensionEncoding::Dictionary { width, .. } => KeyColumn::Dictionary(width),
                DimensionEncoding::NoDictionary => KeyColumn::NoDictionary,
            })
            .collect();

        Self {
            columns,
            mdkey_len: properties.mdkey_len(),
            no_dictionary_count: properties.no_dictionary_count(),
        }
    }

    /// Verifies that `key` has the shape the schema describes.
    pub fn check(&self, key: &CompositeKey) -> Result<(), KeyError> {
        if key.dictionary.len() != self.mdkey_len {
            return Err(KeyError::DictionaryLength {
                expected: self.mdkey_len,
                actual: key.dictionary.len(),
            });
        }
        if key.no_dictionary.len() != self.no_dictionary_count {
            return Err(KeyError::NoDictionaryCount {
                expected: self.no_dictionary_count,
                actual: key.no_dictionary.len(),
            });
        }
        Ok(())
    }

    pub fn compare(&self, a: &CompositeKey, b: &CompositeKey) -> Result<Ordering, KeyError> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.compare_checked(a, b))
    }

    /// Both keys must have passed [`KeyComparator::check`].
    pub(crate) fn compare_checked(&self, a: &CompositeKey, b: &CompositeKey) -> Ordering {
        let mut dictionary_offset = 0;
        let mut no_dictionary_index = 0;

        for column in &self.columns {
            let ordering = match *column {
                KeyColumn::Dictionary(width) => {
                    let range = dictionary_offset..dictionary_offset + width;
                    dictionary_offset = range.end;
                    a.dictionary[range.clone()].cmp(&b.dictionary[range])
                }
                KeyColumn::NoDictionary => {
                    let ordering = a.no_dictionary[no_dictionary_index]
                        .as_slice()
                        .cmp(b.no_dictionary[no_dictionary_index].as_slice());
                    no_dictionary_index += 1;
                    ordering
                }
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}
