use crate::engine::core::{CompositeKey, MeasureValue, MergeRow};

pub struct MergeRowFactory {
    dictionary: Vec<u8>,
    no_dictionary: Vec<Vec<u8>>,
    complex: Vec<Vec<u8>>,
    measures: Vec<MeasureValue>,
}

impl MergeRowFactory {
    pub fn new() -> Self {
        Self {
            dictionary: vec![1],
            no_dictionary: Vec::new(),
            complex: Vec::new(),
            measures: vec![MeasureValue::Long(1)],
        }
    }

    /// Row matching `SegmentPropertiesFactory::single_byte_key`, tagged by `tag`
    /// in its measure so equal keys can still be told apart.
    pub fn keyed(key: u8, tag: i64) -> MergeRow {
        Self::new()
            .with_dictionary(&[key])
            .with_measures(vec![MeasureValue::Long(tag)])
            .create()
    }

    pub fn with_dictionary(mut self, bytes: &[u8]) -> Self {
        self.dictionary = bytes.to_vec();
        self
    }

    pub fn with_no_dictionary(mut self, value: &[u8]) -> Self {
        self.no_dictionary.push(value.to_vec());
        self
    }

    pub fn with_complex(mut self, value: &[u8]) -> Self {
        self.complex.push(value.to_vec());
        self
    }

    pub fn with_measures(mut self, measures: Vec<MeasureValue>) -> Self {
        self.measures = measures;
        self
    }

    pub fn create(self) -> MergeRow {
        MergeRow::new(
            CompositeKey::new(self.dictionary, self.no_dictionary).with_complex(self.complex),
            self.measures,
        )
    }
}
