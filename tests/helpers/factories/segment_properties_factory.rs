use crate::engine::core::{
    ComplexDimensionSpec, DimensionSpec, MeasureSpec, MeasureType, SegmentProperties,
};
use std::sync::Arc;

pub struct SegmentPropertiesFactory {
    dimensions: Vec<DimensionSpec>,
    complex: Vec<ComplexDimensionSpec>,
    measures: Vec<MeasureSpec>,
}

impl SegmentPropertiesFactory {
    pub fn new() -> Self {
        Self {
            dimensions: Vec::new(),
            complex: Vec::new(),
            measures: Vec::new(),
        }
    }

    /// One dictionary column of width 1 and one long measure.
    pub fn single_byte_key() -> Self {
        Self::new()
            .with_dictionary("id", 1)
            .with_measure("amount", MeasureType::Long)
    }

    pub fn with_dictionary(mut self, name: &str, width: usize) -> Self {
        let cardinality = if width >= 4 {
            u32::MAX
        } else {
            (1u32 << (8 * width as u32)) - 1
        };
        self.dimensions
            .push(DimensionSpec::dictionary(name, width, cardinality));
        self
    }

    pub fn with_no_dictionary(mut self, name: &str) -> Self {
        self.dimensions.push(DimensionSpec::no_dictionary(name));
        self
    }

    pub fn with_complex(mut self, name: &str) -> Self {
        self.complex.push(ComplexDimensionSpec {
            name: name.to_string(),
        });
        self
    }

    pub fn with_measure(mut self, name: &str, data_type: MeasureType) -> Self {
        self.measures.push(MeasureSpec::new(name, data_type));
        self
    }

    pub fn create(self) -> SegmentProperties {
        SegmentProperties::new(self.dimensions, self.complex, self.measures)
    }

    pub fn shared(self) -> Arc<SegmentProperties> {
        Arc::new(self.create())
    }
}
