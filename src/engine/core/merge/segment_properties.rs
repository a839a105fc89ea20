use serde::{Deserialize, Serialize};

/// How a dimension column is stored inside the composite key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DimensionEncoding {
    /// Fixed-width surrogate code packed into the dictionary blob.
    Dictionary { width: usize, cardinality: u32 },
    /// Raw variable-length bytes.
    NoDictionary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub name: String,
    pub encoding: DimensionEncoding,
}

impl DimensionSpec {
    pub fn dictionary(name: &str, width: usize, cardinality: u32) -> Self {
        Self {
            name: name.to_string(),
            encoding: DimensionEncoding::Dictionary { width, cardinality },
        }
    }

    pub fn no_dictionary(name: &str) -> Self {
        Self {
            name: name.to_string(),
            encoding: DimensionEncoding::NoDictionary,
        }
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self.encoding, DimensionEncoding::Dictionary { .. })
    }
}

/// Nested column carried alongside the key. Never part of the sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexDimensionSpec {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureType {
    Short,
    Int,
    Long,
    Double,
    Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureSpec {
    pub name: String,
    pub data_type: MeasureType,
}

impl MeasureSpec {
    pub fn new(name: &str, data_type: MeasureType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Schema shared by every segment taking part in one merge.
///
/// Dimensions are listed in key order; dictionary and no-dictionary columns
/// may interleave.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentProperties {
    pub dimensions: Vec<DimensionSpec>,
    #[serde(default)]
    pub complex_dimensions: Vec<ComplexDimensionSpec>,
    #[serde(default)]
    pub measures: Vec<MeasureSpec>,
}

impl SegmentProperties {
    pub fn new(
        dimensions: Vec<DimensionSpec>,
        complex_dimensions: Vec<ComplexDimensionSpec>,
        measures: Vec<MeasureSpec>,
    ) -> Self {
        Self {
            dimensions,
            complex_dimensions,
            measures,
        }
    }

    /// Byte width of each dimension in key order, `0` for no-dictionary columns.
    pub fn each_dim_column_value_size(&self) -> Vec<usize> {
        self.dimensions
            .iter()
            .map(|d| match d.encoding {
                DimensionEncoding::Dictionary { width, .. } => width,
                DimensionEncoding::NoDictionary => 0,
            })
            .collect()
    }

    /// Length of the packed dictionary blob.
    pub fn mdkey_len(&self) -> usize {
        self.dimensions
            .iter()
            .filter_map(|d| match d.encoding {
                DimensionEncoding::Dictionary { width, .. } => Some(width),
                DimensionEncoding::NoDictionary => None,
            })
            .sum()
    }

    pub fn dim_columns_cardinality(&self) -> Vec<u32> {
        self.dimensions
            .iter()
            .filter_map(|d| match d.encoding {
                DimensionEncoding::Dictionary { cardinality, .. } => Some(cardinality),
                DimensionEncoding::NoDictionary => None,
            })
            .collect()
    }

    pub fn dictionary_count(&self) -> usize {
        self.dimensions.iter().filter(|d| d.is_dictionary()).count()
    }

    pub fn no_dictionary_count(&self) -> usize {
        self.dimensions.len() - self.dictionary_count()
    }

    pub fn complex_count(&self) -> usize {
        self.complex_dimensions.len()
    }

    pub fn measure_count(&self) -> usize {
        self.measures.len()
    }

    pub fn measure_types(&self) -> Vec<MeasureType> {
        self.measures.iter().map(|m| m.data_type).collect()
    }
}
