use serde::{Deserialize, Serialize};

use crate::engine::core::{CompositeKey, MeasureType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureValue {
    Null,
    Long(i64),
    Double(f64),
    /// Decimal kept in its textual form to avoid precision loss.
    Decimal(String),
}

impl MeasureValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            MeasureValue::Null => "null",
            MeasureValue::Long(_) => "long",
            MeasureValue::Double(_) => "double",
            MeasureValue::Decimal(_) => "decimal",
        }
    }

    /// Whether this value can be stored in a measure column of `data_type`.
    pub fn fits(&self, data_type: MeasureType) -> bool {
        match self {
            MeasureValue::Null => true,
            MeasureValue::Long(_) => matches!(
                data_type,
                MeasureType::Short | MeasureType::Int | MeasureType::Long
            ),
            MeasureValue::Double(_) => data_type == MeasureType::Double,
            MeasureValue::Decimal(_) => data_type == MeasureType::Decimal,
        }
    }
}

/// One row as produced by a segment stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRow {
    pub key: CompositeKey,
    #[serde(default)]
    pub measures: Vec<MeasureValue>,
}

impl MergeRow {
    pub fn new(key: CompositeKey, measures: Vec<MeasureValue>) -> Self {
        Self { key, measures }
    }
}
