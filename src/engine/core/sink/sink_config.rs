use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::engine::core::{MeasureType, SegmentProperties, WriteLayout};

/// Aggregation class of a measure column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggType {
    Long,
    BigDecimal,
    Double,
}

impl AggType {
    pub fn for_measure(data_type: MeasureType) -> Self {
        match data_type {
            MeasureType::Short | MeasureType::Int | MeasureType::Long => AggType::Long,
            MeasureType::Decimal => AggType::BigDecimal,
            MeasureType::Double => AggType::Double,
        }
    }

    /// Single-character tag used in segment metadata.
    pub fn code(&self) -> char {
        match self {
            AggType::Long => 'l',
            AggType::BigDecimal => 'b',
            AggType::Double => 'n',
        }
    }
}

/// Identity of the compaction task producing the output segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFileAttributes {
    pub task_no: u32,
    pub fact_timestamp: u64,
}

/// Already-resolved location and identity of the output segment.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub store_dir: PathBuf,
    pub database: String,
    pub table: String,
    pub partition_id: String,
    pub segment_id: String,
    pub task_no: u32,
    pub fact_timestamp: u64,
    pub rows_per_blocklet: usize,
}

/// Everything the columnar sink needs, derived from the segment schema and
/// the load context.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub database: String,
    pub table: String,
    pub measure_count: usize,
    pub mdkey_len: usize,
    /// Number of dictionary-encoded dimensions.
    pub dimension_count: usize,
    pub no_dictionary_count: usize,
    pub complex_count: usize,
    pub dim_lens: Vec<u32>,
    pub agg_types: Vec<AggType>,
    pub mdkey_index: usize,
    pub file_attributes: DataFileAttributes,
    pub data_dir: PathBuf,
    pub rows_per_blocklet: usize,
    pub layout: WriteLayout,
}

impl SinkConfig {
    pub fn build(properties: &SegmentProperties, context: &LoadContext) -> Self {
        let layout = WriteLayout::from_properties(properties);
        Self {
            database: context.database.clone(),
            table: context.table.clone(),
            measure_count: properties.measure_count(),
            mdkey_len: properties.mdkey_len(),
            dimension_count: properties.dictionary_count(),
            no_dictionary_count: properties.no_dictionary_count(),
            complex_count: properties.complex_count(),
            dim_lens: properties.dim_columns_cardinality(),
            agg_types: properties
                .measures
                .iter()
                .map(|m| AggType::for_measure(m.data_type))
                .collect(),
            mdkey_index: layout.mdkey_index(),
            file_attributes: DataFileAttributes {
                task_no: context.task_no,
                fact_timestamp: context.fact_timestamp,
            },
            data_dir: Self::data_dir_for(context),
            rows_per_blocklet: context.rows_per_blocklet.max(1),
            layout,
        }
    }

    /// `<store>/<database>/<table>/Fact/Part<partition>/Segment_<segment>`
    pub fn data_dir_for(context: &LoadContext) -> PathBuf {
        context
            .store_dir
            .join(&context.database)
            .join(&context.table)
            .join("Fact")
            .join(format!("Part{}", context.partition_id))
            .join(format!("Segment_{}", context.segment_id))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Creates the output directory. Called once before the sink is initialized.
    pub fn provision_data_dir(&self) -> std::io::Result<()> {
        info!(
            target: "seg_merge::sink",
            dir = %self.data_dir.display(),
            "Creating output directory"
        );
        std::fs::create_dir_all(&self.data_dir)
    }
}
