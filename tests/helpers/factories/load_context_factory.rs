use crate::engine::core::LoadContext;
use std::path::{Path, PathBuf};

pub struct LoadContextFactory {
    context: LoadContext,
}

impl LoadContextFactory {
    pub fn new() -> Self {
        Self {
            context: LoadContext {
                store_dir: PathBuf::from("/tmp/seg_merge/store"),
                database: "sales".to_string(),
                table: "orders".to_string(),
                partition_id: "0".to_string(),
                segment_id: "1".to_string(),
                task_no: 0,
                fact_timestamp: 1_700_000_000_000,
                rows_per_blocklet: 32_000,
            },
        }
    }

    pub fn with_store_dir(mut self, dir: &Path) -> Self {
        self.context.store_dir = dir.to_path_buf();
        self
    }

    pub fn with_segment_id(mut self, id: &str) -> Self {
        self.context.segment_id = id.to_string();
        self
    }

    pub fn with_rows_per_blocklet(mut self, rows: usize) -> Self {
        self.context.rows_per_blocklet = rows;
        self
    }

    pub fn with_task_no(mut self, task_no: u32) -> Self {
        self.context.task_no = task_no;
        self
    }

    pub fn create(self) -> LoadContext {
        self.context
    }
}
