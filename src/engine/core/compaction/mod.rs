pub mod compaction_job;
