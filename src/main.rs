use clap::{Parser, Subcommand};
use seg_merge::engine::core::{
    ColumnFileReader, ColumnarFileSink, CompactionJob, LoadContext, SegmentMeta,
};
use seg_merge::logging;
use seg_merge::shared::config::CONFIG;
use seg_merge::shared::storage_header::FileKind;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

#[derive(Parser)]
#[command(name = "seg_merge")]
#[command(about = "Merge sorted table segments into one columnar segment", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge segment files into a new output segment
    Merge {
        /// Input segment files (JSON lines, schema header first)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[arg(long)]
        database: String,

        #[arg(long)]
        table: String,

        #[arg(long, default_value = "0")]
        partition: String,

        /// Output segment id
        #[arg(long)]
        segment: String,

        /// Overrides `merge.store_dir` from the config file
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },
    /// Print the metadata of an output segment directory
    Inspect {
        dir: PathBuf,

        /// Also print every dictionary key in row order
        #[arg(long)]
        keys: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    match args.command {
        Command::Merge {
            inputs,
            database,
            table,
            partition,
            segment,
            store_dir,
        } => {
            let context = LoadContext {
                store_dir: store_dir.unwrap_or_else(|| PathBuf::from(&CONFIG.merge.store_dir)),
                database,
                table,
                partition_id: partition,
                segment_id: segment,
                task_no: CONFIG.merge.task_no,
                fact_timestamp: SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64,
                rows_per_blocklet: CONFIG.merge.rows_per_blocklet,
            };
            let job = CompactionJob::new(inputs, context);
            let summary = tokio::task::spawn_blocking(move || job.run()).await??;
            info!(
                rows = summary.rows_written,
                inputs = summary.input_streams,
                empty = summary.empty_streams,
                "Merge finished"
            );
            println!("{} rows written", summary.rows_written);
        }
        Command::Inspect { dir, keys } => {
            let meta = SegmentMeta::load(&dir)?;
            println!("{}", serde_json::to_string_pretty(&meta)?);
            if keys {
                let path = dir.join(ColumnarFileSink::column_file_name("mdkey"));
                for key in ColumnFileReader::read_values(&path, FileKind::MdKeyColumn)? {
                    println!("{}", hex::encode(key));
                }
            }
        }
    }

    Ok(())
}
