use crate::config::ScanConfig;
use crate::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use validator::Validate;

#[derive(Parser)]
#[command(name = "brc-processor")]
#[command(about = "Parallel min/mean/max aggregation of station;temperature files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress output and info logs")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a measurements file and print the sorted report
    Process {
        #[arg(short, long, help = "Input measurements file")]
        input_file: PathBuf,

        #[arg(short, long, help = "Write the report here instead of stdout")]
        output_file: Option<PathBuf>,

        #[arg(short, long, default_value = "braced", help = "braced, lines or json")]
        format: String,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Aggregate a file with both the parallel and the baseline reader and compare
    Verify {
        #[arg(short, long, help = "Input measurements file")]
        input_file: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Show how a file would be split into segments
    Segments {
        #[arg(short, long, help = "Input measurements file")]
        input_file: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    #[arg(long, help = "Target segment size in bytes [default: 100MB]")]
    pub chunk_size: Option<u64>,

    #[arg(long, help = "Maximum line length in bytes [default: 300]")]
    pub max_line_size: Option<usize>,

    #[arg(long, help = "Worker threads [default: number of CPUs]")]
    pub max_workers: Option<usize>,

    #[arg(long, help = "Settings file (toml, json or yaml)")]
    pub config: Option<PathBuf>,
}

impl ScanArgs {
    /// Defaults, then the settings file, then command-line flags.
    pub fn resolve(&self) -> Result<ScanConfig> {
        let config = ScanConfig::load(self.config.as_deref())?
            .with_chunk_size(self.chunk_size)
            .with_max_line_size(self.max_line_size)
            .with_max_workers(self.max_workers);
        config.validate()?;
        Ok(config)
    }
}
