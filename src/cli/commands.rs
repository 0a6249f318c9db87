use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::processors::{ConsistencyChecker, ParallelProcessor};
use crate::readers::{BaselineReader, MeasurementFile, Segmenter};
use crate::utils::progress::ProgressReporter;
use crate::writers::ReportWriter;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn, Level};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Process {
            input_file,
            output_file,
            format,
            scan,
        } => {
            let config = scan.resolve()?;
            let writer = ReportWriter::new().with_format(&format)?;
            info!(
                input = %input_file.display(),
                chunk_size = config.chunk_size,
                max_line_size = config.max_line_size,
                workers = config.max_workers,
                "Processing measurements"
            );

            let progress = ProgressReporter::new(0, "Aggregating measurements...", quiet);
            let merged = ParallelProcessor::from_config(&config)
                .process_file(&input_file, Some(&progress))?;

            match output_file {
                Some(path) => {
                    writer.write_to_path(&merged, &path)?;
                    info!(output = %path.display(), stations = merged.len(), "Report written");
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut out = stdout.lock();
                    writer.write(&merged, &mut out)?;
                    out.flush()?;
                }
            }
        }

        Commands::Verify { input_file, scan } => {
            let config = scan.resolve()?;

            let progress = ProgressReporter::new(0, "Aggregating measurements...", quiet);
            let merged = ParallelProcessor::from_config(&config)
                .process_file(&input_file, Some(&progress))?;

            let spinner = ProgressReporter::new_spinner("Running baseline reader...", quiet);
            let baseline = BaselineReader::new().read_file(&input_file)?;
            spinner.finish_with_message("Baseline complete");

            let checker = ConsistencyChecker::new();
            let report = checker.check(&merged, &baseline);
            println!("{}", checker.generate_summary(&report));

            if !report.is_consistent() {
                let stations: BTreeSet<&str> =
                    report.mismatches.iter().map(|m| m.station.as_str()).collect();
                warn!(stations = stations.len(), "Fast path disagrees with baseline");
                return Err(ProcessingError::BaselineMismatch {
                    stations: stations.len(),
                });
            }
            println!("All {} stations match the baseline", report.stations_checked);
        }

        Commands::Segments { input_file, scan } => {
            let config = scan.resolve()?;
            let file = MeasurementFile::open(&input_file)?;
            let segments = Segmenter::from_config(&config).segment(file.as_bytes())?;

            println!(
                "{} bytes in {} segments (chunk size {})",
                file.len(),
                segments.len(),
                config.chunk_size
            );
            println!("{:>8} {:>16} {:>16}", "index", "start", "size");
            for (index, segment) in segments.iter().enumerate() {
                println!("{:>8} {:>16} {:>16}", index, segment.start, segment.size);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))
}
