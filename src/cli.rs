//
// cli.rs
// dicom-npy
//
// Defines the CLI surface with Clap, sets up logging, and dispatches to the convert/verify modules.
//
// Thales Matheus Mendonça Santos - October 2026

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::compression;
use crate::convert::{self, ConversionSettings};
use crate::dump;
use crate::models::BatchReport;
use crate::verify;

/// Command-line interface glue code: defines the available verbs and dispatches to modules.
#[derive(Parser)]
#[command(name = "dicom-npy")]
#[command(about = "Convert DICOM pixel data into NumPy .npy arrays", long_about = None)]
pub struct Cli {
    /// Enable debug logging (dataset dumps, pixel previews)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every .dcm/.dicom file of a directory into .npy arrays
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(short, long)]
        recursive: bool,
        /// Apply rescale slope/intercept before writing
        #[arg(long)]
        rescale: bool,
        /// Write a JSON report of the run
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Load every .npy file of a directory and print its shape, type and content
    Verify {
        directory: PathBuf,
        #[arg(short, long)]
        recursive: bool,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Convert a directory, then verify the produced arrays
    Run {
        input: PathBuf,
        output: PathBuf,
        #[arg(short, long)]
        recursive: bool,
        #[arg(long)]
        rescale: bool,
    },
    /// Report whether a file's pixel data uses a compressed transfer syntax
    Check { file: PathBuf },
    /// Dump the whole DICOM dataset
    Dump {
        file: PathBuf,
        #[arg(long, default_value_t = 4)]
        max_depth: usize,
        #[arg(long, default_value_t = 64)]
        max_value_len: usize,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            recursive,
            rescale,
            report,
        } => {
            let settings = ConversionSettings {
                recursive,
                apply_modality_lut: rescale,
            };
            let batch = convert::convert_directory(&input, &output, &settings)?;
            if let Some(path) = report {
                write_report(&path, &batch)?;
            }
        }
        Commands::Verify {
            directory,
            recursive,
            report,
        } => {
            let batch = verify::verify_directory(&directory, recursive)?;
            if let Some(path) = report {
                write_report(&path, &batch)?;
            }
        }
        Commands::Run {
            input,
            output,
            recursive,
            rescale,
        } => {
            let settings = ConversionSettings {
                recursive,
                apply_modality_lut: rescale,
            };
            info!("-------------- CONVERT DICOM TO NPY --------------");
            convert::convert_directory(&input, &output, &settings)?;
            info!("-------------- VERIFY CONVERTED NPY --------------");
            verify::verify_directory(&output, recursive)?;
        }
        Commands::Check { file } => match compression::check_compression(&file) {
            Some(compressed) => println!(
                "{}: pixel data is {}",
                file.display(),
                if compressed { "compressed" } else { "not compressed" }
            ),
            None => error!("Could not determine compression for {:?}", file),
        },
        Commands::Dump {
            file,
            max_depth,
            max_value_len,
        } => dump::dump_file(&file, max_depth, max_value_len)?,
    }

    Ok(())
}

/// Install the fmt subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "dicom_npy=debug"
    } else {
        "dicom_npy=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with_target(false)
        .init();
}

pub fn write_report(path: &Path, report: &BatchReport) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create report {:?}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("Failed to write report {:?}", path))?;
    info!("Report written to {:?} ({} file(s))", path, report.processed());
    Ok(())
}
