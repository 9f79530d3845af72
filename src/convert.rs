//
// convert.rs
// dicom-npy
//
// Walks a directory of DICOM files and writes each image's pixel data as a float32 .npy array.
//
// Thales Matheus Mendonça Santos - October 2026

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dicom::object::open_file;
use tracing::{debug, enabled, error, info, warn, Level};
use walkdir::WalkDir;

use crate::compression::check_compression;
use crate::error::ConvertError;
use crate::models::{BatchReport, ConversionRecord};
use crate::{dump, metadata, npy, pixels};

/// Extensions (compared case-insensitively) treated as DICOM input.
pub const DICOM_EXTENSIONS: &[&str] = &["dcm", "dicom"];

/// Depth and value length used for the per-file dataset dump at debug level.
const DUMP_MAX_DEPTH: usize = 4;
const DUMP_MAX_VALUE_LEN: usize = 64;

/// Knobs for a conversion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionSettings {
    /// Descend into subdirectories, mirroring their layout in the output.
    pub recursive: bool,
    /// Apply rescale slope/intercept instead of keeping stored values.
    pub apply_modality_lut: bool,
}

fn has_extension(path: &Path, accepted: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            accepted.iter().any(|a| ext.eq_ignore_ascii_case(a))
        })
}

/// Sorted list of regular files below `dir` whose extension is one of `accepted`.
pub(crate) fn list_files(dir: &Path, accepted: &[&str], recursive: bool) -> Result<Vec<PathBuf>> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to read directory {:?}", dir))?;
        if entry.file_type().is_file() && has_extension(entry.path(), accepted) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Destination of the array converted from `file`: same relative location under
/// `dst_root`, extension replaced by `.npy`.
pub fn output_path_for(src_root: &Path, dst_root: &Path, file: &Path) -> PathBuf {
    let relative = file
        .strip_prefix(src_root)
        .ok()
        .map(Path::to_path_buf)
        .or_else(|| file.file_name().map(PathBuf::from))
        .unwrap_or_else(|| file.to_path_buf());
    dst_root.join(relative).with_extension("npy")
}

/// Convert every DICOM file in `src` into an `.npy` file under `dst`.
///
/// Per-file failures are logged and recorded in the report; only an unreadable
/// source or uncreatable destination aborts the run.
pub fn convert_directory(src: &Path, dst: &Path, settings: &ConversionSettings) -> Result<BatchReport> {
    fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create output directory {:?}", dst))?;

    let files = list_files(src, DICOM_EXTENSIONS, settings.recursive)?;
    info!("Found {} DICOM file(s) in {:?}", files.len(), src);

    let mut report = BatchReport::default();
    let mut written: HashSet<PathBuf> = HashSet::new();

    for path in files {
        info!("******************** CURRENT IMAGE ********************");
        info!("DICOM file path: {}", path.display());

        let output = output_path_for(src, dst, &path);
        if !written.insert(output.clone()) {
            warn!(
                "{:?} maps to an output already written in this run; overwriting {:?}",
                path, output
            );
        }

        match convert_file(&path, &output, settings) {
            Ok(record) => {
                info!("Saved {:?} with shape {:?}", record.output, record.shape);
                report.converted.push(record);
            }
            Err(e) => {
                error!("Skipping {:?}: {}", path, e);
                report.record_failure(&path, e);
            }
        }
    }

    info!(
        "Converted {} file(s), {} failure(s)",
        report.converted.len(),
        report.failures.len()
    );
    Ok(report)
}

/// Decode one DICOM file and write its pixel array to `output`.
pub fn convert_file(
    path: &Path,
    output: &Path,
    settings: &ConversionSettings,
) -> Result<ConversionRecord, ConvertError> {
    let compressed = check_compression(path);
    match compressed {
        Some(true) => info!("The pixel data is compressed."),
        Some(false) => info!("The pixel data is not compressed."),
        None => warn!("Compression status unknown for {:?}", path),
    }

    let obj = open_file(path).map_err(|source| ConvertError::InvalidDicom {
        path: path.to_path_buf(),
        source,
    })?;

    metadata::log_summary(&metadata::extract_summary(&obj));
    if enabled!(Level::DEBUG) {
        debug!(
            "DICOM metadata:\n{}",
            dump::dump_object(&obj, DUMP_MAX_DEPTH, DUMP_MAX_VALUE_LEN)
        );
    }

    let array = pixels::decode_pixels(&obj, settings.apply_modality_lut)?;
    debug!("Pixel data:\n{}", array);

    npy::write_array(output, &array)?;

    Ok(ConversionRecord {
        source: path.to_path_buf(),
        output: output.to_path_buf(),
        compressed,
        shape: array.shape().to_vec(),
        dtype: "float32".to_string(),
    })
}
