use std::path::Path;

use anyhow::Result;
use tracing::{error, info};

use crate::convert::list_files;
use crate::error::ConvertError;
use crate::models::{BatchReport, VerificationRecord};
use crate::npy;

/// Load every `.npy` file in `dir` and log what it contains.
pub fn verify_directory(dir: &Path, recursive: bool) -> Result<BatchReport> {
    let files = list_files(dir, &["npy"], recursive)?;
    info!("Found {} NPY file(s) in {:?}", files.len(), dir);

    let mut report = BatchReport::default();
    for path in files {
        match verify_file(&path) {
            Ok(record) => report.verified.push(record),
            Err(e) => {
                error!("Error loading NPY file {:?}: {}", path, e);
                report.record_failure(&path, e);
            }
        }
    }

    Ok(report)
}

pub fn verify_file(path: &Path) -> Result<VerificationRecord, ConvertError> {
    let array = npy::load_array(path)?;
    let statistics = array.statistics();

    info!("******************** CURRENT IMAGE ********************");
    info!("File path: {}", path.display());
    info!("Loaded array shape: {:?}", array.shape());
    info!("Loaded array data type: {}", array.dtype());
    if let Some(stats) = &statistics {
        info!(
            "Min: {:.2} | Max: {:.2} | Mean: {:.2}",
            stats.min, stats.max, stats.mean
        );
    }
    info!("Loaded array content:\n{}", array);

    Ok(VerificationRecord {
        path: path.to_path_buf(),
        shape: array.shape().to_vec(),
        dtype: array.dtype().to_string(),
        statistics,
    })
}
