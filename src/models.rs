//
// models.rs
// dicom-npy
//
// Serializable records describing source images, converted arrays, and batch outcomes.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Header attributes logged for each source image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSummary {
    pub modality: Option<String>,
    pub sop_class_uid: Option<String>,
    pub transfer_syntax: String,
    pub rows: Option<u32>,
    pub columns: Option<u32>,
    pub number_of_frames: Option<u32>,
    pub samples_per_pixel: Option<u16>,
    pub bits_allocated: Option<u16>,
    pub photometric_interpretation: Option<String>,
    pub has_pixel_data: bool,
}

/// Aggregate statistics over array values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrayStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub total_elements: usize,
}

/// Result of converting one DICOM file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub source: PathBuf,
    pub output: PathBuf,
    pub compressed: Option<bool>,
    pub shape: Vec<usize>,
    pub dtype: String,
}

/// Result of loading one NPY file back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub path: PathBuf,
    pub shape: Vec<usize>,
    pub dtype: String,
    pub statistics: Option<ArrayStatistics>,
}

/// A file the batch skipped, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a whole directory pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub converted: Vec<ConversionRecord>,
    pub verified: Vec<VerificationRecord>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn record_failure(&mut self, path: impl Into<PathBuf>, error: impl ToString) {
        self.failures.push(FileFailure {
            path: path.into(),
            error: error.to_string(),
        });
    }

    pub fn processed(&self) -> usize {
        self.converted.len() + self.verified.len() + self.failures.len()
    }
}
