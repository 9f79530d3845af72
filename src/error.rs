//
// error.rs
// dicom-npy
//
// Error type shared by the per-file operations (classify, decode, write, load).
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::PathBuf;

use thiserror::Error;

/// Failure while handling a single DICOM or NPY file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid DICOM file {path:?}: {source}")]
    InvalidDicom {
        path: PathBuf,
        #[source]
        source: dicom::object::ReadError,
    },

    #[error("Missing Transfer Syntax UID in {0:?}")]
    MissingTransferSyntax(PathBuf),

    #[error("Failed to decode pixel data: {0}")]
    Decode(#[from] dicom_pixeldata::Error),

    #[error("Unexpected pixel array shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Failed to write NPY file: {0}")]
    WriteNpy(#[from] ndarray_npy::WriteNpyError),

    #[error("Failed to read NPY file: {0}")]
    ReadNpy(#[from] ndarray_npy::ReadNpyError),

    #[error("Unsupported NPY element type in {0:?}")]
    UnsupportedDtype(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
