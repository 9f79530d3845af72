//
// compression.rs
// dicom-npy
//
// Classifies a file's pixel data as compressed or native by looking at its Transfer Syntax UID.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::Path;

use dicom::dictionary_std::tags;
use dicom::encoding::transfer_syntax::TransferSyntaxIndex;
use dicom::object::OpenFileOptions;
use dicom::transfer_syntax::TransferSyntaxRegistry;
use tracing::error;

use crate::error::ConvertError;

/// Transfer syntax UID fragments that denote encapsulated (compressed) pixel data.
///
/// Matching is by substring, so the bare JPEG family prefix already covers the
/// more specific entries that follow it.
pub const COMPRESSED_TRANSFER_SYNTAX_UIDS: &[&str] = &[
    "1.2.840.10008.1.2.4.",   // JPEG family
    "1.2.840.10008.1.2.4.50", // JPEG Baseline
    "1.2.840.10008.1.2.4.51", // JPEG Extended
    "1.2.840.10008.1.2.4.90", // JPEG 2000 Lossless
    "1.2.840.10008.1.2.4.91", // JPEG 2000 Part 2
    "1.2.840.10008.1.2.4.70", // JPEG Lossless
    "1.2.840.10008.1.2.4.80", // JPEG-LS Lossless
];

pub fn is_compressed_syntax(uid: &str) -> bool {
    COMPRESSED_TRANSFER_SYNTAX_UIDS
        .iter()
        .any(|fragment| uid.contains(fragment))
}

/// Read only the file meta and header attributes of `path` and report whether
/// its pixel data is stored with a compressed transfer syntax.
pub fn is_compressed(path: &Path) -> Result<bool, ConvertError> {
    let obj = OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .open_file(path)
        .map_err(|source| ConvertError::InvalidDicom {
            path: path.to_path_buf(),
            source,
        })?;

    let uid = obj.meta().transfer_syntax();
    if uid.trim().is_empty() {
        return Err(ConvertError::MissingTransferSyntax(path.to_path_buf()));
    }

    Ok(is_compressed_syntax(uid))
}

/// Logging wrapper around [`is_compressed`]: failures are reported and yield `None`.
pub fn check_compression(path: &Path) -> Option<bool> {
    match is_compressed(path) {
        Ok(compressed) => Some(compressed),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

/// Human readable name of a transfer syntax, falling back to the raw UID.
pub fn transfer_syntax_name(uid: &str) -> String {
    TransferSyntaxRegistry
        .get(uid)
        .map(|ts| ts.name().to_string())
        .unwrap_or_else(|| uid.to_string())
}
