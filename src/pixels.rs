//
// pixels.rs
// dicom-npy
//
// Decodes pixel data into a float32 ndarray shaped the way NumPy consumers expect.
//
// Thales Matheus Mendonça Santos - October 2026

use dicom::object::DefaultDicomObject;
use dicom::pixeldata::PixelDecoder;
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, VoiLutOption};
use ndarray::{Array4, ArrayD, IxDyn};

use crate::error::ConvertError;

/// Decode the pixel data of `obj` into an `f32` array.
///
/// Stored values are kept as-is unless `apply_modality_lut` is set, in which case
/// the rescale slope/intercept are applied first.
pub fn decode_pixels(
    obj: &DefaultDicomObject,
    apply_modality_lut: bool,
) -> Result<ArrayD<f32>, ConvertError> {
    let decoded = obj.decode_pixel_data()?;

    let modality_lut = if apply_modality_lut {
        ModalityLutOption::Default
    } else {
        ModalityLutOption::None
    };
    let options = ConvertOptions::new()
        .with_modality_lut(modality_lut)
        .with_voi_lut(VoiLutOption::Identity);

    let array = decoded.to_ndarray_with_options::<f32>(&options)?;
    squeeze_frames_and_samples(array)
}

/// Collapse the `[frames, rows, columns, samples]` layout, dropping the frame and
/// sample axes when they have a single entry.
pub fn squeeze_frames_and_samples(array: Array4<f32>) -> Result<ArrayD<f32>, ConvertError> {
    let (frames, rows, columns, samples) = array.dim();

    let mut shape = Vec::with_capacity(4);
    if frames > 1 {
        shape.push(frames);
    }
    shape.push(rows);
    shape.push(columns);
    if samples > 1 {
        shape.push(samples);
    }

    // to_ndarray yields a standard-layout array, so reshaping never copies.
    Ok(array.into_shape(IxDyn(&shape))?)
}
