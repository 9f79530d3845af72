//
// npy.rs
// dicom-npy
//
// Reads and writes NumPy .npy files, loading arrays of any supported element type for verification.
//
// Thales Matheus Mendonça Santos - October 2026

use std::fmt;
use std::fs;
use std::path::Path;

use ndarray::ArrayD;
use ndarray_npy::{read_npy, write_npy, ReadNpyError};

use crate::error::ConvertError;
use crate::models::ArrayStatistics;

/// Write `array` to `path`, creating missing parent directories.
pub fn write_array(path: &Path, array: &ArrayD<f32>) -> Result<(), ConvertError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_npy(path, array)?;
    Ok(())
}

/// An array loaded from disk, tagged with its element type.
#[derive(Debug, Clone, PartialEq)]
pub enum NpyArray {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    UInt8(ArrayD<u8>),
    Int8(ArrayD<i8>),
    UInt16(ArrayD<u16>),
    Int16(ArrayD<i16>),
    UInt32(ArrayD<u32>),
    Int32(ArrayD<i32>),
    UInt64(ArrayD<u64>),
    Int64(ArrayD<i64>),
}

macro_rules! each_variant {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            NpyArray::Float32($arr) => $body,
            NpyArray::Float64($arr) => $body,
            NpyArray::UInt8($arr) => $body,
            NpyArray::Int8($arr) => $body,
            NpyArray::UInt16($arr) => $body,
            NpyArray::Int16($arr) => $body,
            NpyArray::UInt32($arr) => $body,
            NpyArray::Int32($arr) => $body,
            NpyArray::UInt64($arr) => $body,
            NpyArray::Int64($arr) => $body,
        }
    };
}

impl NpyArray {
    /// NumPy name of the element type.
    pub fn dtype(&self) -> &'static str {
        match self {
            NpyArray::Float32(_) => "float32",
            NpyArray::Float64(_) => "float64",
            NpyArray::UInt8(_) => "uint8",
            NpyArray::Int8(_) => "int8",
            NpyArray::UInt16(_) => "uint16",
            NpyArray::Int16(_) => "int16",
            NpyArray::UInt32(_) => "uint32",
            NpyArray::Int32(_) => "int32",
            NpyArray::UInt64(_) => "uint64",
            NpyArray::Int64(_) => "int64",
        }
    }

    pub fn shape(&self) -> &[usize] {
        each_variant!(self, arr => arr.shape())
    }

    pub fn len(&self) -> usize {
        each_variant!(self, arr => arr.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Min/max/mean over all elements, or `None` for an empty array.
    pub fn statistics(&self) -> Option<ArrayStatistics> {
        each_variant!(self, arr => compute_statistics(arr.iter().map(|&v| v as f64)))
    }
}

impl fmt::Display for NpyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        each_variant!(self, arr => write!(f, "{}", arr))
    }
}

fn compute_statistics(values: impl Iterator<Item = f64>) -> Option<ArrayStatistics> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(ArrayStatistics {
        min,
        max,
        mean: sum / count as f64,
        total_elements: count,
    })
}

/// Try `T`; a descriptor mismatch means "some other element type" and yields `Ok(None)`.
fn try_read<T>(path: &Path) -> Result<Option<ArrayD<T>>, ConvertError>
where
    ArrayD<T>: ndarray_npy::ReadNpyExt,
{
    let result: Result<ArrayD<T>, ReadNpyError> = read_npy(path);
    match result {
        Ok(arr) => Ok(Some(arr)),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load an `.npy` file whatever its (supported) element type.
pub fn load_array(path: &Path) -> Result<NpyArray, ConvertError> {
    if let Some(arr) = try_read::<f32>(path)? {
        return Ok(NpyArray::Float32(arr));
    }
    if let Some(arr) = try_read::<f64>(path)? {
        return Ok(NpyArray::Float64(arr));
    }
    if let Some(arr) = try_read::<u8>(path)? {
        return Ok(NpyArray::UInt8(arr));
    }
    if let Some(arr) = try_read::<i8>(path)? {
        return Ok(NpyArray::Int8(arr));
    }
    if let Some(arr) = try_read::<u16>(path)? {
        return Ok(NpyArray::UInt16(arr));
    }
    if let Some(arr) = try_read::<i16>(path)? {
        return Ok(NpyArray::Int16(arr));
    }
    if let Some(arr) = try_read::<u32>(path)? {
        return Ok(NpyArray::UInt32(arr));
    }
    if let Some(arr) = try_read::<i32>(path)? {
        return Ok(NpyArray::Int32(arr));
    }
    if let Some(arr) = try_read::<u64>(path)? {
        return Ok(NpyArray::UInt64(arr));
    }
    if let Some(arr) = try_read::<i64>(path)? {
        return Ok(NpyArray::Int64(arr));
    }

    Err(ConvertError::UnsupportedDtype(path.to_path_buf()))
}
