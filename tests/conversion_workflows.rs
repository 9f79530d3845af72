//
// conversion_workflows.rs
// dicom-npy
//
// Integration tests covering compression detection, directory conversion, NPY verification, reports, and dumps.
//
// Thales Matheus Mendonça Santos - October 2026

use std::fs;
use std::path::Path;

use dicom::core::{DataElement, PrimitiveValue, Tag, VR};
use dicom::dictionary_std::StandardDataDictionary;
use dicom::object::{FileDicomObject, FileMetaTableBuilder, InMemDicomObject};
use dicom::transfer_syntax::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use dicom_npy::compression::{check_compression, is_compressed, is_compressed_syntax};
use dicom_npy::convert::{convert_directory, output_path_for, ConversionSettings};
use dicom_npy::models::BatchReport;
use dicom_npy::npy::{load_array, NpyArray};
use dicom_npy::verify::verify_directory;
use dicom_npy::{cli, dump, ConvertError};
use ndarray::{ArrayD, IxDyn};
use tempfile::tempdir;

fn write_test_dicom(path: &Path, frames: u16, pixels: Vec<u8>) {
    // Tiny 2x2 8-bit Secondary Capture instance with a rescale that maps v -> 2v - 1024.
    let mut obj = InMemDicomObject::new_empty_with_dict(StandardDataDictionary);
    let elements = [
        (Tag(0x0010, 0x0010), VR::PN, PrimitiveValue::from("Test^Patient")),
        (Tag(0x0010, 0x0020), VR::LO, PrimitiveValue::from("PAT123")),
        (Tag(0x0008, 0x0060), VR::CS, PrimitiveValue::from("OT")),
        (
            Tag(0x0008, 0x0016),
            VR::UI,
            PrimitiveValue::from("1.2.840.10008.5.1.4.1.1.7"),
        ),
        (
            Tag(0x0008, 0x0018),
            VR::UI,
            PrimitiveValue::from("1.2.826.0.1.3680043.2.1125.1"),
        ),
        (Tag(0x0028, 0x0010), VR::US, PrimitiveValue::from(2_u16)), // Rows
        (Tag(0x0028, 0x0011), VR::US, PrimitiveValue::from(2_u16)), // Columns
        (Tag(0x0028, 0x0002), VR::US, PrimitiveValue::from(1_u16)), // Samples per pixel
        (Tag(0x0028, 0x0100), VR::US, PrimitiveValue::from(8_u16)), // Bits Allocated
        (Tag(0x0028, 0x0101), VR::US, PrimitiveValue::from(8_u16)), // Bits Stored
        (Tag(0x0028, 0x0102), VR::US, PrimitiveValue::from(7_u16)), // High Bit
        (Tag(0x0028, 0x0103), VR::US, PrimitiveValue::from(0_u16)), // Pixel Representation
        (Tag(0x0028, 0x0004), VR::CS, PrimitiveValue::from("MONOCHROME2")),
        (
            Tag(0x0028, 0x0008),
            VR::IS,
            PrimitiveValue::from(frames.to_string()),
        ), // Number of Frames
        (Tag(0x0028, 0x1052), VR::DS, PrimitiveValue::from("-1024")), // Rescale Intercept
        (Tag(0x0028, 0x1053), VR::DS, PrimitiveValue::from("2")),     // Rescale Slope
        (Tag(0x7fe0, 0x0010), VR::OB, PrimitiveValue::from(pixels)),
    ];
    for (tag, vr, value) in elements {
        obj.put(DataElement::new(tag, vr, value));
    }

    let meta = FileMetaTableBuilder::new()
        .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN.uid())
        .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.7")
        .media_storage_sop_instance_uid("1.2.826.0.1.3680043.2.1125.1")
        .build()
        .expect("meta");

    let mut file_obj = FileDicomObject::new_empty_with_dict_and_meta(StandardDataDictionary, meta);
    for elem in obj {
        file_obj.put(elem);
    }
    file_obj.write_to_file(path).expect("write test dicom");
}

fn write_sample(path: &Path) {
    write_test_dicom(path, 1, vec![0, 64, 128, 255]);
}

fn float_values(array: &NpyArray) -> Vec<f32> {
    match array {
        NpyArray::Float32(arr) => arr.iter().copied().collect(),
        other => panic!("expected float32, got {}", other.dtype()),
    }
}

#[test]
fn classifier_matches_compressed_syntax_list() {
    assert!(is_compressed_syntax("1.2.840.10008.1.2.4.50"));
    assert!(is_compressed_syntax("1.2.840.10008.1.2.4.57"));
    assert!(is_compressed_syntax("1.2.840.10008.1.2.4.90"));
    assert!(is_compressed_syntax("1.2.840.10008.1.2.4.80"));

    assert!(!is_compressed_syntax("1.2.840.10008.1.2"));
    assert!(!is_compressed_syntax("1.2.840.10008.1.2.1"));
    assert!(!is_compressed_syntax("1.2.840.10008.1.2.5"));
}

#[test]
fn native_file_is_reported_uncompressed() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("sample.dcm");
    write_sample(&path);

    assert!(!is_compressed(&path).expect("classify"));
    assert_eq!(check_compression(&path), Some(false));
}

#[test]
fn invalid_file_has_no_compression_status() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.dcm");
    fs::write(&path, b"definitely not a DICOM file").expect("write junk");

    assert!(matches!(
        is_compressed(&path),
        Err(ConvertError::InvalidDicom { .. })
    ));
    assert_eq!(check_compression(&path), None);
}

#[test]
fn conversion_writes_one_array_per_dicom_file() {
    let src = tempdir().expect("src");
    let dst = tempdir().expect("dst");
    write_sample(&src.path().join("first.dcm"));
    write_sample(&src.path().join("second.DICOM"));
    fs::write(src.path().join("notes.txt"), "ignored").expect("write notes");

    let out = dst.path().join("npy");
    let report =
        convert_directory(src.path(), &out, &ConversionSettings::default()).expect("convert");

    assert_eq!(report.converted.len(), 2);
    assert!(report.failures.is_empty());
    assert!(out.join("first.npy").is_file());
    assert!(out.join("second.npy").is_file());

    let mut produced: Vec<_> = fs::read_dir(&out)
        .expect("read output")
        .map(|e| e.expect("entry").file_name().into_string().expect("utf8"))
        .collect();
    produced.sort();
    assert_eq!(produced, vec!["first.npy", "second.npy"]);
}

#[test]
fn invalid_file_is_skipped_and_batch_continues() {
    let src = tempdir().expect("src");
    let dst = tempdir().expect("dst");
    // Sorted before the valid file so the failure happens first.
    fs::write(src.path().join("a_broken.dcm"), b"garbage").expect("write junk");
    write_sample(&src.path().join("b_sample.dcm"));

    let report = convert_directory(src.path(), dst.path(), &ConversionSettings::default())
        .expect("convert");

    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].path.ends_with("a_broken.dcm"));
    assert_eq!(report.converted.len(), 1);
    assert!(dst.path().join("b_sample.npy").is_file());
    assert!(!dst.path().join("a_broken.npy").exists());
}

#[test]
fn verification_reproduces_written_shape_and_dtype() {
    let src = tempdir().expect("src");
    let dst = tempdir().expect("dst");
    write_sample(&src.path().join("sample.dcm"));

    let converted = convert_directory(src.path(), dst.path(), &ConversionSettings::default())
        .expect("convert");
    let verified = verify_directory(dst.path(), false).expect("verify");

    assert_eq!(verified.verified.len(), 1);
    let written = &converted.converted[0];
    let loaded = &verified.verified[0];
    assert_eq!(loaded.shape, written.shape);
    assert_eq!(loaded.shape, vec![2, 2]);
    assert_eq!(loaded.dtype, "float32");
    assert_eq!(written.compressed, Some(false));

    let stats = loaded.statistics.expect("statistics");
    assert_eq!(stats.total_elements, 4);
    assert!((stats.min - 0.0).abs() < f64::EPSILON);
    assert!((stats.max - 255.0).abs() < f64::EPSILON);
}

#[test]
fn stored_values_are_kept_unless_rescale_is_requested() {
    let src = tempdir().expect("src");
    let raw = tempdir().expect("raw");
    let rescaled = tempdir().expect("rescaled");
    write_sample(&src.path().join("sample.dcm"));

    convert_directory(src.path(), raw.path(), &ConversionSettings::default()).expect("raw");
    let settings = ConversionSettings {
        apply_modality_lut: true,
        ..ConversionSettings::default()
    };
    convert_directory(src.path(), rescaled.path(), &settings).expect("rescaled");

    let raw_values = float_values(&load_array(&raw.path().join("sample.npy")).expect("load"));
    assert_eq!(raw_values, vec![0.0, 64.0, 128.0, 255.0]);

    let rescaled_values =
        float_values(&load_array(&rescaled.path().join("sample.npy")).expect("load"));
    assert_eq!(rescaled_values, vec![-1024.0, -896.0, -768.0, -514.0]);
}

#[test]
fn multi_frame_images_keep_the_frame_axis() {
    let src = tempdir().expect("src");
    let dst = tempdir().expect("dst");
    write_test_dicom(&src.path().join("cine.dcm"), 2, (0..8).collect());

    let report = convert_directory(src.path(), dst.path(), &ConversionSettings::default())
        .expect("convert");

    assert_eq!(report.converted[0].shape, vec![2, 2, 2]);
    let loaded = load_array(&dst.path().join("cine.npy")).expect("load");
    assert_eq!(loaded.shape(), &[2, 2, 2]);
    assert_eq!(float_values(&loaded)[7], 7.0);
}

#[test]
fn recursive_conversion_mirrors_subdirectories() {
    let src = tempdir().expect("src");
    let dst = tempdir().expect("dst");
    fs::create_dir(src.path().join("series1")).expect("mkdir");
    write_sample(&src.path().join("series1").join("slice.dcm"));
    write_sample(&src.path().join("top.dcm"));

    let flat = convert_directory(src.path(), dst.path(), &ConversionSettings::default())
        .expect("flat");
    assert_eq!(flat.converted.len(), 1);

    let settings = ConversionSettings {
        recursive: true,
        ..ConversionSettings::default()
    };
    let deep = convert_directory(src.path(), dst.path(), &settings).expect("recursive");
    assert_eq!(deep.converted.len(), 2);
    assert!(dst.path().join("series1").join("slice.npy").is_file());

    let verified = verify_directory(dst.path(), true).expect("verify");
    assert_eq!(verified.verified.len(), 2);
}

#[test]
fn output_path_replaces_the_source_extension() {
    let src = Path::new("/data/dicom");
    let dst = Path::new("/data/npy");

    assert_eq!(
        output_path_for(src, dst, Path::new("/data/dicom/chest.dicom")),
        Path::new("/data/npy/chest.npy")
    );
    assert_eq!(
        output_path_for(src, dst, Path::new("/data/dicom/ct/slice.001.dcm")),
        Path::new("/data/npy/ct/slice.001.npy")
    );
}

#[test]
fn verifier_reports_other_dtypes_and_skips_corrupt_files() {
    let dir = tempdir().expect("tempdir");
    let array = ArrayD::<i16>::from_shape_vec(IxDyn(&[3]), vec![-5, 0, 5]).expect("array");
    ndarray_npy::write_npy(dir.path().join("ints.npy"), &array).expect("write npy");
    fs::write(dir.path().join("corrupt.npy"), b"\x93NUMPY broken").expect("write junk");

    let report = verify_directory(dir.path(), false).expect("verify");

    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].path.ends_with("corrupt.npy"));
    assert_eq!(report.verified.len(), 1);
    assert_eq!(report.verified[0].dtype, "int16");
    assert_eq!(report.verified[0].shape, vec![3]);
    let stats = report.verified[0].statistics.expect("statistics");
    assert!((stats.mean - 0.0).abs() < f64::EPSILON);
}

#[test]
fn batch_report_is_written_as_json() {
    let src = tempdir().expect("src");
    let dst = tempdir().expect("dst");
    write_sample(&src.path().join("sample.dcm"));
    fs::write(src.path().join("zz_broken.dcm"), b"junk").expect("write junk");

    let report = convert_directory(src.path(), dst.path(), &ConversionSettings::default())
        .expect("convert");
    let report_path = dst.path().join("report.json");
    cli::write_report(&report_path, &report).expect("write report");

    let text = fs::read_to_string(&report_path).expect("read report");
    let parsed: BatchReport = serde_json::from_str(&text).expect("parse report");
    assert_eq!(parsed.converted.len(), 1);
    assert_eq!(parsed.failures.len(), 1);
    assert_eq!(parsed.processed(), 2);
    assert_eq!(parsed.converted[0].dtype, "float32");
}

#[test]
fn dataset_dump_lists_meta_and_summarizes_pixels() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("sample.dcm");
    write_sample(&path);

    let obj = dicom::object::open_file(&path).expect("open");
    let text = dump::dump_object(&obj, 4, 64);

    assert!(text.contains("TransferSyntaxUID"));
    assert!(text.contains(EXPLICIT_VR_LITTLE_ENDIAN.uid()));
    assert!(text.contains("PatientName"));
    assert!(text.contains("Test^Patient"));
    assert!(text.contains("Array of 4 bytes"));
}
