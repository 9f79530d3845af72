use dicom::core::Tag;
use dicom::dictionary_std::tags;
use dicom::object::DefaultDicomObject;
use tracing::info;

use crate::compression::transfer_syntax_name;
use crate::models::ImageSummary;

fn text_for_tag(obj: &DefaultDicomObject, tag: Tag) -> Option<String> {
    obj.element(tag)
        .ok()
        .and_then(|e| e.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn number_for_tag<T: std::str::FromStr>(obj: &DefaultDicomObject, tag: Tag) -> Option<T> {
    text_for_tag(obj, tag).and_then(|s| s.parse().ok())
}

pub fn extract_summary(obj: &DefaultDicomObject) -> ImageSummary {
    ImageSummary {
        modality: text_for_tag(obj, tags::MODALITY),
        sop_class_uid: text_for_tag(obj, tags::SOP_CLASS_UID),
        transfer_syntax: obj.meta().transfer_syntax().to_string(),
        rows: number_for_tag(obj, tags::ROWS),
        columns: number_for_tag(obj, tags::COLUMNS),
        number_of_frames: number_for_tag(obj, tags::NUMBER_OF_FRAMES),
        samples_per_pixel: number_for_tag(obj, tags::SAMPLES_PER_PIXEL),
        bits_allocated: number_for_tag(obj, tags::BITS_ALLOCATED),
        photometric_interpretation: text_for_tag(obj, tags::PHOTOMETRIC_INTERPRETATION),
        has_pixel_data: obj.element(tags::PIXEL_DATA).is_ok(),
    }
}

fn or_na<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn log_summary(summary: &ImageSummary) {
    info!(
        "Transfer Syntax: {} ({})",
        summary.transfer_syntax,
        transfer_syntax_name(&summary.transfer_syntax)
    );
    info!(
        "Modality: {} | SOP Class: {}",
        or_na(&summary.modality),
        or_na(&summary.sop_class_uid)
    );
    info!(
        "Rows: {} | Columns: {} | Frames: {} | Samples: {} | Bits Allocated: {} | Photometric: {}",
        or_na(&summary.rows),
        or_na(&summary.columns),
        or_na(&summary.number_of_frames),
        or_na(&summary.samples_per_pixel),
        or_na(&summary.bits_allocated),
        or_na(&summary.photometric_interpretation)
    );
    if !summary.has_pixel_data {
        info!("Pixel Data: absent");
    }
}
