//
// dump.rs
// dicom-npy
//
// Renders the file meta group and dataset of a DICOM file as indented text, one attribute per line.
//
// Thales Matheus Mendonça Santos - October 2026

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use dicom::core::dictionary::DataDictionary;
use dicom::core::header::Header;
use dicom::core::value::Value;
use dicom::core::{PrimitiveValue, Tag, VR};
use dicom::dictionary_std::{tags, StandardDataDictionary};
use dicom::object::{open_file, DefaultDicomObject, InMemDicomObject};

/// Print the dump of `path` to stdout.
pub fn dump_file(path: &Path, max_depth: usize, max_value_len: usize) -> Result<()> {
    let obj = open_file(path).with_context(|| format!("Failed to open DICOM file {:?}", path))?;
    println!("{}", dump_object(&obj, max_depth, max_value_len));
    Ok(())
}

pub fn dump_object(obj: &DefaultDicomObject, max_depth: usize, max_value_len: usize) -> String {
    let meta = obj.meta();
    let mut out = String::new();

    let _ = writeln!(out, "File Meta Information");
    let meta_lines = [
        (tags::MEDIA_STORAGE_SOP_CLASS_UID, meta.media_storage_sop_class_uid.as_str()),
        (tags::MEDIA_STORAGE_SOP_INSTANCE_UID, meta.media_storage_sop_instance_uid.as_str()),
        (tags::TRANSFER_SYNTAX_UID, meta.transfer_syntax()),
        (tags::IMPLEMENTATION_CLASS_UID, meta.implementation_class_uid.as_str()),
    ];
    for (tag, value) in meta_lines {
        let _ = writeln!(
            out,
            "{} {:<36} UI: {}",
            format_tag(tag),
            tag_name(tag),
            truncate(value.trim_end_matches('\0'), max_value_len)
        );
    }

    let _ = writeln!(out, "Dataset");
    write_elements(obj, 0, max_depth, max_value_len, &mut out);
    out
}

fn write_elements(
    obj: &InMemDicomObject<StandardDataDictionary>,
    depth: usize,
    max_depth: usize,
    max_value_len: usize,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);

    for elem in obj.iter() {
        let tag = elem.tag();
        let vr = elem.vr();
        let prefix = format!("{}{} {:<36} {}:", indent, format_tag(tag), tag_name(tag), vr);

        match elem.value() {
            Value::Primitive(value) => {
                let _ = writeln!(out, "{} {}", prefix, render_primitive(value, vr, max_value_len));
            }
            Value::Sequence(seq) => {
                let items = seq.items();
                let _ = writeln!(out, "{} <Sequence of {} item(s)>", prefix, items.len());
                if depth < max_depth {
                    for (idx, item) in items.iter().enumerate() {
                        let _ = writeln!(out, "{}  > Item {}", indent, idx + 1);
                        write_elements(item, depth + 1, max_depth, max_value_len, out);
                    }
                }
            }
            Value::PixelSequence(seq) => {
                let _ = writeln!(
                    out,
                    "{} <Encapsulated, {} fragment(s)>",
                    prefix,
                    seq.fragments().len()
                );
            }
        }
    }
}

fn render_primitive(value: &PrimitiveValue, vr: VR, max_value_len: usize) -> String {
    match vr {
        // Binary payloads are summarized by size only.
        VR::OB | VR::OW | VR::OF | VR::OD | VR::OL | VR::OV | VR::UN => {
            format!("Array of {} bytes", value.calculate_byte_len())
        }
        _ => format!("'{}'", truncate(value.to_str().trim(), max_value_len)),
    }
}

fn truncate(input: &str, limit: usize) -> String {
    if input.chars().count() <= limit {
        return input.to_string();
    }
    let mut truncated: String = input.chars().take(limit).collect();
    truncated.push_str("...");
    truncated
}

fn format_tag(tag: Tag) -> String {
    format!("({:04X},{:04X})", tag.group(), tag.element())
}

fn tag_name(tag: Tag) -> &'static str {
    StandardDataDictionary
        .by_tag(tag)
        .map(|entry| entry.alias)
        .unwrap_or("Unknown Tag")
}
