//! Section construction (`spec.md` §4.4): one span per populated top-level
//! area, plus per-member and per-Code-attribute subsections.

use super::member_name;
use super::types::{Section, SectionPerm};
use crate::model::attribute::AttributeKind;
use crate::model::class_file::ClassFile;

fn span(name: impl Into<String>, start: u64, end: u64, perm: SectionPerm) -> Section {
    Section {
        name: name.into(),
        offset: start,
        size: end.saturating_sub(start),
        perm,
    }
}

/// `spec.md` §4.4 describes one section per populated top-level area.
/// `constant_pool` and `attributes` are always emitted (even with zero
/// entries, matching the original tool's always-allocated arrays for those
/// two); `interfaces`/`fields`/`methods` are omitted outright when empty.
pub fn sections(class_file: &ClassFile) -> Vec<Section> {
    let mut out = Vec::new();

    out.push(span(
        "class.constant_pool",
        class_file.constant_pool_offset,
        class_file.interfaces_offset,
        SectionPerm::Read,
    ));

    if !class_file.interfaces.is_empty() {
        out.push(span(
            "class.interfaces",
            class_file.interfaces_offset,
            class_file.fields_offset,
            SectionPerm::Read,
        ));
    }

    if !class_file.fields.is_empty() {
        out.push(span(
            "class.fields",
            class_file.fields_offset,
            class_file.methods_offset,
            SectionPerm::Read,
        ));
        for (i, field_slot) in class_file.fields.iter().enumerate() {
            let Some(field) = field_slot else { continue };
            let field_name = member_name(class_file, field).unwrap_or("?");
            let end_offset = class_file.fields[i + 1..]
                .iter()
                .flatten()
                .next()
                .map(|f| f.offset)
                .unwrap_or(class_file.methods_offset);
            out.push(span(
                format!("class.fields.{}.attr", field_name),
                field.offset,
                end_offset,
                SectionPerm::Read,
            ));
        }
    }

    if !class_file.methods.is_empty() {
        out.push(span(
            "class.methods",
            class_file.methods_offset,
            class_file.attributes_offset,
            SectionPerm::Read,
        ));
        for (i, method_slot) in class_file.methods.iter().enumerate() {
            let Some(method) = method_slot else { continue };
            if method.attributes.is_empty() {
                continue;
            }
            let method_name = member_name(class_file, method).unwrap_or("?");
            let end_offset = class_file.methods[i + 1..]
                .iter()
                .flatten()
                .next()
                .map(|m| m.offset)
                .unwrap_or(class_file.attributes_offset);
            out.push(span(
                format!("class.methods.{}.attr", method_name),
                method.offset,
                end_offset,
                SectionPerm::Read,
            ));

            if let Some((k, code)) = method.attributes.iter().enumerate().find_map(|(k, a)| {
                a.as_ref().and_then(|a| match &a.kind {
                    AttributeKind::Code(code) => Some((k, (code, a.attribute_length))),
                    _ => None,
                })
            }) {
                let (code, attribute_length) = code;
                out.push(span(
                    format!("class.methods.{}.attr.{}.code", method_name, k),
                    code.code_offset,
                    code.code_offset + attribute_length as u64,
                    SectionPerm::ReadExec,
                ));
            }
        }
    }

    out.push(span(
        "class.attr",
        class_file.attributes_offset,
        class_file.class_end_offset,
        SectionPerm::Read,
    ));

    out
}
