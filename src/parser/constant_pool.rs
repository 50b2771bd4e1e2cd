//! Constant-pool entry decoder (`spec.md` §4.2).

use crate::cursor::ByteCursor;
use crate::model::constant_pool::{ConstantPoolEntry, ConstantPoolKind};

/// Reads one tagged entry at the cursor's current position. Returns `None`
/// on an unknown tag or a short read — both are tolerated per `spec.md` §7;
/// the pool decoder simply truncates the pool at that point.
pub fn decode_entry(cursor: &mut ByteCursor, absolute_offset: u64) -> Option<ConstantPoolEntry> {
    let start = cursor.tell();
    let tag = cursor.read_be8().ok()?;

    let kind = match tag {
        1 => {
            let length = cursor.read_be16().ok()? as usize;
            let bytes = cursor.read_bytes(length).ok()?;
            let text = modified_utf8_to_string(bytes);
            ConstantPoolKind::Utf8(text)
        }
        3 => ConstantPoolKind::Integer(cursor.read_be32().ok()? as i32),
        4 => ConstantPoolKind::Float(f32::from_bits(cursor.read_be32().ok()?)),
        5 => ConstantPoolKind::Long(cursor.read_be64().ok()? as i64),
        6 => ConstantPoolKind::Double(f64::from_bits(cursor.read_be64().ok()?)),
        7 => ConstantPoolKind::Class {
            name_index: cursor.read_be16().ok()?.into(),
        },
        8 => ConstantPoolKind::String {
            string_index: cursor.read_be16().ok()?.into(),
        },
        9 => ConstantPoolKind::FieldRef {
            class_index: cursor.read_be16().ok()?.into(),
            name_and_type_index: cursor.read_be16().ok()?.into(),
        },
        10 => ConstantPoolKind::MethodRef {
            class_index: cursor.read_be16().ok()?.into(),
            name_and_type_index: cursor.read_be16().ok()?.into(),
        },
        11 => ConstantPoolKind::InterfaceMethodRef {
            class_index: cursor.read_be16().ok()?.into(),
            name_and_type_index: cursor.read_be16().ok()?.into(),
        },
        12 => ConstantPoolKind::NameAndType {
            name_index: cursor.read_be16().ok()?.into(),
            descriptor_index: cursor.read_be16().ok()?.into(),
        },
        15 => ConstantPoolKind::MethodHandle {
            reference_kind: cursor.read_be8().ok()?,
            reference_index: cursor.read_be16().ok()?.into(),
        },
        16 => ConstantPoolKind::MethodType {
            descriptor_index: cursor.read_be16().ok()?.into(),
        },
        17 => ConstantPoolKind::Dynamic {
            bootstrap_method_attr_index: cursor.read_be16().ok()?,
            name_and_type_index: cursor.read_be16().ok()?.into(),
        },
        18 => ConstantPoolKind::InvokeDynamic {
            bootstrap_method_attr_index: cursor.read_be16().ok()?,
            name_and_type_index: cursor.read_be16().ok()?.into(),
        },
        19 => ConstantPoolKind::Module {
            name_index: cursor.read_be16().ok()?.into(),
        },
        20 => ConstantPoolKind::Package {
            name_index: cursor.read_be16().ok()?.into(),
        },
        _ => {
            log::warn!("unknown constant pool tag {} at offset {}", tag, absolute_offset);
            return None;
        }
    };

    let size = (cursor.tell() - start) as u32;
    Some(ConstantPoolEntry {
        kind,
        offset: absolute_offset,
        size,
    })
}

/// Decodes modified UTF-8 (JVMS §4.4.7) permissively: any byte sequence
/// that doesn't decode cleanly is passed through via lossy conversion
/// rather than failing the whole entry, consistent with the tolerant
/// posture of the rest of the parser.
fn modified_utf8_to_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i];
        if b0 & 0x80 == 0 {
            out.push(b0 as char);
            i += 1;
        } else if b0 & 0xE0 == 0xC0 && i + 1 < bytes.len() {
            let b1 = bytes[i + 1];
            let cp = (((b0 & 0x1F) as u32) << 6) | ((b1 & 0x3F) as u32);
            out.push(char::from_u32(cp).unwrap_or('\u{FFFD}'));
            i += 2;
        } else if b0 & 0xF0 == 0xE0 && i + 2 < bytes.len() {
            let b1 = bytes[i + 1];
            let b2 = bytes[i + 2];
            // Six-byte supplementary-character encoding (JVMS §4.4.7) uses
            // two consecutive three-byte sequences starting with 0xED;
            // treated here as an ordinary BMP code point, matching the
            // common-case behavior of tolerant class-file readers.
            let cp = (((b0 & 0x0F) as u32) << 12) | (((b1 & 0x3F) as u32) << 6) | ((b2 & 0x3F) as u32);
            out.push(char::from_u32(cp).unwrap_or('\u{FFFD}'));
            i += 3;
        } else {
            out.push('\u{FFFD}');
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_entry() {
        let mut bytes = vec![1u8, 0, 5];
        bytes.extend_from_slice(b"hello");
        let mut cursor = ByteCursor::new(&bytes);
        let entry = decode_entry(&mut cursor, 0).unwrap();
        assert_eq!(entry.size, 8);
        match entry.kind {
            ConstantPoolKind::Utf8(s) => assert_eq!(s, "hello"),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn decodes_long_entry() {
        let bytes = [5u8, 0, 0, 0, 0, 0, 0, 0, 42];
        let mut cursor = ByteCursor::new(&bytes);
        let entry = decode_entry(&mut cursor, 100).unwrap();
        assert_eq!(entry.offset, 100);
        assert!(matches!(entry.kind, ConstantPoolKind::Long(42)));
    }

    #[test]
    fn unknown_tag_returns_none() {
        let bytes = [200u8];
        let mut cursor = ByteCursor::new(&bytes);
        assert!(decode_entry(&mut cursor, 0).is_none());
    }

    #[test]
    fn truncated_entry_returns_none() {
        let bytes = [1u8, 0, 10]; // claims 10 bytes, has none
        let mut cursor = ByteCursor::new(&bytes);
        assert!(decode_entry(&mut cursor, 0).is_none());
    }
}
