//! The top-level parse pass (`spec.md` §4.1): orchestrates the constant
//! pool, interface/field/method/attribute sections, and section-offset
//! bookkeeping into a single [`ClassFile`].

pub mod attribute;
pub mod constant_pool;
pub mod member;

use crate::cursor::{ByteCursor, CursorError};
use crate::model::class_file::ClassFile;
use crate::model::constant_pool::{ConstantPool, ConstantPoolEntry, ConstantPoolKind};

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("buffer is too small to contain a class file header")]
    BufferTooSmall,

    #[error("truncated class file header: {0}")]
    TruncatedHeader(#[from] CursorError),
}

/// Clamps a section's element count against the bytes actually remaining,
/// per `spec.md` §4.1 step 1/4. This is an anti-DoS truncation, not a
/// validator of payload well-formedness: it only prevents a tiny buffer
/// from claiming a huge element count.
fn sanitize(remaining: usize, count: u16, min_entry_size: usize) -> u16 {
    if (count as usize).saturating_mul(min_entry_size) > remaining {
        0
    } else {
        count
    }
}

/// Reads a class file starting at the cursor's current position (here,
/// always 0 — callers seek `buf` before slicing it). `base` is added to
/// every `tell()` to produce the "absolute" offsets downstream consumers
/// expect, letting the same parser run over a buffer that is itself a
/// slice of some larger host-owned file.
pub fn parse(buf: &[u8], base: u64) -> Result<ClassFile, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::BufferTooSmall);
    }

    let mut cursor = ByteCursor::new(buf);

    let magic = cursor.read_be32()?;
    let minor_version = cursor.read_be16()?;
    let major_version = cursor.read_be16()?;

    let constant_pool_offset = base + cursor.tell() as u64;
    let raw_pool_count = cursor.read_be16()?;
    let pool_count = sanitize(cursor.remaining(), raw_pool_count, 3);
    let constant_pool = parse_constant_pool(&mut cursor, base, pool_count);

    let access_flags = cursor.read_be16()?;
    let this_class = cursor.read_be16()?.into();
    let super_class = cursor.read_be16()?.into();

    let interfaces_offset = base + cursor.tell() as u64;
    let raw_interfaces_count = cursor.read_be16()?;
    let interfaces_count = sanitize(cursor.remaining(), raw_interfaces_count, 2);
    let interfaces = member::parse_interface_list(&mut cursor, base, interfaces_count);

    let fields_offset = base + cursor.tell() as u64;
    let raw_fields_count = cursor.read_be16()?;
    let fields_count = sanitize(cursor.remaining(), raw_fields_count, 8);
    let fields = member::parse_member_list(&mut cursor, base, &constant_pool, fields_count);

    let methods_offset = base + cursor.tell() as u64;
    let raw_methods_count = cursor.read_be16()?;
    let methods_count = sanitize(cursor.remaining(), raw_methods_count, 8);
    let methods = member::parse_member_list(&mut cursor, base, &constant_pool, methods_count);

    let attributes_offset = base + cursor.tell() as u64;
    let raw_attributes_count = cursor.read_be16()?;
    let attributes_count = sanitize(cursor.remaining(), raw_attributes_count, 6);
    let attributes = attribute::parse_attribute_list_with_count(
        &mut cursor,
        base,
        &constant_pool,
        0,
        attributes_count,
    );

    let class_end_offset = base + cursor.tell() as u64;

    Ok(ClassFile {
        magic,
        minor_version,
        major_version,
        constant_pool,
        constant_pool_offset,
        access_flags,
        this_class,
        super_class,
        interfaces,
        interfaces_offset,
        fields,
        fields_offset,
        methods,
        methods_offset,
        attributes,
        attributes_offset,
        class_end_offset,
    })
}

/// Decodes entries `1..count`, inserting a synthesized `NullPad` after every
/// `Long`/`Double` and skipping the index it occupies (`spec.md` §4.1 step
/// 2). A single entry that fails to decode truncates the rest of the pool.
fn parse_constant_pool(cursor: &mut ByteCursor, base: u64, count: u16) -> ConstantPool {
    let mut pool = ConstantPool::with_capacity(count);
    let mut i: u16 = 1;
    while i < count {
        let absolute_offset = base + cursor.tell() as u64;
        match constant_pool::decode_entry(cursor, absolute_offset) {
            Some(entry) => {
                let requires_null = entry.kind.requires_null();
                pool.set(i, entry);
                if requires_null && i + 1 < count {
                    pool.set(
                        i + 1,
                        ConstantPoolEntry {
                            kind: ConstantPoolKind::NullPad,
                            offset: absolute_offset,
                            size: 0,
                        },
                    );
                    i += 2;
                } else {
                    i += 1;
                }
            }
            None => {
                log::warn!("constant pool entry at offset {} failed to decode; truncating pool", absolute_offset);
                break;
            }
        }
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_class_bytes() -> Vec<u8> {
        let mut buf = vec![0xCA, 0xFE, 0xBA, 0xBE]; // magic
        buf.extend_from_slice(&[0x00, 0x00]); // minor
        buf.extend_from_slice(&[0x00, 0x34]); // major = 52
        buf.extend_from_slice(&[0x00, 0x01]); // constant_pool_count = 1 (empty pool)
        buf.extend_from_slice(&[0x00, 0x21]); // access_flags = PUBLIC | SUPER
        buf.extend_from_slice(&[0x00, 0x00]); // this_class (absent, tolerated)
        buf.extend_from_slice(&[0x00, 0x00]); // super_class (absent)
        buf.extend_from_slice(&[0x00, 0x00]); // interfaces_count
        buf.extend_from_slice(&[0x00, 0x00]); // fields_count
        buf.extend_from_slice(&[0x00, 0x00]); // methods_count
        buf.extend_from_slice(&[0x00, 0x00]); // attributes_count
        buf
    }

    #[test]
    fn parses_minimal_empty_class() {
        let buf = empty_class_bytes();
        let class_file = parse(&buf, 0).unwrap();
        assert_eq!(class_file.magic, 0xCAFEBABE);
        assert_eq!(class_file.major_version, 52);
        assert_eq!(class_file.constant_pool.count(), 1);
        assert!(class_file.fields.is_empty());
        assert!(class_file.methods.is_empty());
        assert!(class_file.offsets_are_monotone());
        assert_eq!(class_file.class_end_offset, buf.len() as u64);
    }

    #[test]
    fn empty_buffer_is_fatal() {
        assert!(matches!(parse(&[], 0), Err(ParseError::BufferTooSmall)));
    }

    #[test]
    fn truncated_attributes_count_sanitizes_to_zero() {
        // attributes_count claims 100 but the buffer ends right after it.
        let mut buf = empty_class_bytes();
        let len = buf.len();
        buf[len - 2..].copy_from_slice(&[0x00, 0x64]);
        let class_file = parse(&buf, 0).unwrap();
        assert!(class_file.attributes.is_empty());
    }

    #[test]
    fn long_entry_inserts_null_pad() {
        let mut buf = vec![0xCA, 0xFE, 0xBA, 0xBE];
        buf.extend_from_slice(&[0x00, 0x00]); // minor
        buf.extend_from_slice(&[0x00, 0x34]); // major
        buf.extend_from_slice(&[0x00, 0x04]); // constant_pool_count = 4 (entries 1, 2=NullPad, 3)
        buf.push(5); // tag Long at index 1
        buf.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 42]);
        buf.push(1); // tag Utf8 at index 3
        buf.extend_from_slice(&[0x00, 0x02]);
        buf.extend_from_slice(b"hi");
        buf.extend_from_slice(&[0x00, 0x21]); // access_flags
        buf.extend_from_slice(&[0x00, 0x00]); // this_class
        buf.extend_from_slice(&[0x00, 0x00]); // super_class
        buf.extend_from_slice(&[0x00, 0x00]); // interfaces_count
        buf.extend_from_slice(&[0x00, 0x00]); // fields_count
        buf.extend_from_slice(&[0x00, 0x00]); // methods_count
        buf.extend_from_slice(&[0x00, 0x00]); // attributes_count

        let class_file = parse(&buf, 0).unwrap();
        assert!(matches!(
            class_file.constant_pool.get(2.into()).unwrap().kind,
            ConstantPoolKind::NullPad
        ));
        assert_eq!(
            class_file.constant_pool.get_utf8(3.into()).unwrap(),
            "hi"
        );
    }
}
