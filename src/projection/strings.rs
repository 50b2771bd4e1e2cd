//! Every Utf8 constant-pool entry as a standalone string record
//! (`spec.md` §4.4). Empty entries are skipped. `length` is the entry's
//! on-disk size (tag + length prefix + payload), not the decoded string's
//! byte length.

use super::types::StringRecord;
use crate::model::class_file::ClassFile;
use crate::model::constant_pool::ConstantPoolKind;

pub fn strings(class_file: &ClassFile) -> Vec<StringRecord> {
    class_file
        .constant_pool
        .iter()
        .filter_map(|(index, entry)| match &entry.kind {
            ConstantPoolKind::Utf8(s) if !s.is_empty() => Some(StringRecord {
                offset: entry.offset,
                ordinal: index,
                length: entry.size,
                text: s.clone(),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constant_pool::{ConstantPool, ConstantPoolEntry};

    #[test]
    fn skips_empty_entries() {
        let mut pool = ConstantPool::with_capacity(3);
        pool.set(
            1,
            ConstantPoolEntry {
                kind: ConstantPoolKind::Utf8("".to_string()),
                offset: 10,
                size: 3,
            },
        );
        pool.set(
            2,
            ConstantPoolEntry {
                kind: ConstantPoolKind::Utf8("hi".to_string()),
                offset: 20,
                size: 5,
            },
        );
        let class_file = ClassFile {
            magic: 0,
            minor_version: 0,
            major_version: 0,
            constant_pool: pool,
            constant_pool_offset: 0,
            access_flags: 0,
            this_class: 0u16.into(),
            super_class: 0u16.into(),
            interfaces: Vec::new(),
            interfaces_offset: 0,
            fields: Vec::new(),
            fields_offset: 0,
            methods: Vec::new(),
            methods_offset: 0,
            attributes: Vec::new(),
            attributes_offset: 0,
            class_end_offset: 0,
        };
        let records = strings(&class_file);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "hi");
        assert_eq!(records[0].ordinal, 2);
        // length is the on-disk entry size (tag + length prefix + payload),
        // not the decoded string's byte length.
        assert_eq!(records[0].length, 5);
    }
}
