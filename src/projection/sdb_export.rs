//! Deposits the `java_class.*` keys the host sidecar store expects
//! (`spec.md` §6), grounded on the original tool's `java_set_sdb`.
//!
//! The original stores `size` into the `magic`/`minor_version`/
//! `major_version` keys — almost certainly a copy-paste typo (`spec.md`
//! §9 open question 1). This reimplementation stores the actual header
//! fields instead.

use super::version::version;
use crate::model::class_file::ClassFile;
use crate::sdb::Sdb;

pub fn populate(sdb: &mut Sdb, class_file: &ClassFile, offset: u64, size: u64) {
    sdb.set_num("java_class.offset", offset);
    sdb.set_num("java_class.size", size);
    sdb.set_num("java_class.magic", class_file.magic as u64);
    sdb.set_num("java_class.minor_version", class_file.minor_version as u64);
    sdb.set_num("java_class.major_version", class_file.major_version as u64);
    sdb.set_str(
        "java_class.version",
        version(class_file.major_version, class_file.minor_version),
    );

    sdb.set_num("java_class.constant_pool_count", class_file.constant_pool.count() as u64);
    for (index, _) in class_file.constant_pool.iter() {
        let key = format!("java_class.constant_pool_{}", index);
        sdb.set_str(&key, class_file.constant_pool.stringify(index.into()));
    }

    sdb.set_num("java_class.fields_count", class_file.fields.len() as u64);
    sdb.set_num("java_class.methods_count", class_file.methods.len() as u64);
    sdb.set_num("java_class.attributes_count", class_file.attributes.len() as u64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constant_pool::ConstantPool;

    #[test]
    fn stores_real_header_fields_not_size() {
        let class_file = ClassFile {
            magic: 0xCAFEBABE,
            minor_version: 0,
            major_version: 52,
            constant_pool: ConstantPool::with_capacity(1),
            constant_pool_offset: 10,
            access_flags: 0,
            this_class: 0u16.into(),
            super_class: 0u16.into(),
            interfaces: Vec::new(),
            interfaces_offset: 10,
            fields: Vec::new(),
            fields_offset: 10,
            methods: Vec::new(),
            methods_offset: 10,
            attributes: Vec::new(),
            attributes_offset: 10,
            class_end_offset: 57,
        };
        let mut sdb = Sdb::new();
        populate(&mut sdb, &class_file, 0, 57);
        assert!(matches!(
            sdb.get("java_class.magic"),
            Some(crate::sdb::SdbValue::Num(n)) if *n == 0xCAFEBABE
        ));
        assert!(matches!(
            sdb.get("java_class.major_version"),
            Some(crate::sdb::SdbValue::Num(52))
        ));
    }
}
