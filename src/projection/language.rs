//! Source-language heuristic (`spec.md` §4.4): every Utf8 entry is scanned
//! once, first match wins.

use crate::model::class_file::ClassFile;
use crate::model::constant_pool::ConstantPoolKind;

const KOTLIN_PREFIX: &str = "kotlin/jvm";
const GROOVY_PREFIX: &str = "org/codehaus/groovy/runtime";

pub fn language(class_file: &ClassFile) -> &'static str {
    for (_, entry) in class_file.constant_pool.iter() {
        if let ConstantPoolKind::Utf8(s) = &entry.kind {
            if s.starts_with(KOTLIN_PREFIX) {
                return "kotlin";
            }
            if s.starts_with(GROOVY_PREFIX) {
                return "groovy";
            }
        }
    }
    "java"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constant_pool::{ConstantPool, ConstantPoolEntry};

    fn class_with_utf8(s: &str) -> ClassFile {
        let mut pool = ConstantPool::with_capacity(2);
        pool.set(
            1,
            ConstantPoolEntry {
                kind: ConstantPoolKind::Utf8(s.to_string()),
                offset: 0,
                size: 0,
            },
        );
        ClassFile {
            magic: 0xCAFEBABE,
            minor_version: 0,
            major_version: 52,
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
        }
    }

    #[test]
    fn kotlin_prefix_wins() {
        let cf = class_with_utf8("kotlin/jvm/internal/Intrinsics");
        assert_eq!(language(&cf), "kotlin");
    }

    #[test]
    fn groovy_prefix_detected() {
        let cf = class_with_utf8("org/codehaus/groovy/runtime/GeneratedClosure");
        assert_eq!(language(&cf), "groovy");
    }

    #[test]
    fn defaults_to_java() {
        let cf = class_with_utf8("java/lang/Object");
        assert_eq!(language(&cf), "java");
    }
}
