//! Entrypoint enumeration and single-symbol resolution (`spec.md` §4.4).

use super::types::{SymbolQuery, ADDRESS_NOT_FOUND};
use crate::model::access_flags::AccessFlags;
use crate::model::attribute::Attribute;
use crate::model::class_file::ClassFile;
use crate::model::member::Member;

const MAIN: &str = "main";
const INIT: &str = "<init>";
const CLINIT: &str = "<clinit>";

fn is_entrypoint_candidate(name: &str, member: &Member) -> bool {
    name == MAIN || name == INIT || name == CLINIT || member.access_flags.contains(AccessFlags::STATIC)
}

pub fn entrypoints(class_file: &ClassFile) -> Vec<u64> {
    class_file
        .methods
        .iter()
        .flatten()
        .filter_map(|method| {
            let name = super::member_name(class_file, method)?;
            if !is_entrypoint_candidate(name, method) {
                return None;
            }
            Attribute::find_code(&method.attributes).map(|code| code.code_offset)
        })
        .collect()
}

/// `ENTRY`/`INIT` resolve to the first `<init>`/`<clinit>` method with a
/// `Code` attribute; `MAIN` resolves to the first `main` method with one.
/// Anything else is `ADDRESS_NOT_FOUND` (`spec.md` §4.4).
pub fn resolve_symbol(class_file: &ClassFile, query: SymbolQuery) -> u64 {
    let find_first = |names: &[&str]| -> Option<u64> {
        class_file.methods.iter().flatten().find_map(|method| {
            let name = super::member_name(class_file, method)?;
            if names.contains(&name) {
                Attribute::find_code(&method.attributes).map(|code| code.code_offset)
            } else {
                None
            }
        })
    };

    let address = match query {
        SymbolQuery::Entry | SymbolQuery::Init => find_first(&[INIT, CLINIT]),
        SymbolQuery::Main => find_first(&[MAIN]),
        SymbolQuery::Other => None,
    };
    address.unwrap_or(ADDRESS_NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attribute::{Attribute, AttributeKind, CodeAttribute};
    use crate::model::constant_pool::{ConstantPool, ConstantPoolEntry, ConstantPoolKind};

    fn class_with_main(code_offset: u64) -> ClassFile {
        let mut pool = ConstantPool::with_capacity(2);
        pool.set(
            1,
            ConstantPoolEntry {
                kind: ConstantPoolKind::Utf8("main".to_string()),
                offset: 0,
                size: 0,
            },
        );
        let code = Attribute {
            attribute_name_index: 0u16.into(),
            attribute_length: 0,
            offset: 0,
            kind: AttributeKind::Code(CodeAttribute {
                max_stack: 0,
                max_locals: 0,
                code_length: 0,
                code_offset,
                exception_table: Vec::new(),
                attributes: Vec::new(),
            }),
        };
        let main_method = Member {
            access_flags: AccessFlags::PUBLIC | AccessFlags::STATIC,
            name_index: 1u16.into(),
            descriptor_index: 0u16.into(),
            attributes: vec![Some(code)],
            offset: 0,
        };
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
            methods: vec![Some(main_method)],
            methods_offset: 0,
            attributes: Vec::new(),
            attributes_offset: 0,
            class_end_offset: 0,
        }
    }

    #[test]
    fn scenario_b_main_is_sole_entrypoint() {
        let cf = class_with_main(0x86);
        assert_eq!(entrypoints(&cf), vec![0x86]);
        assert_eq!(resolve_symbol(&cf, SymbolQuery::Main), 0x86);
    }

    #[test]
    fn unresolved_query_is_sentinel() {
        let cf = class_with_main(0x86);
        assert_eq!(resolve_symbol(&cf, SymbolQuery::Other), ADDRESS_NOT_FOUND);
    }
}
