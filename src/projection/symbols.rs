//! Member-derived symbols, constant-pool-derived symbols/imports, and the
//! deduplicated library list (`spec.md` §4.4).

use super::types::{Binding, Import, Symbol, SymbolType, ADDRESS_NOT_FOUND};
use super::{member_name, name, qualified_member_name};
use crate::model::access_flags::AccessFlags;
use crate::model::attribute::Attribute;
use crate::model::class_file::ClassFile;
use crate::model::constant_pool::{ConstantPoolIndex, ConstantPoolKind};
use crate::model::member::Member;

fn member_symbol(class_file: &ClassFile, class_name: &str, member: &Member, sym_type: SymbolType, address: u64) -> Option<Symbol> {
    let raw_name = member_name(class_file, member)?;
    let binding = if member.access_flags.contains(AccessFlags::PUBLIC) {
        Binding::Global
    } else {
        Binding::Local
    };
    Some(Symbol {
        name: qualified_member_name(class_name, raw_name),
        address,
        binding,
        sym_type,
        ordinal: 0,
    })
}

pub fn methods_as_symbols(class_file: &ClassFile) -> Vec<Symbol> {
    let class_name = name(class_file);
    class_file
        .methods
        .iter()
        .flatten()
        .enumerate()
        .filter_map(|(ordinal, method)| {
            let address = Attribute::find_code(&method.attributes)
                .map(|c| c.code_offset)
                .unwrap_or(ADDRESS_NOT_FOUND);
            member_symbol(class_file, &class_name, method, SymbolType::Func, address).map(|mut s| {
                s.ordinal = ordinal as u32;
                s
            })
        })
        .collect()
}

pub fn fields_as_symbols(class_file: &ClassFile) -> Vec<Symbol> {
    let class_name = name(class_file);
    class_file
        .fields
        .iter()
        .flatten()
        .enumerate()
        .filter_map(|(ordinal, field)| {
            member_symbol(class_file, &class_name, field, SymbolType::Object, field.offset).map(|mut s| {
                s.ordinal = ordinal as u32;
                s
            })
        })
        .collect()
}

/// Resolves a `{class_index, name_and_type_index}` pair (shared by
/// FieldRef/MethodRef/InterfaceMethodRef) to `(class_name, member_name)`.
fn resolve_ref(
    class_file: &ClassFile,
    class_index: ConstantPoolIndex,
    name_and_type_index: ConstantPoolIndex,
) -> Option<(String, String)> {
    let class_name = match class_file.constant_pool.get(class_index).map(|e| &e.kind) {
        Some(ConstantPoolKind::Class { name_index }) => {
            class_file.constant_pool.get_utf8(*name_index).ok()?
        }
        _ => return None,
    };
    let member_name = match class_file.constant_pool.get(name_and_type_index).map(|e| &e.kind) {
        Some(ConstantPoolKind::NameAndType { name_index, .. }) => {
            class_file.constant_pool.get_utf8(*name_index).ok()?
        }
        _ => return None,
    };
    Some((class_name.to_string(), member_name.to_string()))
}

/// One symbol per import-class constant-pool entry (`spec.md` §4.4). Type
/// follows the tag (METH/FIELD/IMETH), overridden to FUNC for a member
/// literally named `main`.
pub fn const_pool_as_symbols(class_file: &ClassFile) -> Vec<Symbol> {
    class_file
        .constant_pool
        .iter()
        .filter_map(|(index, entry)| {
            let (class_index, name_and_type_index, sym_type) = match &entry.kind {
                ConstantPoolKind::FieldRef {
                    class_index,
                    name_and_type_index,
                } => (*class_index, *name_and_type_index, SymbolType::Field),
                ConstantPoolKind::MethodRef {
                    class_index,
                    name_and_type_index,
                } => (*class_index, *name_and_type_index, SymbolType::Meth),
                ConstantPoolKind::InterfaceMethodRef {
                    class_index,
                    name_and_type_index,
                } => (*class_index, *name_and_type_index, SymbolType::Imeth),
                _ => return None,
            };
            let (class_name, member_name) = resolve_ref(class_file, class_index, name_and_type_index)?;
            let sym_type = if member_name == "main" { SymbolType::Func } else { sym_type };
            Some(Symbol {
                name: qualified_member_name(&class_name, &member_name),
                address: ADDRESS_NOT_FOUND,
                binding: Binding::Import,
                sym_type,
                ordinal: index as u32,
            })
        })
        .collect()
}

/// Same traversal as [`const_pool_as_symbols`], plus one `IFACE`-typed,
/// `WEAK`-bound `"*"` import per declared interface (`spec.md` §4.4).
pub fn const_pool_as_imports(class_file: &ClassFile) -> Vec<Import> {
    let mut imports: Vec<Import> = const_pool_as_symbols(class_file)
        .into_iter()
        .map(|s| Import {
            name: s.name,
            binding: s.binding,
            sym_type: s.sym_type,
            ordinal: s.ordinal,
        })
        .collect();

    imports.extend(class_file.interfaces.iter().flatten().map(|iface| Import {
        name: "*".to_string(),
        binding: Binding::Weak,
        sym_type: SymbolType::Iface,
        ordinal: iface.index.0 as u32,
    }));

    imports
}

/// Deduplicated, first-seen-order list of every class name referenced from
/// a `Class` entry or an import entry (`spec.md` §4.4).
pub fn libraries(class_file: &ClassFile) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    for (_, entry) in class_file.constant_pool.iter() {
        if let ConstantPoolKind::Class { name_index } = &entry.kind {
            if let Ok(class_name) = class_file.constant_pool.get_utf8(*name_index) {
                if seen.insert(class_name.to_string()) {
                    out.push(class_name.to_string());
                }
            }
        }
    }

    for (_, entry) in class_file.constant_pool.iter() {
        let class_index = match &entry.kind {
            ConstantPoolKind::FieldRef { class_index, .. }
            | ConstantPoolKind::MethodRef { class_index, .. }
            | ConstantPoolKind::InterfaceMethodRef { class_index, .. } => *class_index,
            _ => continue,
        };
        if let Some(ConstantPoolKind::Class { name_index }) =
            class_file.constant_pool.get(class_index).map(|e| &e.kind)
        {
            if let Ok(class_name) = class_file.constant_pool.get_utf8(*name_index) {
                if seen.insert(class_name.to_string()) {
                    out.push(class_name.to_string());
                }
            }
        }
    }

    out
}
