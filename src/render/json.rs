//! JSON rendering (`spec.md` §4.5): one object per class, with numeric
//! `*_n` and stringified `*_s` fields paired for every resolved reference,
//! plus the toolkit-facing views from `spec.md` §6 (symbols, imports,
//! sections, entrypoints, strings, libraries).

use serde_json::{json, Value};

use crate::model::class_file::ClassFile;
use crate::model::constant_pool::ConstantPoolIndex;
use crate::model::member::Member;
use crate::projection::{self, types::SymbolQuery};

fn member_json(class_file: &ClassFile, member: &Member) -> Value {
    json!({
        "offset": member.offset,
        "access_flags_n": member.access_flags.bits(),
        "access_flags_s": member.access_flags.readable(),
        "name_n": member.name_index.0,
        "name_s": class_file.constant_pool.stringify(member.name_index),
        "descriptor_n": member.descriptor_index.0,
        "descriptor_s": class_file.constant_pool.stringify(member.descriptor_index),
        "attributes_count": member.attributes.len(),
        "attributes": attributes_json(class_file, &member.attributes),
    })
}

fn attributes_json(class_file: &ClassFile, attributes: &[Option<crate::model::attribute::Attribute>]) -> Value {
    Value::Array(
        attributes
            .iter()
            .flatten()
            .map(|attr| {
                json!({
                    "offset": attr.offset,
                    "size": attr.attribute_length,
                    "name_n": attr.attribute_name_index.0,
                    "name_s": class_file.constant_pool.stringify(attr.attribute_name_index),
                    "type": attr.kind.type_name(),
                })
            })
            .collect(),
    )
}

fn constant_pool_json(class_file: &ClassFile) -> Value {
    Value::Array(
        class_file
            .constant_pool
            .iter()
            .map(|(index, entry)| {
                json!({
                    "index": index,
                    "tag_n": entry.kind.tag_number(),
                    "tag_s": entry.kind.tag_name(),
                    "value": class_file.constant_pool.stringify(ConstantPoolIndex(index)),
                })
            })
            .collect(),
    )
}

fn interfaces_json(class_file: &ClassFile) -> Value {
    Value::Array(
        class_file
            .interfaces
            .iter()
            .flatten()
            .map(|iface| {
                json!({
                    "offset": iface.offset,
                    "index_n": iface.index.0,
                    "index_s": class_file.constant_pool.stringify(iface.index).replace('/', "."),
                })
            })
            .collect(),
    )
}

pub fn render(class_file: &ClassFile) -> Value {
    json!({
        "version": {
            "minor": class_file.minor_version,
            "major": class_file.major_version,
            "version": projection::version::version(class_file.major_version, class_file.minor_version),
        },
        "constant_pool_count": class_file.constant_pool.count(),
        "constant_pool": constant_pool_json(class_file),
        "access_flags_n": class_file.access_flags,
        "access_flags_s": projection::access_flags_readable(class_file),
        "class_n": class_file.this_class.0,
        "class_s": projection::name(class_file),
        "super_n": class_file.super_class.0,
        "super_s": projection::super_name(class_file),
        "interfaces_count": class_file.interfaces.len(),
        "interfaces": interfaces_json(class_file),
        "methods_count": class_file.methods.len(),
        "methods": Value::Array(class_file.methods.iter().flatten().map(|m| member_json(class_file, m)).collect()),
        "fields_count": class_file.fields.len(),
        "fields": Value::Array(class_file.fields.iter().flatten().map(|f| member_json(class_file, f)).collect()),
        "attributes_count": class_file.attributes.len(),
        "attributes": attributes_json(class_file, &class_file.attributes),
    })
}

/// The host-facing views from `spec.md` §6, distinct from the raw model
/// dump `render` produces: symbols, imports, sections, entrypoints,
/// strings, libraries, plus the fixed `arch`/`bits`/`big_endian` facts.
pub fn render_views(class_file: &ClassFile) -> Value {
    let symbols: Vec<Value> = projection::symbols::methods_as_symbols(class_file)
        .into_iter()
        .chain(projection::symbols::fields_as_symbols(class_file))
        .chain(projection::symbols::const_pool_as_symbols(class_file))
        .map(symbol_json)
        .collect();

    let imports: Vec<Value> = projection::symbols::const_pool_as_imports(class_file)
        .into_iter()
        .map(|i| {
            json!({
                "name": i.name,
                "binding": i.binding.as_str(),
                "type": i.sym_type.as_str(),
                "ordinal": i.ordinal,
            })
        })
        .collect();

    let sections: Vec<Value> = projection::sections::sections(class_file)
        .into_iter()
        .map(|s| {
            json!({
                "name": s.name,
                "offset": s.offset,
                "size": s.size,
                "perm": s.perm.as_str(),
            })
        })
        .collect();

    let strings: Vec<Value> = projection::strings::strings(class_file)
        .into_iter()
        .map(|s| {
            json!({
                "offset": s.offset,
                "ordinal": s.ordinal,
                "length": s.length,
                "string": s.text,
            })
        })
        .collect();

    json!({
        "arch": "java",
        "bits": 32,
        "big_endian": true,
        "has_va": false,
        "language": projection::language::language(class_file),
        "version": projection::version::version(class_file.major_version, class_file.minor_version),
        "debug_info": projection::debug_info(class_file).bits(),
        "entrypoints": projection::entrypoints(class_file),
        "main_addr": projection::resolve_symbol(class_file, SymbolQuery::Main),
        "symbols": symbols,
        "imports": imports,
        "sections": sections,
        "strings": strings,
        "libraries": projection::symbols::libraries(class_file),
    })
}

fn symbol_json(symbol: projection::types::Symbol) -> Value {
    json!({
        "name": symbol.name,
        "address": symbol.address,
        "binding": symbol.binding.as_str(),
        "type": symbol.sym_type.as_str(),
        "ordinal": symbol.ordinal,
    })
}
