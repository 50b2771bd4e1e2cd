//! Plain-text dump of a parsed class file (`spec.md` §4.5): a fixed-layout,
//! human-readable rendering whose column padding is chosen by the digit
//! count of each section's entry count.

use std::fmt::Write as _;

use crate::model::class_file::ClassFile;
use crate::model::constant_pool::ConstantPoolIndex;
use crate::projection;

fn padding(count: u16) -> usize {
    (if count > 9999 {
        5
    } else if count > 999 {
        4
    } else if count > 99 {
        3
    } else {
        2
    }) + 1
}

pub fn render(class_file: &ClassFile) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "Version: ({}.{}) {}",
        class_file.major_version,
        class_file.minor_version,
        projection::version::version(class_file.major_version, class_file.minor_version)
    )
    .unwrap();
    writeln!(
        out,
        "Flags: (0x{:04x}) {}",
        class_file.access_flags,
        projection::access_flags_readable(class_file)
    )
    .unwrap();
    writeln!(out, "Class: (#{}) {}", class_file.this_class, projection::name(class_file)).unwrap();
    writeln!(
        out,
        "Super: (#{}) {}",
        class_file.super_class,
        projection::super_name(class_file)
    )
    .unwrap();

    render_constant_pool(class_file, &mut out);
    render_interfaces(class_file, &mut out);
    render_methods(class_file, &mut out);
    render_fields(class_file, &mut out);
    render_attributes(class_file, &mut out);

    out
}

fn render_constant_pool(class_file: &ClassFile, out: &mut String) {
    writeln!(out, "Constant pool: {}", class_file.constant_pool.count()).unwrap();
    let pad = padding(class_file.constant_pool.count());
    for (index, entry) in class_file.constant_pool.iter() {
        let text = class_file.constant_pool.stringify(ConstantPoolIndex(index));
        writeln!(
            out,
            "  {:>pad$} = {:<19} {}",
            format!("#{}", index),
            entry.kind.tag_name(),
            text,
            pad = pad
        )
        .unwrap();
    }
}

fn render_interfaces(class_file: &ClassFile, out: &mut String) {
    writeln!(out, "Interfaces: {}", class_file.interfaces.len()).unwrap();
    let pad = padding(class_file.constant_pool.count());
    for (i, iface) in class_file.interfaces.iter().flatten().enumerate() {
        let mut name = class_file.constant_pool.stringify(iface.index);
        name = name.replace('/', ".");
        writeln!(out, "  {:>pad$} = #{:<5} {}", format!("#{}", i), iface.index.0, name, pad = pad).unwrap();
    }
}

fn render_methods(class_file: &ClassFile, out: &mut String) {
    writeln!(out, "Methods: {}", class_file.methods.len()).unwrap();
    render_members(class_file, &class_file.methods, out);
}

fn render_fields(class_file: &ClassFile, out: &mut String) {
    writeln!(out, "Fields: {}", class_file.fields.len()).unwrap();
    render_members(class_file, &class_file.fields, out);
}

fn render_members(
    class_file: &ClassFile,
    members: &[Option<crate::model::member::Member>],
    out: &mut String,
) {
    for member in members.iter().flatten() {
        let flags = member.access_flags.readable();
        let name = class_file.constant_pool.stringify(member.name_index);
        let descriptor = class_file.constant_pool.stringify(member.descriptor_index);
        if flags.is_empty() {
            writeln!(out, "  {}{};", name, descriptor).unwrap();
        } else {
            writeln!(out, "  {} {}{};", flags, name, descriptor).unwrap();
        }
        writeln!(out, "    name: {}", name).unwrap();
        writeln!(out, "    descriptor: {}", descriptor).unwrap();
        writeln!(out, "    flags: (0x{:04x}) {}", member.access_flags.bits(), flags).unwrap();
    }
}

fn render_attributes(class_file: &ClassFile, out: &mut String) {
    writeln!(out, "Attributes: {}", class_file.attributes.len()).unwrap();
    let pad = padding(class_file.attributes.len() as u16);
    for (i, attribute) in class_file.attributes.iter().flatten().enumerate() {
        let name = class_file.constant_pool.stringify(attribute.attribute_name_index);
        writeln!(
            out,
            "  {:<pad$} = #{:<5} size: {:<5} {}",
            format!("#{}", i),
            attribute.attribute_name_index.0,
            attribute.attribute_length,
            name,
            pad = pad
        )
        .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constant_pool::ConstantPool;

    #[test]
    fn renders_header_lines_for_empty_class() {
        let class_file = ClassFile {
            magic: 0xCAFEBABE,
            minor_version: 0,
            major_version: 52,
            constant_pool: ConstantPool::with_capacity(1),
            constant_pool_offset: 10,
            access_flags: 0x0021,
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
            class_end_offset: 10,
        };
        let text = render(&class_file);
        assert!(text.starts_with("Version: (52.0) Java SE 1.8\n"));
        assert!(text.contains("Flags: (0x0021) public super\n"));
        assert!(text.contains("Constant pool: 1\n"));
    }
}
