//! The projection layer (`spec.md` §4.4): read-only queries that turn a
//! parsed [`ClassFile`] into the toolkit's neutral, owned views. Every
//! function here takes `&ClassFile` and returns a freshly allocated result;
//! none of them borrow parse state past the call.

pub mod entrypoints;
pub mod language;
pub mod sdb_export;
pub mod sections;
pub mod strings;
pub mod symbols;
pub mod types;
pub mod version;

use crate::model::attribute::Attribute;
use crate::model::class_file::ClassFile;
use crate::model::constant_pool::{ConstantPoolIndex, ConstantPoolKind};
use types::DebugInfo;

const UNKNOWN_CLASS: &str = "unknown_class";
const UNKNOWN_SUPER: &str = "unknown_super";

/// Resolves a `Class` constant-pool entry to its name, through
/// `Class -> name_index -> Utf8`. `spec.md` §4.4 says any miss (absent
/// index, wrong tag, dangling name_index) falls back to `on_miss`.
fn resolve_class_name<'a>(class_file: &'a ClassFile, index: ConstantPoolIndex, on_miss: &'a str) -> &'a str {
    match class_file.constant_pool.get(index).map(|e| &e.kind) {
        Some(ConstantPoolKind::Class { name_index }) => {
            class_file.constant_pool.get_utf8(*name_index).unwrap_or(on_miss)
        }
        _ => on_miss,
    }
}

pub fn name(class_file: &ClassFile) -> String {
    resolve_class_name(class_file, class_file.this_class, UNKNOWN_CLASS).to_string()
}

pub fn super_name(class_file: &ClassFile) -> String {
    resolve_class_name(class_file, class_file.super_class, UNKNOWN_SUPER).to_string()
}

pub fn access_flags_readable(class_file: &ClassFile) -> String {
    crate::model::access_flags::AccessFlags::from_bits_truncate(class_file.access_flags).readable()
}

/// `SYMS` is always set; `LINENUMS` is set iff any method's Code attribute
/// carries a `LineNumberTable` (`spec.md` §4.4).
pub fn debug_info(class_file: &ClassFile) -> DebugInfo {
    let mut flags = DebugInfo::SYMS;
    let has_line_numbers = class_file.methods.iter().flatten().any(|m| {
        Attribute::find_code(&m.attributes)
            .map(Attribute::has_line_number_table)
            .unwrap_or(false)
    });
    if has_line_numbers {
        flags |= DebugInfo::LINENUMS;
    }
    flags
}

pub(crate) fn member_name<'a>(class_file: &'a ClassFile, member: &crate::model::member::Member) -> Option<&'a str> {
    class_file.constant_pool.get_utf8(member.name_index).ok()
}

/// `name.member` with every `/` flattened to `.`, matching the display
/// convention the text/JSON renderers use for symbol names.
pub(crate) fn qualified_member_name(class_name: &str, member_name: &str) -> String {
    format!("{}.{}", class_name, member_name).replace('/', ".")
}

/// One entry per entrypoint candidate: named `main`/`<init>`/`<clinit>`, or
/// any `STATIC` method. Methods without a `Code` attribute are skipped
/// (`spec.md` §4.4).
pub fn entrypoints(class_file: &ClassFile) -> Vec<u64> {
    entrypoints::entrypoints(class_file)
}

pub fn resolve_symbol(class_file: &ClassFile, query: types::SymbolQuery) -> u64 {
    entrypoints::resolve_symbol(class_file, query)
}
