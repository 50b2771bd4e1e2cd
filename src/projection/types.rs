//! Output records the projection layer hands to the host toolkit. These are
//! fresh, owned values (`spec.md` §4.4) — none of them borrow parse state.

use bitflags::bitflags;

/// Sentinel address for "no such symbol" (`spec.md` §4.4, §7).
pub const ADDRESS_NOT_FOUND: u64 = u64::MAX;

bitflags! {
    #[derive(Default)]
    pub struct DebugInfo: u8 {
        const SYMS = 0x01;
        const LINENUMS = 0x02;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Global,
    Local,
    Import,
    Weak,
}

impl Binding {
    pub fn as_str(self) -> &'static str {
        match self {
            Binding::Global => "GLOBAL",
            Binding::Local => "LOCAL",
            Binding::Import => "IMPORT",
            Binding::Weak => "WEAK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolType {
    Func,
    Object,
    Meth,
    Field,
    Imeth,
    Iface,
}

impl SymbolType {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolType::Func => "FUNC",
            SymbolType::Object => "OBJECT",
            SymbolType::Meth => "METH",
            SymbolType::Field => "FIELD",
            SymbolType::Imeth => "IMETH",
            SymbolType::Iface => "IFACE",
        }
    }
}

/// A symbol derived from a member (method/field) or a resolved import.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub address: u64,
    pub binding: Binding,
    pub sym_type: SymbolType,
    pub ordinal: u32,
}

/// One constant-pool-derived external reference (`spec.md` §4.4).
#[derive(Debug, Clone)]
pub struct Import {
    pub name: String,
    pub binding: Binding,
    pub sym_type: SymbolType,
    pub ordinal: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPerm {
    Read,
    ReadExec,
}

impl SectionPerm {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionPerm::Read => "r--",
            SectionPerm::ReadExec => "r-x",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub offset: u64,
    pub size: u64,
    pub perm: SectionPerm,
}

#[derive(Debug, Clone)]
pub struct StringRecord {
    pub offset: u64,
    pub ordinal: u16,
    pub length: u32,
    pub text: String,
}

/// The four symbol tags `resolve_symbol` understands (`spec.md` §4.4). Any
/// other query resolves to [`ADDRESS_NOT_FOUND`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolQuery {
    Entry,
    Init,
    Main,
    Other,
}
