//! The constant pool: a 1-indexed tagged-union table that every other
//! section of a class file cross-references by index.

use std::fmt::Display;

/// Cap on `stringify` recursion. Pool indices are attacker-controlled, so a
/// crafted pool can describe a reference cycle (a `Class` entry whose
/// `name_index` points at another `Class` entry, and so on). JVMS-conformant
/// pools never need more than two or three hops to reach a `Utf8`.
const STRINGIFY_DEPTH_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ConstantPoolIndex(pub u16);

impl From<u16> for ConstantPoolIndex {
    fn from(index: u16) -> Self {
        Self(index)
    }
}

impl Display for ConstantPoolIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl ConstantPoolIndex {
    pub fn is_absent(self) -> bool {
        self.0 == 0
    }
}

/// One of the 17 JVMS §4.4 tag kinds, plus the synthesized `NullPad` slot
/// that follows every `Long`/`Double`. Exhaustive by design: adding a new
/// JVMS tag to this enum without updating every `match` on it is a type
/// error, which is the point.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantPoolKind {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class {
        name_index: ConstantPoolIndex,
    },
    String {
        string_index: ConstantPoolIndex,
    },
    FieldRef {
        class_index: ConstantPoolIndex,
        name_and_type_index: ConstantPoolIndex,
    },
    MethodRef {
        class_index: ConstantPoolIndex,
        name_and_type_index: ConstantPoolIndex,
    },
    InterfaceMethodRef {
        class_index: ConstantPoolIndex,
        name_and_type_index: ConstantPoolIndex,
    },
    NameAndType {
        name_index: ConstantPoolIndex,
        descriptor_index: ConstantPoolIndex,
    },
    MethodHandle {
        reference_kind: u8,
        reference_index: ConstantPoolIndex,
    },
    MethodType {
        descriptor_index: ConstantPoolIndex,
    },
    Dynamic {
        bootstrap_method_attr_index: u16,
        name_and_type_index: ConstantPoolIndex,
    },
    InvokeDynamic {
        bootstrap_method_attr_index: u16,
        name_and_type_index: ConstantPoolIndex,
    },
    Module {
        name_index: ConstantPoolIndex,
    },
    Package {
        name_index: ConstantPoolIndex,
    },
    /// Synthesized slot following a `Long`/`Double` at the preceding index.
    NullPad,
}

impl ConstantPoolKind {
    pub fn tag_number(&self) -> u8 {
        match self {
            ConstantPoolKind::Utf8(_) => 1,
            ConstantPoolKind::Integer(_) => 3,
            ConstantPoolKind::Float(_) => 4,
            ConstantPoolKind::Long(_) => 5,
            ConstantPoolKind::Double(_) => 6,
            ConstantPoolKind::Class { .. } => 7,
            ConstantPoolKind::String { .. } => 8,
            ConstantPoolKind::FieldRef { .. } => 9,
            ConstantPoolKind::MethodRef { .. } => 10,
            ConstantPoolKind::InterfaceMethodRef { .. } => 11,
            ConstantPoolKind::NameAndType { .. } => 12,
            ConstantPoolKind::MethodHandle { .. } => 15,
            ConstantPoolKind::MethodType { .. } => 16,
            ConstantPoolKind::Dynamic { .. } => 17,
            ConstantPoolKind::InvokeDynamic { .. } => 18,
            ConstantPoolKind::Module { .. } => 19,
            ConstantPoolKind::Package { .. } => 20,
            ConstantPoolKind::NullPad => 0,
        }
    }

    pub fn tag_name(&self) -> &'static str {
        match self {
            ConstantPoolKind::Utf8(_) => "Utf8",
            ConstantPoolKind::Integer(_) => "Integer",
            ConstantPoolKind::Float(_) => "Float",
            ConstantPoolKind::Long(_) => "Long",
            ConstantPoolKind::Double(_) => "Double",
            ConstantPoolKind::Class { .. } => "Class",
            ConstantPoolKind::String { .. } => "String",
            ConstantPoolKind::FieldRef { .. } => "Fieldref",
            ConstantPoolKind::MethodRef { .. } => "Methodref",
            ConstantPoolKind::InterfaceMethodRef { .. } => "InterfaceMethodref",
            ConstantPoolKind::NameAndType { .. } => "NameAndType",
            ConstantPoolKind::MethodHandle { .. } => "MethodHandle",
            ConstantPoolKind::MethodType { .. } => "MethodType",
            ConstantPoolKind::Dynamic { .. } => "Dynamic",
            ConstantPoolKind::InvokeDynamic { .. } => "InvokeDynamic",
            ConstantPoolKind::Module { .. } => "Module",
            ConstantPoolKind::Package { .. } => "Package",
            ConstantPoolKind::NullPad => "NullPad",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ConstantPoolKind::Utf8(_))
    }

    pub fn is_import(&self) -> bool {
        matches!(
            self,
            ConstantPoolKind::FieldRef { .. }
                | ConstantPoolKind::MethodRef { .. }
                | ConstantPoolKind::InterfaceMethodRef { .. }
        )
    }

    pub fn requires_null(&self) -> bool {
        matches!(self, ConstantPoolKind::Long(_) | ConstantPoolKind::Double(_))
    }

    /// Returns the 0, 1 or 2 index children this entry carries, per
    /// `spec.md` §4.2. Dynamic/InvokeDynamic's bootstrap method index is not
    /// a pool index, so only `name_and_type_index` is returned for them.
    pub fn resolve(&self) -> (u8, Option<ConstantPoolIndex>, Option<ConstantPoolIndex>) {
        match self {
            ConstantPoolKind::Class { name_index } => (1, Some(*name_index), None),
            ConstantPoolKind::String { string_index } => (1, Some(*string_index), None),
            ConstantPoolKind::MethodType { descriptor_index } => (1, Some(*descriptor_index), None),
            ConstantPoolKind::Module { name_index } => (1, Some(*name_index), None),
            ConstantPoolKind::Package { name_index } => (1, Some(*name_index), None),
            ConstantPoolKind::MethodHandle { reference_index, .. } => {
                (1, Some(*reference_index), None)
            }
            ConstantPoolKind::FieldRef {
                class_index,
                name_and_type_index,
            }
            | ConstantPoolKind::MethodRef {
                class_index,
                name_and_type_index,
            }
            | ConstantPoolKind::InterfaceMethodRef {
                class_index,
                name_and_type_index,
            } => (2, Some(*class_index), Some(*name_and_type_index)),
            ConstantPoolKind::NameAndType {
                name_index,
                descriptor_index,
            } => (2, Some(*name_index), Some(*descriptor_index)),
            ConstantPoolKind::Dynamic {
                name_and_type_index,
                ..
            }
            | ConstantPoolKind::InvokeDynamic {
                name_and_type_index,
                ..
            } => (2, None, Some(*name_and_type_index)),
            ConstantPoolKind::Utf8(_)
            | ConstantPoolKind::Integer(_)
            | ConstantPoolKind::Float(_)
            | ConstantPoolKind::Long(_)
            | ConstantPoolKind::Double(_)
            | ConstantPoolKind::NullPad => (0, None, None),
        }
    }
}

/// One constant-pool slot: its decoded payload plus the bookkeeping every
/// consumer of `spec.md` §4.2 needs (its own file offset and on-disk size).
#[derive(Debug, Clone)]
pub struct ConstantPoolEntry {
    pub kind: ConstantPoolKind,
    pub offset: u64,
    pub size: u32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstantPoolError {
    #[error("there is no constant pool entry at {0}")]
    MissingEntry(ConstantPoolIndex),

    #[error("the entry at {0} is not a Utf8 entry")]
    NotUtf8(ConstantPoolIndex),
}

/// The 1-indexed constant pool table. Index 0 and any tolerated-null slot
/// (failed decode, or the synthesized slot after a Long/Double) are `None`.
#[derive(Debug, Default)]
pub struct ConstantPool {
    // entries[0] is always None: the table is 1-indexed by convention.
    entries: Vec<Option<ConstantPoolEntry>>,
}

impl ConstantPool {
    pub fn with_capacity(count: u16) -> Self {
        let mut entries = Vec::with_capacity(count as usize);
        entries.resize_with(count as usize, || None);
        Self { entries }
    }

    pub fn count(&self) -> u16 {
        self.entries.len() as u16
    }

    pub fn set(&mut self, index: u16, entry: ConstantPoolEntry) {
        if (index as usize) < self.entries.len() {
            self.entries[index as usize] = Some(entry);
        }
    }

    pub fn get(&self, index: ConstantPoolIndex) -> Option<&ConstantPoolEntry> {
        if index.is_absent() {
            return None;
        }
        self.entries.get(index.0 as usize).and_then(|e| e.as_ref())
    }

    pub fn get_checked(
        &self,
        index: ConstantPoolIndex,
    ) -> Result<&ConstantPoolEntry, ConstantPoolError> {
        self.get(index).ok_or(ConstantPoolError::MissingEntry(index))
    }

    pub fn get_utf8(&self, index: ConstantPoolIndex) -> Result<&str, ConstantPoolError> {
        match self.get_checked(index)?.kind {
            ConstantPoolKind::Utf8(ref s) => Ok(s),
            _ => Err(ConstantPoolError::NotUtf8(index)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &ConstantPoolEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (i as u16, e)))
    }

    /// Canonical rendering of one entry, resolving its children. Defined for
    /// every tag; `"?"` denotes an index that doesn't resolve or recursion
    /// that hit the depth cap.
    pub fn stringify(&self, index: ConstantPoolIndex) -> String {
        self.stringify_at_depth(index, 0)
    }

    fn stringify_at_depth(&self, index: ConstantPoolIndex, depth: usize) -> String {
        if depth >= STRINGIFY_DEPTH_LIMIT {
            return "?".to_string();
        }
        let Some(entry) = self.get(index) else {
            return "?".to_string();
        };
        self.stringify_kind(&entry.kind, depth)
    }

    fn stringify_kind(&self, kind: &ConstantPoolKind, depth: usize) -> String {
        match kind {
            ConstantPoolKind::Utf8(s) => s.clone(),
            ConstantPoolKind::Integer(v) => v.to_string(),
            ConstantPoolKind::Float(v) => v.to_string(),
            ConstantPoolKind::Long(v) => v.to_string(),
            ConstantPoolKind::Double(v) => v.to_string(),
            ConstantPoolKind::Class { name_index } => self.stringify_at_depth(*name_index, depth + 1),
            ConstantPoolKind::String { string_index } => {
                self.stringify_at_depth(*string_index, depth + 1)
            }
            ConstantPoolKind::FieldRef {
                class_index,
                name_and_type_index,
            }
            | ConstantPoolKind::MethodRef {
                class_index,
                name_and_type_index,
            }
            | ConstantPoolKind::InterfaceMethodRef {
                class_index,
                name_and_type_index,
            } => {
                let class = self.stringify_at_depth(*class_index, depth + 1);
                let (name, descriptor) = self.stringify_name_and_type(*name_and_type_index, depth + 1);
                format!("{}.{}:{}", class, name, descriptor)
            }
            ConstantPoolKind::NameAndType {
                name_index,
                descriptor_index,
            } => {
                let name = self.stringify_at_depth(*name_index, depth + 1);
                let descriptor = self.stringify_at_depth(*descriptor_index, depth + 1);
                format!("{}:{}", name, descriptor)
            }
            ConstantPoolKind::MethodHandle {
                reference_kind,
                reference_index,
            } => format!(
                "MH[{}]:{}",
                reference_kind,
                self.stringify_at_depth(*reference_index, depth + 1)
            ),
            ConstantPoolKind::MethodType { descriptor_index } => {
                self.stringify_at_depth(*descriptor_index, depth + 1)
            }
            ConstantPoolKind::Dynamic {
                bootstrap_method_attr_index,
                name_and_type_index,
            } => {
                let (name, descriptor) = self.stringify_name_and_type(*name_and_type_index, depth + 1);
                format!("#bsm{}:{}:{}", bootstrap_method_attr_index, name, descriptor)
            }
            ConstantPoolKind::InvokeDynamic {
                bootstrap_method_attr_index,
                name_and_type_index,
            } => {
                let (name, descriptor) = self.stringify_name_and_type(*name_and_type_index, depth + 1);
                format!("#bsm{}:{}:{}", bootstrap_method_attr_index, name, descriptor)
            }
            ConstantPoolKind::Module { name_index } => self.stringify_at_depth(*name_index, depth + 1),
            ConstantPoolKind::Package { name_index } => self.stringify_at_depth(*name_index, depth + 1),
            ConstantPoolKind::NullPad => String::new(),
        }
    }

    fn stringify_name_and_type(&self, index: ConstantPoolIndex, depth: usize) -> (String, String) {
        match self.get(index).map(|e| &e.kind) {
            Some(ConstantPoolKind::NameAndType {
                name_index,
                descriptor_index,
            }) => (
                self.stringify_at_depth(*name_index, depth + 1),
                self.stringify_at_depth(*descriptor_index, depth + 1),
            ),
            _ => ("?".to_string(), "?".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8(pool: &mut ConstantPool, index: u16, s: &str) {
        pool.set(
            index,
            ConstantPoolEntry {
                kind: ConstantPoolKind::Utf8(s.to_string()),
                offset: 0,
                size: 0,
            },
        );
    }

    #[test]
    fn resolves_method_ref_to_composite_string() {
        let mut pool = ConstantPool::with_capacity(8);
        utf8(&mut pool, 1, "java/lang/Object");
        pool.set(
            2,
            ConstantPoolEntry {
                kind: ConstantPoolKind::Class { name_index: 1.into() },
                offset: 0,
                size: 0,
            },
        );
        utf8(&mut pool, 3, "toString");
        utf8(&mut pool, 4, "()Ljava/lang/String;");
        pool.set(
            5,
            ConstantPoolEntry {
                kind: ConstantPoolKind::NameAndType {
                    name_index: 3.into(),
                    descriptor_index: 4.into(),
                },
                offset: 0,
                size: 0,
            },
        );
        pool.set(
            6,
            ConstantPoolEntry {
                kind: ConstantPoolKind::MethodRef {
                    class_index: 2.into(),
                    name_and_type_index: 5.into(),
                },
                offset: 0,
                size: 0,
            },
        );

        assert_eq!(
            pool.stringify(6.into()),
            "java/lang/Object.toString:()Ljava/lang/String;"
        );
    }

    #[test]
    fn stringify_bounds_cyclic_references() {
        let mut pool = ConstantPool::with_capacity(4);
        // Entry 1 is a Class pointing at entry 1 itself — not JVMS-legal,
        // but the parser is tolerant of malformed input.
        pool.set(
            1,
            ConstantPoolEntry {
                kind: ConstantPoolKind::Class { name_index: 1.into() },
                offset: 0,
                size: 0,
            },
        );
        // Must terminate rather than recursing forever.
        assert_eq!(pool.stringify(1.into()), "?");
    }

    #[test]
    fn missing_index_resolves_to_placeholder() {
        let pool = ConstantPool::with_capacity(4);
        assert_eq!(pool.stringify(3.into()), "?");
    }
}
