//! The root aggregate built by a single parse pass (`spec.md` §3).

use super::attribute::Attribute;
use super::constant_pool::{ConstantPool, ConstantPoolIndex};
use super::interface::Interface;
use super::member::{Field, Method};

#[derive(Debug)]
pub struct ClassFile {
    pub magic: u32,
    pub minor_version: u16,
    pub major_version: u16,

    pub constant_pool: ConstantPool,
    pub constant_pool_offset: u64,

    pub access_flags: u16,
    pub this_class: ConstantPoolIndex,
    pub super_class: ConstantPoolIndex,

    pub interfaces: Vec<Option<Interface>>,
    pub interfaces_offset: u64,

    pub fields: Vec<Option<Field>>,
    pub fields_offset: u64,

    pub methods: Vec<Option<Method>>,
    pub methods_offset: u64,

    pub attributes: Vec<Option<Attribute>>,
    pub attributes_offset: u64,

    pub class_end_offset: u64,
}

impl ClassFile {
    /// `spec.md` §8 invariant 3: section offsets never go backwards.
    pub fn offsets_are_monotone(&self) -> bool {
        self.constant_pool_offset <= self.interfaces_offset
            && self.interfaces_offset <= self.fields_offset
            && self.fields_offset <= self.methods_offset
            && self.methods_offset <= self.attributes_offset
            && self.attributes_offset <= self.class_end_offset
    }
}
