//! Fields and methods share an identical on-disk shape (`spec.md` §3):
//! access flags, name, descriptor, and a nested attribute list.

use super::access_flags::AccessFlags;
use super::attribute::Attribute;
use super::constant_pool::ConstantPoolIndex;

#[derive(Debug, Clone)]
pub struct Member {
    pub access_flags: AccessFlags,
    pub name_index: ConstantPoolIndex,
    pub descriptor_index: ConstantPoolIndex,
    pub attributes: Vec<Option<Attribute>>,
    pub offset: u64,
}

pub type Field = Member;
pub type Method = Member;
