use super::constant_pool::ConstantPoolIndex;

/// A declared interface: one `u16` index into the constant pool (pointing
/// at a `Class` entry), plus the offset it was read from.
#[derive(Debug, Clone)]
pub struct Interface {
    pub index: ConstantPoolIndex,
    pub offset: u64,
}
