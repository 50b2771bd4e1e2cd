pub mod access_flags;
pub mod attribute;
pub mod class_file;
pub mod constant_pool;
pub mod interface;
pub mod member;
