//! Streaming, bounds-checked parser for Java `.class` files (JVMS §4) and a
//! read-only projection layer that turns a parsed file into the symbol,
//! import, section and string views a binary-analysis host expects.

pub mod cursor;
pub mod model;
pub mod parser;
pub mod probe;
pub mod projection;
pub mod render;
pub mod sdb;

pub use model::class_file::ClassFile;
pub use parser::{parse, ParseError};
pub use probe::check;
