//! Access flag bitset shared by the class, each field and each method.
//!
//! JVMS gives fields and methods slightly different meanings for some bits
//! (e.g. `0x0040` is `ACC_VOLATILE` on a field but `ACC_BRIDGE` on a
//! method), but the readable-name table this crate exposes is the single
//! fixed table from `spec.md` §4.4, applied uniformly regardless of owner —
//! that is what the original implementation does, and no query in the
//! projection layer needs owner-specific bit meanings.

bitflags::bitflags! {
    #[derive(Default)]
    pub struct AccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }
}

const READABLE_TABLE: &[(AccessFlags, &str)] = &[
    (AccessFlags::PUBLIC, "public"),
    (AccessFlags::PRIVATE, "private"),
    (AccessFlags::PROTECTED, "protected"),
    (AccessFlags::STATIC, "static"),
    (AccessFlags::FINAL, "final"),
    (AccessFlags::SUPER, "super"),
    (AccessFlags::BRIDGE, "bridge"),
    (AccessFlags::VARARGS, "varargs"),
    (AccessFlags::NATIVE, "native"),
    (AccessFlags::INTERFACE, "interface"),
    (AccessFlags::ABSTRACT, "abstract"),
    (AccessFlags::STRICT, "strict"),
    (AccessFlags::SYNTHETIC, "synthetic"),
    (AccessFlags::ANNOTATION, "annotation"),
    (AccessFlags::ENUM, "enum"),
    (AccessFlags::MODULE, "module"),
];

impl AccessFlags {
    pub fn readable(self) -> String {
        READABLE_TABLE
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_known_flags_in_table_order() {
        let flags = AccessFlags::STATIC | AccessFlags::PUBLIC | AccessFlags::FINAL;
        assert_eq!(flags.readable(), "public static final");
    }

    #[test]
    fn empty_flags_render_empty_string() {
        assert_eq!(AccessFlags::empty().readable(), "");
    }
}
