//! End-to-end scenario and invariant tests driven through the public API
//! (`classfile_core::{check, parse}` plus the projection/render layers),
//! using hand-built byte arrays rather than `javac` output so the crate
//! stays dependency-free of a JDK at test time.

use classfile_core::projection::{self, types::SymbolQuery};
use classfile_core::render;

/// Small big-endian byte builder; keeps the fixtures below readable instead
/// of manually concatenating byte-literal slices.
#[derive(Default)]
struct Builder {
    buf: Vec<u8>,
}

impl Builder {
    fn u16(&mut self, v: u16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    fn utf8(&mut self, s: &str) -> &mut Self {
        self.u8(1).u16(s.len() as u16);
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    fn class_entry(&mut self, name_index: u16) -> &mut Self {
        self.u8(7).u16(name_index)
    }

    fn long_entry(&mut self, v: i64) -> &mut Self {
        self.u8(5);
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Scenario A: a minimal valid empty class — `public class Empty extends
/// java/lang/Object`, zero fields/methods/attributes.
fn scenario_a_bytes() -> Vec<u8> {
    let mut b = Builder::default();
    b.u32(0xCAFEBABE).u16(0).u16(52);
    b.u16(5); // constant_pool_count: entries 1..4
    b.utf8("Empty"); // #1
    b.class_entry(1); // #2 this_class
    b.utf8("java/lang/Object"); // #3
    b.class_entry(3); // #4 super_class
    b.u16(0x0021); // access_flags: PUBLIC | SUPER
    b.u16(2); // this_class
    b.u16(4); // super_class
    b.u16(0); // interfaces_count
    b.u16(0); // fields_count
    b.u16(0); // methods_count
    b.u16(0); // attributes_count
    b.bytes()
}

#[test]
fn scenario_a_minimal_empty_class() {
    let buf = scenario_a_bytes();
    assert_eq!(buf.len(), 57);
    assert!(classfile_core::check(&buf));

    let class_file = classfile_core::parse(&buf, 0).unwrap();
    assert_eq!(projection::name(&class_file), "Empty");
    assert_eq!(projection::super_name(&class_file), "java/lang/Object");
    assert_eq!(
        projection::version::version(class_file.major_version, class_file.minor_version),
        "Java SE 1.8"
    );
    assert!(projection::entrypoints(&class_file).is_empty());

    let sections = projection::sections::sections(&class_file);
    let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["class.constant_pool", "class.attr"]);
}

/// Scenario B: one `public static main([Ljava/lang/String;)V` with an empty
/// `Code` attribute.
fn scenario_b_bytes() -> Vec<u8> {
    let mut b = Builder::default();
    b.u32(0xCAFEBABE).u16(0).u16(52);
    b.u16(8); // constant_pool_count: entries 1..7
    b.utf8("HelloWorld"); // #1
    b.class_entry(1); // #2 this_class
    b.utf8("java/lang/Object"); // #3
    b.class_entry(3); // #4 super_class
    b.utf8("main"); // #5
    b.utf8("([Ljava/lang/String;)V"); // #6
    b.utf8("Code"); // #7
    b.u16(0x0021); // access_flags
    b.u16(2); // this_class
    b.u16(4); // super_class
    b.u16(0); // interfaces_count
    b.u16(0); // fields_count
    b.u16(1); // methods_count
    // method: main
    b.u16(0x0009); // PUBLIC | STATIC
    b.u16(5); // name_index
    b.u16(6); // descriptor_index
    b.u16(1); // attributes_count
    // Code attribute, empty body: max_stack, max_locals, code_length=0,
    // exception_table_count=0, nested attributes_count=0.
    b.u16(7); // attribute_name_index
    b.u32(2 + 2 + 4 + 0 + 2 + 2); // attribute_length = 12
    b.u16(1).u16(1).u32(0); // max_stack, max_locals, code_length
    b.u16(0); // exception_table_count
    b.u16(0); // nested attributes_count
    b.u16(0); // class-level attributes_count
    b.bytes()
}

#[test]
fn scenario_b_helloworld_main() {
    let buf = scenario_b_bytes();
    let class_file = classfile_core::parse(&buf, 0).unwrap();

    let entrypoints = projection::entrypoints(&class_file);
    assert_eq!(entrypoints.len(), 1);
    let code_offset = entrypoints[0];
    assert_eq!(
        projection::resolve_symbol(&class_file, SymbolQuery::Main),
        code_offset
    );
    assert_eq!(projection::debug_info(&class_file).bits(), projection::types::DebugInfo::SYMS.bits());
}

/// Scenario C (Kotlin artifact) is covered by
/// `projection::language::language`'s own unit tests.

/// Scenario D: a constant pool of 5 entries where index 2 is a Long.
#[test]
fn scenario_d_long_constant_padding() {
    use classfile_core::model::constant_pool::ConstantPoolKind;

    let mut b = Builder::default();
    b.u32(0xCAFEBABE).u16(0).u16(52);
    b.u16(5); // constant_pool_count: entries 1..4
    b.utf8("x"); // #1
    b.long_entry(0); // #2 Long -> #3 synthesized NullPad
    b.utf8("y"); // #4
    b.u16(0x0021); // access_flags
    b.u16(0); // this_class
    b.u16(0); // super_class
    b.u16(0); // interfaces_count
    b.u16(0); // fields_count
    b.u16(0); // methods_count
    b.u16(0); // attributes_count
    let buf = b.bytes();

    let class_file = classfile_core::parse(&buf, 0).unwrap();
    assert!(matches!(
        class_file.constant_pool.get(3u16.into()).unwrap().kind,
        ConstantPoolKind::NullPad
    ));
    assert_eq!(
        class_file.constant_pool.get_utf8(4u16.into()).unwrap(),
        "y"
    );
}

/// Scenario E: `attributes_count` claims 100 but only a few bytes remain.
#[test]
fn scenario_e_truncated_attributes_sanitizes_to_zero() {
    let mut buf = scenario_a_bytes();
    let len = buf.len();
    buf[len - 2..].copy_from_slice(&100u16.to_be_bytes());

    let class_file = classfile_core::parse(&buf, 0).unwrap();
    assert!(class_file.attributes.is_empty());
}

/// Scenario F: corrupt magic.
#[test]
fn scenario_f_corrupt_magic_fails_probe() {
    let mut buf = scenario_a_bytes();
    buf[0..4].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    assert!(!classfile_core::check(&buf));
    // parse() itself is still tolerant of a bad magic — callers are
    // expected to gate on check() before ever calling it.
    assert!(classfile_core::parse(&buf, 0).is_ok());
}

/// Invariant 4: parsing the same buffer twice yields structurally equal
/// results.
#[test]
fn parse_is_idempotent() {
    let buf = scenario_b_bytes();
    let first = classfile_core::parse(&buf, 0).unwrap();
    let second = classfile_core::parse(&buf, 0).unwrap();
    assert_eq!(first.magic, second.magic);
    assert_eq!(first.constant_pool.count(), second.constant_pool.count());
    assert_eq!(projection::name(&first), projection::name(&second));
    assert_eq!(
        projection::entrypoints(&first),
        projection::entrypoints(&second)
    );
}

/// Invariant 5: text rendering is valid UTF-8 (guaranteed by `String`'s
/// invariant) and JSON rendering parses as JSON.
#[test]
fn renderings_are_well_formed() {
    let class_file = classfile_core::parse(&scenario_b_bytes(), 0).unwrap();
    let text = render::text::render(&class_file);
    assert!(text.contains("Version:"));

    let json = render::json::render_views(&class_file);
    let round_tripped: serde_json::Value = serde_json::from_str(&json.to_string()).unwrap();
    assert_eq!(round_tripped["language"], "java");
}

/// Invariant 6: `libraries()` is duplicate-free and stable across repeated
/// calls on the same parsed file.
#[test]
fn libraries_are_deduplicated_and_stable() {
    let class_file = classfile_core::parse(&scenario_b_bytes(), 0).unwrap();
    let first = projection::symbols::libraries(&class_file);
    let second = projection::symbols::libraries(&class_file);
    assert_eq!(first, second);

    let mut seen = std::collections::HashSet::new();
    for name in &first {
        assert!(seen.insert(name.clone()), "duplicate library entry: {name}");
    }
}
