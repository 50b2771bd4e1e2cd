//! Attribute envelope and the typed JVMS §4.7 variants it can resolve into.

use super::constant_pool::ConstantPoolIndex;

/// Names recognised by the resolver, grounded in JVMS §4.7. An attribute
/// whose name isn't in this list (or whose name index doesn't resolve to a
/// `Utf8` at all) stays an `AttributeKind::Unknown`.
pub mod name {
    pub const CONSTANT_VALUE: &str = "ConstantValue";
    pub const CODE: &str = "Code";
    pub const STACK_MAP_TABLE: &str = "StackMapTable";
    pub const EXCEPTIONS: &str = "Exceptions";
    pub const INNER_CLASSES: &str = "InnerClasses";
    pub const ENCLOSING_METHOD: &str = "EnclosingMethod";
    pub const SYNTHETIC: &str = "Synthetic";
    pub const SIGNATURE: &str = "Signature";
    pub const SOURCE_FILE: &str = "SourceFile";
    pub const SOURCE_DEBUG_EXTENSION: &str = "SourceDebugExtension";
    pub const LINE_NUMBER_TABLE: &str = "LineNumberTable";
    pub const LOCAL_VARIABLE_TABLE: &str = "LocalVariableTable";
    pub const LOCAL_VARIABLE_TYPE_TABLE: &str = "LocalVariableTypeTable";
    pub const DEPRECATED: &str = "Deprecated";
    pub const RUNTIME_VISIBLE_ANNOTATIONS: &str = "RuntimeVisibleAnnotations";
    pub const RUNTIME_INVISIBLE_ANNOTATIONS: &str = "RuntimeInvisibleAnnotations";
    pub const RUNTIME_VISIBLE_PARAMETER_ANNOTATIONS: &str = "RuntimeVisibleParameterAnnotations";
    pub const RUNTIME_INVISIBLE_PARAMETER_ANNOTATIONS: &str = "RuntimeInvisibleParameterAnnotations";
    pub const RUNTIME_VISIBLE_TYPE_ANNOTATIONS: &str = "RuntimeVisibleTypeAnnotations";
    pub const RUNTIME_INVISIBLE_TYPE_ANNOTATIONS: &str = "RuntimeInvisibleTypeAnnotations";
    pub const ANNOTATION_DEFAULT: &str = "AnnotationDefault";
    pub const BOOTSTRAP_METHODS: &str = "BootstrapMethods";
    pub const METHOD_PARAMETERS: &str = "MethodParameters";
    pub const MODULE: &str = "Module";
    pub const MODULE_PACKAGES: &str = "ModulePackages";
    pub const MODULE_MAIN_CLASS: &str = "ModuleMainClass";
    pub const NEST_HOST: &str = "NestHost";
    pub const NEST_MEMBERS: &str = "NestMembers";
    pub const RECORD: &str = "Record";
    pub const PERMITTED_SUBCLASSES: &str = "PermittedSubclasses";
}

#[derive(Debug, Clone)]
pub struct ExceptionTableEntry {
    pub start_pc: u16,
    pub end_pc: u16,
    pub handler_pc: u16,
    pub catch_type: ConstantPoolIndex,
}

#[derive(Debug, Clone)]
pub struct LineNumberEntry {
    pub start_pc: u16,
    pub line_number: u16,
}

#[derive(Debug, Clone)]
pub struct LocalVariableEntry {
    pub start_pc: u16,
    pub length: u16,
    pub name_index: ConstantPoolIndex,
    pub descriptor_or_signature_index: ConstantPoolIndex,
    pub index: u16,
}

#[derive(Debug, Clone)]
pub struct InnerClassEntry {
    pub inner_class_info_index: ConstantPoolIndex,
    pub outer_class_info_index: ConstantPoolIndex,
    pub inner_name_index: ConstantPoolIndex,
    pub inner_class_access_flags: u16,
}

#[derive(Debug, Clone)]
pub struct BootstrapMethodEntry {
    pub bootstrap_method_ref: ConstantPoolIndex,
    pub bootstrap_arguments: Vec<ConstantPoolIndex>,
}

#[derive(Debug, Clone)]
pub struct MethodParameterEntry {
    pub name_index: ConstantPoolIndex,
    pub access_flags: u16,
}

#[derive(Debug, Clone)]
pub struct RecordComponentEntry {
    pub name_index: ConstantPoolIndex,
    pub descriptor_index: ConstantPoolIndex,
    pub attributes: Vec<Option<Attribute>>,
}

#[derive(Debug, Clone)]
pub struct ModuleRequireEntry {
    pub module_index: ConstantPoolIndex,
    pub flags: u16,
    pub version_index: ConstantPoolIndex,
}

#[derive(Debug, Clone)]
pub struct ModuleExportEntry {
    pub index: ConstantPoolIndex,
    pub flags: u16,
    pub to_indices: Vec<ConstantPoolIndex>,
}

#[derive(Debug, Clone)]
pub struct ModuleProvideEntry {
    pub index: ConstantPoolIndex,
    pub with_indices: Vec<ConstantPoolIndex>,
}

#[derive(Debug, Clone)]
pub struct ModuleAttribute {
    pub module_name_index: ConstantPoolIndex,
    pub module_flags: u16,
    pub module_version_index: ConstantPoolIndex,
    pub requires: Vec<ModuleRequireEntry>,
    pub exports: Vec<ModuleExportEntry>,
    pub opens: Vec<ModuleExportEntry>,
    pub uses: Vec<ConstantPoolIndex>,
    pub provides: Vec<ModuleProvideEntry>,
}

/// A header-only summary of an annotation-bearing attribute. Full
/// `element_value` recursion is out of scope (`spec.md` §1): no query in
/// the projection layer needs it, so the count is parsed and the remaining
/// bytes are kept raw.
#[derive(Debug, Clone)]
pub struct AnnotationsSummary {
    pub count: u16,
    pub raw: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code_length: u32,
    pub code_offset: u64,
    pub exception_table: Vec<ExceptionTableEntry>,
    pub attributes: Vec<Option<Attribute>>,
}

#[derive(Debug, Clone)]
pub enum AttributeKind {
    ConstantValue(ConstantPoolIndex),
    Code(CodeAttribute),
    StackMapTable { raw: Vec<u8> },
    Exceptions(Vec<ConstantPoolIndex>),
    InnerClasses(Vec<InnerClassEntry>),
    EnclosingMethod {
        class_index: ConstantPoolIndex,
        method_index: ConstantPoolIndex,
    },
    Synthetic,
    Signature(ConstantPoolIndex),
    SourceFile(ConstantPoolIndex),
    SourceDebugExtension(Vec<u8>),
    LineNumberTable(Vec<LineNumberEntry>),
    LocalVariableTable(Vec<LocalVariableEntry>),
    LocalVariableTypeTable(Vec<LocalVariableEntry>),
    Deprecated,
    RuntimeVisibleAnnotations(AnnotationsSummary),
    RuntimeInvisibleAnnotations(AnnotationsSummary),
    RuntimeVisibleParameterAnnotations(AnnotationsSummary),
    RuntimeInvisibleParameterAnnotations(AnnotationsSummary),
    RuntimeVisibleTypeAnnotations(AnnotationsSummary),
    RuntimeInvisibleTypeAnnotations(AnnotationsSummary),
    AnnotationDefault(Vec<u8>),
    BootstrapMethods(Vec<BootstrapMethodEntry>),
    MethodParameters(Vec<MethodParameterEntry>),
    Module(ModuleAttribute),
    ModulePackages(Vec<ConstantPoolIndex>),
    ModuleMainClass(ConstantPoolIndex),
    NestHost(ConstantPoolIndex),
    NestMembers(Vec<ConstantPoolIndex>),
    Record(Vec<RecordComponentEntry>),
    PermittedSubclasses(Vec<ConstantPoolIndex>),
    /// Name didn't resolve to a known attribute kind. The envelope (offset,
    /// size, name index) is still available to downstream consumers.
    Unknown { raw: Vec<u8> },
}

impl AttributeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::ConstantValue(_) => name::CONSTANT_VALUE,
            AttributeKind::Code(_) => name::CODE,
            AttributeKind::StackMapTable { .. } => name::STACK_MAP_TABLE,
            AttributeKind::Exceptions(_) => name::EXCEPTIONS,
            AttributeKind::InnerClasses(_) => name::INNER_CLASSES,
            AttributeKind::EnclosingMethod { .. } => name::ENCLOSING_METHOD,
            AttributeKind::Synthetic => name::SYNTHETIC,
            AttributeKind::Signature(_) => name::SIGNATURE,
            AttributeKind::SourceFile(_) => name::SOURCE_FILE,
            AttributeKind::SourceDebugExtension(_) => name::SOURCE_DEBUG_EXTENSION,
            AttributeKind::LineNumberTable(_) => name::LINE_NUMBER_TABLE,
            AttributeKind::LocalVariableTable(_) => name::LOCAL_VARIABLE_TABLE,
            AttributeKind::LocalVariableTypeTable(_) => name::LOCAL_VARIABLE_TYPE_TABLE,
            AttributeKind::Deprecated => name::DEPRECATED,
            AttributeKind::RuntimeVisibleAnnotations(_) => name::RUNTIME_VISIBLE_ANNOTATIONS,
            AttributeKind::RuntimeInvisibleAnnotations(_) => name::RUNTIME_INVISIBLE_ANNOTATIONS,
            AttributeKind::RuntimeVisibleParameterAnnotations(_) => {
                name::RUNTIME_VISIBLE_PARAMETER_ANNOTATIONS
            }
            AttributeKind::RuntimeInvisibleParameterAnnotations(_) => {
                name::RUNTIME_INVISIBLE_PARAMETER_ANNOTATIONS
            }
            AttributeKind::RuntimeVisibleTypeAnnotations(_) => name::RUNTIME_VISIBLE_TYPE_ANNOTATIONS,
            AttributeKind::RuntimeInvisibleTypeAnnotations(_) => {
                name::RUNTIME_INVISIBLE_TYPE_ANNOTATIONS
            }
            AttributeKind::AnnotationDefault(_) => name::ANNOTATION_DEFAULT,
            AttributeKind::BootstrapMethods(_) => name::BOOTSTRAP_METHODS,
            AttributeKind::MethodParameters(_) => name::METHOD_PARAMETERS,
            AttributeKind::Module(_) => name::MODULE,
            AttributeKind::ModulePackages(_) => name::MODULE_PACKAGES,
            AttributeKind::ModuleMainClass(_) => name::MODULE_MAIN_CLASS,
            AttributeKind::NestHost(_) => name::NEST_HOST,
            AttributeKind::NestMembers(_) => name::NEST_MEMBERS,
            AttributeKind::Record(_) => name::RECORD,
            AttributeKind::PermittedSubclasses(_) => name::PERMITTED_SUBCLASSES,
            AttributeKind::Unknown { .. } => "Unknown",
        }
    }
}

/// The envelope is always retained, even when `kind` resolved successfully,
/// so offset/size/name queries never need to branch on resolution state.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub attribute_name_index: ConstantPoolIndex,
    pub attribute_length: u32,
    pub offset: u64,
    pub kind: AttributeKind,
}

impl Attribute {
    pub fn find_code(attributes: &[Option<Attribute>]) -> Option<&CodeAttribute> {
        attributes.iter().flatten().find_map(|a| match &a.kind {
            AttributeKind::Code(code) => Some(code),
            _ => None,
        })
    }

    pub fn has_line_number_table(code: &CodeAttribute) -> bool {
        code.attributes
            .iter()
            .flatten()
            .any(|a| matches!(a.kind, AttributeKind::LineNumberTable(_)))
    }
}
