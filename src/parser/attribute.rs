//! Attribute envelope reader and name-dispatched resolver (`spec.md` §4.3).

use crate::cursor::ByteCursor;
use crate::model::attribute::{
    name, AnnotationsSummary, Attribute, AttributeKind, BootstrapMethodEntry, CodeAttribute,
    ExceptionTableEntry, InnerClassEntry, LineNumberEntry, LocalVariableEntry, MethodParameterEntry,
    ModuleAttribute, ModuleExportEntry, ModuleProvideEntry, ModuleRequireEntry, RecordComponentEntry,
};
use crate::model::constant_pool::ConstantPool;

/// Code cannot legally nest Code (JVMS), but attribute lists are walked
/// recursively (Code -> nested attributes, Record -> per-component
/// attributes), so a small belt-and-braces cap bounds recursion against
/// adversarial input (`spec.md` §9).
const MAX_ATTRIBUTE_NESTING: usize = 4;

struct Envelope<'b> {
    name_index: u16,
    attribute_length: u32,
    payload_offset: u64,
    raw: &'b [u8],
}

fn decode_envelope<'b>(cursor: &mut ByteCursor<'b>, base: u64) -> Option<Envelope<'b>> {
    let name_index = cursor.read_be16().ok()?;
    let attribute_length = cursor.read_be32().ok()?;
    let payload_offset = base + cursor.tell() as u64;
    let raw = cursor.read_bytes(attribute_length as usize).ok()?;
    Some(Envelope {
        name_index,
        attribute_length,
        payload_offset,
        raw,
    })
}

/// Parses a `{count, attribute[count]}` list at the cursor's current
/// position, reading the count itself. Used for every nested attribute list
/// (member attributes, Code's own attributes, Record component attributes)
/// — none of those counts are `sanitize`-clamped, per `spec.md` §4.1.
pub fn parse_attribute_list(
    cursor: &mut ByteCursor,
    base: u64,
    pool: &ConstantPool,
    depth: usize,
) -> Vec<Option<Attribute>> {
    let count = match cursor.read_be16() {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };
    parse_attribute_list_with_count(cursor, base, pool, depth, count)
}

/// Core loop shared by `parse_attribute_list` and the top-level class
/// attributes section, whose count is pre-read and `sanitize`-clamped by
/// the caller. Each attribute that fails to decode its envelope becomes a
/// `None` slot, and the loop continues to the declared count rather than
/// truncating the list (`spec.md` §4.1/§7); each attribute whose envelope
/// decodes fine but whose body resolution fails becomes an `Unknown`
/// envelope rather than being dropped, so offset/size/name stay queryable.
pub fn parse_attribute_list_with_count(
    cursor: &mut ByteCursor,
    base: u64,
    pool: &ConstantPool,
    depth: usize,
    count: u16,
) -> Vec<Option<Attribute>> {
    let mut attributes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let Some(envelope) = decode_envelope(cursor, base) else {
            log::warn!("truncated attribute envelope; recording a null slot");
            attributes.push(None);
            continue;
        };
        let resolved = resolve(pool, &envelope, depth);
        attributes.push(Some(Attribute {
            attribute_name_index: envelope.name_index.into(),
            attribute_length: envelope.attribute_length,
            offset: envelope.payload_offset,
            kind: resolved,
        }));
    }
    attributes
}

fn resolve(pool: &ConstantPool, envelope: &Envelope, depth: usize) -> AttributeKind {
    let attr_name = pool.get_utf8(envelope.name_index.into()).ok();
    let raw = envelope.raw;

    let kind = attr_name.and_then(|n| resolve_known(n, raw, pool, envelope.payload_offset, depth));
    kind.unwrap_or_else(|| AttributeKind::Unknown { raw: raw.to_vec() })
}

fn resolve_known(
    attr_name: &str,
    raw: &[u8],
    pool: &ConstantPool,
    payload_offset: u64,
    depth: usize,
) -> Option<AttributeKind> {
    let mut cursor = ByteCursor::new(raw);
    match attr_name {
        name::CONSTANT_VALUE => Some(AttributeKind::ConstantValue(cursor.read_be16().ok()?.into())),
        name::CODE => resolve_code(&mut cursor, payload_offset, pool, depth),
        name::STACK_MAP_TABLE => Some(AttributeKind::StackMapTable { raw: raw.to_vec() }),
        name::EXCEPTIONS => {
            let count = cursor.read_be16().ok()?;
            let mut indices = Vec::with_capacity(count as usize);
            for _ in 0..count {
                indices.push(cursor.read_be16().ok()?.into());
            }
            Some(AttributeKind::Exceptions(indices))
        }
        name::INNER_CLASSES => {
            let count = cursor.read_be16().ok()?;
            let mut entries = Vec::with_capacity(count as usize);
            for _ in 0..count {
                entries.push(InnerClassEntry {
                    inner_class_info_index: cursor.read_be16().ok()?.into(),
                    outer_class_info_index: cursor.read_be16().ok()?.into(),
                    inner_name_index: cursor.read_be16().ok()?.into(),
                    inner_class_access_flags: cursor.read_be16().ok()?,
                });
            }
            Some(AttributeKind::InnerClasses(entries))
        }
        name::ENCLOSING_METHOD => Some(AttributeKind::EnclosingMethod {
            class_index: cursor.read_be16().ok()?.into(),
            method_index: cursor.read_be16().ok()?.into(),
        }),
        name::SYNTHETIC => Some(AttributeKind::Synthetic),
        name::SIGNATURE => Some(AttributeKind::Signature(cursor.read_be16().ok()?.into())),
        name::SOURCE_FILE => Some(AttributeKind::SourceFile(cursor.read_be16().ok()?.into())),
        name::SOURCE_DEBUG_EXTENSION => Some(AttributeKind::SourceDebugExtension(raw.to_vec())),
        name::LINE_NUMBER_TABLE => {
            let count = cursor.read_be16().ok()?;
            let mut entries = Vec::with_capacity(count as usize);
            for _ in 0..count {
                entries.push(LineNumberEntry {
                    start_pc: cursor.read_be16().ok()?,
                    line_number: cursor.read_be16().ok()?,
                });
            }
            Some(AttributeKind::LineNumberTable(entries))
        }
        name::LOCAL_VARIABLE_TABLE => {
            resolve_local_variable_table(&mut cursor).map(AttributeKind::LocalVariableTable)
        }
        name::LOCAL_VARIABLE_TYPE_TABLE => {
            resolve_local_variable_table(&mut cursor).map(AttributeKind::LocalVariableTypeTable)
        }
        name::DEPRECATED => Some(AttributeKind::Deprecated),
        name::RUNTIME_VISIBLE_ANNOTATIONS => {
            resolve_annotations(&mut cursor, raw).map(AttributeKind::RuntimeVisibleAnnotations)
        }
        name::RUNTIME_INVISIBLE_ANNOTATIONS => {
            resolve_annotations(&mut cursor, raw).map(AttributeKind::RuntimeInvisibleAnnotations)
        }
        name::RUNTIME_VISIBLE_PARAMETER_ANNOTATIONS => resolve_annotations(&mut cursor, raw)
            .map(AttributeKind::RuntimeVisibleParameterAnnotations),
        name::RUNTIME_INVISIBLE_PARAMETER_ANNOTATIONS => resolve_annotations(&mut cursor, raw)
            .map(AttributeKind::RuntimeInvisibleParameterAnnotations),
        name::RUNTIME_VISIBLE_TYPE_ANNOTATIONS => {
            resolve_annotations(&mut cursor, raw).map(AttributeKind::RuntimeVisibleTypeAnnotations)
        }
        name::RUNTIME_INVISIBLE_TYPE_ANNOTATIONS => {
            resolve_annotations(&mut cursor, raw).map(AttributeKind::RuntimeInvisibleTypeAnnotations)
        }
        name::ANNOTATION_DEFAULT => Some(AttributeKind::AnnotationDefault(raw.to_vec())),
        name::BOOTSTRAP_METHODS => {
            let count = cursor.read_be16().ok()?;
            let mut entries = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bootstrap_method_ref = cursor.read_be16().ok()?.into();
                let arg_count = cursor.read_be16().ok()?;
                let mut bootstrap_arguments = Vec::with_capacity(arg_count as usize);
                for _ in 0..arg_count {
                    bootstrap_arguments.push(cursor.read_be16().ok()?.into());
                }
                entries.push(BootstrapMethodEntry {
                    bootstrap_method_ref,
                    bootstrap_arguments,
                });
            }
            Some(AttributeKind::BootstrapMethods(entries))
        }
        name::METHOD_PARAMETERS => {
            let count = cursor.read_be8().ok()?;
            let mut entries = Vec::with_capacity(count as usize);
            for _ in 0..count {
                entries.push(MethodParameterEntry {
                    name_index: cursor.read_be16().ok()?.into(),
                    access_flags: cursor.read_be16().ok()?,
                });
            }
            Some(AttributeKind::MethodParameters(entries))
        }
        name::MODULE => resolve_module(&mut cursor).map(AttributeKind::Module),
        name::MODULE_PACKAGES => {
            let count = cursor.read_be16().ok()?;
            let mut indices = Vec::with_capacity(count as usize);
            for _ in 0..count {
                indices.push(cursor.read_be16().ok()?.into());
            }
            Some(AttributeKind::ModulePackages(indices))
        }
        name::MODULE_MAIN_CLASS => Some(AttributeKind::ModuleMainClass(cursor.read_be16().ok()?.into())),
        name::NEST_HOST => Some(AttributeKind::NestHost(cursor.read_be16().ok()?.into())),
        name::NEST_MEMBERS => {
            let count = cursor.read_be16().ok()?;
            let mut indices = Vec::with_capacity(count as usize);
            for _ in 0..count {
                indices.push(cursor.read_be16().ok()?.into());
            }
            Some(AttributeKind::NestMembers(indices))
        }
        name::RECORD => resolve_record(&mut cursor, payload_offset, pool, depth).map(AttributeKind::Record),
        name::PERMITTED_SUBCLASSES => {
            let count = cursor.read_be16().ok()?;
            let mut indices = Vec::with_capacity(count as usize);
            for _ in 0..count {
                indices.push(cursor.read_be16().ok()?.into());
            }
            Some(AttributeKind::PermittedSubclasses(indices))
        }
        _ => None,
    }
}

fn resolve_code(
    cursor: &mut ByteCursor,
    payload_offset: u64,
    pool: &ConstantPool,
    depth: usize,
) -> Option<AttributeKind> {
    let max_stack = cursor.read_be16().ok()?;
    let max_locals = cursor.read_be16().ok()?;
    let code_length = cursor.read_be32().ok()?;
    let code_offset = payload_offset + 8;
    cursor.skip_bytes(code_length as usize).ok()?;

    let exception_table_count = cursor.read_be16().ok()?;
    let mut exception_table = Vec::with_capacity(exception_table_count as usize);
    for _ in 0..exception_table_count {
        exception_table.push(ExceptionTableEntry {
            start_pc: cursor.read_be16().ok()?,
            end_pc: cursor.read_be16().ok()?,
            handler_pc: cursor.read_be16().ok()?,
            catch_type: cursor.read_be16().ok()?.into(),
        });
    }

    let attributes = if depth + 1 < MAX_ATTRIBUTE_NESTING {
        parse_attribute_list(cursor, payload_offset, pool, depth + 1)
    } else {
        log::warn!("Code attribute nesting exceeded the recursion cap; dropping nested attributes");
        Vec::new()
    };

    Some(AttributeKind::Code(CodeAttribute {
        max_stack,
        max_locals,
        code_length,
        code_offset,
        exception_table,
        attributes,
    }))
}

fn resolve_local_variable_table(cursor: &mut ByteCursor) -> Option<Vec<LocalVariableEntry>> {
    let count = cursor.read_be16().ok()?;
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        entries.push(LocalVariableEntry {
            start_pc: cursor.read_be16().ok()?,
            length: cursor.read_be16().ok()?,
            name_index: cursor.read_be16().ok()?.into(),
            descriptor_or_signature_index: cursor.read_be16().ok()?.into(),
            index: cursor.read_be16().ok()?,
        });
    }
    Some(entries)
}

fn resolve_annotations(cursor: &mut ByteCursor, raw: &[u8]) -> Option<AnnotationsSummary> {
    let count = cursor.read_be16().ok()?;
    let remainder = cursor.tell();
    Some(AnnotationsSummary {
        count,
        raw: raw[remainder..].to_vec(),
    })
}

fn resolve_module(cursor: &mut ByteCursor) -> Option<ModuleAttribute> {
    let module_name_index = cursor.read_be16().ok()?.into();
    let module_flags = cursor.read_be16().ok()?;
    let module_version_index = cursor.read_be16().ok()?.into();

    let requires_count = cursor.read_be16().ok()?;
    let mut requires = Vec::with_capacity(requires_count as usize);
    for _ in 0..requires_count {
        requires.push(ModuleRequireEntry {
            module_index: cursor.read_be16().ok()?.into(),
            flags: cursor.read_be16().ok()?,
            version_index: cursor.read_be16().ok()?.into(),
        });
    }

    let exports = resolve_module_export_like(cursor)?;
    let opens = resolve_module_export_like(cursor)?;

    let uses_count = cursor.read_be16().ok()?;
    let mut uses = Vec::with_capacity(uses_count as usize);
    for _ in 0..uses_count {
        uses.push(cursor.read_be16().ok()?.into());
    }

    let provides_count = cursor.read_be16().ok()?;
    let mut provides = Vec::with_capacity(provides_count as usize);
    for _ in 0..provides_count {
        let index = cursor.read_be16().ok()?.into();
        let with_count = cursor.read_be16().ok()?;
        let mut with_indices = Vec::with_capacity(with_count as usize);
        for _ in 0..with_count {
            with_indices.push(cursor.read_be16().ok()?.into());
        }
        provides.push(ModuleProvideEntry { index, with_indices });
    }

    Some(ModuleAttribute {
        module_name_index,
        module_flags,
        module_version_index,
        requires,
        exports,
        opens,
        uses,
        provides,
    })
}

fn resolve_module_export_like(cursor: &mut ByteCursor) -> Option<Vec<ModuleExportEntry>> {
    let count = cursor.read_be16().ok()?;
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let index = cursor.read_be16().ok()?.into();
        let flags = cursor.read_be16().ok()?;
        let to_count = cursor.read_be16().ok()?;
        let mut to_indices = Vec::with_capacity(to_count as usize);
        for _ in 0..to_count {
            to_indices.push(cursor.read_be16().ok()?.into());
        }
        entries.push(ModuleExportEntry {
            index,
            flags,
            to_indices,
        });
    }
    Some(entries)
}

fn resolve_record(
    cursor: &mut ByteCursor,
    payload_offset: u64,
    pool: &ConstantPool,
    depth: usize,
) -> Option<Vec<RecordComponentEntry>> {
    let count = cursor.read_be16().ok()?;
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name_index = cursor.read_be16().ok()?.into();
        let descriptor_index = cursor.read_be16().ok()?.into();
        let attributes = if depth + 1 < MAX_ATTRIBUTE_NESTING {
            parse_attribute_list(cursor, payload_offset, pool, depth + 1)
        } else {
            Vec::new()
        };
        entries.push(RecordComponentEntry {
            name_index,
            descriptor_index,
            attributes,
        });
    }
    Some(entries)
}
