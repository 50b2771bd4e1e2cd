//! Interface, field and method decoding (`spec.md` §4.4). Fields and
//! methods share an identical on-disk shape, so one function serves either
//! list; interfaces are a single index each.

use super::attribute::parse_attribute_list;
use crate::cursor::ByteCursor;
use crate::model::access_flags::AccessFlags;
use crate::model::constant_pool::ConstantPool;
use crate::model::interface::Interface;
use crate::model::member::Member;

/// Reads `count` interface entries. `count` has already been read and
/// clamped by `sanitize` at the call site (`spec.md` §4.1 step 4). An entry
/// that fails to decode becomes a `None` slot; the loop continues to the
/// declared count rather than truncating the list (`spec.md` §4.1/§7).
pub fn parse_interface_list(cursor: &mut ByteCursor, base: u64, count: u16) -> Vec<Option<Interface>> {
    let mut interfaces = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let offset = base + cursor.tell() as u64;
        let Ok(raw_index) = cursor.read_be16() else {
            log::warn!("truncated interface entry at offset {}; recording a null slot", offset);
            interfaces.push(None);
            continue;
        };
        interfaces.push(Some(Interface {
            index: raw_index.into(),
            offset,
        }));
    }
    interfaces
}

/// Reads `count` members (fields or methods). `count` has already been read
/// and clamped by `sanitize` at the call site. A member whose own
/// fixed-size header can't be read becomes a `None` slot, and the loop
/// continues to the declared count rather than truncating the list
/// (`spec.md` §4.1/§7); one whose nested attribute list comes up short
/// still yields a member (an empty attribute list), since the header itself
/// decoded fine.
pub fn parse_member_list(
    cursor: &mut ByteCursor,
    base: u64,
    pool: &ConstantPool,
    count: u16,
) -> Vec<Option<Member>> {
    let mut members = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let offset = base + cursor.tell() as u64;
        let member = (|| -> Option<Member> {
            let access_flags = AccessFlags::from_bits_truncate(cursor.read_be16().ok()?);
            let name_index = cursor.read_be16().ok()?.into();
            let descriptor_index = cursor.read_be16().ok()?.into();
            let attributes = parse_attribute_list(cursor, base, pool, 0);
            Some(Member {
                access_flags,
                name_index,
                descriptor_index,
                attributes,
                offset,
            })
        })();

        if member.is_none() {
            log::warn!("truncated member entry at offset {}; recording a null slot", offset);
        }
        members.push(member);
    }
    members
}
