// crates/seccat-core/src/escape.rs
//
// Caret/meta notation for control and high-bit bytes.
//
//   0x00..=0x1F  ^@ .. ^_        (tab: ^I only with show_tabs, raw otherwise)
//   0x20..=0x7E  as-is
//   0x7F         ^?
//   0x80..=0x9F  M-^@ .. M-^_
//   0xA0..=0xFE  M-  .. M-~
//   0xFF         M-^?

use crate::error::TransformError;

/// Longest expansion of a single input byte (`M-^?`).
pub const MAX_ESCAPE_LEN: usize = 4;

const TAB: u8 = b'\t';
const DEL: u8 = 0x7f;

/// Append the escaped form of one byte to `out`.
#[inline]
pub fn push_escaped(b: u8, show_tabs: bool, out: &mut Vec<u8>) {
    match b {
        TAB if show_tabs => out.extend_from_slice(b"^I"),
        TAB => out.push(TAB),
        0x20..=0x7e => out.push(b),
        DEL => out.extend_from_slice(b"^?"),
        0x00..=0x1f => out.extend_from_slice(&[b'^', b + 64]),
        0x80..=0x9f => out.extend_from_slice(&[b'M', b'-', b'^', b - 128 + 64]),
        0xa0..=0xfe => out.extend_from_slice(&[b'M', b'-', b - 128]),
        0xff => out.extend_from_slice(b"M-^?"),
    }
}

/// Escape `line` into `out` (cleared first). Reserves the worst case up
/// front so an allocation failure is reported instead of aborting.
pub fn escape_line_into(line: &[u8], show_tabs: bool, out: &mut Vec<u8>) -> Result<(), TransformError> {
    out.clear();
    let requested = line
        .len()
        .checked_mul(MAX_ESCAPE_LEN)
        .ok_or(TransformError::Alloc { requested: usize::MAX })?;
    out.try_reserve(requested)
        .map_err(|_| TransformError::Alloc { requested })?;

    for &b in line {
        push_escaped(b, show_tabs, out);
    }
    Ok(())
}
