use memchr::{memchr, memchr_iter, memrchr};
use serde::Serialize;

use crate::types::Offset;

/// Where an offset falls in the input. `line` and `column` are 1-based and
/// counted in characters; `char_offset` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub offset: Offset,
    pub char_offset: usize,
    pub line: usize,
    pub column: usize,
    pub line_start: Offset,
    pub line_end: Offset,
}

pub fn locate(text: &str, offset: Offset) -> Location {
    let offset = clamp_to_boundary(text, offset);
    let bytes = text.as_bytes();

    let line_start = memrchr(b'\n', &bytes[..offset]).map_or(0, |idx| idx + 1);
    let mut line_end = memchr(b'\n', &bytes[offset..]).map_or(bytes.len(), |idx| offset + idx);
    if line_end > line_start && bytes[line_end - 1] == b'\r' {
        line_end -= 1;
    }

    Location {
        offset,
        char_offset: text[..offset].chars().count(),
        line: memchr_iter(b'\n', &bytes[..offset]).count() + 1,
        column: text[line_start..offset].chars().count() + 1,
        line_start,
        line_end: line_end.max(line_start),
    }
}

pub fn is_multiline(text: &str) -> bool {
    memchr(b'\n', text.as_bytes()).is_some()
}

fn clamp_to_boundary(text: &str, offset: Offset) -> Offset {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
