//! Name table resolution and sanitization.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

use crate::error::Result;

/// Build-pipeline tags appended to asset names. Everything from the tag up to
/// the next `.` (or the end of the name) is dropped during sanitization.
const PIPELINE_TAGS: [&str; 3] = ["_lodgroup=", "_streamdb=", "_group="];

/// Characters that cannot appear in a path component on common filesystems.
const ILLEGAL_CHARS: [char; 9] = ['$', '#', '<', '>', ':', '|', '?', '*', '"'];

/// The table of display names stored in a resources archive.
///
/// Entries are resolved eagerly and sanitized; lookups after construction are
/// plain indexed reads.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    /// Read the name table at `offset`.
    ///
    /// The table is a 64-bit count followed by that many 64-bit offsets. Each
    /// offset is relative to the stream position immediately after the offset
    /// list, not to the table's start.
    pub fn read<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<NameTable> {
        reader.seek(SeekFrom::Start(offset))?;
        let count = reader.read_u64::<LittleEndian>()?;

        let mut offsets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            offsets.push(reader.read_u64::<LittleEndian>()?);
        }

        let base = reader.stream_position()?;

        let mut names = Vec::with_capacity(count as usize);
        for name_offset in offsets {
            reader.seek(SeekFrom::Start(base + name_offset))?;
            let raw = read_cstring(reader)?;
            names.push(sanitize_name(&raw));
        }

        Ok(NameTable { names })
    }

    /// Number of entries contained in this table.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether this table contains no entries
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up a sanitized display name by string-table index.
    pub fn get(&self, index: u64) -> Option<&str> {
        self.names.get(index as usize).map(String::as_str)
    }
}

/// Read a null terminated string, decoding permissively.
///
/// Invalid byte sequences are replaced rather than treated as fatal, and the
/// end of the stream terminates the string like a null byte would.
pub fn read_cstring<R: Read>(reader: &mut R) -> Result<String> {
    let mut raw = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte)? {
            0 => break,
            _ if byte[0] == b'\0' => break,
            _ => raw.push(byte[0]),
        }
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Sanitize an archive name into a usable relative path.
///
/// Strips build-pipeline tags, collapses a compound extension down to its
/// primary extension (`.tex_medium` becomes `.tex`) and replaces characters
/// that are illegal in paths with an underscore.
pub fn sanitize_name(raw: &str) -> String {
    let mut name = raw.to_owned();

    for tag in PIPELINE_TAGS {
        name = strip_pipeline_tag(&name, tag);
    }

    if let Some((stem, extension)) = name.rsplit_once('.') {
        if let Some((primary, _variant)) = extension.split_once('_') {
            name = format!("{stem}.{primary}");
        }
    }

    name.replace(&ILLEGAL_CHARS[..], "_")
}

/// Drop everything from `tag` up to the next `.` or the end of the name.
fn strip_pipeline_tag(name: &str, tag: &str) -> String {
    let Some(start) = name.find(tag) else {
        return name.to_owned();
    };

    match name[start..].find('.') {
        Some(dot) => format!("{}{}", &name[..start], &name[start + dot..]),
        None => name[..start].to_owned(),
    }
}
