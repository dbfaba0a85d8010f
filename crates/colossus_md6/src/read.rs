//! Decoding mesh parts out of a model container.

use tracing::debug;

use crate::cursor::{read_f32_le, read_u16_le};
use crate::error::Result;
use crate::types::{Face, ModelPart, Uv, Vec3};

/// Size of the container's file header; part markers are never searched for
/// inside it.
pub const FILE_HEADER_SIZE: usize = 64;

/// The two marker patterns that can open a part.
pub const PART_MARKERS: [[u8; 8]; 2] = [
    [0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x01, 0x01, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00],
];

/// Distance from the end of a marker to the 16 bit vertex count.
const SKIP_TO_VERTEX_COUNT: usize = 13;
/// Distance from the end of the vertex count to the 16 bit face count.
const SKIP_TO_FACE_COUNT: usize = 2;
/// Distance from the end of the face count to the first vertex record.
const SKIP_TO_FIRST_VERTEX: usize = 26;
/// Size of one interleaved vertex record; bytes past the position and
/// texture coordinate floats are reserved and never interpreted.
const VERTEX_STRIDE: usize = 48;
/// Size of one face record: three 16 bit indices, no padding.
const FACE_SIZE: usize = 6;

/// Scan for the next part marker at or after `offset`.
///
/// The comparison slides over the buffer; no sub-buffer is allocated per
/// candidate offset.
fn find_marker(data: &[u8], offset: usize) -> Option<usize> {
    if offset >= data.len() {
        return None;
    }

    data[offset..]
        .windows(PART_MARKERS[0].len())
        .position(|window| PART_MARKERS.iter().any(|marker| window == &marker[..]))
        .map(|position| offset + position)
}

/// Decode the next part at or after `search_offset`.
///
/// Returns the part together with the offset immediately after its face data,
/// which is where the search for the following part resumes. Returns
/// `Ok(None)` when no marker exists at or after `search_offset` — that is the
/// discovery loop's normal termination, not an error.
///
/// A vertex or face count of zero is valid and produces empty sequences. A
/// marker with insufficient bytes left for its declared counts fails with
/// [`crate::error::Error::OutOfBounds`]; the data is never silently
/// truncated.
pub fn next_part(data: &[u8], search_offset: usize) -> Result<Option<(ModelPart, usize)>> {
    let Some(marker_offset) = find_marker(data, search_offset) else {
        return Ok(None);
    };
    debug!("part marker at {marker_offset:#x}");

    let mut offset = marker_offset + PART_MARKERS[0].len();

    offset += SKIP_TO_VERTEX_COUNT;
    let vertex_count = read_u16_le(data, offset)? as usize;
    offset += 2;

    offset += SKIP_TO_FACE_COUNT;
    let face_count = read_u16_le(data, offset)? as usize;
    offset += 2;

    offset += SKIP_TO_FIRST_VERTEX;
    debug!("{vertex_count} vertices, {face_count} faces, vertex data at {offset:#x}");

    let mut vertices = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        vertices.push(Vec3 {
            x: read_f32_le(data, offset)?,
            y: read_f32_le(data, offset + 4)?,
            z: read_f32_le(data, offset + 8)?,
        });
        uvs.push(Uv {
            u: read_f32_le(data, offset + 12)?,
            v: read_f32_le(data, offset + 16)?,
        });
        offset += VERTEX_STRIDE;
    }

    let mut faces = Vec::with_capacity(face_count);
    for _ in 0..face_count {
        faces.push(Face {
            a: read_u16_le(data, offset)?,
            b: read_u16_le(data, offset + 2)?,
            c: read_u16_le(data, offset + 4)?,
        });
        offset += FACE_SIZE;
    }

    let part = ModelPart {
        vertices,
        uvs,
        faces,
        normals: None,
    };

    Ok(Some((part, offset)))
}

/// Iterator over every part in a model buffer, starting after the file
/// header. Fuses after the first decode error.
pub struct Parts<'a> {
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl Iterator for Parts<'_> {
    type Item = Result<ModelPart>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match next_part(self.data, self.offset) {
            Ok(Some((part, next_offset))) => {
                self.offset = next_offset;
                Some(Ok(part))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Iterate over every part in a model buffer.
pub fn parts(data: &[u8]) -> Parts<'_> {
    Parts {
        data,
        offset: FILE_HEADER_SIZE,
        done: false,
    }
}
