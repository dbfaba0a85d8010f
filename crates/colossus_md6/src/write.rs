//! Serializing mesh parts to Wavefront OBJ.

use std::io::Write;

use crate::error::Result;
use crate::types::ModelPart;

/// Write one part as OBJ text.
///
/// OBJ cannot index position, texture coordinate and normal channels
/// independently per vertex, so every face references the same 1-based index
/// for all three — guaranteed to be correct because the part's sequences are
/// index-aligned by construction.
///
/// Face lines carry two slash-separated groups per vertex reference when the
/// part has no normals and three when it does.
pub fn write_obj<W: Write>(writer: &mut W, part: &ModelPart) -> Result<()> {
    writeln!(writer, "# vertices: {}", part.vertices.len())?;
    writeln!(writer, "# faces: {}", part.faces.len())?;
    if part.normals.is_some() {
        writeln!(writer, "# smooth shading: on")?;
    }
    writeln!(writer)?;

    for vertex in &part.vertices {
        writeln!(writer, "v {:.6} {:.6} {:.6}", vertex.x, vertex.y, vertex.z)?;
    }

    if let Some(normals) = &part.normals {
        writeln!(writer)?;
        for normal in normals {
            writeln!(writer, "vn {:.6} {:.6} {:.6}", normal.x, normal.y, normal.z)?;
        }
    }

    writeln!(writer)?;
    for uv in &part.uvs {
        writeln!(writer, "vt {:.6} {:.6}", uv.u, uv.v)?;
    }

    writeln!(writer)?;
    for face in &part.faces {
        let (a, b, c) = (
            u32::from(face.a) + 1,
            u32::from(face.b) + 1,
            u32::from(face.c) + 1,
        );
        if part.normals.is_some() {
            writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        } else {
            writeln!(writer, "f {a}/{a} {b}/{b} {c}/{c}")?;
        }
    }

    Ok(())
}
