//! Base types for decoded mesh parts.

/// A vector in model space, also used for unit normals.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A texture coordinate.
///
/// Which vertical origin it uses depends on whether
/// [`crate::transform::flip_uvs`] has been applied.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Uv {
    pub u: f32,
    pub v: f32,
}

/// A triangle as three indices into a part's vertex sequence.
///
/// Indices are 0-based internally; the winding order decides which side is
/// front facing and can be reversed with [`crate::transform::flip_faces`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Face {
    pub a: u16,
    pub b: u16,
    pub c: u16,
}

/// One marker-delimited mesh part.
///
/// `uvs` is always index-aligned with `vertices`, and so is `normals` when
/// present. `normals` is `None` until computed; `None` means absent, not
/// empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelPart {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Uv>,
    pub faces: Vec<Face>,
    pub normals: Option<Vec<Vec3>>,
}
