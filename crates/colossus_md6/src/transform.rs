//! Whole-part transform passes applied between decode and write.
//!
//! The pipeline order is fixed: axis rotation, texture coordinate flip, face
//! winding flip, then normal computation. Normals must see the final vertex
//! positions and the final winding, so they always run last.

use crate::types::{Face, ModelPart, Uv, Vec3};

/// Which passes [`apply`] runs over a decoded part.
///
/// Both flips are involutions; the rotation is not.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Rotate positions -90 degrees about the X axis
    pub rotate_x_minus_90: bool,
    /// Flip texture coordinates between top-left and bottom-left origin
    pub flip_uvs: bool,
    /// Reverse the winding order of every face
    pub flip_faces: bool,
    /// Compute smooth per-vertex normals
    pub smooth_normals: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            rotate_x_minus_90: true,
            flip_uvs: true,
            flip_faces: true,
            smooth_normals: true,
        }
    }
}

/// Run the configured passes over `part` in pipeline order.
///
/// With `smooth_normals` disabled the part carries no normal data at all.
pub fn apply(part: &mut ModelPart, options: TransformOptions) {
    if options.rotate_x_minus_90 {
        rotate_x_minus_90(&mut part.vertices);
    }
    if options.flip_uvs {
        flip_uvs(&mut part.uvs);
    }
    if options.flip_faces {
        flip_faces(&mut part.faces);
    }
    part.normals = options
        .smooth_normals
        .then(|| compute_normals(&part.vertices, &part.faces));
}

/// `(x, y, z)` becomes `(x, z, -y)`: an exact coordinate permutation and sign
/// flip, free of trigonometric error.
pub fn rotate_x_minus_90(vertices: &mut [Vec3]) {
    for vertex in vertices {
        *vertex = Vec3 {
            x: vertex.x,
            y: vertex.z,
            z: -vertex.y,
        };
    }
}

/// `(u, v)` becomes `(u, 1 - v)`, converting between top-left and
/// bottom-left texture origins.
pub fn flip_uvs(uvs: &mut [Uv]) {
    for uv in uvs {
        uv.v = 1.0 - uv.v;
    }
}

/// Swap the second and third index of every face, reversing its front-facing
/// direction.
pub fn flip_faces(faces: &mut [Face]) {
    for face in faces {
        std::mem::swap(&mut face.b, &mut face.c);
    }
}

/// Accumulate the unnormalized cross product of every face's edge vectors
/// into all three incident vertices, then normalize the sums.
///
/// A vertex referenced by no face gets a unit +Z normal instead of a zero
/// length vector. Faces whose indices fall outside the vertex sequence are
/// skipped.
pub fn compute_normals(vertices: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    let mut sums = vec![Vec3::default(); vertices.len()];

    for face in faces {
        let (a, b, c) = (face.a as usize, face.b as usize, face.c as usize);
        let (Some(v0), Some(v1), Some(v2)) = (vertices.get(a), vertices.get(b), vertices.get(c))
        else {
            continue;
        };

        let e1 = Vec3 {
            x: v1.x - v0.x,
            y: v1.y - v0.y,
            z: v1.z - v0.z,
        };
        let e2 = Vec3 {
            x: v2.x - v0.x,
            y: v2.y - v0.y,
            z: v2.z - v0.z,
        };
        let normal = Vec3 {
            x: e1.y * e2.z - e1.z * e2.y,
            y: e1.z * e2.x - e1.x * e2.z,
            z: e1.x * e2.y - e1.y * e2.x,
        };

        for index in [a, b, c] {
            let sum = &mut sums[index];
            sum.x += normal.x;
            sum.y += normal.y;
            sum.z += normal.z;
        }
    }

    sums.into_iter()
        .map(|sum| {
            let length = (sum.x * sum.x + sum.y * sum.y + sum.z * sum.z).sqrt();
            if length > 0.0 {
                Vec3 {
                    x: sum.x / length,
                    y: sum.y / length,
                    z: sum.z / length,
                }
            } else {
                Vec3 { x: 0.0, y: 0.0, z: 1.0 }
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::transform::{
        apply, compute_normals, flip_faces, flip_uvs, rotate_x_minus_90, TransformOptions,
    };
    use crate::types::{Face, ModelPart, Uv, Vec3};

    fn triangle() -> ModelPart {
        ModelPart {
            vertices: vec![
                Vec3 { x: 0.0, y: 0.0, z: 0.0 },
                Vec3 { x: 1.0, y: 0.0, z: 0.0 },
                Vec3 { x: 0.0, y: 1.0, z: 0.0 },
            ],
            uvs: vec![
                Uv { u: 0.0, v: 0.0 },
                Uv { u: 1.0, v: 0.0 },
                Uv { u: 0.0, v: 1.0 },
            ],
            faces: vec![Face { a: 0, b: 1, c: 2 }],
            normals: None,
        }
    }

    #[test]
    fn rotation_permutes_coordinates() {
        let mut vertices = [Vec3 { x: 1.0, y: 2.0, z: 3.0 }];
        rotate_x_minus_90(&mut vertices);
        assert_eq!(vertices[0], Vec3 { x: 1.0, y: 3.0, z: -2.0 });
    }

    #[test]
    fn uv_flip_is_an_involution() {
        let original = vec![Uv { u: 0.3, v: 0.8 }, Uv { u: 0.0, v: 1.0 }];
        let mut uvs = original.clone();

        flip_uvs(&mut uvs);
        assert_eq!(uvs[0].v, 1.0 - 0.8);

        flip_uvs(&mut uvs);
        for (flipped_twice, original) in uvs.iter().zip(&original) {
            assert!((flipped_twice.u - original.u).abs() < 1e-6);
            assert!((flipped_twice.v - original.v).abs() < 1e-6);
        }
    }

    #[test]
    fn face_flip_is_an_involution() {
        let original = vec![Face { a: 0, b: 1, c: 2 }, Face { a: 3, b: 5, c: 4 }];
        let mut faces = original.clone();

        flip_faces(&mut faces);
        assert_eq!(faces[0], Face { a: 0, b: 2, c: 1 });

        flip_faces(&mut faces);
        assert_eq!(faces, original);
    }

    #[test]
    fn flat_triangle_normals_match_the_cross_product() {
        let part = triangle();
        let normals = compute_normals(&part.vertices, &part.faces);

        for normal in normals {
            assert_eq!(normal, Vec3 { x: 0.0, y: 0.0, z: 1.0 });
        }
    }

    #[test]
    fn isolated_vertex_gets_a_unit_z_normal() {
        let mut part = triangle();
        part.vertices.push(Vec3 { x: 9.0, y: 9.0, z: 9.0 });
        part.uvs.push(Uv { u: 0.0, v: 0.0 });

        let normals = compute_normals(&part.vertices, &part.faces);
        assert_eq!(normals[3], Vec3 { x: 0.0, y: 0.0, z: 1.0 });
    }

    #[test]
    fn out_of_range_face_indices_are_skipped() {
        let part = triangle();
        let faces = vec![Face { a: 0, b: 7, c: 2 }];

        let normals = compute_normals(&part.vertices, &faces);
        assert_eq!(normals.len(), 3);
        for normal in normals {
            assert_eq!(normal, Vec3 { x: 0.0, y: 0.0, z: 1.0 });
        }
    }

    #[test]
    fn apply_runs_the_full_pipeline() {
        let mut part = triangle();
        apply(&mut part, TransformOptions::default());

        assert_eq!(part.uvs.len(), part.vertices.len());
        let normals = part.normals.as_ref().expect("normals should be computed");
        assert_eq!(normals.len(), part.vertices.len());

        // Rotation took the triangle into the XZ plane, and the winding flip
        // reversed it, so the shared normal points along -Y.
        for normal in normals {
            assert_eq!(*normal, Vec3 { x: 0.0, y: -1.0, z: 0.0 });
        }
        for face in &part.faces {
            assert!((face.a as usize) < part.vertices.len());
            assert!((face.b as usize) < part.vertices.len());
            assert!((face.c as usize) < part.vertices.len());
        }
    }

    #[test]
    fn disabled_smoothing_leaves_normals_absent() {
        let mut part = triangle();
        part.normals = Some(vec![Vec3::default(); 3]);

        apply(
            &mut part,
            TransformOptions {
                smooth_normals: false,
                ..Default::default()
            },
        );

        assert_eq!(part.normals, None);
    }
}
