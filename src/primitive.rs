use crate::{error::Error, mesh::Mesh};
use glam::{Vec3, vec3};

/// Platonic solids.
impl Mesh {
    /// Create a tetrahedron centered at the origin, with the given
    /// circumradius. The vertices of the mesh will lie on the sphere.
    pub fn tetrahedron(radius: f32) -> Result<Self, Error> {
        let a = radius * (1.0f32 / 3.0);
        let b = radius * (8.0f32 / 9.0).sqrt();
        let c = radius * (2.0f32 / 9.0).sqrt();
        let d = radius * (2.0f32 / 3.0).sqrt();
        Self::from_triangles(
            &[
                vec3(0.0, 0.0, radius),
                vec3(-c, d, -a),
                vec3(-c, -d, -a),
                vec3(b, 0.0, -a),
            ],
            &[[0, 1, 2], [0, 2, 3], [0, 3, 1], [3, 2, 1]],
        )
    }

    /// Create an octahedron centered at the origin, with the given
    /// circumradius. The vertices lie on the coordinate axes, in the order
    /// `+x, +y, -x, -y, +z, -z`.
    pub fn octahedron(radius: f32) -> Result<Self, Error> {
        Self::from_triangles(
            &[
                vec3(radius, 0.0, 0.0),
                vec3(0.0, radius, 0.0),
                vec3(-radius, 0.0, 0.0),
                vec3(0.0, -radius, 0.0),
                vec3(0.0, 0.0, radius),
                vec3(0.0, 0.0, -radius),
            ],
            &[
                [0, 4, 3],
                [1, 4, 0],
                [2, 4, 1],
                [3, 4, 2],
                [3, 5, 0],
                [0, 5, 1],
                [1, 5, 2],
                [2, 5, 3],
            ],
        )
    }

    /// Create an icosahedron centered at the origin, with the given
    /// circumradius. The vertices of the mesh will lie on the sphere.
    pub fn icosahedron(radius: f32) -> Result<Self, Error> {
        const A: f32 = 0.5257311121191336;
        const B: f32 = 0.8506508083520399;
        let points: Vec<Vec3> = [
            vec3(0.0, A, -B),
            vec3(A, B, 0.0),
            vec3(-A, B, 0.0),
            vec3(0.0, A, B),
            vec3(0.0, -A, B),
            vec3(-B, 0.0, A),
            vec3(0.0, -A, -B),
            vec3(B, 0.0, -A),
            vec3(B, 0.0, A),
            vec3(-B, 0.0, -A),
            vec3(A, -B, 0.0),
            vec3(-A, -B, 0.0),
        ]
        .iter()
        .map(|p| *p * radius)
        .collect();
        Self::from_triangles(
            &points,
            &[
                [2, 1, 0],
                [1, 2, 3],
                [5, 4, 3],
                [4, 8, 3],
                [7, 6, 0],
                [6, 9, 0],
                [11, 10, 4],
                [10, 11, 6],
                [9, 5, 2],
                [5, 9, 11],
                [8, 7, 1],
                [7, 8, 10],
                [2, 5, 3],
                [8, 1, 3],
                [9, 2, 0],
                [1, 7, 0],
                [11, 9, 6],
                [7, 10, 6],
                [5, 11, 4],
                [10, 8, 4],
            ],
        )
    }
}
