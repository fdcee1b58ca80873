use crate::{
    builder::MeshBuilder,
    element::{EH, FH, HH, Handle, VH},
    error::Error,
    iterator,
    topol::Topology,
};
use glam::Vec3;

/// Halfedge triangle mesh with 32 bit floating point vertex positions.
///
/// A mesh is immutable once built. New meshes are created with a
/// [`MeshBuilder`], which computes the halfedge connectivity from the list of
/// faces in one go.
#[derive(Clone, Default)]
pub struct Mesh {
    pub(crate) topol: Topology,
    pub(crate) points: Vec<Vec3>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Mesh {
            topol: Topology::new(),
            points: Vec::new(),
        }
    }

    /// Create a mesh from a list of points and triangles referring to those
    /// points by index.
    ///
    /// ```rust
    /// use butterfly::Mesh;
    ///
    /// let mesh = Mesh::from_triangles(
    ///     &[
    ///         glam::vec3(0.0, 0.0, 0.0),
    ///         glam::vec3(1.0, 0.0, 0.0),
    ///         glam::vec3(0.0, 1.0, 0.0),
    ///     ],
    ///     &[[0, 1, 2]],
    /// )
    /// .expect("Cannot create mesh");
    /// assert_eq!((3, 3, 1), (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces()));
    /// ```
    pub fn from_triangles(points: &[Vec3], triangles: &[[u32; 3]]) -> Result<Self, Error> {
        let mut mesh = Mesh::new();
        let mut builder = MeshBuilder::with_capacity(&mut mesh, points.len(), triangles.len())?;
        for p in points {
            builder.add_vertex(*p);
        }
        for &[a, b, c] in triangles {
            builder.insert_triangle(a.into(), b.into(), c.into())?;
        }
        builder.finalize()?;
        Ok(mesh)
    }

    pub(crate) fn from_parts(topol: Topology, points: Vec<Vec3>) -> Self {
        debug_assert_eq!(topol.num_vertices(), points.len());
        Mesh { topol, points }
    }

    /// A mesh is empty if it has no vertices.
    pub fn is_empty(&self) -> bool {
        self.num_vertices() == 0
    }

    pub fn num_vertices(&self) -> usize {
        self.topol.num_vertices()
    }

    pub fn num_edges(&self) -> usize {
        self.topol.num_edges()
    }

    pub fn num_halfedges(&self) -> usize {
        self.topol.num_halfedges()
    }

    pub fn num_faces(&self) -> usize {
        self.topol.num_faces()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VH> + use<> {
        self.topol.vertices()
    }

    pub fn halfedges(&self) -> impl Iterator<Item = HH> + use<> {
        self.topol.halfedges()
    }

    pub fn edges(&self) -> impl Iterator<Item = EH> + use<> {
        self.topol.edges()
    }

    pub fn faces(&self) -> impl Iterator<Item = FH> + use<> {
        self.topol.faces()
    }

    /// The position of a vertex.
    pub fn point(&self, v: VH) -> Result<Vec3, Error> {
        self.points
            .get(v.index() as usize)
            .copied()
            .ok_or(Error::InvalidVertex(v))
    }

    /// Positions of all vertices, indexed by the vertex handles.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn is_boundary_edge(&self, e: EH) -> bool {
        e.is_boundary(self)
    }

    /// Check if the mesh has no boundary edges.
    pub fn is_closed(&self) -> bool {
        self.halfedges().all(|h| !self.topol.is_boundary_halfedge(h))
    }

    pub fn vertex_valence(&self, v: VH) -> usize {
        self.topol.vertex_valence(v)
    }

    pub fn face_valence(&self, f: FH) -> usize {
        self.topol.face_valence(f)
    }

    pub fn find_halfedge(&self, from: VH, to: VH) -> Option<HH> {
        self.topol.find_halfedge(from, to)
    }

    pub fn voh_ccw_iter(&self, v: VH) -> impl Iterator<Item = HH> + use<'_> {
        iterator::voh_ccw_iter(&self.topol, v)
    }

    pub fn vv_ccw_iter(&self, v: VH) -> impl Iterator<Item = VH> + use<'_> {
        iterator::vv_ccw_iter(&self.topol, v)
    }

    pub fn vf_ccw_iter(&self, v: VH) -> impl Iterator<Item = FH> + use<'_> {
        iterator::vf_ccw_iter(&self.topol, v)
    }

    pub fn fh_ccw_iter(&self, f: FH) -> impl Iterator<Item = HH> + use<'_> {
        iterator::fh_ccw_iter(&self.topol, f)
    }

    pub fn fv_ccw_iter(&self, f: FH) -> impl Iterator<Item = VH> + use<'_> {
        iterator::fv_ccw_iter(&self.topol, f)
    }

    /// Vertex indices of every face, in face order. Faces with more than three
    /// vertices are not expected here.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.faces()
            .map(|f| {
                let h = f.halfedge(self);
                [
                    h.tail(self).index(),
                    h.head(self).index(),
                    h.next(self).head(self).index(),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::Mesh;
    use crate::{element::Handle, error::Error};

    #[test]
    fn t_from_triangles() {
        let mesh = Mesh::from_triangles(
            &[
                glam::vec3(0.0, 0.0, 0.0),
                glam::vec3(1.0, 0.0, 0.0),
                glam::vec3(1.0, 1.0, 0.0),
                glam::vec3(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2], [0, 2, 3]],
        )
        .expect("Cannot create mesh");
        assert_eq!(4, mesh.num_vertices());
        assert_eq!(5, mesh.num_edges());
        assert_eq!(2, mesh.num_faces());
        assert!(!mesh.is_closed());
        assert_eq!(mesh.triangles(), vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(
            mesh.point(2.into()).expect("Cannot read point"),
            glam::vec3(1.0, 1.0, 0.0)
        );
        assert_eq!(
            mesh.edges().filter(|e| mesh.is_boundary_edge(*e)).count(),
            4
        );
    }

    #[test]
    fn t_circulators() {
        let oct = Mesh::octahedron(1.0).expect("Cannot create octahedron");
        // +z is surrounded by the four vertices of the equator.
        let top = 4.into();
        assert!(oct.voh_ccw_iter(top).all(|h| h.tail(&oct) == top));
        let mut nbs: Vec<_> = oct.vv_ccw_iter(top).map(|v| v.index()).collect();
        nbs.sort();
        assert_eq!(nbs, [0, 1, 2, 3]);
        let faces: Vec<_> = oct.vf_ccw_iter(top).map(|f| f.index()).collect();
        assert_eq!(faces.len(), 4);
        assert!(faces.iter().all(|f| *f < 4));
        for f in oct.faces() {
            let hs: Vec<_> = oct.fh_ccw_iter(f).collect();
            assert_eq!(hs.len(), 3);
            assert_eq!(hs[0], f.halfedge(&oct));
            assert!(hs.iter().all(|h| h.face(&oct) == Some(f)));
            let vs: Vec<_> = oct.fv_ccw_iter(f).collect();
            assert_eq!(vs, hs.iter().map(|h| h.tail(&oct)).collect::<Vec<_>>());
        }
    }

    #[test]
    fn t_point_out_of_bounds() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        match mesh.point(0.into()) {
            Err(Error::InvalidVertex(v)) => assert_eq!(v.index(), 0),
            _ => panic!("Expected an out of bounds error"),
        }
    }
}
