use crate::{
    element::{EH, HH, Handle, VH},
    error::Error,
    mesh::Mesh,
    topol::Topology,
};
use glam::Vec3;
use hashbrown::HashMap;
use tracing::debug;

/// The element of a source mesh that generated a vertex of the destination
/// mesh.
///
/// Edges are keyed by [`EH`], so both halfedges of an edge refer to the same
/// source.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Source {
    Vertex(VH),
    Edge(EH),
}

impl From<VH> for Source {
    fn from(v: VH) -> Self {
        Source::Vertex(v)
    }
}

impl From<EH> for Source {
    fn from(e: EH) -> Self {
        Source::Edge(e)
    }
}

impl From<HH> for Source {
    fn from(h: HH) -> Self {
        Source::Edge(h.edge())
    }
}

/// Accumulates vertices and faces of a new mesh, and computes the halfedge
/// connectivity at the end in [`MeshBuilder::finalize`].
///
/// Vertices can be registered against the element of another mesh they were
/// derived from, and looked up later by that element. The destination mesh
/// is only written when the builder is finalized, so if anything goes wrong
/// before that the destination stays empty.
///
/// ```rust
/// use butterfly::{Mesh, MeshBuilder};
///
/// let src = Mesh::tetrahedron(1.0).expect("Cannot create tetrahedron");
/// let mut dst = Mesh::new();
/// let mut builder = MeshBuilder::new(&mut dst).expect("Destination must be empty");
/// for v in src.vertices() {
///     builder.insert_vertex(src.point(v).unwrap() * 2.0, v);
/// }
/// for f in src.faces() {
///     let fv: Vec<_> = src
///         .fv_ccw_iter(f)
///         .map(|v| builder.find_dst_vertex_of(v).unwrap())
///         .collect();
///     builder.insert_face(&fv).expect("Cannot insert face");
/// }
/// builder.finalize().expect("Cannot finalize mesh");
/// assert_eq!((4, 6, 4), (dst.num_vertices(), dst.num_edges(), dst.num_faces()));
/// ```
pub struct MeshBuilder<'a> {
    dst: &'a mut Mesh,
    points: Vec<Vec3>,
    indices: Vec<VH>,
    arities: Vec<usize>,
    index: HashMap<Source, VH>,
}

impl<'a> MeshBuilder<'a> {
    /// Start building into `dst`, which must be empty.
    pub fn new(dst: &'a mut Mesh) -> Result<Self, Error> {
        Self::with_capacity(dst, 0, 0)
    }

    /// Start building into `dst`, reserving space for `nverts` vertices and
    /// `nfaces` triangles.
    pub fn with_capacity(dst: &'a mut Mesh, nverts: usize, nfaces: usize) -> Result<Self, Error> {
        if !dst.is_empty() {
            return Err(Error::DestinationNotEmpty);
        }
        Ok(MeshBuilder {
            dst,
            points: Vec::with_capacity(nverts),
            indices: Vec::with_capacity(nfaces * 3),
            arities: Vec::with_capacity(nfaces),
            index: HashMap::with_capacity(nverts),
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    pub fn num_faces(&self) -> usize {
        self.arities.len()
    }

    /// The vertex previously registered for `src`, if any.
    pub fn find_dst_vertex_of(&self, src: impl Into<Source>) -> Option<VH> {
        self.index.get(&src.into()).copied()
    }

    /// Add a vertex that is not derived from any source element.
    pub fn add_vertex(&mut self, pos: Vec3) -> VH {
        let v: VH = (self.points.len() as u32).into();
        self.points.push(pos);
        v
    }

    /// Add a vertex at `pos` and register it against `src`. If a vertex is
    /// already registered for `src`, that vertex is returned and `pos` is
    /// ignored.
    pub fn insert_vertex(&mut self, pos: Vec3, src: impl Into<Source>) -> VH {
        let src = src.into();
        if let Some(v) = self.index.get(&src) {
            return *v;
        }
        let v = self.add_vertex(pos);
        self.index.insert(src, v);
        v
    }

    pub fn insert_triangle(&mut self, v0: VH, v1: VH, v2: VH) -> Result<(), Error> {
        self.insert_face(&[v0, v1, v2])
    }

    /// Record a face with the given loop of vertices. The connectivity is
    /// only computed when the builder is finalized.
    pub fn insert_face(&mut self, verts: &[VH]) -> Result<(), Error> {
        for (i, v) in verts.iter().enumerate() {
            if (v.index() as usize) >= self.points.len() {
                return Err(Error::InvalidVertex(*v));
            }
            if verts[(i + 1)..].contains(v) {
                return Err(Error::DegenerateFace(*v));
            }
        }
        if verts.len() < 3 {
            return Err(Error::DegenerateFace(
                verts.first().copied().unwrap_or(0.into()),
            ));
        }
        self.indices.extend_from_slice(verts);
        self.arities.push(verts.len());
        Ok(())
    }

    /// Compute the halfedge connectivity of all the recorded faces and move
    /// the result into the destination mesh.
    pub fn finalize(self) -> Result<(), Error> {
        debug!(
            vertices = self.points.len(),
            faces = self.arities.len(),
            "Finalizing mesh"
        );
        let topol = Topology::from_faces(self.points.len(), &self.indices, &self.arities)?;
        *self.dst = Mesh::from_parts(topol, self.points);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{MeshBuilder, Source};
    use crate::{
        element::{EH, HH, Handle},
        error::Error,
        mesh::Mesh,
    };

    #[test]
    fn t_dedup_by_source() {
        let mut mesh = Mesh::new();
        let mut builder = MeshBuilder::new(&mut mesh).expect("Cannot create builder");
        let v0 = builder.insert_vertex(glam::vec3(1.0, 2.0, 3.0), Source::Vertex(7.into()));
        let v1 = builder.insert_vertex(glam::vec3(4.0, 5.0, 6.0), Source::Vertex(7.into()));
        assert_eq!(v0, v1);
        assert_eq!(builder.num_vertices(), 1);
        // An edge and its two halfedges are the same source.
        let e: EH = 3.into();
        let (h, oh) = e.halfedges();
        assert_eq!(builder.find_dst_vertex_of(h), None);
        let ev = builder.insert_vertex(glam::Vec3::ZERO, h);
        assert_eq!(builder.find_dst_vertex_of(oh), Some(ev));
        assert_eq!(builder.find_dst_vertex_of(e), Some(ev));
        // Vertex 3 and edge 3 are different sources.
        assert_eq!(builder.find_dst_vertex_of(Source::Vertex(3.into())), None);
        assert_eq!(builder.find_dst_vertex_of(HH::from(8)), None);
    }

    #[test]
    fn t_destination_must_be_empty() {
        let mut mesh = Mesh::tetrahedron(1.0).expect("Cannot create tetrahedron");
        assert!(matches!(
            MeshBuilder::new(&mut mesh),
            Err(Error::DestinationNotEmpty)
        ));
        assert_eq!(mesh.num_faces(), 4);
    }

    #[test]
    fn t_invalid_faces() {
        let mut mesh = Mesh::new();
        let mut builder = MeshBuilder::new(&mut mesh).expect("Cannot create builder");
        let verts: Vec<_> = (0..3)
            .map(|i| builder.add_vertex(glam::vec3(i as f32, 0.0, 0.0)))
            .collect();
        assert!(matches!(
            builder.insert_triangle(verts[0], verts[1], 3.into()),
            Err(Error::InvalidVertex(v)) if v.index() == 3
        ));
        assert!(matches!(
            builder.insert_triangle(verts[0], verts[1], verts[0]),
            Err(Error::DegenerateFace(_))
        ));
        assert!(matches!(
            builder.insert_face(&verts[..2]),
            Err(Error::DegenerateFace(_))
        ));
        assert_eq!(builder.num_faces(), 0);
    }

    #[test]
    fn t_failed_finalize_leaves_destination_empty() {
        let mut mesh = Mesh::new();
        let mut builder = MeshBuilder::new(&mut mesh).expect("Cannot create builder");
        let verts: Vec<_> = (0..4).map(|_| builder.add_vertex(glam::Vec3::ZERO)).collect();
        builder
            .insert_triangle(verts[0], verts[1], verts[2])
            .expect("Cannot insert triangle");
        // Same winding along the shared edge.
        builder
            .insert_triangle(verts[0], verts[1], verts[3])
            .expect("Cannot insert triangle");
        assert!(matches!(
            builder.finalize(),
            Err(Error::ComplexHalfedge(_, _))
        ));
        assert!(mesh.is_empty());
    }

    #[test]
    fn t_finalize() {
        let mut mesh = Mesh::new();
        let mut builder = MeshBuilder::with_capacity(&mut mesh, 4, 4).expect("Cannot create builder");
        let verts: Vec<_> = [
            glam::vec3(0.0, 0.0, 0.0),
            glam::vec3(1.0, 0.0, 0.0),
            glam::vec3(0.0, 1.0, 0.0),
            glam::vec3(0.0, 0.0, 1.0),
        ]
        .iter()
        .map(|p| builder.add_vertex(*p))
        .collect();
        for [a, b, c] in [[0usize, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]] {
            builder
                .insert_triangle(verts[a], verts[b], verts[c])
                .expect("Cannot insert triangle");
        }
        builder.finalize().expect("Cannot finalize");
        assert_eq!(4, mesh.num_vertices());
        assert_eq!(6, mesh.num_edges());
        assert_eq!(4, mesh.num_faces());
        assert!(mesh.is_closed());
        mesh.check_topology().expect("Topological errors found");
    }
}
