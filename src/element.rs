use crate::{iterator, mesh::Mesh, topol::Topology};
use std::fmt::{Debug, Display};

/**
 * All elements of the mesh implement this trait. They are identified by their
 * index.
 */
pub trait Handle {
    /**
     * The index of the element.
     */
    fn index(&self) -> u32;
}

/**
 * Vertex handle.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VH {
    idx: u32,
}

/**
 * Halfedge handle.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HH {
    idx: u32,
}

/**
 * Edge handle.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EH {
    idx: u32,
}

/**
 * Face handle.
 */
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FH {
    idx: u32,
}

macro_rules! impl_handle {
    ($type:ident, $name:literal) => {
        impl Handle for $type {
            fn index(&self) -> u32 {
                self.idx
            }
        }

        impl From<u32> for $type {
            fn from(idx: u32) -> Self {
                $type { idx }
            }
        }

        impl From<&u32> for $type {
            fn from(idx: &u32) -> Self {
                $type { idx: *idx }
            }
        }

        impl Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", $name, self.idx)
            }
        }

        impl Debug for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", $name, self.idx)
            }
        }
    };
}

impl_handle!(VH, "VH");
impl_handle!(HH, "HH");
impl_handle!(EH, "EH");
impl_handle!(FH, "FH");

/// Anything that can lend out the halfedge topology of a mesh. All the
/// navigation methods on the handles work with this.
pub trait HasTopology {
    fn topology(&self) -> &Topology;
}

impl HasTopology for Topology {
    fn topology(&self) -> &Topology {
        self
    }
}

impl HasTopology for Mesh {
    fn topology(&self) -> &Topology {
        &self.topol
    }
}

impl VH {
    /// The outgoing halfedge of this vertex, if it is not isolated. For
    /// boundary vertices this is always a boundary halfedge.
    pub fn halfedge(self, mesh: &impl HasTopology) -> Option<HH> {
        mesh.topology().vertex_halfedge(self)
    }

    /// Check if this vertex is valid for the `mesh`.
    ///
    /// The index has to be less than the number of vertices in the mesh.
    pub fn is_valid(self, mesh: &impl HasTopology) -> bool {
        mesh.topology().is_valid_vertex(self)
    }

    /// Check if this vertex is on the boundary of the `mesh`.
    pub fn is_boundary(self, mesh: &impl HasTopology) -> bool {
        mesh.topology().is_boundary_vertex(self)
    }
}

impl HH {
    /// The vertex this halfedge points to, i.e. its end.
    pub fn head(self, mesh: &impl HasTopology) -> VH {
        mesh.topology().head_vertex(self)
    }

    /// The vertex this halfedge starts from.
    pub fn tail(self, mesh: &impl HasTopology) -> VH {
        mesh.topology().tail_vertex(self)
    }

    /// The twin of this halfedge. The two halfedges of an edge are stored
    /// next to each other, so this doesn't need the mesh.
    pub fn opposite(self) -> HH {
        (self.idx ^ 1).into()
    }

    pub fn prev(self, mesh: &impl HasTopology) -> HH {
        mesh.topology().prev_halfedge(self)
    }

    pub fn next(self, mesh: &impl HasTopology) -> HH {
        mesh.topology().next_halfedge(self)
    }

    pub fn face(self, mesh: &impl HasTopology) -> Option<FH> {
        mesh.topology().halfedge_face(self)
    }

    /// The edge this halfedge is one half of. A halfedge and its opposite
    /// always share the same edge.
    pub fn edge(self) -> EH {
        (self.idx >> 1).into()
    }

    /// Check if this halfedge is valid for the `mesh`.
    ///
    /// The index has to be less than the number of halfedges in the mesh.
    pub fn is_valid(self, mesh: &impl HasTopology) -> bool {
        mesh.topology().is_valid_halfedge(self)
    }

    /// Check if this halfedge is on the boundary of `mesh`.
    ///
    /// A halfedge is considered interior if it has a face incident on it.
    pub fn is_boundary(self, mesh: &impl HasTopology) -> bool {
        mesh.topology().is_boundary_halfedge(self)
    }
}

impl EH {
    pub fn halfedges(self) -> (HH, HH) {
        let hi = self.idx << 1;
        (hi.into(), (hi | 1).into())
    }

    pub fn halfedge(self, flag: bool) -> HH {
        ((self.idx << 1) | if flag { 1 } else { 0 }).into()
    }

    /// The two vertices of this edge.
    pub fn vertices(self, mesh: &impl HasTopology) -> (VH, VH) {
        let h = self.halfedge(false);
        (h.tail(mesh), h.head(mesh))
    }

    /// Check if this edge is valid for the `mesh`.
    pub fn is_valid(self, mesh: &impl HasTopology) -> bool {
        mesh.topology().is_valid_edge(self)
    }

    /// Check if the edge is a boundary edge.
    ///
    /// An edge is considered interior if it has two faces incident on both of it's halfedges.
    pub fn is_boundary(self, mesh: &impl HasTopology) -> bool {
        let (h, oh) = self.halfedges();
        h.is_boundary(mesh) || oh.is_boundary(mesh)
    }
}

impl FH {
    /// The halfedge this face starts from. For a face created from the loop
    /// `[v0, v1, ...]`, this halfedge points from `v0` to `v1`.
    pub fn halfedge(self, mesh: &impl HasTopology) -> HH {
        mesh.topology().face_halfedge(self)
    }

    /// Check if this face is valid for the `mesh`.
    pub fn is_valid(self, mesh: &impl HasTopology) -> bool {
        mesh.topology().is_valid_face(self)
    }

    /// Number of vertices / halfedges around this face.
    pub fn valence(self, mesh: &impl HasTopology) -> usize {
        iterator::fh_ccw_iter(mesh.topology(), self).count()
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Vertex {
    pub(crate) halfedge: Option<HH>,
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Halfedge {
    pub(crate) face: Option<FH>,
    pub(crate) vertex: VH,
    pub(crate) next: HH,
    pub(crate) prev: HH,
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Edge {
    pub(crate) halfedges: [Halfedge; 2],
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Face {
    pub(crate) halfedge: HH,
}

#[cfg(test)]
mod test {
    use super::{EH, FH, HH, Handle, VH};
    use crate::mesh::Mesh;

    #[test]
    fn t_halfedge_pairs() {
        let e: EH = 7.into();
        let (h, oh) = e.halfedges();
        assert_eq!(h.index(), 14);
        assert_eq!(oh.index(), 15);
        assert_eq!(h.opposite(), oh);
        assert_eq!(oh.opposite(), h);
        assert_eq!(h.edge(), e);
        assert_eq!(oh.edge(), e);
        assert_eq!(e.halfedge(false), h);
        assert_eq!(e.halfedge(true), oh);
    }

    #[test]
    fn t_handle_queries() {
        // Two triangles sharing the diagonal of a square.
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
        assert!(mesh.vertices().all(|v| v.is_boundary(&mesh)));
        assert!(mesh.edges().all(|e| e.is_valid(&mesh)));
        assert!(!EH::from(5).is_valid(&mesh));
        for f in mesh.faces() {
            assert!(f.is_valid(&mesh));
            assert_eq!(f.valence(&mesh), 3);
        }
        assert!(!FH::from(2).is_valid(&mesh));
        let diagonal = mesh
            .find_halfedge(0.into(), 2.into())
            .expect("Cannot find halfedge")
            .edge();
        assert!(!diagonal.is_boundary(&mesh));
        let oct = Mesh::octahedron(1.0).expect("Cannot create octahedron");
        assert!(oct.vertices().all(|v| !v.is_boundary(&oct)));
    }

    #[test]
    fn t_handle_display() {
        let v: VH = 3.into();
        let h: HH = 12.into();
        assert_eq!(format!("{}", v), "VH(3)");
        assert_eq!(format!("{:?}", h), "HH(12)");
    }
}
