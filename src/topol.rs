use crate::{
    element::{Edge, Face, Halfedge, Handle, Vertex, EH, FH, HH, VH},
    error::Error,
    iterator,
};
use hashbrown::HashMap;

/// Halfedge connectivity of a mesh. Vertices, edges and faces live in flat
/// arrays and refer to each other by handles. The two halfedges of an edge
/// are stored together, so the halfedge `2i` and `2i + 1` are opposites of
/// each other and belong to edge `i`.
#[derive(Clone, Default)]
pub struct Topology {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl Topology {
    pub fn new() -> Self {
        Topology {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn with_capacity(nverts: usize, nedges: usize, nfaces: usize) -> Self {
        Topology {
            vertices: Vec::with_capacity(nverts),
            edges: Vec::with_capacity(nedges),
            faces: Vec::with_capacity(nfaces),
        }
    }

    fn vertex(&self, v: VH) -> &Vertex {
        &self.vertices[v.index() as usize]
    }

    pub(crate) fn halfedge(&self, h: HH) -> &Halfedge {
        &self.edges[(h.index() >> 1) as usize].halfedges[(h.index() & 1) as usize]
    }

    fn halfedge_mut(&mut self, h: HH) -> &mut Halfedge {
        &mut self.edges[(h.index() >> 1) as usize].halfedges[(h.index() & 1) as usize]
    }

    pub fn vertex_halfedge(&self, v: VH) -> Option<HH> {
        self.vertex(v).halfedge
    }

    pub fn head_vertex(&self, h: HH) -> VH {
        self.halfedge(h).vertex
    }

    pub fn tail_vertex(&self, h: HH) -> VH {
        self.halfedge(h.opposite()).vertex
    }

    pub fn prev_halfedge(&self, h: HH) -> HH {
        self.halfedge(h).prev
    }

    pub fn next_halfedge(&self, h: HH) -> HH {
        self.halfedge(h).next
    }

    pub fn halfedge_face(&self, h: HH) -> Option<FH> {
        self.halfedge(h).face
    }

    pub fn face_halfedge(&self, f: FH) -> HH {
        self.faces[f.index() as usize].halfedge
    }

    pub fn is_valid_vertex(&self, v: VH) -> bool {
        (v.index() as usize) < self.num_vertices()
    }

    pub fn is_valid_halfedge(&self, h: HH) -> bool {
        (h.index() as usize) < self.num_halfedges()
    }

    pub fn is_valid_edge(&self, e: EH) -> bool {
        (e.index() as usize) < self.num_edges()
    }

    pub fn is_valid_face(&self, f: FH) -> bool {
        (f.index() as usize) < self.num_faces()
    }

    pub fn is_boundary_halfedge(&self, h: HH) -> bool {
        self.halfedge(h).face.is_none()
    }

    pub fn is_boundary_vertex(&self, v: VH) -> bool {
        match self.vertex(v).halfedge {
            Some(h) => self.is_boundary_halfedge(h),
            None => true,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_halfedges(&self) -> usize {
        self.num_edges() * 2
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VH> + use<> {
        (0..(self.num_vertices() as u32)).map(|i| i.into())
    }

    pub fn halfedges(&self) -> impl Iterator<Item = HH> + use<> {
        (0..(self.num_halfedges() as u32)).map(|i| i.into())
    }

    pub fn edges(&self) -> impl Iterator<Item = EH> + use<> {
        (0..(self.num_edges() as u32)).map(|i| i.into())
    }

    pub fn faces(&self) -> impl Iterator<Item = FH> + use<> {
        (0..(self.num_faces() as u32)).map(|i| i.into())
    }

    pub fn find_halfedge(&self, from: VH, to: VH) -> Option<HH> {
        iterator::voh_ccw_iter(self, from).find(|h| self.head_vertex(*h) == to)
    }

    pub fn vertex_valence(&self, v: VH) -> usize {
        iterator::voh_ccw_iter(self, v).count()
    }

    pub fn face_valence(&self, f: FH) -> usize {
        iterator::fh_ccw_iter(self, f).count()
    }

    /// Create a new edge from `from` to `to`, and return the halfedge pointing
    /// from `from` to `to`. Both halfedges start out as boundary halfedges
    /// linked to themselves.
    fn new_edge(&mut self, from: VH, to: VH) -> HH {
        let ei = self.edges.len() as u32;
        let (h, oh) = EH::from(ei).halfedges();
        self.edges.push(Edge {
            halfedges: [
                Halfedge {
                    face: None,
                    vertex: to,
                    next: h,
                    prev: h,
                },
                Halfedge {
                    face: None,
                    vertex: from,
                    next: oh,
                    prev: oh,
                },
            ],
        });
        h
    }

    fn link_halfedges(&mut self, hprev: HH, hnext: HH) {
        self.halfedge_mut(hprev).next = hnext;
        self.halfedge_mut(hnext).prev = hprev;
    }

    /// Build the topology of a mesh with `nverts` vertices and the faces
    /// described by `arities` and the flat array of face vertices
    /// `indices`. Face `i` uses the next `arities[i]` vertices in `indices`.
    ///
    /// Interior halfedges are paired up by looking up the reverse of every
    /// directed edge, and whatever remains unpaired is stitched into boundary
    /// loops. Faces must be consistently oriented and every edge must be
    /// shared by at most two faces.
    pub(crate) fn from_faces(
        nverts: usize,
        indices: &[VH],
        arities: &[usize],
    ) -> Result<Self, Error> {
        let mut topol = Topology::with_capacity(nverts, indices.len() / 2 + 1, arities.len());
        topol.vertices.resize(nverts, Vertex { halfedge: None });
        let mut lookup: HashMap<(VH, VH), HH> = HashMap::with_capacity(indices.len());
        let mut hloop: Vec<HH> = Vec::new();
        let mut start = 0usize;
        for (fi, &arity) in arities.iter().enumerate() {
            let verts = &indices[start..(start + arity)];
            start += arity;
            hloop.clear();
            for (i, &from) in verts.iter().enumerate() {
                if !topol.is_valid_vertex(from) {
                    return Err(Error::InvalidVertex(from));
                }
                let to = verts[(i + 1) % arity];
                if from == to {
                    return Err(Error::DegenerateFace(from));
                }
                if lookup.contains_key(&(from, to)) {
                    return Err(Error::ComplexHalfedge(from, to));
                }
                let h = match lookup.get(&(to, from)) {
                    Some(oh) => oh.opposite(),
                    None => topol.new_edge(from, to),
                };
                lookup.insert((from, to), h);
                hloop.push(h);
            }
            let f: FH = (fi as u32).into();
            for (i, &h) in hloop.iter().enumerate() {
                topol.halfedge_mut(h).face = Some(f);
                topol.link_halfedges(h, hloop[(i + 1) % arity]);
            }
            topol.faces.push(Face { halfedge: hloop[0] });
        }
        // Every vertex can have at most one outgoing boundary halfedge,
        // otherwise it is non-manifold.
        let mut boundary_out: Vec<Option<HH>> = vec![None; nverts];
        for h in topol.halfedges() {
            if topol.is_boundary_halfedge(h) {
                let v = topol.tail_vertex(h);
                if boundary_out[v.index() as usize].replace(h).is_some() {
                    return Err(Error::ComplexVertex(v));
                }
            }
        }
        for h in topol.halfedges() {
            if topol.is_boundary_halfedge(h) {
                let v = topol.head_vertex(h);
                let next = boundary_out[v.index() as usize].ok_or(Error::ComplexVertex(v))?;
                topol.link_halfedges(h, next);
            }
        }
        // Boundary vertices must point to their boundary halfedge.
        for h in topol.halfedges() {
            let v = topol.tail_vertex(h);
            let vertex = &mut topol.vertices[v.index() as usize];
            if vertex.halfedge.is_none() {
                vertex.halfedge = Some(h);
            }
        }
        for (vertex, h) in topol.vertices.iter_mut().zip(boundary_out.iter()) {
            if let Some(h) = h {
                vertex.halfedge = Some(*h);
            }
        }
        Ok(topol)
    }
}

#[cfg(test)]
mod test {
    use super::Topology;
    use crate::{
        element::{Handle, VH},
        error::Error,
        iterator,
    };
    use arrayvec::ArrayVec;

    fn build(nverts: usize, faces: &[&[u32]]) -> Result<Topology, Error> {
        let indices: Vec<VH> = faces
            .iter()
            .flat_map(|f| f.iter().map(|i| i.into()))
            .collect();
        let arities: Vec<_> = faces.iter().map(|f| f.len()).collect();
        Topology::from_faces(nverts, &indices, &arities)
    }

    /**
     * Makes a box with the following topology.
     * ```text
     *
     *      7-----------6
     *     /|          /|
     *    / |         / |
     *   4-----------5  |
     *   |  |        |  |
     *   |  3--------|--2
     *   | /         | /
     *   |/          |/
     *   0-----------1
     * ```
     */
    fn quad_box() -> Topology {
        let topol = build(
            8,
            &[
                &[0, 3, 2, 1],
                &[0, 1, 5, 4],
                &[1, 2, 6, 5],
                &[2, 3, 7, 6],
                &[3, 0, 4, 7],
                &[4, 5, 6, 7],
            ],
        )
        .expect("Unable to build a box");
        assert_eq!(topol.num_vertices(), 8);
        assert_eq!(topol.num_halfedges(), 24);
        assert_eq!(topol.num_edges(), 12);
        assert_eq!(topol.num_faces(), 6);
        topol
    }

    #[test]
    fn t_triangle() {
        let topol = build(3, &[&[0, 1, 2]]).expect("Cannot build a triangle");
        assert_eq!(topol.num_faces(), 1);
        assert_eq!(topol.num_edges(), 3);
        assert_eq!(topol.num_halfedges(), 6);
        assert_eq!(topol.num_vertices(), 3);
        for v in topol.vertices() {
            let h = topol
                .vertex_halfedge(v)
                .expect("Vertex must have an incident halfedge");
            assert!(topol.is_boundary_halfedge(h));
            let oh = h.opposite();
            assert!(!topol.is_boundary_halfedge(oh));
            assert_eq!(
                topol
                    .halfedge_face(oh)
                    .expect("Halfedge must have an incident face"),
                0.into()
            );
        }
        assert_eq!(
            topol
                .halfedges()
                .filter(|h| topol.is_boundary_halfedge(*h))
                .count(),
            3
        );
        for (i, j) in (0u32..3).map(|i| (i, (i + 1) % 3)) {
            let h = topol
                .find_halfedge(i.into(), j.into())
                .expect("Cannot find halfedge");
            assert!(!topol.is_boundary_halfedge(h));
        }
        // The boundary loop runs the other way.
        let h = topol
            .find_halfedge(1.into(), 0.into())
            .expect("Cannot find halfedge");
        assert!(topol.is_boundary_halfedge(h));
        assert_eq!(topol.head_vertex(topol.next_halfedge(h)), 2.into());
        assert_eq!(topol.tail_vertex(topol.prev_halfedge(h)), 2.into());
    }

    #[test]
    fn t_face_halfedge_starts_at_first_vertex() {
        let topol = build(4, &[&[2, 0, 3], &[0, 2, 1]]).expect("Cannot build mesh");
        for (f, first, second) in [(0u32, 2u32, 0u32), (1, 0, 2)] {
            let h = topol.face_halfedge(f.into());
            assert_eq!(topol.tail_vertex(h), first.into());
            assert_eq!(topol.head_vertex(h), second.into());
        }
    }

    #[test]
    fn t_two_triangles() {
        let topol = build(4, &[&[0, 1, 2], &[0, 2, 3]]).expect("Cannot build mesh");
        assert_eq!(topol.num_vertices(), 4);
        assert_eq!(topol.num_halfedges(), 10);
        assert_eq!(topol.num_edges(), 5);
        assert_eq!(topol.num_faces(), 2);
        let boundary = topol
            .edges()
            .filter(|e| {
                let (h, oh) = e.halfedges();
                topol.is_boundary_halfedge(h) || topol.is_boundary_halfedge(oh)
            })
            .count();
        assert_eq!(boundary, 4);
        topol.check().expect("Topological errors found");
    }

    #[test]
    fn t_box_manifold() {
        let qbox = quad_box();
        assert!(
            qbox.halfedges().all(|h| !qbox.is_boundary_halfedge(h)),
            "Not expecting any boundary edges"
        );
        qbox.check().expect("Topological errors found");
    }

    #[test]
    fn t_box_valences() {
        let qbox = quad_box();
        for v in qbox.vertices() {
            assert_eq!(qbox.vertex_valence(v), 3);
        }
        for f in qbox.faces() {
            assert_eq!(qbox.face_valence(f), 4);
        }
    }

    #[test]
    fn t_box_vertex_neighbors() {
        let qbox = quad_box();
        let mut nbs = iterator::vv_ccw_iter(&qbox, 0.into())
            .map(|v| v.index())
            .collect::<ArrayVec<u32, 3>>();
        nbs.sort();
        assert_eq!(nbs.as_slice(), &[1, 3, 4]);
    }

    #[test]
    fn t_inconsistent_winding() {
        match build(4, &[&[0, 1, 2], &[0, 1, 3]]) {
            Err(Error::ComplexHalfedge(a, b)) => {
                assert_eq!((a.index(), b.index()), (0, 1));
            }
            _ => panic!("Expected the inconsistent winding to be rejected"),
        }
    }

    #[test]
    fn t_non_manifold_edge() {
        assert!(matches!(
            build(5, &[&[0, 1, 2], &[1, 0, 3], &[1, 0, 4]]),
            Err(Error::ComplexHalfedge(_, _))
        ));
    }

    #[test]
    fn t_bowtie_vertex() {
        assert!(matches!(
            build(5, &[&[0, 1, 2], &[0, 3, 4]]),
            Err(Error::ComplexVertex(v)) if v.index() == 0
        ));
    }

    #[test]
    fn t_degenerate_face() {
        assert!(matches!(
            build(3, &[&[0, 1, 1]]),
            Err(Error::DegenerateFace(_))
        ));
        assert!(matches!(
            build(3, &[&[0, 1, 5]]),
            Err(Error::InvalidVertex(v)) if v.index() == 5
        ));
    }
}
