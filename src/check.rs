use crate::{
    element::Handle,
    error::Error,
    iterator,
    mesh::Mesh,
    subdiv::check_for_triangles,
    topol::Topology,
};

fn check_vertices(mesh: &Topology, hvisited: &mut [bool]) -> Result<(), Error> {
    hvisited.fill(false);
    for v in mesh.vertices() {
        if let Some(h) = v.halfedge(mesh) {
            if !h.is_valid(mesh) {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
            // The outgoing halfedge must be a boundary halfedge, or none of the
            // halfedges are boundary.
            if !h.is_boundary(mesh)
                && iterator::voh_ccw_iter(mesh, v).any(|h| h.is_boundary(mesh))
            {
                return Err(Error::OutgoingHalfedgeNotBoundary(v));
            }
            // Outgoing halfedge must point back to this vertex.
            if h.tail(mesh) != v {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
        }
        // Check ccw iterator.
        for h in iterator::voh_ccw_iter(mesh, v) {
            if std::mem::replace(&mut hvisited[h.index() as usize], true) {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
        }
        // Check cw iterator.
        for h in iterator::voh_cw_iter(mesh, v) {
            if !std::mem::replace(&mut hvisited[h.index() as usize], false) {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
        }
        // Mark again, to make sure every halfedge is reached from its tail.
        for h in iterator::voh_ccw_iter(mesh, v) {
            hvisited[h.index() as usize] = true;
        }
    }
    // A halfedge that was not reached belongs to a second fan around its
    // tail, i.e. the tail is non-manifold.
    if let Some(h) = mesh.halfedges().find(|h| !hvisited[h.index() as usize]) {
        return Err(Error::InvalidOutgoingHalfedges(h.tail(mesh)));
    }
    Ok(())
}

fn check_edges(mesh: &Topology, hflags: &mut [bool]) -> Result<(), Error> {
    hflags.fill(false);
    for h in mesh.halfedges() {
        // Check if degenerate.
        if h.tail(mesh) == h.head(mesh) {
            return Err(Error::DegenerateHalfedge(h));
        }
        let hedge = mesh.halfedge(h);
        if !hedge.next.is_valid(mesh) || !hedge.prev.is_valid(mesh) {
            return Err(Error::InvalidHalfedgeLink(h));
        }
        // Check connctivity.
        if hedge.prev.next(mesh) != h
            || hedge.next.prev(mesh) != h
            || h.head(mesh) != hedge.next.tail(mesh)
            || h.tail(mesh) != hedge.prev.head(mesh)
            || h.opposite().opposite() != h
        {
            return Err(Error::InvalidHalfedgeLink(h));
        }
        // Halfedge must be found in the circulators around head and tail.
        if !iterator::voh_ccw_iter(mesh, h.tail(mesh)).any(|hh| hh == h)
            || !iterator::vih_ccw_iter(mesh, h.head(mesh)).any(|hh| hh == h)
        {
            return Err(Error::InvalidHalfedgeLink(h));
        }
    }
    // Check all loops, going forward.
    for h in mesh.halfedges() {
        if hflags[h.index() as usize] {
            continue;
        }
        let f = h.face(mesh);
        for h in iterator::loop_ccw_iter(mesh, h) {
            if std::mem::replace(&mut hflags[h.index() as usize], true) {
                return Err(Error::InvalidLoopTopology(h));
            }
            if h.face(mesh) != f {
                return Err(Error::InconsistentFaceInLoop(h));
            }
        }
    }
    // And backward.
    for h in mesh.halfedges() {
        if !hflags[h.index() as usize] {
            continue;
        }
        let f = h.face(mesh);
        for h in iterator::loop_cw_iter(mesh, h) {
            if !std::mem::replace(&mut hflags[h.index() as usize], false) {
                return Err(Error::InvalidLoopTopology(h));
            }
            if h.face(mesh) != f {
                return Err(Error::InconsistentFaceInLoop(h));
            }
        }
    }
    debug_assert!(hflags.iter().all(|f| !f));
    Ok(())
}

fn check_faces(mesh: &Topology) -> Result<(), Error> {
    for f in mesh.faces() {
        let h = f.halfedge(mesh);
        if !h.is_valid(mesh) || h.face(mesh) != Some(f) {
            return Err(Error::InvalidFaceHalfedgeLink(f, h));
        }
    }
    Ok(())
}

impl Topology {
    pub fn check(&self) -> Result<(), Error> {
        // To keep track of visited halfedges.
        let mut hvisited = vec![false; self.num_halfedges()].into_boxed_slice();
        check_vertices(self, &mut hvisited)?;
        check_edges(self, &mut hvisited)?;
        check_faces(self)?;
        Ok(())
    }
}

impl Mesh {
    /// Check the topology of the mesh.
    ///
    /// This function will return an error if any errors are found in the topolgy.
    pub fn check_topology(&self) -> Result<(), Error> {
        self.topol.check()
    }
}

/// Validate a mesh produced by subdivision: the halfedge topology must be
/// sound and every face must be a triangle.
pub fn check_mesh_invariants(mesh: &Mesh) -> Result<(), Error> {
    mesh.check_topology()?;
    check_for_triangles(mesh)
}
