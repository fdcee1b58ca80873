use super::check_for_triangles;
use crate::{
    builder::MeshBuilder,
    check::check_mesh_invariants,
    element::{HH, VH},
    error::Error,
    mesh::Mesh,
    params::ButterflyParams,
};
use glam::{DVec3, Vec3};
use tracing::{debug, trace};

/// Position of the refined vertex derived from the coarse vertex `v`. The
/// modified Butterfly scheme is interpolating, so this is the position of `v`
/// itself.
pub fn vertex_rule(mesh: &Mesh, v: VH) -> Result<Vec3, Error> {
    mesh.point(v)
}

/// The eight vertices of the Butterfly stencil around the halfedge `h`.
///
/// In order, these are: the tail and head of `h`; the apex of the face of
/// `h` and the apex of the face on the other side; and the four vertices
/// across the remaining edges of those two faces, i.e. the far vertices of
/// the faces adjacent to `h.next`, `h.prev`, `h.opposite.prev` and
/// `h.opposite.next`.
///
/// ```text
///            5-------2-------4
///             \     / \     /
///              \   /   \   /
///               \ /  h  \ /
///                0------>1
///               / \     / \
///              /   \   /   \
///             /     \ /     \
///            7-------3-------6
/// ```
///
/// Every halfedge walked to reach these vertices must have a face, otherwise
/// [`Error::BoundaryEdge`] is returned.
pub fn butterfly_stencil(mesh: &Mesh, h: HH) -> Result<[VH; 8], Error> {
    if !h.is_valid(mesh) {
        return Err(Error::InvalidHalfedge(h));
    }
    let oh = h.opposite();
    let (hn, hp) = (h.next(mesh), h.prev(mesh));
    let (ohn, ohp) = (oh.next(mesh), oh.prev(mesh));
    let wings = [
        hn.opposite(),
        hp.opposite(),
        ohp.opposite(),
        ohn.opposite(),
    ];
    if h.is_boundary(mesh)
        || oh.is_boundary(mesh)
        || wings.iter().any(|w| w.is_boundary(mesh))
    {
        return Err(Error::BoundaryEdge(h.edge()));
    }
    let [w0, w1, w2, w3] = wings.map(|w| w.prev(mesh).tail(mesh));
    Ok([
        h.tail(mesh),
        h.head(mesh),
        hn.head(mesh),
        ohn.head(mesh),
        w0,
        w1,
        w2,
        w3,
    ])
}

/// Weights of the vertices returned by [`butterfly_stencil`], for the
/// tension `w`. These always sum to one.
pub const fn stencil_weights(w: f32) -> [f32; 8] {
    [0.5, 0.5, 2.0 * w, 2.0 * w, -w, -w, -w, -w]
}

/// Position of the refined vertex inserted on the edge of `h`, for the
/// tension `w`. The weighted sum is accumulated in double precision.
pub fn edge_rule(mesh: &Mesh, h: HH, w: f32) -> Result<Vec3, Error> {
    let stencil = butterfly_stencil(mesh, h)?;
    let weights = stencil_weights(w);
    let mut sum = DVec3::ZERO;
    for (v, weight) in stencil.iter().zip(weights.iter()) {
        sum += mesh.point(*v)?.as_dvec3() * (*weight as f64);
    }
    Ok(sum.as_vec3())
}

/// Subdivide the closed triangle mesh `src` once with the modified Butterfly
/// scheme, and write the result into the empty mesh `dst`.
///
/// Every triangle is split into four. The vertices of `src` keep their
/// positions, and every edge of `src` gets one new vertex computed by
/// [`edge_rule`]. Each new vertex is computed exactly once, no matter how
/// many faces share it. The faces of `dst` are ordered by the face of `src`
/// they came from, four per source face.
///
/// If this function fails, `dst` is left empty.
pub fn butterfly_subdivision(src: &Mesh, w: f32, dst: &mut Mesh) -> Result<(), Error> {
    if src.num_faces() == 0 {
        return Err(Error::EmptyMesh);
    }
    if !w.is_finite() {
        return Err(Error::InvalidTension(w));
    }
    check_for_triangles(src)?;
    let (nv, ne, nf) = (src.num_vertices(), src.num_edges(), src.num_faces());
    debug!(
        vertices = nv,
        edges = ne,
        faces = nf,
        tension = w,
        "Butterfly subdivision"
    );
    let mut builder = MeshBuilder::with_capacity(dst, nv + ne, nf * 4)?;
    for f in src.faces() {
        let h = f.halfedge(src);
        let hloop = [h, h.next(src), h.prev(src)];
        let mut corners = [VH::from(0); 3];
        let mut mids = [VH::from(0); 3];
        for (i, &h) in hloop.iter().enumerate() {
            let v = h.tail(src);
            corners[i] = match builder.find_dst_vertex_of(v) {
                Some(dv) => dv,
                None => {
                    let pos = vertex_rule(src, v)?;
                    builder.insert_vertex(pos, v)
                }
            };
            mids[i] = match builder.find_dst_vertex_of(h) {
                Some(dv) => dv,
                None => {
                    let pos = edge_rule(src, h, w)?;
                    trace!(edge = %h.edge(), position = ?pos, "Edge point");
                    builder.insert_vertex(pos, h)
                }
            };
        }
        let [a0, a1, a2] = corners;
        let [m0, m1, m2] = mids;
        builder.insert_triangle(a0, m0, m2)?;
        builder.insert_triangle(m0, a1, m1)?;
        builder.insert_triangle(m2, m1, a2)?;
        builder.insert_triangle(m0, m1, m2)?;
    }
    builder.finalize()?;
    if let Err(e) = check_mesh_invariants(dst) {
        *dst = Mesh::new();
        return Err(e);
    }
    debug!(
        vertices = dst.num_vertices(),
        edges = dst.num_edges(),
        faces = dst.num_faces(),
        "Butterfly subdivision done"
    );
    Ok(())
}

impl Mesh {
    /// Subdivide this mesh with the modified Butterfly scheme, as many times
    /// as `params.iterations`, and return the refined mesh. Zero iterations
    /// returns a copy of this mesh.
    ///
    /// ```rust
    /// use butterfly::{ButterflyParams, Mesh};
    ///
    /// let mesh = Mesh::icosahedron(1.0).expect("Cannot create icosahedron");
    /// let params = ButterflyParams::default().with_iterations(2);
    /// let refined = mesh.subdivide_butterfly(&params).expect("Subdivision failed");
    /// assert_eq!(
    ///     (refined.num_vertices(), refined.num_edges(), refined.num_faces()),
    ///     params.expected_counts(12, 30, 20)
    /// );
    /// ```
    pub fn subdivide_butterfly(&self, params: &ButterflyParams) -> Result<Mesh, Error> {
        params.validate()?;
        let mut current: Option<Mesh> = None;
        for i in 0..params.iterations {
            let src = current.as_ref().unwrap_or(self);
            let mut dst = Mesh::new();
            butterfly_subdivision(src, params.tension, &mut dst)?;
            debug!(iteration = i + 1, of = params.iterations, "Subdivision pass");
            current = Some(dst);
        }
        Ok(current.unwrap_or_else(|| self.clone()))
    }
}
