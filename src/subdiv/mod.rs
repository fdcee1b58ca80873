mod butterfly;

pub use butterfly::{
    butterfly_stencil, butterfly_subdivision, edge_rule, stencil_weights, vertex_rule,
};

use crate::{error::Error, mesh::Mesh};

/// Ensure every face of the mesh is a triangle.
pub(crate) fn check_for_triangles(mesh: &Mesh) -> Result<(), Error> {
    match mesh
        .faces()
        .map(|f| (f, mesh.face_valence(f)))
        .find(|(_, n)| *n != 3)
    {
        Some((f, n)) => Err(Error::NonTriangularFace(f, n)),
        None => Ok(()),
    }
}
