use crate::element::{EH, FH, HH, VH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Subdivision preconditions.
    #[error("The source mesh has no faces")]
    EmptyMesh,
    #[error("The destination mesh must be empty")]
    DestinationNotEmpty,
    #[error("{0} has {1} vertices, only triangles can be subdivided")]
    NonTriangularFace(FH, usize),
    /// The stencil of the edge reaches a boundary. Only closed meshes can be
    /// subdivided.
    #[error("The stencil around {0} runs into the boundary of the mesh")]
    BoundaryEdge(EH),
    #[error("Tension weight must be finite, found {0}")]
    InvalidTension(f32),
    // Construction.
    #[error("{0} does not belong to the mesh")]
    InvalidVertex(VH),
    #[error("{0} does not belong to the mesh")]
    InvalidHalfedge(HH),
    #[error("Face uses {0} more than once")]
    DegenerateFace(VH),
    /// The directed edge from the first vertex to the second is used by more
    /// than one face. The faces are either wound inconsistently, or the edge
    /// is non-manifold.
    #[error("Halfedge from {0} to {1} is used by more than one face")]
    ComplexHalfedge(VH, VH),
    #[error("{0} is non-manifold")]
    ComplexVertex(VH),
    // Topology checks.
    #[error("{0} is not linked correctly with its neighbors")]
    InvalidHalfedgeLink(HH),
    #[error("{0} starts and ends at the same vertex")]
    DegenerateHalfedge(HH),
    #[error("Loop through {0} is broken")]
    InvalidLoopTopology(HH),
    #[error("{0} does not belong to the same face as its loop")]
    InconsistentFaceInLoop(HH),
    #[error("{0} points to {1}, which does not point back")]
    InvalidFaceHalfedgeLink(FH, HH),
    #[error("Outgoing halfedges of {0} are broken")]
    InvalidOutgoingHalfedges(VH),
    #[error("{0} is on the boundary but its outgoing halfedge is not")]
    OutgoingHalfedgeNotBoundary(VH),
    // Obj.
    #[error("Failed to load obj file: {0}")]
    ObjLoadFailed(String),
    #[error("Expected a multiple of 3 coordinates, found {0}")]
    IncorrectNumberOfCoordinates(usize),
}
