/*!
Modified Butterfly subdivision of closed triangle meshes, built on a halfedge
datastructure.

# Overview

+ A halfedge datastructure is used to represent the topology of a mesh, i.e. the
  connectivity of vertices, edges and faces. Elements are referred to by
  integer handles ([`VH`], [`HH`], [`EH`], [`FH`]) that can navigate the mesh
  in constant time, for example `h.next(&mesh).opposite().head(&mesh)`.

+ [`Mesh`] stores the topology along with 32 bit floating point vertex
  positions. Meshes are created with a [`MeshBuilder`], which collects
  vertices and faces and computes the halfedge connectivity once all faces
  are known. The builder can also register each vertex against the element
  of another mesh it was derived from, so shared vertices are only created
  once.

+ [`butterfly_subdivision`] splits every triangle of a closed mesh into four.
  The original vertices keep their positions, and every edge gets a new
  vertex computed from the 8 point Butterfly stencil around it, see
  [`butterfly_stencil`] and [`edge_rule`]. [`Mesh::subdivide_butterfly`]
  repeats this for a number of iterations given by [`ButterflyParams`].

+ With the `obj` feature, which is enabled by default, meshes can be loaded
  from Wavefront OBJ files with [`Mesh::load_obj`].

```rust
use butterfly::{ButterflyParams, Mesh};

let mesh = Mesh::octahedron(1.0).expect("Cannot create octahedron");
let refined = mesh
    .subdivide_butterfly(&ButterflyParams::default())
    .expect("Subdivision failed");
assert_eq!((18, 48, 32), (refined.num_vertices(), refined.num_edges(), refined.num_faces()));
```
*/

mod builder;
mod check;
mod element;
mod error;
mod iterator;
mod macros;
mod mesh;
#[cfg(feature = "obj")]
mod obj;
mod params;
mod primitive;
mod subdiv;
mod topol;

pub use builder::{MeshBuilder, Source};
pub use check::check_mesh_invariants;
pub use element::{EH, FH, HH, Handle, HasTopology, VH};
pub use error::Error;
pub use mesh::Mesh;
pub use params::{ButterflyParams, DEFAULT_TENSION};
pub use subdiv::{butterfly_stencil, butterfly_subdivision, edge_rule, stencil_weights, vertex_rule};
pub use topol::Topology;
