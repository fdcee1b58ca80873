use std::path::Path;

use crate::{builder::MeshBuilder, element::VH, error::Error, mesh::Mesh};
use tracing::debug;

impl Mesh {
    /// Load a mesh from a Wavefront OBJ file. All models in the file are
    /// merged into one mesh. Only the vertex positions and the faces are
    /// read.
    pub fn load_obj(path: &Path) -> Result<Self, Error> {
        let options = tobj::LoadOptions::default();
        let (models, _) =
            tobj::load_obj(path, &options).map_err(|e| Error::ObjLoadFailed(format!("{}", e)))?;
        let (nverts, nfaces) = models
            .iter()
            .fold((0usize, 0usize), |(nverts, nfaces), model| {
                let msh = &model.mesh;
                let nf = if msh.face_arities.is_empty() {
                    msh.indices.len() / 3
                } else {
                    msh.face_arities.len()
                };
                (nverts + (msh.positions.len() / 3), nfaces + nf)
            });
        let mut outmesh = Mesh::new();
        let mut builder = MeshBuilder::with_capacity(&mut outmesh, nverts, nfaces)?;
        let mut voffset = 0u32;
        let mut fvs: Vec<VH> = Vec::new();
        for model in models {
            let mesh = model.mesh;
            if mesh.positions.len() % 3 != 0 {
                return Err(Error::IncorrectNumberOfCoordinates(mesh.positions.len()));
            }
            for triplet in mesh.positions.chunks(3) {
                builder.add_vertex(glam::vec3(
                    triplet[0] as f32,
                    triplet[1] as f32,
                    triplet[2] as f32,
                ));
            }
            // The arities are omitted when every face is a triangle.
            let arities: Vec<usize> = if mesh.face_arities.is_empty() {
                vec![3; mesh.indices.len() / 3]
            } else {
                mesh.face_arities.iter().map(|a| *a as usize).collect()
            };
            let mut start = 0usize;
            for size in arities {
                let indices = mesh
                    .indices
                    .get(start..(start + size))
                    .ok_or_else(|| {
                        Error::ObjLoadFailed(format!(
                            "Face indices of model '{}' are truncated",
                            model.name
                        ))
                    })?;
                start += size;
                fvs.clear();
                fvs.extend(indices.iter().map(|i| -> VH { (i + voffset).into() }));
                builder.insert_face(&fvs)?;
            }
            voffset += (mesh.positions.len() / 3) as u32;
        }
        builder.finalize()?;
        debug!(
            path = %path.display(),
            vertices = outmesh.num_vertices(),
            faces = outmesh.num_faces(),
            "Loaded obj"
        );
        Ok(outmesh)
    }
}
