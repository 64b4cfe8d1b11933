use crate::error::ImportErrors;
use crate::loader::Loader;
use crate::mesh::PolyData;
use std::io::BufReader;

/// Loader for STL files, binary or ASCII
pub struct STLLoader {}

impl Loader for STLLoader {
    fn load(&self, filepath: &str) -> Result<PolyData, ImportErrors> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .open(filepath)
            .map_err(|err| ImportErrors::IoFailure {
                filepath: filepath.to_string(),
                message: err.to_string(),
            })?;

        let mut reader = BufReader::new(&file);
        let mesh: nom_stl::IndexMesh = nom_stl::parse_stl(&mut reader)
            .map_err(|_| ImportErrors::FileNotLoaded {
                filepath: filepath.to_string(),
            })?
            .into();

        let mut points = Vec::with_capacity(mesh.vertices().len() * 3);
        for vert in mesh.vertices() {
            points.push(f64::from(vert[0]));
            points.push(f64::from(vert[1]));
            points.push(f64::from(vert[2]));
        }

        let mut polys = Vec::with_capacity(mesh.triangles().len() * 4);
        for triangle in mesh.triangles() {
            let verts = triangle.vertices_indices();
            polys.push(3);
            polys.push(verts[0] as i64);
            polys.push(verts[1] as i64);
            polys.push(verts[2] as i64);
        }

        Ok(PolyData {
            points,
            components: 3,
            polys,
        })
    }
}
