use crate::error::ImportErrors;
use crate::loader::Loader;
use crate::mesh::PolyData;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use std::fs::File;
use std::io::BufReader;

/// Loader for Stanford PLY files, ASCII or binary
///
/// Reads the `vertex` element's `x`/`y`/`z` properties and the `face`
/// element's vertex index list. A file without faces yields an empty
/// connectivity stream.
pub struct PLYLoader {}

impl Loader for PLYLoader {
    fn load(&self, filepath: &str) -> Result<PolyData, ImportErrors> {
        let file = File::open(filepath).map_err(|err| ImportErrors::IoFailure {
            filepath: filepath.to_string(),
            message: err.to_string(),
        })?;
        let mut reader = BufReader::new(file);

        let parser = Parser::<DefaultElement>::new();
        let ply = parser
            .read_ply(&mut reader)
            .map_err(|_| ImportErrors::FileNotLoaded {
                filepath: filepath.to_string(),
            })?;

        let mut points = Vec::new();
        if let Some(vertices) = ply.payload.get("vertex") {
            for vertex in vertices {
                for axis in ["x", "y", "z"] {
                    points.push(coordinate(vertex.get(axis)).ok_or_else(|| {
                        ImportErrors::FileNotLoaded {
                            filepath: filepath.to_string(),
                        }
                    })?);
                }
            }
        }

        let mut polys = Vec::new();
        if let Some(faces) = ply.payload.get("face") {
            for face in faces {
                let list = face
                    .get("vertex_indices")
                    .or_else(|| face.get("vertex_index"))
                    .and_then(index_list)
                    .ok_or_else(|| ImportErrors::FileNotLoaded {
                        filepath: filepath.to_string(),
                    })?;
                polys.push(list.len() as i64);
                polys.extend(list);
            }
        }

        Ok(PolyData {
            points,
            components: 3,
            polys,
        })
    }
}

fn coordinate(property: Option<&Property>) -> Option<f64> {
    match property? {
        Property::Float(value) => Some(f64::from(*value)),
        Property::Double(value) => Some(*value),
        _ => None,
    }
}

///Widen whichever integer list representation the header declared to i64
fn index_list(property: &Property) -> Option<Vec<i64>> {
    match property {
        Property::ListChar(values) => Some(values.iter().map(|v| i64::from(*v)).collect()),
        Property::ListUChar(values) => Some(values.iter().map(|v| i64::from(*v)).collect()),
        Property::ListShort(values) => Some(values.iter().map(|v| i64::from(*v)).collect()),
        Property::ListUShort(values) => Some(values.iter().map(|v| i64::from(*v)).collect()),
        Property::ListInt(values) => Some(values.iter().map(|v| i64::from(*v)).collect()),
        Property::ListUInt(values) => Some(values.iter().map(|v| i64::from(*v)).collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(contents: &str) -> Result<PolyData, ImportErrors> {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("model.ply");
        std::fs::write(&filepath, contents).unwrap();
        PLYLoader {}.load(filepath.to_str().unwrap())
    }

    #[test]
    fn an_ascii_ply_is_read() {
        let data = load_str(
            "ply\nformat ascii 1.0\n\
             element vertex 3\n\
             property float x\nproperty float y\nproperty float z\n\
             element face 1\n\
             property list uchar int vertex_indices\n\
             end_header\n\
             0 0 0\n1 0 0\n0 1 0\n\
             3 0 1 2\n",
        )
        .unwrap();

        assert_eq!(data.points, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(data.polys, vec![3, 0, 1, 2]);
    }

    #[test]
    fn double_coordinates_and_uint_indices_are_accepted() {
        let data = load_str(
            "ply\nformat ascii 1.0\n\
             element vertex 3\n\
             property double x\nproperty double y\nproperty double z\n\
             element face 1\n\
             property list uchar uint vertex_indices\n\
             end_header\n\
             0 0 0\n1 0 0\n0 1 0\n\
             3 0 1 2\n",
        )
        .unwrap();

        assert_eq!(data.polys, vec![3, 0, 1, 2]);
    }

    #[test]
    fn a_point_cloud_has_no_faces() {
        let data = load_str(
            "ply\nformat ascii 1.0\n\
             element vertex 2\n\
             property float x\nproperty float y\nproperty float z\n\
             end_header\n\
             0 0 0\n1 1 1\n",
        )
        .unwrap();

        assert_eq!(data.points.len(), 6);
        assert!(data.polys.is_empty());
    }

    #[test]
    fn missing_coordinates_are_not_loaded() {
        let result = load_str(
            "ply\nformat ascii 1.0\n\
             element vertex 1\n\
             property float x\nproperty float y\n\
             end_header\n\
             0 0\n",
        );

        assert!(matches!(result, Err(ImportErrors::FileNotLoaded { .. })));
    }
}
