use crate::error::ImportErrors;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

///Component counts a polygon file may legally report for its points
const SUPPORTED_COMPONENTS: [usize; 5] = [1, 2, 3, 4, 9];

///A single triangular face, referencing points by index
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexedTriangle {
    ///Indices of the three corner points
    pub verts: [usize; 3],
}

///Canonical surface mesh produced by the importer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Mesh {
    ///Number of components in every point row
    pub dimensions: usize,
    ///Point coordinates, every row `dimensions` values long
    pub points: Vec<Vec<f64>>,
    ///Triangular faces indexing into `points`
    pub triangles: Vec<IndexedTriangle>,
}

///Raw geometry a format reader hands to the canonical extraction
///
///`points` is the flat coordinate stream and `polys` the flat connectivity
///stream of count prefixed records, the native cell layout of the supported
///formats. The handle is consumed immediately by [`PolyData::into_mesh`] and
///never retained.
#[derive(Clone, Debug, PartialEq)]
pub struct PolyData {
    ///Flat point coordinates, `components` values per point
    pub points: Vec<f64>,
    ///Components per point as reported by the reader
    pub components: usize,
    ///Flat connectivity stream of `(count, v0, v1, v2)` records
    pub polys: Vec<i64>,
}

impl PolyData {
    ///Convert raw reader output into the canonical mesh
    ///
    ///Validates that the file produced points at all, that the point layout
    ///is one of the known component counts and that the connectivity holds
    ///only triangle records with in range indices. Either a fully populated
    ///mesh is returned or an error, never a partial result.
    pub fn into_mesh(self, filepath: &str) -> Result<Mesh, ImportErrors> {
        if self.points.is_empty() {
            return Err(ImportErrors::FileNotLoaded {
                filepath: filepath.to_string(),
            });
        }

        if !SUPPORTED_COMPONENTS.contains(&self.components) {
            return Err(ImportErrors::UnsupportedPointLayout {
                components: self.components,
            });
        }

        if self.points.len() % self.components != 0 {
            return Err(ImportErrors::UnsupportedPointLayout {
                components: self.components,
            });
        }

        let points: Vec<Vec<f64>> = self
            .points
            .chunks_exact(self.components)
            .map(<[f64]>::to_vec)
            .collect();

        if self.polys.len() % 4 != 0 {
            return Err(ImportErrors::InvalidTopology {
                filepath: filepath.to_string(),
            });
        }

        let triangles = self
            .polys
            .iter()
            .copied()
            .tuples()
            .map(|(count, v0, v1, v2)| {
                if count != 3 {
                    return Err(ImportErrors::InvalidTopology {
                        filepath: filepath.to_string(),
                    });
                }

                Ok(IndexedTriangle {
                    verts: [
                        point_index(v0, points.len(), filepath)?,
                        point_index(v1, points.len(), filepath)?,
                        point_index(v2, points.len(), filepath)?,
                    ],
                })
            })
            .collect::<Result<Vec<IndexedTriangle>, ImportErrors>>()?;

        Ok(Mesh {
            dimensions: self.components,
            points,
            triangles,
        })
    }
}

fn point_index(value: i64, point_count: usize, filepath: &str) -> Result<usize, ImportErrors> {
    usize::try_from(value)
        .ok()
        .filter(|index| *index < point_count)
        .ok_or_else(|| ImportErrors::InvalidTopology {
            filepath: filepath.to_string(),
        })
}
