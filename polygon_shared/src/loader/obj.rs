use crate::error::ImportErrors;
use crate::loader::Loader;
use crate::mesh::PolyData;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Loader for Wavefront OBJ files
///
/// Reads `v` and `f` records. Face references may carry texture and normal
/// parts (`7/2/3`) and may be negative, counting back from the vertices read
/// so far. Faces keep their native vertex count, a non triangular face fails
/// the mesh extraction.
pub struct OBJLoader {}

impl Loader for OBJLoader {
    fn load(&self, filepath: &str) -> Result<PolyData, ImportErrors> {
        let file = File::open(filepath).map_err(|err| ImportErrors::IoFailure {
            filepath: filepath.to_string(),
            message: err.to_string(),
        })?;
        let reader = BufReader::new(file);

        let mut points: Vec<f64> = Vec::new();
        let mut polys: Vec<i64> = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(|err| ImportErrors::IoFailure {
                filepath: filepath.to_string(),
                message: err.to_string(),
            })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("v") => {
                    // v x y z with an optional weight, only the coordinates are kept
                    let mut row = [0.0f64; 3];
                    for coord in &mut row {
                        *coord = tokens
                            .next()
                            .and_then(|token| token.parse().ok())
                            .ok_or_else(|| ImportErrors::FileNotLoaded {
                                filepath: filepath.to_string(),
                            })?;
                    }
                    points.extend(row);
                }
                Some("f") => {
                    let record_start = polys.len();
                    polys.push(0);
                    let mut count: i64 = 0;
                    for reference in tokens {
                        let index = parse_face_reference(reference, points.len() / 3)
                            .ok_or_else(|| ImportErrors::FileNotLoaded {
                                filepath: filepath.to_string(),
                            })?;
                        polys.push(index);
                        count += 1;
                    }
                    polys[record_start] = count;
                }
                _ => {}
            }
        }

        Ok(PolyData {
            points,
            components: 3,
            polys,
        })
    }
}

///Parse the vertex part of a face reference (`7`, `7/2`, `7//3`) into a zero
///based index, resolving negative references against the vertices read so far
fn parse_face_reference(token: &str, loaded_points: usize) -> Option<i64> {
    let vertex = token.split('/').next()?;
    let index: i64 = vertex.parse().ok()?;

    if index > 0 {
        Some(index - 1)
    } else if index < 0 {
        Some(loaded_points as i64 + index)
    } else {
        // zero is not a valid OBJ index
        None
    }
}
