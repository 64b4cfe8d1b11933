use crate::error::ImportErrors;
use crate::loader::Loader;
use crate::mesh::PolyData;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};

#[derive(Deserialize, Debug)]
struct VtkFile {
    #[serde(rename = "PolyData")]
    poly_data: VtkPolyData,
}

#[derive(Deserialize, Debug)]
struct VtkPolyData {
    #[serde(rename = "Piece", default)]
    piece: Vec<VtkPiece>,
}

#[derive(Deserialize, Debug)]
struct VtkPiece {
    #[serde(rename = "Points")]
    points: VtkPoints,
    #[serde(rename = "Polys")]
    polys: Option<VtkPolys>,
}

#[derive(Deserialize, Debug)]
struct VtkPoints {
    #[serde(rename = "DataArray")]
    data_array: Vec<VtkDataArray>,
}

#[derive(Deserialize, Debug)]
struct VtkPolys {
    #[serde(rename = "DataArray")]
    data_array: Vec<VtkDataArray>,
}

#[derive(Deserialize, Debug)]
struct VtkDataArray {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "NumberOfComponents", default)]
    number_of_components: Option<usize>,
    #[serde(rename = "format", default)]
    format: Option<String>,
    #[serde(rename = "$value", default)]
    body: Option<String>,
}

/// Loader for VTK polydata files, covering both serializations behind the
/// vtp extension
///
/// The first line of the file decides which reader runs: a leading `<`
/// selects the XML reader, anything else the legacy reader. This sniff is
/// best effort, a file that lies about its first character shows up as a
/// failed load from the selected reader rather than a special case.
pub struct VTPLoader {}

impl Loader for VTPLoader {
    fn load(&self, filepath: &str) -> Result<PolyData, ImportErrors> {
        if is_xml(filepath)? {
            load_xml(filepath)
        } else {
            load_legacy(filepath)
        }
    }
}

///Peek at the first line. The file is closed again before the selected
///reader reopens it.
fn is_xml(filepath: &str) -> Result<bool, ImportErrors> {
    let file = File::open(filepath).map_err(|err| ImportErrors::IoFailure {
        filepath: filepath.to_string(),
        message: err.to_string(),
    })?;

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|err| ImportErrors::IoFailure {
            filepath: filepath.to_string(),
            message: err.to_string(),
        })?;

    Ok(line.trim_start().starts_with('<'))
}

fn load_xml(filepath: &str) -> Result<PolyData, ImportErrors> {
    let file = File::open(filepath).map_err(|err| ImportErrors::IoFailure {
        filepath: filepath.to_string(),
        message: err.to_string(),
    })?;

    let vtk: VtkFile = serde_xml_rs::de::from_reader(BufReader::new(file)).map_err(|_| {
        ImportErrors::FileNotLoaded {
            filepath: filepath.to_string(),
        }
    })?;

    let mut points: Vec<f64> = Vec::new();
    let mut polys: Vec<i64> = Vec::new();
    let mut components = 3;

    for piece in &vtk.poly_data.piece {
        let coordinates =
            piece
                .points
                .data_array
                .first()
                .ok_or_else(|| ImportErrors::FileNotLoaded {
                    filepath: filepath.to_string(),
                })?;
        components = coordinates.number_of_components.unwrap_or(3);
        if components == 0 {
            return Err(ImportErrors::UnsupportedPointLayout { components });
        }

        let piece_start = (points.len() / components) as i64;
        points.extend(ascii_numbers::<f64>(coordinates, filepath)?);

        let arrays = match &piece.polys {
            Some(section) => &section.data_array,
            None => continue,
        };
        let connectivity = named_array(arrays, "connectivity");
        let offsets = named_array(arrays, "offsets");
        if let (Some(connectivity), Some(offsets)) = (connectivity, offsets) {
            let connectivity = ascii_numbers::<i64>(connectivity, filepath)?;
            let offsets = ascii_numbers::<i64>(offsets, filepath)?;

            // offsets are running ends into the connectivity stream, turn
            // them back into count prefixed records
            let mut start = 0usize;
            for offset in offsets {
                let end = usize::try_from(offset)
                    .ok()
                    .filter(|end| *end >= start && *end <= connectivity.len())
                    .ok_or_else(|| ImportErrors::InvalidTopology {
                        filepath: filepath.to_string(),
                    })?;
                polys.push((end - start) as i64);
                polys.extend(connectivity[start..end].iter().map(|index| index + piece_start));
                start = end;
            }
        }
    }

    Ok(PolyData {
        points,
        components,
        polys,
    })
}

fn named_array<'a>(arrays: &'a [VtkDataArray], name: &str) -> Option<&'a VtkDataArray> {
    arrays
        .iter()
        .find(|array| array.name.as_deref() == Some(name))
}

///Parse an ascii format data array body. Binary and appended encodings are
///not readable here and surface as a failed load.
fn ascii_numbers<T: std::str::FromStr>(
    array: &VtkDataArray,
    filepath: &str,
) -> Result<Vec<T>, ImportErrors> {
    if array.format.as_deref() != Some("ascii") {
        return Err(ImportErrors::FileNotLoaded {
            filepath: filepath.to_string(),
        });
    }

    array
        .body
        .as_deref()
        .unwrap_or("")
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<T>, _>>()
        .map_err(|_| ImportErrors::FileNotLoaded {
            filepath: filepath.to_string(),
        })
}

fn load_legacy(filepath: &str) -> Result<PolyData, ImportErrors> {
    let contents = std::fs::read_to_string(filepath).map_err(|err| ImportErrors::IoFailure {
        filepath: filepath.to_string(),
        message: err.to_string(),
    })?;

    let not_loaded = || ImportErrors::FileNotLoaded {
        filepath: filepath.to_string(),
    };

    let mut lines = contents.lines();
    if !lines.next().unwrap_or("").starts_with("# vtk DataFile") {
        return Err(not_loaded());
    }
    lines.next(); // free form title line

    match lines.find(|line| !line.trim().is_empty()).map(str::trim) {
        Some("ASCII") => {}
        // binary legacy files are not readable here
        _ => return Err(not_loaded()),
    }

    match lines.find(|line| !line.trim().is_empty()).map(str::trim) {
        Some("DATASET POLYDATA") => {}
        _ => return Err(not_loaded()),
    }

    let mut points: Vec<f64> = Vec::new();
    let mut polys: Vec<i64> = Vec::new();

    let mut tokens = lines.flat_map(str::split_whitespace);
    while let Some(token) = tokens.next() {
        match token {
            "POINTS" => {
                let count: usize = tokens
                    .next()
                    .and_then(|token| token.parse().ok())
                    .ok_or_else(not_loaded)?;
                tokens.next(); // stored data type, always read as f64
                points = take_numbers(&mut tokens, count * 3).ok_or_else(not_loaded)?;
            }
            "POLYGONS" => {
                let _cells: usize = tokens
                    .next()
                    .and_then(|token| token.parse().ok())
                    .ok_or_else(not_loaded)?;
                let size: usize = tokens
                    .next()
                    .and_then(|token| token.parse().ok())
                    .ok_or_else(not_loaded)?;
                polys = take_numbers(&mut tokens, size).ok_or_else(not_loaded)?;
            }
            // payloads of other sections are numeric and fall through here
            _ => {}
        }
    }

    Ok(PolyData {
        points,
        components: 3,
        polys,
    })
}

fn take_numbers<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    count: usize,
) -> Option<Vec<T>> {
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(tokens.next()?.parse().ok()?);
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML_TRIANGLES: &str = r#"<?xml version="1.0"?>
<VTKFile type="PolyData" version="0.1" byte_order="LittleEndian">
  <PolyData>
    <Piece NumberOfPoints="4" NumberOfPolys="2">
      <Points>
        <DataArray type="Float32" NumberOfComponents="3" format="ascii">
          0 0 0 1 0 0 0 1 0 1 1 0
        </DataArray>
      </Points>
      <Polys>
        <DataArray type="Int64" Name="connectivity" format="ascii">
          0 1 2 1 3 2
        </DataArray>
        <DataArray type="Int64" Name="offsets" format="ascii">
          3 6
        </DataArray>
      </Polys>
    </Piece>
  </PolyData>
</VTKFile>
"#;

    const LEGACY_TRIANGLES: &str = "# vtk DataFile Version 3.0\n\
        two triangles\n\
        ASCII\n\
        DATASET POLYDATA\n\
        POINTS 4 float\n\
        0 0 0 1 0 0 0 1 0\n\
        1 1 0\n\
        POLYGONS 2 8\n\
        3 0 1 2\n\
        3 1 3 2\n";

    fn load_str(contents: &str) -> Result<PolyData, ImportErrors> {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("model.vtp");
        std::fs::write(&filepath, contents).unwrap();
        VTPLoader {}.load(filepath.to_str().unwrap())
    }

    #[test]
    fn the_first_character_selects_the_reader() {
        let xml = load_str(XML_TRIANGLES).unwrap();
        let legacy = load_str(LEGACY_TRIANGLES).unwrap();

        assert_eq!(xml.points.len(), 12);
        assert_eq!(legacy.points.len(), 12);
    }

    #[test]
    fn both_serializations_extract_the_same_mesh() {
        let xml = load_str(XML_TRIANGLES).unwrap().into_mesh("a.vtp").unwrap();
        let legacy = load_str(LEGACY_TRIANGLES)
            .unwrap()
            .into_mesh("b.vtp")
            .unwrap();

        assert_eq!(xml.points, legacy.points);
        assert_eq!(xml.triangles, legacy.triangles);
    }

    #[test]
    fn the_component_count_is_taken_from_the_data_array() {
        let data = load_str(
            r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece>
      <Points>
        <DataArray NumberOfComponents="2" format="ascii">0 0 1 0 0 1</DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#,
        )
        .unwrap();

        assert_eq!(data.components, 2);
        assert_eq!(data.points.len(), 6);
        assert!(data.polys.is_empty());
    }

    #[test]
    fn binary_data_arrays_are_not_loaded() {
        let result = load_str(
            r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece>
      <Points>
        <DataArray NumberOfComponents="3" format="binary">AAAA</DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#,
        );

        assert!(matches!(result, Err(ImportErrors::FileNotLoaded { .. })));
    }

    #[test]
    fn a_binary_legacy_file_is_not_loaded() {
        let result = load_str(
            "# vtk DataFile Version 3.0\ndata\nBINARY\nDATASET POLYDATA\n",
        );

        assert!(matches!(result, Err(ImportErrors::FileNotLoaded { .. })));
    }

    #[test]
    fn a_misleading_first_character_falls_through_to_the_reader() {
        // sniffed as XML, fails to parse as XML
        let result = load_str("< this is not xml at all\n");

        assert!(matches!(result, Err(ImportErrors::FileNotLoaded { .. })));
    }
}
