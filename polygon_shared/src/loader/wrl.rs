use crate::error::ImportErrors;
use crate::loader::Loader;
use crate::mesh::PolyData;

/// Loader for VRML 2.0 scene files
///
/// Only the first `IndexedFaceSet` in the scene is imported. Scenes with
/// more than one shape keep that single object policy, the remaining shapes
/// are ignored on purpose rather than merged.
pub struct VRMLLoader {}

impl Loader for VRMLLoader {
    fn load(&self, filepath: &str) -> Result<PolyData, ImportErrors> {
        let contents =
            std::fs::read_to_string(filepath).map_err(|err| ImportErrors::IoFailure {
                filepath: filepath.to_string(),
                message: err.to_string(),
            })?;

        if !contents.starts_with("#VRML V2.0") {
            return Err(ImportErrors::FileNotLoaded {
                filepath: filepath.to_string(),
            });
        }

        let tokens = tokenize(&contents);

        let not_loaded = || ImportErrors::FileNotLoaded {
            filepath: filepath.to_string(),
        };

        let face_set = tokens
            .iter()
            .position(|token| token == "IndexedFaceSet")
            .ok_or_else(not_loaded)?;
        let (open, close) = block_extent(&tokens, face_set).ok_or_else(not_loaded)?;
        let block = &tokens[open..=close];

        let points = match block.iter().position(|token| token == "Coordinate") {
            Some(coordinate) => {
                match block[coordinate..]
                    .iter()
                    .position(|token| token == "point")
                {
                    Some(keyword) => bracketed_numbers::<f64>(block, coordinate + keyword)
                        .ok_or_else(not_loaded)?,
                    None => Vec::new(),
                }
            }
            None => Vec::new(),
        };

        let indices = match block.iter().position(|token| token == "coordIndex") {
            Some(keyword) => bracketed_numbers::<i64>(block, keyword).ok_or_else(not_loaded)?,
            None => Vec::new(),
        };

        // faces are separated by -1, the last separator may be omitted
        let mut polys = Vec::new();
        let mut face: Vec<i64> = Vec::new();
        for index in indices {
            if index == -1 {
                if !face.is_empty() {
                    polys.push(face.len() as i64);
                    polys.append(&mut face);
                }
            } else {
                face.push(index);
            }
        }
        if !face.is_empty() {
            polys.push(face.len() as i64);
            polys.append(&mut face);
        }

        Ok(PolyData {
            points,
            components: 3,
            polys,
        })
    }
}

///Split a scene into tokens, with braces and brackets standing alone and
///commas treated as whitespace. Comments run from `#` to the end of the line.
fn tokenize(source: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in source.lines() {
        let line = line.split('#').next().unwrap_or("");
        let mut current = String::new();
        for character in line.chars() {
            match character {
                '{' | '}' | '[' | ']' => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                    tokens.push(character.to_string());
                }
                other if other.is_whitespace() || other == ',' => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                other => current.push(other),
            }
        }
        if !current.is_empty() {
            tokens.push(current);
        }
    }
    tokens
}

///Extent of the balanced brace block following the node name at `start`,
///as inclusive token positions of the opening and closing brace
fn block_extent(tokens: &[String], start: usize) -> Option<(usize, usize)> {
    let open = start + tokens[start..].iter().position(|token| token == "{")?;
    let mut depth = 0usize;
    for (offset, token) in tokens[open..].iter().enumerate() {
        match token.as_str() {
            "{" => depth += 1,
            "}" => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, open + offset));
                }
            }
            _ => {}
        }
    }
    None
}

///Parse the bracketed list that follows the field keyword at `keyword`
fn bracketed_numbers<T: std::str::FromStr>(tokens: &[String], keyword: usize) -> Option<Vec<T>> {
    let mut iter = tokens.get(keyword + 1..)?.iter();
    if iter.next().map(String::as_str) != Some("[") {
        return None;
    }

    let mut values = Vec::new();
    for token in iter {
        if token == "]" {
            return Some(values);
        }
        values.push(token.parse().ok()?);
    }
    None
}
