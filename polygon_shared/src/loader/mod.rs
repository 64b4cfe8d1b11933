#![deny(missing_docs)]

use crate::error::ImportErrors;
use crate::mesh::{Mesh, PolyData};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::Path;
use std::str::FromStr;

mod obj;
mod ply;
mod stl;
mod vtp;
mod wrl;

pub use obj::OBJLoader;
pub use ply::PLYLoader;
pub use stl::STLLoader;
pub use vtp::VTPLoader;
pub use wrl::VRMLLoader;

///Loader trait to define reading in a polygon file format as raw point and
///connectivity streams
pub trait Loader {
    ///Load a specific file
    fn load(&self, filepath: &str) -> Result<PolyData, ImportErrors>;
}

///The closed set of format selectors understood by the importer
///
///The lowercase names double as the wire level literals used by the step
///configuration.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormatHint {
    ///Select the parser from the filename extension
    Auto,
    ///Stereolithography files
    Stl,
    ///VRML 2.0 scene files
    Wrl,
    ///Wavefront OBJ files
    Obj,
    ///Stanford polygon files
    Ply,
    ///VTK polydata files, XML or legacy
    Vtp,
}

impl FormatHint {
    ///The wire level name of this selector
    pub fn as_str(self) -> &'static str {
        match self {
            FormatHint::Auto => "auto",
            FormatHint::Stl => "stl",
            FormatHint::Wrl => "wrl",
            FormatHint::Obj => "obj",
            FormatHint::Ply => "ply",
            FormatHint::Vtp => "vtp",
        }
    }

    ///Turn `Auto` into a concrete format by case insensitive extension
    ///lookup, leaving explicit selections untouched
    fn resolve(self, filepath: &str) -> Result<FormatHint, ImportErrors> {
        if self != FormatHint::Auto {
            return Ok(self);
        }

        let extension = Path::new(filepath)
            .extension()
            .and_then(OsStr::to_str)
            .ok_or_else(|| ImportErrors::UnsupportedFormat {
                format: filepath.to_string(),
            })?;

        match extension.to_lowercase().as_str() {
            "obj" => Ok(FormatHint::Obj),
            "wrl" => Ok(FormatHint::Wrl),
            "stl" => Ok(FormatHint::Stl),
            "ply" => Ok(FormatHint::Ply),
            "vtp" => Ok(FormatHint::Vtp),
            other => Err(ImportErrors::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

impl FromStr for FormatHint {
    type Err = ImportErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(FormatHint::Auto),
            "stl" => Ok(FormatHint::Stl),
            "wrl" => Ok(FormatHint::Wrl),
            "obj" => Ok(FormatHint::Obj),
            "ply" => Ok(FormatHint::Ply),
            "vtp" => Ok(FormatHint::Vtp),
            other => Err(ImportErrors::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

///Import a polygon file, selecting exactly one parser from the hint
///
///With [`FormatHint::Auto`] the parser is chosen from the filename extension.
///Any other hint forces that parser, even against a mismatched extension.
///The dispatcher performs no parsing itself.
pub fn import_polygon(hint: FormatHint, filepath: &str) -> Result<Mesh, ImportErrors> {
    let loader: &dyn Loader = match hint.resolve(filepath)? {
        FormatHint::Stl => &STLLoader {},
        FormatHint::Wrl => &VRMLLoader {},
        FormatHint::Obj => &OBJLoader {},
        FormatHint::Ply => &PLYLoader {},
        FormatHint::Vtp => &VTPLoader {},
        // resolve never hands Auto back
        FormatHint::Auto => {
            return Err(ImportErrors::UnsupportedFormat {
                format: FormatHint::Auto.as_str().to_string(),
            })
        }
    };

    loader.load(filepath)?.into_mesh(filepath)
}
