use serde::{Deserialize, Serialize};

///Errors that can be generated while importing a polygon file
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum ImportErrors {
    ///The requested format, or the extension of the input file, is outside
    ///the supported set
    UnsupportedFormat {
        ///Format name or extension that was requested
        format: String,
    },

    ///The reader ran but could not extract any geometry from the file
    FileNotLoaded {
        ///File that could not be loaded
        filepath: String,
    },

    ///The point buffer reports an unknown number of components per point
    UnsupportedPointLayout {
        ///Components per point the file reported
        components: usize,
    },

    ///The face connectivity can not be read as uniform triangle records
    InvalidTopology {
        ///File with the broken connectivity
        filepath: String,
    },

    ///The operating system reported an error while reading a file
    IoFailure {
        ///File that was being read
        filepath: String,
        ///Error text reported by the platform
        message: String,
    },

    ///The step configuration file can not be found in the file system
    ConfigFileNotFound {
        ///File that was not found
        filepath: String,
    },

    ///The step configuration file can't be parsed
    ConfigFileMisformat {
        ///File that was misformatted
        filepath: String,
    },

    ///No input file provided
    NoInputProvided,
}

impl ImportErrors {
    ///Return the error code and pretty error message
    pub fn get_code_and_message(&self) -> (u32, String) {
        match self {
            ImportErrors::UnsupportedFormat { format } => {
                (0x1000,format!("The format \"{}\" is not supported. Supported formats are auto, stl, wrl, obj, ply and vtp.",format))
            }
            ImportErrors::FileNotLoaded { filepath } => {
                (0x1001,format!("No geometry could be read from \"{}\". Please check that the file is a valid polygon file and retry.",filepath))
            }
            ImportErrors::UnsupportedPointLayout { components } => {
                (0x1002,format!("The point data reports {} components per point. Only 1, 2, 3, 4 or 9 components are supported.",components))
            }
            ImportErrors::InvalidTopology { filepath } => {
                (0x1003,format!("The faces in \"{}\" are not all triangles. Please triangulate the mesh and retry.",filepath))
            }
            ImportErrors::IoFailure { filepath, message } => {
                (0x1004,format!("Could not read \"{}\". The system reported: {}",filepath,message))
            }
            ImportErrors::ConfigFileNotFound { filepath } => {
                (0x1005,format!("Could not load configuration file \"{}\". It was not found in the filesystem. Please check that the file exists and retry.",filepath))
            }
            ImportErrors::ConfigFileMisformat { filepath } => {
                (0x1006,format!("Could not load configuration file \"{}\". It was formatted incorrectly.",filepath))
            }
            ImportErrors::NoInputProvided => {
                (0x1007,"No Input Provided.".to_string())
            }
        }
    }
}
