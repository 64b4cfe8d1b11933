use crate::error::ImportErrors;
use crate::loader::FormatHint;
use serde::{Deserialize, Serialize};

///Configuration the host workflow step persists for one import
///
///The host serializes this as a JSON mapping with the wire level keys
///`fileFormat` and `fileLoc`. Paths are used exactly as given, resolving
///them against a workflow root is the host's job.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StepConfig {
    ///Format selector, defaults to detection by file extension
    #[serde(rename = "fileFormat", default = "default_format")]
    pub file_format: FormatHint,

    ///Location of the polygon file
    #[serde(rename = "fileLoc")]
    pub file_loc: String,
}

fn default_format() -> FormatHint {
    FormatHint::Auto
}

///Load a step configuration mapping from a JSON file
pub fn load_config(filepath: &str) -> Result<StepConfig, ImportErrors> {
    let config_data =
        std::fs::read_to_string(filepath).map_err(|_| ImportErrors::ConfigFileNotFound {
            filepath: filepath.to_string(),
        })?;

    serde_json::from_str(&config_data).map_err(|_| ImportErrors::ConfigFileMisformat {
        filepath: filepath.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_wire_keys_are_read() {
        let config: StepConfig =
            serde_json::from_str(r#"{"fileFormat": "ply", "fileLoc": "/data/scan.ply"}"#).unwrap();

        assert_eq!(config.file_format, FormatHint::Ply);
        assert_eq!(config.file_loc, "/data/scan.ply");
    }

    #[test]
    fn the_format_defaults_to_auto() {
        let config: StepConfig = serde_json::from_str(r#"{"fileLoc": "scan.stl"}"#).unwrap();

        assert_eq!(config.file_format, FormatHint::Auto);
    }

    #[test]
    fn an_unknown_format_literal_is_rejected() {
        let result =
            serde_json::from_str::<StepConfig>(r#"{"fileFormat": "step", "fileLoc": "a.step"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn a_config_round_trips_through_json() {
        let config = StepConfig {
            file_format: FormatHint::Vtp,
            file_loc: "surface.vtp".to_string(),
        };

        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"fileFormat\":\"vtp\""));
        assert_eq!(serde_json::from_str::<StepConfig>(&text).unwrap(), config);
    }

    #[test]
    fn a_missing_config_file_is_reported() {
        assert_eq!(
            load_config("/nonexistent/step.json"),
            Err(ImportErrors::ConfigFileNotFound {
                filepath: "/nonexistent/step.json".to_string()
            })
        );
    }

    #[test]
    fn a_misformatted_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("step.json");
        std::fs::write(&filepath, "not json").unwrap();

        assert!(matches!(
            load_config(filepath.to_str().unwrap()),
            Err(ImportErrors::ConfigFileMisformat { .. })
        ));
    }
}
