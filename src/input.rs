use log::{debug, info};
use polygon_shared::config::load_config;
use polygon_shared::error::ImportErrors;
use polygon_shared::loader::{import_polygon, FormatHint};
use polygon_shared::mesh::Mesh;
use std::str::FromStr;

/// Resolve the command line or a step configuration file into one import call
pub fn file_input(
    config_path: Option<&str>,
    format: Option<&str>,
    input: Option<String>,
) -> Result<Mesh, ImportErrors> {
    let (hint, filepath) = if let Some(config_path) = config_path {
        info!("Loading Step Configuration");
        let config = load_config(config_path)?;
        (config.file_format, config.file_loc)
    } else {
        let hint = match format {
            Some(format) => FormatHint::from_str(format)?,
            None => FormatHint::Auto,
        };
        (hint, input.ok_or(ImportErrors::NoInputProvided)?)
    };

    debug!("Using format hint: {}", hint.as_str());
    info!("Loading model from: {}", filepath);

    import_polygon(hint, &filepath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn a_config_file_drives_the_import() {
        let dir = tempfile::tempdir().unwrap();

        let model_path = dir.path().join("triangle.obj");
        let mut model = std::fs::File::create(&model_path).unwrap();
        write!(model, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        drop(model);

        let config_path = dir.path().join("step.json");
        std::fs::write(
            &config_path,
            format!(
                r#"{{"fileFormat": "auto", "fileLoc": "{}"}}"#,
                model_path.to_str().unwrap()
            ),
        )
        .unwrap();

        let mesh = file_input(Some(config_path.to_str().unwrap()), None, None).unwrap();

        assert_eq!(mesh.points.len(), 3);
        assert_eq!(mesh.triangles.len(), 1);
    }

    #[test]
    fn no_input_is_an_error() {
        assert_eq!(
            file_input(None, None, None),
            Err(ImportErrors::NoInputProvided)
        );
    }

    #[test]
    fn an_unknown_format_string_is_rejected() {
        let result = file_input(None, Some("step"), Some("model.step".to_string()));

        assert!(matches!(
            result,
            Err(ImportErrors::UnsupportedFormat { .. })
        ));
    }
}
