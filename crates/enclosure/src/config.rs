use std::path::{Path, PathBuf};

use export_sink::StlFormat;
use footprint_registry::{ConfigError, DimensionSet};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "enclosure.json";

/// Where and how the meshes are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
    /// Chord tolerance handed to the kernel's tessellator, in mm.
    pub tessellation_tolerance: f64,
    pub stl_format: StlFormat,
    pub preview: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            tessellation_tolerance: 0.05,
            stl_format: StlFormat::Binary,
            preview: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclosureConfig {
    pub dimensions: DimensionSet,
    pub export: ExportSettings,
}

impl EnclosureConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check_export()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// `path` when it exists, otherwise the reference enclosure.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    fn check_export(&self) -> Result<(), ConfigError> {
        let tol = self.export.tessellation_tolerance;
        if !tol.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "export.tessellation_tolerance".to_string(),
            });
        }
        if tol <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "export.tessellation_tolerance".to_string(),
                value: tol,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_reference_config() {
        assert_eq!(EnclosureConfig::from_json("{}").unwrap(), EnclosureConfig::default());
    }

    #[test]
    fn partial_export_section() {
        let config = EnclosureConfig::from_json(
            r#"{ "export": { "stl_format": "ascii", "output_dir": "build" } }"#,
        )
        .unwrap();
        assert_eq!(config.export.stl_format, StlFormat::Ascii);
        assert_eq!(config.export.output_dir, PathBuf::from("build"));
        assert!(config.export.preview);
    }

    #[test]
    fn null_component_is_omitted() {
        let config = EnclosureConfig::from_json(r#"{ "dimensions": { "buttons": null } }"#).unwrap();
        assert!(config.dimensions.buttons.is_none());
        assert!(config.dimensions.display.is_some());
    }

    #[test]
    fn zero_tolerance_rejected() {
        let err = EnclosureConfig::from_json(r#"{ "export": { "tessellation_tolerance": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { .. }));
    }

    #[test]
    fn mistyped_dimension_is_parse_error() {
        assert!(matches!(
            EnclosureConfig::from_json(r#"{ "dimensions": { "shell": { "wall_th": "thick" } } }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EnclosureConfig::from_json("{ dimensions: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            EnclosureConfig::load_or_default(Path::new("/nonexistent/enclosure.json")).unwrap();
        assert_eq!(config, EnclosureConfig::default());
    }
}
