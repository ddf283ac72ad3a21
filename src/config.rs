//! Converter settings: built-in defaults, optional TOML file, CLI overrides.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use crate::converter::ConvertPaths;
use crate::error::ConfigError;

pub const DEFAULT_VERTICES_PATH: &str = "OutputVertices.csv";
pub const DEFAULT_INDICES_PATH: &str = "OutputIndices.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "Output.obj";
pub const DEFAULT_OBJECT_NAME: &str = "Flag";
pub const DEFAULT_PRECISION: usize = 6;
/// f64 carries at most 17 significant digits, anything past this is padding.
pub const MAX_PRECISION: usize = 17;

#[derive(Debug, Clone, Copy, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Obj,
    Vtu,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Obj
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Converter configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Vertex table path.
    pub vertices: PathBuf,
    /// Index list path.
    pub indices: PathBuf,
    /// Mesh output path.
    pub output: PathBuf,
    /// Name written on the `o` line.
    pub object_name: String,
    /// Fractional digits of each coordinate.
    pub precision: usize,
    pub format: OutputFormat,
    pub log_level: Option<LogLevel>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            vertices: PathBuf::from(DEFAULT_VERTICES_PATH),
            indices: PathBuf::from(DEFAULT_INDICES_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            object_name: DEFAULT_OBJECT_NAME.to_string(),
            precision: DEFAULT_PRECISION,
            format: OutputFormat::Obj,
            log_level: None,
        }
    }
}

impl ConverterConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: ConverterConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision {
                value: self.precision,
                max: MAX_PRECISION,
            });
        }
        Ok(())
    }

    /// Output path, switching the default `Output.obj` to `Output.vtu` for VTU output.
    pub fn output_path(&self) -> PathBuf {
        if self.format == OutputFormat::Vtu && self.output == Path::new(DEFAULT_OUTPUT_PATH) {
            self.output.with_extension("vtu")
        } else {
            self.output.clone()
        }
    }

    pub fn paths(&self) -> ConvertPaths {
        ConvertPaths {
            vertices: self.vertices.clone(),
            indices: self.indices.clone(),
            output: self.output_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_constants() {
        let config = ConverterConfig::default();
        assert_eq!(config.vertices, PathBuf::from("OutputVertices.csv"));
        assert_eq!(config.indices, PathBuf::from("OutputIndices.txt"));
        assert_eq!(config.output, PathBuf::from("Output.obj"));
        assert_eq!(config.object_name, "Flag");
        assert_eq!(config.precision, 6);
        assert_eq!(config.format, OutputFormat::Obj);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConverterConfig::from_toml_str(
            "output = \"flag.obj\"\nlog_level = \"debug\"\n",
            Path::new("test.toml"),
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("flag.obj"));
        assert_eq!(config.log_level, Some(LogLevel::Debug));
        assert_eq!(config.vertices, PathBuf::from(DEFAULT_VERTICES_PATH));
        assert_eq!(config.object_name, DEFAULT_OBJECT_NAME);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = ConverterConfig::from_toml_str("colour = \"red\"\n", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_precision_is_bounded() {
        let result = ConverterConfig::from_toml_str("precision = 40\n", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::InvalidPrecision { value: 40, .. })));
    }

    #[test]
    fn test_vtu_format_swaps_default_extension() {
        let mut config = ConverterConfig::default();
        config.format = OutputFormat::Vtu;
        assert_eq!(config.output_path(), PathBuf::from("Output.vtu"));

        config.output = PathBuf::from("custom.xml");
        assert_eq!(config.output_path(), PathBuf::from("custom.xml"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConverterConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
