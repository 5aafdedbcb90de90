#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Document metadata, output location and schema registration policy, loaded
//! from YAML.
//!
//! ```yaml
//! info:
//!   title: Movies API
//!   version: 0.0.1
//!   servers:
//!     - url: http://localhost:3001
//! output:
//!   dir: docs
//! schema_policy: reject
//! ```

use crate::document::DocumentInfo;
use crate::error::{AppError, AppResult};
use crate::registry::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Document metadata.
    pub info: DocumentInfo,
    /// Where the artifacts go.
    #[serde(default)]
    pub output: OutputConfig,
    /// Behaviour on schema re-registration.
    #[serde(default)]
    pub schema_policy: DuplicatePolicy,
}

/// Artifact locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory.
    pub dir: PathBuf,
    /// JSON file name inside `dir`.
    pub json_file: String,
    /// YAML file name inside `dir`.
    pub yaml_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            json_file: "openapi.json".to_string(),
            yaml_file: "openapi.yaml".to_string(),
        }
    }
}

impl OutputConfig {
    /// Full path of the JSON artifact.
    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }

    /// Full path of the YAML artifact.
    pub fn yaml_path(&self) -> PathBuf {
        self.dir.join(&self.yaml_file)
    }
}

impl GeneratorConfig {
    /// Configuration with the given metadata and default output settings.
    pub fn new(info: DocumentInfo) -> Self {
        Self {
            info,
            output: OutputConfig::default(),
            schema_policy: DuplicatePolicy::default(),
        }
    }

    /// Parses a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let config: GeneratorConfig = serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_yaml_str(&content)
    }

    fn validate(&self) -> AppResult<()> {
        for (key, name) in [
            ("json_file", &self.output.json_file),
            ("yaml_file", &self.output.yaml_file),
        ] {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(AppError::Config(format!(
                    "output.{} must be a plain file name, got '{}'",
                    key, name
                )));
            }
        }
        if self.output.json_file == self.output.yaml_file {
            return Err(AppError::Config(
                "output.json_file and output.yaml_file must differ".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = GeneratorConfig::from_yaml_str(
            r#"
info:
  title: Movies API
  version: 0.0.1
"#,
        )
        .unwrap();

        assert_eq!(config.info.title, "Movies API");
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.schema_policy, DuplicatePolicy::Replace);
        assert_eq!(config.output.json_path(), PathBuf::from("./openapi.json"));
    }

    #[test]
    fn test_full_config() {
        let config = GeneratorConfig::from_yaml_str(
            r#"
info:
  title: Movies API
  version: 0.0.1
  description: API for managing movies
  servers:
    - url: https://movies-api.example.com
      description: Production server
output:
  dir: docs/api
  yaml_file: contract.yml
schema_policy: reject
"#,
        )
        .unwrap();

        assert_eq!(config.schema_policy, DuplicatePolicy::Reject);
        assert_eq!(config.output.json_path(), PathBuf::from("docs/api/openapi.json"));
        assert_eq!(config.output.yaml_path(), PathBuf::from("docs/api/contract.yml"));
        assert_eq!(config.info.servers.len(), 1);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = GeneratorConfig::from_yaml_str(
            r#"
info: { title: T, version: "1" }
outputs: { dir: x }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_file_names_must_be_plain_and_distinct() {
        let nested = GeneratorConfig::from_yaml_str(
            r#"
info: { title: T, version: "1" }
output: { json_file: ../openapi.json }
"#,
        );
        assert!(nested.is_err());

        let clash = GeneratorConfig::from_yaml_str(
            r#"
info: { title: T, version: "1" }
output: { json_file: api.txt, yaml_file: api.txt }
"#,
        );
        assert!(clash.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "info:\n  title: From File\n  version: 2.0.0").unwrap();
        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.info.title, "From File");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = GeneratorConfig::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("Failed to read")));
    }
}
