use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::oas::{Contact, Info, License, Logo};

/// Top-level project configuration loaded from `.sw2oas.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Sw2OasConfig {
    /// Descriptor file or directory of descriptor files.
    pub input: Option<String>,
    pub output: Option<String>,
    #[serde(flatten)]
    pub document: DocumentConfig,
}

impl Sw2OasConfig {
    pub fn input(&self) -> &str {
        self.input.as_deref().unwrap_or("descriptors")
    }

    pub fn output(&self) -> &str {
        self.output.as_deref().unwrap_or("openapi")
    }
}

/// Everything the assembler needs beyond the converted material itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub info: InfoConfig,
    pub layout: LayoutConfig,
    pub security: SecurityConfig,
}

/// Static header enrichment for the root document.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<LicenseConfig>,
    pub server_url: Option<String>,
    pub logo: Option<LogoConfig>,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: "Graylog REST API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            contact: None,
            license: None,
            server_url: None,
            logo: None,
        }
    }
}

impl InfoConfig {
    pub fn to_info(&self) -> Info {
        Info {
            title: self.title.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            contact: self.contact.clone(),
            license: self.license.as_ref().map(|l| License {
                name: l.name.clone(),
                url: l.url.clone(),
            }),
            logo: self.logo.as_ref().map(|l| Logo {
                url: l.url.clone(),
                alt_text: l.alt_text.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LicenseConfig {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogoConfig {
    pub url: String,
    pub alt_text: Option<String>,
}

/// Names of the generated files, relative to the output directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub root_file: String,
    pub paths_dir: String,
    pub schemas_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_file: "openapi.yaml".to_string(),
            paths_dir: "paths".to_string(),
            schemas_dir: "schemas".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Declare HTTP basic auth and require it globally.
    pub basic_auth: bool,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".sw2oas.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<Sw2OasConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: Sw2OasConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# sw2oas configuration
input: descriptors      # descriptor JSON file, or a directory of them
output: openapi

info:
  title: Graylog REST API
  version: 1.0.0
  # description: REST API of the Graylog log management platform
  # server_url: https://graylog.example.com/api
  # contact:
  #   name: Graylog
  #   url: https://www.graylog.org
  # license:
  #   name: SSPL
  #   url: https://www.mongodb.com/licensing/server-side-public-license
  # logo:
  #   url: https://www.graylog.org/logo.svg
  #   alt_text: Graylog

layout:
  root_file: openapi.yaml
  paths_dir: paths
  schemas_dir: schemas

security:
  basic_auth: false
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Sw2OasConfig::default();
        assert_eq!(config.input(), "descriptors");
        assert_eq!(config.output(), "openapi");
        assert_eq!(config.document.info.title, "Graylog REST API");
        assert_eq!(config.document.layout.root_file, "openapi.yaml");
        assert_eq!(config.document.layout.paths_dir, "paths");
        assert!(!config.document.security.basic_auth);
    }

    #[test]
    fn test_default_content_parses() {
        let config: Sw2OasConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.input(), "descriptors");
        assert_eq!(config.document.info.version, "1.0.0");
        assert_eq!(config.document.layout.schemas_dir, "schemas");
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: dump.json
output: out
info:
  title: Test API
  version: 6.1.0
  server_url: https://graylog.example.com/api
  license:
    name: SSPL
  logo:
    url: https://example.com/logo.png
    alt_text: Logo
layout:
  paths_dir: p
security:
  basic_auth: true
"#;
        let config: Sw2OasConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input(), "dump.json");
        assert_eq!(config.output(), "out");
        let info = config.document.info.to_info();
        assert_eq!(info.title, "Test API");
        assert_eq!(info.version, "6.1.0");
        assert_eq!(info.license.map(|l| l.name), Some("SSPL".to_string()));
        assert_eq!(info.logo.and_then(|l| l.alt_text), Some("Logo".to_string()));
        assert_eq!(config.document.layout.paths_dir, "p");
        // Unset layout fields keep their defaults
        assert_eq!(config.document.layout.schemas_dir, "schemas");
        assert!(config.document.security.basic_auth);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Sw2OasConfig = serde_yaml_ng::from_str("output: docs\n").unwrap();
        assert_eq!(config.output(), "docs");
        assert_eq!(config.input(), "descriptors");
        assert_eq!(config.document.info.title, "Graylog REST API");
    }
}
