// Configuration file loaders

use crate::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }
}

/// Configuration file loader
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Detect format from the file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    /// Read and parse a file into a JSON value
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    /// Read a file straight into a typed configuration
    pub fn load<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T> {
        let value = self.load_file(path)?;
        serde_json::from_value(value).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse configuration text
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e))),
            FileFormat::Toml => {
                let value: toml::Value = toml::from_str(content)
                    .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;
                serde_json::to_value(value)
                    .map_err(|e| ConfigError::ParseError(format!("TOML conversion error: {}", e)))
            }
            FileFormat::Env => Ok(parse_env(content)),
        }
    }
}

// KEY=value lines; keys are lowercased and a FLESPI_ prefix is dropped
fn parse_env(content: &str) -> Value {
    let mut map = serde_json::Map::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let key = key.strip_prefix("FLESPI_").unwrap_or(key).to_lowercase();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            map.insert(key, Value::String(value.to_string()));
        }
    }

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let value = loader.parse(r#"{"token": "abc", "url": "https://flespi.io"}"#).unwrap();
        assert_eq!(value["token"], "abc");
    }

    #[test]
    fn test_parse_toml() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let value = loader
            .parse(
                r#"
                token = "abc"
                url = "https://flespi.io"
            "#,
            )
            .unwrap();
        assert_eq!(value["url"], "https://flespi.io");
    }

    #[test]
    fn test_parse_env() {
        let loader = ConfigLoader::new(FileFormat::Env);
        let value = loader
            .parse(
                r#"
                # flespi access
                FLESPI_TOKEN="abc"
                URL='https://flespi.io'
            "#,
            )
            .unwrap();
        assert_eq!(value["token"], "abc");
        assert_eq!(value["url"], "https://flespi.io");
    }

    #[test]
    fn test_parse_errors() {
        assert!(ConfigLoader::new(FileFormat::Json).parse("{").is_err());
        assert!(ConfigLoader::new(FileFormat::Toml).parse("token = ").is_err());
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("JSON"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("toml"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("yaml"), None);
        assert!(ConfigLoader::auto("provider.toml").is_ok());
        assert!(ConfigLoader::auto("provider").is_err());
    }
}
