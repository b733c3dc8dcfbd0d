// Provider configuration for flespi
//
// Values are layered: config files first, then `FLESPI_*` environment
// variables (optionally seeded from a .env file), then explicit overrides.

pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default flespi REST endpoint
pub const DEFAULT_URL: &str = "https://flespi.io";

/// Settings the provider needs to build an API client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the flespi REST API
    #[serde(default = "default_url")]
    pub url: String,

    /// flespi access token
    #[serde(default)]
    pub token: String,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: String::new(),
        }
    }
}

// The token never shows up in logs
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .finish()
    }
}

impl ProviderConfig {
    /// Create a configuration for the default endpoint
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// Override the API base URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder for layered loading
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    /// Load from `FLESPI_URL` / `FLESPI_TOKEN` and validate
    pub fn from_env() -> Result<Self> {
        Self::builder().load_env().build()
    }

    /// Load from a JSON, TOML or .env file and validate
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().add_file(path).build()
    }

    fn apply_env(&mut self, loader: &EnvLoader) {
        if let Some(url) = loader.load_opt("url") {
            self.url = url;
        }
        if let Some(token) = loader.load_opt("token") {
            self.token = token;
        }
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.token, "token")?;
        ConfigValidator::is_url(&self.url, "url")?;
        Ok(())
    }
}

/// Builder for [`ProviderConfig`]
#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    files: Vec<PathBuf>,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<PathBuf>,
    url: Option<String>,
    token: Option<String>,
}

impl ProviderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration file; later files override earlier ones
    pub fn add_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    /// Read `FLESPI_*` environment variables
    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Seed the environment from a .env file, then read `FLESPI_*` variables
    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.load_dotenv = true;
        self.load_env = true;
        self.dotenv_path = path;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ProviderConfig> {
        let mut config = ProviderConfig::default();

        for path in &self.files {
            let file: ProviderConfig = ConfigLoader::auto(path)?.load(path)?;
            config = file;
        }

        if self.load_dotenv {
            match self.dotenv_path {
                Some(ref path) => {
                    dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
                }
                None => {
                    // A missing .env is not an error
                    dotenvy::dotenv().ok();
                }
            }
        }

        if self.load_env {
            config.apply_env(&EnvLoader::flespi());
        }

        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(token) = self.token {
            config.token = token;
        }

        config.validate()?;
        Ok(config)
    }
}
