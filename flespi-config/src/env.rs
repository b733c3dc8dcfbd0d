// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Loader for `FLESPI_*` variables
    pub fn flespi() -> Self {
        Self::new(Some("FLESPI".to_string()))
    }

    /// Load all variables under the prefix, keyed by lowercased suffix
    pub fn load(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();

        for (key, value) in env::vars() {
            match self.prefix {
                Some(ref prefix) => {
                    if let Some(rest) = key.strip_prefix(prefix.as_str()) {
                        if let Some(rest) = rest.strip_prefix('_') {
                            vars.insert(rest.to_lowercase(), value);
                        }
                    }
                }
                None => {
                    vars.insert(key.to_lowercase(), value);
                }
            }
        }

        vars
    }

    /// Full variable name for a key
    pub fn var_name(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.var_name(key)).map_err(ConfigError::EnvError)
    }

    /// Load a variable if it is set
    pub fn load_opt(&self, key: &str) -> Option<String> {
        self.load_var(key).ok()
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::flespi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Setting variables is unsafe on edition 2024; these tests only read.

    #[test]
    fn test_var_name_with_prefix() {
        let loader = EnvLoader::flespi();
        assert_eq!(loader.var_name("token"), "FLESPI_TOKEN");
        assert_eq!(loader.var_name("url"), "FLESPI_URL");
    }

    #[test]
    fn test_var_name_without_prefix() {
        let loader = EnvLoader::new(None);
        assert_eq!(loader.var_name("path"), "PATH");
    }

    #[test]
    fn test_missing_var() {
        let loader = EnvLoader::new(Some("FLESPI_UNIT_TEST".to_string()));
        assert!(loader.load_var("MISSING_VAR_67890").is_err());
        assert!(loader.load_opt("MISSING_VAR_67890").is_none());
    }
}
