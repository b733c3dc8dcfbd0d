//! Webhook delivery configurations

use crate::ConfigurationType;
use serde::{Deserialize, Serialize};

/// Where and how a webhook delivers its message
///
/// On the wire the variant is selected by the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Configuration {
    /// HTTP request to a user-provided server
    #[serde(rename = "custom-server")]
    CustomServer(CustomServerConfiguration),

    /// Request routed to the flespi platform API
    #[serde(rename = "flespi-platform")]
    Platform(PlatformConfiguration),
}

impl Configuration {
    /// Get the variant tag
    pub fn config_type(&self) -> ConfigurationType {
        match self {
            Self::CustomServer(_) => ConfigurationType::CustomServer,
            Self::Platform(_) => ConfigurationType::Platform,
        }
    }

    /// Target URI
    pub fn uri(&self) -> &str {
        match self {
            Self::CustomServer(cfg) => &cfg.uri,
            Self::Platform(cfg) => &cfg.uri,
        }
    }

    /// HTTP method
    pub fn method(&self) -> &str {
        match self {
            Self::CustomServer(cfg) => &cfg.method,
            Self::Platform(cfg) => &cfg.method,
        }
    }

    /// Request body template
    pub fn body(&self) -> &str {
        match self {
            Self::CustomServer(cfg) => &cfg.body,
            Self::Platform(cfg) => &cfg.body,
        }
    }

    /// Response validator, if any
    pub fn validate(&self) -> Option<&Validator> {
        match self {
            Self::CustomServer(cfg) => cfg.validate.as_ref(),
            Self::Platform(cfg) => cfg.validate.as_ref(),
        }
    }
}

impl From<CustomServerConfiguration> for Configuration {
    fn from(cfg: CustomServerConfiguration) -> Self {
        Self::CustomServer(cfg)
    }
}

impl From<PlatformConfiguration> for Configuration {
    fn from(cfg: PlatformConfiguration) -> Self {
        Self::Platform(cfg)
    }
}

/// Delivery to a custom HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomServerConfiguration {
    pub uri: String,

    pub method: String,

    #[serde(default)]
    pub body: String,

    /// CA certificate used to verify the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,

    #[serde(default)]
    pub headers: Vec<Header>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<Validator>,
}

impl CustomServerConfiguration {
    pub fn new(uri: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: method.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_ca(mut self, ca: impl Into<String>) -> Self {
        self.ca = Some(ca.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validate = Some(validator);
        self
    }
}

/// Delivery to a flespi platform route
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformConfiguration {
    pub uri: String,

    pub method: String,

    #[serde(default)]
    pub body: String,

    /// Connection the request is executed under, empty when unset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<Validator>,
}

impl PlatformConfiguration {
    pub fn new(uri: impl Into<String>, method: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: method.into(),
            cid: cid.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validate = Some(validator);
        self
    }
}

/// HTTP header
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Response validation rule
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Validator {
    pub expression: String,
    pub action: String,
}

impl Validator {
    pub fn new(expression: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            action: action.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let cfg: Configuration = PlatformConfiguration::new("gw/channels", "GET", "12")
            .with_body("payload")
            .into();

        assert_eq!(cfg.config_type(), ConfigurationType::Platform);
        assert_eq!(cfg.uri(), "gw/channels");
        assert_eq!(cfg.method(), "GET");
        assert_eq!(cfg.body(), "payload");
        assert!(cfg.validate().is_none());
    }

    #[test]
    fn test_wire_tag() {
        let cfg: Configuration = CustomServerConfiguration::new("https://x", "POST")
            .with_header("H", "V")
            .into();

        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["type"], "custom-server");
        assert_eq!(json["headers"][0]["name"], "H");
        assert!(json.get("ca").is_none());
        assert!(json.get("cid").is_none());
    }

    #[test]
    fn test_unknown_wire_tag_is_rejected() {
        let json = serde_json::json!({"type": "mqtt-broker", "uri": "x", "method": "GET"});
        assert!(serde_json::from_value::<Configuration>(json).is_err());
    }

    #[test]
    fn test_platform_cid_is_optional_on_the_wire() {
        let json = serde_json::json!({"type": "flespi-platform", "uri": "x", "method": "GET"});
        let cfg: Configuration = serde_json::from_value(json).unwrap();
        let Configuration::Platform(platform) = &cfg else {
            panic!("expected a platform configuration");
        };
        assert!(platform.cid.is_empty());
        assert!(serde_json::to_value(&cfg).unwrap().get("cid").is_none());
    }
}
