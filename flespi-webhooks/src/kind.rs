//! Discriminant tags for webhook and configuration variants

use crate::TranslateError;
use std::fmt;
use std::str::FromStr;

/// Webhook variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookKind {
    /// One delivery configuration
    Single,

    /// An ordered pipeline of delivery configurations
    Chained,
}

impl WebhookKind {
    pub const SINGLE: &'static str = "single-webhook";
    pub const CHAINED: &'static str = "chained-webhook";

    /// Get the tag used in the resource model
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => Self::SINGLE,
            Self::Chained => Self::CHAINED,
        }
    }
}

impl FromStr for WebhookKind {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::SINGLE => Ok(Self::Single),
            Self::CHAINED => Ok(Self::Chained),
            other => Err(TranslateError::InvalidVariantTag(other.to_string())),
        }
    }
}

impl fmt::Display for WebhookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery configuration variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationType {
    /// Delivery to a user-provided HTTP server
    CustomServer,

    /// Delivery to a flespi platform API route
    Platform,
}

impl ConfigurationType {
    pub const CUSTOM_SERVER: &'static str = "custom-server";
    pub const PLATFORM: &'static str = "flespi-platform";

    /// Get the tag used in the resource model and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomServer => Self::CUSTOM_SERVER,
            Self::Platform => Self::PLATFORM,
        }
    }
}

impl FromStr for ConfigurationType {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::CUSTOM_SERVER => Ok(Self::CustomServer),
            Self::PLATFORM => Ok(Self::Platform),
            other => Err(TranslateError::InvalidConfigurationType(other.to_string())),
        }
    }
}

impl fmt::Display for ConfigurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_kind_tags() {
        for kind in [WebhookKind::Single, WebhookKind::Chained] {
            assert_eq!(kind.as_str().parse::<WebhookKind>(), Ok(kind));
        }
        assert_eq!(WebhookKind::Chained.to_string(), "chained-webhook");
    }

    #[test]
    fn test_webhook_kind_rejects_misspelling() {
        assert_eq!(
            "chained-webhool".parse::<WebhookKind>(),
            Err(TranslateError::InvalidVariantTag(
                "chained-webhool".to_string()
            ))
        );
        // Tags are case sensitive
        assert!("Single-Webhook".parse::<WebhookKind>().is_err());
    }

    #[test]
    fn test_configuration_type_tags() {
        for ty in [ConfigurationType::CustomServer, ConfigurationType::Platform] {
            assert_eq!(ty.as_str().parse::<ConfigurationType>(), Ok(ty));
        }
        assert!(matches!(
            "".parse::<ConfigurationType>(),
            Err(TranslateError::InvalidConfigurationType(s)) if s.is_empty()
        ));
    }
}
