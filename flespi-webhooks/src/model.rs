//! Flat webhook resource model
//!
//! This is the shape the host schema stores: fixed fields plus ordered lists
//! of nested records. Variant-specific data lives side by side in
//! [`ConfigurationRecord`] and is selected by the `type` tag.

use serde::{Deserialize, Serialize};

/// A webhook resource as declared by the user and persisted as state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WebhookResourceModel {
    /// Remote identifier, zero until the webhook is created
    #[serde(default)]
    pub id: i64,

    /// Webhook name
    pub name: String,

    /// Webhook kind tag (`single-webhook` or `chained-webhook`)
    #[serde(rename = "type")]
    pub kind: String,

    /// Event subscriptions, in declaration order
    #[serde(default)]
    pub triggers: Vec<TriggerModel>,

    /// Delivery configurations, in declaration order
    #[serde(default)]
    pub configurations: Vec<ConfigurationRecord>,
}

impl WebhookResourceModel {
    /// Create an empty model with the given name and kind tag
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            kind: kind.into(),
            triggers: Vec::new(),
            configurations: Vec::new(),
        }
    }

    /// Set the remote identifier
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Append a trigger
    pub fn with_trigger(mut self, trigger: TriggerModel) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Append a configuration record
    pub fn with_configuration(mut self, configuration: ConfigurationRecord) -> Self {
        self.configurations.push(configuration);
        self
    }
}

/// A topic subscription
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriggerModel {
    pub topic: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterModel>,
}

impl TriggerModel {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, cid: i64, payload: impl Into<String>) -> Self {
        self.filter = Some(FilterModel {
            cid,
            payload: payload.into(),
        });
        self
    }
}

/// Trigger filter by connection id and payload expression
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterModel {
    #[serde(default)]
    pub cid: i64,
    pub payload: String,
}

/// One delivery configuration as a flat record
///
/// `ca` and `headers` are only meaningful for `custom-server`, `cid` only for
/// `flespi-platform`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    /// Configuration type tag (`custom-server` or `flespi-platform`)
    #[serde(rename = "type")]
    pub kind: String,

    pub uri: String,

    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// PEM encoded CA certificate for the custom server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,

    /// Platform connection reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,

    #[serde(default)]
    pub headers: Vec<HeaderModel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<ValidatorModel>,
}

impl ConfigurationRecord {
    /// Create a record with the given type tag
    pub fn new(kind: impl Into<String>, uri: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            uri: uri.into(),
            method: method.into(),
            ..Default::default()
        }
    }

    /// Create a `custom-server` record
    pub fn custom_server(uri: impl Into<String>, method: impl Into<String>) -> Self {
        Self::new(crate::ConfigurationType::CUSTOM_SERVER, uri, method)
    }

    /// Create a `flespi-platform` record
    pub fn platform(
        uri: impl Into<String>,
        method: impl Into<String>,
        cid: impl Into<String>,
    ) -> Self {
        let mut record = Self::new(crate::ConfigurationType::PLATFORM, uri, method);
        record.cid = Some(cid.into());
        record
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_ca(mut self, ca: impl Into<String>) -> Self {
        self.ca = Some(ca.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderModel {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_validator(
        mut self,
        expression: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.validate = Some(ValidatorModel {
            expression: expression.into(),
            action: action.into(),
        });
        self
    }
}

/// Custom HTTP header sent with each delivery
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderModel {
    pub name: String,
    pub value: String,
}

/// Response validation rule
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorModel {
    pub expression: String,
    pub action: String,
}
