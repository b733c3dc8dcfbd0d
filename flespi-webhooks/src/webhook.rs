//! Webhook API model

use crate::{Configuration, WebhookKind};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A flespi webhook
///
/// On the wire the two variants differ only in the shape of
/// `configuration`: an object for [`SingleWebhook`], an array for
/// [`ChainedWebhook`]. A document matching neither fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Webhook {
    Single(SingleWebhook),
    Chained(ChainedWebhook),
}

impl Webhook {
    /// Get the variant tag
    pub fn kind(&self) -> WebhookKind {
        match self {
            Self::Single(_) => WebhookKind::Single,
            Self::Chained(_) => WebhookKind::Chained,
        }
    }

    /// Remote identifier, zero when not yet created
    pub fn id(&self) -> i64 {
        match self {
            Self::Single(wh) => wh.id,
            Self::Chained(wh) => wh.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Single(wh) => &wh.name,
            Self::Chained(wh) => &wh.name,
        }
    }

    pub fn triggers(&self) -> &[Trigger] {
        match self {
            Self::Single(wh) => &wh.triggers,
            Self::Chained(wh) => &wh.triggers,
        }
    }

    /// Delivery configurations in pipeline order
    pub fn configurations(&self) -> &[Configuration] {
        match self {
            Self::Single(wh) => std::slice::from_ref(&wh.configuration),
            Self::Chained(wh) => &wh.configuration,
        }
    }

    /// Return a copy carrying the given identifier
    pub fn with_id(self, id: i64) -> Self {
        match self {
            Self::Single(wh) => Self::Single(SingleWebhook { id, ..wh }),
            Self::Chained(wh) => Self::Chained(ChainedWebhook { id, ..wh }),
        }
    }
}

impl From<SingleWebhook> for Webhook {
    fn from(webhook: SingleWebhook) -> Self {
        Self::Single(webhook)
    }
}

impl From<ChainedWebhook> for Webhook {
    fn from(webhook: ChainedWebhook) -> Self {
        Self::Chained(webhook)
    }
}

/// Webhook with exactly one delivery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleWebhook {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub triggers: Vec<Trigger>,

    pub configuration: Configuration,
}

impl SingleWebhook {
    pub fn new(name: impl Into<String>, configuration: impl Into<Configuration>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            triggers: Vec::new(),
            configuration: configuration.into(),
        }
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }
}

/// Webhook delivering through an ordered pipeline of configurations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainedWebhook {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub triggers: Vec<Trigger>,

    #[serde(deserialize_with = "non_empty_pipeline")]
    pub configuration: Vec<Configuration>,
}

// A chained webhook always has at least one stage
fn non_empty_pipeline<'de, D>(deserializer: D) -> Result<Vec<Configuration>, D::Error>
where
    D: Deserializer<'de>,
{
    let stages = Vec::<Configuration>::deserialize(deserializer)?;
    if stages.is_empty() {
        return Err(de::Error::invalid_length(0, &"at least one configuration"));
    }
    Ok(stages)
}

impl ChainedWebhook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            triggers: Vec::new(),
            configuration: Vec::new(),
        }
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Append a stage to the pipeline
    pub fn with_stage(mut self, configuration: impl Into<Configuration>) -> Self {
        self.configuration.push(configuration.into());
        self
    }
}

/// Event topic subscription
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trigger {
    pub topic: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<TriggerFilter>,
}

impl Trigger {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, cid: i64, payload: impl Into<String>) -> Self {
        self.filter = Some(TriggerFilter {
            cid,
            payload: payload.into(),
        });
        self
    }
}

/// Restricts a trigger to one connection and a payload expression
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriggerFilter {
    #[serde(default)]
    pub cid: i64,
    pub payload: String,
}

fn is_unassigned(id: &i64) -> bool {
    *id == 0
}
