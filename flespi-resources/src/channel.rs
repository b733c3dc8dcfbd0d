//! `flespi_channel` resource
//!
//! The channel configuration is kept as JSON text on the host side and as a
//! JSON object on the API side.

use crate::client::{ChannelApi, FlespiApi};
use crate::error::{Operation, ResourceError, log_failure};
use crate::resource::Resource;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

const RESOURCE: &str = "channel";

/// Host-facing gateway channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelResourceModel {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub enabled: bool,
    #[serde(default)]
    pub protocol_id: i64,
    #[serde(default)]
    pub protocol_name: String,
    #[serde(default)]
    pub messages_ttl: i64,
    /// Protocol configuration as JSON text
    #[serde(default = "empty_object")]
    pub configuration: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

fn empty_object() -> String {
    "{}".to_string()
}

impl ChannelResourceModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            enabled: true,
            protocol_id: 0,
            protocol_name: String::new(),
            messages_ttl: 0,
            configuration: empty_object(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_protocol_id(mut self, protocol_id: i64) -> Self {
        self.protocol_id = protocol_id;
        self
    }

    pub fn with_protocol_name(mut self, protocol_name: impl Into<String>) -> Self {
        self.protocol_name = protocol_name.into();
        self
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = configuration.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// A channel is created by protocol id or, failing that, by protocol name
    pub fn has_protocol(&self) -> bool {
        self.protocol_id != 0 || !self.protocol_name.is_empty()
    }
}

/// Channel as the API sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: i64,
    pub name: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub protocol_id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol_name: String,
    #[serde(default)]
    pub messages_ttl: i64,
    #[serde(default)]
    pub configuration: Map<String, Value>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

fn is_unassigned(id: &i64) -> bool {
    *id == 0
}

/// Parse the host model into the API model
pub fn to_channel(model: &ChannelResourceModel) -> Result<Channel> {
    Ok(Channel {
        id: model.id,
        name: model.name.clone(),
        enabled: model.enabled,
        protocol_id: model.protocol_id,
        protocol_name: model.protocol_name.clone(),
        messages_ttl: model.messages_ttl,
        configuration: parse_configuration(&model.configuration)?,
        metadata: model.metadata.clone(),
    })
}

/// Render the API model for the host
pub fn to_channel_model(channel: &Channel) -> Result<ChannelResourceModel> {
    let configuration = serde_json::to_string(&channel.configuration).map_err(|e| {
        ResourceError::Conversion(format!("Unable to marshal channel configuration: {}", e))
    })?;

    Ok(ChannelResourceModel {
        id: channel.id,
        name: channel.name.clone(),
        enabled: channel.enabled,
        protocol_id: channel.protocol_id,
        protocol_name: channel.protocol_name.clone(),
        messages_ttl: channel.messages_ttl,
        configuration,
        metadata: channel.metadata.clone(),
    })
}

// Blank text means no configuration
fn parse_configuration(text: &str) -> Result<Map<String, Value>> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ResourceError::Conversion(format!(
            "Channel configuration must be a JSON object, got: {}",
            other
        ))),
        Err(e) => Err(ResourceError::Conversion(format!(
            "Unable to unmarshal channel configuration: {}",
            e
        ))),
    }
}

/// Lifecycle handler for gateway channels
pub struct ChannelResource<C: ?Sized = dyn FlespiApi> {
    client: Arc<C>,
}

impl<C: ChannelApi + ?Sized> ChannelResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    async fn fetch(&self, id: i64) -> Result<ChannelResourceModel> {
        let channel = self
            .client
            .get_channel(id)
            .await
            .map_err(ResourceError::api(Operation::Read, RESOURCE))
            .inspect_err(log_failure)?;

        to_channel_model(&channel).inspect_err(log_failure)
    }
}

impl<C: ?Sized> Clone for ChannelResource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

#[async_trait]
impl<C: ChannelApi + ?Sized> Resource for ChannelResource<C> {
    type Model = ChannelResourceModel;

    const TYPE_SUFFIX: &'static str = RESOURCE;

    async fn create(&self, plan: &ChannelResourceModel) -> Result<ChannelResourceModel> {
        if !plan.has_protocol() {
            let err = ResourceError::Configuration("Protocol not specified for channel".to_string());
            log_failure(&err);
            return Err(err);
        }

        let channel = to_channel(plan).inspect_err(log_failure)?;
        debug!("Creating flespi channel {}", plan.name);

        let created = self
            .client
            .create_channel(&channel)
            .await
            .map_err(ResourceError::api(Operation::Create, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Created flespi channel {} with id {}", created.name, created.id);

        // The API fills protocol fields on create; persist what it reports
        self.fetch(created.id).await
    }

    async fn read(&self, state: &ChannelResourceModel) -> Result<ChannelResourceModel> {
        self.fetch(state.id).await
    }

    async fn update(&self, plan: &ChannelResourceModel) -> Result<ChannelResourceModel> {
        let channel = to_channel(plan).inspect_err(log_failure)?;

        self.client
            .update_channel(plan.id, &channel)
            .await
            .map_err(ResourceError::api(Operation::Update, RESOURCE))
            .inspect_err(log_failure)?;

        self.fetch(plan.id).await
    }

    async fn delete(&self, state: &ChannelResourceModel) -> Result<()> {
        self.client
            .delete_channel(state.id)
            .await
            .map_err(ResourceError::api(Operation::Delete, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Deleted flespi channel {}", state.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_is_parsed_into_object() {
        let model = ChannelResourceModel::new("telematics")
            .with_protocol_name("teltonika")
            .with_configuration(r#"{"host": "0.0.0.0", "port": 5000}"#);

        let channel = to_channel(&model).unwrap();
        assert_eq!(channel.configuration["port"], 5000);
        assert_eq!(channel.protocol_name, "teltonika");
    }

    #[test]
    fn test_blank_configuration_is_empty_object() {
        let model = ChannelResourceModel::new("c").with_configuration("  ");
        assert!(to_channel(&model).unwrap().configuration.is_empty());
    }

    #[test]
    fn test_invalid_configuration_is_a_conversion_error() {
        let model = ChannelResourceModel::new("c").with_configuration("{not json");
        assert!(matches!(to_channel(&model), Err(ResourceError::Conversion(_))));

        let model = ChannelResourceModel::new("c").with_configuration("[1, 2]");
        assert!(matches!(to_channel(&model), Err(ResourceError::Conversion(_))));
    }

    #[test]
    fn test_configuration_is_reserialized() {
        let model = ChannelResourceModel::new("c")
            .with_protocol_id(9)
            .with_configuration(r#"{ "port" : 5000 }"#)
            .with_metadata("team", "fleet");

        let back = to_channel_model(&to_channel(&model).unwrap()).unwrap();
        assert_eq!(back.configuration, r#"{"port":5000}"#);
        assert_eq!(back.metadata.get("team").map(String::as_str), Some("fleet"));
        assert_eq!(back.protocol_id, 9);
    }

    #[test]
    fn test_protocol_presence() {
        assert!(!ChannelResourceModel::new("c").has_protocol());
        assert!(ChannelResourceModel::new("c").with_protocol_id(1).has_protocol());
        assert!(ChannelResourceModel::new("c").with_protocol_name("http").has_protocol());
    }

    #[test]
    fn test_unset_protocol_fields_are_not_sent() {
        let channel = to_channel(&ChannelResourceModel::new("c").with_protocol_name("http")).unwrap();
        let json = serde_json::to_value(&channel).unwrap();
        assert!(json.get("protocol_id").is_none());
        assert_eq!(json["protocol_name"], "http");
    }
}
