//! `flespi_limit` resource
//!
//! A limit is a named set of quota counters that subaccounts point at.
//! Every counter except `api_calls` defaults to `-1`, meaning unlimited.

use crate::client::{FlespiApi, LimitApi};
use crate::error::{Operation, ResourceError, log_failure};
use crate::resource::Resource;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

const RESOURCE: &str = "limit";

/// Value of a counter with no limit
pub const UNLIMITED: i64 = -1;

/// Default blocking duration in seconds
pub const DEFAULT_BLOCKING_DURATION: i64 = 60;

macro_rules! limit_quotas {
    ($($(#[$meta:meta])* $field:ident = $default:expr),+ $(,)?) => {
        /// Quota counters shared by the resource and API models
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct LimitQuotas {
            $($(#[$meta])* pub $field: i64,)+
        }

        impl Default for LimitQuotas {
            fn default() -> Self {
                Self {
                    $($field: $default,)+
                }
            }
        }
    };
}

limit_quotas! {
    /// REST API calls per minute
    api_calls = 20,
    api_traffic = UNLIMITED,

    channels_count = UNLIMITED,
    channel_messages = UNLIMITED,
    channel_storage = UNLIMITED,
    channel_traffic = UNLIMITED,
    channel_connections = UNLIMITED,

    containers_count = UNLIMITED,
    container_storage = UNLIMITED,

    cdns_count = UNLIMITED,
    cdn_storage = UNLIMITED,
    cdn_traffic = UNLIMITED,

    devices_count = UNLIMITED,
    device_storage = UNLIMITED,
    device_media_traffic = UNLIMITED,
    device_media_storage = UNLIMITED,

    streams_count = UNLIMITED,
    stream_storage = UNLIMITED,
    stream_traffic = UNLIMITED,

    modems_count = UNLIMITED,

    mqtt_sessions = UNLIMITED,
    mqtt_messages = UNLIMITED,
    mqtt_session_storage = UNLIMITED,
    mqtt_retained_storage = UNLIMITED,
    mqtt_subscriptions = UNLIMITED,

    sms_count = UNLIMITED,
    tokens_count = UNLIMITED,
    subaccounts_count = UNLIMITED,
    limits_count = UNLIMITED,
    realms_count = UNLIMITED,

    calcs_count = UNLIMITED,
    calcs_storage = UNLIMITED,

    plugins_count = UNLIMITED,
    plugin_traffic = UNLIMITED,
    plugin_buffered_messages = UNLIMITED,

    groups_count = UNLIMITED,

    webhooks_count = UNLIMITED,
    webhook_storage = UNLIMITED,
    webhook_traffic = UNLIMITED,

    grants_count = UNLIMITED,
    identity_providers_count = UNLIMITED,
}

fn default_blocking_duration() -> i64 {
    DEFAULT_BLOCKING_DURATION
}

/// Host-facing limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitResourceModel {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_blocking_duration")]
    pub blocking_duration: i64,
    #[serde(flatten)]
    pub quotas: LimitQuotas,
}

impl LimitResourceModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: String::new(),
            blocking_duration: DEFAULT_BLOCKING_DURATION,
            quotas: LimitQuotas::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quotas(mut self, quotas: LimitQuotas) -> Self {
        self.quotas = quotas;
        self
    }
}

/// Limit as the API sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_blocking_duration")]
    pub blocking_duration: i64,
    #[serde(flatten)]
    pub quotas: LimitQuotas,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

fn is_unassigned(id: &i64) -> bool {
    *id == 0
}

impl From<&LimitResourceModel> for Limit {
    fn from(model: &LimitResourceModel) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            description: model.description.clone(),
            blocking_duration: model.blocking_duration,
            quotas: model.quotas.clone(),
            metadata: BTreeMap::new(),
        }
    }
}

impl From<&Limit> for LimitResourceModel {
    fn from(limit: &Limit) -> Self {
        Self {
            id: limit.id,
            name: limit.name.clone(),
            description: limit.description.clone(),
            blocking_duration: limit.blocking_duration,
            quotas: limit.quotas.clone(),
        }
    }
}

/// Lifecycle handler for limits
pub struct LimitResource<C: ?Sized = dyn FlespiApi> {
    client: Arc<C>,
}

impl<C: LimitApi + ?Sized> LimitResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: ?Sized> Clone for LimitResource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

#[async_trait]
impl<C: LimitApi + ?Sized> Resource for LimitResource<C> {
    type Model = LimitResourceModel;

    const TYPE_SUFFIX: &'static str = RESOURCE;

    async fn create(&self, plan: &LimitResourceModel) -> Result<LimitResourceModel> {
        let created = self
            .client
            .create_limit(&Limit::from(plan))
            .await
            .map_err(ResourceError::api(Operation::Create, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Created flespi limit {} with id {}", created.name, created.id);
        Ok(LimitResourceModel::from(&created))
    }

    async fn read(&self, state: &LimitResourceModel) -> Result<LimitResourceModel> {
        let limit = self
            .client
            .get_limit(state.id)
            .await
            .map_err(ResourceError::api(Operation::Read, RESOURCE))
            .inspect_err(log_failure)?;

        Ok(LimitResourceModel::from(&limit))
    }

    async fn update(&self, plan: &LimitResourceModel) -> Result<LimitResourceModel> {
        self.client
            .update_limit(plan.id, &Limit::from(plan))
            .await
            .map_err(ResourceError::api(Operation::Update, RESOURCE))
            .inspect_err(log_failure)?;

        let updated = self
            .client
            .get_limit(plan.id)
            .await
            .map_err(ResourceError::api(Operation::Read, RESOURCE))
            .inspect_err(log_failure)?;

        Ok(LimitResourceModel::from(&updated))
    }

    async fn delete(&self, state: &LimitResourceModel) -> Result<()> {
        self.client
            .delete_limit(state.id)
            .await
            .map_err(ResourceError::api(Operation::Delete, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Deleted flespi limit {}", state.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_defaults() {
        let model = LimitResourceModel::new("basic");
        assert_eq!(model.description, "");
        assert_eq!(model.blocking_duration, 60);
        assert_eq!(model.quotas.api_calls, 20);
        assert_eq!(model.quotas.devices_count, UNLIMITED);
        assert_eq!(model.quotas.identity_providers_count, UNLIMITED);
    }

    #[test]
    fn test_missing_counters_take_defaults() {
        let model: LimitResourceModel =
            serde_json::from_str(r#"{"name": "small", "devices_count": 10}"#).unwrap();
        assert_eq!(model.quotas.devices_count, 10);
        assert_eq!(model.quotas.api_calls, 20);
        assert_eq!(model.quotas.webhooks_count, UNLIMITED);
        assert_eq!(model.blocking_duration, 60);
    }

    #[test]
    fn test_counters_serialize_flat() {
        let limit = Limit::from(&LimitResourceModel::new("basic"));
        let json = serde_json::to_value(&limit).unwrap();
        assert_eq!(json["api_calls"], 20);
        assert_eq!(json["mqtt_sessions"], -1);
        assert!(json.get("quotas").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_translation_is_identity() {
        let mut quotas = LimitQuotas::default();
        quotas.channels_count = 3;
        let model = LimitResourceModel::new("tiered")
            .with_description("three channels")
            .with_quotas(quotas);

        let limit = Limit::from(&model);
        assert!(limit.metadata.is_empty());
        assert_eq!(LimitResourceModel::from(&limit), model);
    }
}
