//! `flespi_device` resource

use crate::client::{DeviceApi, FlespiApi};
use crate::error::{Operation, ResourceError, log_failure};
use crate::resource::Resource;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

const RESOURCE: &str = "device";

/// Host-facing gateway device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceResourceModel {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub enabled: bool,
    pub device_type_id: i64,
    #[serde(default)]
    pub messages_ttl: i64,
    #[serde(default)]
    pub messages_rotate: i64,
    #[serde(default)]
    pub media_ttl: i64,
    #[serde(default)]
    pub media_rotate: i64,
    /// Device type settings, e.g. `ident`
    #[serde(default)]
    pub configuration: BTreeMap<String, String>,
}

impl DeviceResourceModel {
    pub fn new(name: impl Into<String>, device_type_id: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            enabled: true,
            device_type_id,
            messages_ttl: 0,
            messages_rotate: 0,
            media_ttl: 0,
            media_rotate: 0,
            configuration: BTreeMap::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configuration.insert(key.into(), value.into());
        self
    }
}

/// Device as the API sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: i64,
    pub name: String,
    pub enabled: bool,
    pub device_type_id: i64,
    #[serde(default)]
    pub messages_ttl: i64,
    #[serde(default)]
    pub messages_rotate: i64,
    #[serde(default)]
    pub media_ttl: i64,
    #[serde(default)]
    pub media_rotate: i64,
    #[serde(default)]
    pub configuration: BTreeMap<String, String>,
}

fn is_unassigned(id: &i64) -> bool {
    *id == 0
}

impl From<&DeviceResourceModel> for Device {
    fn from(model: &DeviceResourceModel) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            enabled: model.enabled,
            device_type_id: model.device_type_id,
            messages_ttl: model.messages_ttl,
            messages_rotate: model.messages_rotate,
            media_ttl: model.media_ttl,
            media_rotate: model.media_rotate,
            configuration: model.configuration.clone(),
        }
    }
}

impl From<&Device> for DeviceResourceModel {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id,
            name: device.name.clone(),
            enabled: device.enabled,
            device_type_id: device.device_type_id,
            messages_ttl: device.messages_ttl,
            messages_rotate: device.messages_rotate,
            media_ttl: device.media_ttl,
            media_rotate: device.media_rotate,
            configuration: device.configuration.clone(),
        }
    }
}

/// Lifecycle handler for gateway devices
pub struct DeviceResource<C: ?Sized = dyn FlespiApi> {
    client: Arc<C>,
}

impl<C: DeviceApi + ?Sized> DeviceResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: ?Sized> Clone for DeviceResource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

#[async_trait]
impl<C: DeviceApi + ?Sized> Resource for DeviceResource<C> {
    type Model = DeviceResourceModel;

    const TYPE_SUFFIX: &'static str = RESOURCE;

    async fn create(&self, plan: &DeviceResourceModel) -> Result<DeviceResourceModel> {
        let created = self
            .client
            .create_device(&Device::from(plan))
            .await
            .map_err(ResourceError::api(Operation::Create, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Created flespi device {} with id {}", created.name, created.id);
        Ok(DeviceResourceModel::from(&created))
    }

    async fn read(&self, state: &DeviceResourceModel) -> Result<DeviceResourceModel> {
        let device = self
            .client
            .get_device(state.id)
            .await
            .map_err(ResourceError::api(Operation::Read, RESOURCE))
            .inspect_err(log_failure)?;

        Ok(DeviceResourceModel::from(&device))
    }

    async fn update(&self, plan: &DeviceResourceModel) -> Result<DeviceResourceModel> {
        self.client
            .update_device(plan.id, &Device::from(plan))
            .await
            .map_err(ResourceError::api(Operation::Update, RESOURCE))
            .inspect_err(log_failure)?;

        let updated = self
            .client
            .get_device(plan.id)
            .await
            .map_err(ResourceError::api(Operation::Read, RESOURCE))
            .inspect_err(log_failure)?;

        Ok(DeviceResourceModel::from(&updated))
    }

    async fn delete(&self, state: &DeviceResourceModel) -> Result<()> {
        self.client
            .delete_device(state.id)
            .await
            .map_err(ResourceError::api(Operation::Delete, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Deleted flespi device {}", state.id);
        Ok(())
    }
}
