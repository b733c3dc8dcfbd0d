// In-memory flespi API

use async_trait::async_trait;
use flespi_resources::{
    ApiError, ApiResult, Channel, ChannelApi, Device, DeviceApi, Limit, LimitApi, Subaccount,
    SubaccountApi, WebhookApi,
};
use flespi_webhooks::Webhook;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Store {
    next_id: i64,
    webhooks: BTreeMap<i64, Webhook>,
    subaccounts: BTreeMap<i64, Subaccount>,
    limits: BTreeMap<i64, Limit>,
    channels: BTreeMap<i64, Channel>,
    devices: BTreeMap<i64, Device>,
    protocols: BTreeMap<String, i64>,
    calls: Vec<String>,
    failures: HashMap<String, ApiError>,
}

impl Store {
    // Record the call and fire any failure queued for it
    fn enter(&mut self, method: &str) -> ApiResult<()> {
        self.calls.push(method.to_string());
        match self.failures.remove(method) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn resolve_protocol(&self, channel: &mut Channel) -> ApiResult<()> {
        if channel.protocol_id == 0 {
            channel.protocol_id = *self.protocols.get(&channel.protocol_name).ok_or_else(|| {
                ApiError::Rejected(format!("unknown protocol '{}'", channel.protocol_name))
            })?;
        } else if channel.protocol_name.is_empty() {
            if let Some((name, _)) = self
                .protocols
                .iter()
                .find(|(_, id)| **id == channel.protocol_id)
            {
                channel.protocol_name = name.clone();
            }
        }
        Ok(())
    }
}

fn fetch<T: Clone>(map: &BTreeMap<i64, T>, resource: &'static str, id: i64) -> ApiResult<T> {
    map.get(&id)
        .cloned()
        .ok_or(ApiError::NotFound { resource, id })
}

fn replace<T: Clone>(
    map: &mut BTreeMap<i64, T>,
    resource: &'static str,
    id: i64,
    value: T,
) -> ApiResult<T> {
    match map.get_mut(&id) {
        Some(slot) => {
            *slot = value.clone();
            Ok(value)
        }
        None => Err(ApiError::NotFound { resource, id }),
    }
}

fn remove<T>(map: &mut BTreeMap<i64, T>, resource: &'static str, id: i64) -> ApiResult<()> {
    map.remove(&id)
        .map(|_| ())
        .ok_or(ApiError::NotFound { resource, id })
}

/// In-memory stand-in for the flespi REST API
///
/// Assigns ids from a shared counter, keeps every resource in memory and
/// records each call by method name. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryFlespi {
    store: Arc<Mutex<Store>>,
}

impl InMemoryFlespi {
    /// Create an empty API
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a channel protocol the API can resolve by name
    pub async fn with_protocol(self, name: &str, id: i64) -> Self {
        self.store.lock().await.protocols.insert(name.to_string(), id);
        self
    }

    /// Make the next call to `method` fail with `err`
    pub async fn fail_next(&self, method: &str, err: ApiError) {
        self.store
            .lock()
            .await
            .failures
            .insert(method.to_string(), err);
    }

    /// Get all recorded calls
    pub async fn calls(&self) -> Vec<String> {
        self.store.lock().await.calls.clone()
    }

    /// Get the number of calls
    pub async fn call_count(&self) -> usize {
        self.store.lock().await.calls.len()
    }

    /// Check if a method was called
    pub async fn was_called(&self, method: &str) -> bool {
        self.store.lock().await.calls.iter().any(|c| c == method)
    }

    /// Clear all recorded calls
    pub async fn clear_calls(&self) {
        self.store.lock().await.calls.clear();
    }

    pub async fn webhook(&self, id: i64) -> Option<Webhook> {
        self.store.lock().await.webhooks.get(&id).cloned()
    }

    pub async fn subaccount(&self, id: i64) -> Option<Subaccount> {
        self.store.lock().await.subaccounts.get(&id).cloned()
    }

    pub async fn limit(&self, id: i64) -> Option<Limit> {
        self.store.lock().await.limits.get(&id).cloned()
    }

    pub async fn channel(&self, id: i64) -> Option<Channel> {
        self.store.lock().await.channels.get(&id).cloned()
    }

    pub async fn device(&self, id: i64) -> Option<Device> {
        self.store.lock().await.devices.get(&id).cloned()
    }

    /// Change a stored webhook behind the provider's back
    pub async fn edit_webhook<F>(&self, id: i64, edit: F) -> bool
    where
        F: FnOnce(Webhook) -> Webhook,
    {
        let mut store = self.store.lock().await;
        match store.webhooks.remove(&id) {
            Some(webhook) => {
                store.webhooks.insert(id, edit(webhook).with_id(id));
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl WebhookApi for InMemoryFlespi {
    async fn create_webhook(&self, webhook: &Webhook) -> ApiResult<Webhook> {
        let mut store = self.store.lock().await;
        store.enter("create_webhook")?;
        let id = store.assign_id();
        let created = webhook.clone().with_id(id);
        store.webhooks.insert(id, created.clone());
        Ok(created)
    }

    async fn get_webhook(&self, id: i64) -> ApiResult<Webhook> {
        let mut store = self.store.lock().await;
        store.enter("get_webhook")?;
        fetch(&store.webhooks, "webhook", id)
    }

    async fn update_webhook(&self, id: i64, webhook: &Webhook) -> ApiResult<Webhook> {
        let mut store = self.store.lock().await;
        store.enter("update_webhook")?;
        if webhook.id() != 0 {
            return Err(ApiError::Rejected("id is read-only".to_string()));
        }
        replace(&mut store.webhooks, "webhook", id, webhook.clone().with_id(id))
    }

    async fn delete_webhook(&self, id: i64) -> ApiResult<()> {
        let mut store = self.store.lock().await;
        store.enter("delete_webhook")?;
        remove(&mut store.webhooks, "webhook", id)
    }
}

#[async_trait]
impl SubaccountApi for InMemoryFlespi {
    async fn create_subaccount(&self, subaccount: &Subaccount) -> ApiResult<Subaccount> {
        let mut store = self.store.lock().await;
        store.enter("create_subaccount")?;
        if !store.limits.contains_key(&subaccount.limit_id) {
            return Err(ApiError::Rejected(format!(
                "limit {} does not exist",
                subaccount.limit_id
            )));
        }
        let id = store.assign_id();
        let created = Subaccount {
            id,
            ..subaccount.clone()
        };
        store.subaccounts.insert(id, created.clone());
        Ok(created)
    }

    async fn get_subaccount(&self, id: i64) -> ApiResult<Subaccount> {
        let mut store = self.store.lock().await;
        store.enter("get_subaccount")?;
        fetch(&store.subaccounts, "subaccount", id)
    }

    async fn update_subaccount(&self, id: i64, subaccount: &Subaccount) -> ApiResult<Subaccount> {
        let mut store = self.store.lock().await;
        store.enter("update_subaccount")?;
        let updated = Subaccount {
            id,
            ..subaccount.clone()
        };
        replace(&mut store.subaccounts, "subaccount", id, updated)
    }

    async fn delete_subaccount(&self, id: i64) -> ApiResult<()> {
        let mut store = self.store.lock().await;
        store.enter("delete_subaccount")?;
        remove(&mut store.subaccounts, "subaccount", id)
    }
}

#[async_trait]
impl LimitApi for InMemoryFlespi {
    async fn create_limit(&self, limit: &Limit) -> ApiResult<Limit> {
        let mut store = self.store.lock().await;
        store.enter("create_limit")?;
        let id = store.assign_id();
        let created = Limit {
            id,
            ..limit.clone()
        };
        store.limits.insert(id, created.clone());
        Ok(created)
    }

    async fn get_limit(&self, id: i64) -> ApiResult<Limit> {
        let mut store = self.store.lock().await;
        store.enter("get_limit")?;
        fetch(&store.limits, "limit", id)
    }

    async fn update_limit(&self, id: i64, limit: &Limit) -> ApiResult<Limit> {
        let mut store = self.store.lock().await;
        store.enter("update_limit")?;
        let updated = Limit {
            id,
            ..limit.clone()
        };
        replace(&mut store.limits, "limit", id, updated)
    }

    async fn delete_limit(&self, id: i64) -> ApiResult<()> {
        let mut store = self.store.lock().await;
        store.enter("delete_limit")?;
        remove(&mut store.limits, "limit", id)
    }
}

#[async_trait]
impl ChannelApi for InMemoryFlespi {
    async fn create_channel(&self, channel: &Channel) -> ApiResult<Channel> {
        let mut store = self.store.lock().await;
        store.enter("create_channel")?;
        let mut created = channel.clone();
        store.resolve_protocol(&mut created)?;
        created.id = store.assign_id();
        store.channels.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_channel(&self, id: i64) -> ApiResult<Channel> {
        let mut store = self.store.lock().await;
        store.enter("get_channel")?;
        fetch(&store.channels, "channel", id)
    }

    async fn update_channel(&self, id: i64, channel: &Channel) -> ApiResult<Channel> {
        let mut store = self.store.lock().await;
        store.enter("update_channel")?;
        let mut updated = channel.clone();
        updated.id = id;
        store.resolve_protocol(&mut updated)?;
        replace(&mut store.channels, "channel", id, updated)
    }

    async fn delete_channel(&self, id: i64) -> ApiResult<()> {
        let mut store = self.store.lock().await;
        store.enter("delete_channel")?;
        remove(&mut store.channels, "channel", id)
    }
}

#[async_trait]
impl DeviceApi for InMemoryFlespi {
    async fn create_device(&self, device: &Device) -> ApiResult<Device> {
        let mut store = self.store.lock().await;
        store.enter("create_device")?;
        let id = store.assign_id();
        let created = Device {
            id,
            ..device.clone()
        };
        store.devices.insert(id, created.clone());
        Ok(created)
    }

    async fn get_device(&self, id: i64) -> ApiResult<Device> {
        let mut store = self.store.lock().await;
        store.enter("get_device")?;
        fetch(&store.devices, "device", id)
    }

    async fn update_device(&self, id: i64, device: &Device) -> ApiResult<Device> {
        let mut store = self.store.lock().await;
        store.enter("update_device")?;
        let updated = Device {
            id,
            ..device.clone()
        };
        replace(&mut store.devices, "device", id, updated)
    }

    async fn delete_device(&self, id: i64) -> ApiResult<()> {
        let mut store = self.store.lock().await;
        store.enter("delete_device")?;
        remove(&mut store.devices, "device", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use flespi_resources::{to_channel, FlespiApi};

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let api = InMemoryFlespi::new();
        let first = api
            .create_limit(&Limit::from(&fixtures::limit_model()))
            .await
            .unwrap();
        let second = api
            .create_limit(&Limit::from(&fixtures::limit_model()))
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let api = InMemoryFlespi::new();
        let _ = api.get_webhook(42).await;
        assert_eq!(api.call_count().await, 1);
        assert!(api.was_called("get_webhook").await);

        api.clear_calls().await;
        assert_eq!(api.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_resource_is_not_found() {
        let api = InMemoryFlespi::new();
        assert_eq!(
            api.delete_device(3).await,
            Err(ApiError::NotFound {
                resource: "device",
                id: 3
            })
        );
    }

    #[tokio::test]
    async fn test_queued_failure_fires_once() {
        let api = InMemoryFlespi::new();
        api.fail_next("get_limit", ApiError::Unauthorized).await;

        assert_eq!(api.get_limit(1).await, Err(ApiError::Unauthorized));
        assert!(matches!(
            api.get_limit(1).await,
            Err(ApiError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_protocol_name_is_resolved() {
        let api = InMemoryFlespi::new().with_protocol("teltonika", 9).await;
        let channel = to_channel(&fixtures::channel_model()).unwrap();

        let created = api.create_channel(&channel).await.unwrap();
        assert_eq!(created.protocol_id, 9);
    }

    #[tokio::test]
    async fn test_webhook_update_refuses_id_in_body() {
        let api = InMemoryFlespi::new();
        let webhook = flespi_webhooks::to_webhook(&fixtures::single_webhook_model()).unwrap();
        let created = api.create_webhook(&webhook).await.unwrap();

        assert!(matches!(
            api.update_webhook(created.id(), &created).await,
            Err(ApiError::Rejected(_))
        ));
        let updated = api
            .update_webhook(created.id(), &created.clone().with_id(0))
            .await
            .unwrap();
        assert_eq!(updated.id(), created.id());
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let api: Arc<dyn FlespiApi> = Arc::new(InMemoryFlespi::new());
        assert!(api.get_channel(1).await.is_err());
    }
}
