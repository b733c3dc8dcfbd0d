//! flespi API client seam
//!
//! The lifecycle handlers talk to flespi only through these traits. A REST
//! client implements them in production; tests use an in-memory double.

use crate::channel::Channel;
use crate::device::Device;
use crate::limit::Limit;
use crate::subaccount::Subaccount;
use async_trait::async_trait;
use flespi_webhooks::Webhook;
use thiserror::Error;

/// Result type for API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors reported by an API client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// The API answered with an error
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The request never got an answer
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unauthorized")]
    Unauthorized,
}

/// Platform webhooks
#[async_trait]
pub trait WebhookApi: Send + Sync {
    async fn create_webhook(&self, webhook: &Webhook) -> ApiResult<Webhook>;

    async fn get_webhook(&self, id: i64) -> ApiResult<Webhook>;

    async fn update_webhook(&self, id: i64, webhook: &Webhook) -> ApiResult<Webhook>;

    async fn delete_webhook(&self, id: i64) -> ApiResult<()>;
}

/// Platform subaccounts
#[async_trait]
pub trait SubaccountApi: Send + Sync {
    async fn create_subaccount(&self, subaccount: &Subaccount) -> ApiResult<Subaccount>;

    async fn get_subaccount(&self, id: i64) -> ApiResult<Subaccount>;

    async fn update_subaccount(&self, id: i64, subaccount: &Subaccount) -> ApiResult<Subaccount>;

    async fn delete_subaccount(&self, id: i64) -> ApiResult<()>;
}

/// Platform limits
#[async_trait]
pub trait LimitApi: Send + Sync {
    async fn create_limit(&self, limit: &Limit) -> ApiResult<Limit>;

    async fn get_limit(&self, id: i64) -> ApiResult<Limit>;

    async fn update_limit(&self, id: i64, limit: &Limit) -> ApiResult<Limit>;

    async fn delete_limit(&self, id: i64) -> ApiResult<()>;
}

/// Gateway channels
#[async_trait]
pub trait ChannelApi: Send + Sync {
    async fn create_channel(&self, channel: &Channel) -> ApiResult<Channel>;

    async fn get_channel(&self, id: i64) -> ApiResult<Channel>;

    async fn update_channel(&self, id: i64, channel: &Channel) -> ApiResult<Channel>;

    async fn delete_channel(&self, id: i64) -> ApiResult<()>;
}

/// Gateway devices
#[async_trait]
pub trait DeviceApi: Send + Sync {
    async fn create_device(&self, device: &Device) -> ApiResult<Device>;

    async fn get_device(&self, id: i64) -> ApiResult<Device>;

    async fn update_device(&self, id: i64, device: &Device) -> ApiResult<Device>;

    async fn delete_device(&self, id: i64) -> ApiResult<()>;
}

/// Everything the provider needs from flespi
pub trait FlespiApi: WebhookApi + SubaccountApi + LimitApi + ChannelApi + DeviceApi {}

impl<T> FlespiApi for T where T: WebhookApi + SubaccountApi + LimitApi + ChannelApi + DeviceApi {}
