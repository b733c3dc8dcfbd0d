//! Resource lifecycle handlers for the flespi provider
//!
//! Each managed resource type (`flespi_webhook`, `flespi_limit`,
//! `flespi_subaccount`, `flespi_channel`, `flespi_device`) has a handler that
//! implements [`Resource`]: it converts the host's resource model to the API
//! model, calls a [`FlespiApi`] client and returns the state to persist.
//! Failures come back as [`ResourceError`], which renders into host-facing
//! [`Diagnostics`].
//!
//! ```no_run
//! use flespi_config::ProviderConfig;
//! use flespi_resources::{FlespiApi, FlespiProvider, Resource};
//! use flespi_webhooks::model::{ConfigurationRecord, WebhookResourceModel};
//! use std::sync::Arc;
//!
//! # async fn run(client: Arc<impl FlespiApi + 'static>) -> Result<(), Box<dyn std::error::Error>> {
//! let provider = FlespiProvider::new(env!("CARGO_PKG_VERSION"));
//! let configured = provider
//!     .configure(&ProviderConfig::from_env()?, client)
//!     .map_err(|diags| format!("{:?}", diags))?;
//!
//! let plan = WebhookResourceModel::new("alerts", "single-webhook").with_configuration(
//!     ConfigurationRecord::custom_server("https://example.com/alerts", "POST"),
//! );
//! let state = configured.webhooks().create(&plan).await?;
//! println!("created webhook {}", state.id);
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod client;
pub mod device;
pub mod diagnostics;
mod error;
pub mod limit;
pub mod provider;
mod resource;
pub mod subaccount;
pub mod webhook;

pub use channel::{Channel, ChannelResource, ChannelResourceModel, to_channel, to_channel_model};
pub use client::{
    ApiError, ApiResult, ChannelApi, DeviceApi, FlespiApi, LimitApi, SubaccountApi, WebhookApi,
};
pub use device::{Device, DeviceResource, DeviceResourceModel};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Operation, ResourceError, Result};
pub use limit::{Limit, LimitQuotas, LimitResource, LimitResourceModel};
pub use provider::{ConfiguredProvider, FlespiProvider, PROVIDER_TYPE_NAME};
pub use resource::Resource;
pub use subaccount::{Subaccount, SubaccountResource, SubaccountResourceModel};
pub use webhook::WebhookResource;
