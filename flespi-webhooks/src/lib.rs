//! flespi webhook model translation
//!
//! This crate converts between two views of a flespi webhook:
//!
//! - the flat **resource model** ([`model::WebhookResourceModel`]) that a
//!   declarative host stores, where every configuration record carries the
//!   fields of every configuration variant side by side, and
//! - the **API model** ([`Webhook`]), a closed sum type of single and chained
//!   webhooks over [`Configuration`] variants for custom servers and platform
//!   routes.
//!
//! # Features
//!
//! - **Tag dispatch**: `type` tags select the variant, nothing else does
//! - **Strict variants**: data that belongs to another variant is rejected
//! - **Order preserving**: triggers, configurations and headers keep their order
//! - **Pure**: no I/O, no shared state, safe to call from any thread
//!
//! # Example
//!
//! ```rust
//! use flespi_webhooks::model::{ConfigurationRecord, TriggerModel, WebhookResourceModel};
//! use flespi_webhooks::{to_resource_model, to_webhook, WebhookKind};
//!
//! let model = WebhookResourceModel::new("device-events", "single-webhook")
//!     .with_trigger(TriggerModel::new("flespi/message/gw/devices/+"))
//!     .with_configuration(
//!         ConfigurationRecord::custom_server("https://example.com/hook", "POST")
//!             .with_header("Authorization", "Bearer abc"),
//!     );
//!
//! let webhook = to_webhook(&model)?;
//! assert_eq!(webhook.kind(), WebhookKind::Single);
//!
//! // And back again
//! assert_eq!(to_resource_model(&webhook), model);
//! # Ok::<(), flespi_webhooks::TranslateError>(())
//! ```

mod configuration;
mod error;
mod kind;
pub mod model;
mod translate;
mod webhook;

pub use configuration::{
    Configuration, CustomServerConfiguration, Header, PlatformConfiguration, Validator,
};
pub use error::TranslateError;
pub use kind::{ConfigurationType, WebhookKind};
pub use translate::{to_configuration, to_configuration_record, to_resource_model, to_webhook};
pub use webhook::{ChainedWebhook, SingleWebhook, Trigger, TriggerFilter, Webhook};

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslateError>;
