// flespi-provider - Declarative resource management for the flespi IoT platform
//
// This library ties together the webhook model translation, the resource
// lifecycle handlers and the provider configuration and logging layers.

// Re-export the provider surface
pub use flespi_resources::*;

// Re-export the webhook models and translators
pub use flespi_webhooks::{
    ChainedWebhook, Configuration, ConfigurationType, CustomServerConfiguration, Header,
    PlatformConfiguration, SingleWebhook, TranslateError, Trigger, TriggerFilter, Validator,
    Webhook, WebhookKind, model, to_configuration, to_configuration_record, to_resource_model,
    to_webhook,
};

pub use async_trait::async_trait;

// Re-export optional crates
#[cfg(feature = "config")]
pub use flespi_config;

#[cfg(feature = "log")]
pub use flespi_log;

#[cfg(feature = "testing")]
pub use flespi_testing;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ApiError,
        ApiResult,
        ChannelApi,
        DeviceApi,
        Diagnostics,
        FlespiApi,
        FlespiProvider,
        LimitApi,
        Resource,
        ResourceError,
        SubaccountApi,
        // Webhook models
        Webhook,
        WebhookApi,
        WebhookKind,
        async_trait,
        to_resource_model,
        to_webhook,
    };

    #[cfg(feature = "config")]
    pub use flespi_config::ProviderConfig;
}
