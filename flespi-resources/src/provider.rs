//! Provider entry point

use crate::channel::ChannelResource;
use crate::client::FlespiApi;
use crate::device::DeviceResource;
use crate::diagnostics::Diagnostics;
use crate::limit::LimitResource;
use crate::resource::Resource;
use crate::subaccount::SubaccountResource;
use crate::webhook::WebhookResource;
use flespi_config::{ConfigValidator, ProviderConfig};
use std::sync::Arc;
use tracing::info;

/// Type name the host registers the provider under
pub const PROVIDER_TYPE_NAME: &str = "flespi";

/// The flespi provider before configuration
#[derive(Debug, Clone)]
pub struct FlespiProvider {
    version: String,
}

impl FlespiProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Resource type names this provider manages
    pub fn resource_types(&self) -> Vec<String> {
        [
            <LimitResource as Resource>::TYPE_SUFFIX,
            <SubaccountResource as Resource>::TYPE_SUFFIX,
            <WebhookResource as Resource>::TYPE_SUFFIX,
            <DeviceResource as Resource>::TYPE_SUFFIX,
            <ChannelResource as Resource>::TYPE_SUFFIX,
        ]
        .iter()
        .map(|suffix| format!("{}_{}", PROVIDER_TYPE_NAME, suffix))
        .collect()
    }

    /// Check the settings and bind the provider to an API client
    pub fn configure<C>(
        &self,
        config: &ProviderConfig,
        client: Arc<C>,
    ) -> Result<ConfiguredProvider, Diagnostics>
    where
        C: FlespiApi + 'static,
    {
        let mut diags = Diagnostics::new();

        if config.token.trim().is_empty() {
            diags.add_error(
                "Missing Flespi Token",
                "We cannot create API client without token",
            );
        }

        if let Err(e) = ConfigValidator::is_url(&config.url, "url") {
            diags.add_error("Invalid Flespi URL", e.to_string());
        }

        if diags.has_error() {
            return Err(diags);
        }

        info!(
            "Configured flespi provider {} against {}",
            self.version, config.url
        );

        Ok(ConfiguredProvider {
            url: config.url.clone(),
            client,
        })
    }
}

/// A provider bound to a client; hands out resource handlers
#[derive(Clone)]
pub struct ConfiguredProvider {
    url: String,
    client: Arc<dyn FlespiApi>,
}

impl ConfiguredProvider {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn client(&self) -> Arc<dyn FlespiApi> {
        Arc::clone(&self.client)
    }

    pub fn webhooks(&self) -> WebhookResource {
        WebhookResource::new(self.client())
    }

    pub fn subaccounts(&self) -> SubaccountResource {
        SubaccountResource::new(self.client())
    }

    pub fn limits(&self) -> LimitResource {
        LimitResource::new(self.client())
    }

    pub fn channels(&self) -> ChannelResource {
        ChannelResource::new(self.client())
    }

    pub fn devices(&self) -> DeviceResource {
        DeviceResource::new(self.client())
    }
}
