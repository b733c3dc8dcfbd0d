//! `flespi_webhook` resource

use crate::client::{FlespiApi, WebhookApi};
use crate::error::{Operation, ResourceError, log_failure};
use crate::resource::Resource;
use crate::Result;
use async_trait::async_trait;
use flespi_webhooks::model::WebhookResourceModel;
use flespi_webhooks::{to_resource_model, to_webhook};
use std::sync::Arc;
use tracing::{debug, info};

const RESOURCE: &str = "webhook";

/// Lifecycle handler for platform webhooks
pub struct WebhookResource<C: ?Sized = dyn FlespiApi> {
    client: Arc<C>,
}

impl<C: WebhookApi + ?Sized> WebhookResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: ?Sized> Clone for WebhookResource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

#[async_trait]
impl<C: WebhookApi + ?Sized> Resource for WebhookResource<C> {
    type Model = WebhookResourceModel;

    const TYPE_SUFFIX: &'static str = RESOURCE;

    async fn create(&self, plan: &WebhookResourceModel) -> Result<WebhookResourceModel> {
        let webhook = to_webhook(plan)
            .map_err(ResourceError::from)
            .inspect_err(log_failure)?;

        debug!("Creating flespi webhook {} ({})", plan.name, webhook.kind());

        let created = self
            .client
            .create_webhook(&webhook)
            .await
            .map_err(ResourceError::api(Operation::Create, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Created flespi webhook {} with id {}", created.name(), created.id());
        Ok(to_resource_model(&created))
    }

    async fn read(&self, state: &WebhookResourceModel) -> Result<WebhookResourceModel> {
        let webhook = self
            .client
            .get_webhook(state.id)
            .await
            .map_err(ResourceError::api(Operation::Read, RESOURCE))
            .inspect_err(log_failure)?;

        Ok(to_resource_model(&webhook))
    }

    async fn update(&self, plan: &WebhookResourceModel) -> Result<WebhookResourceModel> {
        // The id travels in the path only
        let webhook = to_webhook(plan)
            .map_err(ResourceError::from)
            .inspect_err(log_failure)?
            .with_id(0);

        debug!("Updating flespi webhook {}", plan.id);

        self.client
            .update_webhook(plan.id, &webhook)
            .await
            .map_err(ResourceError::api(Operation::Update, RESOURCE))
            .inspect_err(log_failure)?;

        let updated = self
            .client
            .get_webhook(plan.id)
            .await
            .map_err(ResourceError::api(Operation::Read, RESOURCE))
            .inspect_err(log_failure)?;

        Ok(to_resource_model(&updated))
    }

    async fn delete(&self, state: &WebhookResourceModel) -> Result<()> {
        self.client
            .delete_webhook(state.id)
            .await
            .map_err(ResourceError::api(Operation::Delete, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Deleted flespi webhook {}", state.id);
        Ok(())
    }
}
