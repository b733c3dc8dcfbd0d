//! Resource lifecycle trait

use crate::Result;
use async_trait::async_trait;

/// A managed flespi resource
///
/// Each handler translates its resource model to the API model, calls the
/// client and hands back the state the host should persist. Handlers keep no
/// state between calls.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Host-facing model for this resource
    type Model: Send + Sync;

    /// Suffix appended to the provider type name, e.g. `webhook`
    const TYPE_SUFFIX: &'static str;

    /// Full resource type name, e.g. `flespi_webhook`
    fn type_name(&self, provider: &str) -> String {
        format!("{}_{}", provider, Self::TYPE_SUFFIX)
    }

    /// Create the resource and return the state to persist
    async fn create(&self, plan: &Self::Model) -> Result<Self::Model>;

    /// Refresh the persisted state from flespi
    async fn read(&self, state: &Self::Model) -> Result<Self::Model>;

    /// Apply the plan, then re-read the resource by id
    async fn update(&self, plan: &Self::Model) -> Result<Self::Model>;

    /// Delete the resource
    async fn delete(&self, state: &Self::Model) -> Result<()>;
}
