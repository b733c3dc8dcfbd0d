//! `flespi_subaccount` resource

use crate::client::{FlespiApi, SubaccountApi};
use crate::error::{Operation, ResourceError, log_failure};
use crate::resource::Resource;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

const RESOURCE: &str = "subaccount";

/// Host-facing subaccount
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubaccountResourceModel {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub limit_id: i64,
}

impl SubaccountResourceModel {
    pub fn new(name: impl Into<String>, limit_id: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            limit_id,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}

/// Subaccount as the API sees it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subaccount {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: i64,
    pub name: String,
    pub limit_id: i64,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

fn is_unassigned(id: &i64) -> bool {
    *id == 0
}

// Metadata is not managed; it is always written empty.
impl From<&SubaccountResourceModel> for Subaccount {
    fn from(model: &SubaccountResourceModel) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            limit_id: model.limit_id,
            metadata: BTreeMap::new(),
        }
    }
}

impl From<&Subaccount> for SubaccountResourceModel {
    fn from(subaccount: &Subaccount) -> Self {
        Self {
            id: subaccount.id,
            name: subaccount.name.clone(),
            limit_id: subaccount.limit_id,
        }
    }
}

/// Lifecycle handler for subaccounts
pub struct SubaccountResource<C: ?Sized = dyn FlespiApi> {
    client: Arc<C>,
}

impl<C: SubaccountApi + ?Sized> SubaccountResource<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: ?Sized> Clone for SubaccountResource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

#[async_trait]
impl<C: SubaccountApi + ?Sized> Resource for SubaccountResource<C> {
    type Model = SubaccountResourceModel;

    const TYPE_SUFFIX: &'static str = RESOURCE;

    async fn create(&self, plan: &SubaccountResourceModel) -> Result<SubaccountResourceModel> {
        let created = self
            .client
            .create_subaccount(&Subaccount::from(plan))
            .await
            .map_err(ResourceError::api(Operation::Create, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Created flespi subaccount {} with id {}", created.name, created.id);
        Ok(SubaccountResourceModel::from(&created))
    }

    async fn read(&self, state: &SubaccountResourceModel) -> Result<SubaccountResourceModel> {
        let subaccount = self
            .client
            .get_subaccount(state.id)
            .await
            .map_err(ResourceError::api(Operation::Read, RESOURCE))
            .inspect_err(log_failure)?;

        Ok(SubaccountResourceModel::from(&subaccount))
    }

    async fn update(&self, plan: &SubaccountResourceModel) -> Result<SubaccountResourceModel> {
        self.client
            .update_subaccount(plan.id, &Subaccount::from(plan))
            .await
            .map_err(ResourceError::api(Operation::Update, RESOURCE))
            .inspect_err(log_failure)?;

        let updated = self
            .client
            .get_subaccount(plan.id)
            .await
            .map_err(ResourceError::api(Operation::Read, RESOURCE))
            .inspect_err(log_failure)?;

        Ok(SubaccountResourceModel::from(&updated))
    }

    async fn delete(&self, state: &SubaccountResourceModel) -> Result<()> {
        self.client
            .delete_subaccount(state.id)
            .await
            .map_err(ResourceError::api(Operation::Delete, RESOURCE))
            .inspect_err(log_failure)?;

        info!("Deleted flespi subaccount {}", state.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_is_written_empty() {
        let model = SubaccountResourceModel::new("fleet-a", 12);
        let subaccount = Subaccount::from(&model);
        assert!(subaccount.metadata.is_empty());
        assert_eq!(subaccount.limit_id, 12);
    }

    #[test]
    fn test_metadata_is_dropped_on_read() {
        let mut subaccount = Subaccount {
            id: 7,
            name: "fleet-a".to_string(),
            limit_id: 12,
            metadata: BTreeMap::new(),
        };
        subaccount.metadata.insert("owner".to_string(), "ops".to_string());

        let model = SubaccountResourceModel::from(&subaccount);
        assert_eq!(model, SubaccountResourceModel::new("fleet-a", 12).with_id(7));
    }

    #[test]
    fn test_unassigned_id_is_not_sent() {
        let json = serde_json::to_value(Subaccount::from(&SubaccountResourceModel::new("a", 1)))
            .unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["metadata"], serde_json::json!({}));
    }
}
