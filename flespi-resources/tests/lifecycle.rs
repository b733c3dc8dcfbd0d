//! Lifecycle tests against the in-memory flespi API

use flespi_resources::*;
use flespi_testing::{fixtures, InMemoryFlespi};
use flespi_webhooks::model::ConfigurationRecord;
use flespi_webhooks::{ChainedWebhook, Configuration, Webhook, WebhookKind};
use std::sync::Arc;

// ========== Webhooks ==========

#[tokio::test]
async fn test_webhook_create_persists_returned_instance() {
    let api = Arc::new(InMemoryFlespi::new());
    let webhooks = WebhookResource::new(api.clone());
    let plan = fixtures::single_webhook_model();

    let state = webhooks.create(&plan).await.unwrap();

    assert_eq!(state.id, 1);
    assert_eq!(state.name, plan.name);
    assert_eq!(state.configurations, plan.configurations);
    assert_eq!(api.webhook(1).await.map(|w| w.kind()), Some(WebhookKind::Single));
}

#[tokio::test]
async fn test_chained_webhook_lifecycle() {
    let api = Arc::new(InMemoryFlespi::new());
    let webhooks = WebhookResource::new(api.clone());

    let state = webhooks.create(&fixtures::chained_webhook_model()).await.unwrap();
    assert_eq!(state.kind, "chained-webhook");
    assert_eq!(state.configurations.len(), 2);
    assert_eq!(state.configurations[1].cid.as_deref(), Some("12345"));

    let stored = api.webhook(state.id).await.unwrap();
    assert!(matches!(stored.configurations()[1], Configuration::Platform(_)));

    let read = webhooks.read(&state).await.unwrap();
    assert_eq!(read, state);

    webhooks.delete(&state).await.unwrap();
    assert!(api.webhook(state.id).await.is_none());
}

#[tokio::test]
async fn test_webhook_update_rereads_by_id() {
    let api = Arc::new(InMemoryFlespi::new());
    let webhooks = WebhookResource::new(api.clone());
    let state = webhooks.create(&fixtures::single_webhook_model()).await.unwrap();

    let mut plan = state.clone();
    plan.configurations[0] =
        ConfigurationRecord::custom_server("https://example.com/hooks/v2", "PUT");

    api.clear_calls().await;
    let updated = webhooks.update(&plan).await.unwrap();

    assert_eq!(updated.id, state.id);
    assert_eq!(updated.configurations[0].uri, "https://example.com/hooks/v2");
    assert_eq!(
        api.calls().await,
        vec!["update_webhook".to_string(), "get_webhook".to_string()]
    );
}

#[tokio::test]
async fn test_webhook_read_picks_up_remote_changes() {
    let api = Arc::new(InMemoryFlespi::new());
    let webhooks = WebhookResource::new(api.clone());
    let state = webhooks.create(&fixtures::single_webhook_model()).await.unwrap();

    let edited = api
        .edit_webhook(state.id, |_| {
            ChainedWebhook::new("replaced")
                .with_stage(flespi_webhooks::CustomServerConfiguration::new(
                    "https://example.com/other",
                    "GET",
                ))
                .into()
        })
        .await;
    assert!(edited);

    let read = webhooks.read(&state).await.unwrap();
    assert_eq!(read.kind, "chained-webhook");
    assert_eq!(read.name, "replaced");
    assert_eq!(read.id, state.id);
}

#[tokio::test]
async fn test_invalid_webhook_never_reaches_api() {
    let api = Arc::new(InMemoryFlespi::new());
    let webhooks = WebhookResource::new(api.clone());

    let mut plan = fixtures::single_webhook_model();
    plan.kind = "webhook".to_string();

    let err = webhooks.create(&plan).await.unwrap_err();
    assert!(matches!(err, ResourceError::Translate(_)));
    assert_eq!(api.call_count().await, 0);
}

#[tokio::test]
async fn test_webhook_api_failure_becomes_diagnostic() {
    let api = Arc::new(InMemoryFlespi::new());
    let webhooks = WebhookResource::new(api.clone());
    api.fail_next("create_webhook", ApiError::Rejected("quota exceeded".to_string()))
        .await;

    let err = webhooks
        .create(&fixtures::single_webhook_model())
        .await
        .unwrap_err();
    let diag = err.to_diagnostic();

    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.summary, "Error Creating Flespi Webhook");
    assert!(diag.detail.contains("quota exceeded"));
}

#[tokio::test]
async fn test_read_of_deleted_webhook_fails() {
    let api = Arc::new(InMemoryFlespi::new());
    let webhooks = WebhookResource::new(api.clone());
    let state = webhooks.create(&fixtures::single_webhook_model()).await.unwrap();
    webhooks.delete(&state).await.unwrap();

    let err = webhooks.read(&state).await.unwrap_err();
    assert!(matches!(
        err,
        ResourceError::Api {
            operation: Operation::Read,
            source: ApiError::NotFound { .. },
            ..
        }
    ));
}

// ========== Limits and subaccounts ==========

#[tokio::test]
async fn test_limit_lifecycle() {
    let api = Arc::new(InMemoryFlespi::new());
    let limits = LimitResource::new(api.clone());

    let state = limits.create(&fixtures::limit_model()).await.unwrap();
    assert_eq!(state.quotas.devices_count, 25);
    assert_eq!(state.quotas.api_calls, 20);
    assert!(api.limit(state.id).await.unwrap().metadata.is_empty());

    let mut plan = state.clone();
    plan.quotas.devices_count = 50;
    plan.blocking_duration = 120;
    let updated = limits.update(&plan).await.unwrap();
    assert_eq!(updated, plan);

    limits.delete(&updated).await.unwrap();
    assert!(limits.read(&updated).await.is_err());
}

#[tokio::test]
async fn test_subaccount_lifecycle() {
    let api = Arc::new(InMemoryFlespi::new());
    let limit = LimitResource::new(api.clone())
        .create(&fixtures::limit_model())
        .await
        .unwrap();
    let subaccounts = SubaccountResource::new(api.clone());

    let state = subaccounts
        .create(&fixtures::subaccount_model(limit.id))
        .await
        .unwrap();
    assert_eq!(state.limit_id, limit.id);
    assert_ne!(state.id, 0);

    let mut plan = state.clone();
    plan.name = "fleet-south".to_string();
    assert_eq!(subaccounts.update(&plan).await.unwrap().name, "fleet-south");

    subaccounts.delete(&plan).await.unwrap();
    assert!(api.subaccount(plan.id).await.is_none());
}

#[tokio::test]
async fn test_subaccount_with_unknown_limit_is_rejected() {
    let api = Arc::new(InMemoryFlespi::new());
    let subaccounts = SubaccountResource::new(api);

    let err = subaccounts
        .create(&fixtures::subaccount_model(999))
        .await
        .unwrap_err();
    assert_eq!(err.to_diagnostic().summary, "Error Creating Flespi Subaccount");
}

// ========== Channels and devices ==========

#[tokio::test]
async fn test_channel_create_resolves_protocol() {
    let api = Arc::new(InMemoryFlespi::new().with_protocol("teltonika", 9).await);
    let channels = ChannelResource::new(api.clone());

    let state = channels.create(&fixtures::channel_model()).await.unwrap();
    assert_eq!(state.protocol_id, 9);
    assert_eq!(state.protocol_name, "teltonika");
    assert_eq!(state.configuration, r#"{"host":"0.0.0.0","port":5000}"#);
    assert_eq!(
        api.calls().await,
        vec!["create_channel".to_string(), "get_channel".to_string()]
    );
}

#[tokio::test]
async fn test_channel_without_protocol_is_rejected() {
    let api = Arc::new(InMemoryFlespi::new());
    let channels = ChannelResource::new(api.clone());

    let err = channels
        .create(&ChannelResourceModel::new("bare"))
        .await
        .unwrap_err();
    assert!(matches!(err, ResourceError::Configuration(_)));
    assert_eq!(err.to_diagnostic().summary, "Protocol not specified for channel");
    assert_eq!(api.call_count().await, 0);
}

#[tokio::test]
async fn test_channel_update_and_delete() {
    let api = Arc::new(InMemoryFlespi::new().with_protocol("teltonika", 9).await);
    let channels = ChannelResource::new(api.clone());
    let state = channels.create(&fixtures::channel_model()).await.unwrap();

    let plan = state.clone().with_configuration(r#"{"port":6000}"#);
    let updated = channels.update(&plan).await.unwrap();
    assert_eq!(updated.configuration, r#"{"port":6000}"#);

    let bad = state.clone().with_configuration("port=6000");
    assert!(matches!(
        channels.update(&bad).await,
        Err(ResourceError::Conversion(_))
    ));

    channels.delete(&updated).await.unwrap();
    assert!(api.channel(updated.id).await.is_none());
}

#[tokio::test]
async fn test_device_lifecycle() {
    let api = Arc::new(InMemoryFlespi::new());
    let devices = DeviceResource::new(api.clone());

    let state = devices.create(&fixtures::device_model()).await.unwrap();
    assert_eq!(
        state.configuration.get("ident").map(String::as_str),
        Some("356307042441013")
    );

    let mut plan = state.clone();
    plan.enabled = false;
    plan.messages_ttl = 86400;
    let updated = devices.update(&plan).await.unwrap();
    assert_eq!(updated, plan);

    devices.delete(&updated).await.unwrap();
    let err = devices.delete(&updated).await.unwrap_err();
    assert_eq!(err.to_diagnostic().summary, "Error Deleting Flespi Device");
}

// ========== Provider ==========

#[tokio::test]
async fn test_configured_provider_shares_client() {
    let provider = FlespiProvider::new("0.1.0");
    let api = Arc::new(InMemoryFlespi::new());
    let config = flespi_config::ProviderConfig::new("token");

    let configured = provider.configure(&config, api.clone()).unwrap();
    assert_eq!(configured.url(), "https://flespi.io");

    let webhook = configured
        .webhooks()
        .create(&fixtures::single_webhook_model())
        .await
        .unwrap();
    let limit = configured
        .limits()
        .create(&fixtures::limit_model())
        .await
        .unwrap();

    // One id space across resource types
    assert_eq!((webhook.id, limit.id), (1, 2));
    assert!(matches!(api.webhook(1).await, Some(Webhook::Single(_))));
}

#[test]
fn test_configure_without_token_reports_diagnostic() {
    let provider = FlespiProvider::new("0.1.0");
    let config = flespi_config::ProviderConfig::new("");

    let diags = provider
        .configure(&config, Arc::new(InMemoryFlespi::new()))
        .err()
        .unwrap();
    assert!(diags.has_error());
    assert_eq!(diags.iter().next().unwrap().summary, "Missing Flespi Token");
}

#[test]
fn test_configure_with_bad_url_reports_diagnostic() {
    let provider = FlespiProvider::new("0.1.0");
    let config = flespi_config::ProviderConfig::new("token").with_url("ftp://flespi.io");

    let diags = provider
        .configure(&config, Arc::new(InMemoryFlespi::new()))
        .err()
        .unwrap();
    let summaries: Vec<_> = diags.iter().map(|d| d.summary.clone()).collect();
    assert_eq!(summaries, vec!["Invalid Flespi URL".to_string()]);
}

#[test]
fn test_type_names() {
    let api = Arc::new(InMemoryFlespi::new());
    assert_eq!(WebhookResource::new(api.clone()).type_name("flespi"), "flespi_webhook");
    assert_eq!(ChannelResource::new(api).type_name(PROVIDER_TYPE_NAME), "flespi_channel");
}
