// Ready-made resource models

use flespi_resources::{
    ChannelResourceModel, DeviceResourceModel, LimitQuotas, LimitResourceModel,
    SubaccountResourceModel,
};
use flespi_webhooks::model::{ConfigurationRecord, TriggerModel, WebhookResourceModel};

/// Single webhook posting device messages to a custom server
pub fn single_webhook_model() -> WebhookResourceModel {
    WebhookResourceModel::new("device-messages", "single-webhook")
        .with_trigger(TriggerModel::new("flespi/message/gw/devices/+").with_filter(0, "speed>80"))
        .with_configuration(
            ConfigurationRecord::custom_server("https://example.com/hooks/messages", "POST")
                .with_body("%payload%")
                .with_header("Authorization", "Bearer test-token")
                .with_header("Content-Type", "application/json"),
        )
}

/// Chained webhook: custom server stage followed by a platform stage
pub fn chained_webhook_model() -> WebhookResourceModel {
    WebhookResourceModel::new("enrich-and-store", "chained-webhook")
        .with_trigger(TriggerModel::new("flespi/state/gw/devices/+/telemetry/position"))
        .with_configuration(
            ConfigurationRecord::custom_server("https://example.com/enrich", "PUT")
                .with_validator("status == 200", "continue"),
        )
        .with_configuration(platform_record())
}

/// Platform configuration record acting on behalf of customer 12345
pub fn platform_record() -> ConfigurationRecord {
    ConfigurationRecord::platform("/gw/devices/all/messages", "POST", "12345")
        .with_body("%payload%")
}

pub fn limit_model() -> LimitResourceModel {
    LimitResourceModel::new("starter")
        .with_description("starter plan")
        .with_quotas(LimitQuotas {
            devices_count: 25,
            webhooks_count: 5,
            ..LimitQuotas::default()
        })
}

pub fn subaccount_model(limit_id: i64) -> SubaccountResourceModel {
    SubaccountResourceModel::new("fleet-north", limit_id)
}

/// Channel created by protocol name; pair with `with_protocol("teltonika", ..)`
pub fn channel_model() -> ChannelResourceModel {
    ChannelResourceModel::new("teltonika-ingest")
        .with_protocol_name("teltonika")
        .with_configuration(r#"{"host":"0.0.0.0","port":5000}"#)
        .with_metadata("team", "fleet")
}

pub fn device_model() -> DeviceResourceModel {
    DeviceResourceModel::new("truck-17", 745).with_setting("ident", "356307042441013")
}
