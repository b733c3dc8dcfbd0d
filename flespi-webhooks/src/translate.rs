//! Translation between the flat resource model and the webhook API model
//!
//! Both directions are pure: inputs are borrowed, a new value is built, and on
//! failure no partial result is returned. List order is preserved everywhere.

use crate::model::{
    ConfigurationRecord, FilterModel, HeaderModel, TriggerModel, ValidatorModel,
    WebhookResourceModel,
};
use crate::{
    ChainedWebhook, Configuration, ConfigurationType, CustomServerConfiguration, Header,
    PlatformConfiguration, Result, SingleWebhook, TranslateError, Trigger, TriggerFilter,
    Validator, Webhook, WebhookKind,
};

/// Convert a resource model into a webhook
pub fn to_webhook(model: &WebhookResourceModel) -> Result<Webhook> {
    if model.name.trim().is_empty() {
        return Err(TranslateError::InvalidField {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }

    let kind: WebhookKind = model.kind.parse()?;
    let triggers = to_triggers(&model.triggers);

    match kind {
        WebhookKind::Single => {
            let record = match model.configurations.as_slice() {
                [record] => record,
                [] => {
                    return Err(TranslateError::MissingRequiredVariantData {
                        variant: WebhookKind::SINGLE,
                        field: "one configuration",
                    });
                }
                records => {
                    return Err(TranslateError::UnexpectedExtraData {
                        variant: WebhookKind::SINGLE,
                        detail: format!("{} configurations (exactly one allowed)", records.len()),
                    });
                }
            };

            Ok(Webhook::Single(SingleWebhook {
                id: model.id,
                name: model.name.clone(),
                triggers,
                configuration: to_configuration(record)?,
            }))
        }
        WebhookKind::Chained => {
            if model.configurations.is_empty() {
                return Err(TranslateError::MissingRequiredVariantData {
                    variant: WebhookKind::CHAINED,
                    field: "at least one configuration",
                });
            }

            let configuration = model
                .configurations
                .iter()
                .map(to_configuration)
                .collect::<Result<Vec<_>>>()?;

            Ok(Webhook::Chained(ChainedWebhook {
                id: model.id,
                name: model.name.clone(),
                triggers,
                configuration,
            }))
        }
    }
}

/// Convert a webhook into a resource model
pub fn to_resource_model(webhook: &Webhook) -> WebhookResourceModel {
    let configurations = webhook
        .configurations()
        .iter()
        .map(to_configuration_record)
        .collect();

    WebhookResourceModel {
        id: webhook.id(),
        name: webhook.name().to_string(),
        kind: webhook.kind().as_str().to_string(),
        triggers: from_triggers(webhook.triggers()),
        configurations,
    }
}

/// Convert one flat configuration record into a delivery configuration
pub fn to_configuration(record: &ConfigurationRecord) -> Result<Configuration> {
    let config_type: ConfigurationType = record.kind.parse()?;
    let body = record.body.clone().unwrap_or_default();
    let validate = record.validate.as_ref().map(to_validator);

    match config_type {
        ConfigurationType::CustomServer => {
            if record.cid.is_some() {
                return Err(TranslateError::UnexpectedVariantData {
                    variant: ConfigurationType::CUSTOM_SERVER,
                    field: "cid",
                });
            }

            Ok(Configuration::CustomServer(CustomServerConfiguration {
                uri: record.uri.clone(),
                method: record.method.clone(),
                body,
                ca: record.ca.clone(),
                headers: record.headers.iter().map(to_header).collect(),
                validate,
            }))
        }
        ConfigurationType::Platform => {
            if record.ca.is_some() {
                return Err(TranslateError::UnexpectedVariantData {
                    variant: ConfigurationType::PLATFORM,
                    field: "ca",
                });
            }
            if !record.headers.is_empty() {
                return Err(TranslateError::UnexpectedVariantData {
                    variant: ConfigurationType::PLATFORM,
                    field: "headers",
                });
            }
            Ok(Configuration::Platform(PlatformConfiguration {
                uri: record.uri.clone(),
                method: record.method.clone(),
                body,
                cid: record.cid.clone().unwrap_or_default(),
                validate,
            }))
        }
    }
}

/// Convert a delivery configuration into a flat record
pub fn to_configuration_record(configuration: &Configuration) -> ConfigurationRecord {
    match configuration {
        Configuration::CustomServer(cfg) => ConfigurationRecord {
            kind: ConfigurationType::CUSTOM_SERVER.to_string(),
            uri: cfg.uri.clone(),
            method: cfg.method.clone(),
            body: non_empty(&cfg.body),
            ca: cfg.ca.clone(),
            cid: None,
            headers: cfg.headers.iter().map(from_header).collect(),
            validate: cfg.validate.as_ref().map(from_validator),
        },
        Configuration::Platform(cfg) => ConfigurationRecord {
            kind: ConfigurationType::PLATFORM.to_string(),
            uri: cfg.uri.clone(),
            method: cfg.method.clone(),
            body: non_empty(&cfg.body),
            ca: None,
            cid: non_empty(&cfg.cid),
            headers: Vec::new(),
            validate: cfg.validate.as_ref().map(from_validator),
        },
    }
}

fn to_triggers(triggers: &[TriggerModel]) -> Vec<Trigger> {
    triggers
        .iter()
        .map(|t| Trigger {
            topic: t.topic.clone(),
            filter: t.filter.as_ref().map(|f| TriggerFilter {
                cid: f.cid,
                payload: f.payload.clone(),
            }),
        })
        .collect()
}

fn from_triggers(triggers: &[Trigger]) -> Vec<TriggerModel> {
    triggers
        .iter()
        .map(|t| TriggerModel {
            topic: t.topic.clone(),
            filter: t.filter.as_ref().map(|f| FilterModel {
                cid: f.cid,
                payload: f.payload.clone(),
            }),
        })
        .collect()
}

fn to_header(header: &HeaderModel) -> Header {
    Header {
        name: header.name.clone(),
        value: header.value.clone(),
    }
}

fn from_header(header: &Header) -> HeaderModel {
    HeaderModel {
        name: header.name.clone(),
        value: header.value.clone(),
    }
}

fn to_validator(validator: &ValidatorModel) -> Validator {
    Validator {
        expression: validator.expression.clone(),
        action: validator.action.clone(),
    }
}

fn from_validator(validator: &Validator) -> ValidatorModel {
    ValidatorModel {
        expression: validator.expression.clone(),
        action: validator.action.clone(),
    }
}

// An empty body and an unset body are the same thing to the API
fn non_empty(body: &str) -> Option<String> {
    (!body.is_empty()).then(|| body.to_string())
}

impl TryFrom<&WebhookResourceModel> for Webhook {
    type Error = TranslateError;

    fn try_from(model: &WebhookResourceModel) -> Result<Self> {
        to_webhook(model)
    }
}

impl From<&Webhook> for WebhookResourceModel {
    fn from(webhook: &Webhook) -> Self {
        to_resource_model(webhook)
    }
}

impl TryFrom<&ConfigurationRecord> for Configuration {
    type Error = TranslateError;

    fn try_from(record: &ConfigurationRecord) -> Result<Self> {
        to_configuration(record)
    }
}

impl From<&Configuration> for ConfigurationRecord {
    fn from(configuration: &Configuration) -> Self {
        to_configuration_record(configuration)
    }
}
