//! Error types for webhook translation

use thiserror::Error;

/// Errors that can occur while translating a webhook resource model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The webhook `type` is not a known webhook kind
    #[error("Invalid webhook type: {0:?} (expected \"single-webhook\" or \"chained-webhook\")")]
    InvalidVariantTag(String),

    /// The configuration `type` is not a known configuration type
    #[error(
        "Invalid configuration type: {0:?} (expected \"custom-server\" or \"flespi-platform\")"
    )]
    InvalidConfigurationType(String),

    /// A field the selected variant requires is missing
    #[error("{variant} requires {field}")]
    MissingRequiredVariantData {
        variant: &'static str,
        field: &'static str,
    },

    /// More data was supplied than the selected variant can hold
    #[error("{variant} does not accept {detail}")]
    UnexpectedExtraData {
        variant: &'static str,
        detail: String,
    },

    /// A field owned by another variant is populated
    #[error("{field} is not supported by {variant}")]
    UnexpectedVariantData {
        variant: &'static str,
        field: &'static str,
    },

    /// A field has an invalid value
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}
