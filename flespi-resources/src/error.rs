//! Resource lifecycle errors

use crate::client::ApiError;
use crate::diagnostics::Diagnostic;
use flespi_webhooks::TranslateError;
use std::fmt;
use thiserror::Error;

/// Result type for lifecycle operations
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Lifecycle operation, used to word diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    pub fn gerund(&self) -> &'static str {
        match self {
            Operation::Create => "Creating",
            Operation::Read => "Reading",
            Operation::Update => "Updating",
            Operation::Delete => "Deleting",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Errors raised while managing a resource
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The webhook configuration could not be translated
    #[error("Invalid webhook configuration: {0}")]
    Translate(#[from] TranslateError),

    /// The API rejected or failed a call
    #[error("Could not {operation} {resource}: {source}")]
    Api {
        operation: Operation,
        resource: &'static str,
        #[source]
        source: ApiError,
    },

    /// A field could not be converted between models
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// The configuration is incomplete or contradictory
    #[error("{0}")]
    Configuration(String),
}

impl ResourceError {
    pub(crate) fn api(
        operation: Operation,
        resource: &'static str,
    ) -> impl FnOnce(ApiError) -> ResourceError {
        move |source| ResourceError::Api {
            operation,
            resource,
            source,
        }
    }

    /// Host-facing rendering of this error
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResourceError::Translate(e) => {
                Diagnostic::error("Invalid Flespi Webhook Configuration", e.to_string())
            }
            ResourceError::Api {
                operation,
                resource,
                source,
            } => Diagnostic::error(
                format!("Error {} Flespi {}", operation.gerund(), title_case(resource)),
                format!(
                    "Could not {} {}, unexpected error: {}",
                    operation, resource, source
                ),
            ),
            ResourceError::Conversion(msg) => Diagnostic::error("Unable to Convert Resource", msg),
            ResourceError::Configuration(msg) => {
                Diagnostic::error(msg, "Please check the resource configuration.")
            }
        }
    }
}

impl From<&ResourceError> for Diagnostic {
    fn from(err: &ResourceError) -> Self {
        err.to_diagnostic()
    }
}

pub(crate) fn log_failure(err: &ResourceError) {
    tracing::error!("{}", err);
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_diagnostic_names_operation_and_resource() {
        let err = ResourceError::api(Operation::Create, "webhook")(ApiError::Rejected(
            "name is required".to_string(),
        ));
        let diag = err.to_diagnostic();
        assert_eq!(diag.summary, "Error Creating Flespi Webhook");
        assert!(diag.detail.contains("Could not create webhook"));
        assert!(diag.detail.contains("name is required"));
    }

    #[test]
    fn test_translate_error_converts() {
        let err: ResourceError = TranslateError::InvalidVariantTag("bogus".to_string()).into();
        assert!(matches!(err, ResourceError::Translate(_)));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_configuration_diagnostic_uses_message_as_summary() {
        let err = ResourceError::Configuration("Protocol not specified for channel".to_string());
        assert_eq!(err.to_diagnostic().summary, "Protocol not specified for channel");
    }

    #[test]
    fn test_operation_wording() {
        assert_eq!(Operation::Delete.gerund(), "Deleting");
        assert_eq!(Operation::Read.to_string(), "read");
    }
}
