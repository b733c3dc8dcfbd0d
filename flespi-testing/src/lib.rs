//! Testing utilities for the flespi provider.
//!
//! ## Features
//!
//! - **InMemoryFlespi** - API double for every resource type
//! - **Call tracking** - Recorded calls and queued failures
//! - **Fixtures** - Ready-made resource models
//!
//! ## Quick Start
//!
//! ```
//! use flespi_resources::{Resource, WebhookResource};
//! use flespi_testing::{fixtures, InMemoryFlespi};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let api = Arc::new(InMemoryFlespi::new());
//! let webhooks = WebhookResource::new(api.clone());
//!
//! let state = webhooks.create(&fixtures::single_webhook_model()).await.unwrap();
//! assert_eq!(state.id, 1);
//! assert!(api.was_called("create_webhook").await);
//! # });
//! ```
//!
//! ## Failure Injection
//!
//! ```
//! use flespi_resources::{ApiError, Resource, WebhookResource};
//! use flespi_testing::{fixtures, InMemoryFlespi};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let api = Arc::new(InMemoryFlespi::new());
//! api.fail_next("create_webhook", ApiError::Unauthorized).await;
//!
//! let result = WebhookResource::new(api).create(&fixtures::single_webhook_model()).await;
//! assert!(result.is_err());
//! # });
//! ```

pub mod fixtures;
pub mod mock;

pub use mock::InMemoryFlespi;
